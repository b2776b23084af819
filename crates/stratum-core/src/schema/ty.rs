/// Database storage type of a column.
///
/// Rendering to SQL is the dialect's job; the same `Type` may produce
/// different keywords per engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// A boolean value
    Boolean,

    /// A signed integer of `n` bytes
    Integer(u8),

    /// Generated record key. SQLite stores it as `INTEGER` so that it aliases
    /// the rowid, PostgreSQL as `BIGINT`.
    Id,

    /// A floating point number of `n` bytes
    Float(u8),

    /// Unconstrained text type
    Text,

    /// Text type with an explicit maximum length
    VarChar(u64),

    /// Binary data
    Blob,

    /// Point in time
    Timestamp,

    /// Engine-specific type, rendered verbatim
    Custom(String),
}
