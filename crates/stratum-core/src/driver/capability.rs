use crate::schema::Type;

#[derive(Debug)]
pub struct Capability {
    /// Engine identifier, used to select the SQL dialect.
    pub engine: &'static str,

    /// Column storage types supported by the database
    pub storage_types: StorageTypes,

    /// Maximum number of bind parameters in a single statement.
    pub max_parameters: usize,
}

#[derive(Debug)]
pub struct StorageTypes {
    /// The default storage type for a string.
    pub default_string_type: Type,

    /// When `Some` the database supports varchar types with the specified upper
    /// limit.
    pub varchar: Option<u64>,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        engine: "sqlite",
        storage_types: StorageTypes::SQLITE,
        // SQLITE_MAX_VARIABLE_NUMBER since 3.32
        max_parameters: 32_766,
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        engine: "postgresql",
        storage_types: StorageTypes::POSTGRESQL,
        max_parameters: 65_535,
    };
}

impl StorageTypes {
    /// SQLite storage types
    pub const SQLITE: StorageTypes = StorageTypes {
        default_string_type: Type::Text,

        // SQLite ignores the length of VARCHAR(N); the only limit is
        // SQLITE_MAX_LENGTH, 1 billion by default.
        varchar: Some(1_000_000_000),
    };

    /// PostgreSQL storage types
    pub const POSTGRESQL: StorageTypes = StorageTypes {
        default_string_type: Type::Text,

        // The maximum n you can specify is 10 485 760 characters.
        varchar: Some(10_485_760),
    };
}
