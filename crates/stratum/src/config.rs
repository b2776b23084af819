use serde::Deserialize;

/// Connection and fetch settings, loadable from any serde format.
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config: stratum::Config = serde_json::from_str(r#"{ "url": "sqlite::memory:" }"#)?;
/// assert_eq!(config.chunk_size, 100);
/// assert!(!config.destroyable);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Connection URL; its scheme selects the driver
    pub url: String,

    /// Allow [`Db::destroy`](crate::Db::destroy) to drop every object in the
    /// database
    #[serde(default)]
    pub destroyable: bool,

    /// Identifiers per round trip when fetching by id
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

pub(crate) const DEFAULT_CHUNK_SIZE: usize = 100;

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Config {
    pub fn new(url: impl Into<String>) -> Config {
        Config {
            url: url.into(),
            destroyable: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config: Config = serde_json::from_str(r#"{ "url": "sqlite::memory:" }"#).unwrap();
        assert_eq!(config, Config::new("sqlite::memory:"));
    }

    #[test]
    fn all_fields() {
        let config: Config = serde_json::from_str(
            r#"{ "url": "postgresql://localhost/app", "destroyable": true, "chunk_size": 500 }"#,
        )
        .unwrap();

        assert_eq!(config.url, "postgresql://localhost/app");
        assert!(config.destroyable);
        assert_eq!(config.chunk_size, 500);
    }

    #[test]
    fn rejects_unknown_fields() {
        let res = serde_json::from_str::<Config>(r#"{ "url": "sqlite::memory:", "prefix": "x" }"#);
        assert!(res.is_err());
    }
}
