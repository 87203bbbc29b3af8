//! Errors raised while loading or checking `folio.toml`.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{path}` is not a valid folio config")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value that parses but cannot be used. `key` is the dotted TOML
    /// key, e.g. `build.feed.max_items`.
    #[error("[{key}] {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("deploy command `{command}` is not installed")]
    CommandNotFound {
        command: String,
        #[source]
        source: which::Error,
    },
}

impl ConfigError {
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_read_error_names_file() {
        let err = ConfigError::Read {
            path: PathBuf::from("site/folio.toml"),
            source: io::Error::new(ErrorKind::NotFound, "file not found"),
        };
        assert_eq!(err.to_string(), "cannot read config file `site/folio.toml`");
    }

    #[test]
    fn test_invalid_names_key() {
        let err = ConfigError::invalid("build.feed.max_items", "must be at least 1");
        assert_eq!(err.to_string(), "[build.feed.max_items] must be at least 1");
    }
}
