//! Error types for configuration loading and validation.

use spoke_common::ConfigError;

/// Errors that can occur when loading or validating a `spoke.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// The configured device, graph, or feature sizes are inconsistent.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_field() {
        let err = LoadError::MissingField("graph.src".to_string());
        assert_eq!(format!("{err}"), "missing required field: graph.src");
    }

    #[test]
    fn display_parse_error() {
        let err = LoadError::Parse("expected '=' at line 3".to_string());
        assert_eq!(
            format!("{err}"),
            "failed to parse configuration: expected '=' at line 3"
        );
    }

    #[test]
    fn display_wraps_config_error() {
        let err = LoadError::from(ConfigError::ZeroExtent { axis: "rows" });
        assert_eq!(
            format!("{err}"),
            "invalid configuration: device rows extent must be positive"
        );
    }

    #[test]
    fn display_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = LoadError::Io(io_err);
        assert!(format!("{err}").starts_with("failed to read configuration:"));
    }
}
