//! Error types for Postboard

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PostboardError>;

#[derive(Error, Debug)]
pub enum PostboardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PostboardError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PostboardError::InvalidInput(_) => 3,
            PostboardError::Source(_) => 1,
            PostboardError::Config(_) => 1,
        }
    }

    /// True when the error came from fetching posts (the network error kind)
    pub fn is_source_error(&self) -> bool {
        matches!(self, PostboardError::Source(_))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Failures while fetching posts from a remote source
///
/// Every variant leaves the store untouched; the caller of `refresh`
/// decides what to do with it. Nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_input() {
        let error = PostboardError::InvalidInput("limit must be positive".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_source_errors() {
        let network = PostboardError::Source(SourceError::Network("refused".to_string()));
        let status = PostboardError::Source(SourceError::Status {
            status: 500,
            url: "http://localhost/posts".to_string(),
        });
        let parse = PostboardError::Source(SourceError::Parse("expected array".to_string()));

        assert_eq!(network.exit_code(), 1);
        assert_eq!(status.exit_code(), 1);
        assert_eq!(parse.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_config_error() {
        let error = PostboardError::Config(ConfigError::MissingField("source.base_url".to_string()));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting_invalid_input() {
        let error = PostboardError::InvalidInput("limit must be positive".to_string());
        assert_eq!(format!("{}", error), "Invalid input: limit must be positive");
    }

    #[test]
    fn test_error_message_formatting_status() {
        let error: PostboardError = SourceError::Status {
            status: 404,
            url: "https://example.test/posts?_limit=3".to_string(),
        }
        .into();
        assert_eq!(
            format!("{}", error),
            "Source error: Unexpected HTTP status 404 from https://example.test/posts?_limit=3"
        );
    }

    #[test]
    fn test_error_message_formatting_config() {
        let error: PostboardError = ConfigError::InvalidValue("source.default_limit must be at least 1".to_string()).into();
        assert_eq!(
            format!("{}", error),
            "Configuration error: Invalid value: source.default_limit must be at least 1"
        );
    }

    #[test]
    fn test_is_source_error() {
        assert!(PostboardError::Source(SourceError::Parse("x".to_string())).is_source_error());
        assert!(!PostboardError::InvalidInput("x".to_string()).is_source_error());
    }

    #[test]
    fn test_source_error_clone() {
        // The mock source replays the same error on every call
        let original = SourceError::Network("Connection reset".to_string());
        let cloned = original.clone();
        assert_eq!(original, cloned);
    }

    #[test]
    fn test_config_error_read_error_formatting() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let message = format!("{}", ConfigError::ReadError(io_error));
        assert!(message.contains("Failed to read config file"));
    }
}
