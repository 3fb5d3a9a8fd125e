use std::fmt;

/// Error types for siteaudit operations.
///
/// Only run-level problems are represented here. A page or asset that cannot
/// be reached is never an error: it degrades to a report row or a skip.
#[derive(Debug)]
pub enum AuditError {
    /// IO error (config files, CA bundles)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// More page URLs were supplied than a single run accepts
    TooManyInputs { count: usize, max: usize },

    /// A required input (page list, keyword) is empty
    MissingInput(String),

    /// A URL could not be parsed
    InvalidUrl(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// Regex compilation error
    Regex(regex::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Page discovery (sitemap) failed
    Discovery(String),
}

impl AuditError {
    /// Input errors are raised before any network activity.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AuditError::TooManyInputs { .. } | AuditError::MissingInput(_)
        )
    }
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::Io(err) => write!(f, "IO error: {err}"),
            AuditError::Config(msg) => write!(f, "Configuration error: {msg}"),
            AuditError::TooManyInputs { count, max } => write!(
                f,
                "Too many inputs: please provide up to {max} URLs only (you entered {count})"
            ),
            AuditError::MissingInput(msg) => write!(f, "Missing input: {msg}"),
            AuditError::InvalidUrl(msg) => write!(f, "Invalid URL: {msg}"),
            AuditError::Http(err) => write!(f, "HTTP error: {err}"),
            AuditError::Regex(err) => write!(f, "Regex error: {err}"),
            AuditError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            AuditError::Discovery(msg) => write!(f, "Discovery error: {msg}"),
        }
    }
}

impl std::error::Error for AuditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuditError::Io(err) => Some(err),
            AuditError::Http(err) => Some(err),
            AuditError::Regex(err) => Some(err),
            AuditError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        AuditError::Io(err)
    }
}

impl From<reqwest::Error> for AuditError {
    fn from(err: reqwest::Error) -> Self {
        AuditError::Http(err)
    }
}

impl From<regex::Error> for AuditError {
    fn from(err: regex::Error) -> Self {
        AuditError::Regex(err)
    }
}

impl From<toml::de::Error> for AuditError {
    fn from(err: toml::de::Error) -> Self {
        AuditError::TomlParsing(err)
    }
}

impl From<url::ParseError> for AuditError {
    fn from(err: url::ParseError) -> Self {
        AuditError::InvalidUrl(err.to_string())
    }
}

/// Type alias for Results using AuditError
pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let config_error = AuditError::Config("Invalid timeout".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: Invalid timeout"
        );

        let too_many = AuditError::TooManyInputs { count: 21, max: 20 };
        assert_eq!(
            format!("{too_many}"),
            "Too many inputs: please provide up to 20 URLs only (you entered 21)"
        );
    }

    #[test]
    fn test_error_is_input_error() {
        assert!(AuditError::TooManyInputs { count: 3, max: 2 }.is_input_error());
        assert!(AuditError::MissingInput("keyword".to_string()).is_input_error());
        assert!(!AuditError::Discovery("boom".to_string()).is_input_error());
        assert!(!AuditError::Config("bad".to_string()).is_input_error());
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let audit_error = AuditError::from(io_error);

        match audit_error {
            AuditError::Io(_) => {} // Expected
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    #[allow(clippy::invalid_regex)]
    fn test_error_from_regex() {
        let regex_error = regex::Regex::new("[invalid").unwrap_err();
        let audit_error = AuditError::from(regex_error);

        match audit_error {
            AuditError::Regex(_) => {} // Expected
            _ => panic!("Expected Regex variant"),
        }
    }

    #[test]
    fn test_error_from_toml() {
        let toml_error = toml::from_str::<toml::Value>("invalid toml [").unwrap_err();
        let audit_error = AuditError::from(toml_error);

        match audit_error {
            AuditError::TomlParsing(_) => {} // Expected
            _ => panic!("Expected TomlParsing variant"),
        }
    }

    #[test]
    fn test_error_from_url_parse() {
        let parse_error = url::Url::parse("not a url").unwrap_err();
        let audit_error = AuditError::from(parse_error);

        assert!(matches!(audit_error, AuditError::InvalidUrl(_)));
    }

    #[test]
    fn test_error_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let audit_error = AuditError::Io(io_error);

        assert!(audit_error.source().is_some());

        let config_error = AuditError::Config("test".to_string());
        assert!(config_error.source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuditError>();
    }
}
