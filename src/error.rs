use std::fmt::{self, Debug, Display};
use std::io;

/// Provides `IxaError` and maps other errors to it. Only setup paths (configuration loading,
/// registry construction) are fallible; the transmission step itself never returns an error.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum IxaError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    IxaError(String),
}

impl From<io::Error> for IxaError {
    fn from(error: io::Error) -> Self {
        IxaError::IoError(error)
    }
}

impl From<serde_json::Error> for IxaError {
    fn from(error: serde_json::Error) -> Self {
        IxaError::JsonError(error)
    }
}

impl From<String> for IxaError {
    fn from(error: String) -> Self {
        IxaError::IxaError(error)
    }
}

impl From<&str> for IxaError {
    fn from(error: &str) -> Self {
        IxaError::IxaError(error.to_string())
    }
}

impl std::error::Error for IxaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IxaError::IoError(error) => Some(error),
            IxaError::JsonError(error) => Some(error),
            IxaError::IxaError(_) => None,
        }
    }
}

impl Display for IxaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IxaError::IoError(error) => write!(f, "I/O error: {error}"),
            IxaError::JsonError(error) => write!(f, "JSON error: {error}"),
            IxaError::IxaError(message) => write!(f, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_errors_display_verbatim() {
        let error: IxaError = "bite rate must be non-negative".into();
        assert_eq!(error.to_string(), "bite rate must be non-negative");
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{ not json");
        let error: IxaError = parse.unwrap_err().into();
        assert!(matches!(error, IxaError::JsonError(_)));
        assert!(std::error::Error::source(&error).is_some());
    }
}
