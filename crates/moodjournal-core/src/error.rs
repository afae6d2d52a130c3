//! Error types for the mood journal

/// Result type alias using the mood journal's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for mood journal operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The semantic encoder or an underlying pretrained model failed to load or evaluate
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Journal storage errors
    #[error("storage error: {0}")]
    Storage(String),

    /// A labeled-sample file was missing or malformed
    #[error("sample data error: {0}")]
    Sample(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new model-unavailable error
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new sample data error
    pub fn sample(msg: impl Into<String>) -> Self {
        Self::Sample(msg.into())
    }

    /// Whether this error means the classifier cannot serve requests
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, Self::ModelUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::model_unavailable("weights missing");
        assert_eq!(err.to_string(), "model unavailable: weights missing");
        assert!(err.is_model_unavailable());

        let err = Error::sample("bad json");
        assert_eq!(err.to_string(), "sample data error: bad json");
        assert!(!err.is_model_unavailable());
    }

    #[test]
    fn test_every_variant_has_a_kind() {
        let kind = |err: &Error| match err {
            Error::ModelUnavailable(_) => "model",
            Error::Config(_) => "config",
            Error::Storage(_) => "storage",
            Error::Sample(_) => "sample",
            Error::Io(_) => "io",
            Error::Serialization(_) => "serialization",
        };
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let errors = [
            Error::model_unavailable("x"),
            Error::config("x"),
            Error::storage("x"),
            Error::sample("x"),
            Error::from(std::io::Error::new(std::io::ErrorKind::Other, "x")),
            Error::from(parse),
        ];
        let kinds: Vec<_> = errors.iter().map(kind).collect();
        assert_eq!(kinds, ["model", "config", "storage", "sample", "io", "serialization"]);
        assert_eq!(Error::storage("locked").to_string(), "storage error: locked");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
