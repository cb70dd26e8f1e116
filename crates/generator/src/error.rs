use thiserror::Error;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors that stop generation for a single type
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The type does not carry the trigger marker
    #[error("Type {0} is not annotated with the interface marker")]
    NotAnnotated(String),

    /// The marker sits on something other than a class
    #[error("Cannot generate an interface from {kind} {name}")]
    UnsupportedTarget { name: String, kind: &'static str },

    /// The host handed over a symbol that cannot name anything
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The host abandoned the pass
    #[error("Generation cancelled")]
    Cancelled,
}

impl GeneratorError {
    /// Create an invalid symbol error
    pub fn invalid_symbol(msg: impl Into<String>) -> Self {
        Self::InvalidSymbol(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
