use std::fmt;

/// Result type for bisoshi-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Field name is not part of the form
    UnknownField(String),

    /// Raw input could not be converted to the field's type
    InvalidField { field: String, reason: String },

    /// Value does not name a known variant (sort direction, entity kind)
    InvalidValue(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownField(name) => write!(f, "Unknown field: {}", name),
            Error::InvalidField { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            Error::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
