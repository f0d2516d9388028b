use std::fmt;

/// Result type for bisoshi-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Backend or chatbot request failed
    Api(bisoshi_api::Error),

    /// Data directory or session store failure
    Core(bisoshi_core::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Record id is not in the current collection
    NotFound(String),

    /// Form or argument value rejected
    InvalidInput(String),

    /// Operation not valid in the current state
    InvalidOperation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Api(err) => write!(f, "{}", err),
            Error::Core(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Api(err) => Some(err),
            Error::Core(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_)
            | Error::NotFound(_)
            | Error::InvalidInput(_)
            | Error::InvalidOperation(_) => None,
        }
    }
}

impl From<bisoshi_api::Error> for Error {
    fn from(err: bisoshi_api::Error) -> Self {
        Error::Api(err)
    }
}

impl From<bisoshi_core::Error> for Error {
    fn from(err: bisoshi_core::Error) -> Self {
        Error::Core(err)
    }
}

impl From<bisoshi_types::Error> for Error {
    fn from(err: bisoshi_types::Error) -> Self {
        Error::InvalidInput(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
