use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    NotFound(String),
    InvalidInput(String),
    /// No token, or the backend rejected it
    Unauthenticated(String),
    Internal(anyhow::Error),
}

impl Error {
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Error::Unauthenticated(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::Unauthenticated(msg) => {
                write!(f, "{} (run `bisoshi auth login` to sign in)", msg)
            }
            Error::Internal(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Internal(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err)
    }
}

impl From<bisoshi_api::Error> for Error {
    fn from(err: bisoshi_api::Error) -> Self {
        match err {
            err if err.is_auth() => Error::Unauthenticated(err.to_string()),
            bisoshi_api::Error::Status { status: 404, message } => Error::NotFound(message),
            bisoshi_api::Error::InvalidInput(msg) => Error::InvalidInput(msg),
            err => Error::Internal(err.into()),
        }
    }
}

impl From<bisoshi_runtime::Error> for Error {
    fn from(err: bisoshi_runtime::Error) -> Self {
        match err {
            bisoshi_runtime::Error::Api(err) => err.into(),
            bisoshi_runtime::Error::NotFound(msg) => Error::NotFound(msg),
            bisoshi_runtime::Error::InvalidInput(msg) => Error::InvalidInput(msg),
            err => Error::Internal(err.into()),
        }
    }
}

impl From<bisoshi_core::Error> for Error {
    fn from(err: bisoshi_core::Error) -> Self {
        Error::Internal(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_are_classified() {
        let err: Error = bisoshi_api::Error::MissingToken.into();
        assert!(err.is_unauthenticated());

        let err: Error = bisoshi_api::Error::Status {
            status: 404,
            message: "Product not found".into(),
        }
        .into();
        assert!(matches!(err, Error::NotFound(ref m) if m == "Product not found"));

        let err: Error = bisoshi_api::Error::Transport("refused".into()).into();
        assert!(matches!(err, Error::Internal(_)));
    }
}
