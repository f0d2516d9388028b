use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Authenticated call attempted without a bearer token
    MissingToken,

    /// Network failure, refused connection or timeout
    Transport(String),

    /// Backend answered with a non-2xx status
    Status { status: u16, message: String },

    /// Response body did not match the expected schema
    Schema { context: String, detail: String },

    /// Request rejected before it was sent
    InvalidInput(String),
}

impl Error {
    /// 401/403 and a missing token all mean "sign in again".
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Error::MissingToken | Error::Status { status: 401 | 403, .. }
        )
    }

    /// Whether repeating the same request can succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::Status { status, .. } => *status >= 500 || *status == 408 || *status == 429,
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingToken => write!(f, "Not signed in"),
            Error::Transport(msg) => write!(f, "Network error: {}", msg),
            Error::Status { status, message } => {
                write!(f, "Server returned {}: {}", status, message)
            }
            Error::Schema { context, detail } => {
                write!(f, "Unexpected response from {}: {}", context, detail)
            }
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Transport(format!("request timed out: {}", err))
        } else {
            Error::Transport(err.to_string())
        }
    }
}
