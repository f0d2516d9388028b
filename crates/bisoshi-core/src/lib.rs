pub mod error;
pub mod path;
pub mod session;

pub use error::{Error, Result};
pub use path::*;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
