pub mod domain;
pub mod error;
pub mod route;

pub use domain::*;
pub use error::{Error, Result};
pub use route::Route;
