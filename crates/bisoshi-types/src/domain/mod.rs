pub mod auth;
pub mod chat;
pub mod course;
pub mod entity;
pub mod record;
pub mod resource;

pub use auth::*;
pub use chat::*;
pub use course::*;
pub use entity::*;
pub use record::*;
pub use resource::*;
