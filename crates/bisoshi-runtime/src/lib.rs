//! Stateful layer between the SDK facade and the pure engine.
//!
//! - [`Config`]: `config.toml` in the data directory
//! - [`ListController`]: one entity list kept in sync with the backend
//! - [`ChatSession`]: chatbot conversation history
//! - [`catalog`]: the built-in course list

pub mod catalog;
pub mod chat;
pub mod config;
pub mod controller;
pub mod error;

pub use chat::{APOLOGY, ChatSession, canned_reply};
pub use config::{ApiConfig, CONFIG_KEYS, ChatbotConfig, Config, TableConfig};
pub use controller::{
    Completion, DeleteTicket, DetachHandle, FormMode, FormState, ListController, ListTicket,
    RequestState, RetryAction, SubmitTicket, ViewError,
};
pub use error::{Error, Result};
