//! HTTP access to the dashboard backend and the chatbot service.
//!
//! Requests go through the [`Transport`] trait. [`HttpTransport`] is the
//! reqwest implementation; tests plug in an in-memory backend instead.
//! Every response body is parsed into a typed schema at this boundary, so a
//! malformed payload surfaces as [`Error::Schema`] rather than leaking into
//! view state.

pub mod chatbot;
pub mod client;
pub mod error;
pub mod transport;

pub use chatbot::{ChatbotClient, ChatbotSettings};
pub use client::ApiClient;
pub use error::{Error, Result};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
