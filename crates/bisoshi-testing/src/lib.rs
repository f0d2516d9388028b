//! Testing infrastructure for bisoshi tests.
//!
//! - `FakeBackend`: in-memory REST backend behind the `Transport` trait
//! - `fixtures`: sample products, clients and sales
//! - `TestWorld`: isolated data directory for CLI integration tests
//! - `assertions`: checks over the CLI's JSON output

pub mod assertions;
pub mod backend;
pub mod fixtures;
pub mod world;

pub use backend::{BASE_URL, CHATBOT_URL, Failure, FakeBackend, Gate, TOKEN};
pub use world::{CliResult, TestWorld};
