//! bisoshi-sdk: client library for the bisoshi business dashboard.
//!
//! # Quickstart
//!
//! ```no_run
//! use bisoshi_sdk::Client;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::connect_default(None)?;
//! client.login("admin@example.pe", "secret").await?;
//!
//! let mut products = client.products();
//! products.refresh().await;
//! products.view_mut().set_filter("urea");
//! for product in products.view().visible() {
//!     println!("{} {}", product.name, product.price);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! This SDK is a facade over:
//! - `bisoshi-types`: entities, resource descriptors and routes
//! - `bisoshi-engine`: filter/sort pipeline, pagination and table state
//! - `bisoshi-api`: REST and chatbot clients over a swappable transport
//! - `bisoshi-runtime`: config, list controllers, chat session

pub mod client;
pub mod error;

pub use client::{Client, SaleViewData};
pub use error::{Error, Result};

pub mod types {
    pub use bisoshi_engine::{BoardOverview, ListView, ProductOverview, SalesOverview, TableState};
    pub use bisoshi_runtime::{
        ChatSession, Completion, Config, FormMode, FormState, ListController, RequestState,
        RetryAction, ViewError,
    };
    pub use bisoshi_types::*;
}
