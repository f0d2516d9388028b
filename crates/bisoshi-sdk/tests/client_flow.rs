//! SDK facade wired to the in-memory backend.

use anyhow::Result;
use bisoshi_api::Method;
use bisoshi_core::{MemorySessionStore, SessionStore};
use bisoshi_runtime::Config;
use bisoshi_sdk::types::{Completion, Route};
use bisoshi_sdk::{Client, Error};
use bisoshi_testing::fixtures::{ADMIN_EMAIL, ADMIN_PASSWORD};
use bisoshi_testing::{BASE_URL, CHATBOT_URL, Failure, FakeBackend, TOKEN};
use std::sync::Arc;

fn config() -> Config {
    let mut config = Config::default();
    config.api.base_url = BASE_URL.to_string();
    config
}

fn client_with(backend: &Arc<FakeBackend>, store: Arc<MemorySessionStore>) -> Client<Arc<FakeBackend>> {
    Client::with_transport(config(), store, Arc::clone(backend)).unwrap()
}

#[tokio::test]
async fn test_login_persists_token_and_logout_clears_it() -> Result<()> {
    let backend = Arc::new(FakeBackend::seeded());
    let store = Arc::new(MemorySessionStore::new());
    let client = client_with(&backend, store.clone());

    client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    assert_eq!(store.load()?.as_deref(), Some(TOKEN));
    assert_eq!(client.route("/product"), Route::Product);

    // A second client restores the session from the store.
    let restored = client_with(&backend, store.clone());
    assert!(restored.session().is_signed_in());

    client.logout()?;
    assert_eq!(store.load()?, None);
    assert_eq!(client.route("/product"), Route::SignIn);
    Ok(())
}

#[tokio::test]
async fn test_bad_credentials_are_unauthenticated() {
    let backend = Arc::new(FakeBackend::seeded());
    let store = Arc::new(MemorySessionStore::new());
    let client = client_with(&backend, store.clone());

    let err = client.login(ADMIN_EMAIL, "wrong").await.unwrap_err();
    assert!(err.is_unauthenticated());
    assert!(!client.session().is_signed_in());
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn test_table_uses_configured_page_size() -> Result<()> {
    let backend = Arc::new(FakeBackend::seeded());
    let store = Arc::new(MemorySessionStore::new());
    store.save(TOKEN)?;

    let mut config = config();
    config.table.rows_per_page = 2;
    let client = Client::with_transport(config, store, Arc::clone(&backend))?;

    let mut products = client.products();
    assert_eq!(products.refresh().await, Completion::Applied);
    assert_eq!(products.view().visible().len(), 2);
    assert_eq!(products.view().page_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_sale_view_fetches_all_three_collections() -> Result<()> {
    let backend = Arc::new(FakeBackend::seeded());
    let store = Arc::new(MemorySessionStore::new());
    store.save(TOKEN)?;
    let client = client_with(&backend, store);

    let data = client.sale_view().await?;
    assert_eq!(data.sales.len(), 3);
    assert_eq!(data.clients.len(), 3);
    assert_eq!(data.products.len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_sale_view_fails_when_any_fetch_fails() -> Result<()> {
    let backend = Arc::new(FakeBackend::seeded());
    let store = Arc::new(MemorySessionStore::new());
    store.save(TOKEN)?;
    let client = client_with(&backend, store);

    backend.fail_next(Method::Get, "/clients", Failure::Network);
    assert!(matches!(client.sale_view().await, Err(Error::Internal(_))));
    Ok(())
}

#[tokio::test]
async fn test_overview_combines_products_and_sales() -> Result<()> {
    let backend = Arc::new(FakeBackend::seeded());
    let store = Arc::new(MemorySessionStore::new());
    store.save(TOKEN)?;
    let client = client_with(&backend, store);

    let board = client.overview(2024).await?;
    assert_eq!(board.products.product_count, 4);
    // 2024: 100 x 3.0 + 5 x 19.5; 2023: 10 x 25.0
    assert_eq!(board.year_total, 397.5);
    assert_eq!(board.previous_year_total, 250.0);
    assert!((board.year_over_year_pct - 59.0).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn test_overview_requires_session() {
    let backend = Arc::new(FakeBackend::seeded());
    let client = client_with(&backend, Arc::new(MemorySessionStore::new()));
    let err = client.overview(2024).await.unwrap_err();
    assert!(err.is_unauthenticated());
}

#[tokio::test]
async fn test_chat_uses_configured_endpoint() {
    let backend = Arc::new(FakeBackend::new().with_chat_answer("1. Check your **stock**"));
    let mut config = config();
    config.set("chatbot.endpoint", CHATBOT_URL).unwrap();
    let client =
        Client::with_transport(config, Arc::new(MemorySessionStore::new()), Arc::clone(&backend))
            .unwrap();

    let mut chat = client.chat();
    assert!(chat.is_online());
    let answer = chat.ask("What should I do?").await.unwrap();
    assert_eq!(answer.text, "Check your stock");
}

#[tokio::test]
async fn test_chat_without_endpoint_answers_locally() {
    let backend = Arc::new(FakeBackend::new());
    let client = client_with(&backend, Arc::new(MemorySessionStore::new()));

    let mut chat = client.chat();
    assert!(!chat.is_online());
    let answer = chat.ask("hello").await.unwrap();
    assert_eq!(answer.text, "Hello! How can I help you?");
    assert!(backend.requests().is_empty());
}

#[test]
fn test_course_lookup() {
    let backend = Arc::new(FakeBackend::new());
    let client = client_with(&backend, Arc::new(MemorySessionStore::new()));
    assert_eq!(client.courses().len(), 5);
    assert_eq!(client.course(2).unwrap().start_date, "May 15");
    assert!(matches!(client.course(42), Err(Error::NotFound(_))));
}
