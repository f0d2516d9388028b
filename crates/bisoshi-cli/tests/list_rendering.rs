//! Rendering list views loaded from the in-memory backend.

use anyhow::Result;
use bisoshi::presentation::{Palette, TableView, TableViewModel};
use bisoshi_core::{MemorySessionStore, SessionStore};
use bisoshi_runtime::Config;
use bisoshi_sdk::Client;
use bisoshi_testing::assertions::{assert_row_count, assert_row_ids};
use bisoshi_testing::{BASE_URL, FakeBackend, TOKEN};
use bisoshi_types::{Products, Sales, SortDirection};
use std::sync::Arc;

fn signed_in_client() -> Result<Client<Arc<FakeBackend>>> {
    let mut config = Config::default();
    config.api.base_url = BASE_URL.to_string();
    config.table.rows_per_page = 3;

    let store = Arc::new(MemorySessionStore::new());
    store.save(TOKEN)?;
    Ok(Client::with_transport(
        config,
        store,
        Arc::new(FakeBackend::seeded()),
    )?)
}

#[tokio::test]
async fn test_sorted_product_pages() -> Result<()> {
    let client = signed_in_client()?;
    let mut products = client.products();
    products.refresh().await;
    products
        .view_mut()
        .sort_by("price", SortDirection::Descending);

    let first = serde_json::to_value(TableViewModel::build::<Products>(products.view(), false)?)?;
    assert_row_ids(&first, &["p1", "p3", "p4"])?;
    assert_eq!(first["page_count"], 2);
    assert_eq!(first["sort"], "price desc");

    products.view_mut().set_page(1);
    let second = serde_json::to_value(TableViewModel::build::<Products>(products.view(), false)?)?;
    assert_row_ids(&second, &["p2"])?;
    assert_eq!(second["filler_rows"], 2);

    let all = serde_json::to_value(TableViewModel::build::<Products>(products.view(), true)?)?;
    assert_row_count(&all, 4)?;
    assert_eq!(all["filler_rows"], 0);
    Ok(())
}

#[tokio::test]
async fn test_sales_filter_on_client_name() -> Result<()> {
    let client = signed_in_client()?;
    let mut sales = client.sales();
    sales.refresh().await;
    sales.view_mut().set_filter("AGRO");

    let model = TableViewModel::build::<Sales>(sales.view(), false)?;
    assert_row_ids(&serde_json::to_value(&model)?, &["s1"])?;

    let text = TableView::new(&model, Palette::plain()).to_string();
    assert!(text.contains("Agro Norte SAC"));
    assert!(text.contains("Glifosato 480"));
    assert!(text.ends_with("Page 1 of 1 (1 row)\n"));
    Ok(())
}
