//! List controller behaviour against the in-memory backend.

use bisoshi_api::{ApiClient, Error as ApiError, Method};
use bisoshi_core::Session;
use bisoshi_engine::TableState;
use bisoshi_runtime::{Completion, FormMode, ListController, RequestState, RetryAction};
use bisoshi_testing::{BASE_URL, Failure, FakeBackend, TOKEN, fixtures};
use bisoshi_types::{Clients, Products, RecordId, Resource, Row, Sales};
use std::sync::Arc;

type Backend = Arc<FakeBackend>;

fn controller<R: Resource>(backend: &Backend, session: Session) -> ListController<R, Backend> {
    let api = ApiClient::new(BASE_URL, Arc::clone(backend), session);
    ListController::new(api, TableState::default())
}

fn signed_in<R: Resource>(backend: &Backend) -> ListController<R, Backend> {
    controller(backend, Session::with_token(TOKEN))
}

fn ids<R: Row>(rows: &[R]) -> Vec<String> {
    rows.iter().map(|r| r.row_id().to_string()).collect()
}

#[tokio::test]
async fn test_refresh_loads_collection() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut products = signed_in::<Products>(&backend);

    assert_eq!(products.refresh().await, Completion::Applied);
    assert_eq!(products.state(), &RequestState::Idle);
    assert_eq!(ids(products.view().records()), vec!["p1", "p2", "p3", "p4"]);
}

#[tokio::test]
async fn test_without_token_view_is_unauthenticated() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut clients = controller::<Clients>(&backend, Session::anonymous());

    assert_eq!(clients.refresh().await, Completion::Failed);
    let error = clients.error().unwrap();
    assert!(error.is_unauthenticated());
    assert_eq!(error.error, ApiError::MissingToken);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_list_failure_keeps_previous_rows_and_retry_recovers() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut sales = signed_in::<Sales>(&backend);
    sales.refresh().await;

    backend.fail_next(Method::Get, "/sales", Failure::Status(503, "maintenance".into()));
    assert_eq!(sales.refresh().await, Completion::Failed);
    assert_eq!(sales.view().records().len(), 3);
    assert_eq!(sales.error().unwrap().retry, RetryAction::Refresh);

    assert_eq!(sales.retry().await.unwrap(), Some(Completion::Applied));
    assert!(sales.error().is_none());
}

#[tokio::test]
async fn test_create_failure_keeps_form_and_collection() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut products = signed_in::<Products>(&backend);
    products.refresh().await;

    products.open_create();
    products.set_form_field("name", "Sulfato de cobre").unwrap();
    products.set_form_field("quantity", "12").unwrap();
    products.set_form_field("price", "30.5").unwrap();

    backend.fail_next(Method::Post, "/products/create", Failure::Network);
    assert_eq!(products.submit().await.unwrap(), Completion::Failed);

    assert_eq!(products.view().records().len(), 4);
    let form = products.form().unwrap();
    assert_eq!(form.mode, FormMode::Create);
    assert_eq!(form.values.name, "Sulfato de cobre");
    assert_eq!(form.values.price, 30.5);
    assert_eq!(products.error().unwrap().retry, RetryAction::Submit);

    // Retry resubmits the same values.
    assert_eq!(products.retry().await.unwrap(), Some(Completion::Applied));
    assert!(products.form().is_none());
    assert_eq!(products.view().records().len(), 5);
    assert_eq!(products.view().records()[4].name, "Sulfato de cobre");
}

#[tokio::test]
async fn test_edit_replaces_row_in_place() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut clients = signed_in::<Clients>(&backend);
    clients.refresh().await;

    let id = RecordId::from("c2");
    clients.open_edit(&id).unwrap();
    assert_eq!(clients.form().unwrap().values.name, "Fundo Santa Rosa");
    clients.set_form_field("city", "Nasca").unwrap();

    assert_eq!(clients.submit().await.unwrap(), Completion::Applied);
    assert_eq!(ids(clients.view().records()), vec!["c1", "c2", "c3"]);
    assert_eq!(clients.view().find(&id).unwrap().city, "Nasca");
    assert_eq!(backend.request_count(Method::Put, "/clients/c2"), 1);
}

#[tokio::test]
async fn test_open_edit_unknown_id() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut clients = signed_in::<Clients>(&backend);
    clients.refresh().await;
    assert!(clients.open_edit(&RecordId::from("c9")).is_err());
    assert!(clients.form().is_none());
}

#[tokio::test]
async fn test_delete_refetches_products_only() {
    let backend = Arc::new(FakeBackend::seeded());

    let mut products = signed_in::<Products>(&backend);
    products.refresh().await;
    assert_eq!(products.delete(&RecordId::from("p2")).await, Completion::Applied);
    assert_eq!(ids(products.view().records()), vec!["p1", "p3", "p4"]);
    assert_eq!(backend.request_count(Method::Get, "/products"), 2);

    let mut clients = signed_in::<Clients>(&backend);
    clients.refresh().await;
    assert_eq!(clients.delete(&RecordId::from("c1")).await, Completion::Applied);
    assert_eq!(backend.request_count(Method::Get, "/clients"), 1);
}

#[tokio::test]
async fn test_delete_failure_leaves_collection() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut sales = signed_in::<Sales>(&backend);
    sales.refresh().await;
    sales.view_mut().toggle_select(&RecordId::from("s1"));

    backend.fail_next(
        Method::Delete,
        "/sales/delete/s1",
        Failure::Status(500, "boom".into()),
    );
    assert_eq!(sales.delete(&RecordId::from("s1")).await, Completion::Failed);
    assert_eq!(sales.view().records().len(), 3);
    assert_eq!(sales.selected_ids(), vec![RecordId::from("s1")]);
    assert_eq!(
        sales.error().unwrap().retry,
        RetryAction::Delete(RecordId::from("s1"))
    );
}

#[tokio::test]
async fn test_stale_list_response_is_discarded() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut products = signed_in::<Products>(&backend);

    let slow = products.begin_refresh();
    let fast = products.begin_refresh();

    let fresh = vec![fixtures::product("p9", "Nuevo", 1.0, "kg", 1.0, 2.0, "Otros")];
    assert_eq!(products.complete_refresh(fast, Ok(fresh)), Completion::Applied);

    let old = fixtures::sample_products();
    assert_eq!(products.complete_refresh(slow, Ok(old)), Completion::Stale);

    assert_eq!(ids(products.view().records()), vec!["p9"]);
    assert_eq!(products.state(), &RequestState::Idle);
}

#[tokio::test]
async fn test_list_issued_before_mutation_is_discarded() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut products = signed_in::<Products>(&backend);
    let initial = products.begin_refresh();
    products.complete_refresh(initial, Ok(fixtures::sample_products()));

    let list = products.begin_refresh();
    let delete = products.begin_delete(RecordId::from("p1"));
    assert!(products.is_loading());

    assert_eq!(products.complete_delete(delete, Ok(())), Completion::Applied);
    assert!(products.is_loading());
    assert_eq!(
        products.complete_refresh(list, Ok(fixtures::sample_products())),
        Completion::Stale
    );
    assert_eq!(ids(products.view().records()), vec!["p2", "p3", "p4"]);
    assert!(!products.is_loading());
}

#[tokio::test]
async fn test_completion_after_detach_is_ignored() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut clients = signed_in::<Clients>(&backend);
    let handle = clients.detach_handle();
    let gate = backend.hold_next(Method::Get, "/clients");

    let (outcome, ()) = tokio::join!(clients.refresh(), async {
        handle.detach();
        gate.release();
    });

    assert_eq!(outcome, Completion::Detached);
    assert!(clients.view().records().is_empty());
}

#[tokio::test]
async fn test_sale_create_splices_returned_row() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut sales = signed_in::<Sales>(&backend);
    sales.refresh().await;

    sales.open_create();
    sales.set_form_field("clientId", "c1").unwrap();
    sales.set_form_field("productId", "p3").unwrap();
    sales.set_form_field("quantity", "4").unwrap();
    assert_eq!(sales.submit().await.unwrap(), Completion::Applied);

    let created = sales.view().records().last().unwrap();
    assert_eq!(created.client.name, "Agro Norte SAC");
    assert_eq!(created.total_amount, 78.0);
}

#[tokio::test]
async fn test_submit_without_form_is_rejected() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut sales = signed_in::<Sales>(&backend);
    assert!(sales.submit().await.is_err());
    assert!(sales.set_form_field("quantity", "1").is_err());
}

#[tokio::test]
async fn test_submit_error_survives_a_later_list_success() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut products = signed_in::<Products>(&backend);

    let list = products.begin_refresh();
    products.open_create();
    products.set_form_field("name", "Nitrato").unwrap();
    let submit = products.begin_submit().unwrap();

    let failed = products.complete_submit(submit, Err(ApiError::Transport("reset".into())));
    assert_eq!(failed, Completion::Failed);
    assert_eq!(
        products.complete_refresh(list, Ok(fixtures::sample_products())),
        Completion::Applied
    );

    let error = products.error().unwrap();
    assert_eq!(error.retry, RetryAction::Submit);
    assert_eq!(error.error, ApiError::Transport("reset".into()));
    assert_eq!(products.view().records().len(), 4);
    assert_eq!(products.form().unwrap().values.name, "Nitrato");

    // Resubmitting is what clears it.
    assert_eq!(products.retry().await.unwrap(), Some(Completion::Applied));
    assert!(products.error().is_none());
    assert_eq!(products.state(), &RequestState::Idle);
}

#[tokio::test]
async fn test_delete_error_survives_an_unrelated_delete() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut clients = signed_in::<Clients>(&backend);
    clients.refresh().await;

    let first = clients.begin_delete(RecordId::from("c1"));
    let second = clients.begin_delete(RecordId::from("c2"));
    let boom = ApiError::Status {
        status: 500,
        message: "boom".into(),
    };
    assert_eq!(clients.complete_delete(first, Err(boom)), Completion::Failed);
    assert_eq!(clients.complete_delete(second, Ok(())), Completion::Applied);

    assert_eq!(
        clients.error().unwrap().retry,
        RetryAction::Delete(RecordId::from("c1"))
    );
    assert_eq!(ids(clients.view().records()), vec!["c1", "c3"]);
}

#[tokio::test]
async fn test_new_form_survives_earlier_create_completing() {
    let backend = Arc::new(FakeBackend::seeded());
    let mut products = signed_in::<Products>(&backend);
    products.refresh().await;

    products.open_create();
    products.set_form_field("name", "Primero").unwrap();
    let first = products.begin_submit().unwrap();

    products.open_create();
    products.set_form_field("name", "Segundo").unwrap();

    let created = fixtures::product("p9", "Primero", 1.0, "kg", 1.0, 2.0, "Otros");
    assert_eq!(products.complete_submit(first, Ok(created)), Completion::Applied);

    let form = products.form().unwrap();
    assert_eq!(form.mode, FormMode::Create);
    assert_eq!(form.values.name, "Segundo");
    assert_eq!(products.view().records().len(), 5);

    // The second form's own submit closes it.
    assert_eq!(products.submit().await.unwrap(), Completion::Applied);
    assert!(products.form().is_none());
}

#[tokio::test]
async fn test_deleting_only_row_of_last_page_steps_back() {
    let backend = Arc::new(FakeBackend::seeded());
    let api = ApiClient::new(BASE_URL, Arc::clone(&backend), Session::with_token(TOKEN));
    let mut clients: ListController<Clients, Backend> =
        ListController::new(api, TableState::new(1));
    clients.refresh().await;
    clients.view_mut().set_page(2);

    assert_eq!(clients.delete(&RecordId::from("c3")).await, Completion::Applied);
    assert_eq!(clients.view().table().page(), 1);
    assert_eq!(clients.view().page_count(), 2);
    let visible: Vec<String> = clients
        .view()
        .visible()
        .iter()
        .map(|c| c.row_id().to_string())
        .collect();
    assert_eq!(visible, vec!["c2"]);
    assert_eq!(backend.request_count(Method::Get, "/clients"), 1);
}
