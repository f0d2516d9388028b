//! In-memory stand-in for the dashboard backend and the chatbot endpoint.
//!
//! Requests are answered from seeded collections, so controllers and the SDK
//! can be exercised without a network. Failures and slow responses are
//! scripted per `(method, path)`.

use crate::fixtures;
use bisoshi_api::{ApiRequest, ApiResponse, Error, Method, Result, Transport};
use bisoshi_types::{
    Client, ClientInput, Product, ProductInput, RecordId, Sale, SaleInput, SaleParty, SaleProduct,
};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

pub const BASE_URL: &str = "http://backend.test";
pub const CHATBOT_URL: &str = "http://chatbot.test/form";
pub const TOKEN: &str = "test-token";

/// A scripted failure for the next matching request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Network,
    Status(u16, String),
}

/// Holds a matching request until released.
#[derive(Debug, Clone, Default)]
pub struct Gate(Arc<Notify>);

impl Gate {
    pub fn release(&self) {
        self.0.notify_one();
    }
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, String>,
    products: Vec<Product>,
    clients: Vec<Client>,
    sales: Vec<Sale>,
    next_id: u64,
    sale_date: String,
    chat_answer: Option<String>,
    failures: VecDeque<(Method, String, Failure)>,
    gates: Vec<(Method, String, Gate)>,
    requests: Vec<ApiRequest>,
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    /// Empty collections and the admin account.
    pub fn new() -> Self {
        let backend = Self::default();
        {
            let mut state = backend.lock();
            state.accounts.insert(
                fixtures::ADMIN_EMAIL.to_string(),
                fixtures::ADMIN_PASSWORD.to_string(),
            );
            state.next_id = 100;
            state.sale_date = "2024-06-01T10:00:00Z".to_string();
        }
        backend
    }

    /// Sample products, clients and sales.
    pub fn seeded() -> Self {
        let backend = Self::new();
        {
            let mut state = backend.lock();
            state.products = fixtures::sample_products();
            state.clients = fixtures::sample_clients();
            state.sales = fixtures::sample_sales();
        }
        backend
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.lock().products = products;
        self
    }

    pub fn with_chat_answer(self, answer: impl Into<String>) -> Self {
        self.lock().chat_answer = Some(answer.into());
        self
    }

    /// Fail the next request to `path` with `method`.
    pub fn fail_next(&self, method: Method, path: &str, failure: Failure) {
        self.lock()
            .failures
            .push_back((method, path.to_string(), failure));
    }

    /// Hold the next request to `path` until the returned gate is released.
    pub fn hold_next(&self, method: Method, path: &str) -> Gate {
        let gate = Gate::default();
        self.lock()
            .gates
            .push((method, path.to_string(), gate.clone()));
        gate
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self, method: Method, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && path_of(&r.url) == path)
            .count()
    }

    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    pub fn clients(&self) -> Vec<Client> {
        self.lock().clients.clone()
    }

    pub fn sales(&self) -> Vec<Sale> {
        self.lock().sales.clone()
    }
}

impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let (gate, failure) = {
            let mut state = self.lock();
            state.requests.push(request.clone());
            let path = path_of(&request.url);
            let gate = take_matching(&mut state.gates, request.method, &path);
            let failure = state
                .failures
                .iter()
                .position(|(m, p, _)| *m == request.method && *p == path)
                .and_then(|i| state.failures.remove(i))
                .map(|(_, _, failure)| failure);
            (gate, failure)
        };

        if let Some(gate) = gate {
            gate.0.notified().await;
        }

        match failure {
            Some(Failure::Network) => Err(Error::Transport("connection reset by peer".into())),
            Some(Failure::Status(status, message)) => {
                Ok(ApiResponse::json(status, &json!({ "message": message })))
            }
            None => Ok(self.lock().handle(&request)),
        }
    }
}

fn take_matching(gates: &mut Vec<(Method, String, Gate)>, method: Method, path: &str) -> Option<Gate> {
    let index = gates.iter().position(|(m, p, _)| *m == method && p == path)?;
    Some(gates.remove(index).2)
}

/// Path relative to whichever fake host the URL targets.
fn path_of(url: &str) -> String {
    if url == CHATBOT_URL {
        return "/chatbot".to_string();
    }
    url.strip_prefix(BASE_URL).unwrap_or(url).to_string()
}

fn reply(status: u16, body: Value) -> ApiResponse {
    ApiResponse::json(status, &body)
}

fn message(status: u16, text: &str) -> ApiResponse {
    reply(status, json!({ "message": text }))
}

fn body<T: serde::de::DeserializeOwned>(request: &ApiRequest) -> std::result::Result<T, ApiResponse> {
    let value = request.body.clone().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|e| message(400, &e.to_string()))
}

fn to_value<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

impl State {
    fn handle(&mut self, request: &ApiRequest) -> ApiResponse {
        let path = path_of(&request.url);
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

        match (request.method, segments.as_slice()) {
            (Method::Post, ["chatbot"]) => self.chat(request),
            (Method::Post, ["user", "login"]) => self.login(request),
            (Method::Post, ["user", "register"]) => self.register(request),
            _ if request.bearer.as_deref() != Some(TOKEN) => message(401, "Unauthorized"),

            (Method::Get, ["products"]) => reply(200, to_value(&self.products)),
            (Method::Post, ["products", "create"]) => self.create_product(request),
            (Method::Put, ["products", "update", id]) => self.update_product(id, request),
            (Method::Delete, ["products", "delete", id]) => {
                remove_by_id(&mut self.products, id, |p| &p.id)
            }

            (Method::Get, ["clients"]) => reply(200, to_value(&self.clients)),
            (Method::Post, ["clients"]) => self.create_client(request),
            (Method::Put, ["clients", id]) => self.update_client(id, request),
            (Method::Delete, ["clients", id]) => remove_by_id(&mut self.clients, id, |c| &c.id),

            (Method::Get, ["sales"]) => reply(200, to_value(&self.sales)),
            (Method::Post, ["sales", "create"]) => self.create_sale(None, request),
            (Method::Put, ["sales", "update", id]) => self.create_sale(Some(*id), request),
            (Method::Delete, ["sales", "delete", id]) => remove_by_id(&mut self.sales, id, |s| &s.id),

            _ => message(404, "Not found"),
        }
    }

    fn login(&mut self, request: &ApiRequest) -> ApiResponse {
        let credentials: Value = match body(request) {
            Ok(value) => value,
            Err(response) => return response,
        };
        let email = credentials["email"].as_str().unwrap_or_default();
        let password = credentials["password"].as_str().unwrap_or_default();
        match self.accounts.get(email) {
            Some(expected) if expected == password => reply(200, json!({ "token": TOKEN })),
            _ => message(401, "Invalid credentials"),
        }
    }

    fn register(&mut self, request: &ApiRequest) -> ApiResponse {
        let account: Value = match body(request) {
            Ok(value) => value,
            Err(response) => return response,
        };
        let email = account["email"].as_str().unwrap_or_default().to_string();
        let password = account["password"].as_str().unwrap_or_default().to_string();
        if self.accounts.contains_key(&email) {
            return message(409, "Email already registered");
        }
        self.accounts.insert(email, password);
        message(201, "User registered")
    }

    fn chat(&mut self, request: &ApiRequest) -> ApiResponse {
        let question = request
            .body
            .as_ref()
            .and_then(|b| b["in-0"].as_str())
            .unwrap_or_default();
        let answer = self
            .chat_answer
            .clone()
            .unwrap_or_else(|| format!("You asked: {}", question));
        reply(200, json!({ "outputs": { "out-1": answer } }))
    }

    fn next_id(&mut self, prefix: &str) -> RecordId {
        self.next_id += 1;
        RecordId::new(format!("{}{}", prefix, self.next_id))
    }

    fn create_product(&mut self, request: &ApiRequest) -> ApiResponse {
        let input: ProductInput = match body(request) {
            Ok(input) => input,
            Err(response) => return response,
        };
        let id = self.next_id("p");
        let product = product_from(id, &input);
        self.products.push(product.clone());
        reply(201, to_value(&product))
    }

    fn update_product(&mut self, id: &str, request: &ApiRequest) -> ApiResponse {
        let input: ProductInput = match body(request) {
            Ok(input) => input,
            Err(response) => return response,
        };
        match self.products.iter_mut().find(|p| p.id.as_str() == id) {
            Some(slot) => {
                *slot = product_from(slot.id.clone(), &input);
                reply(200, to_value(slot))
            }
            None => message(404, "Product not found"),
        }
    }

    fn create_client(&mut self, request: &ApiRequest) -> ApiResponse {
        let input: ClientInput = match body(request) {
            Ok(input) => input,
            Err(response) => return response,
        };
        if input.id.trim().is_empty() {
            return message(400, "Client id is required");
        }
        if self.clients.iter().any(|c| c.id.as_str() == input.id) {
            return message(409, "Client already exists");
        }
        let client = client_from(RecordId::new(input.id.clone()), &input);
        self.clients.push(client.clone());
        reply(201, to_value(&client))
    }

    fn update_client(&mut self, id: &str, request: &ApiRequest) -> ApiResponse {
        let input: ClientInput = match body(request) {
            Ok(input) => input,
            Err(response) => return response,
        };
        match self.clients.iter_mut().find(|c| c.id.as_str() == id) {
            Some(slot) => {
                *slot = client_from(slot.id.clone(), &input);
                reply(200, to_value(slot))
            }
            None => message(404, "Client not found"),
        }
    }

    /// Create when `id` is `None`, otherwise update in place.
    fn create_sale(&mut self, id: Option<&str>, request: &ApiRequest) -> ApiResponse {
        let input: SaleInput = match body(request) {
            Ok(input) => input,
            Err(response) => return response,
        };
        let Some(client) = self.clients.iter().find(|c| c.id.as_str() == input.client_id) else {
            return message(404, "Client not found");
        };
        let Some(product) = self
            .products
            .iter()
            .find(|p| p.id.as_str() == input.product_id)
        else {
            return message(404, "Product not found");
        };
        let mut sale = Sale {
            id: RecordId::default(),
            client: SaleParty {
                id: client.id.clone(),
                name: client.name.clone(),
            },
            product: SaleProduct {
                id: product.id.clone(),
                name: product.name.clone(),
                price: Some(product.price),
                total_cost: Some(product.cost * input.quantity),
            },
            quantity: input.quantity,
            total_amount: product.price * input.quantity,
            date: Some(self.sale_date.clone()),
        };

        match id {
            None => {
                sale.id = self.next_id("s");
                self.sales.push(sale.clone());
                reply(201, to_value(&sale))
            }
            Some(id) => match self.sales.iter_mut().find(|s| s.id.as_str() == id) {
                Some(slot) => {
                    sale.id = slot.id.clone();
                    sale.date = slot.date.clone();
                    *slot = sale;
                    reply(200, to_value(slot))
                }
                None => message(404, "Sale not found"),
            },
        }
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, id: &str, key: impl Fn(&T) -> &RecordId) -> ApiResponse {
    let before = items.len();
    items.retain(|item| key(item).as_str() != id);
    if items.len() == before {
        message(404, "Not found")
    } else {
        message(200, "Deleted")
    }
}

fn product_from(id: RecordId, input: &ProductInput) -> Product {
    fixtures::product(
        id.as_str(),
        &input.name,
        input.quantity,
        &input.unit_of_measure,
        input.cost,
        input.price,
        &input.category,
    )
}

fn client_from(id: RecordId, input: &ClientInput) -> Client {
    Client {
        id,
        name: input.name.clone(),
        customer_segment: input.customer_segment.clone(),
        client_type: input.client_type.clone(),
        region: input.region.clone(),
        city: input.city.clone(),
        zone: input.zone.clone(),
        contact: input.contact.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(path: &str) -> ApiRequest {
        ApiRequest::new(Method::Get, format!("{}{}", BASE_URL, path)).bearer(TOKEN)
    }

    #[tokio::test]
    async fn test_rejects_missing_bearer() {
        let backend = FakeBackend::seeded();
        let response = backend
            .send(ApiRequest::new(Method::Get, format!("{}/products", BASE_URL)))
            .await
            .unwrap();
        assert_eq!(response.status, 401);
    }

    #[tokio::test]
    async fn test_scripted_failure_applies_once() {
        let backend = FakeBackend::seeded();
        backend.fail_next(Method::Get, "/clients", Failure::Network);

        assert!(backend.send(get("/clients")).await.is_err());
        let response = backend.send(get("/clients")).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(backend.request_count(Method::Get, "/clients"), 2);
    }

    #[tokio::test]
    async fn test_gate_holds_until_released() {
        let backend = FakeBackend::seeded();
        let gate = backend.hold_next(Method::Get, "/sales");
        gate.release();
        let response = backend.send(get("/sales")).await.unwrap();
        assert_eq!(response.status, 200);
    }
}
