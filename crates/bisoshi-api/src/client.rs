use crate::transport::{ApiRequest, ApiResponse, Method, Transport};
use crate::{Error, Result};
use bisoshi_core::Session;
use bisoshi_types::{LoginRequest, LoginResponse, RecordId, RegisterRequest, Resource};
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Typed client for the dashboard REST backend.
///
/// The bearer token comes from the injected [`Session`]; authenticated calls
/// made without one fail with [`Error::MissingToken`] before touching the
/// network.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
    session: Session,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T, session: Session) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, method: Method, path: &str) -> Result<ApiRequest> {
        let token = self.session.bearer().ok_or(Error::MissingToken)?;
        Ok(ApiRequest::new(method, self.url(path)).bearer(token))
    }

    async fn exchange(&self, request: ApiRequest) -> Result<ApiResponse> {
        let method = request.method;
        let url = request.url.clone();
        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(response);
        }
        let message = error_message(&response);
        warn!("[API] {} {} -> {}: {}", method, url, response.status, message);
        Err(Error::Status {
            status: response.status,
            message,
        })
    }

    // -- resources ----------------------------------------------------------

    pub async fn list<R: Resource>(&self) -> Result<Vec<R::Row>> {
        let path = R::spec().endpoint.list;
        let response = self.exchange(self.authed(Method::Get, path)?).await?;
        let rows: Vec<R::Row> = parse(&response, || format!("GET {}", path))?;
        debug!("[API] {} {} rows", R::spec().kind, rows.len());
        Ok(rows)
    }

    pub async fn create<R: Resource>(&self, input: &R::Input) -> Result<R::Row> {
        let path = R::spec().endpoint.create;
        let request = self.authed(Method::Post, path)?.json(to_json(input)?);
        let response = self.exchange(request).await?;
        parse(&response, || format!("POST {}", path))
    }

    pub async fn update<R: Resource>(&self, id: &RecordId, input: &R::Input) -> Result<R::Row> {
        validate_id(id)?;
        let path = R::spec().endpoint.update_path(id);
        let request = self.authed(Method::Put, &path)?.json(to_json(input)?);
        let response = self.exchange(request).await?;
        parse(&response, || format!("PUT {}", path))
    }

    /// The response body is ignored.
    pub async fn delete<R: Resource>(&self, id: &RecordId) -> Result<()> {
        validate_id(id)?;
        let path = R::spec().endpoint.delete_path(id);
        self.exchange(self.authed(Method::Delete, &path)?).await?;
        Ok(())
    }

    // -- accounts -------------------------------------------------------------

    /// Exchange credentials for a token and sign the session in.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let body = to_json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let request = ApiRequest::new(Method::Post, self.url("/user/login")).json(body);
        let response = self.exchange(request).await?;
        let login: LoginResponse = parse(&response, || "POST /user/login".to_string())?;

        let token = login
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Schema {
                context: "POST /user/login".to_string(),
                detail: "response has no token".to_string(),
            })?;
        self.session.sign_in(token.clone());
        debug!("[API] signed in as {}", email);
        Ok(token)
    }

    /// Every field must be filled in; blanks are reported without a request.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(Error::InvalidInput(format!(
                "required fields are empty: {}",
                missing.join(", ")
            )));
        }
        let body = to_json(request)?;
        let api_request = ApiRequest::new(Method::Post, self.url("/user/register")).json(body);
        self.exchange(api_request).await?;
        Ok(())
    }
}

fn to_json<S: Serialize>(value: &S) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| Error::InvalidInput(e.to_string()))
}

fn parse<D: DeserializeOwned>(response: &ApiResponse, context: impl FnOnce() -> String) -> Result<D> {
    serde_json::from_slice(&response.body).map_err(|e| Error::Schema {
        context: context(),
        detail: e.to_string(),
    })
}

/// Ids are spliced into URL paths, so separators are refused.
fn validate_id(id: &RecordId) -> Result<()> {
    let s = id.as_str();
    if s.is_empty() || s.chars().any(|c| matches!(c, '/' | '?' | '#') || c.is_whitespace()) {
        return Err(Error::InvalidInput(format!("invalid id '{}'", s)));
    }
    Ok(())
}

/// Prefer the backend's `message` (or `error`) field, then the raw body.
fn error_message(response: &ApiResponse) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&response.body) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    let text = String::from_utf8_lossy(&response.body);
    let text = text.trim();
    if text.is_empty() {
        format!("HTTP {}", response.status)
    } else {
        text.chars().take(200).collect()
    }
}
