use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Backend reply to a login; a missing or empty token is a failed login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub ruc: String,
    pub company_name: String,
    pub email: String,
    pub password: String,
    pub cellphone: String,
}

impl RegisterRequest {
    /// Names of required fields left blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("ruc", &self.ruc),
            ("companyName", &self.company_name),
            ("email", &self.email),
            ("password", &self.password),
            ("cellphone", &self.cellphone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
