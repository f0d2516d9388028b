use crate::{Error, Result};
use bisoshi_api::ChatbotSettings;
use bisoshi_engine::DEFAULT_ROWS_PER_PAGE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Inference endpoint credentials. Absent means canned replies only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatbotConfig {
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rows_per_page: default_rows_per_page(),
        }
    }
}

fn default_rows_per_page() -> usize {
    DEFAULT_ROWS_PER_PAGE
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chatbot: Option<ChatbotConfig>,
    #[serde(default)]
    pub table: TableConfig,
}

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "api.base_url",
    "api.timeout_secs",
    "chatbot.endpoint",
    "chatbot.token",
    "chatbot.user_id",
    "table.rows_per_page",
];

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "api.base_url must start with http:// or https://, got '{}'",
                url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::Config("api.timeout_secs must be positive".into()));
        }
        if self.table.rows_per_page == 0 {
            return Err(Error::Config("table.rows_per_page must be positive".into()));
        }
        if let Some(chatbot) = &self.chatbot
            && chatbot.endpoint.trim().is_empty()
        {
            return Err(Error::Config("chatbot.endpoint is empty".into()));
        }
        Ok(())
    }

    /// Update one dotted key, validating the result.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.clone();
        match key {
            "api.base_url" => next.api.base_url = value.trim_end_matches('/').to_string(),
            "api.timeout_secs" => next.api.timeout_secs = parse_number(key, value)?,
            "table.rows_per_page" => next.table.rows_per_page = parse_number(key, value)?,
            "chatbot.endpoint" => {
                next.chatbot.get_or_insert_with(Default::default).endpoint = value.to_string()
            }
            "chatbot.token" => {
                next.chatbot.get_or_insert_with(Default::default).token = non_empty(value)
            }
            "chatbot.user_id" => {
                next.chatbot.get_or_insert_with(Default::default).user_id = non_empty(value)
            }
            _ => {
                return Err(Error::Config(format!(
                    "unknown key '{}' (expected one of: {})",
                    key,
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn chatbot_settings(&self) -> Option<ChatbotSettings> {
        self.chatbot.as_ref().map(|c| ChatbotSettings {
            endpoint: c.endpoint.clone(),
            token: c.token.clone(),
            user_id: c.user_id.clone(),
        })
    }

    /// Copy safe to print: secrets are masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if let Some(chatbot) = copy.chatbot.as_mut()
            && chatbot.token.is_some()
        {
            chatbot.token = Some("********".to_string());
        }
        copy
    }
}

fn parse_number<N: std::str::FromStr>(key: &str, value: &str) -> Result<N> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} expects a number, got '{}'", key, value)))
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
