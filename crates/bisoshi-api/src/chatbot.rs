use crate::transport::{ApiRequest, Method, Transport};
use crate::{Error, Result};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;

/// Where the inference endpoint lives and how to authenticate to it.
///
/// Nothing here is compiled in; it comes from the `[chatbot]` config section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatbotSettings {
    pub endpoint: String,
    pub token: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    #[serde(default)]
    outputs: HashMap<String, serde_json::Value>,
}

const QUESTION_KEY: &str = "in-0";
const ANSWER_KEY: &str = "out-1";

#[derive(Debug, Clone)]
pub struct ChatbotClient<T> {
    settings: ChatbotSettings,
    transport: T,
}

impl<T: Transport> ChatbotClient<T> {
    pub fn new(settings: ChatbotSettings, transport: T) -> Self {
        Self { settings, transport }
    }

    pub fn settings(&self) -> &ChatbotSettings {
        &self.settings
    }

    /// Send a question and return the raw answer text.
    ///
    /// A response without an answer output yields an empty string; callers
    /// sanitize and substitute their default reply.
    pub async fn ask(&self, question: &str) -> Result<String> {
        let mut body = serde_json::Map::new();
        body.insert(QUESTION_KEY.to_string(), question.into());
        if let Some(user_id) = &self.settings.user_id {
            body.insert("user_id".to_string(), user_id.as_str().into());
        }

        let mut request =
            ApiRequest::new(Method::Post, &self.settings.endpoint).json(body.into());
        if let Some(token) = &self.settings.token {
            request = request.bearer(token);
        }

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            warn!("[CHAT] inference endpoint returned {}", response.status);
            return Err(Error::Status {
                status: response.status,
                message: "chatbot request failed".to_string(),
            });
        }

        let parsed: InferenceResponse =
            serde_json::from_slice(&response.body).map_err(|e| Error::Schema {
                context: "chatbot".to_string(),
                detail: e.to_string(),
            })?;
        let answer = match parsed.outputs.get(ANSWER_KEY) {
            Some(serde_json::Value::String(text)) => text.clone(),
            _ => String::new(),
        };
        debug!("[CHAT] answer of {} chars", answer.len());
        Ok(answer)
    }
}
