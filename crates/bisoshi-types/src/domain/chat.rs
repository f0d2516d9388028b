use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Question,
    Answer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub text: String,
}

impl ChatEntry {
    pub fn question(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Question, text: text.into() }
    }

    pub fn answer(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Answer, text: text.into() }
    }
}
