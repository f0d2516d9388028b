use bisoshi_api::{ChatbotClient, Transport};
use bisoshi_engine::{DEFAULT_REPLY, sanitize_answer};
use bisoshi_types::ChatEntry;
use log::warn;

/// Appended in place of an answer when the endpoint cannot be reached.
pub const APOLOGY: &str = "There was an error getting the answer. Please try again.";

const CANNED: &[(&str, &str)] = &[
    ("hello", "Hello! How can I help you?"),
    ("help", "Of course, I am here to help. Please tell me more."),
    (
        "weather",
        "I do not have weather information yet. I will be able to help with that soon!",
    ),
];

/// Local answer used when no inference endpoint is configured.
pub fn canned_reply(question: &str) -> &'static str {
    let question = question.to_lowercase();
    CANNED
        .iter()
        .find(|(keyword, _)| {
            question
                .split(|c: char| !c.is_alphanumeric())
                .any(|word| word == *keyword)
        })
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_REPLY)
}

/// Question/answer history of one chatbot conversation.
pub struct ChatSession<T> {
    bot: Option<ChatbotClient<T>>,
    history: Vec<ChatEntry>,
}

impl<T: Transport> ChatSession<T> {
    pub fn new(bot: Option<ChatbotClient<T>>) -> Self {
        Self {
            bot,
            history: Vec::new(),
        }
    }

    pub fn is_online(&self) -> bool {
        self.bot.is_some()
    }

    pub fn history(&self) -> &[ChatEntry] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Ask a question and return the answer entry.
    ///
    /// Blank questions are ignored. A failed request still produces an answer
    /// entry (an apology), so the conversation can simply continue.
    pub async fn ask(&mut self, question: &str) -> Option<&ChatEntry> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }
        self.history.push(ChatEntry::question(question));

        let answer = match &self.bot {
            Some(bot) => match bot.ask(question).await {
                Ok(raw) => sanitize_answer(&raw),
                Err(err) => {
                    warn!("[CHAT] {}", err);
                    APOLOGY.to_string()
                }
            },
            None => canned_reply(question).to_string(),
        };
        self.history.push(ChatEntry::answer(answer));
        self.history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bisoshi_api::{ChatbotSettings, Method};
    use bisoshi_testing::{CHATBOT_URL, Failure, FakeBackend};
    use bisoshi_types::ChatRole;
    use std::sync::Arc;

    fn online(backend: Arc<FakeBackend>) -> ChatSession<Arc<FakeBackend>> {
        let settings = ChatbotSettings {
            endpoint: CHATBOT_URL.to_string(),
            token: Some("bot".to_string()),
            user_id: None,
        };
        ChatSession::new(Some(ChatbotClient::new(settings, backend)))
    }

    #[test]
    fn test_canned_reply_matches_whole_words() {
        assert_eq!(canned_reply("Hello there"), "Hello! How can I help you?");
        assert_eq!(canned_reply("what's the WEATHER?"), CANNED[2].1);
        assert_eq!(canned_reply("helpful"), DEFAULT_REPLY);
    }

    #[tokio::test]
    async fn test_blank_question_is_ignored() {
        let mut chat: ChatSession<Arc<FakeBackend>> = ChatSession::new(None);
        assert!(chat.ask("   ").await.is_none());
        assert!(chat.history().is_empty());
    }

    #[tokio::test]
    async fn test_answer_is_sanitized() {
        let backend = Arc::new(FakeBackend::new().with_chat_answer("**Margin** is 28%【4:0†source】"));
        let mut chat = online(backend);

        let answer = chat.ask("What is my margin?").await.cloned().unwrap();
        assert_eq!(answer.role, ChatRole::Answer);
        assert_eq!(answer.text, "Margin is 28%");
        assert_eq!(chat.history().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_appends_apology_and_recovers() {
        let backend = Arc::new(FakeBackend::new().with_chat_answer("Fine"));
        backend.fail_next(Method::Post, "/chatbot", Failure::Network);
        let mut chat = online(backend);

        let first = chat.ask("status?").await.cloned().unwrap();
        assert_eq!(first.text, APOLOGY);

        let second = chat.ask("status?").await.cloned().unwrap();
        assert_eq!(second.text, "Fine");
        assert_eq!(chat.history().len(), 4);
    }
}
