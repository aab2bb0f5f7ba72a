use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

use crate::api::SupportApi;
use crate::models::{ChatMessage, Sender};

pub const GREETING: &str = "Hello! I'm your AI counseling assistant. I'm here to provide support, guidance, and resources to help you succeed academically and personally. How can I help you today?";

pub const FALLBACK_REPLY: &str = "I'm sorry, I'm having trouble connecting right now. Please make sure the backend server is running. In the meantime, remember that seeking help is a sign of strength, and there are always people who care about your success.";

pub const QUICK_RESPONSES: [&str; 6] = [
    "I'm feeling stressed about exams",
    "I'm having trouble with time management",
    "I'm considering dropping out",
    "I need help with study strategies",
    "I'm feeling overwhelmed",
    "I need academic guidance",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingResponse,
}

#[derive(Debug)]
pub struct PendingTurn {
    text: String,
}

impl PendingTurn {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Asks the service for a reply, then holds it back for `delay`.
    pub async fn reply(&self, api: &SupportApi, delay: Duration) -> Option<String> {
        let reply = match api.chat(&self.text).await {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(error = %err, "chat request failed, using fallback reply");
                None
            }
        };
        debug!(delay_ms = delay.as_millis() as u64, "simulating typing");
        tokio::time::sleep(delay).await;
        reply
    }
}

#[derive(Debug)]
pub struct ChatSession {
    id: Uuid,
    messages: Vec<ChatMessage>,
    input: String,
    state: ChatState,
    reply_delay: Duration,
    last_id_millis: i64,
}

impl ChatSession {
    pub fn new(reply_delay: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: vec![ChatMessage {
                id: "1".to_string(),
                text: GREETING.to_string(),
                sender: Sender::Bot,
                timestamp: Utc::now(),
            }],
            input: String::new(),
            state: ChatState::Idle,
            reply_delay,
            last_id_millis: 1,
        }
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    // Ids are request-time millis, bumped so they stay unique within a session.
    fn next_id(&mut self, millis: i64) -> String {
        self.last_id_millis = millis.max(self.last_id_millis + 1);
        self.last_id_millis.to_string()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_typing(&self) -> bool {
        self.state == ChatState::AwaitingResponse
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    /// Returns `None` for blank input or while a reply is still pending.
    pub fn begin_turn(&mut self) -> Option<PendingTurn> {
        if self.input.trim().is_empty() || self.state == ChatState::AwaitingResponse {
            return None;
        }

        let text = std::mem::take(&mut self.input);
        let now = Utc::now();
        let id = self.next_id(now.timestamp_millis());

        self.messages.push(ChatMessage {
            id,
            text: text.clone(),
            sender: Sender::User,
            timestamp: now,
        });
        self.state = ChatState::AwaitingResponse;

        Some(PendingTurn { text })
    }

    pub fn finish_turn(&mut self, turn: PendingTurn, reply: Option<String>) -> &ChatMessage {
        let text = reply.unwrap_or_else(|| FALLBACK_REPLY.to_string());
        let now = Utc::now();
        let id = self.next_id(now.timestamp_millis() + 1);
        debug!(chars = turn.text().len(), "turn finished");

        self.messages.push(ChatMessage {
            id,
            text,
            sender: Sender::Bot,
            timestamp: now,
        });
        self.state = ChatState::Idle;

        &self.messages[self.messages.len() - 1]
    }

    pub async fn send(&mut self, api: &SupportApi) -> Option<&ChatMessage> {
        let turn = self.begin_turn()?;
        let span = info_span!("chat_turn", session = %self.id);

        let reply = turn.reply(api, self.reply_delay).instrument(span).await;

        Some(self.finish_turn(turn, reply))
    }

    pub fn choose_quick_response(&mut self, index: usize) -> bool {
        match QUICK_RESPONSES.get(index) {
            Some(text) => {
                self.input = (*text).to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ChatSession {
        ChatSession::new(Duration::ZERO)
    }

    #[test]
    fn starts_with_greeting() {
        let session = session();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].sender, Sender::Bot);
        assert_eq!(session.messages()[0].id, "1");
        assert_eq!(session.state(), ChatState::Idle);
    }

    #[test]
    fn begin_turn_appends_user_message_immediately() {
        let mut session = session();
        session.set_input("I'm stressed");

        let turn = session.begin_turn().unwrap();
        assert_eq!(turn.text(), "I'm stressed");
        let last = session.messages().last().unwrap();
        assert_eq!(last.text, "I'm stressed");
        assert_eq!(last.sender, Sender::User);
        assert!(last.id.parse::<i64>().unwrap() >= Utc::now().timestamp_millis() - 5_000);
        assert_eq!(session.input(), "");
        assert!(session.is_typing());
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut session = session();
        session.set_input("   \n\t");
        assert!(session.begin_turn().is_none());
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_typing());
    }

    #[test]
    fn second_submit_while_waiting_is_refused() {
        let mut session = session();
        session.set_input("first");
        let turn = session.begin_turn().unwrap();

        session.set_input("second");
        assert!(session.begin_turn().is_none());
        assert_eq!(session.input(), "second");
        assert_eq!(session.messages().len(), 2);

        session.finish_turn(turn, Some("ok".to_string()));
        assert!(session.begin_turn().is_some());
    }

    #[test]
    fn bot_reply_id_follows_user_id() {
        let mut session = session();
        session.set_input("hello");
        let turn = session.begin_turn().unwrap();
        let user_id: i64 = session.messages()[1].id.parse().unwrap();
        let reply = session.finish_turn(turn, None);
        assert!(reply.id.parse::<i64>().unwrap() > user_id);
        assert_eq!(reply.text, FALLBACK_REPLY);
    }

    #[test]
    fn ids_stay_unique_across_back_to_back_turns() {
        let mut session = session();
        for text in ["one", "two", "three", "four"] {
            session.set_input(text);
            let turn = session.begin_turn().unwrap();
            session.finish_turn(turn, Some("ok".to_string()));
        }

        let ids: Vec<i64> = session
            .messages()
            .iter()
            .map(|m| m.id.parse().unwrap())
            .collect();
        assert_eq!(ids.len(), 9);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]), "ids: {ids:?}");
    }

    #[test]
    fn quick_responses_fill_input() {
        let mut session = session();
        assert!(session.choose_quick_response(2));
        assert_eq!(session.input(), "I'm considering dropping out");
        assert!(!session.choose_quick_response(QUICK_RESPONSES.len()));
    }

    #[tokio::test]
    async fn successful_turn_appends_server_reply_after_user_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(mockito::Matcher::Json(serde_json::json!({"message": "I'm stressed"})))
            .with_status(200)
            .with_body(r#"{"response":"Let's take it one step at a time."}"#)
            .expect(1)
            .create_async()
            .await;

        let api = SupportApi::new(server.url()).unwrap();
        let mut session = session();
        session.set_input("I'm stressed");
        let reply = session.send(&api).await.unwrap();
        assert_eq!(reply.text, "Let's take it one step at a time.");

        mock.assert_async().await;
        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].text, "I'm stressed");
        assert_eq!(messages[2].sender, Sender::Bot);
        assert!(messages[1].timestamp <= messages[2].timestamp);
        assert!(!session.is_typing());
    }

    #[tokio::test]
    async fn reply_is_held_back_by_the_configured_delay() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"response":"Take a short break."}"#)
            .create_async()
            .await;

        let api = SupportApi::new(server.url()).unwrap();
        let mut session = ChatSession::new(Duration::from_millis(300));
        session.set_input("I'm stressed");
        let turn = session.begin_turn().unwrap();

        let started = std::time::Instant::now();
        let reply = {
            let pending = turn.reply(&api, session.reply_delay());
            tokio::pin!(pending);

            let early = tokio::time::timeout(Duration::from_millis(100), &mut pending).await;
            assert!(early.is_err());
            assert!(session.is_typing());
            assert_eq!(session.messages().len(), 2);

            pending.await
        };
        assert!(started.elapsed() >= Duration::from_millis(300));
        assert_eq!(reply.as_deref(), Some("Take a short break."));

        session.finish_turn(turn, reply);
        assert!(!session.is_typing());
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[2].sender, Sender::Bot);
    }

    #[tokio::test]
    async fn failed_turn_appends_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(503)
            .create_async()
            .await;

        let api = SupportApi::new(server.url()).unwrap();
        let mut session = session();
        session.set_input("anyone there?");
        session.send(&api).await.unwrap();

        let last = session.messages().last().unwrap();
        assert_eq!(last.sender, Sender::Bot);
        assert_eq!(last.text, FALLBACK_REPLY);
        assert_eq!(session.state(), ChatState::Idle);
    }

    #[tokio::test]
    async fn whitespace_submit_issues_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .expect(0)
            .create_async()
            .await;

        let api = SupportApi::new(server.url()).unwrap();
        let mut session = session();
        session.set_input("    ");
        assert!(session.send(&api).await.is_none());

        mock.assert_async().await;
        assert_eq!(session.messages().len(), 1);
    }
}
