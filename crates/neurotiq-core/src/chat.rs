//! Scripted "NeuroAssistant" chat.
//!
//! The assistant does not understand anything. It greets on creation and
//! answers every user message with the same canned reply after a short
//! delay.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;

pub const GREETING: &str = "Hello! I'm your NeuroAssistant. How can I help you today?";

pub const CANNED_REPLY: &str = "I understand your concern. Based on your recent brain activity patterns, I'd recommend focusing on mindfulness exercises. Would you like me to suggest some specific techniques?";

/// Delay before the assistant answers.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Conversation transcript.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    reply_delay: Duration,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// New session holding only the greeting (id 1).
    pub fn new() -> Self {
        Self::with_reply_delay(DEFAULT_REPLY_DELAY)
    }

    pub fn with_reply_delay(reply_delay: Duration) -> Self {
        let mut session = Self {
            messages: Vec::new(),
            reply_delay,
        };
        session.append(GREETING.to_string(), Sender::Bot);
        session
    }

    fn append(&mut self, text: String, sender: Sender) -> ChatMessage {
        let message = ChatMessage {
            id: self.messages.len() as u64 + 1,
            text,
            sender,
            timestamp_ms: now_ms(),
        };
        self.messages.push(message.clone());
        message
    }

    /// Record a user message. Blank input is ignored.
    pub fn send(&mut self, text: &str) -> Option<ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.append(text.to_string(), Sender::User))
    }

    /// Wait for the reply delay, then append the assistant's answer.
    pub async fn respond(&mut self) -> ChatMessage {
        tokio::time::sleep(self.reply_delay).await;
        self.append(CANNED_REPLY.to_string(), Sender::Bot)
    }

    /// [`send`](Self::send) followed by [`respond`](Self::respond).
    pub async fn converse(&mut self, text: &str) -> Option<(ChatMessage, ChatMessage)> {
        let question = self.send(text)?;
        let answer = self.respond().await;
        Some((question, answer))
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_opens_with_greeting() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        let greeting = &session.messages()[0];
        assert_eq!(greeting.id, 1);
        assert_eq!(greeting.sender, Sender::Bot);
        assert_eq!(greeting.text, GREETING);
    }

    #[test]
    fn blank_messages_are_ignored() {
        let mut session = ChatSession::new();
        assert!(session.send("").is_none());
        assert!(session.send("  \n\t").is_none());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn user_message_gets_next_id() {
        let mut session = ChatSession::new();
        let msg = session.send("I can't focus lately").unwrap();
        assert_eq!(msg.id, 2);
        assert_eq!(msg.sender, Sender::User);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_after_delay() {
        let mut session = ChatSession::new();
        let started = tokio::time::Instant::now();

        let (question, answer) = session.converse("hello").await.unwrap();

        assert!(started.elapsed() >= DEFAULT_REPLY_DELAY);
        assert_eq!(question.id, 2);
        assert_eq!(answer.id, 3);
        assert_eq!(answer.sender, Sender::Bot);
        assert_eq!(answer.text, CANNED_REPLY);
        assert_eq!(session.messages().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_converse_does_not_wait() {
        let mut session = ChatSession::new();
        let started = tokio::time::Instant::now();
        assert!(session.converse(" ").await.is_none());
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
