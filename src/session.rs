use chrono::{DateTime, Local};

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    System,
}

/// One entry in the displayed conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub origin: Origin,
    pub timestamp: DateTime<Local>,
}

/// Explicit submission phase instead of a bare boolean, so an error state
/// can be added later without reworking the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Awaiting,
}

/// In-memory state for one chat session: an append-only message list, the
/// current input buffer, and the awaiting-response guard. Owned by whichever
/// view drives it; nothing here survives the session.
#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<Message>,
    input: String,
    phase: Phase,
    seq: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            phase: Phase::Idle,
            seq: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_awaiting(&self) -> bool {
        self.phase == Phase::Awaiting
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Attempts to submit the current input. Returns the text to send, or
    /// `None` (with no state change) when the trimmed input is empty or a
    /// request is already in flight. On success the user message is appended
    /// optimistically, the input buffer is cleared, and the session enters
    /// `Awaiting`.
    pub fn submit(&mut self) -> Option<String> {
        if self.phase == Phase::Awaiting {
            return None;
        }
        let text = self.input.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();
        self.append(Origin::User, text.clone());
        self.input.clear();
        self.phase = Phase::Awaiting;
        Some(text)
    }

    /// Completes the in-flight request: appends exactly one system message
    /// (the reply, or the failure fallback on `None`) and returns to `Idle`.
    pub fn settle(&mut self, reply: Option<String>) {
        let text = reply.unwrap_or_else(|| config::FAILURE_FALLBACK.to_string());
        self.append(Origin::System, text);
        self.phase = Phase::Idle;
    }

    fn append(&mut self, origin: Origin, text: String) {
        let now = Local::now();
        // Timestamp alone can collide on rapid submissions; the counter keeps
        // ids unique within a session.
        let id = format!("{}-{}", now.timestamp_millis(), self.seq);
        self.seq += 1;
        self.messages.push(Message {
            id,
            text,
            origin,
            timestamp: now,
        });
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 0);
        assert_eq!(session.input(), "");
        assert!(!session.is_awaiting());
    }

    #[test]
    fn test_submit_appends_user_then_system() {
        let mut session = ChatSession::new();
        session.set_input("Hello");

        let sent = session.submit();
        assert_eq!(sent.as_deref(), Some("Hello"));
        assert!(session.is_awaiting());
        assert_eq!(session.input(), "");

        session.settle(Some("Hi there!".to_string()));
        assert!(!session.is_awaiting());

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].origin, Origin::User);
        assert_eq!(session.messages()[0].text, "Hello");
        assert_eq!(session.messages()[1].origin, Origin::System);
        assert_eq!(session.messages()[1].text, "Hi there!");
    }

    #[test]
    fn test_empty_or_whitespace_input_is_a_noop() {
        let mut session = ChatSession::new();

        assert!(session.submit().is_none());

        session.set_input("   \t ");
        assert!(session.submit().is_none());

        assert_eq!(session.messages().len(), 0);
        assert!(!session.is_awaiting());
    }

    #[test]
    fn test_resubmission_blocked_while_awaiting() {
        let mut session = ChatSession::new();
        session.set_input("first");
        assert!(session.submit().is_some());

        session.set_input("second");
        assert!(session.submit().is_none());
        // The blocked attempt must not clear the buffer or append anything
        assert_eq!(session.input(), "second");
        assert_eq!(session.messages().len(), 1);

        session.settle(Some("reply".to_string()));
        assert!(session.submit().is_some());
        assert_eq!(session.messages().len(), 3);
    }

    #[test]
    fn test_settle_without_reply_uses_fallback() {
        let mut session = ChatSession::new();
        session.set_input("anyone there?");
        session.submit();
        session.settle(None);

        let last = session.messages().last().unwrap();
        assert_eq!(last.origin, Origin::System);
        assert_eq!(last.text, config::FAILURE_FALLBACK);
        assert!(!session.is_awaiting());
    }

    #[test]
    fn test_message_ids_unique_across_rapid_submissions() {
        let mut session = ChatSession::new();
        for i in 0..50 {
            session.set_input(format!("message {}", i));
            session.submit();
            session.settle(Some("ok".to_string()));
        }

        let mut ids: Vec<&str> = session.messages().iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_submitted_text_is_trimmed() {
        let mut session = ChatSession::new();
        session.set_input("  hello  ");
        assert_eq!(session.submit().as_deref(), Some("hello"));
        assert_eq!(session.messages()[0].text, "hello");
    }
}
