use chrono::{DateTime, Utc};

use crate::knowledge::KnowledgeValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One exchange entry. Immutable once created; bot bodies carry whatever
/// shape the knowledge document held.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub sender: Sender,
    pub body: KnowledgeValue,
    pub at: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            body: KnowledgeValue::Scalar(text.into()),
            at: Utc::now(),
        }
    }

    pub fn bot(body: KnowledgeValue) -> Self {
        Self {
            sender: Sender::Bot,
            body,
            at: Utc::now(),
        }
    }
}

/// Session-scoped, append-only message log. Lives only in memory and is
/// discarded when the process exits.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
