use chrono::{Local, NaiveDateTime};
use contracts::domain::a001_bot::aggregate::{Bot, BotCollection, BotId};
use contracts::domain::a002_chat::aggregate::{ChatMessage, ChatRole};

/// What the edit form is open for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotFormTarget {
    Create,
    Edit(BotId),
}

/// One message of the open chat pane
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub message: String,
    pub timestamp: NaiveDateTime,
}

impl ChatEntry {
    /// Client-side message stamped with the current local time
    pub fn now(role: ChatRole, message: impl Into<String>) -> Self {
        Self {
            role,
            message: message.into(),
            timestamp: Local::now().naive_local(),
        }
    }

    pub fn from_history(msg: ChatMessage) -> Self {
        let timestamp = msg.parsed_timestamp().unwrap_or_else(|| {
            log::warn!("Unreadable chat timestamp {:?}, using now", msg.timestamp);
            Local::now().naive_local()
        });
        Self {
            role: msg.role,
            message: msg.message,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientState {
    /// Last successful `GET /api/bots` result
    pub bots: BotCollection,
    pub current_bot_id: Option<BotId>,
    /// Messages of the open chat pane, oldest first
    pub chat: Vec<ChatEntry>,
    /// False while a chat round trip is in flight
    pub input_enabled: bool,
    pub form: Option<BotFormTarget>,
}

impl Default for ClientState {
    fn default() -> Self {
        Self {
            bots: BotCollection::new(),
            current_bot_id: None,
            chat: Vec::new(),
            input_enabled: true,
            form: None,
        }
    }
}

impl ClientState {
    pub fn current_bot(&self) -> Option<&Bot> {
        self.current_bot_id.as_ref().and_then(|id| self.bots.get(id))
    }

    pub fn chat_visible(&self) -> bool {
        self.current_bot_id.is_some()
    }

    pub fn is_current(&self, id: &BotId) -> bool {
        self.current_bot_id.as_ref() == Some(id)
    }

    /// Bot being edited, `None` when the form is closed or creating
    pub fn form_bot(&self) -> Option<&Bot> {
        match &self.form {
            Some(BotFormTarget::Edit(id)) => self.bots.get(id),
            _ => None,
        }
    }
}
