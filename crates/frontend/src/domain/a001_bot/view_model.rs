//! Pure state -> view transforms, independent of the DOM

use super::state::{ChatEntry, ClientState};
use contracts::domain::a001_bot::aggregate::BotId;
use contracts::domain::a002_chat::aggregate::ChatRole;

/// Characters of the personality shown on a bot card
pub const PERSONALITY_PREVIEW_CHARS: usize = 100;

pub const ATTR_ACTION: &str = "data-action";
pub const ATTR_BOT_ID: &str = "data-bot-id";

pub const ACTION_CHAT: &str = "chat";
pub const ACTION_EDIT: &str = "edit";
pub const ACTION_DELETE: &str = "delete";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotCardVm {
    pub id: BotId,
    pub name: String,
    pub personality_preview: String,
    pub active: bool,
}

impl BotCardVm {
    pub fn class(&self) -> &'static str {
        if self.active {
            "bot-card active"
        } else {
            "bot-card"
        }
    }
}

pub fn bot_cards(state: &ClientState) -> Vec<BotCardVm> {
    state
        .bots
        .values()
        .map(|bot| BotCardVm {
            id: bot.id.clone(),
            name: bot.name.clone(),
            personality_preview: preview(&bot.personality, PERSONALITY_PREVIEW_CHARS),
            active: state.is_current(&bot.id),
        })
        .collect()
}

/// First `max` characters of `text`, with "..." when something was cut
pub fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessageVm {
    pub class: &'static str,
    pub text: String,
    /// Local `HH:MM`
    pub time: String,
}

pub fn chat_messages(entries: &[ChatEntry]) -> Vec<ChatMessageVm> {
    entries
        .iter()
        .map(|entry| ChatMessageVm {
            class: match entry.role {
                ChatRole::User => "message user",
                ChatRole::Bot => "message bot",
            },
            text: entry.message.clone(),
            time: entry.timestamp.format("%H:%M").to_string(),
        })
        .collect()
}

/// Click on a bot card button, decoded from its `data-*` attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCardAction {
    Chat(BotId),
    Edit(BotId),
    Delete(BotId),
}

impl BotCardAction {
    pub fn from_data_attrs(action: &str, id: &str) -> Option<Self> {
        if id.is_empty() {
            return None;
        }
        let id = BotId::from(id);
        match action {
            ACTION_CHAT => Some(BotCardAction::Chat(id)),
            ACTION_EDIT => Some(BotCardAction::Edit(id)),
            ACTION_DELETE => Some(BotCardAction::Delete(id)),
            _ => None,
        }
    }
}
