//! Bot form - ViewModel

use contracts::domain::a001_bot::aggregate::{Bot, BotFields};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct BotFormVm {
    pub name: RwSignal<String>,
    pub personality: RwSignal<String>,
    pub prompt: RwSignal<String>,
}

impl BotFormVm {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            personality: RwSignal::new(String::new()),
            prompt: RwSignal::new(String::new()),
        }
    }

    /// Fill the form from `bot`, or clear it for a new one
    pub fn load(&self, bot: Option<&Bot>) {
        let fields = bot.map(Bot::fields).unwrap_or_default();
        self.name.set(fields.name);
        self.personality.set(fields.personality);
        self.prompt.set(fields.prompt);
    }

    pub fn to_fields(&self) -> BotFields {
        BotFields {
            name: self.name.get_untracked(),
            personality: self.personality.get_untracked(),
            prompt: self.prompt.get_untracked(),
        }
    }
}

impl Default for BotFormVm {
    fn default() -> Self {
        Self::new()
    }
}
