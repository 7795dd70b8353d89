use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Server-assigned bot identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotId(pub String);

impl BotId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BotId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Bot record as stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    pub id: BotId,
    pub name: String,
    pub personality: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Bot {
    pub fn fields(&self) -> BotFields {
        BotFields {
            name: self.name.clone(),
            personality: self.personality.clone(),
            prompt: self.prompt.clone(),
        }
    }
}

/// Bot fields without the id: the body of create and update requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub prompt: String,
}

impl BotFields {
    pub fn new(
        name: impl Into<String>,
        personality: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            personality: personality.into(),
            prompt: prompt.into(),
        }
    }

    pub fn validate(&self, limits: &BotLimits) -> Result<(), BotFieldError> {
        match limits.check(&self.name, &self.personality, &self.prompt) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// `GET /api/bots` payload: bots keyed by id.
///
/// Ordered by key so two renders of the same payload are identical.
pub type BotCollection = BTreeMap<BotId, Bot>;

/// Maximum field lengths, counted in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotLimits {
    pub max_name: usize,
    pub max_personality: usize,
    pub max_prompt: usize,
}

impl Default for BotLimits {
    fn default() -> Self {
        Self {
            max_name: 100,
            max_personality: 500,
            max_prompt: 2000,
        }
    }
}

impl BotLimits {
    /// Returns the first violated rule, checking name, then personality,
    /// then prompt. Values are trimmed before the emptiness check.
    pub fn check(&self, name: &str, personality: &str, prompt: &str) -> Option<BotFieldError> {
        let name = name.trim();
        if name.is_empty() {
            return Some(BotFieldError::NameRequired);
        }
        if name.chars().count() > self.max_name {
            return Some(BotFieldError::NameTooLong { max: self.max_name });
        }

        let personality = personality.trim();
        if personality.is_empty() {
            return Some(BotFieldError::PersonalityRequired);
        }
        if personality.chars().count() > self.max_personality {
            return Some(BotFieldError::PersonalityTooLong {
                max: self.max_personality,
            });
        }

        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Some(BotFieldError::PromptRequired);
        }
        if prompt.chars().count() > self.max_prompt {
            return Some(BotFieldError::PromptTooLong {
                max: self.max_prompt,
            });
        }

        None
    }
}

/// Validate bot fields against the default limits
pub fn validate_bot_fields(name: &str, personality: &str, prompt: &str) -> Option<BotFieldError> {
    BotLimits::default().check(name, personality, prompt)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotFieldError {
    #[error("Bot name is required")]
    NameRequired,
    #[error("Bot name must be less than {max} characters")]
    NameTooLong { max: usize },
    #[error("Personality description is required")]
    PersonalityRequired,
    #[error("Personality description must be less than {max} characters")]
    PersonalityTooLong { max: usize },
    #[error("System prompt is required")]
    PromptRequired,
    #[error("System prompt must be less than {max} characters")]
    PromptTooLong { max: usize },
}
