use contracts::domain::a001_bot::aggregate::BotLimits;
use contracts::domain::a002_chat::aggregate::MAX_MESSAGE_LENGTH;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// Prefix for `/api/...` paths; empty means same origin
    #[serde(default)]
    pub api_base: String,
    pub notification_timeout_ms: u32,
    pub limits: LimitsConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct LimitsConfig {
    pub max_name: usize,
    pub max_personality: usize,
    pub max_prompt: usize,
    pub max_message: usize,
}

impl LimitsConfig {
    pub fn bot_limits(&self) -> BotLimits {
        BotLimits {
            max_name: self.max_name,
            max_personality: self.max_personality,
            max_prompt: self.max_prompt,
        }
    }
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
api_base = ""
notification_timeout_ms = 3000

[limits]
max_name = 100
max_personality = 500
max_prompt = 2000
max_message = 1000
"#;

/// Id of the optional `<script type="application/toml">` override block
pub const CONFIG_ELEMENT_ID: &str = "app-config";

impl Default for ClientConfig {
    fn default() -> Self {
        let limits = BotLimits::default();
        Self {
            api_base: String::new(),
            notification_timeout_ms: 3000,
            limits: LimitsConfig {
                max_name: limits.max_name,
                max_personality: limits.max_personality,
                max_prompt: limits.max_prompt,
                max_message: MAX_MESSAGE_LENGTH,
            },
        }
    }
}

impl ClientConfig {
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration for the running page.
    ///
    /// Search order:
    /// 1. `<script id="app-config">` block in the host page
    /// 2. Falls back to the embedded default config
    pub fn load() -> Self {
        if let Some(contents) = page_config_block() {
            match Self::from_toml(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from #{}", CONFIG_ELEMENT_ID);
                    return config;
                }
                Err(e) => log::warn!("Ignoring invalid #{}: {}", CONFIG_ELEMENT_ID, e),
            }
        }

        log::info!("Using default embedded configuration");
        Self::from_toml(DEFAULT_CONFIG).unwrap_or_default()
    }
}

fn page_config_block() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
    element.text_content().filter(|text| !text.trim().is_empty())
}
