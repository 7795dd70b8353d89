pub mod browser_host;
pub mod chat;
pub mod details;
pub mod list;
pub mod notifications;
pub mod page;
pub mod toolbar;

pub use page::BotsPage;

use super::api::HttpBotApi;
use super::controller::BotController;
use browser_host::BrowserHost;
use leptos::prelude::*;

/// Controller wired to the real server and the page
pub type AppController = BotController<HttpBotApi, BrowserHost>;

pub fn use_controller() -> AppController {
    use_context::<AppController>().expect("AppController not found in context")
}

pub fn use_host() -> BrowserHost {
    use_context::<BrowserHost>().expect("BrowserHost not found in context")
}
