use super::browser_host::BrowserHost;
use super::chat::ChatPane;
use super::details::BotFormModal;
use super::list::BotList;
use super::notifications::NotificationStack;
use super::toolbar::Toolbar;
use super::AppController;
use crate::domain::a001_bot::api::HttpBotApi;
use crate::shared::config::ClientConfig;
use leptos::prelude::*;

/// Two-pane bot page: list on the left, chat on the right
#[component]
#[allow(non_snake_case)]
pub fn BotsPage() -> impl IntoView {
    let config = ClientConfig::load();
    let host = BrowserHost::new(config.notification_timeout_ms);
    let controller = AppController::new(HttpBotApi::new(config.api_base), host, config.limits);

    provide_context(host);
    provide_context(controller.clone());

    wasm_bindgen_futures::spawn_local(async move {
        controller.list().await;
    });

    view! {
        <div class="container">
            <Toolbar />
            <div class="main-content">
                <BotList />
                <ChatPane />
            </div>
            <BotFormModal />
            <NotificationStack />
        </div>
    }
}
