//! `UiHost` backed by Leptos signals and browser dialogs

use crate::domain::a001_bot::host::{Notification, UiHost};
use crate::domain::a001_bot::state::ClientState;
use crate::shared::export::{download_text, JSON_MIME};
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

#[derive(Clone, Copy)]
pub struct BrowserHost {
    /// Latest snapshot published by the controller
    pub state: RwSignal<ClientState>,
    pub toasts: RwSignal<Vec<Toast>>,
    next_toast_id: RwSignal<u64>,
    timeout_ms: u32,
}

impl BrowserHost {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            state: RwSignal::new(ClientState::default()),
            toasts: RwSignal::new(Vec::new()),
            next_toast_id: RwSignal::new(0),
            timeout_ms,
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }
}

impl UiHost for BrowserHost {
    fn notify(&self, notification: Notification) {
        let id = self.next_toast_id.get_untracked();
        self.next_toast_id.set(id + 1);
        self.toasts.update(|toasts| toasts.push(Toast { id, notification }));

        let host = *self;
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(host.timeout_ms).await;
            host.dismiss(id);
        });
    }

    fn confirm(&self, message: &str) -> bool {
        if let Some(win) = web_sys::window() {
            win.confirm_with_message(message).unwrap_or(false)
        } else {
            false
        }
    }

    fn download(&self, filename: &str, contents: &str) -> Result<(), String> {
        download_text(contents, filename, JSON_MIME)
    }

    fn publish(&self, state: &ClientState) {
        self.state.set(state.clone());
    }
}
