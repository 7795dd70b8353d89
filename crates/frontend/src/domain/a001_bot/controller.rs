//! Client state synchronizer
//!
//! `BotController` owns the `ClientState` and implements every user
//! operation as a server round trip followed by a state update. Writes never
//! patch the bot cache: each successful mutation reloads the whole list.

use super::api::BotApi;
use super::host::{Notification, NotificationKind, UiHost};
use super::state::{BotFormTarget, ChatEntry, ClientState};
use crate::shared::config::LimitsConfig;
use chrono::Local;
use contracts::domain::a001_bot::aggregate::{BotFields, BotId};
use contracts::domain::a001_bot::transfer::{export_bots, export_file_name, parse_import};
use contracts::domain::a002_chat::aggregate::{ChatRole, SendMessageRequest};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const DELETE_CONFIRM: &str = "Are you sure you want to delete this bot?";
const CLEAR_CONFIRM: &str = "Clear chat history?";

/// Result of a bot import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub total: usize,
    /// Keys of the entries that were not created
    pub failed: Vec<String>,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        let mut text = format!("Imported {} of {} bots", self.imported, self.total);
        if !self.failed.is_empty() {
            text.push_str(&format!(" (failed: {})", self.failed.join(", ")));
        }
        text
    }
}

/// A user message accepted by `start_send`, waiting for the server reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    bot_id: BotId,
    message: String,
}

pub struct BotController<A, H> {
    api: Arc<A>,
    host: Arc<H>,
    limits: LimitsConfig,
    state: Arc<Mutex<ClientState>>,
}

impl<A, H> Clone for BotController<A, H> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            host: Arc::clone(&self.host),
            limits: self.limits,
            state: Arc::clone(&self.state),
        }
    }
}

impl<A: BotApi, H: UiHost> BotController<A, H> {
    pub fn new(api: A, host: H, limits: LimitsConfig) -> Self {
        Self {
            api: Arc::new(api),
            host: Arc::new(host),
            limits,
            state: Arc::new(Mutex::new(ClientState::default())),
        }
    }

    #[cfg(test)]
    fn api(&self) -> &A {
        &self.api
    }

    #[cfg(test)]
    fn host(&self) -> &H {
        &self.host
    }

    pub fn snapshot(&self) -> ClientState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, ClientState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mutate the state and publish the result. The lock is released before
    /// the host sees the snapshot.
    fn update<R>(&self, f: impl FnOnce(&mut ClientState) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self.lock();
            let result = f(&mut state);
            (result, state.clone())
        };
        self.host.publish(&snapshot);
        result
    }

    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => log::error!("[ERROR] {}", notification.message),
            NotificationKind::Warning => log::warn!("[WARNING] {}", notification.message),
            NotificationKind::Success => log::info!("[SUCCESS] {}", notification.message),
        }
        self.host.notify(notification);
    }

    // ------------------------------------------------------------------
    // Bot directory
    // ------------------------------------------------------------------

    /// Reload the bot cache from the server. Returns false on failure, in
    /// which case the previous cache is kept.
    pub async fn list(&self) -> bool {
        match self.api.list_bots().await {
            Ok(bots) => {
                log::debug!("Loaded {} bots", bots.len());
                self.update(|s| s.bots = bots);
                true
            }
            Err(e) => {
                log::error!("Error loading bots: {e}");
                self.notify(Notification::error("Error loading bots"));
                false
            }
        }
    }

    pub fn open_create_form(&self) {
        self.update(|s| s.form = Some(BotFormTarget::Create));
    }

    pub fn open_edit_form(&self, id: &BotId) {
        self.update(|s| {
            if s.bots.contains_key(id) {
                s.form = Some(BotFormTarget::Edit(id.clone()));
            } else {
                log::warn!("Cannot edit unknown bot {id}");
            }
        });
    }

    pub fn close_form(&self) {
        self.update(|s| s.form = None);
    }

    /// Save the edit form: create or update depending on what it was opened for
    pub async fn submit_form(&self, fields: BotFields) -> bool {
        let target = self.lock().form.clone();
        match target {
            Some(BotFormTarget::Edit(id)) => self.update_bot(&id, fields).await,
            Some(BotFormTarget::Create) => self.create(fields).await,
            None => {
                log::warn!("Form submitted while closed");
                false
            }
        }
    }

    pub async fn create(&self, fields: BotFields) -> bool {
        self.save(None, fields).await
    }

    pub async fn update_bot(&self, id: &BotId, fields: BotFields) -> bool {
        self.save(Some(id), fields).await
    }

    async fn save(&self, id: Option<&BotId>, fields: BotFields) -> bool {
        if let Err(err) = fields.validate(&self.limits.bot_limits()) {
            self.notify(Notification::error(err.to_string()));
            return false;
        }

        let result = match id {
            Some(id) => self.api.update_bot(id, &fields).await,
            None => self.api.create_bot(&fields).await,
        };

        match result {
            Ok(resp) if resp.success => {
                self.notify(Notification::success(if id.is_some() {
                    "Bot updated successfully!"
                } else {
                    "Bot created successfully!"
                }));
                self.close_form();
                self.list().await;
                true
            }
            Ok(resp) => {
                self.notify(Notification::error(resp.error_or("Error saving bot")));
                false
            }
            Err(e) => {
                log::error!("Error saving bot: {e}");
                self.notify(Notification::error("Error saving bot"));
                false
            }
        }
    }

    pub async fn delete(&self, id: &BotId) -> bool {
        if !self.host.confirm(DELETE_CONFIRM) {
            return false;
        }

        match self.api.delete_bot(id).await {
            Ok(resp) if resp.success => {
                self.notify(Notification::success("Bot deleted successfully!"));
                self.update(|s| {
                    if s.is_current(id) {
                        s.current_bot_id = None;
                        s.chat.clear();
                    }
                    if s.form == Some(BotFormTarget::Edit(id.clone())) {
                        s.form = None;
                    }
                });
                self.list().await;
                true
            }
            Ok(resp) => {
                self.notify(Notification::error(resp.error_or("Error deleting bot")));
                false
            }
            Err(e) => {
                log::error!("Error deleting bot: {e}");
                self.notify(Notification::error("Error deleting bot"));
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Chat session
    // ------------------------------------------------------------------

    pub async fn select_bot(&self, id: &BotId) {
        let known = self.update(|s| {
            if !s.bots.contains_key(id) {
                return false;
            }
            s.current_bot_id = Some(id.clone());
            s.chat.clear();
            true
        });
        if !known {
            log::warn!("Cannot select unknown bot {id}");
            return;
        }
        self.load_history(id).await;
    }

    /// Replace the pane with the server history. Messages appended while the
    /// request was in flight are kept after it.
    pub async fn load_history(&self, id: &BotId) {
        let loaded_from = self.lock().chat.len();
        match self.api.chat_history(id).await {
            Ok(history) => {
                let mut entries: Vec<ChatEntry> =
                    history.into_iter().map(ChatEntry::from_history).collect();
                self.update(|s| {
                    // Selection may have moved on while the request was in flight
                    if s.is_current(id) {
                        let newer = s.chat.split_off(loaded_from.min(s.chat.len()));
                        entries.extend(newer);
                        s.chat = entries;
                    }
                });
            }
            Err(e) => log::error!("Error loading chat history: {e}"),
        }
    }

    /// Send a chat message and wait for the reply.
    ///
    /// Returns false without touching the network when the message is blank,
    /// too long, no bot is open, or a previous send is still in flight.
    pub async fn send_message(&self, text: &str) -> bool {
        match self.start_send(text) {
            Some(pending) => {
                self.finish_send(pending).await;
                true
            }
            None => false,
        }
    }

    /// Synchronous half of `send_message`: checks the message, appends it
    /// optimistically and disables input.
    pub fn start_send(&self, text: &str) -> Option<PendingMessage> {
        let message = text.trim();
        if message.is_empty() {
            return None;
        }
        if self.lock().current_bot_id.is_none() {
            log::debug!("Send ignored: no bot selected");
            return None;
        }
        if message.chars().count() > self.limits.max_message {
            self.notify(Notification::error(format!(
                "Message too long (max {} characters)",
                self.limits.max_message
            )));
            return None;
        }

        let message = message.to_string();
        self.update(|s| {
            let Some(bot_id) = s.current_bot_id.clone() else {
                log::debug!("Send ignored: no bot selected");
                return None;
            };
            if !s.input_enabled {
                log::debug!("Send ignored: previous message still in flight");
                return None;
            }
            s.chat.push(ChatEntry::now(ChatRole::User, message.clone()));
            s.input_enabled = false;
            Some(PendingMessage { bot_id, message })
        })
    }

    /// Asynchronous half of `send_message`. Input is re-enabled on every
    /// outcome.
    pub async fn finish_send(&self, pending: PendingMessage) {
        let request = SendMessageRequest {
            message: pending.message,
        };
        let reply = match self.api.send_message(&pending.bot_id, &request).await {
            Ok(resp) if resp.success => Some(resp.response.unwrap_or_default()),
            Ok(resp) => {
                self.notify(Notification::error(
                    resp.error.unwrap_or_else(|| "Error sending message".to_string()),
                ));
                None
            }
            Err(e) => {
                log::error!("Error sending message: {e}");
                self.notify(Notification::error("Error sending message"));
                None
            }
        };

        self.update(|s| {
            if let Some(reply) = reply {
                if s.is_current(&pending.bot_id) {
                    s.chat.push(ChatEntry::now(ChatRole::Bot, reply));
                }
            }
            s.input_enabled = true;
        });
    }

    pub async fn clear_chat(&self, id: &BotId) -> bool {
        if !self.host.confirm(CLEAR_CONFIRM) {
            return false;
        }

        match self.api.clear_chat(id).await {
            Ok(resp) if resp.success => {
                self.update(|s| {
                    if s.is_current(id) {
                        s.chat.clear();
                    }
                });
                self.notify(Notification::success("Chat cleared"));
                true
            }
            Ok(resp) => {
                self.notify(Notification::error(resp.error_or("Error clearing chat")));
                false
            }
            Err(e) => {
                log::error!("Error clearing chat: {e}");
                self.notify(Notification::error("Error clearing chat"));
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Import / export
    // ------------------------------------------------------------------

    /// Download the bot cache as JSON. Skipped with a warning when empty.
    pub fn export(&self) -> bool {
        let bots = self.lock().bots.clone();
        if bots.is_empty() {
            self.notify(Notification::warning("No bots to export"));
            return false;
        }

        let contents = match export_bots(&bots) {
            Ok(contents) => contents,
            Err(e) => {
                log::error!("Error serializing bots: {e}");
                self.notify(Notification::error("Error exporting bots"));
                return false;
            }
        };
        let filename = export_file_name(Local::now().date_naive());

        match self.host.download(&filename, &contents) {
            Ok(()) => {
                self.notify(Notification::success(format!("Exported {} bots", bots.len())));
                true
            }
            Err(e) => {
                log::error!("Error downloading {filename}: {e}");
                self.notify(Notification::error("Error exporting bots"));
                false
            }
        }
    }

    /// Create one bot per entry of an exported file, one request at a time.
    ///
    /// Returns `None` when the file itself is rejected; per-entry failures
    /// are logged and listed in the report.
    pub async fn import(&self, contents: &str) -> Option<ImportReport> {
        let entries = match parse_import(contents) {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Error importing bots: {e}");
                self.notify(Notification::error(format!("Import failed: {e}")));
                return None;
            }
        };

        let total = entries.len();
        let mut imported = 0;
        let mut failed = Vec::new();

        for entry in entries {
            let fields = match entry.fields {
                Ok(fields) => fields,
                Err(reason) => {
                    log::warn!("Skipping import entry {}: {}", entry.key, reason);
                    failed.push(entry.key);
                    continue;
                }
            };
            match self.api.create_bot(&fields).await {
                Ok(resp) if resp.success => imported += 1,
                Ok(resp) => {
                    log::warn!(
                        "Import entry {} rejected: {}",
                        entry.key,
                        resp.error_or("no reason given")
                    );
                    failed.push(entry.key);
                }
                Err(e) => {
                    log::warn!("Import entry {} failed: {e}", entry.key);
                    failed.push(entry.key);
                }
            }
        }

        let report = ImportReport {
            imported,
            total,
            failed,
        };
        self.notify(if report.failed.is_empty() {
            Notification::success(report.summary())
        } else {
            Notification::warning(report.summary())
        });
        self.list().await;
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_bot::api::ApiError;
    use crate::domain::a001_bot::view_model::bot_cards;
    use crate::shared::config::ClientConfig;
    use contracts::domain::a001_bot::aggregate::{validate_bot_fields, Bot, BotCollection};
    use contracts::domain::a002_chat::aggregate::{ChatMessage, SendMessageResponse};
    use contracts::shared::api_response::MutationResponse;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    /// In-memory server with the same validation rules as the real one
    #[derive(Default)]
    struct FakeApi {
        bots: RefCell<BotCollection>,
        history: RefCell<HashMap<BotId, Vec<ChatMessage>>>,
        next_id: Cell<u32>,
        calls: RefCell<Vec<String>>,
        offline: Cell<bool>,
        reject_chat: Cell<bool>,
    }

    impl FakeApi {
        fn with_bots(names: &[&str]) -> Self {
            let api = Self::default();
            for name in names {
                api.insert(BotFields::new(*name, "friendly", "be helpful"));
            }
            api
        }

        fn insert(&self, fields: BotFields) -> BotId {
            let n = self.next_id.get() + 1;
            self.next_id.set(n);
            let id = BotId::new(format!("bot-{n}"));
            self.bots.borrow_mut().insert(
                id.clone(),
                Bot {
                    id: id.clone(),
                    name: fields.name,
                    personality: fields.personality,
                    prompt: fields.prompt,
                    created_at: None,
                    updated_at: None,
                },
            );
            id
        }

        fn record(&self, call: impl Into<String>) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call.into());
            if self.offline.get() {
                Err(ApiError::Network("connection refused".into()))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl BotApi for FakeApi {
        async fn list_bots(&self) -> Result<BotCollection, ApiError> {
            self.record("list")?;
            Ok(self.bots.borrow().clone())
        }

        async fn create_bot(&self, fields: &BotFields) -> Result<MutationResponse, ApiError> {
            self.record(format!("create {}", fields.name))?;
            if let Some(err) = validate_bot_fields(&fields.name, &fields.personality, &fields.prompt)
            {
                return Ok(MutationResponse::failed(err.to_string()));
            }
            self.insert(fields.clone());
            Ok(MutationResponse::ok())
        }

        async fn update_bot(
            &self,
            id: &BotId,
            fields: &BotFields,
        ) -> Result<MutationResponse, ApiError> {
            self.record(format!("update {id}"))?;
            let mut bots = self.bots.borrow_mut();
            match bots.get_mut(id) {
                Some(bot) => {
                    bot.name = fields.name.clone();
                    bot.personality = fields.personality.clone();
                    bot.prompt = fields.prompt.clone();
                    Ok(MutationResponse::ok())
                }
                None => Ok(MutationResponse::failed("Bot not found")),
            }
        }

        async fn delete_bot(&self, id: &BotId) -> Result<MutationResponse, ApiError> {
            self.record(format!("delete {id}"))?;
            match self.bots.borrow_mut().remove(id) {
                Some(_) => Ok(MutationResponse::ok()),
                None => Ok(MutationResponse::failed("Bot not found")),
            }
        }

        async fn chat_history(&self, id: &BotId) -> Result<Vec<ChatMessage>, ApiError> {
            self.record(format!("history {id}"))?;
            Ok(self.history.borrow().get(id).cloned().unwrap_or_default())
        }

        async fn send_message(
            &self,
            id: &BotId,
            request: &SendMessageRequest,
        ) -> Result<SendMessageResponse, ApiError> {
            self.record(format!("send {id} {}", request.message))?;
            if self.reject_chat.get() {
                return Ok(SendMessageResponse {
                    success: false,
                    error: Some("Internal server error".into()),
                    ..SendMessageResponse::default()
                });
            }
            Ok(SendMessageResponse {
                success: true,
                response: Some(format!("echo: {}", request.message)),
                ..SendMessageResponse::default()
            })
        }

        async fn clear_chat(&self, id: &BotId) -> Result<MutationResponse, ApiError> {
            self.record(format!("clear {id}"))?;
            self.history.borrow_mut().remove(id);
            Ok(MutationResponse::ok())
        }
    }

    struct RecordingHost {
        notifications: RefCell<Vec<Notification>>,
        downloads: RefCell<Vec<(String, String)>>,
        confirm_answer: Cell<bool>,
        published: Cell<usize>,
    }

    impl Default for RecordingHost {
        fn default() -> Self {
            Self {
                notifications: RefCell::new(Vec::new()),
                downloads: RefCell::new(Vec::new()),
                confirm_answer: Cell::new(true),
                published: Cell::new(0),
            }
        }
    }

    impl RecordingHost {
        fn last(&self) -> Option<Notification> {
            self.notifications.borrow().last().cloned()
        }
    }

    impl UiHost for RecordingHost {
        fn notify(&self, notification: Notification) {
            self.notifications.borrow_mut().push(notification);
        }

        fn confirm(&self, _message: &str) -> bool {
            self.confirm_answer.get()
        }

        fn download(&self, filename: &str, contents: &str) -> Result<(), String> {
            self.downloads
                .borrow_mut()
                .push((filename.to_string(), contents.to_string()));
            Ok(())
        }

        fn publish(&self, _state: &ClientState) {
            self.published.set(self.published.get() + 1);
        }
    }

    type TestController = BotController<FakeApi, RecordingHost>;

    fn controller(api: FakeApi) -> TestController {
        BotController::new(api, RecordingHost::default(), ClientConfig::default().limits)
    }

    fn first_id(ctrl: &TestController) -> BotId {
        ctrl.snapshot().bots.keys().next().cloned().unwrap()
    }

    #[test]
    fn test_list_is_idempotent() {
        let ctrl = controller(FakeApi::with_bots(&["Ada", "Bob"]));
        assert!(block_on(ctrl.list()));
        let first = bot_cards(&ctrl.snapshot());
        assert!(block_on(ctrl.list()));
        let second = bot_cards(&ctrl.snapshot());
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_list_replaces_cache_wholesale() {
        let ctrl = controller(FakeApi::with_bots(&["Ada", "Bob"]));
        block_on(ctrl.list());
        ctrl.api().bots.borrow_mut().clear();
        ctrl.api().insert(BotFields::new("Cy", "p", "q"));
        block_on(ctrl.list());
        let names: Vec<String> = ctrl.snapshot().bots.values().map(|b| b.name.clone()).collect();
        assert_eq!(names, vec!["Cy".to_string()]);
    }

    #[test]
    fn test_list_failure_keeps_cache() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        ctrl.api().offline.set(true);
        assert!(!block_on(ctrl.list()));
        assert_eq!(ctrl.snapshot().bots.len(), 1);
        assert_eq!(ctrl.host().last(), Some(Notification::error("Error loading bots")));
    }

    #[test]
    fn test_create_validation_error_skips_network() {
        let ctrl = controller(FakeApi::default());
        ctrl.open_create_form();
        assert!(!block_on(ctrl.create(BotFields::new("", "x", "y"))));
        assert!(ctrl.api().calls().is_empty());
        assert_eq!(ctrl.host().last(), Some(Notification::error("Bot name is required")));
        assert_eq!(ctrl.snapshot().form, Some(BotFormTarget::Create));
    }

    #[test]
    fn test_create_closes_form_and_reloads() {
        let ctrl = controller(FakeApi::default());
        ctrl.open_create_form();
        assert!(block_on(ctrl.submit_form(BotFields::new("Ada", "friendly", "hi"))));
        assert_eq!(ctrl.api().calls(), vec!["create Ada", "list"]);
        let state = ctrl.snapshot();
        assert!(state.form.is_none());
        assert_eq!(state.bots.len(), 1);
        assert_eq!(
            ctrl.host().notifications.borrow()[0],
            Notification::success("Bot created successfully!")
        );
    }

    #[test]
    fn test_update_through_edit_form() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        let id = first_id(&ctrl);
        ctrl.open_edit_form(&id);
        assert_eq!(ctrl.snapshot().form_bot().map(|b| b.name.clone()), Some("Ada".into()));

        assert!(block_on(ctrl.submit_form(BotFields::new("Ada 2", "formal", "hi"))));
        assert_eq!(ctrl.snapshot().bots[&id].name, "Ada 2");
        assert!(ctrl.snapshot().form.is_none());
        assert_eq!(
            ctrl.host().notifications.borrow()[0],
            Notification::success("Bot updated successfully!")
        );
    }

    #[test]
    fn test_update_server_rejection_uses_server_message() {
        let ctrl = controller(FakeApi::default());
        let missing = BotId::from("gone");
        assert!(!block_on(ctrl.update_bot(&missing, BotFields::new("A", "p", "q"))));
        assert_eq!(ctrl.host().last(), Some(Notification::error("Bot not found")));
        assert_eq!(ctrl.api().calls(), vec!["update gone"]);
    }

    #[test]
    fn test_save_network_failure_uses_generic_message() {
        let ctrl = controller(FakeApi::default());
        ctrl.api().offline.set(true);
        assert!(!block_on(ctrl.create(BotFields::new("A", "p", "q"))));
        assert_eq!(ctrl.host().last(), Some(Notification::error("Error saving bot")));
    }

    #[test]
    fn test_edit_unknown_bot_keeps_form_closed() {
        let ctrl = controller(FakeApi::default());
        ctrl.open_edit_form(&BotId::from("nope"));
        assert!(ctrl.snapshot().form.is_none());
    }

    #[test]
    fn test_delete_open_bot_clears_selection() {
        let ctrl = controller(FakeApi::with_bots(&["Ada", "Bob"]));
        block_on(ctrl.list());
        let id = first_id(&ctrl);
        block_on(ctrl.select_bot(&id));
        assert!(ctrl.snapshot().chat_visible());

        assert!(block_on(ctrl.delete(&id)));
        let state = ctrl.snapshot();
        assert_eq!(state.current_bot_id, None);
        assert!(!state.chat_visible());
        assert_eq!(state.bots.len(), 1);
        assert_eq!(ctrl.api().calls().last().map(String::as_str), Some("list"));
    }

    #[test]
    fn test_delete_other_bot_keeps_selection() {
        let ctrl = controller(FakeApi::with_bots(&["Ada", "Bob"]));
        block_on(ctrl.list());
        let ids: Vec<BotId> = ctrl.snapshot().bots.keys().cloned().collect();
        block_on(ctrl.select_bot(&ids[0]));
        block_on(ctrl.delete(&ids[1]));
        assert_eq!(ctrl.snapshot().current_bot_id, Some(ids[0].clone()));
    }

    #[test]
    fn test_delete_declined() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        ctrl.host().confirm_answer.set(false);
        assert!(!block_on(ctrl.delete(&first_id(&ctrl))));
        assert_eq!(ctrl.api().calls(), vec!["list"]);
    }

    #[test]
    fn test_select_loads_history_in_order() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        let id = first_id(&ctrl);
        ctrl.api().history.borrow_mut().insert(
            id.clone(),
            vec![
                ChatMessage {
                    role: ChatRole::User,
                    message: "hello".into(),
                    timestamp: "2024-03-15T14:02:26".into(),
                },
                ChatMessage {
                    role: ChatRole::Bot,
                    message: "Hello! I'm Ada.".into(),
                    timestamp: "2024-03-15T14:02:27".into(),
                },
            ],
        );

        block_on(ctrl.select_bot(&id));
        let state = ctrl.snapshot();
        assert_eq!(state.current_bot_id, Some(id));
        let roles: Vec<ChatRole> = state.chat.iter().map(|e| e.role).collect();
        assert_eq!(roles, vec![ChatRole::User, ChatRole::Bot]);
    }

    #[test]
    fn test_select_unknown_bot_is_ignored() {
        let ctrl = controller(FakeApi::default());
        block_on(ctrl.select_bot(&BotId::from("ghost")));
        assert!(ctrl.snapshot().current_bot_id.is_none());
        assert!(ctrl.api().calls().is_empty());
    }

    #[test]
    fn test_send_appends_user_then_bot() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        block_on(ctrl.select_bot(&first_id(&ctrl)));

        assert!(block_on(ctrl.send_message("  hi  ")));
        let state = ctrl.snapshot();
        assert_eq!(state.chat.len(), 2);
        assert_eq!(state.chat[0].role, ChatRole::User);
        assert_eq!(state.chat[0].message, "hi");
        assert_eq!(state.chat[1].role, ChatRole::Bot);
        assert_eq!(state.chat[1].message, "echo: hi");
        assert!(state.input_enabled);
    }

    #[test]
    fn test_send_failure_reenables_input() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        block_on(ctrl.select_bot(&first_id(&ctrl)));
        ctrl.api().offline.set(true);

        assert!(block_on(ctrl.send_message("hi")));
        let state = ctrl.snapshot();
        assert_eq!(state.chat.len(), 1);
        assert_eq!(state.chat[0].role, ChatRole::User);
        assert!(state.input_enabled);
        assert_eq!(ctrl.host().last(), Some(Notification::error("Error sending message")));
    }

    #[test]
    fn test_send_rejection_reenables_input() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        block_on(ctrl.select_bot(&first_id(&ctrl)));
        ctrl.api().reject_chat.set(true);

        block_on(ctrl.send_message("hi"));
        assert!(ctrl.snapshot().input_enabled);
        assert_eq!(ctrl.host().last(), Some(Notification::error("Internal server error")));
    }

    #[test]
    fn test_input_disabled_while_in_flight() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        block_on(ctrl.select_bot(&first_id(&ctrl)));

        let pending = ctrl.start_send("first").unwrap();
        assert!(!ctrl.snapshot().input_enabled);
        assert!(ctrl.start_send("second").is_none());

        block_on(ctrl.finish_send(pending));
        assert!(ctrl.snapshot().input_enabled);
        assert_eq!(ctrl.snapshot().chat.len(), 2);
    }

    #[test]
    fn test_send_noops() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        assert!(!block_on(ctrl.send_message("hi")));

        block_on(ctrl.select_bot(&first_id(&ctrl)));
        assert!(!block_on(ctrl.send_message("   ")));
        assert!(ctrl.snapshot().chat.is_empty());
        assert!(!ctrl.api().calls().iter().any(|c| c.starts_with("send")));
    }

    #[test]
    fn test_send_too_long() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        block_on(ctrl.select_bot(&first_id(&ctrl)));
        let long = "x".repeat(1001);
        assert!(!block_on(ctrl.send_message(&long)));
        assert!(ctrl.snapshot().chat.is_empty());
        assert_eq!(
            ctrl.host().last(),
            Some(Notification::error("Message too long (max 1000 characters)"))
        );
    }

    #[test]
    fn test_send_while_history_loads_keeps_both_messages() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        let id = first_id(&ctrl);
        ctrl.api().history.borrow_mut().insert(
            id.clone(),
            vec![ChatMessage {
                role: ChatRole::Bot,
                message: "earlier".into(),
                timestamp: "2024-03-15T14:02:27".into(),
            }],
        );
        ctrl.update(|s| s.current_bot_id = Some(id.clone()));

        let pending = ctrl.start_send("hi").unwrap();
        block_on(ctrl.load_history(&id));
        block_on(ctrl.finish_send(pending));

        let chat = ctrl.snapshot().chat;
        let roles: Vec<ChatRole> = chat.iter().map(|e| e.role).collect();
        assert_eq!(roles, vec![ChatRole::Bot, ChatRole::User, ChatRole::Bot]);
        assert_eq!(chat[0].message, "earlier");
        assert_eq!(chat[1].message, "hi");
        assert_eq!(chat[2].message, "echo: hi");
    }

    #[test]
    fn test_history_reload_replaces_pane() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        let id = first_id(&ctrl);
        block_on(ctrl.select_bot(&id));
        block_on(ctrl.send_message("hi"));

        block_on(ctrl.load_history(&id));
        assert!(ctrl.snapshot().chat.is_empty());
    }

    #[test]
    fn test_long_message_without_selection_is_ignored() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        assert!(!block_on(ctrl.send_message(&"x".repeat(1001))));
        assert!(ctrl.host().notifications.borrow().is_empty());
    }

    #[test]
    fn test_clear_chat() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        let id = first_id(&ctrl);
        block_on(ctrl.select_bot(&id));
        block_on(ctrl.send_message("hi"));

        ctrl.host().confirm_answer.set(false);
        assert!(!block_on(ctrl.clear_chat(&id)));
        assert_eq!(ctrl.snapshot().chat.len(), 2);

        ctrl.host().confirm_answer.set(true);
        ctrl.api().offline.set(true);
        assert!(!block_on(ctrl.clear_chat(&id)));
        assert_eq!(ctrl.snapshot().chat.len(), 2);

        ctrl.api().offline.set(false);
        assert!(block_on(ctrl.clear_chat(&id)));
        assert!(ctrl.snapshot().chat.is_empty());
        assert_eq!(ctrl.host().last(), Some(Notification::success("Chat cleared")));
    }

    #[test]
    fn test_import_counts_server_accepted_entries() {
        let ctrl = controller(FakeApi::default());
        let file = r#"{
            "a": {"name": "A", "personality": "p", "prompt": "q"},
            "b": {"name": "", "personality": "p", "prompt": "q"}
        }"#;
        let report = block_on(ctrl.import(file)).unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.total, 2);
        assert_eq!(report.failed, vec!["b".to_string()]);
        assert_eq!(ctrl.api().calls(), vec!["create A", "create ", "list"]);
        assert_eq!(ctrl.snapshot().bots.len(), 1);
        assert_eq!(
            ctrl.host().last(),
            Some(Notification::warning("Imported 1 of 2 bots (failed: b)"))
        );
    }

    #[test]
    fn test_import_continues_after_network_failure() {
        let ctrl = controller(FakeApi::default());
        ctrl.api().offline.set(true);
        let report = block_on(ctrl.import(r#"{"a": {"name": "A", "personality": "p", "prompt": "q"}, "b": 3}"#))
            .unwrap();
        assert_eq!(report.imported, 0);
        assert_eq!(report.failed, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(ctrl.api().calls(), vec!["create A", "list"]);
    }

    #[test]
    fn test_import_rejects_non_object() {
        let ctrl = controller(FakeApi::default());
        assert!(block_on(ctrl.import(r#"[{"name": "A"}]"#)).is_none());
        assert!(block_on(ctrl.import("not json")).is_none());
        assert!(ctrl.api().calls().is_empty());
        assert_eq!(ctrl.host().notifications.borrow().len(), 2);
        assert!(ctrl
            .host()
            .notifications
            .borrow()
            .iter()
            .all(|n| n.kind == NotificationKind::Error));
    }

    #[test]
    fn test_export_empty_cache_warns() {
        let ctrl = controller(FakeApi::default());
        assert!(!ctrl.export());
        assert!(ctrl.host().downloads.borrow().is_empty());
        assert_eq!(ctrl.host().last(), Some(Notification::warning("No bots to export")));
    }

    #[test]
    fn test_export_downloads_cache() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        assert!(ctrl.export());
        let downloads = ctrl.host().downloads.borrow();
        assert_eq!(downloads.len(), 1);
        let (filename, contents) = &downloads[0];
        assert!(filename.starts_with("mybots-export-"));
        assert!(filename.ends_with(".json"));
        let parsed: BotCollection = serde_json::from_str(contents).unwrap();
        assert_eq!(parsed, ctrl.snapshot().bots);
    }

    #[test]
    fn test_every_change_is_published() {
        let ctrl = controller(FakeApi::with_bots(&["Ada"]));
        block_on(ctrl.list());
        ctrl.open_create_form();
        ctrl.close_form();
        assert_eq!(ctrl.host().published.get(), 3);
    }
}
