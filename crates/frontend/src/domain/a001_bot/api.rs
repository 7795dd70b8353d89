//! REST client for the bot and chat endpoints

use crate::shared::api_utils::{api_url, path_segment};
use contracts::domain::a001_bot::aggregate::{BotCollection, BotFields, BotId};
use contracts::domain::a002_chat::aggregate::{
    ChatMessage, SendMessageRequest, SendMessageResponse,
};
use contracts::shared::api_response::MutationResponse;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {0}")]
    Http(u16),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

/// Server operations used by the controller.
///
/// Mutations resolve to `Ok` with `success == false` when the server
/// rejects the request; `Err` is reserved for transport and decode failures.
#[allow(async_fn_in_trait)]
pub trait BotApi {
    async fn list_bots(&self) -> Result<BotCollection, ApiError>;
    async fn create_bot(&self, fields: &BotFields) -> Result<MutationResponse, ApiError>;
    async fn update_bot(&self, id: &BotId, fields: &BotFields)
        -> Result<MutationResponse, ApiError>;
    async fn delete_bot(&self, id: &BotId) -> Result<MutationResponse, ApiError>;
    async fn chat_history(&self, id: &BotId) -> Result<Vec<ChatMessage>, ApiError>;
    async fn send_message(
        &self,
        id: &BotId,
        request: &SendMessageRequest,
    ) -> Result<SendMessageResponse, ApiError>;
    async fn clear_chat(&self, id: &BotId) -> Result<MutationResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpBotApi {
    base: String,
}

impl HttpBotApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn bot_url(&self, id: &BotId) -> String {
        api_url(&self.base, &format!("/api/bots/{}", path_segment(id.as_str())))
    }

    fn chat_url(&self, id: &BotId, suffix: &str) -> String {
        api_url(
            &self.base,
            &format!("/api/chat/{}{}", path_segment(id.as_str()), suffix),
        )
    }
}

impl BotApi for HttpBotApi {
    async fn list_bots(&self) -> Result<BotCollection, ApiError> {
        let resp = Request::get(&api_url(&self.base, "/api/bots"))
            .header("Accept", "application/json")
            .send()
            .await?;
        read_json(resp).await
    }

    async fn create_bot(&self, fields: &BotFields) -> Result<MutationResponse, ApiError> {
        let resp = Request::post(&api_url(&self.base, "/api/bots"))
            .json(fields)?
            .send()
            .await?;
        read_envelope(resp).await
    }

    async fn update_bot(
        &self,
        id: &BotId,
        fields: &BotFields,
    ) -> Result<MutationResponse, ApiError> {
        let resp = Request::put(&self.bot_url(id)).json(fields)?.send().await?;
        read_envelope(resp).await
    }

    async fn delete_bot(&self, id: &BotId) -> Result<MutationResponse, ApiError> {
        let resp = Request::delete(&self.bot_url(id)).send().await?;
        read_envelope(resp).await
    }

    async fn chat_history(&self, id: &BotId) -> Result<Vec<ChatMessage>, ApiError> {
        let resp = Request::get(&self.chat_url(id, "/history"))
            .header("Accept", "application/json")
            .send()
            .await?;
        read_json(resp).await
    }

    async fn send_message(
        &self,
        id: &BotId,
        request: &SendMessageRequest,
    ) -> Result<SendMessageResponse, ApiError> {
        let resp = Request::post(&self.chat_url(id, ""))
            .json(request)?
            .send()
            .await?;
        read_envelope(resp).await
    }

    async fn clear_chat(&self, id: &BotId) -> Result<MutationResponse, ApiError> {
        let resp = Request::post(&self.chat_url(id, "/clear")).send().await?;
        read_envelope(resp).await
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    if !resp.ok() {
        return Err(ApiError::Http(resp.status()));
    }
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Mutation endpoints describe failures in a JSON body (HTTP 400/404), so
/// the body is decoded whatever the status.
async fn read_envelope<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    let ok = resp.ok();
    let text = resp.text().await?;
    decode_envelope(ok, status, &text)
}

fn decode_envelope<T: DeserializeOwned>(ok: bool, status: u16, text: &str) -> Result<T, ApiError> {
    match serde_json::from_str::<T>(text) {
        Ok(value) => Ok(value),
        Err(_) if !ok => Err(ApiError::Http(status)),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}
