//! GufoRAG API client.
//!
//! One [`GufoClient`] value owns the HTTP connection pool and is passed
//! by reference into each call; every request builds its own headers, so
//! concurrent calls would never race on shared client state.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::GufoConfig;
use crate::error::{GufoError, GufoResult};
use crate::models::{ApiResponse, ChatLog, ChatLogRating, ChatRequest, ChatRoom, RatingRequest};
use crate::reader::{read_chat_stream, ChatOutcome};
use crate::sink::OutputSink;

/// Client for the GufoRAG REST and streaming chat API.
pub struct GufoClient {
    base_url: String,
    client: Client,
}

impl GufoClient {
    /// Build a client from configuration.
    ///
    /// Honors the TLS bypass flag for servers with self-signed
    /// certificates; fails only if the underlying client cannot be built.
    pub fn new(config: &GufoConfig) -> GufoResult<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Build a client against a specific base URL with default TLS.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a chat question and stream the answer.
    ///
    /// `POST /api/chat/chatbot`. On a success status the response body is
    /// handed to the streaming reader, which writes tokens to `sink` as
    /// they arrive. On a non-success status the body is parsed once as
    /// the structured error envelope and the reader is never invoked.
    pub async fn chat<O: OutputSink>(
        &self,
        request: &ChatRequest,
        sink: &mut O,
    ) -> GufoResult<ChatOutcome> {
        let url = format!("{}/api/chat/chatbot", self.base_url);
        debug!(%url, config_name = %request.config_name, "sending chat request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        read_chat_stream(response.bytes_stream(), sink).await
    }

    /// List all chat rooms. `GET /api/chat/chatrooms`.
    pub async fn chat_rooms(&self) -> GufoResult<Vec<ChatRoom>> {
        let url = format!("{}/api/chat/chatrooms", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::unwrap_envelope(response).await
    }

    /// List the chat logs of a room. `GET /api/chat/chatrooms/{id}/chatlogs`.
    pub async fn chat_logs(&self, chat_room_id: i64) -> GufoResult<Vec<ChatLog>> {
        let url = format!(
            "{}/api/chat/chatrooms/{}/chatlogs",
            self.base_url, chat_room_id
        );
        let response = self.client.get(&url).send().await?;
        Self::unwrap_envelope(response).await
    }

    /// Rate a chat log. `POST /api/chat/chat_logs/{id}/rating`.
    ///
    /// Returns the server's confirmation message; the envelope carries no
    /// payload for this endpoint.
    pub async fn rate_chat_log(
        &self,
        chat_log_id: i64,
        request: &RatingRequest,
    ) -> GufoResult<String> {
        let url = format!(
            "{}/api/chat/chat_logs/{}/rating",
            self.base_url, chat_log_id
        );
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let status = response.status().as_u16();
        let envelope: ApiResponse<serde_json::Value> = response.json().await?;
        if envelope.error {
            return Err(GufoError::Api {
                status,
                code: envelope.code,
                message: envelope.message,
            });
        }
        Ok(envelope.message)
    }

    /// Fetch the rating of a chat log. `GET /api/chat/chat_logs/{id}/rating`.
    pub async fn chat_log_rating(&self, chat_log_id: i64) -> GufoResult<ChatLogRating> {
        let url = format!(
            "{}/api/chat/chat_logs/{}/rating",
            self.base_url, chat_log_id
        );
        let response = self.client.get(&url).send().await?;
        Self::unwrap_envelope(response).await
    }

    /// The id of the first chat log in a room, absent on any failure.
    ///
    /// A lookup convenience for the demo driver: failures are logged and
    /// collapsed to `None` so dependent steps are simply skipped.
    pub async fn first_chat_log_id(&self, chat_room_id: i64) -> Option<i64> {
        match self.chat_logs(chat_room_id).await {
            Ok(logs) => logs.first().map(|log| log.id),
            Err(e) => {
                warn!(error = %e, chat_room_id, "chat log lookup failed");
                None
            }
        }
    }

    /// Check status, unwrap the envelope, and extract `json_data`.
    async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> GufoResult<T> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let status = response.status().as_u16();
        let envelope: ApiResponse<T> = response.json().await?;
        if envelope.error {
            return Err(GufoError::Api {
                status,
                code: envelope.code,
                message: envelope.message,
            });
        }
        let code = envelope.code;
        envelope.json_data.ok_or_else(|| GufoError::Api {
            status,
            code,
            message: "response envelope carried no json_data".to_string(),
        })
    }

    /// Generic error path for non-success statuses.
    ///
    /// Tries the structured envelope first, falls back to the raw status
    /// when the body is not parseable.
    async fn error_from_response(response: reqwest::Response) -> GufoError {
        let status = response.status().as_u16();
        match response.json::<ApiResponse<serde_json::Value>>().await {
            Ok(envelope) => GufoError::Api {
                status,
                code: envelope.code,
                message: envelope.message,
            },
            Err(_) => GufoError::Status(status),
        }
    }
}
