//! Wire types for the GufoRAG REST API.
//!
//! All non-streamed endpoints wrap their payload in the [`ApiResponse`]
//! envelope. Unknown fields are ignored everywhere so protocol additions
//! never break the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `POST /api/chat/chatbot`.
///
/// `chat_room_id` and `chat_log_id` are serialized as explicit nulls when
/// absent; null means "create a new room / a new log".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub chat_room_id: Option<i64>,
    pub chat_log_id: Option<i64>,
    pub human_content: String,
    pub config_name: String,
    pub user_id: Option<String>,
}

impl ChatRequest {
    /// Create a request that starts a new chat room.
    pub fn new(question: impl Into<String>, config_name: impl Into<String>) -> Self {
        Self {
            chat_room_id: None,
            chat_log_id: None,
            human_content: question.into(),
            config_name: config_name.into(),
            user_id: None,
        }
    }

    /// Continue an existing room, optionally branching from a specific log.
    pub fn with_room(mut self, chat_room_id: i64, chat_log_id: Option<i64>) -> Self {
        self.chat_room_id = Some(chat_room_id);
        self.chat_log_id = chat_log_id;
        self
    }

    /// Attach a user id.
    pub fn with_user(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }
}

/// Envelope wrapping every non-streamed API response.
///
/// The path-form default on `json_data` keeps serde's derive from
/// inferring a `T: Default` bound; the payload type only ever needs
/// `Deserialize`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    #[serde(default = "Option::default")]
    pub json_data: Option<T>,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub http_status: i32,
}

/// A chat room as listed by `GET /api/chat/chatrooms`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRoom {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub chat_logs_count: i64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// One persisted question/answer turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatLog {
    pub id: i64,
    #[serde(default)]
    pub chat_room_id: i64,
    #[serde(default)]
    pub previous_chat_log_id: Option<i64>,
    #[serde(default)]
    pub human_content: String,
    #[serde(default)]
    pub ai_content: Option<String>,
    #[serde(default = "Utc::now")]
    pub human_time: DateTime<Utc>,
    #[serde(default)]
    pub ai_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub suggest_questions: Option<Vec<String>>,
    #[serde(default)]
    pub search_results: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub is_coding: bool,
    #[serde(default)]
    pub query_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub query_end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub question: Option<String>,
}

impl ChatLog {
    /// The AI answer truncated to `max_chars` characters for display.
    pub fn ai_preview(&self, max_chars: usize) -> String {
        let content = self.ai_content.as_deref().unwrap_or("");
        let preview: String = content.chars().take(max_chars).collect();
        if content.chars().count() > max_chars {
            format!("{}...", preview)
        } else {
            preview
        }
    }
}

/// Request body for `POST /api/chat/chat_logs/{id}/rating`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingRequest {
    pub rating_type: String,
    pub feedback: Option<String>,
}

impl RatingRequest {
    pub fn positive(feedback: impl Into<String>) -> Self {
        Self {
            rating_type: "positive".to_string(),
            feedback: Some(feedback.into()),
        }
    }

    pub fn negative(feedback: impl Into<String>) -> Self {
        Self {
            rating_type: "negative".to_string(),
            feedback: Some(feedback.into()),
        }
    }
}

/// Rating info returned by `GET /api/chat/chat_logs/{id}/rating`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatLogRating {
    #[serde(default)]
    pub rating_type: Option<String>,
    #[serde(default)]
    pub rating_feedback: Option<String>,
    #[serde(default)]
    pub rating_time: Option<String>,
    #[serde(default)]
    pub has_rating: bool,
}
