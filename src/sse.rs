//! SSE line scanning and chunk decoding for the GufoRAG streaming chat API.
//!
//! The chat endpoint streams a newline-delimited SSE body where every
//! meaningful line is the literal prefix `data: ` followed by one JSON
//! object of the shape:
//!
//! ```text
//! data: {"chunk_type": "message", "content": "...", "data": null}
//! ```
//!
//! Blank keep-alive lines and anything without the prefix are skipped.

use serde::Deserialize;
use thiserror::Error;

/// The 6-character prefix that marks a payload-carrying line.
pub const DATA_PREFIX: &str = "data: ";

/// Classification of a single raw line from the streamed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine<'a> {
    /// A `data: ` line; carries the event payload after the prefix.
    Data(&'a str),
    /// An empty keep-alive line.
    Blank,
    /// Any other line; ignored by the reader.
    Other(&'a str),
}

/// Classify one line of the streamed body.
///
/// Only lines starting with the exact `data: ` prefix carry a payload.
/// The prefix match is literal: `data:x` (no space) is not a data line.
pub fn parse_sse_line(line: &str) -> SseLine<'_> {
    if line.is_empty() {
        return SseLine::Blank;
    }
    match line.strip_prefix(DATA_PREFIX) {
        Some(payload) => SseLine::Data(payload),
        None => SseLine::Other(line),
    }
}

/// One decoded SSE payload, tagged by `chunk_type`.
///
/// Tags other than the four known ones decode to [`Chunk::Unknown`] so a
/// newer server never breaks an older client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "chunk_type", rename_all = "snake_case")]
pub enum Chunk {
    /// Incremental answer text.
    Message {
        #[serde(default)]
        content: String,
    },
    /// Room descriptor, sent once per chat turn (last one wins).
    ChatRoom {
        #[serde(default)]
        data: Option<ChatRoomDescriptor>,
    },
    /// Terminal chunk; the reader stops immediately when it arrives.
    End,
    /// Server-side error detail; not terminal.
    Error {
        #[serde(default)]
        data: Option<ErrorDetail>,
    },
    /// Any unrecognized `chunk_type`.
    #[serde(other)]
    Unknown,
}

/// The `data` payload of a `chat_room` chunk.
///
/// Only `id` and `latest_chat_log_id` are control data; the rest is
/// pass-through display data. Extra fields (prompts, tuning parameters,
/// nested search results) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatRoomDescriptor {
    pub id: i64,
    #[serde(default)]
    pub latest_chat_log_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// The `data` payload of an `error` chunk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub error: String,
}

/// A `data: ` line whose payload is not a valid chunk.
///
/// The reader treats this as "skip the line and keep reading", distinct
/// from a transport fault which aborts the whole call.
#[derive(Debug, Error)]
#[error("invalid chunk payload: {0}")]
pub struct ChunkParseError(#[from] serde_json::Error);

/// Decode the payload of a `data: ` line into a [`Chunk`].
pub fn parse_chunk(payload: &str) -> Result<Chunk, ChunkParseError> {
    Ok(serde_json::from_str(payload)?)
}
