//! Streaming response reader for the chat endpoint.
//!
//! Consumes the successful HTTP response body as newline-delimited SSE,
//! decodes each `data: ` payload into a [`Chunk`] and dispatches it until
//! an `end` chunk arrives or the stream closes. Answer tokens are written
//! to the output sink and flushed immediately so they appear as they
//! arrive; the transcript accumulates alongside for the final length
//! report.
//!
//! Malformed payload lines are skipped; only transport faults abort the
//! read, and then the whole call fails with no partial result.

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use tracing::{debug, warn};

use crate::error::{GufoError, GufoResult};
use crate::sink::OutputSink;
use crate::sse::{parse_chunk, parse_sse_line, ChatRoomDescriptor, Chunk, SseLine};

/// Why the read loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// An `end` chunk arrived; remaining stream data was not read.
    End,
    /// The stream closed without an `end` chunk. Normal, not an error.
    Eof,
}

/// Final state of one streamed chat exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    /// Room descriptor from the last `chat_room` chunk, if any arrived.
    pub chat_room: Option<ChatRoomDescriptor>,
    /// Concatenation of every `message` chunk's content.
    pub transcript: String,
    pub termination: Termination,
}

impl ChatOutcome {
    pub fn chat_room_id(&self) -> Option<i64> {
        self.chat_room.as_ref().map(|room| room.id)
    }

    pub fn latest_chat_log_id(&self) -> Option<i64> {
        self.chat_room
            .as_ref()
            .and_then(|room| room.latest_chat_log_id)
    }

    /// Transcript length in characters, reported at stream end.
    pub fn transcript_len(&self) -> usize {
        self.transcript.chars().count()
    }
}

/// Read a chat SSE body to completion.
///
/// `body` is the byte stream of a response whose status was already
/// checked for success; `sink` receives the interleaved console output.
/// Returns the captured room descriptor and transcript, or the transport
/// fault that interrupted the stream.
pub async fn read_chat_stream<S, E, O>(mut body: S, sink: &mut O) -> GufoResult<ChatOutcome>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Into<GufoError>,
    O: OutputSink,
{
    // Raw bytes are buffered and decoded only once a full line is
    // present, so a multi-byte character split across transport chunks
    // reassembles before decoding.
    let mut buffer: Vec<u8> = Vec::new();
    let mut transcript = String::new();
    let mut chat_room: Option<ChatRoomDescriptor> = None;

    loop {
        // Drain complete lines before asking the transport for more.
        while let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = buffer.drain(..=newline_pos).collect();
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end_matches(['\n', '\r']);
            if dispatch_line(line, sink, &mut transcript, &mut chat_room)? {
                return Ok(ChatOutcome {
                    chat_room,
                    transcript,
                    termination: Termination::End,
                });
            }
        }

        match body.next().await {
            Some(Ok(bytes)) => {
                buffer.extend_from_slice(&bytes);
            }
            Some(Err(e)) => return Err(e.into()),
            None => {
                // EOF. A final unterminated line may remain in the buffer.
                if !buffer.is_empty() {
                    let raw = std::mem::take(&mut buffer);
                    let line = String::from_utf8_lossy(&raw);
                    let line = line.trim_end_matches('\r');
                    if dispatch_line(line, sink, &mut transcript, &mut chat_room)? {
                        return Ok(ChatOutcome {
                            chat_room,
                            transcript,
                            termination: Termination::End,
                        });
                    }
                }
                return Ok(ChatOutcome {
                    chat_room,
                    transcript,
                    termination: Termination::Eof,
                });
            }
        }
    }
}

/// Handle one line. Returns `Ok(true)` when an `end` chunk terminated the
/// stream; sink write failures propagate as errors.
fn dispatch_line<O: OutputSink>(
    line: &str,
    sink: &mut O,
    transcript: &mut String,
    chat_room: &mut Option<ChatRoomDescriptor>,
) -> GufoResult<bool> {
    let payload = match parse_sse_line(line) {
        SseLine::Data(payload) => payload,
        SseLine::Blank => return Ok(false),
        SseLine::Other(line) => {
            debug!(line, "skipping non-data line");
            return Ok(false);
        }
    };

    let chunk = match parse_chunk(payload) {
        Ok(chunk) => chunk,
        Err(e) => {
            // Malformed payloads are skipped, never fatal.
            warn!(error = %e, "skipping malformed chunk line");
            return Ok(false);
        }
    };

    match chunk {
        Chunk::Message { content } => {
            sink.write_str(&content)?;
            sink.flush()?;
            transcript.push_str(&content);
        }
        Chunk::ChatRoom { data: Some(room) } => {
            sink.write_line(&format!(
                "\n[chat room] id: {}, title: {}, role: {}, model: {}",
                room.id,
                room.title.as_deref().unwrap_or("-"),
                room.role.as_deref().unwrap_or("-"),
                room.model_name.as_deref().unwrap_or("-"),
            ))?;
            *chat_room = Some(room);
        }
        Chunk::ChatRoom { data: None } => {
            debug!("chat_room chunk without data");
        }
        Chunk::End => {
            sink.write_line("\n[conversation ended]")?;
            return Ok(true);
        }
        Chunk::Error { data } => {
            let detail = data.map(|d| d.error).unwrap_or_default();
            sink.write_line(&format!("\n[error] {}", detail))?;
        }
        Chunk::Unknown => {
            debug!("ignoring unknown chunk type");
        }
    }
    Ok(false)
}
