//! Streaming response aggregation
//!
//! The generation endpoint answers with a chunked body of raw completion
//! text. This module folds the arriving fragments into one growing string
//! and publishes the cumulative value after every fragment over an mpsc
//! channel, so rendering is decoupled from transport reads and observes
//! updates in exact arrival order.

use futures_util::{Stream, StreamExt};
use std::fmt::Display;
use tokio::sync::mpsc;

use crate::error::ClientError;

/// Channel capacity for cumulative-text updates. The reader task blocks on
/// a full channel rather than buffering unsent snapshots.
const UPDATE_CHANNEL_CAPACITY: usize = 32;

/// Reassembles UTF-8 text from byte fragments whose boundaries may fall
/// inside a multi-byte character.
#[derive(Debug, Default)]
pub struct TextAssembler {
    text: String,
    pending: Vec<u8>,
}

impl TextAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one fragment and get the cumulative text so far.
    ///
    /// Bytes forming an incomplete trailing character are held back until a
    /// later fragment completes them. Genuinely invalid bytes are replaced
    /// with U+FFFD, matching what a lossy text decoder would do.
    pub fn push(&mut self, fragment: &[u8]) -> &str {
        self.pending.extend_from_slice(fragment);

        match std::str::from_utf8(&self.pending) {
            Ok(valid) => {
                self.text.push_str(valid);
                self.pending.clear();
            }
            Err(e) if e.error_len().is_none() => {
                // The tail is a truncated character; keep it pending.
                let valid_up_to = e.valid_up_to();
                self.text
                    .push_str(std::str::from_utf8(&self.pending[..valid_up_to]).unwrap_or(""));
                self.pending.drain(..valid_up_to);
            }
            Err(_) => {
                self.text
                    .push_str(&String::from_utf8_lossy(&self.pending));
                self.pending.clear();
            }
        }

        &self.text
    }

    /// Cumulative text seen so far, excluding any pending partial character
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the assembler at end-of-stream. A character left truncated by
    /// transport closure is replaced rather than dropped silently.
    pub fn finish(mut self) -> String {
        if !self.pending.is_empty() {
            self.text
                .push_str(&String::from_utf8_lossy(&self.pending));
        }
        self.text
    }
}

/// Drain a fragment stream into a single string, sending the cumulative
/// text after every fragment.
///
/// Exactly one update is sent per fragment, in arrival order; nothing is
/// sent before the first fragment arrives. If the consumer drops the
/// receiver the transfer is abandoned: reading stops and whatever was
/// aggregated is returned. A mid-stream transport error surfaces as
/// [`ClientError::StreamInterrupted`] carrying the partial text.
pub async fn aggregate<S, B, E>(
    mut fragments: S,
    updates: mpsc::Sender<String>,
) -> Result<String, ClientError>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut assembler = TextAssembler::new();

    while let Some(fragment) = fragments.next().await {
        match fragment {
            Ok(bytes) => {
                let cumulative = assembler.push(bytes.as_ref());
                if updates.send(cumulative.to_string()).await.is_err() {
                    tracing::debug!("update receiver dropped, abandoning stream");
                    break;
                }
            }
            Err(e) => {
                return Err(ClientError::StreamInterrupted {
                    partial: assembler.finish(),
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(assembler.finish())
}

/// A running streamed generation: a receiver of cumulative-text updates
/// plus the background task draining the transport.
pub struct GenerationStream {
    pub updates: mpsc::Receiver<String>,
    task: tokio::task::JoinHandle<Result<String, ClientError>>,
}

impl GenerationStream {
    /// Spawn the reader task for a streaming response body.
    pub fn spawn(response: reqwest::Response) -> Self {
        let (tx, rx) = mpsc::channel(UPDATE_CHANNEL_CAPACITY);
        let task =
            tokio::spawn(async move { aggregate(Box::pin(response.bytes_stream()), tx).await });

        Self { updates: rx, task }
    }

    /// Wait for the stream to end and return the complete response text.
    ///
    /// Callers normally drain `updates` first; `finish` then resolves as
    /// soon as the transport closes.
    pub async fn finish(mut self) -> Result<String, ClientError> {
        // Drain any updates the caller did not consume so the reader task
        // never blocks on a full channel.
        while self.updates.recv().await.is_some() {}
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(ClientError::StreamInterrupted {
                partial: String::new(),
                message: format!("reader task failed: {}", e),
            }),
        }
    }
}
