//! Newline-delimited JSON reader for the pricing stream.
//!
//! The stream host sends one JSON object per line: `PRICE` messages
//! interleaved with `HEARTBEAT` keep-alives. A line that fails to decode is
//! reported as an error for that line only; reading continues with the next.

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::Result;
use crate::decode::decode_stream_message;
use crate::error::OandaError;
use crate::models::StreamMessage;

/// An open pricing stream.
pub struct PriceStream {
    response: reqwest::Response,
    status: StatusCode,
    lines: LineBuffer,
    finished: bool,
}

impl PriceStream {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self {
            status: response.status(),
            response,
            lines: LineBuffer::default(),
            finished: false,
        }
    }

    /// Status the stream host answered with. A non-2xx stream carries a
    /// single error object instead of prices.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the next message, or `None` once the server closes the stream.
    ///
    /// An `Err(Decode)` item covers one malformed or oversized line; the
    /// caller may keep reading. An `Err(BodyRead)` item ends the stream.
    pub async fn next_message(&mut self) -> Option<Result<StreamMessage>> {
        loop {
            match self.lines.next_line() {
                Ok(Some(line)) => return Some(decode_line(&line)),
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "Dropping oversized pricing stream line");
                    return Some(Err(e));
                }
            }

            if self.finished {
                return self.lines.take_remainder().map(|line| decode_line(&line));
            }

            match self.response.chunk().await {
                Ok(Some(chunk)) => self.lines.push(&chunk),
                Ok(None) => {
                    debug!("Pricing stream closed by server");
                    self.finished = true;
                }
                Err(e) => {
                    self.finished = true;
                    self.lines.clear();
                    return Some(Err(OandaError::BodyRead(e)));
                }
            }
        }
    }
}

fn decode_line(line: &[u8]) -> Result<StreamMessage> {
    let message = decode_stream_message(line);
    if let Err(e) = &message {
        warn!(error = %e, "Failed to decode pricing stream line");
    }
    message
}

/// Longest line accepted before the buffered bytes are dropped.
const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Splits arbitrarily chunked bytes into complete lines.
#[derive(Debug)]
struct LineBuffer {
    pending: Vec<u8>,
    /// Prefix of `pending` already known to hold no newline.
    scanned: usize,
    max_line: usize,
    /// Set after an oversized line; bytes are skipped up to the next newline.
    discarding: bool,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::with_max_line(MAX_LINE_BYTES)
    }
}

impl LineBuffer {
    fn with_max_line(max_line: usize) -> Self {
        Self {
            pending: Vec::new(),
            scanned: 0,
            max_line,
            discarding: false,
        }
    }

    fn push(&mut self, bytes: &[u8]) {
        let bytes = if self.discarding {
            match bytes.iter().position(|&b| b == b'\n') {
                Some(pos) => {
                    self.discarding = false;
                    &bytes[pos + 1..]
                }
                None => return,
            }
        } else {
            bytes
        };
        self.pending.extend_from_slice(bytes);
    }

    /// Pops the next complete non-blank line, without its terminator.
    ///
    /// # Errors
    ///
    /// Returns [`OandaError::Decode`] once an unterminated line grows past
    /// the limit. Its bytes are dropped and reading resumes after the next
    /// newline.
    fn next_line(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            let Some(offset) = self.pending[self.scanned..]
                .iter()
                .position(|&b| b == b'\n')
            else {
                if self.pending.len() > self.max_line {
                    let message = format!(
                        "stream line exceeds {} bytes ({} buffered)",
                        self.max_line,
                        self.pending.len()
                    );
                    self.clear();
                    self.discarding = true;
                    return Err(OandaError::Decode(
                        <serde_json::Error as serde::de::Error>::custom(message),
                    ));
                }
                self.scanned = self.pending.len();
                return Ok(None);
            };

            let pos = self.scanned + offset;
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.scanned = 0;
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if !line.iter().all(u8::is_ascii_whitespace) {
                return Ok(Some(line));
            }
        }
    }

    /// Takes a trailing line that was never newline-terminated.
    fn take_remainder(&mut self) -> Option<Vec<u8>> {
        if self.discarding || self.pending.iter().all(u8::is_ascii_whitespace) {
            self.clear();
            return None;
        }
        self.scanned = 0;
        Some(std::mem::take(&mut self.pending))
    }

    fn clear(&mut self) {
        self.pending.clear();
        self.scanned = 0;
    }
}
