//! Stream-based feed source.
//!
//! Receives feed events from an async byte stream of newline-delimited
//! JSON, one [`FeedEvent`] per line. This is the transport used for TCP
//! bridges from the realtime backend.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

use super::{FeedEvent, FeedSource};

/// A feed source that reads newline-delimited JSON events from an async
/// stream.
///
/// A background task owns the reader and forwards parsed events through a
/// channel; `poll()` drains that channel without blocking. Malformed lines
/// are skipped with the error recorded, so one bad push cannot stall the
/// feed.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use hearthwatch::StreamSource;
///
/// # tokio_test::block_on(async {
/// let data = b"{\"channel\":\"humidity\",\"payload\":42.0}\n";
/// let stream = Cursor::new(data.to_vec());
/// let source = StreamSource::spawn(stream, "example");
/// # });
/// ```
#[derive(Debug)]
pub struct StreamSource {
    receiver: mpsc::Receiver<FeedEvent>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
    /// Cached copy of the shared error so `error()` can hand out a borrow.
    error_cache: Option<String>,
}

impl StreamSource {
    /// Spawn a background task that reads from the given async reader.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(64);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        // EOF
                        *error_handle.lock().unwrap() = Some("Connection closed".to_string());
                        break;
                    }
                    Ok(_) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<FeedEvent>(trimmed) {
                            Ok(event) => {
                                *error_handle.lock().unwrap() = None;
                                if tx.send(event).await.is_err() {
                                    // Receiver dropped
                                    break;
                                }
                            }
                            Err(e) => {
                                warn!("Skipping malformed feed line: {}", e);
                                *error_handle.lock().unwrap() = Some(format!("Parse error: {}", e));
                            }
                        }
                    }
                    Err(e) => {
                        *error_handle.lock().unwrap() = Some(format!("Read error: {}", e));
                        break;
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {}", description),
            last_error,
            error_cache: None,
        }
    }
}

impl FeedSource for StreamSource {
    fn poll(&mut self) -> Option<FeedEvent> {
        // Refresh the error cache each poll; error() can then borrow it.
        self.error_cache = self.last_error.lock().unwrap().clone();

        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                if self.error_cache.is_none() {
                    self.error_cache = Some("Stream disconnected".to_string());
                }
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.error_cache.as_deref()
    }
}
