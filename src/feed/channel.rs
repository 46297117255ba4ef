//! Channel-based feed source.
//!
//! Receives feed events via a tokio mpsc channel. This is useful for
//! embedding the dashboard behind an existing backend client where events
//! are pushed rather than polled from a file.

use tokio::sync::mpsc;

use super::{FeedEvent, FeedSource};

/// A feed source that receives events via an in-process channel.
///
/// The producer (e.g. a realtime-database client task) sends decoded
/// events through the channel and this source hands them to the UI loop
/// one per poll, in send order.
///
/// # Example
///
/// ```
/// use hearthwatch::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("rtdb://smart-house");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::UnboundedReceiver<FeedEvent>,
    description: String,
    disconnected: bool,
}

impl ChannelSource {
    /// Create a new channel source from the receiving end of a channel.
    pub fn new(receiver: mpsc::UnboundedReceiver<FeedEvent>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            disconnected: false,
        }
    }

    /// Create a channel pair for pushing events to a ChannelSource.
    ///
    /// Returns (sender, source) where the sender is handed to the producer
    /// and the source drives the dashboard.
    pub fn create(source_description: &str) -> (mpsc::UnboundedSender<FeedEvent>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx, source_description))
    }
}

impl FeedSource for ChannelSource {
    fn poll(&mut self) -> Option<FeedEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.disconnected = true;
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        if self.disconnected {
            Some("Feed channel disconnected")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Channel;
    use serde_json::json;

    #[test]
    fn test_channel_source_delivers_in_send_order() {
        let (tx, mut source) = ChannelSource::create("test");
        assert!(source.poll().is_none());

        tx.send(FeedEvent::new(Channel::Humidity, json!(41.0))).unwrap();
        tx.send(FeedEvent::new(Channel::Temperature, json!(21.5))).unwrap();

        assert_eq!(source.poll().unwrap().channel, Channel::Humidity);
        assert_eq!(source.poll().unwrap().channel, Channel::Temperature);
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_channel_source_reports_disconnect() {
        let (tx, mut source) = ChannelSource::create("test");
        tx.send(FeedEvent::new(Channel::GasWarning, json!(true))).unwrap();
        drop(tx);

        // Buffered events still drain before the disconnect is reported.
        assert!(source.poll().is_some());
        assert!(source.error().is_none());

        assert!(source.poll().is_none());
        assert_eq!(source.error(), Some("Feed channel disconnected"));
    }

    #[test]
    fn test_channel_source_description() {
        let (_tx, source) = ChannelSource::create("rtdb://smart-house");
        assert_eq!(source.description(), "channel: rtdb://smart-house");
    }
}
