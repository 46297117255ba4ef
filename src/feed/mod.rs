//! Realtime feed abstraction.
//!
//! This module bridges the backend's push notifications into the data
//! model. Feeds come from different transports behind the [`FeedSource`]
//! trait - a polled JSON file, a TCP stream of newline-delimited events,
//! or an in-process channel.
//!
//! Reconnection and delivery guarantees belong to the transport; a source
//! only reports events that were actually delivered and surfaces transport
//! trouble through [`FeedSource::error`].

mod channel;
mod event;
mod file;
mod stream;
mod subscriber;

pub use channel::ChannelSource;
pub use event::{Channel, FeedEvent};
pub use file::FileSource;
pub use stream::StreamSource;
pub use subscriber::{SubscriptionId, SubscriptionSet};

use std::fmt::Debug;

/// Trait for receiving feed events from various transports.
///
/// # Example
///
/// ```
/// use hearthwatch::{ChannelSource, FeedSource};
///
/// let (tx, mut source) = ChannelSource::create("test");
/// assert!(source.poll().is_none());
/// ```
pub trait FeedSource: Send + Debug {
    /// Poll for the next delivered event.
    ///
    /// Returns `Some(event)` if an event is available, `None` otherwise.
    /// This method must be non-blocking; it is called from the UI loop.
    fn poll(&mut self) -> Option<FeedEvent>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the dashboard header.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Returns the error message if an error occurred during the last poll.
    fn error(&self) -> Option<&str>;
}
