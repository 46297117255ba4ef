// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # hearthwatch
//!
//! A terminal dashboard (and library) for smart-house sensor telemetry.
//!
//! The dashboard signs a user in against a configured auth service,
//! subscribes to four realtime channels (humidity, temperature, gas
//! warning, light sensor), keeps a bounded rolling history per metric
//! mirrored to persistent storage, and renders two line charts plus two
//! status indicators.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal │ │
//! │  │ (state) │    │ (buffers)│    │(render) │    │          │ │
//! │  └──┬───┬──┘    └────┬─────┘    └─────────┘    └──────────┘ │
//! │     │   │            │ mirrored                              │
//! │     │   │            ▼                                       │
//! │     │   │       SnapshotStore (file | memory)                │
//! │     │   ▼                                                    │
//! │     │  ┌─────────┐                                           │
//! │     │  │  auth   │◀── ConfigAuth, SessionContext, Guard      │
//! │     │  └─────────┘                                           │
//! │     ▼                                                        │
//! │  ┌─────────┐                                                 │
//! │  │  feed   │◀── FileSource | StreamSource | ChannelSource    │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, route navigation, feed dispatch
//! - **[`auth`]**: Session sign-in/restore/sign-out and the route guard
//! - **[`feed`]**: Feed source abstraction ([`FeedSource`] trait) with
//!   implementations for file polling, TCP streams, and channel input,
//!   plus explicit per-channel subscription handles
//! - **[`data`]**: Bounded metric buffers, binary statuses, the snapshot
//!   store seam, and the pure chart projection
//! - **[`ui`]**: Terminal rendering using ratatui - login card, charts,
//!   status panels, overlays, theme support
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll a JSON file of current sensor values
//! hearthwatch --file sensors.json
//!
//! # Receive events over TCP
//! hearthwatch --connect localhost:9090
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use hearthwatch::auth::ConfigAuth;
//! use hearthwatch::data::MemoryStore;
//! use hearthwatch::{App, ChannelSource};
//!
//! // Create a channel for pushing decoded feed events
//! let (tx, source) = ChannelSource::create("rtdb://smart-house");
//!
//! let auth = ConfigAuth::with_accounts([("user@example.com", "hunter2")]);
//! let app = App::new(
//!     Box::new(source),
//!     Box::new(MemoryStore::new()),
//!     Box::new(auth),
//! );
//! ```

pub mod app;
pub mod auth;
pub mod data;
pub mod events;
pub mod feed;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Route};
pub use auth::{AuthError, AuthService, Session, SessionContext, SessionGuard};
pub use data::{BinaryStatus, ChartSeries, MetricBuffer, Reading, SnapshotStore, SERIES_CAPACITY};
pub use feed::{Channel, ChannelSource, FeedEvent, FeedSource, FileSource, StreamSource};
