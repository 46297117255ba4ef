//! Data models for the dashboard.
//!
//! This module owns the only real state in the application: bounded metric
//! histories and latest binary statuses, plus the projection that turns a
//! history into something a chart can render.
//!
//! ## Submodules
//!
//! - [`buffer`]: [`MetricBuffer`], the capacity-bounded FIFO reading history
//! - [`chart`]: pure projection from a series to chart labels/values
//! - [`status`]: [`BinaryStatus`] for boolean-style channels
//! - [`store`]: [`SnapshotStore`] persistence seam (file-backed or in-memory)
//!
//! ## Data flow
//!
//! ```text
//! FeedEvent (raw JSON payload)
//!        │
//!        ├─ series channel ──▶ Reading ──▶ MetricBuffer::append()
//!        │                                       │
//!        │                                       ├──▶ SnapshotStore (mirrored)
//!        │                                       └──▶ chart::project() ──▶ UI
//!        │
//!        └─ binary channel ──▶ BinaryStatus (latest value only) ──▶ UI
//! ```

pub mod buffer;
pub mod chart;
pub mod status;
pub mod store;

pub use buffer::{MetricBuffer, MetricSeries, Reading, SERIES_CAPACITY};
pub use chart::{project, ChartSeries};
pub use status::BinaryStatus;
pub use store::{FileStore, MemoryStore, SnapshotStore};
