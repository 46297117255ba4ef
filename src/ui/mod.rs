//! Terminal rendering.
//!
//! All drawing is immediate-mode ratatui: every frame the views project
//! the current [`App`](crate::app::App) state into widgets. Nothing in
//! here mutates application state.
//!
//! - [`login`]: centered sign-in card with inline warning
//! - [`dashboard`]: rolling line charts, status panels, logout modal
//! - [`common`]: header bar, status bar, help overlay
//! - [`theme`]: colors and styles with terminal auto-detection

pub mod common;
pub mod dashboard;
pub mod login;
pub mod theme;

pub use theme::Theme;
