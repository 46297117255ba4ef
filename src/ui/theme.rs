//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::BinaryStatus;
use crate::feed::Channel;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for alerting statuses (gas warning active).
    pub warning: Color,
    /// Color for nominal statuses.
    pub ok: Color,
    /// Color for dimmed/idle indicators.
    pub idle: Color,
    /// Trace color for the humidity chart.
    pub humidity: Color,
    /// Trace color for the temperature chart.
    pub temperature: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for headings.
    pub header: Style,
    /// Style for the focused input field.
    pub input_focused: Style,
    /// Style for unfocused input fields.
    pub input: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Red,
            ok: Color::Green,
            idle: Color::Gray,
            humidity: Color::Cyan,
            temperature: Color::Red,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            input_focused: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            input: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Red,
            ok: Color::Green,
            idle: Color::DarkGray,
            humidity: Color::Blue,
            temperature: Color::Red,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            input_focused: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            input: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for a binary status panel.
    ///
    /// A gas warning alerting is red; light detected is simply "on".
    pub fn status_style(&self, channel: Channel, status: BinaryStatus) -> Style {
        match (channel, status) {
            (Channel::GasWarning, BinaryStatus::Detected) => {
                Style::default().fg(self.warning).add_modifier(Modifier::BOLD)
            }
            (Channel::GasWarning, BinaryStatus::NotDetected) => Style::default().fg(self.ok),
            (_, BinaryStatus::Detected) => Style::default().fg(self.ok),
            (_, BinaryStatus::NotDetected) => Style::default().fg(self.idle),
        }
    }

    /// Trace color for a series channel's chart.
    pub fn chart_color(&self, channel: Channel) -> Color {
        match channel {
            Channel::Temperature => self.temperature,
            _ => self.humidity,
        }
    }
}
