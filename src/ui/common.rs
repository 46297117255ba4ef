//! Common UI components shared across screens.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Route};
use crate::data::BinaryStatus;
use crate::feed::Channel;

/// Render the header bar.
///
/// Displays: app title, signed-in user, feed source, and a compact gas
/// indicator so an active warning is visible from any screen state.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " SMART HOUSE ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
    ];

    match app.session.current() {
        Some(session) => {
            spans.push(Span::styled(
                session.email.clone(),
                Style::default().fg(app.theme.highlight),
            ));
        }
        None => spans.push(Span::styled(
            "not signed in",
            Style::default().add_modifier(Modifier::DIM),
        )),
    }

    spans.push(Span::raw(" │ "));
    spans.push(Span::raw(app.source_description().to_string()));

    if let Some(ref dashboard) = app.dashboard {
        if let Some(status @ BinaryStatus::Detected) = dashboard.gas_warning {
            spans.push(Span::raw(" │ "));
            spans.push(Span::styled(
                "⚠ GAS",
                app.theme.status_style(Channel::GasWarning, status),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows context-sensitive controls, temporary status messages, and feed
/// errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(ref err) = app.feed_error {
        let paragraph = Paragraph::new(format!(" Feed error: {} | q:quit ", err))
            .style(Style::default().fg(app.theme.warning));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.route {
        Route::Login => "Tab:switch field Enter:sign in Esc:quit",
        Route::Dashboard => {
            if app.show_logout_confirm {
                "y/Enter:log out n/Esc:stay"
            } else {
                "l:logout ?:help q:quit"
            }
        }
    };

    let paragraph =
        Paragraph::new(format!(" {}", controls)).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current screen.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Login",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab        Switch field"),
        Line::from("  Enter      Sign in"),
        Line::from("  Esc        Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Dashboard",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  l          Log out (with confirmation)"),
        Line::from("  ?          Toggle this help"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 18u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
