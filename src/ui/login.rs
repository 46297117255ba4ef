//! Login screen rendering.
//!
//! A centered sign-in card with email and password fields. Sign-in
//! failures render as a persistent inline warning under the form; the
//! form stays editable so the user can retry.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, LoginField};

const CARD_WIDTH: u16 = 46;
const CARD_HEIGHT: u16 = 12;

/// Render the login screen.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let width = CARD_WIDTH.min(area.width.saturating_sub(2));
    let height = CARD_HEIGHT.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let card = Rect::new(x, y, width, height);

    let block = Block::default()
        .title(" Login ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::vertical([
        Constraint::Length(3), // Email field
        Constraint::Length(3), // Password field
        Constraint::Length(1), // Hint
        Constraint::Min(2),    // Error alert
    ])
    .split(inner);

    render_field(
        frame,
        app,
        chunks[0],
        "Email",
        &app.login.email,
        app.login.focus == LoginField::Email,
        false,
    );
    render_field(
        frame,
        app,
        chunks[1],
        "Password",
        &app.login.password,
        app.login.focus == LoginField::Password,
        true,
    );

    let hint = Paragraph::new(" Enter to sign in")
        .style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(hint, chunks[2]);

    if let Some(ref error) = app.login.error {
        let alert = Paragraph::new(Line::from(vec![
            Span::styled("⚠ ", Style::default().fg(app.theme.warning)),
            Span::styled(error.clone(), Style::default().fg(app.theme.warning)),
        ]))
        .wrap(ratatui::widgets::Wrap { trim: true });
        frame.render_widget(alert, chunks[3]);
    }
}

fn render_field(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    masked: bool,
) {
    let style = if focused {
        app.theme.input_focused
    } else {
        app.theme.input
    };

    let shown = if masked {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let cursor = if focused { "_" } else { "" };

    let field = Paragraph::new(format!("{}{}", shown, cursor)).block(
        Block::default()
            .title(format!(" {} ", label))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(style),
    );
    frame.render_widget(field, area);
}
