//! Dashboard screen rendering.
//!
//! Two rolling line charts (humidity, temperature) over the last 15
//! readings, two binary status panels (gas warning, light sensor), and
//! the logout confirmation modal.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{ChartSeries, SERIES_CAPACITY};
use crate::feed::Channel;

/// Render the dashboard screen.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref dashboard) = app.dashboard else {
        let loading = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(loading, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Fill(2),   // Humidity chart
        Constraint::Fill(2),   // Temperature chart
        Constraint::Length(3), // Status panels
    ])
    .split(area);

    render_chart(frame, app, chunks[0], Channel::Humidity, &dashboard.chart(Channel::Humidity));
    render_chart(
        frame,
        app,
        chunks[1],
        Channel::Temperature,
        &dashboard.chart(Channel::Temperature),
    );

    let status_row = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(chunks[2]);
    render_status_panel(frame, app, status_row[0], Channel::GasWarning, dashboard.gas_warning);
    render_status_panel(frame, app, status_row[1], Channel::LightSensor, dashboard.light_sensor);
}

/// Render one rolling line chart.
fn render_chart(frame: &mut Frame, app: &App, area: Rect, channel: Channel, series: &ChartSeries) {
    let block = Block::default()
        .title(format!(" {} ", channel.title()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if series.is_empty() {
        let placeholder = Paragraph::new("Waiting for data...")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(placeholder, area);
        return;
    }

    let points = series.points();
    let latest = *series.values.last().unwrap_or(&0.0);
    let (min_val, max_val) = series.value_bounds().unwrap_or((0.0, 1.0));

    // Pad the y range so a flat series still draws mid-chart.
    let pad = ((max_val - min_val) * 0.1).max(1.0);
    let (y_min, y_max) = (min_val - pad, max_val + pad);

    let x_max = (SERIES_CAPACITY.saturating_sub(1) as f64).max(1.0);

    let color = app.theme.chart_color(channel);
    let datasets = vec![Dataset::default()
        .name(format!("{} {:.1}", channel.title(), latest))
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(color))
        .data(&points)];

    let x_labels = vec![
        Line::from(series.labels.first().cloned().unwrap_or_default()),
        Line::from(series.labels.last().cloned().unwrap_or_default()),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(x_labels)
                .style(Style::default().fg(app.theme.idle)),
        )
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels(vec![
                    Line::from(format!("{:.1}", y_min)),
                    Line::from(format!("{:.1}", y_max)),
                ])
                .style(Style::default().fg(app.theme.idle)),
        );

    frame.render_widget(chart, area);
}

/// Render one binary status panel.
fn render_status_panel(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    channel: Channel,
    status: Option<crate::data::BinaryStatus>,
) {
    let (text, style) = match status {
        Some(status) => (
            status.label(channel).to_string(),
            app.theme.status_style(channel, status),
        ),
        None => (
            "-".to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    };

    let panel = Paragraph::new(text).alignment(Alignment::Center).style(style).block(
        Block::default()
            .title(format!(" {} ", channel.title()))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(panel, area);
}

/// Render the logout confirmation modal.
pub fn render_logout_confirm(frame: &mut Frame, app: &App, area: Rect) {
    let width = 36u16.min(area.width.saturating_sub(2));
    let height = 5u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let modal = Rect::new(x, y, width, height);

    let paragraph = Paragraph::new(vec![
        Line::from("Log out of the dashboard?"),
        Line::from(""),
        Line::from(vec![
            ratatui::text::Span::styled("y", Style::default().fg(app.theme.highlight)),
            ratatui::text::Span::raw(": log out   "),
            ratatui::text::Span::styled("n", Style::default().fg(app.theme.highlight)),
            ratatui::text::Span::raw(": stay"),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(" Logout ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.highlight)),
    );

    frame.render_widget(Clear, modal);
    frame.render_widget(paragraph, modal);
}
