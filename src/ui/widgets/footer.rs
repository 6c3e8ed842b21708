// src/ui/widgets/footer.rs

use crate::app::App;
use crate::core::routes::Route;
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::new().bold().fg(Color::Yellow))
}

/// Renders the footer: the last error (if any) above the available actions.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    if let Some(error) = app.status_error() {
        let status = Line::from(vec![
            Span::styled(format!("Error: {}", error), Style::default().fg(Color::Red)),
            Span::raw("  (press "),
            key("R"),
            Span::raw(" to retry)"),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);
    }

    let mut spans = match app.navigator.route() {
        _ if app.modal.is_some() => vec![key("Esc"), Span::raw(" close")],
        Route::Dashboard => vec![key("R"), Span::raw("efresh, ")],
        Route::Scans => vec![key("↑ ↓"), Span::raw(" select, "), key("← →"), Span::raw(" page, ")],
        Route::ScanConfigs => vec![
            key("Enter"),
            Span::raw(" details, "),
            key("N"),
            Span::raw("ew, "),
            key("E"),
            Span::raw("dit, "),
            key("D"),
            Span::raw("elete, "),
        ],
        Route::ScanConfigDetail(_) => vec![key("Enter"), Span::raw(" see all scans, "), key("Esc"), Span::raw(" back, ")],
    };
    if app.modal.is_none() {
        spans.extend([key("L"), Span::raw("ogs, "), key("Q"), Span::raw("uit")]);
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(footer, chunks[1]);
}
