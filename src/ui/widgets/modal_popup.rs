// src/ui/widgets/modal_popup.rs

use crate::core::display::scan_types_display;
use crate::core::modal::ModalPayload;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Renders the modal on top of the existing UI.
///
/// The scan configuration wizard itself lives in the web console; here the
/// modal summarizes what would be edited and, for deletes, asks for a
/// confirmation.
///
/// # Arguments
/// * `frame` - The frame to draw on.
/// * `payload` - What the modal was opened with.
/// * `area` - The full terminal area; the popup is centered inside it.
pub fn render_modal(frame: &mut Frame, payload: &ModalPayload, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::new().bold().fg(Color::Yellow));

    let (title, border, lines) = match payload {
        ModalPayload::NewScanConfig => (
            "New scan configuration",
            Color::Cyan,
            vec![
                Line::from("Scan configurations are created with the configuration wizard."),
                Line::from(""),
                Line::from(vec![Span::raw("Press "), key("Esc"), Span::raw(" to close.")]),
            ],
        ),
        ModalPayload::EditScanConfig(config) => (
            "Edit scan configuration",
            Color::Cyan,
            vec![
                Line::from(config.name.clone().bold()),
                Line::from(format!("id: {}", config.id)),
                Line::from(format!("scan types: {}", scan_types_display(&config.scan_families_config))),
                Line::from(""),
                Line::from(vec![Span::raw("Press "), key("Esc"), Span::raw(" to close.")]),
            ],
        ),
        ModalPayload::ConfirmDelete(config) => (
            "Delete scan configuration",
            Color::Red,
            vec![
                Line::from(vec![Span::raw("Delete "), config.name.clone().bold(), Span::raw("?")]),
                Line::from("Scans that already ran are kept."),
                Line::from(""),
                Line::from(vec![key("Y"), Span::raw(" delete   "), key("N"), Span::raw(" cancel")]),
            ],
        ),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let popup_area = centered_rect(60, 40, area);
    let popup = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    // Clear first so the table underneath does not bleed through.
    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

/// A rectangle of `percent_x` by `percent_y` centered inside `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, parent);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 15);
    }
}
