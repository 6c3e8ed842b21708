// src/ui/widgets/empty_display.rs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Call-to-action shown instead of a widget or table that has nothing to show.
///
/// # Arguments
/// * `title` - Bold heading, usually the action the user should take.
/// * `message` - One line per entry, rendered below the heading.
/// * `action_key` - The key that triggers the action, if any.
pub fn render_empty_display(frame: &mut Frame, area: Rect, title: &str, message: &[&str], action_key: Option<char>) {
    let mut lines = vec![Line::from(""), Line::from(title.to_string().bold().fg(Color::Yellow)), Line::from("")];
    lines.extend(message.iter().map(|text| Line::from(text.to_string())));
    if let Some(key) = action_key {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Press "),
            Span::styled(key.to_ascii_uppercase().to_string(), Style::new().bold().fg(Color::Yellow)),
            Span::raw(format!(" to {}.", title.to_lowercase())),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(paragraph, area);
}
