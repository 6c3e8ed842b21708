// src/ui/widgets/loader.rs

use ratatui::{layout::Flex, prelude::*, widgets::Paragraph};

pub const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Centered spinner shown while a fetch is in flight.
pub fn render_loader(frame: &mut Frame, area: Rect, spinner_frame: usize) {
    let spinner_char = SPINNER_CHARS[spinner_frame % SPINNER_CHARS.len()];
    let line = Line::from(vec![
        Span::styled(format!("{} ", spinner_char), Style::default().fg(Color::Cyan)),
        Span::raw("Loading..."),
    ]);
    let [middle] = Layout::vertical([Constraint::Length(1)]).flex(Flex::Center).areas(area);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), middle);
}
