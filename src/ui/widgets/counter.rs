// src/ui/widgets/counter.rs

use crate::core::fetch::FetchState;
use crate::ui::widgets::loader::render_loader;
use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// A bordered box with a single big number, e.g. the total of assets.
///
/// Pending counts show the spinner; failed ones leave the box empty.
pub fn render_counter(frame: &mut Frame, area: Rect, title: &str, state: &FetchState<u64>, spinner_frame: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match state {
        FetchState::Loading => render_loader(frame, inner, spinner_frame),
        FetchState::Success(count) => {
            let value = Paragraph::new(Line::from(count.to_string().bold().fg(Color::Yellow))).alignment(Alignment::Center);
            let [middle] = Layout::vertical([Constraint::Length(1)]).flex(Flex::Center).areas(inner);
            frame.render_widget(value, middle);
        }
        FetchState::Idle | FetchState::Failure(_) => {}
    }
}
