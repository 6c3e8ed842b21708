// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions, computed once per frame.
pub struct AppLayout {
    pub header: Rect,
    pub content: Rect,
    pub log_panel: Rect,
    pub footer: Rect,
}

/// Splits the frame into header, content and footer. With `show_logs` the
/// content area gives its right third to the log panel.
///
/// # Arguments
/// * `frame_size` - The total size of the terminal frame.
/// * `show_logs` - Whether the log panel is visible.
pub fn create_layout(frame_size: Rect, show_logs: bool) -> AppLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(2)])
        .split(frame_size);

    let content_constraints = if show_logs {
        vec![Constraint::Percentage(65), Constraint::Percentage(35)]
    } else {
        vec![Constraint::Percentage(100)]
    };
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(content_constraints)
        .split(main_chunks[1]);

    AppLayout {
        header: main_chunks[0],
        content: content_chunks[0],
        log_panel: if show_logs { content_chunks[1] } else { Rect::default() },
        footer: main_chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_panel_only_takes_space_when_shown() {
        let area = Rect::new(0, 0, 100, 40);

        let hidden = create_layout(area, false);
        assert_eq!(hidden.content.width, 100);
        assert_eq!(hidden.log_panel, Rect::default());

        let shown = create_layout(area, true);
        assert_eq!(shown.content.width + shown.log_panel.width, 100);
        assert_eq!(shown.header.height, 3);
        assert_eq!(shown.footer.height, 2);
    }
}
