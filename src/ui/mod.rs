// src/ui/mod.rs

use crate::app::App;
use crate::core::routes::Route;
use chrono::Utc;
use ratatui::prelude::*;

mod layout;
pub mod views;
pub mod widgets;

/// Draws one frame: header, the current route's view, optional log panel,
/// footer, and the modal on top of everything.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let layout = layout::create_layout(area, app.show_logs);
    let now = Utc::now();

    widgets::header::render_header(frame, app.navigator.route(), app.navigator.pathname(), layout.header);

    match app.navigator.route().clone() {
        Route::Dashboard => app.dashboard.render(frame, layout.content, app.spinner_frame),
        Route::Scans => app.scans.render(frame, layout.content, now, app.spinner_frame),
        Route::ScanConfigs => app.configs.render(frame, layout.content, now, app.spinner_frame),
        Route::ScanConfigDetail(_) => {
            if let Some(detail) = &app.detail {
                detail.render(frame, layout.content, app.spinner_frame);
            }
        }
    }

    if app.show_logs {
        widgets::log_view::render_log_view(frame, app, layout.log_panel);
    }
    widgets::footer::render_footer(frame, app, layout.footer);

    if let Some(payload) = &app.modal {
        widgets::modal_popup::render_modal(frame, payload, area);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{Terminal, backend::TestBackend, prelude::*};

    /// Draws into an in-memory terminal and returns the screen, one line per row.
    pub fn render_to_string(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        terminal.draw(draw).expect("draw");
        let buffer = terminal.backend().buffer();
        let mut screen = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                screen.push_str(buffer[(x, y)].symbol());
            }
            screen.push('\n');
        }
        screen
    }

    /// Plain text of a `Text`, lines joined with `\n`.
    pub fn text_of(text: &Text) -> String {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
