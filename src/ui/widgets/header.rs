// src/ui/widgets/header.rs

use crate::core::routes::Route;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Tabs},
};

const TABS: [&str; 3] = ["1 Dashboard", "2 Scans", "3 Configurations"];

fn selected_tab(route: &Route) -> usize {
    match route {
        Route::Dashboard => 0,
        Route::Scans => 1,
        Route::ScanConfigs | Route::ScanConfigDetail(_) => 2,
    }
}

/// Top bar: one tab per top-level route, plus the current path.
pub fn render_header(frame: &mut Frame, route: &Route, pathname: &str, area: Rect) {
    let tabs = Tabs::new(TABS)
        .select(selected_tab(route))
        .highlight_style(Style::new().bold().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Clarity Console")
                .title(Line::from(pathname.to_string()).right_aligned().fg(Color::DarkGray)),
        );
    frame.render_widget(tabs, area);
}
