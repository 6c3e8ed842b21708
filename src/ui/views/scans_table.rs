// src/ui/views/scans_table.rs

use crate::app::Effect;
use crate::core::display::{EMPTY_VALUE, format_date};
use crate::core::fetch::RefreshToken;
use crate::core::models::{ListResponse, Scan};
use crate::core::requests::Request;
use crate::ui::widgets::empty_display::render_empty_display;
use crate::ui::widgets::table::{CellContext, Column, PaginatedTable};
use chrono::{DateTime, Utc};
use crossterm::event::KeyCode;
use ratatui::prelude::*;

fn name_cell(scan: &Scan, _: &CellContext) -> Text<'static> {
    Text::from(scan.name.clone().unwrap_or_else(|| scan.id.clone()))
}

fn config_cell(scan: &Scan, _: &CellContext) -> Text<'static> {
    Text::from(scan.scan_config.as_ref().map_or(EMPTY_VALUE.to_string(), |config| config.id.clone()))
}

fn state_cell(scan: &Scan, _: &CellContext) -> Text<'static> {
    let state = scan.state.clone().unwrap_or_else(|| EMPTY_VALUE.to_string());
    let color = match state.as_str() {
        "Done" => Color::Green,
        "Failed" | "Aborted" => Color::Red,
        "InProgress" | "Pending" => Color::Cyan,
        _ => Color::Reset,
    };
    Text::from(Span::styled(state, Style::default().fg(color)))
}

fn started_cell(scan: &Scan, _: &CellContext) -> Text<'static> {
    Text::from(format_date(scan.start_time))
}

fn ended_cell(scan: &Scan, _: &CellContext) -> Text<'static> {
    Text::from(format_date(scan.end_time))
}

/// Read-only list of scan executions.
pub struct ScansTableView {
    table: PaginatedTable<Scan>,
}

impl ScansTableView {
    pub fn new(page_size: usize) -> Self {
        let columns = vec![
            Column { header: "Name", width: Constraint::Percentage(25), cell: name_cell },
            Column { header: "Configuration", width: Constraint::Percentage(25), cell: config_cell },
            Column { header: "State", width: Constraint::Percentage(12), cell: state_cell },
            Column { header: "Started", width: Constraint::Percentage(19), cell: started_cell },
            Column { header: "Ended", width: Constraint::Percentage(19), cell: ended_cell },
        ];
        Self { table: PaginatedTable::new(columns, "scans", page_size) }
    }

    pub fn mount(&mut self) -> Vec<Request> {
        let (token, query) = self.table.refresh();
        vec![Request::ScansPage { token, query }]
    }

    pub fn on_page(&mut self, token: RefreshToken, result: Result<ListResponse<Scan>, String>) {
        self.table.resolve(token, result);
    }

    pub fn error(&self) -> Option<&str> {
        self.table.fetch_state().error()
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Vec<Effect> {
        let page = match code {
            KeyCode::Up => {
                self.table.select_previous();
                None
            }
            KeyCode::Down => {
                self.table.select_next();
                None
            }
            KeyCode::Left => self.table.previous_page(),
            KeyCode::Right => self.table.next_page(),
            _ => None,
        };
        page.map(|(token, query)| Effect::Fetch(Request::ScansPage { token, query }))
            .into_iter()
            .collect()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, now: DateTime<Utc>, spinner_frame: usize) {
        self.table.render(frame, area, now, spinner_frame, |frame, area| {
            render_empty_display(
                frame,
                area,
                "No scans detected",
                &["Scans appear here once a scan configuration has run."],
                None,
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ScanConfigRef;
    use crate::ui::test_support::render_to_string;

    fn scan(id: &str, state: &str) -> Scan {
        Scan {
            id: id.into(),
            name: None,
            scan_config: Some(ScanConfigRef { id: "cfg-1".into() }),
            state: Some(state.into()),
            start_time: None,
            end_time: None,
        }
    }

    #[test]
    fn renders_scans_with_fallback_names() {
        let mut view = ScansTableView::new(10);
        let token = match view.mount().pop() {
            Some(Request::ScansPage { token, .. }) => token,
            other => panic!("unexpected {other:?}"),
        };
        view.on_page(token, Ok(ListResponse { count: Some(1), items: vec![scan("scan-42", "Done")] }));

        let screen = render_to_string(120, 10, |frame| {
            let area = frame.area();
            view.render(frame, area, Utc::now(), 0);
        });
        assert!(screen.contains("scan-42"));
        assert!(screen.contains("cfg-1"));
        assert!(screen.contains("Done"));
    }

    #[test]
    fn paging_past_the_end_issues_no_request() {
        let mut view = ScansTableView::new(10);
        let token = match view.mount().pop() {
            Some(Request::ScansPage { token, .. }) => token,
            other => panic!("unexpected {other:?}"),
        };
        view.on_page(token, Ok(ListResponse { count: Some(1), items: vec![scan("s", "Done")] }));

        assert!(view.handle_key(KeyCode::Right).is_empty());
        assert!(view.handle_key(KeyCode::Left).is_empty());
    }
}
