// src/ui/views/configs_table.rs

use crate::app::Effect;
use crate::core::display::{format_date, format_tags, is_scheduled, scan_types_display, scope_lines};
use crate::core::fetch::RefreshToken;
use crate::core::modal::{ModalDispatch, ModalPayload};
use crate::core::models::{ListResponse, ScanConfig};
use crate::core::requests::Request;
use crate::core::routes::child_path;
use crate::ui::widgets::empty_display::render_empty_display;
use crate::ui::widgets::expandable::expandable_lines;
use crate::ui::widgets::table::{CellContext, Column, PaginatedTable};
use chrono::{DateTime, Utc};
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use tracing::info;

const TABLE_TITLE: &str = "scan configurations";

// --- Column renderers ---

fn name_cell(config: &ScanConfig, _: &CellContext) -> Text<'static> {
    Text::from(config.name.clone())
}

fn scope_cell(config: &ScanConfig, context: &CellContext) -> Text<'static> {
    Text::from(expandable_lines(&scope_lines(&config.scope), context.expanded))
}

fn excluded_instances_cell(config: &ScanConfig, context: &CellContext) -> Text<'static> {
    Text::from(expandable_lines(&format_tags(&config.scope.instance_tag_exclusion), context.expanded))
}

fn included_instances_cell(config: &ScanConfig, context: &CellContext) -> Text<'static> {
    Text::from(expandable_lines(&format_tags(&config.scope.instance_tag_selector), context.expanded))
}

fn time_config_cell(config: &ScanConfig, context: &CellContext) -> Text<'static> {
    let operation_time = config.scheduled.operation_time;
    let mut lines = Vec::new();
    if is_scheduled(operation_time, context.now) {
        lines.push(Line::from("Scheduled".bold()));
    }
    lines.push(Line::from(format_date(operation_time)));
    Text::from(lines)
}

fn scan_types_cell(config: &ScanConfig, _: &CellContext) -> Text<'static> {
    Text::from(scan_types_display(&config.scan_families_config))
}

fn columns() -> Vec<Column<ScanConfig>> {
    vec![
        Column { header: "Name", width: Constraint::Percentage(16), cell: name_cell },
        Column { header: "Scope", width: Constraint::Percentage(20), cell: scope_cell },
        Column { header: "Excluded instances", width: Constraint::Percentage(16), cell: excluded_instances_cell },
        Column { header: "Included instances", width: Constraint::Percentage(16), cell: included_instances_cell },
        Column { header: "Time config", width: Constraint::Percentage(14), cell: time_config_cell },
        Column { header: "Scan types", width: Constraint::Percentage(18), cell: scan_types_cell },
    ]
}

/// Paginated list of scan configurations with row actions.
pub struct ConfigsTableView {
    table: PaginatedTable<ScanConfig>,
    modal: ModalDispatch,
}

impl ConfigsTableView {
    pub fn new(page_size: usize, modal: ModalDispatch) -> Self {
        Self { table: PaginatedTable::new(columns(), TABLE_TITLE, page_size), modal }
    }

    pub fn mount(&mut self) -> Vec<Request> {
        vec![self.fetch()]
    }

    fn fetch(&mut self) -> Request {
        let (token, query) = self.table.refresh();
        Request::ScanConfigsPage { token, query }
    }

    pub fn on_page(&mut self, token: RefreshToken, result: Result<ListResponse<ScanConfig>, String>) -> Vec<Request> {
        if !self.table.resolve(token, result) || !self.table.overshot() {
            return Vec::new();
        }
        self.table
            .previous_page()
            .map(|(token, query)| Request::ScanConfigsPage { token, query })
            .into_iter()
            .collect()
    }

    /// Called once a delete went through: bumps the refresh token so the
    /// current page is fetched again.
    pub fn on_delete(&mut self) -> Request {
        info!("Scan configuration deleted, refreshing table.");
        self.fetch()
    }

    #[cfg(test)]
    pub fn refresh_token(&self) -> RefreshToken {
        self.table.refresh_token()
    }

    pub fn error(&self) -> Option<&str> {
        self.table.fetch_state().error()
    }

    pub fn selected(&self) -> Option<&ScanConfig> {
        self.table.selected()
    }

    pub fn new_configuration(&self) {
        self.modal.open(ModalPayload::NewScanConfig);
    }

    /// Destination of a row click: the record's id below the current path.
    pub fn on_line_click(&self, pathname: &str) -> Option<String> {
        self.table.selected().map(|config| child_path(pathname, &config.id))
    }

    pub fn handle_key(&mut self, code: KeyCode, pathname: &str) -> Vec<Effect> {
        match code {
            KeyCode::Up => self.table.select_previous(),
            KeyCode::Down => self.table.select_next(),
            KeyCode::Left => {
                if let Some((token, query)) = self.table.previous_page() {
                    return vec![Effect::Fetch(Request::ScanConfigsPage { token, query })];
                }
            }
            KeyCode::Right => {
                if let Some((token, query)) = self.table.next_page() {
                    return vec![Effect::Fetch(Request::ScanConfigsPage { token, query })];
                }
            }
            KeyCode::Char('x') => self.table.toggle_expanded(),
            KeyCode::Enter => {
                if let Some(path) = self.on_line_click(pathname) {
                    return vec![Effect::Navigate(path)];
                }
            }
            KeyCode::Char('n') => self.new_configuration(),
            KeyCode::Char('e') => {
                if let Some(config) = self.table.selected() {
                    self.modal.open(ModalPayload::EditScanConfig(config.clone()));
                }
            }
            KeyCode::Char('d') => {
                if let Some(config) = self.table.selected() {
                    self.modal.open(ModalPayload::ConfirmDelete(config.clone()));
                }
            }
            _ => {}
        }
        Vec::new()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, now: DateTime<Utc>, spinner_frame: usize) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let new_button = Line::from(vec![
            Span::styled("[N]", Style::new().bold().fg(Color::Yellow)),
            Span::raw("ew scan configuration   "),
            Span::styled("[E]", Style::new().bold().fg(Color::Yellow)),
            Span::raw("dit   "),
            Span::styled("[D]", Style::new().bold().fg(Color::Yellow)),
            Span::raw("elete   "),
            Span::styled("[X]", Style::new().bold().fg(Color::Yellow)),
            Span::raw(" expand row"),
        ]);
        frame.render_widget(new_button, chunks[0]);

        self.table.render(frame, chunks[1], now, spinner_frame, |frame, area| {
            render_empty_display(
                frame,
                area,
                "New scan configuration",
                &["No scan configurations detected.", "Create your first scan configuration to see your VM's issues."],
                Some('n'),
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::modal::ModalCommand;
    use crate::core::models::{ScanFamilyConfig, ScanScope, Schedule, Tag};
    use crate::ui::test_support::{render_to_string, text_of};
    use chrono::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn config(id: &str, operation_time: Option<DateTime<Utc>>) -> ScanConfig {
        ScanConfig {
            id: id.to_string(),
            name: format!("config {id}"),
            scope: ScanScope {
                all: true,
                instance_tag_selector: vec![
                    Tag { key: "app".into(), value: "my-app1".into() },
                    Tag { key: "app".into(), value: "my-app2".into() },
                ],
                ..Default::default()
            },
            scan_families_config: [
                ("sast".to_string(), ScanFamilyConfig { enabled: true }),
                ("dast".to_string(), ScanFamilyConfig { enabled: false }),
            ]
            .into_iter()
            .collect(),
            scheduled: Schedule { operation_time },
        }
    }

    fn view_with(configs: Vec<ScanConfig>) -> (ConfigsTableView, UnboundedReceiver<ModalCommand>) {
        let (dispatch, rx) = ModalDispatch::channel();
        let mut view = ConfigsTableView::new(10, dispatch);
        let token = match view.mount().pop() {
            Some(Request::ScanConfigsPage { token, .. }) => token,
            other => panic!("unexpected request {other:?}"),
        };
        let count = configs.len() as u64;
        view.on_page(token, Ok(ListResponse { count: Some(count), items: configs }));
        (view, rx)
    }

    fn context(expanded: bool) -> CellContext {
        CellContext { now: Utc::now(), expanded }
    }

    #[test]
    fn future_operation_time_is_labelled_scheduled() {
        let future = config("a", Some(Utc::now() + Duration::hours(2)));
        let past = config("b", Some(Utc::now() - Duration::hours(2)));

        assert!(text_of(&time_config_cell(&future, &context(false))).contains("Scheduled"));
        assert!(!text_of(&time_config_cell(&past, &context(false))).contains("Scheduled"));
    }

    #[test]
    fn scan_types_cell_lists_only_enabled_families() {
        assert_eq!(text_of(&scan_types_cell(&config("a", None), &context(false))), "Sast");
    }

    #[test]
    fn instance_lists_expand_on_demand() {
        let config = config("a", None);
        assert_eq!(text_of(&included_instances_cell(&config, &context(false))), "app:my-app1\n+1 more");
        assert_eq!(text_of(&included_instances_cell(&config, &context(true))), "app:my-app1\napp:my-app2");
        assert_eq!(text_of(&excluded_instances_cell(&config, &context(false))), "");
    }

    #[test]
    fn row_click_navigates_below_current_path() {
        let (mut view, _rx) = view_with(vec![config("abc", None)]);

        assert_eq!(view.on_line_click("/configs").as_deref(), Some("/configs/abc"));
        match view.handle_key(KeyCode::Enter, "/configs").as_slice() {
            [Effect::Navigate(path)] => assert_eq!(path, "/configs/abc"),
            other => panic!("unexpected effects {other:?}"),
        }
    }

    #[test]
    fn delete_refetches_with_new_token() {
        let (mut view, _rx) = view_with(vec![config("abc", None)]);
        let before = view.refresh_token();

        match view.on_delete() {
            Request::ScanConfigsPage { token, query } => {
                assert_ne!(token, before);
                assert_eq!(token, view.refresh_token());
                assert_eq!(query.skip, Some(0));
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn actions_dispatch_modal_commands() {
        let (mut view, mut rx) = view_with(vec![config("abc", None)]);

        view.handle_key(KeyCode::Char('n'), "/configs");
        view.handle_key(KeyCode::Char('d'), "/configs");

        assert_eq!(rx.try_recv().ok(), Some(ModalCommand::SetModalDisplayData(ModalPayload::NewScanConfig)));
        assert_eq!(
            rx.try_recv().ok(),
            Some(ModalCommand::SetModalDisplayData(ModalPayload::ConfirmDelete(config("abc", None))))
        );
    }

    #[test]
    fn empty_table_offers_new_configuration() {
        let (mut view, _rx) = view_with(vec![]);
        let screen = render_to_string(120, 20, |frame| {
            let area = frame.area();
            view.render(frame, area, Utc::now(), 0);
        });
        assert!(screen.contains("No scan configurations detected."));
        assert!(view.on_line_click("/configs").is_none());
    }

    #[test]
    fn rows_render_columns() {
        let (mut view, _rx) = view_with(vec![config("abc", Some(Utc::now() + Duration::days(1)))]);
        let screen = render_to_string(160, 20, |frame| {
            let area = frame.area();
            view.render(frame, area, Utc::now(), 0);
        });
        assert!(screen.contains("config abc"));
        assert!(screen.contains("Scheduled"));
        assert!(screen.contains("Sast"));
        assert!(screen.contains("All"));
    }
}
