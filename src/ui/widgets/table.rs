// src/ui/widgets/table.rs

use crate::core::api::ListQuery;
use crate::core::display::to_capitalized;
use crate::core::fetch::{FetchState, Loadable, RefreshToken};
use crate::core::models::ListResponse;
use crate::ui::widgets::loader::render_loader;
use chrono::{DateTime, Utc};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use tracing::debug;

/// Per-render inputs a cell renderer may depend on.
#[derive(Debug, Clone, Copy)]
pub struct CellContext {
    pub now: DateTime<Utc>,
    /// Whether expandable content in this row should be shown in full.
    pub expanded: bool,
}

pub type CellRenderer<T> = fn(&T, &CellContext) -> Text<'static>;

/// One column of a [`PaginatedTable`]. Sorting is not supported.
pub struct Column<T> {
    pub header: &'static str,
    pub width: Constraint,
    pub cell: CellRenderer<T>,
}

/// A server-paginated table: the rows of one page, the selection, and the
/// fetch state of the page.
pub struct PaginatedTable<T> {
    columns: Vec<Column<T>>,
    items_name: &'static str,
    page: usize,
    page_size: usize,
    data: Loadable<ListResponse<T>>,
    state: TableState,
    expanded: bool,
}

impl<T> PaginatedTable<T> {
    pub fn new(columns: Vec<Column<T>>, items_name: &'static str, page_size: usize) -> Self {
        Self {
            columns,
            items_name,
            page: 0,
            page_size: page_size.max(1),
            data: Loadable::default(),
            state: TableState::default(),
            expanded: false,
        }
    }

    /// Refetches the current page.
    pub fn refresh(&mut self) -> (RefreshToken, ListQuery) {
        let token = self.data.begin();
        debug!(items = self.items_name, page = self.page, token = token.value(), "Table refresh.");
        (token, ListQuery::page(self.page, self.page_size))
    }

    pub fn resolve(&mut self, token: RefreshToken, result: Result<ListResponse<T>, String>) -> bool {
        if !self.data.resolve(token, result) {
            return false;
        }
        let len = self.data.state().data().map_or(0, |page| page.items.len());
        let selected = match (len, self.state.selected()) {
            (0, _) => None,
            (_, Some(index)) => Some(index.min(len - 1)),
            (_, None) => Some(0),
        };
        self.state.select(selected);
        true
    }

    /// True when the current page came back empty although earlier pages hold
    /// rows, e.g. after deleting the last row of the last page.
    pub fn overshot(&self) -> bool {
        self.page > 0 && self.data.state().data().is_some_and(ListResponse::is_empty)
    }

    #[cfg(test)]
    pub fn refresh_token(&self) -> RefreshToken {
        self.data.token()
    }

    pub fn fetch_state(&self) -> &FetchState<ListResponse<T>> {
        self.data.state()
    }

    pub fn page_count(&self) -> usize {
        let total = self.data.state().data().map_or(0, ListResponse::total) as usize;
        total.div_ceil(self.page_size).max(1)
    }

    pub fn selected(&self) -> Option<&T> {
        let index = self.state.selected()?;
        self.data.state().data()?.items.get(index)
    }

    pub fn select_next(&mut self) {
        let len = self.data.state().data().map_or(0, |page| page.items.len());
        if len == 0 {
            return;
        }
        let next = self.state.selected().map_or(0, |index| (index + 1).min(len - 1));
        self.state.select(Some(next));
        self.expanded = false;
    }

    pub fn select_previous(&mut self) {
        if let Some(index) = self.state.selected() {
            self.state.select(Some(index.saturating_sub(1)));
            self.expanded = false;
        }
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn next_page(&mut self) -> Option<(RefreshToken, ListQuery)> {
        if self.page + 1 >= self.page_count() {
            return None;
        }
        self.page += 1;
        self.state.select(None);
        Some(self.refresh())
    }

    pub fn previous_page(&mut self) -> Option<(RefreshToken, ListQuery)> {
        if self.page == 0 {
            return None;
        }
        self.page -= 1;
        self.state.select(None);
        Some(self.refresh())
    }

    /// Draws the table. Loading shows the spinner, a failed fetch draws nothing,
    /// and an empty result defers to `render_empty`.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        now: DateTime<Utc>,
        spinner_frame: usize,
        render_empty: impl FnOnce(&mut Frame, Rect),
    ) {
        let page = match self.data.state() {
            FetchState::Idle | FetchState::Loading => {
                render_loader(frame, area, spinner_frame);
                return;
            }
            FetchState::Failure(_) => return,
            FetchState::Success(page) if page.is_empty() => {
                render_empty(frame, area);
                return;
            }
            FetchState::Success(page) => page,
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let selected = self.state.selected();
        let header = Row::new(self.columns.iter().map(|column| Cell::from(column.header.bold())))
            .style(Style::default().fg(Color::Yellow))
            .bottom_margin(1);
        let rows: Vec<Row> = page
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let context = CellContext { now, expanded: self.expanded && selected == Some(index) };
                let cells: Vec<Text<'static>> = self.columns.iter().map(|column| (column.cell)(item, &context)).collect();
                let height = cells.iter().map(Text::height).max().unwrap_or(1).max(1) as u16;
                Row::new(cells.into_iter().map(Cell::from)).height(height).bottom_margin(1)
            })
            .collect();
        let widths: Vec<Constraint> = self.columns.iter().map(|column| column.width).collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!("{} (↑ ↓ select, ← → page)", to_capitalized(self.items_name))))
            .row_highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        frame.render_stateful_widget(table, chunks[0], &mut self.state);

        let pagination = Line::from(vec![
            Span::raw(format!("Page {} of {}", self.page + 1, self.page_count())),
            Span::styled(format!("  |  {} {}", page.total(), self.items_name), Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(pagination).alignment(Alignment::Right), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::render_to_string;

    fn name_cell(item: &String, _: &CellContext) -> Text<'static> {
        Text::from(item.clone())
    }

    fn table() -> PaginatedTable<String> {
        PaginatedTable::new(
            vec![Column { header: "Name", width: Constraint::Percentage(100), cell: name_cell }],
            "things",
            2,
        )
    }

    fn page(count: u64, items: &[&str]) -> ListResponse<String> {
        ListResponse { count: Some(count), items: items.iter().map(|s| s.to_string()).collect() }
    }

    #[test]
    fn resolving_selects_first_row() {
        let mut table = table();
        let (token, query) = table.refresh();
        assert_eq!(query, ListQuery::page(0, 2));

        assert!(table.resolve(token, Ok(page(3, &["a", "b"]))));
        assert_eq!(table.selected().map(String::as_str), Some("a"));
        assert_eq!(table.page_count(), 2);
    }

    #[test]
    fn paging_stays_within_bounds() {
        let mut table = table();
        let (token, _) = table.refresh();
        table.resolve(token, Ok(page(3, &["a", "b"])));

        assert!(table.previous_page().is_none());
        let (token, query) = table.next_page().expect("second page exists");
        assert_eq!(query.skip, Some(2));
        table.resolve(token, Ok(page(3, &["c"])));
        assert!(table.next_page().is_none());
    }

    #[test]
    fn selection_clamps_to_page() {
        let mut table = table();
        let (token, _) = table.refresh();
        table.resolve(token, Ok(page(2, &["a", "b"])));
        table.select_next();
        table.select_next();
        assert_eq!(table.selected().map(String::as_str), Some("b"));

        let (token, _) = table.refresh();
        table.resolve(token, Ok(page(1, &["a"])));
        assert_eq!(table.selected().map(String::as_str), Some("a"));
    }

    #[test]
    fn empty_later_page_is_overshot() {
        let mut table = table();
        let (token, _) = table.refresh();
        table.resolve(token, Ok(page(3, &["a", "b"])));
        let (token, _) = table.next_page().expect("page 2");
        table.resolve(token, Ok(page(2, &[])));
        assert!(table.overshot());
    }

    #[test]
    fn renders_rows_and_pagination() {
        let mut table = table();
        let (token, _) = table.refresh();
        table.resolve(token, Ok(page(3, &["alpha", "beta"])));

        let screen = render_to_string(60, 12, |frame| {
            let area = frame.area();
            table.render(frame, area, Utc::now(), 0, |_, _| {});
        });

        assert!(screen.contains("alpha"));
        assert!(screen.contains("beta"));
        assert!(screen.contains("Page 1 of 2"));
    }

    #[test]
    fn failed_fetch_renders_nothing() {
        let mut table = table();
        let (token, _) = table.refresh();
        table.resolve(token, Err("boom".into()));

        let screen = render_to_string(40, 6, |frame| {
            let area = frame.area();
            table.render(frame, area, Utc::now(), 0, |_, _| {});
        });

        assert!(screen.trim().is_empty());
    }
}
