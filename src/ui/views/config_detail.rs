// src/ui/views/config_detail.rs

use crate::app::Effect;
use crate::core::display::{EMPTY_VALUE, format_tags, scan_types_display, scope_lines};
use crate::core::fetch::{FetchState, Loadable, RefreshToken};
use crate::core::models::ScanConfig;
use crate::core::requests::Request;
use crate::core::routes;
use crate::ui::widgets::loader::render_loader;
use crossterm::event::KeyCode;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Two-pane view of one scan configuration: its settings on the left, the
/// scans it produced on the right.
pub struct ConfigDetailView {
    id: String,
    config: Loadable<ScanConfig>,
    scans_count: Loadable<u64>,
}

impl ConfigDetailView {
    /// `preloaded` is the row the user came from, when there is one; the view
    /// then skips fetching the configuration itself.
    pub fn new(id: String, preloaded: Option<ScanConfig>) -> Self {
        let config = match preloaded {
            Some(config) if config.id == id => Loadable::loaded(config),
            _ => Loadable::default(),
        };
        Self { id, config, scans_count: Loadable::default() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mount(&mut self) -> Vec<Request> {
        let mut requests = Vec::new();
        if self.config.state().data().is_none() {
            requests.push(Request::ScanConfig { token: self.config.begin(), id: self.id.clone() });
        }
        requests.push(Request::ConfigScanCount { token: self.scans_count.begin(), config_id: self.id.clone() });
        requests
    }

    /// Retry forgets preloaded data too.
    pub fn reload(&mut self) -> Vec<Request> {
        self.config.reset();
        self.mount()
    }

    pub fn on_config(&mut self, token: RefreshToken, result: Result<ScanConfig, String>) {
        self.config.resolve(token, result);
    }

    pub fn on_scans_count(&mut self, token: RefreshToken, result: Result<u64, String>) {
        self.scans_count.resolve(token, result);
    }

    pub fn error(&self) -> Option<&str> {
        self.config.state().error().or_else(|| self.scans_count.state().error())
    }

    /// "See all scans" is the only button; Enter presses it once the count is known.
    pub fn handle_key(&mut self, code: KeyCode) -> Vec<Effect> {
        match code {
            KeyCode::Enter if self.scans_count.state().data().is_some() => {
                vec![Effect::Navigate(routes::SCANS.to_string())]
            }
            _ => Vec::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner_frame: usize) {
        let config = match self.config.state() {
            FetchState::Success(config) => config,
            FetchState::Loading => {
                render_loader(frame, area, spinner_frame);
                return;
            }
            FetchState::Idle | FetchState::Failure(_) => return,
        };

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let left = Paragraph::new(configuration_lines(config))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(format!("Configuration: {}", config.name)));
        frame.render_widget(left, panes[0]);

        let right_block = Block::default().borders(Borders::ALL).title("Configuration's scans");
        let right_inner = right_block.inner(panes[1]);
        frame.render_widget(right_block, panes[1]);
        match self.scans_count.state() {
            FetchState::Loading => render_loader(frame, right_inner, spinner_frame),
            FetchState::Success(count) => {
                let button = Line::from(vec![
                    Span::styled(format!(" See all scans ({}) ", count), Style::new().bold().fg(Color::Black).bg(Color::Yellow)),
                    Span::styled("  Enter", Style::default().fg(Color::DarkGray)),
                ]);
                frame.render_widget(Paragraph::new(vec![Line::from(""), button]), right_inner);
            }
            FetchState::Idle | FetchState::Failure(_) => {}
        }
    }
}

fn section(title: &'static str, values: Vec<String>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(title.bold().fg(Color::Yellow))];
    if values.is_empty() {
        lines.push(Line::from(EMPTY_VALUE));
    } else {
        lines.extend(values.into_iter().map(Line::from));
    }
    lines.push(Line::from(""));
    lines
}

/// Left pane, derived from the configuration alone.
fn configuration_lines(config: &ScanConfig) -> Vec<Line<'static>> {
    let scan_types = scan_types_display(&config.scan_families_config);
    let mut lines = Vec::new();
    lines.extend(section("Scope", scope_lines(&config.scope)));
    lines.extend(section("Included instances", format_tags(&config.scope.instance_tag_selector)));
    lines.extend(section("Excluded instances", format_tags(&config.scope.instance_tag_exclusion)));
    lines.extend(section("Scan types", if scan_types.is_empty() { Vec::new() } else { vec![scan_types] }));
    lines
}
