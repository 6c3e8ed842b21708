// src/ui/views/dashboard.rs

use crate::core::api::Endpoint;
use crate::core::fetch::{FetchState, Loadable, RefreshToken};
use crate::core::models::{ListResponse, Scan};
use crate::core::requests::Request;
use crate::ui::widgets::{counter::render_counter, empty_display::render_empty_display, loader::render_loader};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::info;

/// Count widgets across the top of the dashboard, in display order.
const COUNTERS: [Endpoint; 3] = [Endpoint::Scans, Endpoint::Assets, Endpoint::Findings];

/// Analytic panels below the counters. Their content is provided by the
/// backend's dashboard endpoints; here they are titled placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum AnalyticWidget {
    #[strum(to_string = "Riskiest regions")]
    RiskiestRegions,
    #[strum(to_string = "Findings trends")]
    FindingsTrends,
    #[strum(to_string = "Riskiest assets")]
    RiskiestAssets,
    #[strum(to_string = "Findings impact")]
    FindingsImpact,
}

impl AnalyticWidget {
    fn caption(self) -> &'static str {
        match self {
            AnalyticWidget::RiskiestRegions => "Regions ranked by the findings of their assets.",
            AnalyticWidget::FindingsTrends => "Findings over time, per scan family.",
            AnalyticWidget::RiskiestAssets => "Assets with the most severe findings.",
            AnalyticWidget::FindingsImpact => "Findings that affect the most assets.",
        }
    }
}

pub struct DashboardView {
    scans: Loadable<ListResponse<Scan>>,
    counters: Vec<(Endpoint, Loadable<u64>)>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            scans: Loadable::default(),
            counters: COUNTERS.iter().map(|endpoint| (*endpoint, Loadable::default())).collect(),
        }
    }

    /// Starts over: checks whether any scan exists. Counters are fetched only
    /// once the answer is yes.
    pub fn mount(&mut self) -> Vec<Request> {
        for (_, counter) in &mut self.counters {
            counter.reset();
        }
        vec![Request::DashboardScans { token: self.scans.begin() }]
    }

    pub fn on_scans(&mut self, token: RefreshToken, result: Result<ListResponse<Scan>, String>) -> Vec<Request> {
        if !self.scans.resolve(token, result) {
            return Vec::new();
        }
        match self.scans.state() {
            FetchState::Success(page) if !page.is_empty() => self
                .counters
                .iter_mut()
                .map(|(endpoint, counter)| Request::Count { token: counter.begin(), endpoint: *endpoint })
                .collect(),
            FetchState::Success(_) => {
                info!("No scans yet, showing empty dashboard.");
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub fn on_count(&mut self, token: RefreshToken, endpoint: Endpoint, result: Result<u64, String>) {
        if let Some((_, counter)) = self.counters.iter_mut().find(|(e, _)| *e == endpoint) {
            counter.resolve(token, result);
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.scans
            .state()
            .error()
            .or_else(|| self.counters.iter().find_map(|(_, counter)| counter.state().error()))
    }

    /// Loader while pending, nothing on error, the empty-scans placeholder when
    /// there are no scans, the widgets otherwise.
    pub fn render(&self, frame: &mut Frame, area: Rect, spinner_frame: usize) {
        match self.scans.state() {
            FetchState::Idle => {}
            FetchState::Loading => render_loader(frame, area, spinner_frame),
            FetchState::Failure(_) => {}
            FetchState::Success(page) if page.is_empty() => render_empty_display(
                frame,
                area,
                "No scans detected",
                &["Start your first scan to see your VM's issues.", "Press 3 to open scan configurations."],
                None,
            ),
            FetchState::Success(_) => self.render_widgets(frame, area, spinner_frame),
        }
    }

    fn render_widgets(&self, frame: &mut Frame, area: Rect, spinner_frame: usize) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let counter_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, self.counters.len() as u32); self.counters.len()])
            .split(rows[0]);
        for ((endpoint, counter), counter_area) in self.counters.iter().zip(counter_areas.iter()) {
            render_counter(frame, *counter_area, &endpoint.to_string(), counter.state(), spinner_frame);
        }

        let widget_areas: Vec<Rect> = rows[1..]
            .iter()
            .flat_map(|row| {
                Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(*row)
                    .to_vec()
            })
            .collect();
        for (widget, widget_area) in AnalyticWidget::iter().zip(widget_areas) {
            let panel = Paragraph::new(Line::from(widget.caption()).style(Style::default().fg(Color::DarkGray)))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(widget.to_string()));
            frame.render_widget(panel, widget_area);
        }
    }
}
