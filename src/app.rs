// src/app.rs

use crate::config::Config;
use crate::core::modal::{ModalCommand, ModalDispatch, ModalPayload};
use crate::core::requests::{Request, Response};
use crate::core::routes::{self, Navigator, Route};
use crate::logging;
use crate::ui::views::{
    config_detail::ConfigDetailView, configs_table::ConfigsTableView, dashboard::DashboardView,
    scans_table::ScansTableView,
};
use crossterm::event::KeyCode;
use ratatui::widgets::ScrollbarState;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Number of log lines kept for the log panel.
const LOG_TAIL_LINES: usize = 200;
/// The open log panel rereads the file once every this many ticks.
const LOG_REFRESH_TICKS: usize = 10;

/// What a view asks the app to do after handling a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(Request),
    Navigate(String),
}

pub struct App {
    pub should_quit: bool,
    pub navigator: Navigator,
    pub dashboard: DashboardView,
    pub scans: ScansTableView,
    pub configs: ConfigsTableView,
    pub detail: Option<ConfigDetailView>,
    pub modal: Option<ModalPayload>,
    modal_dispatch: ModalDispatch,
    modal_rx: mpsc::UnboundedReceiver<ModalCommand>,
    /// Failure of a user action (e.g. a delete) that belongs to no view.
    pub action_error: Option<String>,
    pub spinner_frame: usize,
    pub show_logs: bool,
    pub log_content: Vec<String>,
    pub log_horizontal_scroll: usize,
    pub log_horizontal_scroll_state: ScrollbarState,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let (modal_dispatch, modal_rx) = ModalDispatch::channel();
        Self {
            should_quit: false,
            navigator: Navigator::default(),
            dashboard: DashboardView::new(),
            scans: ScansTableView::new(config.page_size),
            configs: ConfigsTableView::new(config.page_size, modal_dispatch.clone()),
            detail: None,
            modal: None,
            modal_dispatch,
            modal_rx,
            action_error: None,
            spinner_frame: 0,
            show_logs: false,
            log_content: Vec::new(),
            log_horizontal_scroll: 0,
            log_horizontal_scroll_state: ScrollbarState::default(),
        }
    }

    /// Opens `path` and returns the requests of its view.
    pub fn start(&mut self, path: &str) -> Vec<Request> {
        self.navigator.navigate(path);
        self.mount_current()
    }

    fn mount_current(&mut self) -> Vec<Request> {
        self.action_error = None;
        match self.navigator.route().clone() {
            Route::Dashboard => self.dashboard.mount(),
            Route::Scans => self.scans.mount(),
            Route::ScanConfigs => self.configs.mount(),
            Route::ScanConfigDetail(id) => {
                let reuse = self.detail.as_ref().is_some_and(|detail| detail.id() == id);
                if !reuse {
                    let preloaded = self.configs.selected().filter(|config| config.id == id).cloned();
                    self.detail = Some(ConfigDetailView::new(id, preloaded));
                }
                self.detail.as_mut().map(ConfigDetailView::mount).unwrap_or_default()
            }
        }
    }

    fn navigate(&mut self, path: &str) -> Vec<Request> {
        if self.navigator.navigate(path) { self.mount_current() } else { Vec::new() }
    }

    fn apply(&mut self, effects: Vec<Effect>) -> Vec<Request> {
        let mut requests = Vec::new();
        for effect in effects {
            match effect {
                Effect::Fetch(request) => requests.push(request),
                Effect::Navigate(path) => requests.extend(self.navigate(&path)),
            }
        }
        requests
    }

    /// Handles one key press and returns the requests it triggered.
    pub fn handle_key(&mut self, code: KeyCode) -> Vec<Request> {
        let requests = if self.modal.is_some() {
            self.handle_modal_key(code)
        } else {
            self.handle_route_key(code)
        };
        self.drain_modal_commands();
        requests
    }

    fn handle_modal_key(&mut self, code: KeyCode) -> Vec<Request> {
        let confirm_id = match &self.modal {
            Some(ModalPayload::ConfirmDelete(config)) => Some(config.id.clone()),
            _ => None,
        };
        match (confirm_id, code) {
            (Some(id), KeyCode::Char('y')) => {
                info!(id = %id, "Delete confirmed.");
                self.modal_dispatch.close();
                vec![Request::DeleteScanConfig { id }]
            }
            (_, KeyCode::Esc | KeyCode::Char('n') | KeyCode::Enter) => {
                self.modal_dispatch.close();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_route_key(&mut self, code: KeyCode) -> Vec<Request> {
        match code {
            KeyCode::Char('q') => {
                self.quit();
                return Vec::new();
            }
            KeyCode::Char('1') => return self.navigate(routes::DASHBOARD),
            KeyCode::Char('2') => return self.navigate(routes::SCANS),
            KeyCode::Char('3') => return self.navigate(routes::SCAN_CONFIGURATIONS),
            KeyCode::Char('r') => return self.retry(),
            KeyCode::Char('l') => {
                self.toggle_logs();
                return Vec::new();
            }
            KeyCode::Char('[') if self.show_logs => {
                self.scroll_logs_left();
                return Vec::new();
            }
            KeyCode::Char(']') if self.show_logs => {
                self.scroll_logs_right();
                return Vec::new();
            }
            KeyCode::Esc | KeyCode::Backspace => {
                return if self.navigator.back() { self.mount_current() } else { Vec::new() };
            }
            _ => {}
        }

        let pathname = self.navigator.pathname().to_string();
        let effects = match self.navigator.route() {
            Route::Dashboard => Vec::new(),
            Route::Scans => self.scans.handle_key(code),
            Route::ScanConfigs => self.configs.handle_key(code, &pathname),
            Route::ScanConfigDetail(_) => self.detail.as_mut().map(|detail| detail.handle_key(code)).unwrap_or_default(),
        };
        self.apply(effects)
    }

    /// Re-mounts the current view, the answer to any failed fetch.
    pub fn retry(&mut self) -> Vec<Request> {
        info!(path = %self.navigator.pathname(), "Retrying.");
        if let (Route::ScanConfigDetail(_), Some(detail)) = (self.navigator.route(), self.detail.as_mut()) {
            self.action_error = None;
            return detail.reload();
        }
        self.mount_current()
    }

    /// Routes a response to the view that asked for it.
    pub fn handle_response(&mut self, response: Response) -> Vec<Request> {
        match response {
            Response::DashboardScans { token, result } => self.dashboard.on_scans(token, result),
            Response::Count { token, endpoint, result } => {
                self.dashboard.on_count(token, endpoint, result);
                Vec::new()
            }
            Response::ScanConfig { token, id, result } => {
                if let Some(detail) = self.detail_for(&id) {
                    detail.on_config(token, result);
                }
                Vec::new()
            }
            Response::ConfigScanCount { token, config_id, result } => {
                if let Some(detail) = self.detail_for(&config_id) {
                    detail.on_scans_count(token, result);
                }
                Vec::new()
            }
            Response::ScanConfigsPage { token, result } => self.configs.on_page(token, result),
            Response::ScansPage { token, result } => {
                self.scans.on_page(token, result);
                Vec::new()
            }
            Response::ScanConfigDeleted { id, result } => match result {
                Ok(()) => {
                    info!(id = %id, "Scan configuration deleted.");
                    self.action_error = None;
                    if self.detail.as_ref().is_some_and(|detail| detail.id() == id) {
                        self.detail = None;
                    }
                    vec![self.configs.on_delete()]
                }
                Err(message) => {
                    error!(id = %id, error = %message, "Failed to delete scan configuration.");
                    self.action_error = Some(format!("Delete failed: {}", message));
                    Vec::new()
                }
            },
        }
    }

    /// The detail view, if it is still showing configuration `id`.
    fn detail_for(&mut self, id: &str) -> Option<&mut ConfigDetailView> {
        let detail = self.detail.as_mut().filter(|detail| detail.id() == id);
        if detail.is_none() {
            debug!(id, "Dropping response for a configuration no longer shown.");
        }
        detail
    }

    /// The message for the status line: a failed action first, then the
    /// current view's fetch error.
    pub fn status_error(&self) -> Option<&str> {
        if let Some(message) = &self.action_error {
            return Some(message);
        }
        match self.navigator.route() {
            Route::Dashboard => self.dashboard.error(),
            Route::Scans => self.scans.error(),
            Route::ScanConfigs => self.configs.error(),
            Route::ScanConfigDetail(_) => self.detail.as_ref().and_then(ConfigDetailView::error),
        }
    }

    /// Applies pending modal commands from the views.
    pub fn drain_modal_commands(&mut self) {
        while let Ok(command) = self.modal_rx.try_recv() {
            self.modal = match command {
                ModalCommand::SetModalDisplayData(payload) => Some(payload),
                ModalCommand::Close => None,
            };
        }
    }

    pub fn on_tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        self.drain_modal_commands();
        if self.show_logs && self.spinner_frame % LOG_REFRESH_TICKS == 0 {
            self.refresh_logs();
        }
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if self.show_logs {
            self.refresh_logs();
        }
    }

    fn refresh_logs(&mut self) {
        self.log_content = logging::read_log_tail(LOG_TAIL_LINES);
    }

    pub fn scroll_logs_left(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_sub(4);
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn scroll_logs_right(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_add(4);
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
