// src/core/routes.rs

use std::collections::VecDeque;
use tracing::{info, warn};

pub const DASHBOARD: &str = "/";
pub const SCANS: &str = "/scans";
pub const SCAN_CONFIGURATIONS: &str = "/configs";

/// Oldest entries fall off the back stack past this depth.
const MAX_HISTORY: usize = 32;

/// A resolved location in the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Scans,
    ScanConfigs,
    ScanConfigDetail(String),
}

impl Route {
    /// Resolves a path, or `None` when nothing lives there.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() || trimmed == "/dashboard" {
            return Some(Route::Dashboard);
        }
        if trimmed == SCANS {
            return Some(Route::Scans);
        }
        if trimmed == SCAN_CONFIGURATIONS {
            return Some(Route::ScanConfigs);
        }
        trimmed
            .strip_prefix(SCAN_CONFIGURATIONS)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|id| !id.is_empty() && !id.contains('/'))
            .map(|id| Route::ScanConfigDetail(id.to_string()))
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => DASHBOARD.to_string(),
            Route::Scans => SCANS.to_string(),
            Route::ScanConfigs => SCAN_CONFIGURATIONS.to_string(),
            Route::ScanConfigDetail(id) => format!("{}/{}", SCAN_CONFIGURATIONS, id),
        }
    }
}

/// Path of a child record below the current location, e.g. a table row.
pub fn child_path(pathname: &str, id: &str) -> String {
    format!("{}/{}", pathname.trim_end_matches('/'), id)
}

/// Current location plus a back stack.
#[derive(Debug, Clone)]
pub struct Navigator {
    pathname: String,
    route: Route,
    history: VecDeque<String>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self { pathname: DASHBOARD.to_string(), route: Route::Dashboard, history: VecDeque::new() }
    }
}

impl Navigator {
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Moves to `path`. Unknown paths land on the dashboard.
    /// Returns `false` when already there.
    pub fn navigate(&mut self, path: &str) -> bool {
        let route = Route::parse(path).unwrap_or_else(|| {
            warn!(path, "Unknown route, falling back to dashboard.");
            Route::Dashboard
        });
        let pathname = route.path();
        if pathname == self.pathname {
            return false;
        }
        info!(from = %self.pathname, to = %pathname, "Navigating.");
        let previous = std::mem::replace(&mut self.pathname, pathname);
        if self.history.len() == MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(previous);
        self.route = route;
        true
    }

    /// Pops the back stack. Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        let Some(previous) = self.history.pop_back() else {
            return false;
        };
        info!(from = %self.pathname, to = %previous, "Navigating back.");
        self.route = Route::parse(&previous).unwrap_or(Route::Dashboard);
        self.pathname = previous;
        true
    }
}
