// src/core/requests.rs

use crate::core::api::{ApiClient, Endpoint, ListQuery, scans_of_config_filter};
use crate::core::fetch::RefreshToken;
use crate::core::models::{ListResponse, Scan, ScanConfig};
use color_eyre::eyre::Report;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A read (or the delete action) a view wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    DashboardScans { token: RefreshToken },
    Count { token: RefreshToken, endpoint: Endpoint },
    ScanConfig { token: RefreshToken, id: String },
    ConfigScanCount { token: RefreshToken, config_id: String },
    ScanConfigsPage { token: RefreshToken, query: ListQuery },
    ScansPage { token: RefreshToken, query: ListQuery },
    DeleteScanConfig { id: String },
}

/// The outcome of a [`Request`], tagged with the token it was issued for.
/// Detail responses also carry the configuration id, since every detail
/// view starts counting tokens from zero.
#[derive(Debug, Clone)]
pub enum Response {
    DashboardScans { token: RefreshToken, result: Result<ListResponse<Scan>, String> },
    Count { token: RefreshToken, endpoint: Endpoint, result: Result<u64, String> },
    ScanConfig { token: RefreshToken, id: String, result: Result<ScanConfig, String> },
    ConfigScanCount { token: RefreshToken, config_id: String, result: Result<u64, String> },
    ScanConfigsPage { token: RefreshToken, result: Result<ListResponse<ScanConfig>, String> },
    ScansPage { token: RefreshToken, result: Result<ListResponse<Scan>, String> },
    ScanConfigDeleted { id: String, result: Result<(), String> },
}

/// Flattens an error chain into the single line shown to the user.
pub fn error_message(report: Report) -> String {
    report.chain().map(ToString::to_string).collect::<Vec<_>>().join(": ")
}

fn flatten<T>(result: color_eyre::eyre::Result<T>) -> Result<T, String> {
    result.map_err(|report| {
        let message = error_message(report);
        warn!(error = %message, "Request failed.");
        message
    })
}

/// Runs one request against the API.
pub async fn execute(api: &ApiClient, request: Request) -> Response {
    debug!(?request, "Executing request.");
    match request {
        Request::DashboardScans { token } => Response::DashboardScans {
            token,
            result: flatten(api.list(Endpoint::Scans, &ListQuery::count_only()).await),
        },
        Request::Count { token, endpoint } => Response::Count {
            token,
            endpoint,
            result: flatten(api.count(endpoint, None).await),
        },
        Request::ScanConfig { token, id } => {
            let result = flatten(api.get_scan_config(&id).await);
            Response::ScanConfig { token, id, result }
        }
        Request::ConfigScanCount { token, config_id } => {
            let result = flatten(api.count(Endpoint::Scans, Some(scans_of_config_filter(&config_id))).await);
            Response::ConfigScanCount { token, config_id, result }
        }
        Request::ScanConfigsPage { token, query } => Response::ScanConfigsPage {
            token,
            result: flatten(api.list(Endpoint::ScanConfigs, &query).await),
        },
        Request::ScansPage { token, query } => Response::ScansPage {
            token,
            result: flatten(api.list(Endpoint::Scans, &query).await),
        },
        Request::DeleteScanConfig { id } => {
            let result = flatten(api.delete_scan_config(&id).await);
            Response::ScanConfigDeleted { id, result }
        }
    }
}

/// Spawns `request` and delivers its response on `tx`.
pub fn dispatch(api: &ApiClient, request: Request, tx: &mpsc::UnboundedSender<Response>) {
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let response = execute(&api, request).await;
        if tx.send(response).is_err() {
            debug!("UI loop has stopped, response dropped.");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use color_eyre::eyre::{WrapErr, eyre};
    use url::Url;

    #[test]
    fn error_message_keeps_whole_chain() {
        let report = Err::<(), _>(eyre!("connection refused"))
            .wrap_err("GET http://localhost/api/scans failed")
            .expect_err("is error");
        assert_eq!(error_message(report), "GET http://localhost/api/scans failed: connection refused");
    }

    #[tokio::test]
    async fn dispatch_reports_failures_with_the_request_token() {
        // Port 9 on localhost is not expected to accept HTTP.
        let config = Config { api_url: Url::parse("http://127.0.0.1:9/api").expect("url"), ..Config::default() };
        let api = ApiClient::new(&config).expect("client");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut token = RefreshToken::default();
        let token = token.bump();

        dispatch(&api, Request::Count { token, endpoint: Endpoint::Findings }, &tx);

        match rx.recv().await {
            Some(Response::Count { token: received, endpoint, result }) => {
                assert_eq!(received, token);
                assert_eq!(endpoint, Endpoint::Findings);
                assert!(result.is_err());
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
