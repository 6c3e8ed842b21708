// src/core/api.rs

use crate::config::Config;
use crate::core::models::{ListResponse, ScanConfig};
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::de::{DeserializeOwned, IgnoredAny};
use strum::Display;
use tracing::{debug, error, info};
use url::Url;

/// The REST collections this console reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Endpoint {
    Scans,
    Assets,
    Findings,
    #[strum(to_string = "Scan configurations")]
    ScanConfigs,
}

impl Endpoint {
    /// Path segment below the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Scans => "scans",
            Endpoint::Assets => "assets",
            Endpoint::Findings => "findings",
            Endpoint::ScanConfigs => "scanConfigs",
        }
    }
}

/// OData-style query parameters understood by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: Option<String>,
    pub count: bool,
    pub top: Option<usize>,
    pub skip: Option<usize>,
}

impl ListQuery {
    /// A query that only asks for the total count.
    pub fn count_only() -> Self {
        Self { count: true, top: Some(1), ..Default::default() }
    }

    pub fn page(page: usize, page_size: usize) -> Self {
        Self { count: true, top: Some(page_size), skip: Some(page * page_size), ..Default::default() }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.filter.is_none() && !self.count && self.top.is_none() && self.skip.is_none()
    }

    fn apply(&self, url: &mut Url) {
        if self.is_empty() {
            return;
        }
        let mut pairs = url.query_pairs_mut();
        if let Some(filter) = &self.filter {
            pairs.append_pair("$filter", filter);
        }
        if self.count {
            pairs.append_pair("$count", "true");
        }
        if let Some(top) = self.top {
            pairs.append_pair("$top", &top.to_string());
        }
        if let Some(skip) = self.skip {
            pairs.append_pair("$skip", &skip.to_string());
        }
    }
}

/// Filter selecting the scans produced by one configuration.
pub fn scans_of_config_filter(config_id: &str) -> String {
    format!("scanConfig/id eq '{}'", config_id.replace('\'', "''"))
}

/// Thin async client over the backend REST API.
///
/// Cloning is cheap: the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("clarity-console/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()
            .wrap_err("Failed to build HTTP client")?;
        Ok(Self { client, base: config.api_url.clone() })
    }

    /// Builds `{base}/{endpoint}[/{id}]?{query}`.
    pub fn url(&self, endpoint: Endpoint, id: Option<&str>, query: &ListQuery) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| eyre!("API URL '{}' cannot be used as a base", self.base))?;
            segments.pop_if_empty().push(endpoint.path());
            if let Some(id) = id {
                segments.push(id);
            }
        }
        query.apply(&mut url);
        Ok(url)
    }

    pub async fn list<T: DeserializeOwned>(&self, endpoint: Endpoint, query: &ListQuery) -> Result<ListResponse<T>> {
        let url = self.url(endpoint, None, query)?;
        self.get_json(url).await
    }

    /// Total number of records matching `filter`.
    pub async fn count(&self, endpoint: Endpoint, filter: Option<String>) -> Result<u64> {
        let query = match filter {
            Some(filter) => ListQuery::count_only().with_filter(filter),
            None => ListQuery::count_only(),
        };
        let url = self.url(endpoint, None, &query)?;
        let page: ListResponse<IgnoredAny> = self.get_json(url).await?;
        Ok(page.total())
    }

    pub async fn get_scan_config(&self, id: &str) -> Result<ScanConfig> {
        let url = self.url(Endpoint::ScanConfigs, Some(id), &ListQuery::default())?;
        self.get_json(url).await
    }

    pub async fn delete_scan_config(&self, id: &str) -> Result<()> {
        let url = self.url(Endpoint::ScanConfigs, Some(id), &ListQuery::default())?;
        info!(%url, "Deleting scan configuration.");
        self.client
            .delete(url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                error!(%url, error = %e, "Delete request failed.");
                e
            })
            .wrap_err_with(|| format!("DELETE {} failed", url))?;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "Sending GET request.");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                error!(%url, error = %e, "GET request failed.");
                e
            })
            .wrap_err_with(|| format!("GET {} failed", url))?;
        response
            .json::<T>()
            .await
            .wrap_err_with(|| format!("Unexpected response body from {}", url))
    }
}
