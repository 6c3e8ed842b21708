// src/core/models.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Response Envelope ---

/// The envelope every list endpoint of the backend answers with.
///
/// `count` is only present when the request asked for it with `$count=true`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The total number of matching records, falling back to the page length
    /// when the server did not report a count.
    pub fn total(&self) -> u64 {
        self.count.unwrap_or(self.items.len() as u64)
    }
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self { count: None, items: Vec::new() }
    }
}

// --- Scans ---

/// A reference from a scan to the configuration that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanConfigRef {
    pub id: String,
}

/// A single scan execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scan {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub scan_config: Option<ScanConfigRef>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

// --- Scan Configurations ---

/// An instance tag used by scope selectors, rendered as `key:value`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityGroup {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Vpc {
    pub id: String,
    #[serde(default)]
    pub security_groups: Vec<SecurityGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    #[serde(default)]
    pub vpcs: Vec<Vpc>,
}

/// What a configuration targets: every region, or an explicit region list,
/// narrowed by instance tag selectors and exclusions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScanScope {
    #[serde(default, alias = "allRegions")]
    pub all: bool,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub instance_tag_selector: Vec<Tag>,
    #[serde(default)]
    pub instance_tag_exclusion: Vec<Tag>,
}

/// Per-family switch. Families carry more settings on the backend; only the
/// flag is consumed here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScanFamilyConfig {
    #[serde(default)]
    pub enabled: bool,
}

/// Scan family name (e.g. `vulnerabilities`, `sbom`) to its switch.
pub type ScanFamiliesConfig = BTreeMap<String, ScanFamilyConfig>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default)]
    pub operation_time: Option<DateTime<Utc>>,
}

/// A saved definition of what and where to scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScanConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub scope: ScanScope,
    #[serde(default)]
    pub scan_families_config: ScanFamiliesConfig,
    #[serde(default)]
    pub scheduled: Schedule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_config_deserializes_backend_shape() {
        let raw = r#"{
            "id": "cfg-1",
            "name": "nightly",
            "scope": {
                "allRegions": false,
                "regions": [{"name": "eu-central-1", "vpcs": [{"id": "vpc-1", "securityGroups": [{"id": "sg-1"}]}]}],
                "instanceTagSelector": [{"key": "app", "value": "my-app1"}],
                "objectType": "AwsScanScope"
            },
            "scanFamiliesConfig": {
                "sbom": {"enabled": true},
                "malware": {"enabled": false, "scanners": ["clam"]}
            },
            "scheduled": {"operationTime": "2023-03-01T10:00:00Z", "objectType": "SingleScheduleScanConfig"}
        }"#;

        let config: ScanConfig = serde_json::from_str(raw).expect("valid scan config");

        assert!(!config.scope.all);
        assert_eq!(config.scope.regions[0].vpcs[0].security_groups[0].id, "sg-1");
        assert!(config.scope.instance_tag_exclusion.is_empty());
        assert!(config.scan_families_config["sbom"].enabled);
        assert!(!config.scan_families_config["malware"].enabled);
        assert!(config.scheduled.operation_time.is_some());
    }

    #[test]
    fn scan_config_tolerates_missing_schedule() {
        let config: ScanConfig =
            serde_json::from_str(r#"{"id": "a", "name": "b", "scope": {"all": true}}"#).expect("valid");
        assert!(config.scope.all);
        assert_eq!(config.scheduled.operation_time, None);
    }

    #[test]
    fn list_total_falls_back_to_page_length() {
        let page: ListResponse<Scan> = serde_json::from_str(r#"{"items": [{"id": "s1"}, {"id": "s2"}]}"#).expect("valid");
        assert_eq!(page.count, None);
        assert_eq!(page.total(), 2);

        let counted: ListResponse<Scan> = serde_json::from_str(r#"{"count": 17, "items": []}"#).expect("valid");
        assert!(counted.is_empty());
        assert_eq!(counted.total(), 17);
    }
}
