// src/core/display.rs

//! Plain-text formatting of backend records, shared by tables and detail panes.

use crate::core::models::{ScanFamiliesConfig, ScanScope, Tag};
use chrono::{DateTime, Local, Utc};

pub const EMPTY_VALUE: &str = "-";

/// `"sbom"` -> `"Sbom"`, `"VULNERABILITIES"` -> `"Vulnerabilities"`.
pub fn to_capitalized(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Enabled scan families, capitalized and joined with `" - "`.
pub fn scan_types_display(families: &ScanFamiliesConfig) -> String {
    families
        .iter()
        .filter(|(_, family)| family.enabled)
        .map(|(name, _)| to_capitalized(name))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn format_tags(tags: &[Tag]) -> Vec<String> {
    tags.iter().map(|tag| format!("{}:{}", tag.key, tag.value)).collect()
}

/// One line per region, followed by indented VPC lines with their security groups.
pub fn scope_lines(scope: &ScanScope) -> Vec<String> {
    if scope.all {
        return vec!["All".to_string()];
    }
    let mut lines = Vec::new();
    for region in &scope.regions {
        lines.push(region.name.clone());
        for vpc in &region.vpcs {
            if vpc.security_groups.is_empty() {
                lines.push(format!("  {}", vpc.id));
            } else {
                let groups: Vec<&str> = vpc.security_groups.iter().map(|sg| sg.id.as_str()).collect();
                lines.push(format!("  {} ({})", vpc.id, groups.join(", ")));
            }
        }
    }
    lines
}

/// A scheduled run counts as "Scheduled" until its operation time has passed.
pub fn is_scheduled(operation_time: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    operation_time.is_some_and(|time| time >= now)
}

pub fn format_date(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(time) => time.with_timezone(&Local).format("%b %-d, %Y %H:%M:%S").to_string(),
        None => EMPTY_VALUE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Region, ScanFamilyConfig, SecurityGroup, Vpc};
    use chrono::{Duration, TimeZone};

    fn families(entries: &[(&str, bool)]) -> ScanFamiliesConfig {
        entries
            .iter()
            .map(|(name, enabled)| (name.to_string(), ScanFamilyConfig { enabled: *enabled }))
            .collect()
    }

    #[test]
    fn capitalizes_first_letter_only() {
        assert_eq!(to_capitalized("sast"), "Sast");
        assert_eq!(to_capitalized("SBOM"), "Sbom");
        assert_eq!(to_capitalized(""), "");
    }

    #[test]
    fn scan_types_lists_enabled_families() {
        assert_eq!(scan_types_display(&families(&[("sast", true), ("dast", false)])), "Sast");
        assert_eq!(
            scan_types_display(&families(&[("vulnerabilities", true), ("sbom", true), ("malware", false)])),
            "Sbom - Vulnerabilities"
        );
        assert_eq!(scan_types_display(&families(&[])), "");
    }

    #[test]
    fn tags_render_as_key_value() {
        let tags = vec![Tag { key: "app".into(), value: "my-app1".into() }];
        assert_eq!(format_tags(&tags), vec!["app:my-app1"]);
    }

    #[test]
    fn scope_lines_expand_regions() {
        let scope = ScanScope {
            regions: vec![Region {
                name: "us-east-1".into(),
                vpcs: vec![
                    Vpc {
                        id: "vpc-1".into(),
                        security_groups: vec![SecurityGroup { id: "sg-1".into() }, SecurityGroup { id: "sg-2".into() }],
                    },
                    Vpc { id: "vpc-2".into(), security_groups: vec![] },
                ],
            }],
            ..Default::default()
        };
        assert_eq!(scope_lines(&scope), vec!["us-east-1", "  vpc-1 (sg-1, sg-2)", "  vpc-2"]);
        assert_eq!(scope_lines(&ScanScope { all: true, ..scope }), vec!["All"]);
    }

    #[test]
    fn future_operation_time_is_scheduled() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert!(is_scheduled(Some(now + Duration::hours(1)), now));
        assert!(is_scheduled(Some(now), now));
        assert!(!is_scheduled(Some(now - Duration::minutes(5)), now));
        assert!(!is_scheduled(None, now));
    }

    #[test]
    fn missing_date_renders_placeholder() {
        assert_eq!(format_date(None), EMPTY_VALUE);
        assert!(format_date(Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())).contains("2024"));
    }
}
