//! Fix-suggestion synthesis.

use crate::catalog::target::TargetKind;
use crate::report::aggregate::{NetworkCheckReport, OverallStatus, TypeGroup};
use crate::resolver::DYNAMIC_PROXY_NAME;

/// Fallback when the verdict is a warning but no group has advice.
pub const WARNING_FALLBACK: &str = "部分网络连接存在问题，建议使用可用的源";

/// Fallback when the verdict is an error but no group has advice.
pub const ERROR_FALLBACK: &str = "网络连接存在严重问题，请检查网络连接、防火墙设置或DNS配置";

/// Proxy domains named in a total-failure suggestion.
const MAX_NAMED_PROXIES: usize = 2;

/// Build per-group suggestions, critical groups first.
///
/// Nothing is suggested for a clean run. Only git, package index and proxy
/// groups carry advice, at most one line each. Mirror, website and miHoYo
/// groups get no suggestion even when partially or fully failed; the summary
/// line is their only report, and a warning verdict with no group advice
/// falls back to [`WARNING_FALLBACK`].
pub fn synthesize<'a>(
    status: OverallStatus,
    groups: impl IntoIterator<Item = &'a TypeGroup>,
) -> Vec<String> {
    if status != OverallStatus::Error && status != OverallStatus::Warning {
        return Vec::new();
    }

    let mut groups: Vec<&TypeGroup> = groups
        .into_iter()
        .filter(|g| g.failure_count() > 0)
        .collect();
    groups.sort_by_key(|g| (!g.is_critical(), g.kind));

    groups.into_iter().filter_map(group_suggestion).collect()
}

fn group_suggestion(group: &TypeGroup) -> Option<String> {
    let name = group.kind.display_name();
    let success = group.success_count();

    let text = match (group.kind, success) {
        (TargetKind::GitRepo, 0) => format!("{}: 全部失败，请检查网络连接或使用代理", name),
        (TargetKind::PypiSource, 0) => format!("{}: 全部失败，请检查网络连接或更换镜像源", name),
        (TargetKind::GithubProxy, 0) => {
            let domains = failing_proxy_domains(group);
            if domains.is_empty() {
                format!("{}: 全部失败，建议直连或使用其他代理", name)
            } else {
                format!(
                    "{}: 全部失败 ({})，建议直连或使用其他代理",
                    name,
                    domains.join(", ")
                )
            }
        }
        (TargetKind::GitRepo | TargetKind::PypiSource | TargetKind::GithubProxy, _) => {
            format!("{}: 建议使用可用的源 ({}个可用)", name, success)
        }
        _ => return None,
    };
    Some(text)
}

/// Hosts of failing proxies: deduplicated, discovered proxies left out.
fn failing_proxy_domains(group: &TypeGroup) -> Vec<&str> {
    let mut domains: Vec<&str> = Vec::new();
    for result in group.results.iter().filter(|r| !r.is_success()) {
        if result.target.display_name == DYNAMIC_PROXY_NAME {
            continue;
        }
        let host = result.target.host();
        if !host.is_empty() && !domains.contains(&host) {
            domains.push(host);
        }
        if domains.len() == MAX_NAMED_PROXIES {
            break;
        }
    }
    domains
}

/// The suggestion string shown under a report.
///
/// Empty for successful and skipped runs.
pub fn get_fix_suggestion(report: &NetworkCheckReport) -> String {
    if !report.fix_suggestions.is_empty() {
        return report.fix_suggestions.join("; ");
    }
    match report.overall_status {
        OverallStatus::Warning => WARNING_FALLBACK.to_string(),
        OverallStatus::Error => ERROR_FALLBACK.to_string(),
        OverallStatus::Success | OverallStatus::Skipped => String::new(),
    }
}
