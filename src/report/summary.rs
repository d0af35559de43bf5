//! Summary text.

use crate::report::aggregate::TypeGroup;

/// The first summary line.
pub fn header(target_count: usize, attempt_count: usize) -> String {
    format!(
        "网络检测完成，共检测 {} 个目标 ({} 次探测)",
        target_count, attempt_count
    )
}

/// One line describing a group, or `None` for an empty group.
pub fn group_line(group: &TypeGroup) -> Option<String> {
    let total = group.total_count();
    if total == 0 {
        return None;
    }

    let success = group.success_count();
    let failed = group.failure_count();
    let name = group.kind.display_name();

    let status = match (group.is_total_failure(), group.is_critical()) {
        (true, true) => format!("❌ 全部失败 ({}个)", total),
        (true, false) => format!("⚠️ 全部失败 ({}个，可选)", total),
        (false, false) if group.is_partial_failure() => format!(
            "{}/{} 可用 (建议避免使用失败的{}个)",
            success, total, failed
        ),
        (false, _) => format!("{}/{} 可用 ✓", success, total),
    };

    Some(format!("{}: {}", name, status))
}

/// Header plus one line per non-empty group, in the order given.
pub fn summarize<'a>(
    groups: impl IntoIterator<Item = &'a TypeGroup>,
    target_count: usize,
    attempt_count: usize,
) -> Vec<String> {
    std::iter::once(header(target_count, attempt_count))
        .chain(groups.into_iter().filter_map(group_line))
        .collect()
}
