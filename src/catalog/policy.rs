//! Per-category merge policy.
//!
//! The three-way rule for combining default and project entry lists lives
//! in one table:
//!
//! | Category | Policy |
//! | --- | --- |
//! | `git_repos` | defaults, then project entries |
//! | everything else | project list if specified, otherwise defaults |
//!
//! A category named in `disable_defaults` drops its defaults under either
//! policy, leaving only the project's own entries.

use crate::catalog::target::Category;
use crate::config::schema::RawEntry;

/// How a category's default and project lists combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Defaults followed by project entries.
    Append,
    /// Project entries if the category is specified, defaults otherwise.
    ReplaceIfPresent,
    /// Project entries only; defaults are excluded.
    DefaultsDisabled,
}

/// Base policy for each category.
const POLICY_TABLE: [(Category, MergePolicy); 6] = [
    (Category::GitRepos, MergePolicy::Append),
    (Category::PypiSources, MergePolicy::ReplaceIfPresent),
    (Category::MirrorSites, MergePolicy::ReplaceIfPresent),
    (Category::GithubProxies, MergePolicy::ReplaceIfPresent),
    (Category::ProjectWebsites, MergePolicy::ReplaceIfPresent),
    (Category::MihoyoApi, MergePolicy::ReplaceIfPresent),
];

/// The configured policy for a category, ignoring `disable_defaults`.
pub fn base_policy(category: Category) -> MergePolicy {
    POLICY_TABLE
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, policy)| *policy)
        .unwrap_or(MergePolicy::ReplaceIfPresent)
}

/// The policy that applies once `disable_defaults` is taken into account.
pub fn effective_policy(category: Category, disabled: &[Category]) -> MergePolicy {
    if disabled.contains(&category) {
        MergePolicy::DefaultsDisabled
    } else {
        base_policy(category)
    }
}

impl MergePolicy {
    /// Combine the two lists under this policy, preserving source order.
    pub fn merge<'a>(
        self,
        defaults: &'a [RawEntry],
        project: Option<&'a [RawEntry]>,
    ) -> Vec<&'a RawEntry> {
        match (self, project) {
            (MergePolicy::Append, project) => defaults
                .iter()
                .chain(project.unwrap_or_default())
                .collect(),
            (MergePolicy::ReplaceIfPresent, Some(project)) => project.iter().collect(),
            (MergePolicy::ReplaceIfPresent, None) => defaults.iter().collect(),
            (MergePolicy::DefaultsDisabled, project) => {
                project.unwrap_or_default().iter().collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(entries: &[&RawEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| match e {
                RawEntry::Url(u) => u.clone(),
                other => panic!("unexpected entry {:?}", other),
            })
            .collect()
    }

    fn url(s: &str) -> RawEntry {
        RawEntry::Url(s.to_string())
    }

    #[test]
    fn git_repos_append() {
        assert_eq!(base_policy(Category::GitRepos), MergePolicy::Append);
    }

    #[test]
    fn other_categories_replace() {
        for category in Category::ALL.into_iter().skip(1) {
            assert_eq!(base_policy(category), MergePolicy::ReplaceIfPresent);
        }
    }

    #[test]
    fn disabled_category_overrides_base_policy() {
        let disabled = [Category::GitRepos];
        assert_eq!(
            effective_policy(Category::GitRepos, &disabled),
            MergePolicy::DefaultsDisabled
        );
        assert_eq!(
            effective_policy(Category::PypiSources, &disabled),
            MergePolicy::ReplaceIfPresent
        );
    }

    #[test]
    fn append_keeps_defaults_first() {
        let defaults = vec![url("https://github.com")];
        let project = vec![url("https://gitee.com/a.git")];
        let merged = MergePolicy::Append.merge(&defaults, Some(&project));
        assert_eq!(
            urls(&merged),
            vec!["https://github.com", "https://gitee.com/a.git"]
        );
    }

    #[test]
    fn append_without_project_keeps_defaults() {
        let defaults = vec![url("https://github.com")];
        let merged = MergePolicy::Append.merge(&defaults, None);
        assert_eq!(urls(&merged), vec!["https://github.com"]);
    }

    #[test]
    fn replace_uses_project_when_present() {
        let defaults = vec![url("https://pypi.org/simple/")];
        let project = vec![url("https://mirrors.aliyun.com/pypi/simple/")];
        let merged = MergePolicy::ReplaceIfPresent.merge(&defaults, Some(&project));
        assert_eq!(urls(&merged), vec!["https://mirrors.aliyun.com/pypi/simple/"]);
    }

    #[test]
    fn replace_falls_back_to_defaults_when_absent() {
        let defaults = vec![url("https://pypi.org/simple/")];
        let merged = MergePolicy::ReplaceIfPresent.merge(&defaults, None);
        assert_eq!(urls(&merged), vec!["https://pypi.org/simple/"]);
    }

    #[test]
    fn replace_with_explicit_empty_list_yields_nothing() {
        let defaults = vec![url("https://pypi.org/simple/")];
        let merged = MergePolicy::ReplaceIfPresent.merge(&defaults, Some(&[]));
        assert!(merged.is_empty());
    }

    #[test]
    fn disabled_with_no_project_entries_is_empty() {
        let defaults = vec![url("https://pypi.org/simple/")];
        assert!(MergePolicy::DefaultsDisabled.merge(&defaults, None).is_empty());
    }

    #[test]
    fn disabled_keeps_project_entries() {
        let defaults = vec![url("https://github.com")];
        let project = vec![url("https://gitee.com/a.git")];
        let merged = MergePolicy::DefaultsDisabled.merge(&defaults, Some(&project));
        assert_eq!(urls(&merged), vec!["https://gitee.com/a.git"]);
    }
}
