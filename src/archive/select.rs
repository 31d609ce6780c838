use crate::checker::ResolutionCache;
use std::collections::BTreeSet;

/// Status-code policy deciding which resolved URLs get archived
///
/// Exclusion wins over inclusion. An empty `include` set admits every
/// status not excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchivePolicy {
    pub include: BTreeSet<u16>,
    pub exclude: BTreeSet<u16>,
}

impl ArchivePolicy {
    /// Every resolved URL
    pub fn everything() -> Self {
        Self::default()
    }

    /// Only links that currently answer 200
    pub fn clean_links() -> Self {
        Self {
            include: BTreeSet::from([200]),
            exclude: BTreeSet::new(),
        }
    }

    /// Everything reachable except 404s
    pub fn all_reachable() -> Self {
        Self {
            include: BTreeSet::new(),
            exclude: BTreeSet::from([404]),
        }
    }
}

/// URLs partitioned by an [`ArchivePolicy`]
///
/// URLs whose status is neither excluded nor included appear in none of
/// the lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSelection {
    pub selected: Vec<String>,
    pub excluded: Vec<String>,
    /// URLs whose resolution never produced a status
    pub unresolved: Vec<String>,
}

/// Applies `policy` to every URL in the cache
pub fn select_for_archival(cache: &ResolutionCache, policy: &ArchivePolicy) -> ArchiveSelection {
    let mut selection = ArchiveSelection::default();

    for (url, chain) in cache.iter() {
        let Some(status) = chain.terminal_status() else {
            selection.unresolved.push(url.to_string());
            continue;
        };

        if policy.exclude.contains(&status) {
            selection.excluded.push(url.to_string());
        } else if policy.include.is_empty() || policy.include.contains(&status) {
            selection.selected.push(url.to_string());
        }
    }

    tracing::info!(
        "Selected {} URLs ({} excluded, {} unresolved)",
        selection.selected.len(),
        selection.excluded.len(),
        selection.unresolved.len()
    );

    selection
}
