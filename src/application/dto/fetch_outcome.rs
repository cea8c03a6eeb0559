use crate::sbom_fetching::domain::{
    FailureInfo, FetcherStats, PackageDependency, VersionLocationTracker,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// One entry of the repository-to-versions mapping persisted alongside
/// the downloaded SBOMs.
#[derive(Debug, Clone, Serialize)]
pub struct VersionMappingEntry {
    pub sbom_file: String,
    pub package_name: String,
    pub ecosystem: String,
    pub versions_in_dependency_tree: Vec<String>,
    pub note: String,
}

impl VersionMappingEntry {
    /// GitHub's SBOM endpoint serves the default branch's current state,
    /// so one file stands in for every version of the repository.
    pub const CURRENT_STATE_NOTE: &'static str =
        "SBOM represents current repository state (default branch), not historical versions";
}

/// Everything a run produced, handed to the reporting collaborators.
///
/// Every package is in a terminal, inspectable state: resolved and
/// downloaded, resolved and failed (permanent or transient), or
/// unresolved.
#[derive(Debug)]
pub struct FetchOutcome {
    pub stats: FetcherStats,
    pub packages: Vec<PackageDependency>,
    pub failed_downloads: Vec<FailureInfo>,
    pub version_mapping: BTreeMap<String, VersionMappingEntry>,
    pub version_tracker: VersionLocationTracker,
}

impl FetchOutcome {
    /// Whether the run completed without any download failures.
    pub fn success(&self) -> bool {
        self.stats.sboms_failed() == 0
    }

    /// Packages that could not be mapped to a GitHub repository.
    pub fn unmapped_packages(&self) -> Vec<&PackageDependency> {
        self.packages
            .iter()
            .filter(|p| p.github_repository().is_none())
            .collect()
    }
}
