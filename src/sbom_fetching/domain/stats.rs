use super::package::{ErrorType, GitHubRepository};
use std::time::Instant;

/// Mutable counters tracking one fetching run.
///
/// Created once per run and threaded through every stage by the use case;
/// never global.
#[derive(Debug, Clone)]
pub struct FetcherStats {
    pub packages_in_sbom: usize,
    pub github_repos_mapped: usize,
    pub packages_without_github: usize,
    pub unique_repos: usize,
    pub sboms_downloaded: usize,
    pub sboms_failed_permanent: usize,
    pub sboms_failed_transient: usize,
    pub duplicates_skipped: usize,
    started_at: Instant,
}

impl FetcherStats {
    pub fn new() -> Self {
        Self {
            packages_in_sbom: 0,
            github_repos_mapped: 0,
            packages_without_github: 0,
            unique_repos: 0,
            sboms_downloaded: 0,
            sboms_failed_permanent: 0,
            sboms_failed_transient: 0,
            duplicates_skipped: 0,
            started_at: Instant::now(),
        }
    }

    /// Total failures (permanent + transient).
    pub fn sboms_failed(&self) -> usize {
        self.sboms_failed_permanent + self.sboms_failed_transient
    }

    /// Count a failed download under its classification.
    /// Unclassified failures count as permanent.
    pub fn record_failed_download(&mut self, error_type: ErrorType) {
        match error_type {
            ErrorType::Transient => self.sboms_failed_transient += 1,
            ErrorType::Permanent | ErrorType::Unknown => self.sboms_failed_permanent += 1,
        }
    }

    /// Elapsed time since the run started, formatted as `XmYs` or `Ys`.
    pub fn elapsed_time(&self) -> String {
        let elapsed = self.started_at.elapsed().as_secs();
        let mins = elapsed / 60;
        let secs = elapsed % 60;
        if mins > 0 {
            format!("{}m {}s", mins, secs)
        } else {
            format!("{}s", secs)
        }
    }
}

impl Default for FetcherStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Information about a failed SBOM download, kept for reporting.
#[derive(Debug, Clone)]
pub struct FailureInfo {
    pub repository: GitHubRepository,
    pub package_name: String,
    pub ecosystem: String,
    pub versions: Vec<String>,
    pub error: String,
    pub error_type: ErrorType,
}
