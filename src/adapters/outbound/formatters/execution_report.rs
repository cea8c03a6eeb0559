use crate::application::dto::FetchOutcome;
use crate::sbom_fetching::domain::{ErrorType, FailureInfo};
use std::path::Path;

/// How many multi-version repositories the report lists before
/// deferring to version_mapping.json.
const MULTI_VERSION_LIMIT: usize = 10;

/// ExecutionReportFormatter - Markdown execution report
///
/// Renders the run summary, failure breakdown, multi-version
/// repositories, and unmapped-package diagnostics into one Markdown
/// document.
pub struct ExecutionReportFormatter;

impl ExecutionReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn file_name(owner: &str, repo: &str) -> String {
        format!("{}_{}_execution_report.md", owner, repo)
    }

    pub fn format(
        &self,
        owner: &str,
        repo: &str,
        export_dir: &Path,
        outcome: &FetchOutcome,
    ) -> String {
        let stats = &outcome.stats;
        let mut output = String::new();

        output.push_str("# GitHub SBOM API Fetcher - Execution Report\n\n");

        let exec_date = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        output.push_str(&format!("**Repository:** `{}/{}`  \n", owner, repo));
        output.push_str(&format!("**Execution Date:** {}  \n", exec_date));
        output.push_str(&format!(
            "**Output Directory:** `{}`\n\n",
            export_dir.display()
        ));

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "- **Packages in root SBOM:** {}\n",
            stats.packages_in_sbom
        ));
        output.push_str(&format!(
            "- **Mapped to GitHub repos:** {}\n",
            stats.github_repos_mapped
        ));
        output.push_str(&format!(
            "- **Unique repositories:** {}\n",
            stats.unique_repos
        ));
        output.push_str(&format!(
            "- **Duplicate versions skipped:** {}\n",
            stats.duplicates_skipped
        ));
        output.push_str(&format!(
            "- **Packages without GitHub repos:** {}\n\n",
            stats.packages_without_github
        ));
        output.push_str(&format!(
            "- **SBOMs downloaded successfully:** ✅ **{}**\n",
            stats.sboms_downloaded
        ));
        output.push_str(&format!(
            "- **SBOMs failed (permanent):** 🔴 **{}**\n",
            stats.sboms_failed_permanent
        ));
        output.push_str(&format!(
            "- **SBOMs failed (transient):** ⚠️ **{}**\n",
            stats.sboms_failed_transient
        ));
        output.push_str(&format!(
            "- **SBOMs failed (total):** ❌ **{}**\n",
            stats.sboms_failed()
        ));
        output.push_str(&format!("- **Elapsed time:** {}\n\n", stats.elapsed_time()));

        output.push_str("### ⚠️ Important Note\n\n");
        output.push_str(
            "> GitHub's SBOM API only provides SBOMs for the current state \
             of repositories (default branch), not for specific versions.\n",
        );
        output.push_str("> See `version_mapping.json` for details on version deduplication.\n\n");

        self.format_failures(&mut output, &outcome.failed_downloads);
        self.format_multi_version_repositories(&mut output, outcome);
        self.format_unmapped_packages(&mut output, outcome);

        output.push_str("## Statistics Breakdown\n\n");
        output.push_str("### Deduplication Impact\n\n");
        if stats.unique_repos > 0 {
            let dedup_pct = if stats.github_repos_mapped > 0 {
                stats.duplicates_skipped as f64 / stats.github_repos_mapped as f64 * 100.0
            } else {
                0.0
            };
            output.push_str(&format!(
                "- **Packages mapped:** {}\n",
                stats.github_repos_mapped
            ));
            output.push_str(&format!(
                "- **Unique repositories:** {}\n",
                stats.unique_repos
            ));
            output.push_str(&format!(
                "- **Duplicates avoided:** {} ({:.1}%)\n",
                stats.duplicates_skipped, dedup_pct
            ));
        }
        output.push('\n');

        output.push_str("## Files Generated\n\n");
        output.push_str(&format!(
            "- `{}_{}_root.json` - Root repository SBOM\n",
            owner, repo
        ));
        output.push_str("- `version_mapping.json` - Version-to-SBOM mapping\n");
        output.push_str(&format!(
            "- `{}` - This execution report\n",
            Self::file_name(owner, repo)
        ));
        output.push_str(&format!(
            "- `dependencies/` - Directory with {} dependency SBOMs\n\n",
            stats.sboms_downloaded
        ));

        output.push_str("---\n\n");
        output.push_str("*Generated by gh-sbom*  \n");
        output.push_str("*For more information, see README.md*\n");

        output
    }

    fn format_failures(&self, output: &mut String, failed: &[FailureInfo]) {
        if failed.is_empty() {
            return;
        }

        let permanent: Vec<&FailureInfo> = failed
            .iter()
            .filter(|f| f.error_type != ErrorType::Transient)
            .collect();
        let transient: Vec<&FailureInfo> = failed
            .iter()
            .filter(|f| f.error_type == ErrorType::Transient)
            .collect();

        output.push_str("## Failed SBOM Downloads\n\n");
        output.push_str(&format!(
            "**Total failures:** {} ({} permanent, {} transient)\n\n",
            failed.len(),
            permanent.len(),
            transient.len()
        ));

        if !permanent.is_empty() {
            output.push_str("### 🔴 Permanent Failures\n\n");
            output.push_str(
                "*These will consistently fail until the underlying issue is fixed \
                 (e.g., dependency graph not enabled).*\n\n",
            );
            for failure in &permanent {
                self.format_failure(output, failure);
            }
        }

        if !transient.is_empty() {
            output.push_str("### ⚠️ Transient Failures\n\n");
            output.push_str(
                "*These may succeed on retry (e.g., timeouts, rate limits, network issues).*\n\n",
            );
            for failure in &transient {
                self.format_failure(output, failure);
            }
        }
    }

    fn format_failure(&self, output: &mut String, failure: &FailureInfo) {
        output.push_str(&format!("#### {}\n\n", failure.repository));
        output.push_str(&format!("- **Package:** {}\n", failure.package_name));
        output.push_str(&format!("- **Ecosystem:** {}\n", failure.ecosystem));
        output.push_str(&format!(
            "- **Versions:** {}\n",
            failure.versions.join(", ")
        ));
        output.push_str(&format!("- **Error:** `{}`\n\n", failure.error));
    }

    fn format_multi_version_repositories(&self, output: &mut String, outcome: &FetchOutcome) {
        let mut multi_version: Vec<(&String, &crate::application::dto::VersionMappingEntry)> =
            outcome
                .version_mapping
                .iter()
                .filter(|(_, entry)| entry.versions_in_dependency_tree.len() > 1)
                .collect();
        if multi_version.is_empty() {
            return;
        }

        multi_version.sort_by_key(|(_, entry)| {
            std::cmp::Reverse(entry.versions_in_dependency_tree.len())
        });

        output.push_str("## Repositories with Multiple Versions\n\n");
        output.push_str(&format!(
            "**Total:** {} repositories used with multiple versions\n\n",
            multi_version.len()
        ));

        for (repo_key, entry) in multi_version.iter().take(MULTI_VERSION_LIMIT) {
            output.push_str(&format!("### {}\n\n", repo_key));
            output.push_str(&format!("- **Package:** {}\n", entry.package_name));
            output.push_str(&format!("- **Ecosystem:** {}\n", entry.ecosystem));
            output.push_str(&format!(
                "- **Versions:** {}\n",
                entry.versions_in_dependency_tree.join(", ")
            ));
            output.push_str(&format!("- **SBOM file:** `{}`\n\n", entry.sbom_file));
        }

        if multi_version.len() > MULTI_VERSION_LIMIT {
            output.push_str(&format!(
                "*... and {} more repositories. See `version_mapping.json` for complete details.*\n\n",
                multi_version.len() - MULTI_VERSION_LIMIT
            ));
        }
    }

    fn format_unmapped_packages(&self, output: &mut String, outcome: &FetchOutcome) {
        let unmapped = outcome.unmapped_packages();
        if unmapped.is_empty() {
            return;
        }

        output.push_str("## Packages That Could Not Be Mapped to GitHub\n\n");
        output.push_str(&format!(
            "**Total:** {} packages could not be mapped to GitHub repositories.\n\n",
            unmapped.len()
        ));
        output.push_str(
            "Mapping fails when the package registry metadata does not link to a \
             repository (missing or null `repository` field, no source URL in the \
             project metadata). This commonly affects old or unmaintained packages, \
             platform-specific binary wrappers, and private packages. The package may \
             still have a GitHub repository - the registry just does not say where.\n\n",
        );
        output.push_str("### Unmapped Packages Detail\n\n");

        for pkg in unmapped {
            let version = if pkg.version().is_empty() {
                "unknown"
            } else {
                pkg.version()
            };
            output.push_str(&format!("#### {} (v{})\n\n", pkg.name(), version));
            output.push_str(&format!("- **Ecosystem:** {}\n", pkg.ecosystem()));
            output.push_str(&format!("- **PURL:** `{}`\n", pkg.purl()));
            output.push_str(
                "- **Result:** ❌ No GitHub repository found via registry metadata or search\n\n",
            );
        }
    }
}

impl Default for ExecutionReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
