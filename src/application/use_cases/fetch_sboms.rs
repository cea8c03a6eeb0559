use crate::application::dto::{FetchOutcome, FetchRequest, VersionMappingEntry};
use crate::ports::outbound::{ProgressReporter, RepositoryResolver, SbomSource, SbomStore};
use crate::sbom_fetching::domain::{
    ErrorType, FailureInfo, FetcherStats, VersionLocationTracker,
};
use crate::sbom_fetching::services::{aggregator, extractor, SbomDocument};
use crate::shared::Result;
use std::collections::BTreeMap;
use std::time::Duration;

/// Politeness pause is inserted after this many registry lookups or
/// repository downloads.
const RATE_LIMIT_EVERY: usize = 10;

/// Mapping progress is reported after this many packages.
const PROGRESS_EVERY: usize = 20;

/// FetchSbomsUseCase - Core use case for SBOM discovery and download
///
/// Orchestrates the full pipeline: root SBOM fetch, package extraction,
/// repository resolution, aggregation, deduplicated downloads, and
/// version location tracking. Everything runs sequentially; the only
/// pauses are politeness delays between upstream requests.
///
/// # Type Parameters
/// * `S` - SbomSource implementation
/// * `R` - RepositoryResolver implementation
/// * `ST` - SbomStore implementation
/// * `PR` - ProgressReporter implementation
pub struct FetchSbomsUseCase<S, R, ST, PR> {
    sbom_source: S,
    resolver: R,
    store: ST,
    progress_reporter: PR,
    rate_limit_pause: Duration,
}

impl<S, R, ST, PR> FetchSbomsUseCase<S, R, ST, PR>
where
    S: SbomSource,
    R: RepositoryResolver,
    ST: SbomStore,
    PR: ProgressReporter,
{
    /// Creates a new FetchSbomsUseCase with injected dependencies
    pub fn new(
        sbom_source: S,
        resolver: R,
        store: ST,
        progress_reporter: PR,
        rate_limit_pause: Duration,
    ) -> Self {
        Self {
            sbom_source,
            resolver,
            store,
            progress_reporter,
            rate_limit_pause,
        }
    }

    /// Executes the fetching pipeline for one repository.
    ///
    /// Individual package failures are recorded, never fatal; the run
    /// aborts only when the root SBOM itself is unavailable or persisted
    /// output cannot be written.
    pub async fn execute(&self, request: FetchRequest) -> Result<FetchOutcome> {
        let mut stats = FetcherStats::new();
        let mut tracker = VersionLocationTracker::new();

        // Step 1: fetch and persist the root SBOM
        self.progress_reporter.report(&format!(
            "📖 Fetching root SBOM for {}/{}...",
            request.owner, request.repo
        ));

        let root_value = self
            .sbom_source
            .fetch_root_sbom(&request.owner, &request.repo)
            .await?;
        let root_document_id =
            self.store
                .save_root_sbom(&request.owner, &request.repo, &root_value)?;
        let root_document = SbomDocument::from_value(root_value)?;
        tracker.observe(&root_document, &root_document_id);

        // Step 2: extract dependency packages
        let mut packages = extractor::extract_packages(&root_document);
        stats.packages_in_sbom = packages.len();
        self.progress_reporter.report(&format!(
            "✅ Found {} package(s) in root SBOM",
            packages.len()
        ));

        if packages.is_empty() {
            self.progress_reporter
                .report_error("⚠️  No packages found in root SBOM");
            return Ok(FetchOutcome {
                stats,
                packages,
                failed_downloads: Vec::new(),
                version_mapping: BTreeMap::new(),
                version_tracker: tracker,
            });
        }

        // Step 3: resolve each package to a GitHub repository
        self.progress_reporter
            .report("🔍 Mapping packages to GitHub repositories...");
        self.resolve_packages(&mut packages, &mut stats).await;
        self.progress_reporter.report_completion(&format!(
            "✅ Mapped {} package(s) to GitHub repositories, {} without a repository",
            stats.github_repos_mapped, stats.packages_without_github
        ));

        // Step 4: deduplicate and download one SBOM per repository
        let aggregation = aggregator::aggregate(&packages);
        stats.unique_repos = aggregation.unique_repository_count();
        self.progress_reporter.report(&format!(
            "📦 {} unique repositories ({} duplicate version(s) to skip)",
            aggregation.unique_repository_count(),
            aggregation.duplicates_skipped()
        ));

        let (version_mapping, failed_downloads) = self
            .download_unique_repositories(&aggregation, &mut packages, &mut stats, &mut tracker)
            .await?;

        let mapping_file = self.store.save_version_mapping(&version_mapping)?;
        self.progress_reporter
            .report(&format!("💾 Saved version mapping: {}", mapping_file));

        self.progress_reporter.report_completion(&format!(
            "✅ Downloads complete: {} succeeded, {} failed ({} permanent, {} transient)",
            stats.sboms_downloaded,
            stats.sboms_failed(),
            stats.sboms_failed_permanent,
            stats.sboms_failed_transient
        ));

        Ok(FetchOutcome {
            stats,
            packages,
            failed_downloads,
            version_mapping,
            version_tracker: tracker,
        })
    }

    /// Resolves packages sequentially in document order, pausing
    /// periodically to stay polite to the upstream registries.
    async fn resolve_packages(
        &self,
        packages: &mut [crate::sbom_fetching::domain::PackageDependency],
        stats: &mut FetcherStats,
    ) {
        let total = packages.len();

        for (i, pkg) in packages.iter_mut().enumerate() {
            if (i + 1) % PROGRESS_EVERY == 0 {
                self.progress_reporter
                    .report_progress(i + 1, total, Some("Mapping packages..."));
            }

            match self.resolver.resolve(pkg).await {
                Some(repository) => {
                    pkg.set_repository(repository);
                    stats.github_repos_mapped += 1;
                }
                None => {
                    stats.packages_without_github += 1;
                }
            }

            if (i + 1) % RATE_LIMIT_EVERY == 0 && i + 1 < total {
                tokio::time::sleep(self.rate_limit_pause).await;
            }
        }
    }

    /// Downloads one SBOM per unique repository, in first-seen order.
    async fn download_unique_repositories(
        &self,
        aggregation: &aggregator::RepositoryAggregation,
        packages: &mut [crate::sbom_fetching::domain::PackageDependency],
        stats: &mut FetcherStats,
        tracker: &mut VersionLocationTracker,
    ) -> Result<(BTreeMap<String, VersionMappingEntry>, Vec<FailureInfo>)> {
        let mut version_mapping = BTreeMap::new();
        let mut failed_downloads = Vec::new();
        let total = aggregation.unique_repository_count();

        for (i, group) in aggregation.groups().iter().enumerate() {
            let versions = aggregation.versions_for(group, packages);
            self.progress_reporter.report(&format!(
                "[{}/{}] Fetching SBOM for {} (versions: {})",
                i + 1,
                total,
                group.repository,
                summarize_versions(&versions)
            ));

            let representative = &mut packages[group.representative()];

            match self.sbom_source.download_sbom(representative).await {
                Some(document_value) => {
                    let document_id = self
                        .store
                        .save_dependency_sbom(&group.repository, &document_value)?;
                    if let Ok(document) = SbomDocument::from_value(document_value) {
                        tracker.observe(&document, &document_id);
                    }

                    stats.sboms_downloaded += 1;
                    version_mapping.insert(
                        group.repository.to_string(),
                        VersionMappingEntry {
                            sbom_file: document_id,
                            package_name: representative.name().to_string(),
                            ecosystem: representative.ecosystem().to_string(),
                            versions_in_dependency_tree: sorted_distinct(&versions),
                            note: VersionMappingEntry::CURRENT_STATE_NOTE.to_string(),
                        },
                    );
                }
                None => {
                    let error = representative
                        .error()
                        .unwrap_or("Unknown error")
                        .to_string();
                    let error_type = representative.error_type().unwrap_or(ErrorType::Unknown);
                    stats.record_failed_download(error_type);
                    failed_downloads.push(FailureInfo {
                        repository: group.repository.clone(),
                        package_name: representative.name().to_string(),
                        ecosystem: representative.ecosystem().to_string(),
                        versions: sorted_distinct(&versions),
                        error: error.clone(),
                        error_type,
                    });
                    self.progress_reporter
                        .report_error(&format!("  ⚠️  Failed ({}): {}", error_type, error));
                }
            }

            if group.members.len() > 1 {
                stats.duplicates_skipped += group.members.len() - 1;
            }

            if (i + 1) % RATE_LIMIT_EVERY == 0 && i + 1 < total {
                tokio::time::sleep(self.rate_limit_pause).await;
            }
        }

        Ok((version_mapping, failed_downloads))
    }
}

fn sorted_distinct(versions: &[String]) -> Vec<String> {
    let mut distinct: Vec<String> = versions.to_vec();
    distinct.sort();
    distinct.dedup();
    distinct
}

fn summarize_versions(versions: &[String]) -> String {
    if versions.len() <= 3 {
        versions.join(", ")
    } else {
        format!(
            "{}, +{} more",
            versions[..3].join(", "),
            versions.len() - 3
        )
    }
}
