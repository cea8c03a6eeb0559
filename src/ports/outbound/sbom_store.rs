use crate::application::dto::VersionMappingEntry;
use crate::sbom_fetching::domain::GitHubRepository;
use crate::shared::Result;
use std::collections::BTreeMap;

/// SbomStore port - persists SBOM payloads and the version mapping
///
/// The store owns file naming and directory layout; callers only receive
/// back the document identifier (file name) for cross-referencing.
pub trait SbomStore: Send + Sync {
    /// Persist the root repository's SBOM; returns its document id.
    fn save_root_sbom(
        &self,
        owner: &str,
        repo: &str,
        document: &serde_json::Value,
    ) -> Result<String>;

    /// Persist a dependency SBOM; returns its document id.
    fn save_dependency_sbom(
        &self,
        repository: &GitHubRepository,
        document: &serde_json::Value,
    ) -> Result<String>;

    /// Persist the repository-to-versions mapping; returns its file name.
    fn save_version_mapping(
        &self,
        mapping: &BTreeMap<String, VersionMappingEntry>,
    ) -> Result<String>;
}
