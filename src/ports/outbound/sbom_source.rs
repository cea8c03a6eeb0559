use crate::sbom_fetching::domain::PackageDependency;
use crate::shared::Result;
use async_trait::async_trait;

/// SbomSource port - fetches SBOM documents for GitHub repositories
///
/// The root fetch is fatal on failure (the run cannot make forward
/// progress without it); dependency downloads record their failure on
/// the package instead of propagating.
#[async_trait]
pub trait SbomSource: Send + Sync {
    /// Fetch the root repository's SBOM. An error here aborts the run.
    async fn fetch_root_sbom(&self, owner: &str, repo: &str) -> Result<serde_json::Value>;

    /// Download the SBOM for a resolved dependency with bounded retry.
    ///
    /// On success the package is marked downloaded and the payload is
    /// returned. On failure the error message and classification are
    /// recorded on the package and `None` is returned; this method never
    /// propagates an error.
    async fn download_sbom(&self, package: &mut PackageDependency) -> Option<serde_json::Value>;
}
