use crate::sbom_fetching::domain::{GitHubRepository, PackageDependency};
use async_trait::async_trait;

/// RepositoryResolver port - maps a package to its GitHub repository
///
/// Implementations consult ecosystem registries and fallback searches.
/// Resolution never fails: internal faults (network, parse) are folded
/// into `None` at the implementation boundary.
#[async_trait]
pub trait RepositoryResolver: Send + Sync {
    /// Resolve a package to a candidate repository, or `None` when every
    /// applicable strategy and fallback has been exhausted.
    async fn resolve(&self, package: &PackageDependency) -> Option<GitHubRepository>;
}

/// One ecosystem-specific resolution strategy (npm, PyPI, RubyGems, ...).
///
/// A strategy only consults its own registry; fallback chaining across
/// strategies is the dispatcher's concern.
#[async_trait]
pub trait EcosystemStrategy: Send + Sync {
    /// Look up the repository for a package name in this ecosystem's
    /// registry. `None` means "no match", never an error.
    async fn resolve(&self, package_name: &str) -> Option<GitHubRepository>;
}

/// Repository search port used by the resolver fallbacks.
#[async_trait]
pub trait RepositorySearch: Send + Sync {
    /// Look for a repository matching the package name within one
    /// organization: exact-name lookups first (including `_`/`-`
    /// variants), then an org-scoped name search.
    async fn find_in_org(&self, org: &str, package_name: &str) -> Option<GitHubRepository>;

    /// Ecosystem-agnostic repository search by name; the top result by
    /// stars wins. Scoped npm names are searched by their scope alone.
    async fn find_by_name(&self, package_name: &str) -> Option<GitHubRepository>;
}
