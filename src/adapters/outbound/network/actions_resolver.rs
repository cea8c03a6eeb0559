use crate::ports::outbound::EcosystemStrategy;
use crate::sbom_fetching::domain::GitHubRepository;
use async_trait::async_trait;

/// Resolves GitHub Actions packages without any network call.
///
/// An action's package name is already `owner/repo[/path]`; the first
/// two segments are the repository. Reusable workflows referenced with a
/// deeper path collapse onto their hosting repository.
pub struct GitHubActionsStrategy;

#[async_trait]
impl EcosystemStrategy for GitHubActionsStrategy {
    async fn resolve(&self, package_name: &str) -> Option<GitHubRepository> {
        let mut segments = package_name.split('/');
        let owner = segments.next()?;
        let repo = segments.next()?;
        GitHubRepository::new(owner, repo).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn resolve(name: &str) -> Option<GitHubRepository> {
        GitHubActionsStrategy.resolve(name).await
    }

    #[tokio::test]
    async fn test_resolve_plain_action() {
        let repo = resolve("actions/checkout").await.unwrap();
        assert_eq!(repo.to_string(), "actions/checkout");
    }

    #[tokio::test]
    async fn test_resolve_action_with_subpath() {
        let repo = resolve("github/codeql-action/analyze").await.unwrap();
        assert_eq!(repo.to_string(), "github/codeql-action");
    }

    #[tokio::test]
    async fn test_resolve_rejects_bare_name() {
        assert!(resolve("checkout").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_rejects_empty_segments() {
        assert!(resolve("/checkout").await.is_none());
        assert!(resolve("actions/").await.is_none());
        assert!(resolve("").await.is_none());
    }
}
