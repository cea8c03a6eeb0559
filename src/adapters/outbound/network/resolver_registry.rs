use super::actions_resolver::GitHubActionsStrategy;
use crate::ports::outbound::{EcosystemStrategy, RepositoryResolver, RepositorySearch};
use crate::sbom_fetching::domain::{GitHubRepository, PackageDependency};
use async_trait::async_trait;
use std::collections::HashMap;

/// Collapse ecosystem aliases onto one dispatch key.
fn canonical_ecosystem(ecosystem: &str) -> String {
    let normalized = ecosystem.to_lowercase();
    match normalized.as_str() {
        "rubygems" => "gem".to_string(),
        "github-actions" => "githubactions".to_string(),
        _ => normalized,
    }
}

/// ResolverRegistry - ecosystem dispatch with fallback chaining
///
/// Selects one registry strategy per ecosystem, then escalates through
/// the org-scoped lookup (when a home organization is configured) and
/// the ecosystem-agnostic repository search. GitHub Actions names are
/// resolved directly and never fall back: their name already is an
/// owner/repo pair, so a search could only invent a wrong answer.
///
/// Unknown ecosystems are offered the org-scoped lookup only; the
/// global search is reserved for ecosystems whose registry metadata was
/// actually consulted and came up empty.
pub struct ResolverRegistry {
    strategies: HashMap<String, Box<dyn EcosystemStrategy>>,
    actions: GitHubActionsStrategy,
    search: Box<dyn RepositorySearch>,
    home_org: Option<String>,
}

impl ResolverRegistry {
    pub fn new(search: Box<dyn RepositorySearch>, home_org: Option<String>) -> Self {
        Self {
            strategies: HashMap::new(),
            actions: GitHubActionsStrategy,
            search,
            home_org,
        }
    }

    /// Register a registry strategy under its canonical ecosystem key.
    pub fn with_strategy(
        mut self,
        ecosystem: &str,
        strategy: Box<dyn EcosystemStrategy>,
    ) -> Self {
        self.strategies
            .insert(canonical_ecosystem(ecosystem), strategy);
        self
    }
}

#[async_trait]
impl RepositoryResolver for ResolverRegistry {
    async fn resolve(&self, package: &PackageDependency) -> Option<GitHubRepository> {
        let ecosystem = canonical_ecosystem(package.ecosystem());

        if ecosystem == "githubactions" {
            return self.actions.resolve(package.name()).await;
        }

        let primary = self.strategies.get(&ecosystem);
        if let Some(strategy) = primary {
            if let Some(repository) = strategy.resolve(package.name()).await {
                return Some(repository);
            }
        }

        if let Some(org) = &self.home_org {
            if let Some(repository) = self.search.find_in_org(org, package.name()).await {
                return Some(repository);
            }
        }

        if primary.is_some() {
            if let Some(repository) = self.search.find_by_name(package.name()).await {
                return Some(repository);
            }
        }

        None
    }
}
