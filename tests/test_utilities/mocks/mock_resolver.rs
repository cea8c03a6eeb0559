use async_trait::async_trait;
use gh_sbom::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock RepositoryResolver with a fixed name-to-repository mapping
#[derive(Default)]
pub struct MockResolver {
    mapping: HashMap<String, GitHubRepository>,
    pub resolved_names: Arc<Mutex<Vec<String>>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapping(mut self, package_name: &str, owner: &str, repo: &str) -> Self {
        self.mapping.insert(
            package_name.to_string(),
            GitHubRepository::new(owner, repo).unwrap(),
        );
        self
    }
}

#[async_trait]
impl RepositoryResolver for MockResolver {
    async fn resolve(&self, package: &PackageDependency) -> Option<GitHubRepository> {
        self.resolved_names
            .lock()
            .unwrap()
            .push(package.name().to_string());
        self.mapping.get(package.name()).cloned()
    }
}
