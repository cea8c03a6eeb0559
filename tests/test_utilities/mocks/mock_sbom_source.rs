use anyhow::anyhow;
use async_trait::async_trait;
use gh_sbom::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock SbomSource serving canned documents per repository key
/// (`owner/repo`) and recording the order of download attempts.
#[derive(Default)]
pub struct MockSbomSource {
    root: Option<serde_json::Value>,
    documents: HashMap<String, serde_json::Value>,
    failures: HashMap<String, (String, ErrorType)>,
    pub download_log: Arc<Mutex<Vec<String>>>,
}

impl MockSbomSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, document: serde_json::Value) -> Self {
        self.root = Some(document);
        self
    }

    pub fn with_dependency_sbom(mut self, repo_key: &str, document: serde_json::Value) -> Self {
        self.documents.insert(repo_key.to_string(), document);
        self
    }

    pub fn with_failure(mut self, repo_key: &str, error: &str, error_type: ErrorType) -> Self {
        self.failures
            .insert(repo_key.to_string(), (error.to_string(), error_type));
        self
    }
}

#[async_trait]
impl SbomSource for MockSbomSource {
    async fn fetch_root_sbom(&self, owner: &str, repo: &str) -> Result<serde_json::Value> {
        self.root
            .clone()
            .ok_or_else(|| anyhow!("no root SBOM configured for {}/{}", owner, repo))
    }

    async fn download_sbom(&self, package: &mut PackageDependency) -> Option<serde_json::Value> {
        let Some(repository) = package.github_repository() else {
            package.record_failure("No GitHub repository mapped", ErrorType::Permanent);
            return None;
        };
        let repo_key = repository.to_string();
        self.download_log.lock().unwrap().push(repo_key.clone());

        if let Some((error, error_type)) = self.failures.get(&repo_key) {
            package.record_failure(error.clone(), *error_type);
            return None;
        }

        match self.documents.get(&repo_key) {
            Some(document) => {
                package.mark_downloaded();
                Some(document.clone())
            }
            None => {
                package.record_failure("Dependency graph not enabled", ErrorType::Permanent);
                None
            }
        }
    }
}
