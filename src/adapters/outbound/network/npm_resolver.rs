use super::repo_url;
use crate::ports::outbound::EcosystemStrategy;
use crate::sbom_fetching::domain::GitHubRepository;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct NpmPackageDocument {
    #[serde(default)]
    repository: Option<NpmRepositoryField>,
}

/// The npm registry serves the `repository` field either as an object
/// with a `url` subfield or as a bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NpmRepositoryField {
    Object {
        #[serde(default)]
        url: Option<String>,
    },
    Text(String),
}

/// Interpret the registry's `repository` field.
///
/// The bare-string form without a scheme and with exactly one `/` is the
/// registry's `owner/repo` shorthand; everything else goes through URL
/// normalization.
fn repository_from_field(field: &NpmRepositoryField) -> Option<GitHubRepository> {
    match field {
        NpmRepositoryField::Object { url } => {
            repo_url::extract_github_repository(url.as_deref()?)
        }
        NpmRepositoryField::Text(text) => {
            let is_shorthand = !text.contains("://")
                && !text.to_lowercase().contains("github.com")
                && text.matches('/').count() == 1;
            if is_shorthand {
                let (owner, repo) = text.split_once('/')?;
                GitHubRepository::new(owner, repo).ok()
            } else {
                repo_url::extract_github_repository(text)
            }
        }
    }
}

/// Resolves npm packages through the npm registry's package document.
pub struct NpmStrategy {
    client: reqwest::Client,
    registry_url: String,
}

impl NpmStrategy {
    pub fn new(registry_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let user_agent = format!("gh-sbom/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            registry_url: registry_url.into(),
        })
    }
}

#[async_trait]
impl EcosystemStrategy for NpmStrategy {
    async fn resolve(&self, package_name: &str) -> Option<GitHubRepository> {
        // Scoped names like @babel/core must be fully percent-encoded
        let encoded = urlencoding::encode(package_name);
        let url = format!("{}/{}", self.registry_url, encoded);

        let response = self.client.get(&url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }

        let document: NpmPackageDocument = response.json().await.ok()?;
        repository_from_field(document.repository.as_ref()?)
    }
}
