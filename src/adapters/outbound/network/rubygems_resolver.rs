use super::repo_url;
use crate::ports::outbound::EcosystemStrategy;
use crate::sbom_fetching::domain::GitHubRepository;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
struct GemDocument {
    #[serde(default)]
    source_code_uri: Option<String>,
    #[serde(default)]
    homepage_uri: Option<String>,
    #[serde(default)]
    project_uri: Option<String>,
}

/// First GitHub URL among source_code_uri, homepage_uri, project_uri,
/// in that order.
fn github_url_from_gem(document: &GemDocument) -> Option<&str> {
    [
        document.source_code_uri.as_deref(),
        document.homepage_uri.as_deref(),
        document.project_uri.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|url| url.to_lowercase().contains("github.com"))
}

/// Resolves Ruby gems through the RubyGems API.
pub struct RubyGemsStrategy {
    client: reqwest::Client,
    api_url: String,
}

impl RubyGemsStrategy {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let user_agent = format!("gh-sbom/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }
}

#[async_trait]
impl EcosystemStrategy for RubyGemsStrategy {
    async fn resolve(&self, package_name: &str) -> Option<GitHubRepository> {
        let url = format!("{}/{}.json", self.api_url, package_name);

        let response = self.client.get(&url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }

        let document: GemDocument = response.json().await.ok()?;
        repo_url::extract_github_repository(github_url_from_gem(&document)?)
    }
}
