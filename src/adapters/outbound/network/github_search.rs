use crate::ports::outbound::RepositorySearch;
use crate::sbom_fetching::domain::GitHubRepository;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    full_name: String,
}

/// Search term for the ecosystem-agnostic fallback: scoped npm names are
/// searched by their scope alone, everything else by the full name.
fn search_term(package_name: &str) -> &str {
    if package_name.starts_with('@') {
        package_name.split('/').next().unwrap_or(package_name)
    } else {
        package_name
    }
}

/// Candidate repository names for an exact org-scoped lookup: the
/// literal package name plus its `_`/`-` variants.
fn name_variants(package_name: &str) -> Vec<String> {
    let mut variants: Vec<String> = Vec::new();
    for candidate in [
        package_name.to_string(),
        package_name.replace('_', "-"),
        package_name.replace('-', "_"),
    ] {
        if !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

/// GitHub repository search client backing the resolver fallbacks.
pub struct GitHubSearchClient {
    client: reqwest::Client,
    api_url: String,
}

impl GitHubSearchClient {
    pub fn new(api_url: impl Into<String>, token: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("token {}", token))?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let user_agent = format!("gh-sbom/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    async fn repository_exists(&self, owner: &str, name: &str) -> bool {
        let url = format!("{}/repos/{}/{}", self.api_url, owner, name);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Top search hit by stars for a repository-name query.
    async fn search_top(&self, query: &str) -> Option<GitHubRepository> {
        let url = format!("{}/search/repositories", self.api_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", "1"),
            ])
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            return None;
        }

        let body: SearchResponse = response.json().await.ok()?;
        let item = body.items.first()?;
        let (owner, repo) = item.full_name.split_once('/')?;
        GitHubRepository::new(owner, repo).ok()
    }
}

#[async_trait]
impl RepositorySearch for GitHubSearchClient {
    async fn find_in_org(&self, org: &str, package_name: &str) -> Option<GitHubRepository> {
        for candidate in name_variants(package_name) {
            if self.repository_exists(org, &candidate).await {
                return GitHubRepository::new(org, candidate).ok();
            }
        }

        self.search_top(&format!("{} in:name org:{}", package_name, org))
            .await
    }

    async fn find_by_name(&self, package_name: &str) -> Option<GitHubRepository> {
        self.search_top(&format!("{} in:name", search_term(package_name)))
            .await
    }
}
