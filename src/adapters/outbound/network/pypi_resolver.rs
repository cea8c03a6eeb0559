use super::repo_url;
use crate::ports::outbound::EcosystemStrategy;
use crate::sbom_fetching::domain::GitHubRepository;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// project_urls labels checked first, in priority order.
const EXACT_SOURCE_KEYS: [&str; 5] = ["Source", "Repository", "Source Code", "Sources", "Code"];

#[derive(Debug, Deserialize)]
struct PyPiPackageDocument {
    #[serde(default)]
    info: PyPiInfo,
}

#[derive(Debug, Default, Deserialize)]
struct PyPiInfo {
    /// Label -> URL; PyPI serves null for abandoned labels
    #[serde(default)]
    project_urls: Option<BTreeMap<String, Option<String>>>,
    #[serde(default)]
    home_page: Option<String>,
}

fn is_github(url: &str) -> bool {
    url.to_lowercase().contains("github.com")
}

/// Pick the most trustworthy GitHub link out of the PyPI metadata:
/// exact source-ish labels first, then any label mentioning
/// source/repository/code, then the homepage.
fn github_url_from_metadata(
    project_urls: &BTreeMap<String, Option<String>>,
    home_page: Option<&str>,
) -> Option<String> {
    for key in EXACT_SOURCE_KEYS {
        if let Some(Some(url)) = project_urls.get(key) {
            if is_github(url) {
                return Some(url.clone());
            }
        }
    }

    for (label, url) in project_urls {
        let label = label.to_lowercase();
        if label.contains("source") || label.contains("repository") || label.contains("code") {
            if let Some(url) = url {
                if is_github(url) {
                    return Some(url.clone());
                }
            }
        }
    }

    let homepage = project_urls
        .get("Homepage")
        .and_then(|url| url.clone())
        .or_else(|| home_page.map(String::from));
    homepage.filter(|url| is_github(url))
}

/// Resolves PyPI packages through the PyPI JSON API.
pub struct PyPiStrategy {
    client: reqwest::Client,
    api_url: String,
}

impl PyPiStrategy {
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
impl EcosystemStrategy for PyPiStrategy {
    async fn resolve(&self, package_name: &str) -> Option<GitHubRepository> {
        let url = format!("{}/{}/json", self.api_url, package_name);

        let response = self.client.get(&url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }

        let document: PyPiPackageDocument = response.json().await.ok()?;
        let empty = BTreeMap::new();
        let project_urls = document.info.project_urls.as_ref().unwrap_or(&empty);
        let github_url =
            github_url_from_metadata(project_urls, document.info.home_page.as_deref())?;
        repo_url::extract_github_repository(&github_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(entries: &[(&str, &str)]) -> BTreeMap<String, Option<String>> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Some(v.to_string())))
            .collect()
    }

    #[test]
    fn test_exact_source_key_wins() {
        let project_urls = urls(&[
            ("Homepage", "https://github.com/wrong/homepage"),
            ("Source", "https://github.com/psf/requests"),
        ]);
        assert_eq!(
            github_url_from_metadata(&project_urls, None).unwrap(),
            "https://github.com/psf/requests"
        );
    }

    #[test]
    fn test_exact_keys_checked_in_priority_order() {
        let project_urls = urls(&[
            ("Code", "https://github.com/second/choice"),
            ("Repository", "https://github.com/first/choice"),
        ]);
        assert_eq!(
            github_url_from_metadata(&project_urls, None).unwrap(),
            "https://github.com/first/choice"
        );
    }

    #[test]
    fn test_case_insensitive_substring_match() {
        let project_urls = urls(&[("source code (github)", "https://github.com/owner/repo")]);
        assert_eq!(
            github_url_from_metadata(&project_urls, None).unwrap(),
            "https://github.com/owner/repo"
        );
    }

    #[test]
    fn test_homepage_fallback() {
        let project_urls = urls(&[("Documentation", "https://docs.example.com")]);
        assert_eq!(
            github_url_from_metadata(&project_urls, Some("https://github.com/owner/repo"))
                .unwrap(),
            "https://github.com/owner/repo"
        );
    }

    #[test]
    fn test_homepage_label_fallback() {
        let project_urls = urls(&[("Homepage", "https://github.com/owner/repo")]);
        assert_eq!(
            github_url_from_metadata(&project_urls, None).unwrap(),
            "https://github.com/owner/repo"
        );
    }

    #[test]
    fn test_non_github_source_is_skipped() {
        let project_urls = urls(&[("Source", "https://gitlab.com/owner/repo")]);
        assert!(github_url_from_metadata(&project_urls, None).is_none());
    }

    #[test]
    fn test_null_labels_are_tolerated() {
        let mut project_urls = BTreeMap::new();
        project_urls.insert("Source".to_string(), None);
        assert!(github_url_from_metadata(&project_urls, None).is_none());
    }

    #[test]
    fn test_no_metadata_at_all() {
        assert!(github_url_from_metadata(&BTreeMap::new(), None).is_none());
    }

    #[test]
    fn test_pypi_strategy_creation() {
        let strategy = PyPiStrategy::new("https://pypi.org/pypi", Duration::from_secs(10));
        assert!(strategy.is_ok());
    }
}
