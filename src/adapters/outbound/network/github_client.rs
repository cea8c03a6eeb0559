use crate::ports::outbound::SbomSource;
use crate::sbom_fetching::domain::{ErrorType, PackageDependency};
use crate::shared::error::FetchError;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::time::Duration;

/// Fixed backoff between attempts after a server error or a
/// network-level failure.
const RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Base wait after a 429; grows linearly with the attempt number.
const RATE_LIMIT_BACKOFF_SECS: u64 = 5;

/// GitHub dependency-graph SBOM client.
///
/// Fetches the root SBOM (fatal on failure) and downloads dependency
/// SBOMs with bounded retry and permanent/transient classification.
/// 403 and 404 never retry: they are conditions a retry cannot change.
pub struct GitHubSbomClient {
    client: reqwest::Client,
    api_url: String,
    max_retries: u32,
}

impl GitHubSbomClient {
    pub fn new(
        api_url: impl Into<String>,
        token: &str,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("token {}", token))
                .context("GitHub token contains characters not allowed in a header")?,
        );
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
            max_retries: max_retries.max(1),
        })
    }

    fn sbom_url(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}/dependency-graph/sbom",
            self.api_url, owner, repo
        )
    }
}

#[async_trait]
impl SbomSource for GitHubSbomClient {
    async fn fetch_root_sbom(&self, owner: &str, repo: &str) -> Result<serde_json::Value> {
        let url = self.sbom_url(owner, repo);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request for root SBOM of {}/{} failed", owner, repo))?;

        match response.status().as_u16() {
            200 => Ok(response
                .json()
                .await
                .with_context(|| format!("Root SBOM for {}/{} is not valid JSON", owner, repo))?),
            404 => Err(FetchError::RootSbomUnavailable {
                owner: owner.to_string(),
                repo: repo.to_string(),
                reason: "dependency graph not enabled (404)".to_string(),
                hint: format!(
                    "Enable it at: https://github.com/{}/{}/settings",
                    owner, repo
                ),
            }
            .into()),
            403 => Err(FetchError::RootSbomUnavailable {
                owner: owner.to_string(),
                repo: repo.to_string(),
                reason: "access forbidden (403)".to_string(),
                hint: "Check that your token has read access to the repository".to_string(),
            }
            .into()),
            status => Err(FetchError::RootSbomUnavailable {
                owner: owner.to_string(),
                repo: repo.to_string(),
                reason: format!("HTTP {}", status),
                hint: "The GitHub API may be degraded; try again later".to_string(),
            }
            .into()),
        }
    }

    async fn download_sbom(&self, package: &mut PackageDependency) -> Option<serde_json::Value> {
        let Some(repository) = package.github_repository() else {
            package.record_failure("No GitHub repository mapped", ErrorType::Permanent);
            return None;
        };
        let url = self.sbom_url(repository.owner(), repository.repo());

        for attempt in 0..self.max_retries {
            let has_attempts_left = attempt + 1 < self.max_retries;

            let response = match self.client.get(&url).send().await {
                Ok(response) => response,
                Err(e) => {
                    if has_attempts_left {
                        tokio::time::sleep(RETRY_BACKOFF).await;
                        continue;
                    }
                    package.record_failure(e.to_string(), ErrorType::Transient);
                    return None;
                }
            };

            match response.status().as_u16() {
                200 => match response.json::<serde_json::Value>().await {
                    Ok(document) => {
                        package.mark_downloaded();
                        return Some(document);
                    }
                    Err(e) => {
                        package.record_failure(
                            format!("Invalid JSON in SBOM response: {}", e),
                            ErrorType::Permanent,
                        );
                        return None;
                    }
                },
                404 => {
                    package.record_failure("Dependency graph not enabled", ErrorType::Permanent);
                    return None;
                }
                403 => {
                    package.record_failure("Access forbidden", ErrorType::Permanent);
                    return None;
                }
                202 => {
                    package
                        .record_failure("SBOM generation in progress", ErrorType::Permanent);
                    return None;
                }
                429 => {
                    if has_attempts_left {
                        let wait = RATE_LIMIT_BACKOFF_SECS * (attempt as u64 + 1);
                        tokio::time::sleep(Duration::from_secs(wait)).await;
                        continue;
                    }
                    package.record_failure("Rate limited", ErrorType::Transient);
                    return None;
                }
                status if status >= 400 => {
                    if has_attempts_left {
                        tokio::time::sleep(RETRY_BACKOFF).await;
                        continue;
                    }
                    package.record_failure(format!("HTTP {}", status), ErrorType::Transient);
                    return None;
                }
                status => {
                    package.record_failure(format!("HTTP {}", status), ErrorType::Permanent);
                    return None;
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_fetching::domain::GitHubRepository;
    use std::io::{Read, Write};
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Minimal canned-response HTTP server; counts accepted requests.
    fn spawn_server(response: &'static str) -> (SocketAddr, Arc<AtomicUsize>) {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = requests.clone();

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });

        (addr, requests)
    }

    fn client_for(addr: SocketAddr, max_retries: u32) -> GitHubSbomClient {
        GitHubSbomClient::new(
            format!("http://{}", addr),
            "test-token",
            Duration::from_secs(5),
            max_retries,
        )
        .unwrap()
    }

    fn resolved_package() -> PackageDependency {
        let mut package =
            PackageDependency::new("lodash", "4.17.21", "pkg:npm/lodash@4.17.21", "npm").unwrap();
        package.set_repository(GitHubRepository::new("lodash", "lodash").unwrap());
        package
    }

    const OK_RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}";
    const NOT_FOUND_RESPONSE: &str =
        "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
    const FORBIDDEN_RESPONSE: &str =
        "HTTP/1.1 403 Forbidden\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
    const SERVER_ERROR_RESPONSE: &str =
        "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

    #[test]
    fn test_client_creation() {
        let client = GitHubSbomClient::new(
            "https://api.github.com",
            "ghp_token",
            Duration::from_secs(30),
            2,
        );
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_token_characters() {
        let client = GitHubSbomClient::new(
            "https://api.github.com",
            "bad\ntoken",
            Duration::from_secs(30),
            2,
        );
        assert!(client.is_err());
    }

    #[test]
    fn test_sbom_url_shape() {
        let client = GitHubSbomClient::new(
            "https://api.github.com",
            "token",
            Duration::from_secs(30),
            2,
        )
        .unwrap();
        assert_eq!(
            client.sbom_url("tedg-dev", "beatBot"),
            "https://api.github.com/repos/tedg-dev/beatBot/dependency-graph/sbom"
        );
    }

    #[tokio::test]
    async fn test_unmapped_package_fails_without_network() {
        let (addr, requests) = spawn_server(OK_RESPONSE);
        let client = client_for(addr, 2);
        let mut package =
            PackageDependency::new("mystery", "1.0.0", "pkg:npm/mystery@1.0.0", "npm").unwrap();

        let result = client.download_sbom(&mut package).await;
        assert!(result.is_none());
        assert_eq!(package.error(), Some("No GitHub repository mapped"));
        assert_eq!(package.error_type(), Some(ErrorType::Permanent));
        assert_eq!(requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_download_marks_package() {
        let (addr, requests) = spawn_server(OK_RESPONSE);
        let client = client_for(addr, 3);
        let mut package = resolved_package();

        let result = client.download_sbom(&mut package).await;
        assert!(result.is_some());
        assert!(package.sbom_downloaded());
        assert!(package.error().is_none());
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_404_is_permanent_and_never_retried() {
        let (addr, requests) = spawn_server(NOT_FOUND_RESPONSE);
        let client = client_for(addr, 3);
        let mut package = resolved_package();

        let result = client.download_sbom(&mut package).await;
        assert!(result.is_none());
        assert_eq!(package.error(), Some("Dependency graph not enabled"));
        assert_eq!(package.error_type(), Some(ErrorType::Permanent));
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_403_is_permanent_and_never_retried() {
        let (addr, requests) = spawn_server(FORBIDDEN_RESPONSE);
        let client = client_for(addr, 3);
        let mut package = resolved_package();

        let result = client.download_sbom(&mut package).await;
        assert!(result.is_none());
        assert_eq!(package.error(), Some("Access forbidden"));
        assert_eq!(package.error_type(), Some(ErrorType::Permanent));
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_error_retries_then_classifies_transient() {
        let (addr, requests) = spawn_server(SERVER_ERROR_RESPONSE);
        let client = client_for(addr, 2);
        let mut package = resolved_package();

        let result = client.download_sbom(&mut package).await;
        assert!(result.is_none());
        assert_eq!(package.error(), Some("HTTP 500"));
        assert_eq!(package.error_type(), Some(ErrorType::Transient));
        assert_eq!(requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_root_sbom_success() {
        let (addr, _requests) = spawn_server(OK_RESPONSE);
        let client = client_for(addr, 2);

        let document = client.fetch_root_sbom("tedg-dev", "beatBot").await.unwrap();
        assert!(document.is_object());
    }

    #[tokio::test]
    async fn test_root_sbom_404_is_fatal() {
        let (addr, _requests) = spawn_server(NOT_FOUND_RESPONSE);
        let client = client_for(addr, 2);

        let err = client
            .fetch_root_sbom("tedg-dev", "beatBot")
            .await
            .unwrap_err();
        assert!(format!("{}", err).contains("dependency graph not enabled (404)"));
    }
}
