use crate::sbom_fetching::domain::GitHubRepository;

/// Extract a GitHub repository identifier from a registry-supplied URL.
///
/// Registries hand back URLs in many shapes:
/// `git+https://github.com/owner/repo.git`, `git://github.com/owner/repo`,
/// `ssh://git@github.com/owner/repo`, `https://github.com/owner/repo#main`.
/// Normalization strips the `git+` prefix, rewrites `git://` and
/// `ssh://git@` to `https://`, drops any `#fragment`, and removes a
/// trailing `.git`. The owner/repo pair is then the first two non-empty
/// path segments after `github.com`.
///
/// Returns `None` for non-GitHub URLs or URLs with fewer than two path
/// segments.
pub fn extract_github_repository(raw_url: &str) -> Option<GitHubRepository> {
    let url = raw_url.trim().to_lowercase();
    if !url.contains("github.com") {
        return None;
    }

    let url = url.strip_prefix("git+").unwrap_or(&url);
    let url = url.replacen("git://", "https://", 1);
    let url = url.replacen("ssh://git@", "https://", 1);
    let url = url.split('#').next().unwrap_or(&url);

    let after_host = url.split("github.com").nth(1)?;
    let path = after_host.trim_start_matches([':', '/']);

    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let repo = segments.next()?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    GitHubRepository::new(owner, repo).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_https_url() {
        let repo = extract_github_repository("https://github.com/lodash/lodash").unwrap();
        assert_eq!(repo.to_string(), "lodash/lodash");
    }

    #[test]
    fn test_extract_git_plus_url_with_git_suffix() {
        let repo = extract_github_repository("git+https://github.com/lodash/lodash.git").unwrap();
        assert_eq!(repo.to_string(), "lodash/lodash");
    }

    #[test]
    fn test_extract_git_protocol_url() {
        let repo = extract_github_repository("git://github.com/expressjs/express.git").unwrap();
        assert_eq!(repo.to_string(), "expressjs/express");
    }

    #[test]
    fn test_extract_ssh_url() {
        let repo = extract_github_repository("ssh://git@github.com/psf/requests.git").unwrap();
        assert_eq!(repo.to_string(), "psf/requests");
    }

    #[test]
    fn test_extract_scp_style_url() {
        let repo = extract_github_repository("git@github.com:psf/requests.git").unwrap();
        assert_eq!(repo.to_string(), "psf/requests");
    }

    #[test]
    fn test_extract_strips_fragment() {
        let repo = extract_github_repository("https://github.com/owner/repo#main").unwrap();
        assert_eq!(repo.to_string(), "owner/repo");
    }

    #[test]
    fn test_extract_ignores_extra_path_segments() {
        let repo =
            extract_github_repository("https://github.com/owner/repo/tree/main/docs").unwrap();
        assert_eq!(repo.to_string(), "owner/repo");
    }

    #[test]
    fn test_extract_lowercases_result() {
        let repo = extract_github_repository("https://github.com/PSF/Requests").unwrap();
        assert_eq!(repo.to_string(), "psf/requests");
    }

    #[test]
    fn test_extract_rejects_non_github_url() {
        assert!(extract_github_repository("https://gitlab.com/owner/repo").is_none());
    }

    #[test]
    fn test_extract_rejects_owner_only_url() {
        assert!(extract_github_repository("https://github.com/owner").is_none());
    }

    #[test]
    fn test_extract_rejects_empty_string() {
        assert!(extract_github_repository("").is_none());
    }
}
