use crate::shared::error::FetchError;
use crate::shared::Result;
use std::fmt;

/// Classification of a download failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Retrying will not help (403, 404, unsupported ecosystem, missing mapping)
    Permanent,
    /// Retrying may help (429, 5xx, network errors)
    Transient,
    /// Fallback when no classification was recorded; counted as permanent
    Unknown,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorType::Permanent => write!(f, "permanent"),
            ErrorType::Transient => write!(f, "transient"),
            ErrorType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Immutable GitHub repository identifier.
///
/// Owner and repo are lower-cased at construction so that equality,
/// hashing, and deduplication are independent of registry casing quirks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GitHubRepository {
    owner: String,
    repo: String,
}

impl GitHubRepository {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Result<Self> {
        let owner = owner.into().to_lowercase();
        let repo = repo.into().to_lowercase();

        if owner.is_empty() || repo.is_empty() {
            return Err(FetchError::Validation {
                message: "Owner and repo must be non-empty strings".to_string(),
            }
            .into());
        }

        Ok(Self { owner, repo })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl fmt::Display for GitHubRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// One dependency entry extracted from an SBOM document.
///
/// Created by the extractor; the resolver records the GitHub repository
/// and the download orchestrator records the outcome. Each of those
/// fields is written at most once over the lifetime of a run.
#[derive(Debug, Clone)]
pub struct PackageDependency {
    name: String,
    version: String,
    purl: String,
    ecosystem: String,
    github_repository: Option<GitHubRepository>,
    sbom_downloaded: bool,
    error: Option<String>,
    error_type: Option<ErrorType>,
}

impl PackageDependency {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        purl: impl Into<String>,
        ecosystem: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let purl = purl.into();
        let ecosystem = ecosystem.into();

        if name.is_empty() {
            return Err(FetchError::Validation {
                message: "Package name cannot be empty".to_string(),
            }
            .into());
        }
        if purl.is_empty() {
            return Err(FetchError::Validation {
                message: "PURL cannot be empty".to_string(),
            }
            .into());
        }
        if ecosystem.is_empty() {
            return Err(FetchError::Validation {
                message: "Ecosystem cannot be empty".to_string(),
            }
            .into());
        }

        Ok(Self {
            name,
            version: version.into(),
            purl,
            ecosystem,
            github_repository: None,
            sbom_downloaded: false,
            error: None,
            error_type: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn purl(&self) -> &str {
        &self.purl
    }

    pub fn ecosystem(&self) -> &str {
        &self.ecosystem
    }

    pub fn github_repository(&self) -> Option<&GitHubRepository> {
        self.github_repository.as_ref()
    }

    pub fn sbom_downloaded(&self) -> bool {
        self.sbom_downloaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn error_type(&self) -> Option<ErrorType> {
        self.error_type
    }

    /// Record the repository this package resolved to.
    pub fn set_repository(&mut self, repository: GitHubRepository) {
        self.github_repository = Some(repository);
    }

    /// Mark the dependency SBOM as successfully downloaded.
    pub fn mark_downloaded(&mut self) {
        self.sbom_downloaded = true;
    }

    /// Record a download failure with its classification.
    pub fn record_failure(&mut self, error: impl Into<String>, error_type: ErrorType) {
        self.error = Some(error.into());
        self.error_type = Some(error_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_repository_new_valid() {
        let repo = GitHubRepository::new("lodash", "lodash").unwrap();
        assert_eq!(repo.owner(), "lodash");
        assert_eq!(repo.repo(), "lodash");
        assert_eq!(format!("{}", repo), "lodash/lodash");
    }

    #[test]
    fn test_github_repository_lowercases_fields() {
        let repo = GitHubRepository::new("Lodash", "LoDash").unwrap();
        assert_eq!(repo.owner(), "lodash");
        assert_eq!(repo.repo(), "lodash");
    }

    #[test]
    fn test_github_repository_equality_ignores_case() {
        let a = GitHubRepository::new("PSF", "Requests").unwrap();
        let b = GitHubRepository::new("psf", "requests").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_github_repository_empty_owner() {
        assert!(GitHubRepository::new("", "repo").is_err());
    }

    #[test]
    fn test_github_repository_empty_repo() {
        assert!(GitHubRepository::new("owner", "").is_err());
    }

    #[test]
    fn test_package_dependency_new_valid() {
        let pkg = PackageDependency::new("lodash", "4.17.21", "pkg:npm/lodash@4.17.21", "npm")
            .unwrap();
        assert_eq!(pkg.name(), "lodash");
        assert_eq!(pkg.version(), "4.17.21");
        assert_eq!(pkg.ecosystem(), "npm");
        assert!(pkg.github_repository().is_none());
        assert!(!pkg.sbom_downloaded());
        assert!(pkg.error().is_none());
    }

    #[test]
    fn test_package_dependency_empty_version_allowed() {
        let pkg = PackageDependency::new("lodash", "", "pkg:npm/lodash", "npm");
        assert!(pkg.is_ok());
    }

    #[test]
    fn test_package_dependency_empty_name_rejected() {
        assert!(PackageDependency::new("", "1.0", "pkg:npm/x@1.0", "npm").is_err());
    }

    #[test]
    fn test_package_dependency_empty_purl_rejected() {
        assert!(PackageDependency::new("x", "1.0", "", "npm").is_err());
    }

    #[test]
    fn test_package_dependency_empty_ecosystem_rejected() {
        assert!(PackageDependency::new("x", "1.0", "pkg:npm/x@1.0", "").is_err());
    }

    #[test]
    fn test_record_failure() {
        let mut pkg =
            PackageDependency::new("lodash", "4.17.21", "pkg:npm/lodash@4.17.21", "npm").unwrap();
        pkg.record_failure("Rate limited", ErrorType::Transient);
        assert_eq!(pkg.error(), Some("Rate limited"));
        assert_eq!(pkg.error_type(), Some(ErrorType::Transient));
    }

    #[test]
    fn test_error_type_display() {
        assert_eq!(format!("{}", ErrorType::Permanent), "permanent");
        assert_eq!(format!("{}", ErrorType::Transient), "transient");
        assert_eq!(format!("{}", ErrorType::Unknown), "unknown");
    }
}
