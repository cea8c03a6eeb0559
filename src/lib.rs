//! gh-sbom - GitHub SBOM dependency fetcher
//!
//! This library discovers, downloads, and cross-references SPDX SBOM
//! documents for a GitHub repository and its transitive dependencies,
//! following hexagonal architecture.
//!
//! # Architecture
//!
//! - **Domain Layer** (`sbom_fetching`): PURL parsing, package models,
//!   extraction, aggregation, version location tracking
//! - **Application Layer** (`application`): the fetch use case and DTOs
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): registry clients, the GitHub SBOM API
//!   client, filesystem storage, console reporting, report formatters
//! - **Shared** (`shared`): common error types and the `Result` alias
//!
//! # Example
//!
//! ```no_run
//! use gh_sbom::prelude::*;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<()> {
//! let settings = Settings::default();
//! let token = load_token(Path::new("keys.json"))?;
//!
//! let search = GitHubSearchClient::new(&settings.github_api_url, &token, settings.timeout)?;
//! let resolver = ResolverRegistry::new(Box::new(search), settings.home_org.clone())
//!     .with_strategy("npm", Box::new(NpmStrategy::new(&settings.npm_registry_url, settings.timeout)?))
//!     .with_strategy("pypi", Box::new(PyPiStrategy::new(&settings.pypi_api_url, settings.timeout)?));
//!
//! let source = GitHubSbomClient::new(&settings.github_api_url, &token, settings.timeout, settings.max_retries)?;
//! let store = FilesystemSbomStore::new(Path::new("sboms"), "tedg-dev", "beatBot")?;
//! let reporter = StderrProgressReporter::new();
//!
//! let use_case = FetchSbomsUseCase::new(source, resolver, store, reporter, settings.rate_limit_pause);
//! let outcome = use_case.execute(FetchRequest::new("tedg-dev", "beatBot")).await?;
//! println!("downloaded {} SBOMs", outcome.stats.sboms_downloaded);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod sbom_fetching;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        load_token, FileSystemWriter, FilesystemSbomStore,
    };
    pub use crate::adapters::outbound::formatters::{
        ExecutionReportFormatter, VersionReportFormatter,
    };
    pub use crate::adapters::outbound::network::{
        GitHubActionsStrategy, GitHubSbomClient, GitHubSearchClient, NpmStrategy, PyPiStrategy,
        ResolverRegistry, RubyGemsStrategy,
    };
    pub use crate::application::dto::{FetchOutcome, FetchRequest, VersionMappingEntry};
    pub use crate::application::use_cases::FetchSbomsUseCase;
    pub use crate::config::Settings;
    pub use crate::ports::outbound::{
        EcosystemStrategy, OutputPresenter, ProgressReporter, RepositoryResolver,
        RepositorySearch, SbomSource, SbomStore,
    };
    pub use crate::sbom_fetching::domain::{
        ErrorType, FailureInfo, FetcherStats, GitHubRepository, PackageDependency,
        PackageVersionMap, SbomDuplicateEntry, VersionLocationTracker,
    };
    pub use crate::sbom_fetching::services::{extract_packages, SbomDocument};
    pub use crate::shared::Result;
}
