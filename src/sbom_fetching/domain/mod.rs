/// Domain models for SBOM fetching
pub mod package;
pub mod purl;
pub mod stats;
pub mod version_tracker;

pub use package::{ErrorType, GitHubRepository, PackageDependency};
pub use stats::{FailureInfo, FetcherStats};
pub use version_tracker::{
    PackageVersionMap, SbomDuplicateEntry, VersionLocation, VersionLocationTracker,
};
