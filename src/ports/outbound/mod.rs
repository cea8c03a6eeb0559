/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (network registries, the GitHub
/// API, file system, console).
pub mod output_presenter;
pub mod progress_reporter;
pub mod repository_resolver;
pub mod sbom_source;
pub mod sbom_store;

pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use repository_resolver::{EcosystemStrategy, RepositoryResolver, RepositorySearch};
pub use sbom_source::SbomSource;
pub use sbom_store::SbomStore;
