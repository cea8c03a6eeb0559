/// Filesystem adapters: SBOM storage, report writing, credential loading
pub mod file_writer;
pub mod sbom_repository;
pub mod token_loader;

pub use file_writer::FileSystemWriter;
pub use sbom_repository::FilesystemSbomStore;
pub use token_loader::load_token;
