/// Data transfer objects for the application layer
pub mod fetch_outcome;
pub mod fetch_request;

pub use fetch_outcome::{FetchOutcome, VersionMappingEntry};
pub use fetch_request::FetchRequest;
