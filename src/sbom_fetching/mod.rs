/// SBOM fetching domain layer: models and domain services
pub mod domain;
pub mod services;
