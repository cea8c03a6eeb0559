/// Application use cases
pub mod fetch_sboms;

pub use fetch_sboms::FetchSbomsUseCase;
