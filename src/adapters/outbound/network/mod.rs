/// Network adapters: registry resolvers, GitHub search, and the SBOM API client
pub mod actions_resolver;
pub mod github_client;
pub mod github_search;
pub mod npm_resolver;
pub mod pypi_resolver;
pub mod repo_url;
pub mod resolver_registry;
pub mod rubygems_resolver;

pub use actions_resolver::GitHubActionsStrategy;
pub use github_client::GitHubSbomClient;
pub use github_search::GitHubSearchClient;
pub use npm_resolver::NpmStrategy;
pub use pypi_resolver::PyPiStrategy;
pub use resolver_registry::ResolverRegistry;
pub use rubygems_resolver::RubyGemsStrategy;
