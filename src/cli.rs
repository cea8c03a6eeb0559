use clap::Parser;

/// API-based GitHub SBOM dependency fetcher
#[derive(Parser, Debug)]
#[command(name = "gh-sbom")]
#[command(version)]
#[command(about = "Discover, download, and cross-reference SBOMs for a GitHub repository and its dependencies", long_about = None)]
pub struct Args {
    /// GitHub repository owner
    #[arg(long = "gh-user")]
    pub gh_user: String,

    /// GitHub repository name
    #[arg(long = "gh-repo")]
    pub gh_repo: String,

    /// Path to the keys.json credentials file
    #[arg(short, long, default_value = "keys.json")]
    pub key_file: String,

    /// Base output directory for SBOM exports
    #[arg(short, long, default_value = "sboms")]
    pub output_dir: String,

    /// Home organization to consult before the global repository search
    #[arg(long)]
    pub org: Option<String>,

    /// Path to a gh-sbom.config.yml file
    /// (auto-discovered in the current directory if omitted)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose diagnostics
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
