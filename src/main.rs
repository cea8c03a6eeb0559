use gh_sbom::adapters::outbound::console::StderrProgressReporter;
use gh_sbom::adapters::outbound::filesystem::{load_token, FileSystemWriter, FilesystemSbomStore};
use gh_sbom::adapters::outbound::formatters::{ExecutionReportFormatter, VersionReportFormatter};
use gh_sbom::adapters::outbound::network::{
    GitHubSbomClient, GitHubSearchClient, NpmStrategy, PyPiStrategy, ResolverRegistry,
    RubyGemsStrategy,
};
use gh_sbom::application::dto::{FetchOutcome, FetchRequest};
use gh_sbom::application::use_cases::FetchSbomsUseCase;
use gh_sbom::cli::Args;
use gh_sbom::config::{self, Settings};
use gh_sbom::ports::outbound::OutputPresenter;
use gh_sbom::sbom_fetching::domain::ErrorType;
use gh_sbom::shared::error::ExitCode;
use gh_sbom::shared::Result;
use owo_colors::OwoColorize;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run() -> Result<ExitCode> {
    let args = Args::parse_args();

    // Load configuration (explicit path, or discovery in the current directory)
    let config_file = match &args.config {
        Some(path) => Some(config::load_config_from_path(Path::new(path))?),
        None => config::discover_config(Path::new("."))?,
    };
    let mut settings = Settings::with_config(config_file.unwrap_or_default());
    if args.org.is_some() {
        settings.home_org = args.org.clone();
    }

    if args.debug {
        eprintln!("🔧 GitHub API: {}", settings.github_api_url);
        eprintln!("🔧 Max retries: {}", settings.max_retries);
        if let Some(org) = &settings.home_org {
            eprintln!("🔧 Home organization: {}", org);
        }
    }

    // Load credentials before touching the filesystem layout
    eprintln!("🔑 Loading GitHub token...");
    let token = load_token(Path::new(&args.key_file))?;

    // Create output layout
    let store = FilesystemSbomStore::new(Path::new(&args.output_dir), &args.gh_user, &args.gh_repo)?;
    let export_dir = store.export_dir().to_path_buf();
    eprintln!("📁 Output directory: {}", export_dir.display());

    // Wire adapters (dependency injection)
    let search = GitHubSearchClient::new(&settings.github_api_url, &token, settings.timeout)?;
    let resolver = ResolverRegistry::new(Box::new(search), settings.home_org.clone())
        .with_strategy(
            "npm",
            Box::new(NpmStrategy::new(&settings.npm_registry_url, settings.timeout)?),
        )
        .with_strategy(
            "pypi",
            Box::new(PyPiStrategy::new(&settings.pypi_api_url, settings.timeout)?),
        )
        .with_strategy(
            "gem",
            Box::new(RubyGemsStrategy::new(
                &settings.rubygems_api_url,
                settings.timeout,
            )?),
        );

    let sbom_source = GitHubSbomClient::new(
        &settings.github_api_url,
        &token,
        settings.timeout,
        settings.max_retries,
    )?;
    let progress_reporter = StderrProgressReporter::new();

    // Create use case with injected dependencies and execute
    let use_case = FetchSbomsUseCase::new(
        sbom_source,
        resolver,
        store,
        progress_reporter,
        settings.rate_limit_pause,
    );
    let request = FetchRequest::new(&args.gh_user, &args.gh_repo);
    let outcome = use_case.execute(request).await?;

    // Reporting happens outside the pipeline: format and write both reports
    write_reports(&args.gh_user, &args.gh_repo, &export_dir, &outcome)?;

    print_summary(&outcome, &export_dir);

    if outcome.success() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::DownloadsFailed)
    }
}

fn write_reports(owner: &str, repo: &str, export_dir: &Path, outcome: &FetchOutcome) -> Result<()> {
    let execution_report =
        ExecutionReportFormatter::new().format(owner, repo, export_dir, outcome);
    let execution_file = ExecutionReportFormatter::file_name(owner, repo);
    FileSystemWriter::new(export_dir.join(&execution_file)).present(&execution_report)?;
    eprintln!("📝 Generated execution report: {}", execution_file);

    let version_report =
        VersionReportFormatter::new().format(owner, repo, export_dir, &outcome.version_tracker);
    let version_file = VersionReportFormatter::file_name(owner, repo);
    FileSystemWriter::new(export_dir.join(&version_file)).present(&version_report)?;
    eprintln!("📝 Generated version location report: {}", version_file);

    Ok(())
}

fn print_summary(outcome: &FetchOutcome, export_dir: &Path) {
    let stats = &outcome.stats;

    eprintln!();
    eprintln!("{}", "=".repeat(70));
    eprintln!("SUMMARY");
    eprintln!("{}", "=".repeat(70));
    eprintln!();
    eprintln!("Packages in root SBOM: {}", stats.packages_in_sbom);
    eprintln!("Mapped to GitHub repos: {}", stats.github_repos_mapped);
    eprintln!("Unique repositories: {}", stats.unique_repos);
    eprintln!("Duplicate versions skipped: {}", stats.duplicates_skipped);
    eprintln!(
        "Packages without GitHub repos: {}",
        stats.packages_without_github
    );
    eprintln!();
    eprintln!(
        "SBOMs downloaded successfully: {}",
        stats.sboms_downloaded.green()
    );
    eprintln!(
        "SBOMs failed (permanent): {}",
        stats.sboms_failed_permanent.red()
    );
    eprintln!(
        "SBOMs failed (transient): {}",
        stats.sboms_failed_transient.yellow()
    );
    eprintln!("SBOMs failed (total): {}", stats.sboms_failed());
    eprintln!("Elapsed time: {}", stats.elapsed_time());
    eprintln!("Output directory: {}", export_dir.display());
    eprintln!();
    eprintln!("NOTE: GitHub's SBOM API only provides SBOMs for the current state");
    eprintln!("      of repositories (default branch), not for specific versions.");
    eprintln!("      See version_mapping.json for details on version deduplication.");
    eprintln!();

    if !outcome.failed_downloads.is_empty() {
        eprintln!("{}", "=".repeat(70));
        eprintln!("Failed SBOM Downloads");
        eprintln!("{}", "=".repeat(70));
        eprintln!();

        let permanent: Vec<_> = outcome
            .failed_downloads
            .iter()
            .filter(|f| f.error_type != ErrorType::Transient)
            .collect();
        let transient: Vec<_> = outcome
            .failed_downloads
            .iter()
            .filter(|f| f.error_type == ErrorType::Transient)
            .collect();

        if !permanent.is_empty() {
            eprintln!(
                "{} ({}):",
                "🔴 PERMANENT FAILURES".red(),
                permanent.len()
            );
            eprintln!("   (These will consistently fail until fixed)");
            eprintln!();
            for failure in permanent {
                eprintln!("  ❌ {}", failure.repository);
                eprintln!(
                    "     Package: {} ({})",
                    failure.package_name, failure.ecosystem
                );
                eprintln!("     Versions: {}", failure.versions.join(", "));
                eprintln!("     Error: {}", failure.error);
                eprintln!();
            }
        }

        if !transient.is_empty() {
            eprintln!(
                "{} ({}):",
                "⚠️  TRANSIENT FAILURES".yellow(),
                transient.len()
            );
            eprintln!("   (These may succeed on retry)");
            eprintln!();
            for failure in transient {
                eprintln!("  ⚠️  {}", failure.repository);
                eprintln!(
                    "     Package: {} ({})",
                    failure.package_name, failure.ecosystem
                );
                eprintln!("     Versions: {}", failure.versions.join(", "));
                eprintln!("     Error: {}", failure.error);
                eprintln!();
            }
        }
    }

    eprintln!("✅ Done!");
}
