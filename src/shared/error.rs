use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every dependency SBOM was downloaded
    Success = 0,
    /// The run completed but one or more SBOM downloads failed
    DownloadsFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::DownloadsFailed => write!(f, "Downloads Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for SBOM fetching.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Keys file not found: {}\n\n💡 Hint: {}", .path.display(), .suggestion)]
    KeyFileNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse keys file: {}\nDetails: {}\n\n💡 Hint: The keys file must be valid JSON containing a \"github_token\" field", .path.display(), .details)]
    KeyFileParseError { path: PathBuf, details: String },

    #[error("No GitHub token found in keys file: {}\n\n💡 Hint: Add a \"github_token\" entry, or an \"accounts\" list whose first entry has a \"token\" field", .path.display())]
    MissingToken { path: PathBuf },

    #[error("Root SBOM unavailable for {owner}/{repo}: {reason}\n\n💡 Hint: {hint}")]
    RootSbomUnavailable {
        owner: String,
        repo: String,
        reason: String,
        hint: String,
    },

    #[error("Failed to write to file: {}\nDetails: {}\n\n💡 Hint: Please verify that the directory exists and you have write permissions", .path.display(), .details)]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to create output directory: {}\nDetails: {}\n\n💡 Hint: Please verify the output path is writable", .path.display(), .details)]
    OutputDirError { path: PathBuf, details: String },

    /// Validation error for domain value objects
    #[error("Validation error: {message}")]
    Validation { message: String },
}
