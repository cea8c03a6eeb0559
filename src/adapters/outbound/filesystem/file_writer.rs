use crate::ports::outbound::OutputPresenter;
use crate::shared::error::FetchError;
use crate::shared::Result;
use std::fs;
use std::path::PathBuf;

/// FileSystemWriter adapter for writing report output to a file.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    /// Refuse to write through a symlink.
    fn validate_output_security(&self) -> Result<()> {
        if self.output_path.exists() {
            let metadata =
                fs::symlink_metadata(&self.output_path).map_err(|e| FetchError::FileWriteError {
                    path: self.output_path.clone(),
                    details: format!("Failed to read file metadata: {}", e),
                })?;

            if metadata.is_symlink() {
                return Err(FetchError::FileWriteError {
                    path: self.output_path.clone(),
                    details: "Output path is a symbolic link; writing through symbolic links is not allowed".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.validate_output_security()?;

        fs::write(&self.output_path, content).map_err(|e| FetchError::FileWriteError {
            path: self.output_path.clone(),
            details: e.to_string(),
        })?;

        Ok(())
    }
}
