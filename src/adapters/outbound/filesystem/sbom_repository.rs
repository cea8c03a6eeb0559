use crate::application::dto::VersionMappingEntry;
use crate::ports::outbound::SbomStore;
use crate::sbom_fetching::domain::GitHubRepository;
use crate::shared::error::FetchError;
use crate::shared::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem SBOM store using the timestamped export layout:
///
/// ```text
/// <output>/sbom_export_<timestamp>/<owner>_<repo>/
///   <owner>_<repo>_root.json
///   version_mapping.json
///   dependencies/<owner>_<repo>_current.json
/// ```
///
/// Dependency files are named `_current.json` because GitHub's SBOM API
/// serves only the repository's current default-branch state, never a
/// version-specific snapshot.
pub struct FilesystemSbomStore {
    export_dir: PathBuf,
    dependencies_dir: PathBuf,
}

impl FilesystemSbomStore {
    pub fn new(base_output_dir: &Path, owner: &str, repo: &str) -> Result<Self> {
        let timestamp = chrono::Local::now().format("%Y-%m-%d_%H.%M.%S");
        let export_dir = base_output_dir
            .join(format!("sbom_export_{}", timestamp))
            .join(format!("{}_{}", owner, repo));
        let dependencies_dir = export_dir.join("dependencies");

        fs::create_dir_all(&dependencies_dir).map_err(|e| FetchError::OutputDirError {
            path: dependencies_dir.clone(),
            details: e.to_string(),
        })?;

        Ok(Self {
            export_dir,
            dependencies_dir,
        })
    }

    /// Directory this run's artifacts land in.
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    fn write_json(&self, path: &Path, value: &impl serde::Serialize) -> Result<()> {
        let content =
            serde_json::to_string_pretty(value).map_err(|e| FetchError::FileWriteError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;
        fs::write(path, content).map_err(|e| FetchError::FileWriteError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        Ok(())
    }
}

impl SbomStore for FilesystemSbomStore {
    fn save_root_sbom(
        &self,
        owner: &str,
        repo: &str,
        document: &serde_json::Value,
    ) -> Result<String> {
        let file_name = format!("{}_{}_root.json", owner, repo);
        self.write_json(&self.export_dir.join(&file_name), document)?;
        Ok(file_name)
    }

    fn save_dependency_sbom(
        &self,
        repository: &GitHubRepository,
        document: &serde_json::Value,
    ) -> Result<String> {
        let file_name = format!("{}_{}_current.json", repository.owner(), repository.repo());
        self.write_json(&self.dependencies_dir.join(&file_name), document)?;
        Ok(file_name)
    }

    fn save_version_mapping(
        &self,
        mapping: &BTreeMap<String, VersionMappingEntry>,
    ) -> Result<String> {
        let file_name = "version_mapping.json".to_string();
        self.write_json(&self.export_dir.join(&file_name), mapping)?;
        Ok(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store(temp_dir: &TempDir) -> FilesystemSbomStore {
        FilesystemSbomStore::new(temp_dir.path(), "tedg-dev", "beatBot").unwrap()
    }

    #[test]
    fn test_new_creates_export_layout() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        assert!(store.export_dir().is_dir());
        assert!(store.export_dir().join("dependencies").is_dir());
        assert!(store
            .export_dir()
            .to_string_lossy()
            .contains("tedg-dev_beatBot"));
    }

    #[test]
    fn test_save_root_sbom() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        let file_name = store
            .save_root_sbom("tedg-dev", "beatBot", &json!({"sbom": {"packages": []}}))
            .unwrap();

        assert_eq!(file_name, "tedg-dev_beatBot_root.json");
        let written = fs::read_to_string(store.export_dir().join(&file_name)).unwrap();
        assert!(written.contains("packages"));
    }

    #[test]
    fn test_save_dependency_sbom() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        let repository = GitHubRepository::new("lodash", "lodash").unwrap();

        let file_name = store
            .save_dependency_sbom(&repository, &json!({"packages": []}))
            .unwrap();

        assert_eq!(file_name, "lodash_lodash_current.json");
        assert!(store
            .export_dir()
            .join("dependencies")
            .join(&file_name)
            .exists());
    }

    #[test]
    fn test_save_version_mapping() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        let mut mapping = BTreeMap::new();
        mapping.insert(
            "lodash/lodash".to_string(),
            VersionMappingEntry {
                sbom_file: "lodash_lodash_current.json".to_string(),
                package_name: "lodash".to_string(),
                ecosystem: "npm".to_string(),
                versions_in_dependency_tree: vec!["4.17.21".to_string()],
                note: VersionMappingEntry::CURRENT_STATE_NOTE.to_string(),
            },
        );

        let file_name = store.save_version_mapping(&mapping).unwrap();
        assert_eq!(file_name, "version_mapping.json");

        let written = fs::read_to_string(store.export_dir().join(&file_name)).unwrap();
        assert!(written.contains("lodash/lodash"));
        assert!(written.contains("versions_in_dependency_tree"));
    }
}
