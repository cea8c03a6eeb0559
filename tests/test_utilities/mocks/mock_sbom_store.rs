use gh_sbom::prelude::*;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Mock SbomStore recording what was persisted, keyed by file name.
#[derive(Default)]
pub struct MockSbomStore {
    pub saved_sboms: Arc<Mutex<Vec<String>>>,
    pub saved_mappings: Arc<Mutex<Vec<BTreeMap<String, String>>>>,
}

impl MockSbomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SbomStore for MockSbomStore {
    fn save_root_sbom(
        &self,
        owner: &str,
        repo: &str,
        _document: &serde_json::Value,
    ) -> Result<String> {
        let file_name = format!("{}_{}_root.json", owner, repo);
        self.saved_sboms.lock().unwrap().push(file_name.clone());
        Ok(file_name)
    }

    fn save_dependency_sbom(
        &self,
        repository: &GitHubRepository,
        _document: &serde_json::Value,
    ) -> Result<String> {
        let file_name = format!("{}_{}_current.json", repository.owner(), repository.repo());
        self.saved_sboms.lock().unwrap().push(file_name.clone());
        Ok(file_name)
    }

    fn save_version_mapping(
        &self,
        mapping: &BTreeMap<String, VersionMappingEntry>,
    ) -> Result<String> {
        let summary = mapping
            .iter()
            .map(|(k, v)| (k.clone(), v.sbom_file.clone()))
            .collect();
        self.saved_mappings.lock().unwrap().push(summary);
        Ok("version_mapping.json".to_string())
    }
}
