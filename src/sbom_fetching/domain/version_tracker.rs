use crate::sbom_fetching::services::extractor::SbomDocument;
use std::collections::{BTreeMap, BTreeSet};

/// Sort key substituted for version segments that are not plain integers,
/// so that non-numeric segments sort after all numeric ones.
const NON_NUMERIC_SENTINEL: u64 = 999_999;

/// Best-effort numeric sort key for a version string.
///
/// Each dot/hyphen-delimited segment is parsed as an integer when
/// possible; non-numeric segments get a large sentinel value.
pub fn version_sort_key(version: &str) -> Vec<u64> {
    if version.is_empty() {
        return vec![NON_NUMERIC_SENTINEL];
    }
    version
        .split(['.', '-'])
        .map(|segment| segment.parse::<u64>().unwrap_or(NON_NUMERIC_SENTINEL))
        .collect()
}

/// Every source document a single (package, version) pair was observed in.
#[derive(Debug, Clone)]
pub struct VersionLocation {
    pub version: String,
    sbom_files: Vec<String>,
}

impl VersionLocation {
    fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            sbom_files: Vec::new(),
        }
    }

    /// Record a source document; repeated observations are collapsed.
    pub fn add_location(&mut self, sbom_file: &str) {
        if !self.sbom_files.iter().any(|f| f == sbom_file) {
            self.sbom_files.push(sbom_file.to_string());
        }
    }

    pub fn sbom_files(&self) -> &[String] {
        &self.sbom_files
    }
}

/// All versions observed for one (ecosystem, package name) pair, with the
/// documents each version was seen in. Grows monotonically during a run.
#[derive(Debug, Clone)]
pub struct PackageVersionMap {
    pub package_name: String,
    pub ecosystem: String,
    versions: BTreeMap<String, VersionLocation>,
}

impl PackageVersionMap {
    fn new(package_name: impl Into<String>, ecosystem: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ecosystem: ecosystem.into(),
            versions: BTreeMap::new(),
        }
    }

    pub fn add_version(&mut self, version: &str, sbom_file: &str) {
        self.versions
            .entry(version.to_string())
            .or_insert_with(|| VersionLocation::new(version))
            .add_location(sbom_file);
    }

    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    pub fn has_multiple_versions(&self) -> bool {
        self.versions.len() > 1
    }

    pub fn location(&self, version: &str) -> Option<&VersionLocation> {
        self.versions.get(version)
    }

    /// Versions ordered by the numeric sort key, for display.
    pub fn sorted_versions(&self) -> Vec<&VersionLocation> {
        let mut locations: Vec<&VersionLocation> = self.versions.values().collect();
        locations.sort_by_key(|location| version_sort_key(&location.version));
        locations
    }
}

/// A single source document that listed the same (package, ecosystem) pair
/// with two or more distinct versions.
#[derive(Debug, Clone)]
pub struct SbomDuplicateEntry {
    pub sbom_file: String,
    pub package_name: String,
    pub ecosystem: String,
    /// Sorted, deduplicated list of the distinct versions
    pub versions: Vec<String>,
}

/// Tracks where every (package, version) pair was observed across all SBOM
/// documents processed in a run, and which documents carry internal
/// duplicates. Pure bookkeeping; no resolution, no network.
#[derive(Debug, Default)]
pub struct VersionLocationTracker {
    package_map: BTreeMap<String, PackageVersionMap>,
    duplicates: Vec<SbomDuplicateEntry>,
    sboms_analyzed: usize,
}

impl VersionLocationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one SBOM document under the given document identifier.
    ///
    /// Records every (package, version) tuple the document lists, and emits
    /// a duplicate entry when the same (package, ecosystem) pair appears
    /// with more than one distinct version inside this document.
    pub fn observe(&mut self, document: &SbomDocument, document_id: &str) {
        self.sboms_analyzed += 1;

        let mut seen_in_document: BTreeMap<(String, String), BTreeSet<String>> = BTreeMap::new();

        for record in document.dependency_records() {
            let key = format!("{}:{}", record.ecosystem, record.name);
            self.package_map
                .entry(key)
                .or_insert_with(|| PackageVersionMap::new(&record.name, &record.ecosystem))
                .add_version(&record.version, document_id);

            seen_in_document
                .entry((record.name.clone(), record.ecosystem.clone()))
                .or_default()
                .insert(record.version.clone());
        }

        for ((name, ecosystem), versions) in seen_in_document {
            if versions.len() > 1 {
                let mut versions: Vec<String> = versions.into_iter().collect();
                versions.sort_by_key(|v| version_sort_key(v));
                self.duplicates.push(SbomDuplicateEntry {
                    sbom_file: document_id.to_string(),
                    package_name: name,
                    ecosystem,
                    versions,
                });
            }
        }
    }

    /// Packages observed with two or more distinct versions across all
    /// documents processed so far.
    pub fn packages_with_multiple_versions(&self) -> Vec<&PackageVersionMap> {
        self.package_map
            .values()
            .filter(|map| map.has_multiple_versions())
            .collect()
    }

    /// Documents that listed the same package with multiple versions.
    pub fn sbom_duplicates(&self) -> &[SbomDuplicateEntry] {
        &self.duplicates
    }

    pub fn tracked_package(&self, ecosystem: &str, name: &str) -> Option<&PackageVersionMap> {
        self.package_map.get(&format!("{}:{}", ecosystem, name))
    }

    pub fn unique_package_count(&self) -> usize {
        self.package_map.len()
    }

    pub fn total_version_combinations(&self) -> usize {
        self.package_map.values().map(|m| m.version_count()).sum()
    }

    pub fn sboms_analyzed(&self) -> usize {
        self.sboms_analyzed
    }
}
