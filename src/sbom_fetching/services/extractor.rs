use crate::sbom_fetching::domain::purl;
use crate::sbom_fetching::domain::PackageDependency;
use crate::shared::Result;
use serde::Deserialize;

/// SPDXID GitHub assigns to the document's own root node.
const ROOT_SPDX_ID: &str = "SPDXRef-DOCUMENT";

/// An SPDX-like SBOM document as returned by the GitHub dependency-graph
/// API. Accepts both the wrapped form (packages nested under an `sbom`
/// key) and the bare form (`packages` at the top level).
#[derive(Debug, Clone, Deserialize)]
pub struct SbomDocument {
    #[serde(default)]
    sbom: Option<SbomBody>,
    #[serde(default)]
    packages: Vec<SbomPackage>,
}

#[derive(Debug, Clone, Deserialize)]
struct SbomBody {
    #[serde(default)]
    packages: Vec<SbomPackage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SbomPackage {
    #[serde(rename = "SPDXID", default)]
    spdx_id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "versionInfo", default)]
    version_info: String,
    #[serde(rename = "externalRefs", default)]
    external_refs: Vec<ExternalRef>,
}

#[derive(Debug, Clone, Deserialize)]
struct ExternalRef {
    #[serde(rename = "referenceType", default)]
    reference_type: String,
    #[serde(rename = "referenceLocator", default)]
    reference_locator: String,
}

/// One normalized (name, version, ecosystem, purl) tuple from a document.
#[derive(Debug, Clone)]
pub struct DependencyRecord {
    pub name: String,
    pub version: String,
    pub ecosystem: String,
    pub purl: String,
}

impl SbomDocument {
    /// Parse a raw JSON payload into a document view.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    fn package_entries(&self) -> &[SbomPackage] {
        match &self.sbom {
            Some(body) => &body.packages,
            None => &self.packages,
        }
    }

    /// Normalized dependency tuples in document order.
    ///
    /// The root document node is skipped, as is any package without a
    /// purl external reference (many SBOM entries legitimately lack one).
    /// Declared name/version fall back to the values parsed from the purl.
    pub fn dependency_records(&self) -> Vec<DependencyRecord> {
        let mut records = Vec::new();

        for pkg in self.package_entries() {
            if pkg.spdx_id == ROOT_SPDX_ID {
                continue;
            }

            let Some(purl_string) = pkg
                .external_refs
                .iter()
                .find(|r| r.reference_type == "purl")
                .map(|r| r.reference_locator.clone())
            else {
                continue;
            };
            if purl_string.is_empty() {
                continue;
            }

            let parsed = purl::parse(&purl_string);

            let name = if pkg.name.is_empty() {
                parsed.name
            } else {
                pkg.name.clone()
            };
            let version = if pkg.version_info.is_empty() {
                parsed.version
            } else {
                pkg.version_info.clone()
            };

            if name.is_empty() {
                continue;
            }

            records.push(DependencyRecord {
                name,
                version,
                ecosystem: parsed.ecosystem,
                purl: purl_string,
            });
        }

        records
    }
}

/// Extract package dependencies from an SBOM document, in document order.
///
/// Records that fail domain validation are skipped with a diagnostic;
/// extraction of the remaining packages always continues. No
/// deduplication happens here - that is the aggregator's job.
pub fn extract_packages(document: &SbomDocument) -> Vec<PackageDependency> {
    let mut packages = Vec::new();

    for record in document.dependency_records() {
        match PackageDependency::new(&record.name, &record.version, &record.purl, &record.ecosystem)
        {
            Ok(pkg) => packages.push(pkg),
            Err(e) => {
                eprintln!("⚠️  Warning: Skipping invalid package {}: {}", record.name, e);
            }
        }
    }

    packages
}
