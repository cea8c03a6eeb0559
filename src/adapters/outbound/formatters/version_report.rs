use crate::sbom_fetching::domain::VersionLocationTracker;
use std::path::Path;

/// VersionReportFormatter - Markdown version location report
///
/// Cross-references every (package, version) pair against the SBOM
/// documents it appeared in: packages seen with multiple versions across
/// the dependency tree, and documents that list the same package twice.
pub struct VersionReportFormatter;

impl VersionReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn file_name(owner: &str, repo: &str) -> String {
        format!("{}_{}_version_location_report.md", owner, repo)
    }

    pub fn format(
        &self,
        owner: &str,
        repo: &str,
        export_dir: &Path,
        tracker: &VersionLocationTracker,
    ) -> String {
        let mut output = String::new();

        output.push_str("# Version Location Report\n\n");

        let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        output.push_str(&format!("**Repository:** `{}/{}`  \n", owner, repo));
        output.push_str(&format!("**Generated:** {}  \n", generated));
        output.push_str(&format!(
            "**Output Directory:** `{}`\n\n",
            export_dir.display()
        ));

        let multi_version = tracker.packages_with_multiple_versions();
        let duplicates = tracker.sbom_duplicates();

        output.push_str("## Overview\n\n");
        output.push_str(&format!(
            "- **Packages with multiple versions:** {}\n",
            multi_version.len()
        ));
        output.push_str(&format!(
            "- **SBOMs with duplicate package instances:** {}\n",
            duplicates.len()
        ));
        output.push_str(&format!(
            "- **Total unique packages tracked:** {}\n\n",
            tracker.unique_package_count()
        ));

        output.push_str("## Packages with Multiple Versions\n\n");
        if multi_version.is_empty() {
            output.push_str("No packages with multiple versions were found.\n\n");
        } else {
            for map in &multi_version {
                output.push_str(&format!("### {}\n\n", map.package_name));
                output.push_str(&format!("- **Ecosystem:** {}\n", map.ecosystem));
                output.push_str(&format!(
                    "- **Distinct Versions:** {}\n\n",
                    map.version_count()
                ));
                output.push_str("| Version | Found In |\n");
                output.push_str("|---------|----------|\n");
                for location in map.sorted_versions() {
                    let files: Vec<String> = location
                        .sbom_files()
                        .iter()
                        .map(|f| format!("`{}`", f))
                        .collect();
                    output.push_str(&format!(
                        "| {} | {} |\n",
                        location.version,
                        files.join(", ")
                    ));
                }
                output.push('\n');
            }
        }

        output.push_str("## SBOM Internal Duplicates\n\n");
        if duplicates.is_empty() {
            output.push_str(
                "No SBOMs contain multiple instances of the same package.\n\n",
            );
        } else {
            output.push_str(
                "The following documents list the same package with more than one version:\n\n",
            );
            output.push_str("| SBOM File | Package | Ecosystem | Versions |\n");
            output.push_str("|-----------|---------|-----------|----------|\n");
            for entry in duplicates {
                output.push_str(&format!(
                    "| `{}` | {} | {} | {} |\n",
                    entry.sbom_file,
                    entry.package_name,
                    entry.ecosystem,
                    entry.versions.join(", ")
                ));
            }
            output.push('\n');
        }

        output.push_str("## Summary Statistics\n\n");
        output.push_str(&format!(
            "- **Total SBOMs analyzed:** {}\n",
            tracker.sboms_analyzed()
        ));
        output.push_str(&format!(
            "- **Total unique packages:** {}\n",
            tracker.unique_package_count()
        ));
        output.push_str(&format!(
            "- **Total package-version combinations:** {}\n",
            tracker.total_version_combinations()
        ));
        output.push_str(&format!(
            "- **Packages with version conflicts:** {}\n",
            multi_version.len()
        ));
        output.push_str(&format!(
            "- **SBOMs with internal duplicates:** {}\n\n",
            duplicates.len()
        ));

        output.push_str("### About This Report\n\n");
        output.push_str(
            "This report cross-references the root SBOM and every downloaded \
             dependency SBOM, listing packages that appear with multiple versions \
             somewhere in the dependency tree and documents that declare the same \
             package more than once.\n\n",
        );

        output.push_str("---\n\n");
        output.push_str("*Generated by gh-sbom*  \n");
        output.push_str("*For more information, see README.md*\n");

        output
    }
}

impl Default for VersionReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
