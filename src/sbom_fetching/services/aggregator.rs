use crate::sbom_fetching::domain::{GitHubRepository, PackageDependency};
use std::collections::HashMap;

/// Resolved packages grouped under one deduplication key.
///
/// Members are indices into the package list the aggregation was built
/// from; the first member is the representative actually downloaded.
#[derive(Debug, Clone)]
pub struct RepositoryGroup {
    pub repository: GitHubRepository,
    pub members: Vec<usize>,
}

impl RepositoryGroup {
    /// Index of the package used for the actual download.
    pub fn representative(&self) -> usize {
        self.members[0]
    }
}

/// Result of grouping resolved packages by their GitHub repository.
///
/// Group order follows the first appearance of each repository in the
/// input, so downloads stay deterministic for a fixed document.
#[derive(Debug, Default)]
pub struct RepositoryAggregation {
    groups: Vec<RepositoryGroup>,
    resolved_packages: usize,
}

impl RepositoryAggregation {
    pub fn groups(&self) -> &[RepositoryGroup] {
        &self.groups
    }

    pub fn unique_repository_count(&self) -> usize {
        self.groups.len()
    }

    pub fn resolved_package_count(&self) -> usize {
        self.resolved_packages
    }

    /// Packages collapsed into an already-seen repository.
    /// Always equals `resolved_package_count() - unique_repository_count()`.
    pub fn duplicates_skipped(&self) -> usize {
        self.resolved_packages - self.groups.len()
    }

    /// All versions mapped to a group, in member order.
    pub fn versions_for(&self, group: &RepositoryGroup, packages: &[PackageDependency]) -> Vec<String> {
        group
            .members
            .iter()
            .map(|&i| packages[i].version().to_string())
            .collect()
    }
}

/// Group all resolved packages by their repository key.
///
/// Unresolved packages are ignored; they never reach the download stage.
pub fn aggregate(packages: &[PackageDependency]) -> RepositoryAggregation {
    let mut groups: Vec<RepositoryGroup> = Vec::new();
    let mut index_of: HashMap<GitHubRepository, usize> = HashMap::new();
    let mut resolved_packages = 0;

    for (i, pkg) in packages.iter().enumerate() {
        let Some(repository) = pkg.github_repository() else {
            continue;
        };
        resolved_packages += 1;

        match index_of.get(repository) {
            Some(&group_index) => groups[group_index].members.push(i),
            None => {
                index_of.insert(repository.clone(), groups.len());
                groups.push(RepositoryGroup {
                    repository: repository.clone(),
                    members: vec![i],
                });
            }
        }
    }

    RepositoryAggregation {
        groups,
        resolved_packages,
    }
}
