/// Request for one SBOM fetching run.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// GitHub repository owner
    pub owner: String,
    /// GitHub repository name
    pub repo: String,
}

impl FetchRequest {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}
