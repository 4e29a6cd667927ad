// GitHub API endpoint functions.
// Fetches the raw issue list for a repository.

use async_trait::async_trait;

use crate::error::Result;

use super::IssueSource;
use super::client::GitHubClient;
use super::types::RepoKey;

impl GitHubClient {
    /// Get all issues and pull requests for a repository, any state, as raw JSON bytes.
    pub async fn get_issues(&self, repo: &RepoKey) -> Result<Vec<u8>> {
        let params = [("state", "all")];
        let response = self
            .get_with_params(
                repo,
                &format!("/repos/{}/{}/issues", repo.org, repo.name),
                &params,
            )
            .await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl IssueSource for GitHubClient {
    async fn fetch(&self, repo: &RepoKey) -> Result<Vec<u8>> {
        self.get_issues(repo).await
    }
}
