#![doc = "GitHub REST implementation of the core SourceProvider seam."]
//
//! # GitHub Source Provider (CLI <-> Core)
//!
//! Bridges the [`SourceProvider`] trait to the GitHub REST API: repository
//! listing (paginated), README fetch + base64 decode, per-path last-commit
//! lookup and the per-repository language breakdown.
//!
//! - Construct [`GithubProvider`] from the environment (`GITHUB_TOKEN`).
//! - All transport, serialization and error handling are encapsulated here;
//!   the core crate only ever sees [`RepoMeta`] and [`ReadmeFile`] values.

use async_trait::async_trait;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, error, info};

use portfolio_sync_core::contract::{ProviderError, ReadmeFile, RepoMeta, SourceProvider};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "portfolio-sync";
const PAGE_SIZE: usize = 100;

pub struct GithubProvider {
    client: reqwest::Client,
    token: String,
    api_base: String,
}

impl GithubProvider {
    pub fn new_from_env() -> Result<Self, ProviderError> {
        dotenvy::dotenv().ok();
        match std::env::var("GITHUB_TOKEN") {
            Ok(token) => {
                info!(token_set = !token.is_empty(), "Initialized GithubProvider from environment");
                Ok(Self::new(token, DEFAULT_API_BASE))
            }
            Err(e) => {
                error!(error = ?e, "GITHUB_TOKEN missing in environment");
                Err(Box::new(e))
            }
        }
    }

    /// Construct against an explicit API base (used by tests).
    pub fn new(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            api_base: api_base.into(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        debug!(url = %url, "GitHub API request");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .bearer_auth(&self.token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to decode response body>"));
            error!(status = %status, url = %url, "GitHub API returned error. Response body: {body}");
            return Err(format!("GitHub API error {status} for {url}").into());
        }
        Ok(response.json::<T>().await?)
    }
}

#[derive(Debug, Deserialize)]
struct ApiRepo {
    name: String,
    private: bool,
    owner: ApiOwner,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct ApiOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct ApiReadme {
    path: String,
    content: String,
    encoding: String,
}

#[derive(Debug, Deserialize)]
struct ApiCommit {
    commit: ApiCommitDetail,
}

#[derive(Debug, Deserialize)]
struct ApiCommitDetail {
    author: Option<ApiGitActor>,
}

#[derive(Debug, Deserialize)]
struct ApiGitActor {
    date: DateTime<Utc>,
}

#[async_trait]
impl SourceProvider for GithubProvider {
    async fn list_owned_repos(&self) -> Result<Vec<RepoMeta>, ProviderError> {
        let mut repos: Vec<ApiRepo> = Vec::new();
        let mut page = 1usize;
        loop {
            let url = format!(
                "{}/user/repos?per_page={}&page={}",
                self.api_base, PAGE_SIZE, page
            );
            let batch: Vec<ApiRepo> = self.get_json(&url).await?;
            let size = batch.len();
            repos.extend(batch);
            if size < PAGE_SIZE {
                break;
            }
            page += 1;
        }
        info!(count = repos.len(), "Listed repositories");

        let mut metas = Vec::with_capacity(repos.len());
        for repo in repos {
            // The listing payload carries no language breakdown; it takes
            // one extra call per repository.
            let url = format!(
                "{}/repos/{}/{}/languages",
                self.api_base, repo.owner.login, repo.name
            );
            let languages: serde_json::Map<String, serde_json::Value> =
                self.get_json(&url).await?;
            metas.push(RepoMeta {
                name: repo.name,
                private: repo.private,
                owner: repo.owner.login,
                created_at: repo.created_at,
                updated_at: repo.updated_at,
                default_branch: repo.default_branch,
                languages: languages.keys().cloned().collect(),
            });
        }
        Ok(metas)
    }

    async fn get_readme(&self, repo: &RepoMeta) -> Result<ReadmeFile, ProviderError> {
        let url = format!("{}/repos/{}/{}/readme", self.api_base, repo.owner, repo.name);
        let readme: ApiReadme = self.get_json(&url).await?;
        if readme.encoding != "base64" {
            return Err(format!(
                "Unexpected README encoding {:?} for {}",
                readme.encoding, repo.name
            )
            .into());
        }
        // The API wraps the base64 payload across lines.
        let raw: String = readme
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = base64::engine::general_purpose::STANDARD.decode(raw)?;
        let content = String::from_utf8(bytes)?;
        debug!(repo = %repo.name, path = %readme.path, bytes = content.len(), "Fetched README");
        Ok(ReadmeFile {
            path: readme.path,
            content,
        })
    }

    async fn get_last_commit_time(
        &self,
        repo: &RepoMeta,
        path: &str,
    ) -> Result<DateTime<Utc>, ProviderError> {
        let url = format!(
            "{}/repos/{}/{}/commits?path={}&per_page=1",
            self.api_base, repo.owner, repo.name, path
        );
        let commits: Vec<ApiCommit> = self.get_json(&url).await?;
        let latest = commits
            .into_iter()
            .next()
            .ok_or_else(|| format!("No commits found touching {path} in {}", repo.name))?;
        let author = latest
            .commit
            .author
            .ok_or_else(|| format!("Latest commit for {path} in {} has no author", repo.name))?;
        Ok(author.date)
    }
}
