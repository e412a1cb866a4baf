//! # contract: trait seams between the sync engine and its collaborators
//!
//! This module defines the traits the synchronisation pipeline depends on —
//! the repository metadata provider, the description generator, the record
//! store and the document sink — together with the plain data types that
//! cross those seams.
//!
//! ## Interface & Extensibility
//! - Implement [`SourceProvider`] to plug in a new repository host (the CLI
//!   crate ships a GitHub REST implementation).
//! - Implement [`Describer`] to plug in a different text-generation backend.
//! - [`RecordStore`] and [`DocumentSink`] have filesystem implementations in
//!   [`crate::store`] and [`crate::sink`]; swap them for any keyed table or
//!   output layout that honours the same contract.
//! - All fallible methods return boxed error trait objects; implementors
//!   convert meaningful upstream errors into those.
//!
//! ## Mocking & Testing
//! - Every trait is annotated for `mockall`, so the integration tests drive
//!   the whole pipeline against deterministic mocks.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Error type for source-provider operations (boxed, like the other seams).
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;
/// Error type for description generation.
pub type DescribeError = Box<dyn std::error::Error + Send + Sync>;
/// Error type for record-store operations.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;
/// Error type for document-sink operations.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Persisted sync state for one repository.
///
/// Exactly one record exists per `repo_name`; the store is the sole source
/// of truth for whether the current state of a README has already been
/// described.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Repository name, the unique key.
    pub repo_name: String,
    /// Timestamp of the README commit the last description was generated
    /// from.
    #[serde(default = "sentinel_time")]
    pub readme_update_time: DateTime<Utc>,
    /// True once a description has been produced at least once (an empty
    /// README still counts as produced).
    #[serde(default)]
    pub description_generated: bool,
    /// The last generated description text.
    #[serde(default)]
    pub description: String,
}

impl ProjectRecord {
    /// Fresh record for a repository that has never been processed.
    pub fn new(repo_name: impl Into<String>) -> Self {
        Self {
            repo_name: repo_name.into(),
            readme_update_time: sentinel_time(),
            description_generated: false,
            description: String::new(),
        }
    }
}

/// Sentinel README timestamp for repositories without a record. Predates any
/// real README commit, so every fresh timestamp compares newer.
pub fn sentinel_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2001, 3, 22, 0, 0, 0)
        .single()
        .expect("fixed sentinel timestamp is valid")
}

/// Repository metadata as returned by the provider's listing call.
#[derive(Debug, Clone)]
pub struct RepoMeta {
    pub name: String,
    pub private: bool,
    /// Login of the owning account; the driver skips repositories not owned
    /// by the configured account.
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub default_branch: String,
    /// Language names in provider order (GitHub orders by bytes of code).
    pub languages: Vec<String>,
}

/// A repository's README, decoded to UTF-8.
#[derive(Debug, Clone)]
pub struct ReadmeFile {
    /// Repository-relative path of the README file, used for the
    /// last-commit lookup.
    pub path: String,
    pub content: String,
}

/// Read side of the pipeline: repository listing and content fetches.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// List every repository visible to the authenticated account, including
    /// private and foreign ones — filtering is the driver's job.
    async fn list_owned_repos(&self) -> Result<Vec<RepoMeta>, ProviderError>;

    /// Fetch and decode the repository's README.
    async fn get_readme(&self, repo: &RepoMeta) -> Result<ReadmeFile, ProviderError>;

    /// Timestamp of the most recent commit touching `path`.
    async fn get_last_commit_time(
        &self,
        repo: &RepoMeta,
        path: &str,
    ) -> Result<DateTime<Utc>, ProviderError>;
}

/// Natural-language description generator, invoked at most once per stale
/// repository.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Describer: Send + Sync {
    async fn generate(&self, text: &str) -> Result<String, DescribeError>;
}

/// Durable keyed table of per-repository sync state.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait RecordStore: Send + Sync {
    /// Point lookup. Absent is a valid, expected outcome for first-time
    /// repositories, not an error.
    fn get(&self, repo_name: &str) -> Result<Option<ProjectRecord>, StoreError>;

    /// Insert if absent, else overwrite all fields for that key.
    fn upsert(&self, record: &ProjectRecord) -> Result<(), StoreError>;
}

/// Output side: one UTF-8 document per repository, keyed by name.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait DocumentSink: Send + Sync {
    /// Write the finished document, creating missing parent directories and
    /// overwriting any previous file for the repository.
    fn write_document(&self, repo_name: &str, contents: &str) -> Result<(), SinkError>;
}
