//! High-level pipeline: orchestrates fetch → decide → describe → rewrite →
//! assemble → persist for every owned repository.
//!
//! This module provides the top-level orchestration logic for synchronising
//! the repository catalogue into content documents. For each repository it:
//!   - Fetches the README and its last-commit timestamp from the
//!     [`SourceProvider`]
//!   - Rewrites relative media references into absolute raw-content URLs
//!   - Decides via the record store whether the stored description is stale,
//!     invoking the [`Describer`] only when it is
//!   - Assembles the front-matter document and hands it to the
//!     [`DocumentSink`]
//!   - Upserts the repository's [`ProjectRecord`] once everything above
//!     succeeded
//!
//! # Major Types
//! - [`SyncConfig`]: account and rendering settings for a run
//! - [`SyncReport`]: what was synchronised, skipped and failed
//!
//! # Error Handling
//! Failures while processing one repository are logged and recorded in the
//! report; the run continues with the next repository and the failed
//! repository's record is left untouched. Record-store and listing failures
//! abort the run — silent record loss would corrupt every future staleness
//! decision.
//!
//! # Navigation
//! - Main entrypoint: [`synchronise`]
//! - Supporting types: [`SyncConfig`], [`SyncReport`]

use chrono::Utc;
use tracing::{debug, error, info};

use crate::contract::{
    Describer, DocumentSink, ProjectRecord, RecordStore, RepoMeta, SourceProvider,
};
use crate::frontmatter::{self, DocumentMetadata};
use crate::rewrite;
use crate::staleness::should_regenerate;

/// The top-level synchronisation configuration.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Account whose repositories are synchronised; everything else is
    /// filtered out before the pipeline runs.
    pub account: String,
    /// Hero image used when a README embeds no media at all.
    pub default_hero_image: String,
}

impl SyncConfig {
    /// Hosting prefix all rewritten asset URLs are rooted at.
    pub fn owner_base_url(&self) -> String {
        format!("https://github.com/{}", self.account)
    }
}

/// Outcome report for a full run.
#[derive(Debug)]
pub struct SyncReport {
    pub documents: Vec<DocumentReport>,
    pub failures: Vec<RepoFailure>,
    /// Repositories filtered out (private or foreign) before processing.
    pub skipped: usize,
}

#[derive(Debug)]
pub struct DocumentReport {
    pub repo_name: String,
    /// Whether the description was regenerated this run (as opposed to
    /// carried over from the record store).
    pub regenerated: bool,
}

#[derive(Debug)]
pub struct RepoFailure {
    pub repo_name: String,
    pub error: String,
}

/// Entrypoint: synchronise every owned repository into a content document.
pub async fn synchronise<P, D, S, K>(
    config: &SyncConfig,
    provider: &P,
    describer: &D,
    store: &S,
    sink: &K,
) -> Result<SyncReport, String>
where
    P: SourceProvider + Sync,
    D: Describer + Sync,
    S: RecordStore,
    K: DocumentSink,
{
    info!(account = %config.account, "[SYNC] Starting catalogue synchronisation");

    let repos = provider
        .list_owned_repos()
        .await
        .map_err(|e| format!("Failed to list repositories: {e:?}"))?;
    info!(count = repos.len(), "[SYNC] Listed repositories");

    let mut documents: Vec<DocumentReport> = Vec::new();
    let mut failures: Vec<RepoFailure> = Vec::new();
    let mut skipped = 0usize;

    for repo in &repos {
        if repo.private || repo.owner != config.account {
            debug!(repo = %repo.name, private = repo.private, owner = %repo.owner, "[SYNC] Skipping filtered repository");
            skipped += 1;
            continue;
        }

        // Store errors are fatal on both the read and the write side.
        let prior = store
            .get(&repo.name)
            .map_err(|e| format!("Record lookup failed for {}: {e:?}", repo.name))?;

        match process_repo(config, provider, describer, sink, repo, prior.as_ref()).await {
            Ok(outcome) => {
                store
                    .upsert(&outcome.record)
                    .map_err(|e| format!("Record upsert failed for {}: {e:?}", repo.name))?;
                info!(
                    repo = %repo.name,
                    regenerated = outcome.regenerated,
                    "[SYNC] Repository synchronised"
                );
                documents.push(DocumentReport {
                    repo_name: repo.name.clone(),
                    regenerated: outcome.regenerated,
                });
            }
            Err(e) => {
                error!(
                    repo = %repo.name,
                    error = %e,
                    "[SYNC][ERROR] Repository failed; record left untouched"
                );
                failures.push(RepoFailure {
                    repo_name: repo.name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        synchronised = documents.len(),
        failed = failures.len(),
        skipped,
        "[SYNC] Run complete"
    );
    Ok(SyncReport {
        documents,
        failures,
        skipped,
    })
}

struct RepoOutcome {
    record: ProjectRecord,
    regenerated: bool,
}

/// One repository through the full state machine. Any error here is caught
/// at the call site and isolated to this repository.
async fn process_repo<P, D, K>(
    config: &SyncConfig,
    provider: &P,
    describer: &D,
    sink: &K,
    repo: &RepoMeta,
    prior: Option<&ProjectRecord>,
) -> Result<RepoOutcome, Box<dyn std::error::Error + Send + Sync>>
where
    P: SourceProvider + Sync,
    D: Describer + Sync,
    K: DocumentSink,
{
    let readme = provider.get_readme(repo).await?;
    let fresh_time = provider.get_last_commit_time(repo, &readme.path).await?;

    let owner_base = config.owner_base_url();
    let (body, media_files) =
        rewrite::rewrite(&readme.content, &repo.name, &repo.default_branch, &owner_base);

    let regenerated = should_regenerate(prior, fresh_time);
    let description = if regenerated {
        match prior {
            None => info!(repo = %repo.name, "[SYNC] New repository, generating a description"),
            Some(rec) if !rec.description_generated => {
                info!(repo = %repo.name, "[SYNC] A description was never generated, generating one now")
            }
            Some(_) => {
                info!(repo = %repo.name, "[SYNC] README changed since last run, generating an updated description")
            }
        }
        if body.trim().is_empty() {
            debug!(repo = %repo.name, "[SYNC] README is empty, skipping the describer");
            String::new()
        } else {
            describer.generate(&body).await?
        }
    } else {
        info!(repo = %repo.name, "[SYNC] README unchanged since last run, reusing stored description");
        prior.map(|rec| rec.description.clone()).unwrap_or_default()
    };

    let hero_image = media_files
        .first()
        .map(|file| rewrite::asset_url(&owner_base, &repo.name, &repo.default_branch, file))
        .unwrap_or_else(|| config.default_hero_image.clone());

    let metadata = DocumentMetadata {
        title: repo.name.clone(),
        description: description.clone(),
        pub_date: frontmatter::format_date(repo.created_at),
        updated_date: frontmatter::format_date(repo.updated_at),
        hero_image,
        badge: frontmatter::freshness_badge(repo.updated_at, Utc::now()),
        tags: repo.languages.clone(),
    };
    let document = frontmatter::assemble(&metadata, &body);
    sink.write_document(&repo.name, &document)?;

    Ok(RepoOutcome {
        record: ProjectRecord {
            repo_name: repo.name.clone(),
            readme_update_time: fresh_time,
            description_generated: true,
            description,
        },
        regenerated,
    })
}
