//! Change set resolution using libgit2
//!
//! Finds the files changed since the merge point between a base reference
//! and the current revision, using the git2 crate (Rust bindings to
//! libgit2). The diff runs from the merge-base tree to the working directory
//! and index, with untracked files included, so uncommitted work is reviewed
//! too.

use git2::{DiffOptions, Repository};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Fatal resolver failures. Any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum ChangeSetError {
    #[error("not a git repository (or any parent): {0}")]
    NotARepository(PathBuf),
    #[error("unknown base reference '{0}'")]
    UnknownBaseRef(String),
    #[error("no merge base between '{0}' and HEAD")]
    NoMergeBase(String),
    #[error("git operation failed: {0}")]
    Git(#[from] git2::Error),
}

/// The files changed since the merge point with the base reference.
#[derive(Debug, Clone)]
pub struct ChangeSet {
    /// Working-tree root of the repository
    pub repo_root: PathBuf,
    /// Base reference as given on the command line
    pub base_ref: String,
    /// Short id of the merge-base commit
    pub merge_base: String,
    /// Current branch name, or "HEAD" when detached
    pub head_branch: String,
    /// Short id of the current revision
    pub head_rev: String,
    /// Repo-relative changed paths, in diff order. Paths deleted from the
    /// working tree stay in the list; callers skip them when the read fails.
    pub paths: Vec<PathBuf>,
}

/// Resolve the changed-file set for the repository containing `path`.
pub fn resolve(path: &Path, base_ref: &str) -> Result<ChangeSet, ChangeSetError> {
    let repo = Repository::discover(path)
        .map_err(|_| ChangeSetError::NotARepository(path.to_path_buf()))?;
    let repo_root = repo
        .workdir()
        .ok_or_else(|| ChangeSetError::NotARepository(path.to_path_buf()))?
        .to_path_buf();

    let base_commit = repo
        .revparse_single(base_ref)
        .and_then(|obj| obj.peel_to_commit())
        .map_err(|_| ChangeSetError::UnknownBaseRef(base_ref.to_string()))?;

    let head = repo.head()?;
    let head_branch = head.shorthand().unwrap_or("HEAD").to_string();
    let head_commit = head.peel_to_commit()?;

    let merge_base_oid = repo
        .merge_base(base_commit.id(), head_commit.id())
        .map_err(|_| ChangeSetError::NoMergeBase(base_ref.to_string()))?;
    let merge_base_tree = repo.find_commit(merge_base_oid)?.tree()?;

    let mut diff_opts = DiffOptions::new();
    diff_opts
        .include_untracked(true)
        .recurse_untracked_dirs(true);
    let diff =
        repo.diff_tree_to_workdir_with_index(Some(&merge_base_tree), Some(&mut diff_opts))?;

    let mut paths = Vec::new();
    for delta in diff.deltas() {
        let changed = delta.new_file().path().or_else(|| delta.old_file().path());
        if let Some(p) = changed {
            let p = p.to_path_buf();
            if !paths.contains(&p) {
                paths.push(p);
            }
        }
    }

    debug!(
        "{} files changed since merge base of '{}' and HEAD",
        paths.len(),
        base_ref
    );

    Ok(ChangeSet {
        repo_root,
        base_ref: base_ref.to_string(),
        merge_base: short_id(merge_base_oid),
        head_branch,
        head_rev: short_id(head_commit.id()),
        paths,
    })
}

/// First 12 characters of an object id.
fn short_id(oid: git2::Oid) -> String {
    let full = oid.to_string();
    full[..12.min(full.len())].to_string()
}
