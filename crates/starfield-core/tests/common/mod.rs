//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use starfield_core::snapshot::{
    ActivitySnapshot, CommitRecord, IssueCounts, PullRequestCounts, Repository,
};

// ---------------------------------------------------------------------------
// Fixture path resolution
// ---------------------------------------------------------------------------

/// Resolve `tests/fixtures/{name}` relative to the workspace root.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .join("../../tests/fixtures")
        .join(name)
        .canonicalize()
        .unwrap_or_else(|_| {
            Path::new(manifest_dir)
                .join("../../tests/fixtures")
                .join(name)
        })
}

/// Load and validate a fixture snapshot.
pub fn load_fixture(name: &str) -> ActivitySnapshot {
    ActivitySnapshot::load(&fixture_path(name)).expect("fixture should load")
}

// ---------------------------------------------------------------------------
// Snapshot builders
// ---------------------------------------------------------------------------

pub fn repo(name: &str, total_commits: u64, stars: u64) -> Repository {
    Repository {
        name: name.to_string(),
        description: None,
        primary_language: Some("Rust".to_string()),
        stars,
        forks: 0,
        total_commits,
        created_at: "2022-01-01T00:00:00Z".parse().unwrap(),
        updated_at: "2024-06-01T00:00:00Z".parse().unwrap(),
        pushed_at: "2024-06-01T00:00:00Z".parse().unwrap(),
        is_archived: false,
        is_fork: false,
        topics: Vec::new(),
    }
}

pub fn commit(repo: &str, hour: u8, additions: u64, deletions: u64) -> CommitRecord {
    CommitRecord {
        date: format!("2024-06-01T{hour:02}:00:00Z").parse().unwrap(),
        hour,
        day_of_week: 6,
        repo: repo.to_string(),
        additions,
        deletions,
        message: format!("change {additions}/{deletions}"),
    }
}

/// `count` commits for `repo`, all at `hour`, with varying sizes.
pub fn commits(repo: &str, count: usize, hour: u8) -> Vec<CommitRecord> {
    (0..count)
        .map(|i| commit(repo, hour, (i as u64 * 7) % 50 + 1, i as u64 % 5))
        .collect()
}

pub fn snapshot(
    repositories: Vec<Repository>,
    commit_history: Vec<CommitRecord>,
    merged_prs: u64,
    open_issues: u64,
) -> ActivitySnapshot {
    ActivitySnapshot {
        login: None,
        collected_at: None,
        repositories,
        commit_history,
        pull_requests: PullRequestCounts {
            total: merged_prs,
            merged: merged_prs,
            open: 0,
        },
        issues: IssueCounts {
            total: open_issues,
            closed: 0,
            open: open_issues,
        },
    }
}

// ---------------------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------------------

pub fn repo_names(profile: &starfield_core::config::ConstellationProfile) -> Vec<String> {
    profile
        .constellations
        .iter()
        .map(|c| c.repo_name.clone())
        .collect()
}
