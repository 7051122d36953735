//! Activity snapshot: the typed boundary between data collection and the engine.
//!
//! Everything the engine consumes arrives through [`ActivitySnapshot`]. Shape
//! errors (negative counts, non-ISO dates) are rejected by deserialisation;
//! range errors are rejected by [`ActivitySnapshot::validate`].

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors raised while loading or validating a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub primary_language: Option<String>,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub total_commits: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: DateTime<Utc>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_fork: bool,
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRecord {
    pub date: DateTime<Utc>,
    pub hour: u8,
    pub day_of_week: u8,
    pub repo: String,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub message: String,
}

impl CommitRecord {
    pub fn changed_lines(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub merged: u64,
    #[serde(default)]
    pub open: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub closed: u64,
    #[serde(default)]
    pub open: u64,
}

/// A completed, in-memory capture of one user's activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySnapshot {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub collected_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub repositories: Vec<Repository>,
    #[serde(default)]
    pub commit_history: Vec<CommitRecord>,
    #[serde(default)]
    pub pull_requests: PullRequestCounts,
    #[serde(default)]
    pub issues: IssueCounts,
}

impl ActivitySnapshot {
    /// Parse and validate a snapshot from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(raw)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Read, parse and validate a snapshot file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Reject values that deserialise but fall outside their documented range.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if let Some(idx) = self.repositories.iter().position(|r| r.name.trim().is_empty()) {
            return Err(SnapshotError::Invalid(format!(
                "repository #{idx} has an empty name"
            )));
        }
        for (idx, commit) in self.commit_history.iter().enumerate() {
            if commit.hour > 23 {
                return Err(SnapshotError::Invalid(format!(
                    "commit #{idx} has hour {} (expected 0-23)",
                    commit.hour
                )));
            }
            if commit.day_of_week > 6 {
                return Err(SnapshotError::Invalid(format!(
                    "commit #{idx} has dayOfWeek {} (expected 0-6)",
                    commit.day_of_week
                )));
            }
        }
        Ok(())
    }

    /// Commits belonging to `repo`, in history order.
    pub fn commits_for<'a>(&'a self, repo: &'a str) -> impl Iterator<Item = &'a CommitRecord> + 'a {
        self.commit_history.iter().filter(move |c| c.repo == repo)
    }

    /// The latest timestamp recorded anywhere in the snapshot.
    pub fn latest_activity(&self) -> Option<DateTime<Utc>> {
        self.repositories
            .iter()
            .flat_map(|r| [r.pushed_at, r.updated_at])
            .chain(self.commit_history.iter().map(|c| c.date))
            .max()
    }

    /// Resolve "now" without touching the wall clock.
    ///
    /// Order: explicit override, `collectedAt`, latest activity.
    pub fn reference_time(&self, explicit: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
        explicit
            .or(self.collected_at)
            .or_else(|| self.latest_activity())
    }
}

/// Expand files and directories into the list of snapshot JSON files to map.
///
/// Directories are walked recursively; hidden entries and files that are
/// already engine output (`*.starfield.json`) are skipped. Results are sorted
/// per directory so batch runs are reproducible.
pub fn discover_snapshots(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for input in inputs {
        if input.is_file() {
            found.push(input.clone());
            continue;
        }
        let mut from_dir: Vec<PathBuf> = WalkDir::new(input)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| is_snapshot_file(p))
            .collect();
        from_dir.sort();
        found.extend(from_dir);
    }
    found
}

fn is_snapshot_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    name.ends_with(".json") && !name.ends_with(".starfield.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "repositories": [{
            "name": "alpha",
            "createdAt": "2023-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
            "pushedAt": "2024-02-01T00:00:00Z"
        }],
        "commitHistory": [{
            "date": "2024-02-01T10:00:00Z",
            "hour": 10,
            "dayOfWeek": 4,
            "repo": "alpha",
            "additions": 5,
            "deletions": 2,
            "message": "init"
        }]
    }"#;

    #[test]
    fn parses_minimal_snapshot_with_defaults() {
        let snap = ActivitySnapshot::from_json(MINIMAL).unwrap();
        assert_eq!(snap.repositories.len(), 1);
        assert_eq!(snap.repositories[0].stars, 0);
        assert!(!snap.repositories[0].is_fork);
        assert_eq!(snap.pull_requests, PullRequestCounts::default());
        assert_eq!(snap.commit_history[0].changed_lines(), 7);
    }

    #[test]
    fn negative_counts_rejected() {
        let raw = MINIMAL.replace("\"additions\": 5", "\"additions\": -5");
        assert!(matches!(
            ActivitySnapshot::from_json(&raw),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn non_iso_date_rejected() {
        let raw = MINIMAL.replace("2024-02-01T10:00:00Z", "last tuesday");
        assert!(matches!(
            ActivitySnapshot::from_json(&raw),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn out_of_range_hour_rejected() {
        let raw = MINIMAL.replace("\"hour\": 10", "\"hour\": 24");
        let err = ActivitySnapshot::from_json(&raw).unwrap_err();
        assert!(err.to_string().contains("hour 24"));
    }

    #[test]
    fn out_of_range_weekday_rejected() {
        let raw = MINIMAL.replace("\"dayOfWeek\": 4", "\"dayOfWeek\": 7");
        assert!(matches!(
            ActivitySnapshot::from_json(&raw),
            Err(SnapshotError::Invalid(_))
        ));
    }

    #[test]
    fn empty_repo_name_rejected() {
        let raw = MINIMAL.replace("\"name\": \"alpha\"", "\"name\": \"  \"");
        assert!(matches!(
            ActivitySnapshot::from_json(&raw),
            Err(SnapshotError::Invalid(_))
        ));
    }

    #[test]
    fn reference_time_prefers_explicit_then_collected() {
        let mut snap = ActivitySnapshot::from_json(MINIMAL).unwrap();
        let latest: DateTime<Utc> = "2024-02-01T10:00:00Z".parse().unwrap();
        assert_eq!(snap.reference_time(None), Some(latest));

        let collected: DateTime<Utc> = "2025-01-01T00:00:00Z".parse().unwrap();
        snap.collected_at = Some(collected);
        assert_eq!(snap.reference_time(None), Some(collected));

        let explicit: DateTime<Utc> = "2030-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(snap.reference_time(Some(explicit)), Some(explicit));
    }

    #[test]
    fn empty_snapshot_has_no_reference_time() {
        assert_eq!(ActivitySnapshot::default().reference_time(None), None);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ActivitySnapshot::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }

    #[test]
    fn discover_walks_directories_and_skips_outputs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.starfield.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join(".cache")).unwrap();
        std::fs::write(dir.path().join(".cache/c.json"), "{}").unwrap();

        let found = discover_snapshots(&[dir.path().to_path_buf()]);
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }
}
