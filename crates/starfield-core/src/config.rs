//! Core data types and configuration for the constellation engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category a repository is classified into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RepoType {
    Profile,
    Ml,
    Game,
    Mobile,
    Docs,
    Cli,
    Library,
    Frontend,
    Backend,
    Other,
}

impl RepoType {
    /// Classification priority: the first matching category wins.
    pub const PRIORITY: [RepoType; 10] = [
        Self::Profile,
        Self::Ml,
        Self::Game,
        Self::Mobile,
        Self::Docs,
        Self::Cli,
        Self::Library,
        Self::Frontend,
        Self::Backend,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Ml => "ml",
            Self::Game => "game",
            Self::Mobile => "mobile",
            Self::Docs => "docs",
            Self::Cli => "cli",
            Self::Library => "library",
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Other => "other",
        }
    }

}

impl std::fmt::Display for RepoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Background mood of the sky.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SkyType {
    Dawn,
    Day,
    Night,
}

impl SkyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Day => "day",
            Self::Night => "night",
        }
    }
}

impl std::fmt::Display for SkyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sampled commit, positioned inside its constellation's unit circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// 0.2 - 1.0
    pub brightness: f64,
    /// 1 - 5
    pub size: u8,
    pub color: String,
    pub label: String,
}

/// One repository rendered as a cluster of stars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constellation {
    pub repo_name: String,
    pub constellation_name: String,
    pub repo_type: RepoType,
    pub language: Option<String>,
    pub stars: Vec<Star>,
    /// Index pairs into `stars`, always a spanning tree.
    pub connections: Vec<(usize, usize)>,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    /// GitHub stargazers, not rendered stars.
    pub star_count: u64,
    pub total_commits: u64,
    pub is_dormant: bool,
}

impl Constellation {
    /// Ranking score: commits weigh 2, GitHub stars weigh 10.
    pub fn score(&self) -> u64 {
        self.total_commits
            .saturating_mul(2)
            .saturating_add(self.star_count.saturating_mul(10))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meteor {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub brightness: f64,
    /// Animation delay in seconds.
    pub delay: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nebula {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkyBackground {
    #[serde(rename = "type")]
    pub sky_type: SkyType,
    pub peak_hour: u8,
    pub colors: Vec<String>,
    pub show_milky_way: bool,
}

/// Summary statistics over a finished profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_stars: usize,
    pub total_constellations: usize,
    pub total_meteors: usize,
    pub total_nebulas: usize,
    pub total_commits: u64,
    pub total_github_stars: u64,
    pub brightest_constellation: String,
    pub largest_constellation: String,
}

/// Root output of the engine. Built once per snapshot and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstellationProfile {
    pub constellations: Vec<Constellation>,
    pub meteors: Vec<Meteor>,
    pub nebulas: Vec<Nebula>,
    pub sky: SkyBackground,
    pub stats: ProfileStats,
}

/// Configuration for a mapping run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_max_constellations")]
    pub max_constellations: usize,
    /// Sampling limit per repository; clamped to `1..=15` when stars are built.
    #[serde(default = "default_max_stars")]
    pub max_stars_per_constellation: usize,
    #[serde(default = "default_dormant_after_days")]
    pub dormant_after_days: i64,
    #[serde(default = "default_include_archived")]
    pub include_archived: bool,
    /// "Now" for dormancy checks. Falls back to the snapshot's own timestamps.
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
}

fn default_max_constellations() -> usize {
    10
}
fn default_max_stars() -> usize {
    15
}
fn default_dormant_after_days() -> i64 {
    365
}
fn default_include_archived() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_constellations: default_max_constellations(),
            max_stars_per_constellation: default_max_stars(),
            dormant_after_days: default_dormant_after_days(),
            include_archived: default_include_archived(),
            reference_time: None,
        }
    }
}

impl EngineConfig {
    /// Load a config from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: &std::path::Path) -> std::io::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(std::io::Error::other)
    }
}
