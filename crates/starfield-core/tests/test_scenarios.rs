//! End-to-end scenarios over hand-built snapshots.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use starfield_core::build_constellation_profile;
use starfield_core::config::{EngineConfig, SkyType};
use starfield_core::graph::spanning_tree::is_spanning_tree;

#[test]
fn three_repos_ranked_by_score() {
    let snap = snapshot(
        vec![repo("repo0", 50, 100), repo("repo1", 10, 0), repo("repo2", 0, 0)],
        [commits("repo0", 50, 14), commits("repo1", 10, 14)].concat(),
        0,
        0,
    );
    let profile = build_constellation_profile(&snap, &EngineConfig::default());

    assert_eq!(repo_names(&profile), vec!["repo0", "repo1", "repo2"]);
    let scores: Vec<u64> = profile.constellations.iter().map(|c| c.score()).collect();
    assert_eq!(scores, vec![1100, 20, 0]);

    let placeholder = &profile.constellations[2];
    assert_eq!(placeholder.stars.len(), 1);
    assert_eq!((placeholder.stars[0].x, placeholder.stars[0].y), (0.5, 0.5));
    assert_eq!(placeholder.stars[0].brightness, 0.3);
    assert!(placeholder.connections.is_empty());
}

#[test]
fn no_merges_and_no_issues_still_decorate_the_sky() {
    let snap = snapshot(vec![repo("solo", 3, 0)], commits("solo", 3, 12), 0, 0);
    let profile = build_constellation_profile(&snap, &EngineConfig::default());
    assert_eq!(profile.meteors.len(), 1);
    assert_eq!(profile.nebulas.len(), 1);
}

#[test]
fn all_commits_at_two_am_is_night() {
    let snap = snapshot(vec![repo("owl", 8, 0)], commits("owl", 8, 2), 0, 0);
    let profile = build_constellation_profile(&snap, &EngineConfig::default());
    assert_eq!(profile.sky.sky_type, SkyType::Night);
    assert!(profile.sky.show_milky_way);
    assert_eq!(profile.sky.peak_hour, 2);
}

#[test]
fn empty_snapshot_is_still_complete() {
    let snap = snapshot(Vec::new(), Vec::new(), 0, 0);
    let profile = build_constellation_profile(&snap, &EngineConfig::default());
    assert!(profile.constellations.is_empty());
    assert_eq!(profile.meteors.len(), 1);
    assert_eq!(profile.nebulas.len(), 1);
    assert_eq!(profile.sky.sky_type, SkyType::Night);
    assert_eq!(profile.stats.brightest_constellation, "");
    assert_eq!(profile.stats.largest_constellation, "");
}

#[test]
fn forks_never_become_constellations() {
    let mut fork = repo("upstream-copy", 9_999, 9_999);
    fork.is_fork = true;
    let snap = snapshot(
        vec![fork, repo("original", 1, 0)],
        [commits("upstream-copy", 30, 10), commits("original", 1, 10)].concat(),
        0,
        0,
    );
    let profile = build_constellation_profile(&snap, &EngineConfig::default());
    assert_eq!(repo_names(&profile), vec!["original"]);
    assert_eq!(profile.stats.total_commits, 1);
}

#[test]
fn large_repos_sample_fifteen_stars_as_a_tree() {
    let snap = snapshot(vec![repo("huge", 900, 0)], commits("huge", 900, 20), 0, 0);
    let profile = build_constellation_profile(&snap, &EngineConfig::default());
    let c = &profile.constellations[0];
    assert_eq!(c.stars.len(), 15);
    assert_eq!(c.connections.len(), 14);
    assert!(is_spanning_tree(c.stars.len(), &c.connections));
    assert_eq!(c.radius, 0.15);
}

#[test]
fn merged_pr_flood_caps_meteors() {
    let snap = snapshot(Vec::new(), Vec::new(), 10_000, 10_000);
    let profile = build_constellation_profile(&snap, &EngineConfig::default());
    assert_eq!(profile.meteors.len(), 8);
    assert_eq!(profile.nebulas.len(), 5);
}

#[test]
fn truncation_keeps_highest_scores() {
    let repos = (0..25).map(|i| repo(&format!("r{i:02}"), (i * 13) % 40, i % 3)).collect();
    let snap = snapshot(repos, Vec::new(), 0, 0);
    let config = EngineConfig {
        max_constellations: 6,
        ..Default::default()
    };
    let profile = build_constellation_profile(&snap, &config);
    assert_eq!(profile.constellations.len(), 6);
    for pair in profile.constellations.windows(2) {
        assert!(pair[0].score() >= pair[1].score());
    }
    let lowest_kept = profile.constellations[5].score();
    let all_scores: Vec<u64> = snap
        .repositories
        .iter()
        .map(|r| r.total_commits * 2 + r.stars * 10)
        .collect();
    let above = all_scores.iter().filter(|&&s| s > lowest_kept).count();
    assert!(above <= 6);
}

#[test]
fn dormancy_uses_reference_not_wall_clock() {
    let snap = snapshot(vec![repo("quiet", 4, 0)], Vec::new(), 0, 0);

    let recent = EngineConfig {
        reference_time: Some("2024-12-01T00:00:00Z".parse().unwrap()),
        ..Default::default()
    };
    assert!(!build_constellation_profile(&snap, &recent).constellations[0].is_dormant);

    let later = EngineConfig {
        reference_time: Some("2026-01-01T00:00:00Z".parse().unwrap()),
        ..Default::default()
    };
    assert!(build_constellation_profile(&snap, &later).constellations[0].is_dormant);
}
