//! Constellation assembly: build, rank, truncate and pack.
//!
//! Runs as three pipeline phases over the same [`SkyChart`]:
//! `constellations` builds one constellation per eligible repository,
//! `ranking` orders and truncates them, `layout` places the survivors.

use chrono::{DateTime, Duration, Utc};

use crate::config::{Constellation, EngineConfig};
use crate::graph::sky_chart::SkyChart;
use crate::graph::spanning_tree::{build_connections, is_spanning_tree};
use crate::graph::spiral::SpiralLayout;
use crate::phases::classify::{classify_repo, constellation_name, language_color};
use crate::phases::stars::build_stars;
use crate::snapshot::{ActivitySnapshot, CommitRecord, Repository};

const MIN_RADIUS: f64 = 0.05;
const MAX_RADIUS: f64 = 0.15;
const RADIUS_PER_SQRT_COMMIT: f64 = 0.012;

/// Canvas radius of a constellation, monotonic in `sqrt(total_commits)`.
pub fn constellation_radius(total_commits: u64) -> f64 {
    ((total_commits as f64).sqrt() * RADIUS_PER_SQRT_COMMIT).clamp(MIN_RADIUS, MAX_RADIUS)
}

/// True when the last push is more than `after_days` before `reference`.
pub fn is_dormant(
    pushed_at: DateTime<Utc>,
    reference: Option<DateTime<Utc>>,
    after_days: i64,
) -> bool {
    match reference {
        Some(now) => now.signed_duration_since(pushed_at) > Duration::days(after_days),
        None => false,
    }
}

/// Build a single constellation, centred at the canvas midpoint until layout.
pub fn build_constellation(
    repo: &Repository,
    commits: &[&CommitRecord],
    login: Option<&str>,
    reference: Option<DateTime<Utc>>,
    config: &EngineConfig,
) -> Constellation {
    let repo_type = classify_repo(repo, login);
    let color = language_color(repo.primary_language.as_deref());
    let stars = build_stars(
        &repo.name,
        commits,
        color,
        config.max_stars_per_constellation,
    );
    let connections = build_connections(&stars);
    if !is_spanning_tree(stars.len(), &connections) {
        log::warn!(
            "constellation for {} has {} edges over {} stars; figure is not a tree",
            repo.name,
            connections.len(),
            stars.len()
        );
    }

    Constellation {
        repo_name: repo.name.clone(),
        constellation_name: constellation_name(&repo.name, repo_type),
        repo_type,
        language: repo.primary_language.clone(),
        stars,
        connections,
        cx: 0.5,
        cy: 0.5,
        radius: constellation_radius(repo.total_commits),
        star_count: repo.stars,
        total_commits: repo.total_commits,
        is_dormant: is_dormant(repo.pushed_at, reference, config.dormant_after_days),
    }
}

/// Phase: one constellation per non-fork repository, in input order.
pub fn run_constellations_phase(
    config: &EngineConfig,
    snapshot: &ActivitySnapshot,
    chart: &mut SkyChart,
) {
    let reference = snapshot.reference_time(config.reference_time);
    let login = snapshot.login.as_deref();

    for repo in &snapshot.repositories {
        if repo.is_fork {
            log::debug!("skipping fork {}", repo.name);
            continue;
        }
        if repo.is_archived && !config.include_archived {
            log::debug!("skipping archived {}", repo.name);
            continue;
        }
        let commits: Vec<&CommitRecord> = snapshot.commits_for(&repo.name).collect();
        chart.add_constellation(build_constellation(
            repo, &commits, login, reference, config,
        ));
    }
    log::info!(
        "charted {} constellations with {} stars",
        chart.constellation_count(),
        chart.star_count()
    );
}

/// Sort by score descending. The original position is an explicit secondary
/// key, so equal scores keep input order.
pub fn rank_constellations(constellations: &mut Vec<Constellation>) {
    let mut indexed: Vec<(usize, Constellation)> =
        std::mem::take(constellations).into_iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| b.score().cmp(&a.score()).then(ia.cmp(ib)));
    constellations.extend(indexed.into_iter().map(|(_, c)| c));
}

/// Phase: rank and keep the top `max_constellations`.
pub fn run_ranking_phase(config: &EngineConfig, chart: &mut SkyChart) {
    let constellations = chart.constellations_mut();
    rank_constellations(constellations);
    if constellations.len() > config.max_constellations {
        log::info!(
            "keeping top {} of {} constellations",
            config.max_constellations,
            constellations.len()
        );
        constellations.truncate(config.max_constellations);
    }
}

/// Phase: pack constellation centres on the canvas spiral.
pub fn run_layout_phase(chart: &mut SkyChart) {
    let constellations = chart.constellations_mut();
    let centres = SpiralLayout::CANVAS.points(constellations.len());
    for (constellation, (cx, cy)) in constellations.iter_mut().zip(centres) {
        constellation.cx = cx;
        constellation.cy = cy;
    }
}
