//! Meteors and nebulas.
//!
//! Every value is derived from the element's index through fixed polynomial
//! hashes. The formulas are part of the output contract: changing one changes
//! every previously generated scene.

use crate::config::{Constellation, Meteor, Nebula};
use crate::graph::sky_chart::SkyChart;
use crate::snapshot::ActivitySnapshot;

pub const MAX_METEORS: usize = 8;
pub const MAX_NEBULAS: usize = 5;

const NEBULA_COLORS: [&str; 5] = ["#7b2ff7", "#f107a3", "#00c9ff", "#92fe9d", "#ff9a44"];

/// `clamp(ceil(merged / 5), 1, 8)`
pub fn meteor_count(merged_prs: u64) -> usize {
    (merged_prs.div_ceil(5) as usize).clamp(1, MAX_METEORS)
}

/// `clamp(ceil(open / 3), 1, 5)`
pub fn nebula_count(open_issues: u64) -> usize {
    (open_issues.div_ceil(3) as usize).clamp(1, MAX_NEBULAS)
}

/// `(i * mul + add) mod m` as a float.
fn hash(i: usize, mul: usize, add: usize, m: usize) -> f64 {
    (i.wrapping_mul(mul).wrapping_add(add) % m) as f64
}

fn meteor(i: usize) -> Meteor {
    let seed = hash(i, 137, 83, 100);
    let x1 = 0.05 + seed / 100.0 * 0.6;
    let y1 = 0.02 + hash(i, 53, 17, 30) / 100.0;
    let angle = (25.0 + hash(i, 71, 0, 30)).to_radians();
    let length = 0.12 + hash(i, 29, 0, 10) / 100.0;
    Meteor {
        x1,
        y1,
        x2: (x1 + angle.cos() * length).clamp(0.0, 1.0),
        y2: (y1 + angle.sin() * length).clamp(0.0, 1.0),
        brightness: 0.5 + hash(i, 43, 11, 50) / 100.0,
        delay: i as f64 * 2.5 + (seed % 10.0) * 0.3,
    }
}

/// Meteors for a merged pull request total. Always at least one.
pub fn generate_meteors(merged_prs: u64) -> Vec<Meteor> {
    (0..meteor_count(merged_prs)).map(meteor).collect()
}

fn nebula(i: usize, constellations: &[Constellation]) -> Nebula {
    let (x, y) = match constellations.get(i % constellations.len().max(1)) {
        Some(anchor) => (
            anchor.cx + (hash(i, 97, 31, 21) - 10.0) / 100.0,
            anchor.cy + (hash(i, 59, 7, 21) - 10.0) / 100.0,
        ),
        None => (
            0.2 + (i as f64 * 0.15) % 0.6,
            0.25 + hash(i, 37, 13, 50) / 100.0,
        ),
    };
    Nebula {
        x: x.clamp(0.05, 0.95),
        y: y.clamp(0.05, 0.95),
        size: 0.08 + hash(i, 61, 7, 8) / 100.0,
        color: NEBULA_COLORS[i % NEBULA_COLORS.len()].to_string(),
        opacity: 0.15 + hash(i, 23, 5, 15) / 100.0,
    }
}

/// Nebulas for an open issue total, drifting around existing constellations
/// when there are any. Always at least one.
pub fn generate_nebulas(open_issues: u64, constellations: &[Constellation]) -> Vec<Nebula> {
    (0..nebula_count(open_issues))
        .map(|i| nebula(i, constellations))
        .collect()
}

/// Phase: add meteors and nebulas to the chart.
pub fn run_events_phase(snapshot: &ActivitySnapshot, chart: &mut SkyChart) {
    let meteors = generate_meteors(snapshot.pull_requests.merged);
    let nebulas = generate_nebulas(snapshot.issues.open, chart.constellations());
    log::debug!(
        "{} meteors from {} merged PRs, {} nebulas from {} open issues",
        meteors.len(),
        snapshot.pull_requests.merged,
        nebulas.len(),
        snapshot.issues.open
    );
    for m in meteors {
        chart.add_meteor(m);
    }
    for n in nebulas {
        chart.add_nebula(n);
    }
}
