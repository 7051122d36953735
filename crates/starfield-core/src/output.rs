//! Profile aggregation and JSON output.

use std::path::Path;

use crate::config::{Constellation, ConstellationProfile, Meteor, Nebula, ProfileStats};
use crate::graph::sky_chart::SkyChart;
use crate::phases::sky::classify_sky;

/// First constellation with the maximum `key`, or `""` when there are none.
fn first_max_by_key<F>(constellations: &[Constellation], key: F) -> String
where
    F: Fn(&Constellation) -> u64,
{
    let mut best: Option<&Constellation> = None;
    for c in constellations {
        let better = match best {
            Some(b) => key(c) > key(b),
            None => true,
        };
        if better {
            best = Some(c);
        }
    }
    best.map(|c| c.constellation_name.clone()).unwrap_or_default()
}

/// Summary statistics over the finished parts of a profile.
pub fn compute_stats(
    constellations: &[Constellation],
    meteors: &[Meteor],
    nebulas: &[Nebula],
) -> ProfileStats {
    ProfileStats {
        total_stars: constellations.iter().map(|c| c.stars.len()).sum(),
        total_constellations: constellations.len(),
        total_meteors: meteors.len(),
        total_nebulas: nebulas.len(),
        total_commits: constellations.iter().map(|c| c.total_commits).sum(),
        total_github_stars: constellations.iter().map(|c| c.star_count).sum(),
        brightest_constellation: first_max_by_key(constellations, |c| c.total_commits),
        largest_constellation: first_max_by_key(constellations, |c| c.stars.len() as u64),
    }
}

/// Freeze a chart into the immutable profile.
///
/// A chart whose sky phase never ran gets the empty-history sky.
pub fn build_profile(chart: &mut SkyChart) -> ConstellationProfile {
    let (constellations, meteors, nebulas, sky) = chart.take_parts();
    let stats = compute_stats(&constellations, &meteors, &nebulas);
    ConstellationProfile {
        constellations,
        meteors,
        nebulas,
        sky: sky.unwrap_or_else(|| classify_sky(&[])),
        stats,
    }
}

/// Serialise a profile as pretty JSON.
pub fn to_json(profile: &ConstellationProfile) -> serde_json::Result<String> {
    serde_json::to_string_pretty(profile)
}

/// Write the profile to a JSON file, creating parent directories.
pub fn write_output(profile: &ConstellationProfile, output_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = to_json(profile).map_err(std::io::Error::other)?;
    std::fs::write(output_path, json)
}
