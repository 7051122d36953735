//! Star builder: one repository's commits become positioned stars.

use crate::config::Star;
use crate::graph::spiral::SpiralLayout;
use crate::snapshot::CommitRecord;

/// Longest label a star may carry, in characters.
pub const MAX_LABEL_CHARS: usize = 20;

/// Hard ceiling on stars per constellation, whatever the configured limit.
pub const MAX_STARS: usize = 15;

const PLACEHOLDER_BRIGHTNESS: f64 = 0.3;
const MIN_BRIGHTNESS: f64 = 0.2;

/// First line of `text`, cut to at most `max` characters.
pub fn truncate_label(text: &str, max: usize) -> String {
    text.lines().next().unwrap_or("").trim().chars().take(max).collect()
}

fn size_for(brightness: f64) -> u8 {
    (brightness * 4.0).ceil().clamp(1.0, 5.0) as u8
}

/// Fixed-stride subsample: every `max(1, n / limit)`-th commit, at most `limit`.
///
/// `limit` is clamped to `1..=MAX_STARS`, so any non-empty history yields at
/// least one real star.
pub fn sample_commits<'a>(commits: &[&'a CommitRecord], limit: usize) -> Vec<&'a CommitRecord> {
    let limit = limit.clamp(1, MAX_STARS);
    let stride = (commits.len() / limit).max(1);
    commits.iter().step_by(stride).take(limit).copied().collect()
}

/// Build the stars for one repository.
///
/// A repository without commits still gets a single dim placeholder star at
/// the centre so it stays visible.
pub fn build_stars(
    repo_name: &str,
    commits: &[&CommitRecord],
    color: &str,
    limit: usize,
) -> Vec<Star> {
    let sampled = sample_commits(commits, limit);
    if sampled.is_empty() {
        return vec![Star {
            x: 0.5,
            y: 0.5,
            brightness: PLACEHOLDER_BRIGHTNESS,
            size: size_for(PLACEHOLDER_BRIGHTNESS),
            color: color.to_string(),
            label: truncate_label(repo_name, MAX_LABEL_CHARS),
        }];
    }

    let max_changed = sampled
        .iter()
        .map(|c| c.changed_lines())
        .max()
        .unwrap_or(0);
    let positions = SpiralLayout::STARS.points(sampled.len());

    sampled
        .iter()
        .zip(positions)
        .map(|(commit, (x, y))| {
            let ratio = if max_changed == 0 {
                0.0
            } else {
                commit.changed_lines() as f64 / max_changed as f64
            };
            let brightness = ratio.clamp(MIN_BRIGHTNESS, 1.0);
            Star {
                x,
                y,
                brightness,
                size: size_for(brightness),
                color: color.to_string(),
                label: truncate_label(&commit.message, MAX_LABEL_CHARS),
            }
        })
        .collect()
}
