//! Sequential phase orchestrator with timing.
//!
//! Timings are reported alongside the profile, never inside it, so the
//! profile itself stays byte-stable across runs.

use std::path::Path;
use std::time::Instant;

use crate::config::{ConstellationProfile, EngineConfig};
use crate::graph::sky_chart::SkyChart;
use crate::output::build_profile;
use crate::phases;
use crate::snapshot::ActivitySnapshot;

/// Phase labels for progress reporting.
const PHASE_LABELS: &[(&str, &str)] = &[
    ("constellations", "Charting constellations"),
    ("ranking", "Ranking repositories"),
    ("layout", "Packing the sky"),
    ("events", "Scattering meteors and nebulas"),
    ("sky", "Reading the sky"),
];

/// Progress callback type: (phase_name, label).
pub type ProgressCallback = Box<dyn FnMut(&str, &str)>;

type PhaseFn = Box<dyn FnOnce(&EngineConfig, &ActivitySnapshot, &mut SkyChart)>;

/// A finished run: the profile plus per-phase wall time in seconds.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub profile: ConstellationProfile,
    pub phase_timings: Vec<(String, f64)>,
    pub total_ms: f64,
}

/// Execute the five mapping phases over a snapshot.
pub fn run_pipeline(
    snapshot: &ActivitySnapshot,
    config: &EngineConfig,
    mut progress_callback: Option<ProgressCallback>,
) -> PipelineRun {
    let mut chart = SkyChart::new();
    let mut phase_timings = Vec::with_capacity(PHASE_LABELS.len());
    let total_start = Instant::now();

    let phase_fns: Vec<(&str, PhaseFn)> = vec![
        (
            "constellations",
            Box::new(|config, snapshot, chart| {
                phases::constellations::run_constellations_phase(config, snapshot, chart);
            }),
        ),
        (
            "ranking",
            Box::new(|config, _snapshot, chart| {
                phases::constellations::run_ranking_phase(config, chart);
            }),
        ),
        (
            "layout",
            Box::new(|_config, _snapshot, chart| {
                phases::constellations::run_layout_phase(chart);
            }),
        ),
        (
            "events",
            Box::new(|_config, snapshot, chart| {
                phases::events::run_events_phase(snapshot, chart);
            }),
        ),
        (
            "sky",
            Box::new(|_config, snapshot, chart| {
                phases::sky::run_sky_phase(snapshot, chart);
            }),
        ),
    ];

    for (name, phase_fn) in phase_fns {
        if let Some(ref mut cb) = progress_callback {
            let label = PHASE_LABELS
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, l)| *l)
                .unwrap_or(name);
            cb(name, label);
        }

        let start = Instant::now();
        phase_fn(config, snapshot, &mut chart);
        phase_timings.push((name.to_string(), start.elapsed().as_secs_f64()));
        log::debug!("phase {name} done");
    }

    let profile = build_profile(&mut chart);
    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;

    PipelineRun {
        profile,
        phase_timings,
        total_ms,
    }
}

/// Map a snapshot to its profile. Pure: the same snapshot and config always
/// give an identical profile.
pub fn build_constellation_profile(
    snapshot: &ActivitySnapshot,
    config: &EngineConfig,
) -> ConstellationProfile {
    run_pipeline(snapshot, config, None).profile
}

/// Load a snapshot file and run the pipeline over it.
pub fn run_pipeline_on_file(
    path: &Path,
    config: &EngineConfig,
    progress_callback: Option<ProgressCallback>,
) -> Result<PipelineRun, Box<dyn std::error::Error + Send + Sync>> {
    let snapshot = ActivitySnapshot::load(path)?;
    log::info!(
        "loaded {} repositories and {} commits from {}",
        snapshot.repositories.len(),
        snapshot.commit_history.len(),
        path.display()
    );
    Ok(run_pipeline(&snapshot, config, progress_callback))
}
