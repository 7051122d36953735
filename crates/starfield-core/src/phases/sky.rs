//! Sky mood from the hour-of-day distribution of commits.

use crate::config::{SkyBackground, SkyType};
use crate::graph::sky_chart::SkyChart;
use crate::snapshot::{ActivitySnapshot, CommitRecord};

const DAWN_COLORS: &[&str] = &["#1a1033", "#4a2545", "#c06c84", "#f8b195"];
const DAY_COLORS: &[&str] = &["#0b3d91", "#1e5aa8", "#4f8fd6"];
const NIGHT_COLORS: &[&str] = &["#03040b", "#0b1026", "#1b2a4a"];

const DAWN_THRESHOLD: f64 = 0.35;
const DAY_THRESHOLD: f64 = 0.50;

/// Commit totals per time-of-day band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HourBuckets {
    pub dawn: usize,
    pub day: usize,
    pub night: usize,
}

impl HourBuckets {
    pub fn total(&self) -> usize {
        self.dawn + self.day + self.night
    }
}

/// 24-slot histogram of commit hours.
pub fn hour_histogram(commits: &[CommitRecord]) -> [usize; 24] {
    let mut hist = [0usize; 24];
    for c in commits {
        hist[usize::from(c.hour) % 24] += 1;
    }
    hist
}

/// Dawn is 4-8, day is 9-17, night is 18-23 and 0-3.
pub fn bucket_hours(hist: &[usize; 24]) -> HourBuckets {
    let mut buckets = HourBuckets::default();
    for (hour, &count) in hist.iter().enumerate() {
        match hour {
            4..=8 => buckets.dawn += count,
            9..=17 => buckets.day += count,
            _ => buckets.night += count,
        }
    }
    buckets
}

/// Busiest hour; the earliest hour wins ties.
pub fn peak_hour(hist: &[usize; 24]) -> u8 {
    let mut peak = 0;
    for (hour, &count) in hist.iter().enumerate() {
        if count > hist[peak] {
            peak = hour;
        }
    }
    peak as u8
}

fn background(sky_type: SkyType, peak_hour: u8) -> SkyBackground {
    let colors = match sky_type {
        SkyType::Dawn => DAWN_COLORS,
        SkyType::Day => DAY_COLORS,
        SkyType::Night => NIGHT_COLORS,
    };
    SkyBackground {
        sky_type,
        peak_hour,
        colors: colors.iter().map(|c| c.to_string()).collect(),
        show_milky_way: sky_type == SkyType::Night,
    }
}

/// Classify the sky for a commit history.
pub fn classify_sky(commits: &[CommitRecord]) -> SkyBackground {
    let hist = hour_histogram(commits);
    let buckets = bucket_hours(&hist);
    let total = buckets.total();
    if total == 0 {
        return background(SkyType::Night, 0);
    }

    let share = |n: usize| n as f64 / total as f64;
    let sky_type = if share(buckets.dawn) > DAWN_THRESHOLD {
        SkyType::Dawn
    } else if share(buckets.day) > DAY_THRESHOLD {
        SkyType::Day
    } else {
        SkyType::Night
    };
    background(sky_type, peak_hour(&hist))
}

/// Phase: set the chart's sky background.
pub fn run_sky_phase(snapshot: &ActivitySnapshot, chart: &mut SkyChart) {
    let sky = classify_sky(&snapshot.commit_history);
    log::debug!("sky is {} (peak hour {})", sky.sky_type, sky.peak_hour);
    chart.set_sky(sky);
}
