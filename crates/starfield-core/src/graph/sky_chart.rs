//! Working state shared by the pipeline phases.
//!
//! A `SkyChart` is filled in phase by phase and then frozen into a
//! [`ConstellationProfile`](crate::config::ConstellationProfile) by the
//! aggregator. Nothing outside one pipeline run ever sees it.

use crate::config::{Constellation, Meteor, Nebula, SkyBackground};

#[derive(Debug, Default)]
pub struct SkyChart {
    constellations: Vec<Constellation>,
    meteors: Vec<Meteor>,
    nebulas: Vec<Nebula>,
    sky: Option<SkyBackground>,
}

impl SkyChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_constellation(&mut self, constellation: Constellation) {
        self.constellations.push(constellation);
    }

    pub fn constellations(&self) -> &[Constellation] {
        &self.constellations
    }

    /// Mutable access for the ranking and layout phases.
    pub fn constellations_mut(&mut self) -> &mut Vec<Constellation> {
        &mut self.constellations
    }

    pub fn constellation_count(&self) -> usize {
        self.constellations.len()
    }

    /// Number of rendered stars across all constellations.
    pub fn star_count(&self) -> usize {
        self.constellations.iter().map(|c| c.stars.len()).sum()
    }

    pub fn add_meteor(&mut self, meteor: Meteor) {
        self.meteors.push(meteor);
    }

    pub fn add_nebula(&mut self, nebula: Nebula) {
        self.nebulas.push(nebula);
    }

    pub fn set_sky(&mut self, sky: SkyBackground) {
        self.sky = Some(sky);
    }

    /// Take the collected parts, leaving an empty chart behind.
    pub fn take_parts(
        &mut self,
    ) -> (
        Vec<Constellation>,
        Vec<Meteor>,
        Vec<Nebula>,
        Option<SkyBackground>,
    ) {
        (
            std::mem::take(&mut self.constellations),
            std::mem::take(&mut self.meteors),
            std::mem::take(&mut self.nebulas),
            self.sky.take(),
        )
    }
}
