//! Starfield Core: maps GitHub activity onto a deterministic night sky.
//!
//! Repositories become constellations of commit stars joined by a minimum
//! spanning tree, packed on a golden-angle spiral. Merged pull requests,
//! open issues and commit hours add meteors, nebulas and the sky's mood.

pub mod config;
pub mod graph;
pub mod output;
pub mod phases;
pub mod pipeline;
pub mod snapshot;

pub use pipeline::build_constellation_profile;
