pub mod classify;
pub mod constellations;
pub mod events;
pub mod sky;
pub mod stars;
