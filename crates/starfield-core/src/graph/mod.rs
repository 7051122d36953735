pub mod sky_chart;
pub mod spanning_tree;
pub mod spiral;
