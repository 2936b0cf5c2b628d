pub mod scene;
pub mod stats;
