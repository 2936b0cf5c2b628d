//! The bundled "Well of Power" story, compiled into the binary.

/// Scene list in RON.
pub const SCENES: &str = include_str!("../story_data/well_of_power/scenes.ron");

/// Title-screen text and playthrough defaults in RON.
pub const NOVEL: &str = include_str!("../story_data/well_of_power/novel.ron");

/// ID of the scene every playthrough starts in.
pub const START_SCENE: &str = "intro";
