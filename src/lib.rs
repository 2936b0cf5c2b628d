//! Well of Power: a branching visual novel engine.
//!
//! A static, validated scene graph is walked by a playthrough state machine.
//! Each scene shows its dialogue line by line, then offers choices whose
//! consequences move three clamped stats (reputation, money, environment).
//! Rendering is left to the caller, which reads a `View` and sends back
//! intents: advance, choose, restart.

pub mod core;
pub mod schema;
pub mod story;

pub use crate::core::engine::{EngineError, NovelEngine, NovelEngineBuilder};
pub use crate::core::graph::{GraphError, SceneGraph};
pub use crate::core::playthrough::{PlaythroughError, PlaythroughState};
pub use crate::schema::stats::{Consequences, GameStats, Stat};
