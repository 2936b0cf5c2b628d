//! WASM bindings for well-of-power: drives the browser front end.
//!
//! The renderer reads `view_json()` after every intent and redraws.

use wasm_bindgen::prelude::*;

use well_of_power::core::engine::NovelEngine;
use well_of_power::core::graph::SceneGraph;
use well_of_power::core::playthrough::{Advance, ChoiceOutcome};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct AdvanceResult {
    choices_revealed: bool,
    line_index: Option<usize>,
}

#[derive(serde::Serialize)]
struct ChoiceResult {
    choice: String,
    next_scene: String,
    replay: bool,
    reputation: i32,
    money: i32,
    environment: i32,
}

impl From<ChoiceOutcome> for ChoiceResult {
    fn from(outcome: ChoiceOutcome) -> Self {
        Self {
            choice: outcome.choice.0,
            next_scene: outcome.next_scene.0,
            replay: outcome.replay,
            reputation: outcome.stats.reputation(),
            money: outcome.stats.money(),
            environment: outcome.stats.environment(),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// NovelDemo: the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct NovelDemo {
    engine: NovelEngine,
}

#[wasm_bindgen]
impl NovelDemo {
    /// Create a demo running the bundled "Well of Power" story.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<NovelDemo, JsError> {
        let engine = NovelEngine::builder()
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;
        Ok(NovelDemo { engine })
    }

    /// Create a demo from a RON scene list, starting at `start_scene`.
    pub fn from_ron(scenes_ron: &str, start_scene: &str) -> Result<NovelDemo, JsError> {
        let graph = SceneGraph::parse_ron(scenes_ron, start_scene)
            .map_err(|e| JsError::new(&format!("Scene graph error: {e}")))?;
        let engine = NovelEngine::builder()
            .with_graph(graph)
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;
        Ok(NovelDemo { engine })
    }

    /// Leave the title screen.
    pub fn begin(&mut self) {
        self.engine.begin();
    }

    /// Advance dialogue. Returns JSON `{ choices_revealed, line_index }`.
    pub fn advance(&mut self) -> Result<String, JsError> {
        let step = self
            .engine
            .advance()
            .map_err(|e| JsError::new(&format!("Advance error: {e}")))?;
        to_json(&AdvanceResult {
            choices_revealed: step == Advance::ChoicesRevealed,
            line_index: self.engine.state().and_then(|s| s.line_index()),
        })
    }

    /// Pick a choice by ID. Returns JSON describing the outcome.
    pub fn choose(&mut self, choice_id: &str) -> Result<String, JsError> {
        let outcome = self
            .engine
            .choose(choice_id)
            .map_err(|e| JsError::new(&format!("Choice error: {e}")))?;
        to_json(&ChoiceResult::from(outcome))
    }

    /// Start a new playthrough from the baseline.
    pub fn restart(&mut self) {
        self.engine.restart();
    }

    pub fn return_to_title(&mut self) {
        self.engine.return_to_title();
    }

    /// Returns the new sound setting.
    pub fn toggle_sound(&mut self) -> bool {
        self.engine.toggle_sound()
    }

    /// Returns the new stats-panel visibility.
    pub fn toggle_stats_panel(&mut self) -> bool {
        self.engine.toggle_stats_panel()
    }

    /// The current view as JSON, tagged by `screen`: `title`, `scene` or
    /// `missing`.
    pub fn view_json(&self) -> Result<String, JsError> {
        to_json(&self.engine.view())
    }

    /// Return JSON array of stat labels in display order.
    pub fn stat_labels() -> String {
        let labels: Vec<&str> = well_of_power::schema::stats::Stat::ALL
            .iter()
            .map(|s| s.label())
            .collect();
        serde_json::to_string(&labels).unwrap_or_else(|_| "[]".to_string())
    }
}
