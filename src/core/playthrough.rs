/// Playthrough state machine: walks one scene's dialogue, reveals its
/// choices, and moves to the next scene applying stat consequences.
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::graph::SceneGraph;
use crate::schema::scene::{Choice, ChoiceId, DialogueLine, Scene, SceneId};
use crate::schema::stats::GameStats;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaythroughError {
    #[error("scene not found: {0}")]
    SceneNotFound(SceneId),
    #[error("choice '{choice}' is not offered in scene '{scene}'")]
    InvalidChoice { scene: SceneId, choice: ChoiceId },
    #[error("no playthrough in progress")]
    NotStarted,
    #[error("scene '{0}' has finished its dialogue")]
    NotPresenting(SceneId),
    #[error("choices for scene '{0}' have not been revealed")]
    ChoicesNotRevealed(SceneId),
}

/// Where the player is within the current scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    /// Showing dialogue line `n`.
    Line(usize),
    /// Dialogue exhausted, choices on screen.
    Choices,
    /// The current scene ID does not resolve; shown as a fallback screen.
    Missing,
}

/// Result of a successful `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextLine(usize),
    ChoicesRevealed,
}

/// Result of a successful `choose`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOutcome {
    pub choice: ChoiceId,
    pub next_scene: SceneId,
    pub stats: GameStats,
    /// The choice looped back to the start scene and began a new playthrough.
    pub replay: bool,
}

/// The only mutable state in a playthrough. Holds the current position and
/// stats, never history, so replay loops cannot grow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaythroughState {
    scene: SceneId,
    cursor: Cursor,
    stats: GameStats,
    #[serde(skip)]
    baseline: GameStats,
}

impl PlaythroughState {
    /// Start a fresh playthrough at the graph's start scene.
    pub fn begin(graph: &SceneGraph, baseline: GameStats) -> Self {
        info!(start = %graph.start(), "playthrough_started");
        let mut state = Self {
            scene: graph.start().clone(),
            cursor: Cursor::Missing,
            stats: baseline,
            baseline,
        };
        state.cursor = entry_cursor(graph.find_scene(state.scene.as_str()));
        state
    }

    pub fn scene_id(&self) -> &SceneId {
        &self.scene
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }

    pub fn baseline(&self) -> GameStats {
        self.baseline
    }

    /// Index of the dialogue line on screen, `None` once choices show.
    pub fn line_index(&self) -> Option<usize> {
        match self.cursor {
            Cursor::Line(i) => Some(i),
            Cursor::Choices | Cursor::Missing => None,
        }
    }

    pub fn choices_revealed(&self) -> bool {
        self.cursor == Cursor::Choices
    }

    pub fn is_missing(&self) -> bool {
        self.cursor == Cursor::Missing
    }

    pub fn current_scene<'g>(&self, graph: &'g SceneGraph) -> Option<&'g Scene> {
        graph.find_scene(self.scene.as_str())
    }

    /// The dialogue line on screen, or `None` while choices show.
    pub fn current_line<'g>(&self, graph: &'g SceneGraph) -> Option<&'g DialogueLine> {
        let index = self.line_index()?;
        self.current_scene(graph)?.line(index)
    }

    /// Choices the player can pick from; empty until revealed.
    pub fn visible_choices<'g>(&self, graph: &'g SceneGraph) -> &'g [Choice] {
        match (self.cursor, self.current_scene(graph)) {
            (Cursor::Choices, Some(scene)) => &scene.choices,
            _ => &[],
        }
    }

    /// Move to the next dialogue line, or reveal choices after the last one.
    pub fn advance(&mut self, graph: &SceneGraph) -> Result<Advance, PlaythroughError> {
        let index = match self.cursor {
            Cursor::Line(i) => i,
            Cursor::Choices => return Err(PlaythroughError::NotPresenting(self.scene.clone())),
            Cursor::Missing => return Err(PlaythroughError::SceneNotFound(self.scene.clone())),
        };
        let Some(scene) = graph.find_scene(self.scene.as_str()) else {
            return Err(self.lose_scene(self.scene.clone()));
        };

        if index + 1 < scene.dialogue.len() {
            self.cursor = Cursor::Line(index + 1);
            debug!(scene = %self.scene, line = index + 1, "dialogue_advanced");
            Ok(Advance::NextLine(index + 1))
        } else {
            self.cursor = Cursor::Choices;
            debug!(scene = %self.scene, choices = scene.choices.len(), "choices_revealed");
            Ok(Advance::ChoicesRevealed)
        }
    }

    /// Pick one of the revealed choices.
    ///
    /// Consequences are applied and the target scene entered in one step.
    /// A choice back to the start scene begins a new playthrough instead,
    /// resetting stats to the baseline. If the target does not resolve, the
    /// stats are left untouched and the state falls back to `Missing`.
    pub fn choose(
        &mut self,
        graph: &SceneGraph,
        choice_id: &str,
    ) -> Result<ChoiceOutcome, PlaythroughError> {
        match self.cursor {
            Cursor::Choices => {}
            Cursor::Line(_) => {
                return Err(PlaythroughError::ChoicesNotRevealed(self.scene.clone()))
            }
            Cursor::Missing => return Err(PlaythroughError::SceneNotFound(self.scene.clone())),
        }
        let Some(scene) = graph.find_scene(self.scene.as_str()) else {
            return Err(self.lose_scene(self.scene.clone()));
        };
        let Some(choice) = scene.find_choice(choice_id) else {
            warn!(scene = %self.scene, choice = choice_id, "invalid_choice");
            return Err(PlaythroughError::InvalidChoice {
                scene: self.scene.clone(),
                choice: ChoiceId::new(choice_id),
            });
        };

        if &choice.next_scene == graph.start() {
            info!(scene = %self.scene, choice = %choice.id, "replay_requested");
            *self = Self::begin(graph, self.baseline);
            return Ok(ChoiceOutcome {
                choice: choice.id.clone(),
                next_scene: choice.next_scene.clone(),
                stats: self.stats,
                replay: true,
            });
        }

        let Some(next) = graph.find_scene(choice.next_scene.as_str()) else {
            return Err(self.lose_scene(choice.next_scene.clone()));
        };
        let stats = self.stats.apply(&choice.consequences);
        info!(
            from = %self.scene,
            to = %next.id,
            choice = %choice.id,
            reputation = stats.reputation(),
            money = stats.money(),
            environment = stats.environment(),
            "choice_made"
        );
        self.stats = stats;
        self.enter(next);

        Ok(ChoiceOutcome {
            choice: choice.id.clone(),
            next_scene: next.id.clone(),
            stats,
            replay: false,
        })
    }

    /// Enter an arbitrary scene keeping the current stats. Authoring aid for
    /// jumping around a story without playing to it.
    pub fn jump_to(&mut self, graph: &SceneGraph, scene_id: &str) -> Result<(), PlaythroughError> {
        match graph.find_scene(scene_id) {
            Some(scene) => {
                debug!(from = %self.scene, to = %scene.id, "jumped_to_scene");
                self.enter(scene);
                Ok(())
            }
            None => Err(self.lose_scene(SceneId::new(scene_id))),
        }
    }

    /// Discard everything and start over from the baseline.
    pub fn restart(&mut self, graph: &SceneGraph) {
        *self = Self::begin(graph, self.baseline);
    }

    fn enter(&mut self, scene: &Scene) {
        self.scene = scene.id.clone();
        self.cursor = entry_cursor(Some(scene));
    }

    fn lose_scene(&mut self, scene: SceneId) -> PlaythroughError {
        warn!(scene = %scene, "scene_not_found");
        self.scene = scene.clone();
        self.cursor = Cursor::Missing;
        PlaythroughError::SceneNotFound(scene)
    }
}

// A scene without dialogue has no line 0, so its choices show at once.
fn entry_cursor(scene: Option<&Scene>) -> Cursor {
    match scene {
        Some(scene) if scene.dialogue.is_empty() => Cursor::Choices,
        Some(_) => Cursor::Line(0),
        None => Cursor::Missing,
    }
}
