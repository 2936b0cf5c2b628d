/// Read-only projection of the engine for renderers.
use serde::Serialize;

use crate::schema::scene::{Choice, DialogueLine, Scene, SceneId};
use crate::schema::stats::{GameStats, StatDelta};

/// What a renderer should draw right now.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum View<'a> {
    Title {
        title: &'a str,
        subtitle: &'a str,
        author: &'a str,
        sound: bool,
    },
    Scene(SceneView<'a>),
    /// Fallback when the current scene ID does not resolve.
    Missing {
        scene_id: &'a SceneId,
        stats: GameStats,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneView<'a> {
    pub scene: &'a Scene,
    /// `None` while choices are showing.
    pub line: Option<&'a DialogueLine>,
    pub line_index: Option<usize>,
    pub choices_visible: bool,
    /// Empty until the dialogue is exhausted.
    pub choices: Vec<ChoiceView<'a>>,
    pub stats: GameStats,
    pub show_stats: bool,
    pub sound: bool,
}

/// A choice button with its consequence preview. Zero deltas are not shown.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceView<'a> {
    pub choice: &'a Choice,
    pub preview: Vec<StatDelta>,
}

impl<'a> ChoiceView<'a> {
    pub fn new(choice: &'a Choice) -> Self {
        Self {
            choice,
            preview: choice.consequences.preview(),
        }
    }

    /// Preview as one line, e.g. `+15 Reputation, -15 Money`.
    pub fn preview_text(&self) -> String {
        self.preview
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
