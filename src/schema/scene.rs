use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use super::stats::Consequences;

/// Newtype wrapper for scene IDs. Choices point at scenes by ID, never by
/// reference, so the graph may contain cycles without shared ownership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub String);

impl SceneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SceneId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SceneId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Newtype wrapper for choice IDs, unique within one scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceId(pub String);

impl ChoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChoiceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who a dialogue line is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    /// Unattributed narration.
    Narrator,
    /// A named speaker; the name is shown verbatim.
    Named(String),
}

impl Speaker {
    /// Display name, or `None` for narration.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Narrator => None,
            Self::Named(name) => Some(name),
        }
    }

    pub fn is_narrator(&self) -> bool {
        matches!(self, Self::Narrator)
    }
}

/// One spoken or narrated unit of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub speaker: Speaker,
    pub text: String,
}

/// Where a character portrait is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenPosition {
    Left,
    Center,
    Right,
}

/// A character present in a scene. Characters are per-scene annotations;
/// the same person appearing in two scenes is authored twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    /// Opaque asset reference, resolved by the renderer.
    pub portrait: String,
    pub position: ScreenPosition,
}

/// A player-selectable option shown once a scene's dialogue is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub text: String,
    pub next_scene: SceneId,
    #[serde(default)]
    pub consequences: Consequences,
}

/// One narrative beat. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    /// Opaque asset reference, resolved by the renderer.
    pub background: String,
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub effect: Option<String>,
}

impl Scene {
    pub fn line(&self, index: usize) -> Option<&DialogueLine> {
        self.dialogue.get(index)
    }

    /// Look up a choice by ID within this scene.
    pub fn find_choice(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id.as_str() == id)
    }

    /// Returns true if the scene has neither dialogue nor choices.
    pub fn is_dead_end(&self) -> bool {
        self.dialogue.is_empty() && self.choices.is_empty()
    }

    /// Characters drawn at the given position, in authored order.
    pub fn characters_at(&self, position: ScreenPosition) -> impl Iterator<Item = &Character> {
        self.characters
            .iter()
            .filter(move |c| c.position == position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFICE: &str = r#"Scene(
        id: "office",
        background: "bg/office.png",
        dialogue: [
            (speaker: Narrator, text: "The phone rings."),
            (speaker: Named("Laura"), text: "They are outside again."),
        ],
        characters: [
            (id: "laura", name: "Laura", portrait: "portraits/laura.png", position: Left),
        ],
        choices: [
            (id: "wait", text: "Wait it out", next_scene: "office", consequences: (money: 5)),
        ],
    )"#;

    #[test]
    fn scene_parses_from_ron() {
        let scene: Scene = ron::from_str(OFFICE).unwrap();
        assert_eq!(scene.id, SceneId::new("office"));
        assert_eq!(scene.dialogue.len(), 2);
        assert!(scene.dialogue[0].speaker.is_narrator());
        assert_eq!(scene.dialogue[1].speaker.name(), Some("Laura"));
        assert_eq!(scene.choices[0].consequences.money, 5);
        assert_eq!(scene.audio, None);
    }

    #[test]
    fn find_choice_by_id() {
        let scene: Scene = ron::from_str(OFFICE).unwrap();
        assert!(scene.find_choice("wait").is_some());
        assert!(scene.find_choice("leave").is_none());
    }

    #[test]
    fn line_out_of_bounds_is_none() {
        let scene: Scene = ron::from_str(OFFICE).unwrap();
        assert!(scene.line(1).is_some());
        assert!(scene.line(2).is_none());
    }

    #[test]
    fn dead_end_detection() {
        let mut scene: Scene = ron::from_str(OFFICE).unwrap();
        assert!(!scene.is_dead_end());
        scene.dialogue.clear();
        assert!(!scene.is_dead_end());
        scene.choices.clear();
        assert!(scene.is_dead_end());
    }

    #[test]
    fn characters_filtered_by_position() {
        let scene: Scene = ron::from_str(OFFICE).unwrap();
        assert_eq!(scene.characters_at(ScreenPosition::Left).count(), 1);
        assert_eq!(scene.characters_at(ScreenPosition::Right).count(), 0);
    }

    #[test]
    fn scene_id_display() {
        assert_eq!(SceneId::from("intro").to_string(), "intro");
        assert_eq!(ChoiceId::new("restart").as_str(), "restart");
    }
}
