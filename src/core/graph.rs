/// Scene graph: the immutable, ID-addressed table of authored scenes,
/// with load-time validation and authoring lints.

use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::schema::scene::{ChoiceId, Scene, SceneId, ScreenPosition};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("malformed scene graph: {0}")]
    Malformed(ValidationReport),
}

/// A single load-time defect in authored data. Any violation rejects the
/// whole dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The configured start scene is not in the dataset.
    MissingStart(SceneId),
    /// Two scenes share an ID.
    DuplicateScene(SceneId),
    /// Two choices in one scene share an ID.
    DuplicateChoice { scene: SceneId, choice: ChoiceId },
    /// A choice targets a scene that does not exist.
    DanglingChoice {
        scene: SceneId,
        choice: ChoiceId,
        target: SceneId,
    },
    /// A scene with no dialogue and no choices.
    DeadEnd(SceneId),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart(id) => write!(f, "start scene '{}' does not exist", id),
            Self::DuplicateScene(id) => write!(f, "scene '{}' is defined more than once", id),
            Self::DuplicateChoice { scene, choice } => {
                write!(f, "scene '{}' has more than one choice '{}'", scene, choice)
            }
            Self::DanglingChoice {
                scene,
                choice,
                target,
            } => write!(
                f,
                "choice '{}' in scene '{}' targets non-existent scene '{}'",
                choice, scene, target
            ),
            Self::DeadEnd(id) => write!(f, "scene '{}' has no dialogue and no choices", id),
        }
    }
}

/// Every violation found in a dataset, in authored order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} violation(s)", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  - {}", violation)?;
        }
        Ok(())
    }
}

/// Non-fatal authoring issues. The graph is playable, but probably not as
/// the author intended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintWarning {
    /// No path of choices leads here from the start scene.
    Unreachable(SceneId),
    /// Dialogue but no choices: the player can only restart.
    DialogueOnly(SceneId),
    /// A replay-loop choice carries consequences, which the reset discards.
    ReplayWithConsequences { scene: SceneId, choice: ChoiceId },
    /// More than one character is drawn at the same position.
    SharedPosition {
        scene: SceneId,
        position: ScreenPosition,
    },
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable(id) => write!(f, "scene '{}' is unreachable from the start scene", id),
            Self::DialogueOnly(id) => {
                write!(f, "scene '{}' has no choices; the player can only restart", id)
            }
            Self::ReplayWithConsequences { scene, choice } => write!(
                f,
                "choice '{}' in scene '{}' restarts the story, so its consequences are ignored",
                choice, scene
            ),
            Self::SharedPosition { scene, position } => write!(
                f,
                "scene '{}' draws several characters at {:?}",
                scene, position
            ),
        }
    }
}

/// The authored story: scenes addressed by ID, plus the scene every
/// playthrough starts in. Read-only once built.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    scenes: Vec<Scene>,
    index: FxHashMap<SceneId, usize>,
    start: SceneId,
}

impl SceneGraph {
    /// Validate and index a list of scenes.
    ///
    /// All violations are collected before failing, so an author sees the
    /// full report in one pass.
    pub fn from_scenes(scenes: Vec<Scene>, start: impl Into<SceneId>) -> Result<SceneGraph, GraphError> {
        let start = start.into();
        let report = validate_scenes(&scenes, &start);
        if !report.is_empty() {
            warn!(violations = report.len(), "scene_graph_rejected");
            return Err(GraphError::Malformed(report));
        }

        let index = scenes
            .iter()
            .enumerate()
            .map(|(i, scene)| (scene.id.clone(), i))
            .collect();
        debug!(scenes = scenes.len(), start = %start, "scene_graph_loaded");

        Ok(SceneGraph {
            scenes,
            index,
            start,
        })
    }

    /// Parse a scene graph from a RON string holding a list of scenes.
    pub fn parse_ron(input: &str, start: impl Into<SceneId>) -> Result<SceneGraph, GraphError> {
        let scenes: Vec<Scene> = ron::from_str(input)?;
        Self::from_scenes(scenes, start)
    }

    /// Load a scene graph from a RON file.
    pub fn load_from_ron(path: &Path, start: impl Into<SceneId>) -> Result<SceneGraph, GraphError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents, start)
    }

    /// The bundled "Well of Power" story.
    pub fn well_of_power() -> Result<SceneGraph, GraphError> {
        Self::parse_ron(crate::story::SCENES, crate::story::START_SCENE)
    }

    /// Exact-match lookup by scene ID.
    pub fn find_scene(&self, id: &str) -> Option<&Scene> {
        self.index.get(id).and_then(|&i| self.scenes.get(i))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn start(&self) -> &SceneId {
        &self.start
    }

    /// Scenes in authored order.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// IDs of every scene reachable from the start scene by following choices.
    pub fn reachable(&self) -> FxHashSet<&SceneId> {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::new();
        if let Some(start) = self.find_scene(self.start.as_str()) {
            seen.insert(&start.id);
            queue.push_back(start);
        }
        while let Some(scene) = queue.pop_front() {
            for choice in &scene.choices {
                if let Some(next) = self.find_scene(choice.next_scene.as_str()) {
                    if seen.insert(&next.id) {
                        queue.push_back(next);
                    }
                }
            }
        }
        seen
    }

    /// Authoring lints, in authored scene order.
    pub fn lint(&self) -> Vec<LintWarning> {
        let reachable = self.reachable();
        let mut warnings = Vec::new();

        for scene in &self.scenes {
            if !reachable.contains(&scene.id) {
                warnings.push(LintWarning::Unreachable(scene.id.clone()));
            }

            if scene.choices.is_empty() && !scene.dialogue.is_empty() {
                warnings.push(LintWarning::DialogueOnly(scene.id.clone()));
            }

            for choice in &scene.choices {
                if choice.next_scene == self.start && !choice.consequences.is_empty() {
                    warnings.push(LintWarning::ReplayWithConsequences {
                        scene: scene.id.clone(),
                        choice: choice.id.clone(),
                    });
                }
            }

            for position in [ScreenPosition::Left, ScreenPosition::Center, ScreenPosition::Right] {
                if scene.characters_at(position).count() > 1 {
                    warnings.push(LintWarning::SharedPosition {
                        scene: scene.id.clone(),
                        position,
                    });
                }
            }
        }

        warnings
    }
}

/// Check a list of scenes against the load-time invariants without
/// building a graph.
pub fn validate_scenes(scenes: &[Scene], start: &SceneId) -> ValidationReport {
    let mut violations = Vec::new();

    let mut ids: FxHashSet<&SceneId> = FxHashSet::default();
    for scene in scenes {
        if !ids.insert(&scene.id) {
            violations.push(Violation::DuplicateScene(scene.id.clone()));
        }
    }

    if !ids.contains(start) {
        violations.push(Violation::MissingStart(start.clone()));
    }

    for scene in scenes {
        if scene.is_dead_end() {
            violations.push(Violation::DeadEnd(scene.id.clone()));
        }

        let mut choice_ids: FxHashSet<&ChoiceId> = FxHashSet::default();
        for choice in &scene.choices {
            if !choice_ids.insert(&choice.id) {
                violations.push(Violation::DuplicateChoice {
                    scene: scene.id.clone(),
                    choice: choice.id.clone(),
                });
            }
            if !ids.contains(&choice.next_scene) {
                violations.push(Violation::DanglingChoice {
                    scene: scene.id.clone(),
                    choice: choice.id.clone(),
                    target: choice.next_scene.clone(),
                });
            }
        }
    }

    ValidationReport { violations }
}
