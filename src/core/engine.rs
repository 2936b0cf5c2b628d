/// The top-level novel engine: owns the scene graph, the config and the
/// session, and turns player intents into state transitions.
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use crate::core::config::{ConfigError, NovelConfig};
use crate::core::graph::{GraphError, SceneGraph};
use crate::core::playthrough::{Advance, ChoiceOutcome, PlaythroughError, PlaythroughState};
use crate::core::session::{Screen, Session, Settings};
use crate::core::view::{ChoiceView, SceneView, View};
use crate::schema::scene::ChoiceId;
use crate::schema::stats::GameStats;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("scene graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Built via `NovelEngine::builder()`.
pub struct NovelEngine {
    graph: SceneGraph,
    config: NovelConfig,
    baseline: GameStats,
    session: Session,
}

/// Builder for constructing a `NovelEngine`.
pub struct NovelEngineBuilder {
    scenes_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    baseline: Option<i32>,
    sound: Option<bool>,
    show_stats: Option<bool>,
    /// Directly provided graph (for testing without files).
    graph: Option<SceneGraph>,
    /// Directly provided config (for testing without files).
    config: Option<NovelConfig>,
}

impl NovelEngine {
    pub fn builder() -> NovelEngineBuilder {
        NovelEngineBuilder {
            scenes_path: None,
            config_path: None,
            baseline: None,
            sound: None,
            show_stats: None,
            graph: None,
            config: None,
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn config(&self) -> &NovelConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> Settings {
        self.session.settings
    }

    /// The playthrough in progress, if any.
    pub fn state(&self) -> Option<&PlaythroughState> {
        self.session.playthrough()
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }

    /// Leave the title screen and start at the first scene. Calling this
    /// mid-playthrough starts over.
    pub fn begin(&mut self) {
        self.session.screen = Screen::Playing(PlaythroughState::begin(&self.graph, self.baseline));
    }

    pub fn advance(&mut self) -> Result<Advance, PlaythroughError> {
        let state = self
            .session
            .playthrough_mut()
            .ok_or(PlaythroughError::NotStarted)?;
        state.advance(&self.graph)
    }

    pub fn choose(&mut self, choice_id: &str) -> Result<ChoiceOutcome, PlaythroughError> {
        let state = self
            .session
            .playthrough_mut()
            .ok_or(PlaythroughError::NotStarted)?;
        state.choose(&self.graph, choice_id)
    }

    /// Pick the `index`-th visible choice. Convenience for front ends that
    /// number their buttons.
    pub fn choose_nth(&mut self, index: usize) -> Result<ChoiceOutcome, PlaythroughError> {
        let state = self.state().ok_or(PlaythroughError::NotStarted)?;
        if !state.choices_revealed() {
            let scene = state.scene_id().clone();
            return Err(if state.is_missing() {
                PlaythroughError::SceneNotFound(scene)
            } else {
                PlaythroughError::ChoicesNotRevealed(scene)
            });
        }
        let Some(choice) = state.visible_choices(&self.graph).get(index) else {
            return Err(PlaythroughError::InvalidChoice {
                scene: state.scene_id().clone(),
                choice: ChoiceId::new(format!("#{index}")),
            });
        };
        let id = choice.id.clone();
        self.choose(id.as_str())
    }

    pub fn jump_to(&mut self, scene_id: &str) -> Result<(), PlaythroughError> {
        let state = self
            .session
            .playthrough_mut()
            .ok_or(PlaythroughError::NotStarted)?;
        state.jump_to(&self.graph, scene_id)
    }

    /// Throw the current playthrough away and start again from the baseline,
    /// from any screen.
    pub fn restart(&mut self) {
        info!("playthrough_restarted");
        self.begin();
    }

    pub fn return_to_title(&mut self) {
        info!("returned_to_title");
        self.session.screen = Screen::Title;
    }

    pub fn toggle_sound(&mut self) -> bool {
        let sound = self.session.toggle_sound();
        info!(sound, "sound_toggled");
        sound
    }

    pub fn toggle_stats_panel(&mut self) -> bool {
        let show_stats = self.session.toggle_stats_panel();
        info!(show_stats, "stats_panel_toggled");
        show_stats
    }

    /// Project the current state for a renderer.
    pub fn view(&self) -> View<'_> {
        let settings = self.session.settings;
        let state = match &self.session.screen {
            Screen::Title => {
                return View::Title {
                    title: &self.config.title,
                    subtitle: &self.config.subtitle,
                    author: &self.config.author,
                    sound: settings.sound,
                }
            }
            Screen::Playing(state) => state,
        };

        let Some(scene) = state.current_scene(&self.graph) else {
            return View::Missing {
                scene_id: state.scene_id(),
                stats: state.stats(),
            };
        };

        View::Scene(SceneView {
            scene,
            line: state.current_line(&self.graph),
            line_index: state.line_index(),
            choices_visible: state.choices_revealed(),
            choices: state
                .visible_choices(&self.graph)
                .iter()
                .map(ChoiceView::new)
                .collect(),
            stats: state.stats(),
            show_stats: settings.show_stats,
            sound: settings.sound,
        })
    }
}

impl NovelEngineBuilder {
    /// Load scenes from a RON file instead of the bundled story.
    pub fn scenes_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scenes_path = Some(path.into());
        self
    }

    /// Load the novel config from a RON file.
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Override the configured starting value of every stat.
    pub fn baseline(mut self, value: i32) -> Self {
        self.baseline = Some(value);
        self
    }

    pub fn sound(mut self, enabled: bool) -> Self {
        self.sound = Some(enabled);
        self
    }

    pub fn show_stats(mut self, visible: bool) -> Self {
        self.show_stats = Some(visible);
        self
    }

    /// Provide a graph directly (for testing without files).
    pub fn with_graph(mut self, graph: SceneGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Provide a config directly (for testing without files).
    pub fn with_config(mut self, config: NovelConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Resolve config and graph, validate, and start on the title screen.
    ///
    /// With no scenes given, the bundled story and its config are used. A
    /// graph loaded from `scenes_path` starts at the config's `start_scene`;
    /// a graph given with `with_graph` keeps its own start.
    pub fn build(self) -> Result<NovelEngine, EngineError> {
        let custom_story = self.graph.is_some() || self.scenes_path.is_some();

        let mut config = match (self.config, self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => NovelConfig::load_from_ron(&path)?,
            (None, None) if custom_story => NovelConfig::default(),
            (None, None) => NovelConfig::well_of_power()?,
        };
        if let Some(baseline) = self.baseline {
            config.baseline = baseline;
        }
        if let Some(sound) = self.sound {
            config.sound = sound;
        }
        if let Some(show_stats) = self.show_stats {
            config.show_stats = show_stats;
        }

        let graph = match (self.graph, self.scenes_path) {
            (Some(graph), _) => graph,
            (None, Some(path)) => SceneGraph::load_from_ron(&path, config.start_scene.clone())?,
            (None, None) => SceneGraph::parse_ron(crate::story::SCENES, config.start_scene.clone())?,
        };

        info!(
            title = %config.title,
            scenes = graph.len(),
            start = %graph.start(),
            "novel_engine_built"
        );

        let settings = Settings {
            sound: config.sound,
            show_stats: config.show_stats,
        };
        Ok(NovelEngine {
            baseline: config.baseline_stats(),
            graph,
            config,
            session: Session::new(settings),
        })
    }
}
