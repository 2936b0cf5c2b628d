/// Session state: which screen is showing, plus the UI settings that
/// outlive any single playthrough.
use serde::Serialize;

use crate::core::playthrough::PlaythroughState;

/// Ambient UI settings. They survive restarts and returns to the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub sound: bool,
    pub show_stats: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            show_stats: true,
        }
    }
}

/// The title screen or a playthrough in progress. There is no "playing"
/// flag to drift out of sync with the playthrough itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Title,
    Playing(PlaythroughState),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub screen: Screen,
    pub settings: Settings,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            screen: Screen::Title,
            settings,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.screen, Screen::Playing(_))
    }

    pub fn playthrough(&self) -> Option<&PlaythroughState> {
        match &self.screen {
            Screen::Playing(state) => Some(state),
            Screen::Title => None,
        }
    }

    pub fn playthrough_mut(&mut self) -> Option<&mut PlaythroughState> {
        match &mut self.screen {
            Screen::Playing(state) => Some(state),
            Screen::Title => None,
        }
    }

    /// Flip the sound setting, returning the new value.
    pub fn toggle_sound(&mut self) -> bool {
        self.settings.sound = !self.settings.sound;
        self.settings.sound
    }

    /// Flip stats-panel visibility, returning the new value.
    pub fn toggle_stats_panel(&mut self) -> bool {
        self.settings.show_stats = !self.settings.show_stats;
        self.settings.show_stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_shows_title() {
        let session = Session::new(Settings::default());
        assert!(!session.is_playing());
        assert!(session.playthrough().is_none());
    }

    #[test]
    fn toggles_flip_and_report() {
        let mut session = Session::new(Settings::default());
        assert!(!session.toggle_sound());
        assert!(session.toggle_sound());
        assert!(!session.toggle_stats_panel());
        assert!(!session.settings.show_stats);
    }
}
