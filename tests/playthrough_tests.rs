/// Playthrough integration tests: end-to-end walks through the bundled
/// story and the loop fixture.

use std::path::Path;
use well_of_power::core::engine::NovelEngine;
use well_of_power::core::graph::SceneGraph;
use well_of_power::core::playthrough::{Advance, PlaythroughError, PlaythroughState};
use well_of_power::core::view::View;
use well_of_power::schema::scene::SceneId;
use well_of_power::schema::stats::GameStats;

fn reveal(engine: &mut NovelEngine) {
    loop {
        match engine.advance() {
            Ok(Advance::ChoicesRevealed) => break,
            Ok(Advance::NextLine(_)) => {}
            Err(e) => panic!("advance failed: {e}"),
        }
    }
}

fn started() -> NovelEngine {
    let mut engine = NovelEngine::builder().build().unwrap();
    engine.begin();
    engine
}

#[test]
fn advance_reaches_last_line_then_reveals_for_every_scene() {
    let graph = SceneGraph::well_of_power().unwrap();
    for scene in graph.scenes() {
        let mut state = PlaythroughState::begin(&graph, GameStats::baseline());
        state.jump_to(&graph, scene.id.as_str()).unwrap();
        if scene.dialogue.is_empty() {
            assert!(state.choices_revealed());
            continue;
        }

        for _ in 0..scene.dialogue.len() - 1 {
            state.advance(&graph).unwrap();
        }
        assert_eq!(state.line_index(), Some(scene.dialogue.len() - 1));
        assert!(!state.choices_revealed());

        assert_eq!(state.advance(&graph), Ok(Advance::ChoicesRevealed));
        assert!(state.choices_revealed());
        assert_eq!(state.line_index(), None);
        assert!(state.advance(&graph).is_err());
    }
}

#[test]
fn office_intro_ignore_protests() {
    let mut engine = started();
    engine.choose("begin").unwrap_err();
    reveal(&mut engine);
    engine.choose("begin").unwrap();
    assert_eq!(engine.state().unwrap().scene_id().as_str(), "office_intro");

    // Two lines, then the choices.
    assert_eq!(engine.advance(), Ok(Advance::NextLine(1)));
    assert_eq!(engine.advance(), Ok(Advance::ChoicesRevealed));

    let outcome = engine.choose("ignore_protests").unwrap();
    assert_eq!(outcome.next_scene, SceneId::new("drilling_decision"));
    assert_eq!(outcome.stats, GameStats::new(45, 70, 40));

    let state = engine.state().unwrap();
    assert_eq!(state.scene_id().as_str(), "drilling_decision");
    assert_eq!(state.line_index(), Some(0));
    assert!(!state.choices_revealed());
    assert_eq!(state.stats().reputation(), 45);
    assert_eq!(state.stats().money(), 70);
    assert_eq!(state.stats().environment(), 40);
}

#[test]
fn environmental_meeting_accept_clean_tech() {
    let mut engine = started();
    engine.jump_to("environmental_meeting").unwrap();
    reveal(&mut engine);

    let outcome = engine.choose("accept_clean_tech").unwrap();
    assert_eq!(outcome.next_scene.as_str(), "clean_tech_path");
    let stats = engine.state().unwrap().stats();
    assert_eq!(stats.reputation(), 65);
    assert_eq!(stats.money(), 35);
    assert_eq!(stats.environment(), 70);
}

#[test]
fn green_future_restart_resets_to_baseline() {
    let mut engine = started();
    let path = [
        "begin",
        "meet_activists",
        "accept_clean_tech",
        "invest_fully",
    ];
    for choice in path {
        reveal(&mut engine);
        engine.choose(choice).unwrap();
    }
    let state = engine.state().unwrap();
    assert_eq!(state.scene_id().as_str(), "green_future");
    assert_ne!(state.stats(), GameStats::baseline());

    reveal(&mut engine);
    let outcome = engine.choose("restart").unwrap();
    assert!(outcome.replay);

    let state = engine.state().unwrap();
    assert_eq!(state.scene_id().as_str(), "intro");
    assert_eq!(state.line_index(), Some(0));
    assert!(!state.choices_revealed());
    assert_eq!(state.stats(), GameStats::baseline());
}

#[test]
fn restart_always_returns_to_baseline() {
    let mut engine = started();
    for _ in 0..3 {
        reveal(&mut engine);
        engine.choose("begin").unwrap();
        reveal(&mut engine);
        engine.choose("ignore_protests").unwrap();
        reveal(&mut engine);
        engine.choose("expand_drilling").unwrap();
        assert_eq!(engine.state().unwrap().scene_id().as_str(), "oil_baron_ending");

        engine.restart();
        let state = engine.state().unwrap();
        assert_eq!(state.scene_id().as_str(), "intro");
        assert_eq!(state.line_index(), Some(0));
        assert!(!state.choices_revealed());
        assert_eq!(state.stats(), GameStats::baseline());
    }
}

#[test]
fn invalid_choice_is_reported_not_ignored() {
    let mut engine = started();
    reveal(&mut engine);
    assert!(matches!(
        engine.choose("accept_clean_tech"),
        Err(PlaythroughError::InvalidChoice { .. })
    ));
    assert_eq!(engine.state().unwrap().scene_id().as_str(), "intro");
}

#[test]
fn repeated_spending_saturates_at_zero() {
    let graph =
        SceneGraph::load_from_ron(Path::new("tests/fixtures/loop_scenes.ron"), "intro").unwrap();
    let mut engine = NovelEngine::builder().with_graph(graph).build().unwrap();
    engine.begin();
    reveal(&mut engine);
    engine.choose("spend").unwrap();

    // "market" has no dialogue, so its choices are already showing.
    assert!(engine.state().unwrap().choices_revealed());
    engine.choose("spend_more").unwrap();
    let outcome = engine.choose("spend_more").unwrap();
    assert_eq!(outcome.stats.money(), 0);
    assert_eq!(engine.state().unwrap().stats().money(), 0);
}

#[test]
fn view_follows_the_player() {
    let mut engine = NovelEngine::builder().build().unwrap();
    assert!(matches!(engine.view(), View::Title { .. }));

    engine.begin();
    match engine.view() {
        View::Scene(view) => {
            assert_eq!(view.scene.id.as_str(), "intro");
            assert!(view.line.is_some());
            assert!(view.choices.is_empty());
            assert_eq!(view.stats, GameStats::baseline());
        }
        other => panic!("expected scene view, got {other:?}"),
    }

    engine.return_to_title();
    assert!(matches!(engine.view(), View::Title { .. }));
    assert!(engine.state().is_none());
}
