/// Scene graph integration tests: loading and validating RON datasets.

use std::path::Path;
use well_of_power::core::graph::{GraphError, SceneGraph, Violation};
use well_of_power::schema::scene::{ChoiceId, SceneId};

#[test]
fn malformed_fixture_reports_every_violation() {
    let err = SceneGraph::load_from_ron(Path::new("tests/fixtures/malformed_scenes.ron"), "intro")
        .unwrap_err();
    let report = match err {
        GraphError::Malformed(report) => report,
        other => panic!("expected a validation report, got {other:?}"),
    };

    assert_eq!(
        report.violations,
        vec![
            Violation::DanglingChoice {
                scene: SceneId::new("intro"),
                choice: ChoiceId::new("lost"),
                target: SceneId::new("nowhere"),
            },
            Violation::DeadEnd(SceneId::new("office")),
            Violation::DuplicateChoice {
                scene: SceneId::new("ending"),
                choice: ChoiceId::new("restart"),
            },
            Violation::DanglingChoice {
                scene: SceneId::new("ending"),
                choice: ChoiceId::new("restart"),
                target: SceneId::new("epilogue"),
            },
        ]
    );
}

#[test]
fn dangling_target_alone_is_rejected() {
    let input = r#"[
        Scene(
            id: "intro",
            background: "bg.png",
            dialogue: [(speaker: Narrator, text: "Hi.")],
            choices: [(id: "go", text: "Go", next_scene: "drilling_decision")],
        ),
    ]"#;
    match SceneGraph::parse_ron(input, "intro") {
        Err(GraphError::Malformed(report)) => {
            assert_eq!(report.len(), 1);
            assert!(report.to_string().contains("drilling_decision"));
        }
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn loop_fixture_loads_cleanly() {
    let graph =
        SceneGraph::load_from_ron(Path::new("tests/fixtures/loop_scenes.ron"), "intro").unwrap();
    assert_eq!(graph.len(), 3);
    assert_eq!(graph.reachable().len(), 3);
    assert!(graph.lint().is_empty());
}

#[test]
fn bundled_story_is_valid_and_lint_free() {
    let graph = SceneGraph::well_of_power().unwrap();
    assert_eq!(graph.start().as_str(), "intro");
    assert_eq!(graph.reachable().len(), graph.len());
    assert!(graph.lint().is_empty(), "lint warnings: {:?}", graph.lint());

    for id in [
        "intro",
        "office_intro",
        "drilling_decision",
        "environmental_meeting",
        "clean_tech_path",
        "green_future",
    ] {
        assert!(graph.contains(id), "missing scene {id}");
    }
}

#[test]
fn bundled_story_scenes_all_have_content() {
    let graph = SceneGraph::well_of_power().unwrap();
    for scene in graph.scenes() {
        assert!(!scene.is_dead_end(), "{} is a dead end", scene.id);
        assert!(!scene.background.is_empty(), "{} has no background", scene.id);
    }
}
