/// Scene Linter: validates a scene graph and reports authoring issues.
///
/// Usage: scene_linter <scenes.ron> [--start <scene_id>]

use std::path::Path;
use std::process;
use well_of_power::core::graph::{GraphError, SceneGraph};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: scene_linter <scenes.ron> [--start <scene_id>]");
        process::exit(0);
    }

    let scenes_path = &args[1];
    let mut start = well_of_power::story::START_SCENE.to_string();

    let mut i = 2;
    while i < args.len() {
        if args[i] == "--start" && i + 1 < args.len() {
            i += 1;
            start = args[i].clone();
        } else {
            eprintln!("Unknown argument: {}", args[i]);
            process::exit(1);
        }
        i += 1;
    }

    println!("\n=== Scene Lint Report ===\n");

    let graph = match SceneGraph::load_from_ron(Path::new(scenes_path), start.as_str()) {
        Ok(graph) => graph,
        Err(GraphError::Malformed(report)) => {
            for violation in &report.violations {
                println!("ERROR: {}", violation);
            }
            println!("\nSummary: {} errors, 0 warnings", report.len());
            process::exit(1);
        }
        Err(e) => {
            eprintln!("ERROR: Failed to load scene file: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Loaded {} scenes, start scene '{}'",
        graph.len(),
        graph.start()
    );

    let warnings = graph.lint();
    if warnings.is_empty() {
        println!("All checks passed!");
    }
    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    let choices: usize = graph.scenes().map(|s| s.choices.len()).sum();
    let lines: usize = graph.scenes().map(|s| s.dialogue.len()).sum();
    println!("\n{} dialogue lines, {} choices", lines, choices);
    println!("\nSummary: 0 errors, {} warnings", warnings.len());
}
