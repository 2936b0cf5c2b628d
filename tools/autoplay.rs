/// Autoplay: seeded random walks through a scene graph, reporting which
/// scenes the walks finish in and how far the stats swing.
///
/// Usage: autoplay [--scenes <path>] [--runs <n>] [--seed <n>] [--max-choices <n>]
///
/// A walk ends when it reaches a scene whose only way on is the replay loop,
/// a scene with no choices, or after `--max-choices` choices.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use well_of_power::core::engine::NovelEngine;
use well_of_power::core::playthrough::Advance;
use well_of_power::schema::stats::{Stat, STAT_MAX, STAT_MIN};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut builder = NovelEngine::builder();
    let mut runs: usize = 1000;
    let mut seed: u64 = 42;
    let mut max_choices: usize = 50;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scenes" if i + 1 < args.len() => {
                i += 1;
                builder = builder.scenes_path(&args[i]);
            }
            "--runs" if i + 1 < args.len() => {
                i += 1;
                runs = args[i].parse().unwrap_or(1000);
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            "--max-choices" if i + 1 < args.len() => {
                i += 1;
                max_choices = args[i].parse().unwrap_or(50);
            }
            "--help" | "-h" => {
                println!("Usage: autoplay [--scenes <path>] [--runs <n>] [--seed <n>] [--max-choices <n>]");
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let mut endings: BTreeMap<String, usize> = BTreeMap::new();
    let mut lows = [STAT_MAX; 3];
    let mut highs = [STAT_MIN; 3];
    let mut total_choices = 0usize;
    let mut errors = 0usize;

    for run in 0..runs {
        engine.restart();
        let mut taken = 0usize;

        loop {
            // Exhaust the dialogue.
            while let Ok(Advance::NextLine(_)) = engine.advance() {}

            let Some(state) = engine.state() else {
                break;
            };
            let graph = engine.graph();
            let choices = state.visible_choices(graph);
            let onward: Vec<_> = choices
                .iter()
                .filter(|c| &c.next_scene != graph.start())
                .collect();

            if onward.is_empty() || taken >= max_choices {
                *endings.entry(state.scene_id().to_string()).or_insert(0) += 1;
                let stats = state.stats();
                for (n, stat) in Stat::ALL.iter().enumerate() {
                    lows[n] = lows[n].min(stats.get(*stat));
                    highs[n] = highs[n].max(stats.get(*stat));
                }
                break;
            }

            let Some(choice) = onward.choose(&mut rng) else {
                break;
            };
            let id = choice.id.clone();
            match engine.choose(id.as_str()) {
                Ok(outcome) => {
                    debug!(run, choice = %outcome.choice, to = %outcome.next_scene, "autoplay_step");
                    taken += 1;
                    total_choices += 1;
                }
                Err(e) => {
                    eprintln!("run {}: {}", run, e);
                    errors += 1;
                    break;
                }
            }
        }
    }

    println!("\n=== Autoplay: {} runs, seed {} ({} errors) ===\n", runs, seed, errors);
    println!("Endings reached:");
    for (scene, count) in &endings {
        let share = if runs == 0 {
            0.0
        } else {
            *count as f64 * 100.0 / runs as f64
        };
        println!("  {:<24} {:>6} ({:.1}%)", scene, count, share);
    }

    println!("\nFinal stat ranges:");
    for (n, stat) in Stat::ALL.iter().enumerate() {
        if lows[n] > highs[n] {
            continue;
        }
        println!("  {:<12} {:>3} .. {:>3}", stat.label(), lows[n], highs[n]);
    }

    if runs > 0 {
        println!(
            "\nAverage choices per run: {:.2}",
            total_choices as f64 / runs as f64
        );
    }
}
