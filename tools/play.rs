/// Play: interactive terminal player for a scene graph.
///
/// Usage: play [--scenes <path>] [--config <path>] [--baseline <n>]
///
/// Commands:
///   next | n            advance dialogue
///   choose <n|id>       pick a choice by number or ID
///   begin | restart     start a new playthrough
///   title               return to the title screen
///   stats               toggle the stats panel
///   sound               toggle sound
///   goto <scene_id>     jump to a scene, keeping stats
///   help                list commands
///   quit                exit

use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;
use well_of_power::core::engine::NovelEngine;
use well_of_power::core::view::View;
use well_of_power::schema::stats::Stat;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let mut builder = NovelEngine::builder();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scenes" if i + 1 < args.len() => {
                i += 1;
                builder = builder.scenes_path(&args[i]);
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                builder = builder.config_path(&args[i]);
            }
            "--baseline" if i + 1 < args.len() => {
                i += 1;
                match args[i].parse() {
                    Ok(value) => builder = builder.baseline(value),
                    Err(_) => {
                        eprintln!("Invalid baseline: {}", args[i]);
                        std::process::exit(1);
                    }
                }
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
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

    println!("Loaded {} scenes", engine.graph().len());
    println!("Type 'help' for commands.\n");
    render(&engine);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("play> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(cmd) = parts.first() else {
            // Bare enter advances, like clicking the dialogue box.
            if engine.is_playing() {
                report(engine.advance().map(|_| ()));
                render(&engine);
            }
            continue;
        };

        match cmd.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "next" | "n" => {
                report(engine.advance().map(|_| ()));
                render(&engine);
            }
            "choose" | "c" => {
                let Some(arg) = parts.get(1) else {
                    println!("Usage: choose <n|id>");
                    continue;
                };
                let result = match arg.parse::<usize>() {
                    Ok(n) if n >= 1 => engine.choose_nth(n - 1),
                    _ => engine.choose(arg),
                };
                report(result.map(|_| ()));
                render(&engine);
            }
            "begin" | "restart" => {
                engine.restart();
                render(&engine);
            }
            "title" => {
                engine.return_to_title();
                render(&engine);
            }
            "stats" => {
                let visible = engine.toggle_stats_panel();
                println!("Stats panel {}", if visible { "shown" } else { "hidden" });
                render(&engine);
            }
            "sound" => {
                let on = engine.toggle_sound();
                println!("Sound {}", if on { "on" } else { "off" });
            }
            "goto" => {
                let Some(scene_id) = parts.get(1) else {
                    println!("Usage: goto <scene_id>");
                    let ids: Vec<&str> = engine.graph().scenes().map(|s| s.id.as_str()).collect();
                    println!("  Scenes: {}", ids.join(", "));
                    continue;
                };
                report(engine.jump_to(scene_id));
                render(&engine);
            }
            other => {
                println!("Unknown command: {}. Type 'help' for commands.", other);
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn report<E: std::fmt::Display>(result: Result<(), E>) {
    if let Err(e) = result {
        println!("ERROR: {}", e);
    }
}

fn render(engine: &NovelEngine) {
    match engine.view() {
        View::Title {
            title,
            subtitle,
            author,
            ..
        } => {
            println!("\n  {}", title);
            println!("  {}", subtitle);
            println!("  {}\n", author);
            println!("Type 'begin' to start.");
        }
        View::Missing { scene_id, .. } => {
            println!("\n!! Scene '{}' not found. Type 'restart' to start over.", scene_id);
        }
        View::Scene(view) => {
            println!("\n[{}] ({})", view.scene.id, view.scene.background);
            if !view.scene.characters.is_empty() {
                let present: Vec<String> = view
                    .scene
                    .characters
                    .iter()
                    .map(|c| format!("{} ({:?})", c.name, c.position))
                    .collect();
                println!("  With: {}", present.join(", "));
            }
            if let Some(line) = view.line {
                match line.speaker.name() {
                    Some(name) => println!("\n{}: \"{}\"", name, line.text),
                    None => println!("\n{}", line.text),
                }
            }
            if view.choices_visible {
                if view.choices.is_empty() {
                    println!("\n(The story ends here. Type 'restart' to play again.)");
                }
                for (n, choice) in view.choices.iter().enumerate() {
                    let preview = choice.preview_text();
                    if preview.is_empty() {
                        println!("  {}. {}", n + 1, choice.choice.text);
                    } else {
                        println!("  {}. {}  [{}]", n + 1, choice.choice.text, preview);
                    }
                }
            }
            if view.show_stats {
                let bars: Vec<String> = Stat::ALL
                    .iter()
                    .map(|stat| format!("{} {:>3}", stat.label(), view.stats.get(*stat)))
                    .collect();
                println!("  -- {} --", bars.join(" | "));
            }
        }
    }
}

fn print_usage() {
    println!("Usage: play [--scenes <path>] [--config <path>] [--baseline <n>]");
    println!();
    println!("Plays the bundled story when no scenes file is given.");
}

fn print_help() {
    println!("Commands:");
    println!("  next | n | <enter>  advance dialogue");
    println!("  choose <n|id>       pick a choice by number or ID");
    println!("  begin | restart     start a new playthrough");
    println!("  title               return to the title screen");
    println!("  stats               toggle the stats panel");
    println!("  sound               toggle sound");
    println!("  goto <scene_id>     jump to a scene, keeping stats");
    println!("  help                list commands");
    println!("  quit                exit");
}
