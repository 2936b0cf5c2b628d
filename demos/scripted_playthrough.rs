/// Scripted playthrough: walks the bundled story along the clean-tech path
/// and prints each beat, then loops back to the title.
///
/// Run with: cargo run --example scripted_playthrough

use well_of_power::core::engine::NovelEngine;
use well_of_power::core::playthrough::Advance;
use well_of_power::core::view::View;

fn main() {
    let mut engine = NovelEngine::builder()
        .build()
        .expect("Failed to build engine");

    if let View::Title {
        title,
        subtitle,
        author,
        ..
    } = engine.view()
    {
        println!("=== {} ===\n{}\n{}\n", title, subtitle, author);
    }

    engine.begin();

    let script = [
        "begin",
        "meet_activists",
        "accept_clean_tech",
        "balanced_transition",
    ];

    for choice_id in script {
        print_dialogue(&mut engine);
        let outcome = engine.choose(choice_id).expect("scripted choice should be offered");
        println!(
            "\n> {}  =>  reputation {}, money {}, environment {}\n",
            outcome.choice,
            outcome.stats.reputation(),
            outcome.stats.money(),
            outcome.stats.environment()
        );
    }

    print_dialogue(&mut engine);
    let outcome = engine.choose("restart").expect("ending should offer a restart");
    println!("\n> {} (new playthrough: {})", outcome.choice, outcome.replay);
}

fn print_dialogue(engine: &mut NovelEngine) {
    loop {
        if let View::Scene(view) = engine.view() {
            if let Some(line) = view.line {
                match line.speaker.name() {
                    Some(name) => println!("{}: {}", name, line.text),
                    None => println!("{}", line.text),
                }
            }
        }
        match engine.advance() {
            Ok(Advance::NextLine(_)) => continue,
            Ok(Advance::ChoicesRevealed) => break,
            Err(e) => panic!("advance failed: {e}"),
        }
    }

    if let View::Scene(view) = engine.view() {
        for choice in &view.choices {
            let preview = choice.preview_text();
            println!("  - {} [{}]", choice.choice.text, preview);
        }
    }
}
