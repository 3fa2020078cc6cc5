/// Calendar Preview: dry-runs the day advance over a save.
///
/// Usage: calendar_preview --state <save.ron> [--days <n>] [--defaults <file>]
///                         [--seed <n>] [--out <file>]
///
/// Content comes from the offline placeholder generator, so the preview
/// shows when automators fire and where their output lands, not what a
/// real generator would write.

use progression_engine::core::difficulty::current_difficulty;
use progression_engine::core::generator::PlaceholderGenerator;
use progression_engine::core::pipeline::{DayReport, ProgressionEngine};
use progression_engine::schema::state::GameState;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut state_path = None;
    let mut defaults_path = None;
    let mut out_path = None;
    let mut days: u32 = 7;
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--state" if i + 1 < args.len() => {
                i += 1;
                state_path = Some(args[i].clone());
            }
            "--defaults" if i + 1 < args.len() => {
                i += 1;
                defaults_path = Some(args[i].clone());
            }
            "--out" if i + 1 < args.len() => {
                i += 1;
                out_path = Some(args[i].clone());
            }
            "--days" if i + 1 < args.len() => {
                i += 1;
                days = args[i].parse().unwrap_or(7);
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(state_path) = state_path else {
        eprintln!("ERROR: --state is required");
        print_usage();
        process::exit(1);
    };

    let mut state = match GameState::load_from_ron(Path::new(&state_path)) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("ERROR: Failed to load save '{}': {}", state_path, e);
            process::exit(1);
        }
    };

    let mut builder = ProgressionEngine::builder().seed(seed);
    if let Some(ref path) = defaults_path {
        builder = builder.defaults_path(path);
    }
    let engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: Failed to build engine: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Previewing {} days from day {} (seed {})",
        days, state.day, seed
    );

    let mut generator = PlaceholderGenerator::new();
    for _ in 0..days {
        let report = engine.advance_day(&mut state, &mut generator);
        print_report(&report);

        let available = engine.available_tasks(&state);
        if available.is_empty() {
            println!("  No tasks available");
        }
        for task in available {
            println!(
                "  [{:>4.1}] {} ({})",
                current_difficulty(task, state.day),
                task.title,
                task.id
            );
        }
    }

    if let Some(ref path) = out_path {
        let written = state
            .to_ron()
            .map_err(|e| e.to_string())
            .and_then(|ron| std::fs::write(path, ron).map_err(|e| e.to_string()));
        match written {
            Ok(()) => println!("\nWrote advanced save to {}", path),
            Err(e) => {
                eprintln!("ERROR: Failed to write '{}': {}", path, e);
                process::exit(1);
            }
        }
    }
}

fn print_report(report: &DayReport) {
    println!("\n--- Day {} ---", report.day);
    if !report.fired.is_empty() {
        println!("  Fired: {}", report.fired.join(", "));
    }
    for failed in &report.failed {
        println!("  FAILED {}: {}", failed.automator_id, failed.error);
    }
    println!(
        "  Added: {} tasks, {} items, {} upgrades, {} events",
        report.tasks_added, report.items_added, report.upgrades_added, report.events_added
    );
    if report.duplicates_skipped > 0 {
        println!("  Skipped {} duplicate ids", report.duplicates_skipped);
    }
    if let Some(ref event) = report.random_event {
        println!("  Random event: {}", event);
    }
}

fn print_usage() {
    println!("Usage: calendar_preview --state <save.ron> [--days <n>] [--defaults <file>]");
    println!("                        [--seed <n>] [--out <file>]");
}
