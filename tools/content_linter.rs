/// Content Linter: checks a save for dangling references and broken
/// scheduling data.
///
/// Usage: content_linter <save.ron> [--quiet]

use progression_engine::core::validate::{validate, Severity};
use progression_engine::schema::state::GameState;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: content_linter <save.ron> [--quiet]");
        process::exit(0);
    }

    let save_path = Path::new(&args[1]);
    let quiet = args[2..].iter().any(|arg| arg == "--quiet");

    let state = match GameState::load_from_ron(save_path) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("ERROR: Failed to load save '{}': {}", save_path.display(), e);
            process::exit(1);
        }
    };

    println!(
        "Loaded save at day {}: {} tasks, {} pools, {} automators, {} day configs",
        state.day,
        state.tasks.len(),
        state.task_pools.len(),
        state.automators.len(),
        state.day_configs.len()
    );

    let findings = validate(&state);
    let errors = findings
        .iter()
        .filter(|finding| finding.severity == Severity::Error)
        .count();
    let warnings = findings.len() - errors;

    println!("\n=== Content Lint Report ===\n");

    if findings.is_empty() {
        println!("All checks passed!");
    }

    for finding in &findings {
        if quiet && finding.severity == Severity::Warning {
            continue;
        }
        println!("{}", finding);
    }

    println!("\nSummary: {} errors, {} warnings", errors, warnings);

    if errors == 0 {
        process::exit(0);
    } else {
        process::exit(1);
    }
}
