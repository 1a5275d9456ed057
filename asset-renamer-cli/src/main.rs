use anyhow::Context;
use asset_renamer_core::{Config, OutputFormat, RenameError, Tool};
use clap::Parser;
use std::process;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod cli;
mod run;

use cli::{Cli, Commands};

fn main() {
    // Renames are fast; let an interrupted run finish both phases so no file
    // is left under its temporary name, then exit.
    let interrupted = Arc::new(AtomicBool::new(false));

    // Handle SIGINT (Ctrl-C)
    let interrupted_clone = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        eprintln!("\nReceived SIGINT. Finishing current renames...");
        interrupted_clone.store(true, Ordering::SeqCst);
    })
    .expect("Error setting SIGINT handler");

    // Handle SIGTERM
    let interrupted_clone = Arc::clone(&interrupted);
    unsafe {
        signal_hook::low_level::register(signal_hook::consts::SIGTERM, move || {
            eprintln!("\nReceived SIGTERM. Finishing current renames...");
            interrupted_clone.store(true, Ordering::SeqCst);
        })
        .expect("Error setting SIGTERM handler");
    }

    let cli = Cli::parse();

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
            .unwrap_or_else(|e| {
                eprintln!("Error: {e:#}");
                process::exit(2);
            });
    }

    // Load config to get defaults
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: ignoring config file: {e:#}");
        Config::default()
    });

    let output = cli.output.map_or_else(
        || OutputFormat::from_str(&config.defaults.output).unwrap_or_default(),
        Into::into,
    );
    let log_file = cli.log_file.or(config.defaults.log_file);

    let result = match cli.command {
        Commands::Weapons { root, dry_run } => run::handle_run(
            Tool::Weapons,
            root.unwrap_or(config.weapons.root),
            dry_run,
            log_file,
            output,
        ),
        Commands::Midi { root, dry_run } => run::handle_run(
            Tool::Midi,
            root.unwrap_or(config.midi.root),
            dry_run,
            log_file,
            output,
        ),
    };

    // Check if we were interrupted during execution
    if interrupted.load(Ordering::SeqCst) {
        eprintln!("Operation interrupted.");
        process::exit(130);
    }

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

/// 1 = plan rejected before any rename, 2 = bad root, 3 = I/O or internal error
fn exit_code(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<RenameError>() {
        Some(err) if err.is_rejection() => 1,
        Some(err) if err.is_invalid_input() => 2,
        _ => 3,
    }
}
