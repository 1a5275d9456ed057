use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;

/// Rename game asset files into their canonical names
#[derive(Parser, Debug)]
#[command(name = "asset-renamer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Append a timestamped log of every rename to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Output format (defaults to the config file setting, then summary)
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rename numbered weapon frames (RIFLE-1.png, ...) to PICKUP/IDLE/SHOOT-n names
    Weapons {
        /// Weapons root directory holding one subdirectory per weapon
        /// [default: Assets/Images/Weapons]
        root: Option<PathBuf>,

        /// Print what would change without renaming
        #[arg(long)]
        dry_run: bool,
    },

    /// Normalize MIDI filenames to uppercase, hyphen-separated names
    Midi {
        /// Directory holding the MIDI files [default: Assets/Sounds/MIDI]
        root: Option<PathBuf>,

        /// Print what would change without renaming
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_weapons_with_root_and_dry_run() {
        let cli = Cli::parse_from(["asset-renamer", "weapons", "Sprites/Weapons", "--dry-run"]);
        match cli.command {
            Commands::Weapons { root, dry_run } => {
                assert_eq!(root, Some(PathBuf::from("Sprites/Weapons")));
                assert!(dry_run);
            },
            Commands::Midi { .. } => panic!("expected weapons"),
        }
    }

    #[test]
    fn test_parse_midi_defaults() {
        let cli = Cli::parse_from(["asset-renamer", "midi"]);
        match cli.command {
            Commands::Midi { root, dry_run } => {
                assert_eq!(root, None);
                assert!(!dry_run);
            },
            Commands::Weapons { .. } => panic!("expected midi"),
        }
        assert_eq!(cli.output, None);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "asset-renamer",
            "midi",
            "--output",
            "json",
            "--log-file",
            "apply.log",
        ]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.log_file, Some(PathBuf::from("apply.log")));
    }
}
