use anyhow::Result;
use asset_renamer_core::{
    midi_operation, weapons_operation, ApplyOptions, OutputFormat, OutputFormatter, RealFs, Tool,
};
use std::io;
use std::path::PathBuf;

/// Run one tool against `root`, streaming rename lines to stdout.
///
/// With JSON output the per-rename lines are suppressed and a single
/// document is printed once the run finishes.
pub fn handle_run(
    tool: Tool,
    root: PathBuf,
    dry_run: bool,
    log_file: Option<PathBuf>,
    output: OutputFormat,
) -> Result<()> {
    let options = ApplyOptions { dry_run, log_file };

    let result = match output {
        OutputFormat::Summary => {
            let mut stdout = io::stdout().lock();
            match tool {
                Tool::Weapons => weapons_operation(&RealFs, &root, &options, &mut stdout)?,
                Tool::Midi => midi_operation(&RealFs, &root, &options, &mut stdout)?,
            }
        },
        OutputFormat::Json => {
            let mut sink = io::sink();
            match tool {
                Tool::Weapons => weapons_operation(&RealFs, &root, &options, &mut sink)?,
                Tool::Midi => midi_operation(&RealFs, &root, &options, &mut sink)?,
            }
        },
    };

    let report = result.format(output);
    match output {
        OutputFormat::Json => println!("{report}"),
        OutputFormat::Summary => eprint!("{report}"),
    }

    Ok(())
}
