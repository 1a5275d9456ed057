use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::plan::RenamePair;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Summary,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Which renaming tool produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Weapons,
    Midi,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weapons => write!(f, "weapons"),
            Self::Midi => write!(f, "midi"),
        }
    }
}

/// Result of one tool run over a root directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub tool: Tool,
    pub root: PathBuf,
    pub dry_run: bool,
    pub directories_scanned: usize,
    pub renames: Vec<RenamePair>,
}

pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String;
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for RunResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "tool": self.tool,
            "root": self.root,
            "dry_run": self.dry_run,
            "summary": {
                "directories_scanned": self.directories_scanned,
                "renames": self.renames.len(),
            },
            "renames": self.renames,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.renames.is_empty() {
            return String::new();
        }

        let verb = if self.dry_run { "Would rename" } else { "Renamed" };
        let files = if self.renames.len() == 1 { "file" } else { "files" };
        if self.tool == Tool::Weapons {
            let dirs = if self.directories_scanned == 1 {
                "directory"
            } else {
                "directories"
            };
            format!(
                "{} {} {} across {} weapon {}\n",
                verb,
                self.renames.len(),
                files,
                self.directories_scanned,
                dirs
            )
        } else {
            format!("{} {} {}\n", verb, self.renames.len(), files)
        }
    }
}
