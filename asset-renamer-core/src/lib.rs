#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod apply;
pub mod collision;
pub mod config;
pub mod error;
pub mod fs;
pub mod operations;
pub mod output;
pub mod plan;
pub mod rules;

pub use apply::{apply_plan, ApplyOptions, ApplyResult};
pub use collision::{duplicate_destinations, validate_plan};
pub use config::Config;
pub use error::{RenameError, RenameResult};
pub use fs::{AssetFs, DirEntry, EntryKind, MemoryFs, RealFs};
pub use operations::{midi_operation, weapons_operation};
pub use output::{OutputFormat, OutputFormatter, RunResult, Tool};
pub use plan::{build_plan, RenamePair, RenamePlan, TEMP_SUFFIX};
pub use rules::{normalize_stem, MidiNameRule, NamingRule, WeaponFrameRule};
