//! Run configuration types.

use crate::deduction::Templates;
use crate::error::Result;
use clap::ValueEnum;
use std::path::PathBuf;

/// What to do with a proof file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Annotate every line with its justification
    #[default]
    Check,
    /// Discharge the last hypothesis via the deduction theorem
    Elaborate,
}

/// Rendering of the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration for one run
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub mode: Mode,
    pub format: OutputFormat,
    /// Directory overriding the built-in proof templates
    pub templates: Option<PathBuf>,
}

impl RunConfig {
    pub fn load_templates(&self) -> Result<Templates> {
        match &self.templates {
            Some(dir) => Templates::from_dir(dir),
            None => Templates::builtin(),
        }
    }
}
