//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, toolkit, JSON and directory-walk errors, and provides
//! semantic variants for configuration validation and fatal stage failures.
use std::path::PathBuf;

use thiserror::Error;

use crate::io::ToolkitError;
use crate::types::Stage;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Toolkit error: {0}")]
    Toolkit(#[from] ToolkitError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid scene pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Refusing to clear {output:?}: it contains the working directory {working:?}")]
    UnsafeOutputDir { output: PathBuf, working: PathBuf },

    #[error("{} failed for {subject}: {source}", .stage.title())]
    StageFailed {
        stage: Stage,
        subject: String,
        #[source]
        source: ToolkitError,
    },
}

impl Error {
    pub fn invalid<V: std::fmt::Display>(arg: &'static str, value: V) -> Self {
        Error::InvalidArgument {
            arg,
            value: value.to_string(),
        }
    }

    /// The stage responsible for a fatal stage failure, if any
    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            Error::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
