//! Command Line Interface (CLI) layer for lsmosaic.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`): logging setup, merging the optional
//! JSON config with flags, and running the batch. It wires user-provided options
//! to the underlying library functionality exposed via `lsmosaic::api`.
//!
//! If you are embedding lsmosaic into another application, prefer using
//! the high-level `lsmosaic::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
