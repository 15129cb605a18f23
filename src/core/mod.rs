//! Core pipeline building blocks: configuration, workspace setup, scene discovery
//! and naming, and the guarded processing stages. These are internal primitives
//! consumed by the high-level `api` module.
pub mod discovery;
pub mod params;
pub mod processing;
pub mod scene;
pub mod workspace;
