//! Facade and manifest generation.
//!
//! - [`facade`] - one single-default-export module per exported symbol
//! - [`manifest`] - the `index.json` exposes map
//! - [`generator`] - parse, classify, stage and publish a generation
//! - [`watch`] - timestamp-driven regeneration for watch sessions

pub mod facade;
pub mod generator;
pub mod manifest;
pub mod watch;

pub use facade::{FacadeFile, write_facades};
pub use generator::{GenerationReport, Generator, PreviewFile, regenerate};
pub use manifest::{ExposesManifest, MANIFEST_FILE_NAME};
pub use watch::{ChangeTracker, CycleOutcome, Observation, Trigger, WatchSession};
