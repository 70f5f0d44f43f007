// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Configuration for the mfexpose facade generator.
//!
//! A project is described by an `mfexpose.toml`:
//!
//! ```toml
//! [exposes]
//! export_file = "src/index.ts"
//! generate_dir = "src/exposes"
//! filetype = "ts"
//!
//! [[transform]]
//! from = "./"
//! to = "../"
//! ```

mod config;
mod error;
mod file;
mod filetype;
mod transform;

pub use config::{CONFIG_FILE_NAME, Config};
pub use error::{Error, Result, SourceContext};
pub use file::ConfigFile;
pub use filetype::FileType;
pub use transform::{ReplaceRule, Transform};
