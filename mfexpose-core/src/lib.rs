//! Core file output primitives for mfexpose.
//!
//! Generated artifacts are described by [`GeneratedFile`] and written either
//! directly or into a [`StagingDir`] that is swapped into place once complete.

mod file;
mod publish;

pub use file::{File, FileRules, GeneratedFile, Overwrite, WriteResult};
pub use publish::StagingDir;
