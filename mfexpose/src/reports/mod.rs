//! Report data structures for commands.
//!
//! Commands collect what happened into a report, then render it to an
//! [`Output`].

mod check;
mod generate;
mod output;
mod watch;

pub use check::CheckReport;
pub use generate::{GenerateReport, GenerationResult};
pub use output::{Report, TerminalOutput};
pub use watch::WatchReport;

#[cfg(test)]
pub use output::BufferOutput;
