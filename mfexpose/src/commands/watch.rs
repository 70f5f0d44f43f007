use std::{
    path::PathBuf,
    sync::mpsc::{self, RecvTimeoutError},
    time::{Duration, SystemTime},
};

use clap::Args;
use eyre::{Context, Result};
use mfexpose_codegen::{CycleOutcome, Generator, WatchSession};
use notify::{Event, RecursiveMode, Watcher};

use super::{ConfigArgs, render_error};
use crate::reports::{Report, TerminalOutput, WatchReport};

#[derive(Args)]
pub struct WatchCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Poll interval in milliseconds when no file events arrive
    #[arg(long, default_value_t = 1000)]
    pub interval_ms: u64,
}

impl WatchCommand {
    /// Run the watch loop until interrupted
    pub fn run(&self) -> Result<()> {
        let generator = Generator::new(self.config.load())?;
        let barrel_dir = generator
            .config()
            .export_file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
        let mut watcher = notify::recommended_watcher(tx).wrap_err("Failed to create watcher")?;
        watcher
            .watch(&barrel_dir, RecursiveMode::NonRecursive)
            .wrap_err_with(|| format!("Failed to watch {}", barrel_dir.display()))?;

        let mut session = WatchSession::new(generator);
        let mut out = TerminalOutput::new();
        tracing::info!(dir = %barrel_dir.display(), "watching");

        handle(session.poll(), &mut out);

        let interval = Duration::from_millis(self.interval_ms);
        loop {
            let first = match rx.recv_timeout(interval) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => {
                    handle(session.poll(), &mut out);
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            };

            let mut paths = Vec::new();
            for event in std::iter::once(first).chain(rx.try_iter()) {
                match event {
                    Ok(event) => paths.extend(event.paths),
                    Err(e) => tracing::warn!("watch error: {e}"),
                }
            }
            paths.sort();
            paths.dedup();

            handle(session.cycle(stamps(paths)), &mut out);
        }

        Ok(())
    }
}

/// Modification times for the paths that still exist.
fn stamps(paths: Vec<PathBuf>) -> Vec<(PathBuf, SystemTime)> {
    paths
        .into_iter()
        .filter_map(|path| {
            let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;
            Some((path, modified))
        })
        .collect()
}

/// Print a regeneration, or log a failure and keep watching.
fn handle(outcome: Result<CycleOutcome>, out: &mut TerminalOutput) {
    match outcome {
        Ok(CycleOutcome::Regenerated { trigger, report }) => {
            WatchReport { trigger, report }.render(out);
        }
        Ok(CycleOutcome::Idle) => {}
        Err(e) => tracing::error!("regeneration failed\n{}", render_error(e)),
    }
}
