//! Timestamp-driven regeneration for watch sessions.
//!
//! A [`WatchSession`] lives exactly as long as one watch loop. Each cycle it
//! is handed the modification times the host knows about and regenerates
//! when the barrel changed or the generated directory has gone missing.
//! Changes to the modules the barrel points at do not trigger a run.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::SystemTime,
};

use eyre::Result;

use crate::{GenerationReport, Generator};

/// Result of observing one file's modification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// The file was not tracked before.
    First,
    /// The timestamp moved forward since the last observation.
    Advanced,
    /// Same or older timestamp; the stored value is kept.
    Unchanged,
}

impl Observation {
    pub fn is_change(&self) -> bool {
        !matches!(self, Observation::Unchanged)
    }
}

/// Last-seen modification time per path.
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    seen: HashMap<PathBuf, SystemTime>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, path: &Path, modified: SystemTime) -> Observation {
        match self.seen.get_mut(path) {
            None => {
                self.seen.insert(path.to_path_buf(), modified);
                Observation::First
            }
            Some(last) if modified > *last => {
                *last = modified;
                Observation::Advanced
            }
            Some(_) => Observation::Unchanged,
        }
    }

    /// Observe a batch of timestamps, returning every path that changed.
    pub fn changed<I>(&mut self, stamps: I) -> Vec<(PathBuf, Observation)>
    where
        I: IntoIterator<Item = (PathBuf, SystemTime)>,
    {
        stamps
            .into_iter()
            .filter_map(|(path, modified)| {
                let observation = self.observe(&path, modified);
                observation.is_change().then_some((path, observation))
            })
            .collect()
    }

    pub fn last_seen(&self, path: &Path) -> Option<SystemTime> {
        self.seen.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Why a cycle regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The generated directory did not exist.
    OutputMissing,
    /// The barrel was seen for the first time or modified.
    BarrelChanged(Observation),
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::OutputMissing => f.write_str("output directory missing"),
            Trigger::BarrelChanged(Observation::First) => f.write_str("barrel loaded"),
            Trigger::BarrelChanged(_) => f.write_str("barrel changed"),
        }
    }
}

#[derive(Debug)]
pub enum CycleOutcome {
    Regenerated {
        trigger: Trigger,
        report: GenerationReport,
    },
    Idle,
}

/// State of one watch loop.
///
/// Cycles take `&mut self`, so a session never runs two generations at once.
#[derive(Debug)]
pub struct WatchSession {
    generator: Generator,
    barrel: PathBuf,
    tracker: ChangeTracker,
}

impl WatchSession {
    pub fn new(generator: Generator) -> Self {
        let barrel = tracking_key(&generator.config().export_file);
        Self {
            generator,
            barrel,
            tracker: ChangeTracker::new(),
        }
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    /// Run one cycle over the timestamps reported by the host.
    ///
    /// Every timestamp is recorded before generating, so a failed generation
    /// is not retried until the barrel changes again (or the output
    /// directory is still missing on the next cycle).
    pub fn cycle<I>(&mut self, stamps: I) -> Result<CycleOutcome>
    where
        I: IntoIterator<Item = (PathBuf, SystemTime)>,
    {
        let changed = self.tracker.changed(
            stamps
                .into_iter()
                .map(|(path, modified)| (tracking_key(&path), modified)),
        );

        let barrel_change = changed
            .iter()
            .find(|(path, _)| *path == self.barrel)
            .map(|(_, observation)| *observation);

        let trigger = if !self.generator.config().generate_dir.exists() {
            Trigger::OutputMissing
        } else if let Some(observation) = barrel_change {
            Trigger::BarrelChanged(observation)
        } else {
            return Ok(CycleOutcome::Idle);
        };

        tracing::debug!(%trigger, "regenerating");
        let report = self.generator.generate()?;
        Ok(CycleOutcome::Regenerated { trigger, report })
    }

    /// Run one cycle using the barrel's current modification time.
    pub fn poll(&mut self) -> Result<CycleOutcome> {
        let path = &self.generator.config().export_file;
        let stamp = std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .ok()
            .map(|modified| (path.clone(), modified));
        self.cycle(stamp)
    }
}

/// Paths are compared canonicalized when possible so relative and absolute
/// spellings of the barrel match.
fn tracking_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
