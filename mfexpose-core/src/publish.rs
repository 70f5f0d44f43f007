//! Staged directory publishing.
//!
//! A generation is assembled in a hidden sibling of its target directory and
//! published with two renames once every file is in place: the previous
//! generation is moved aside, then the staged directory is moved in. Between
//! the two renames `target` briefly does not exist, but it never holds a
//! partially written generation.

use std::path::{Path, PathBuf};

use eyre::{Context, Result, eyre};
use tempfile::{Builder, TempDir};

/// A scratch directory that replaces `target` when published.
///
/// Dropping an unpublished staging directory removes it and leaves `target`
/// untouched.
#[derive(Debug)]
pub struct StagingDir {
    target: PathBuf,
    dir: TempDir,
}

impl StagingDir {
    /// Create a staging directory next to `target`.
    ///
    /// The staging directory shares the target's parent so the final swap is
    /// a same-filesystem rename.
    pub fn new(target: impl Into<PathBuf>) -> Result<Self> {
        let target = target.into();
        let (parent, name) = split_target(&target)?;

        std::fs::create_dir_all(&parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;

        let dir = Builder::new()
            .prefix(&format!(".{name}.staging-"))
            .tempdir_in(&parent)
            .wrap_err_with(|| format!("failed to create staging directory in '{}'", parent.display()))?;

        Ok(Self { target, dir })
    }

    /// Where files should be written before publishing.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The directory this staging area will replace.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Swap the staged contents into `target`, discarding the previous
    /// generation.
    pub fn publish(self) -> Result<()> {
        let (parent, name) = split_target(&self.target)?;

        // The retired generation lives inside its own temp dir so it is
        // removed when `retired` drops, whether or not the swap succeeds.
        let retired = Builder::new()
            .prefix(&format!(".{name}.retired-"))
            .tempdir_in(&parent)
            .wrap_err_with(|| format!("failed to create directory in '{}'", parent.display()))?;
        let previous = retired.path().join("previous");

        let had_previous = self.target.exists();
        if had_previous {
            std::fs::rename(&self.target, &previous).wrap_err_with(|| {
                format!("failed to move aside '{}'", self.target.display())
            })?;
        }

        if let Err(err) = std::fs::rename(self.dir.path(), &self.target) {
            let mut report = eyre::Report::new(err)
                .wrap_err(format!("failed to publish '{}'", self.target.display()));
            if had_previous {
                if let Err(restore) = std::fs::rename(&previous, &self.target) {
                    tracing::error!(
                        dir = %self.target.display(),
                        error = %restore,
                        "failed to restore previous generation"
                    );
                    report = report.wrap_err(format!(
                        "previous generation of '{}' could not be restored: {restore}",
                        self.target.display()
                    ));
                }
            }
            return Err(report);
        }

        tracing::debug!(dir = %self.target.display(), "published staged directory");
        Ok(())
    }
}

fn split_target(target: &Path) -> Result<(PathBuf, String)> {
    let name = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| eyre!("'{}' does not name a directory", target.display()))?
        .to_string();
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((parent, name))
}
