use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// An artifact that knows where it lives and how to render itself.
pub trait GeneratedFile {
    /// Location of the artifact below `base`.
    fn path(&self, base: &Path) -> PathBuf;

    /// Rendered file content, written byte-for-byte.
    fn render(&self) -> String;

    fn rules(&self) -> FileRules {
        FileRules::default()
    }

    /// Write the artifact below `base` according to its rules.
    fn write(&self, base: &Path) -> Result<WriteResult> {
        write_with_rules(&self.path(base), &self.render(), &self.rules())
    }
}

fn write_with_rules(path: &Path, content: &str, rules: &FileRules) -> Result<WriteResult> {
    if rules.overwrite == Overwrite::IfMissing && path.exists() {
        tracing::debug!(path = %path.display(), "keeping existing file");
        return Ok(WriteResult::Skipped);
    }
    write_file(path, content)?;
    Ok(WriteResult::Written)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

/// Outcome of writing a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    /// The file already existed and its rules asked to keep it.
    Skipped,
}

/// A file with a fixed path and content.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Create a file that is always overwritten.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Only create the file when nothing exists at its path yet.
    pub fn if_missing(mut self) -> Self {
        self.rules.overwrite = Overwrite::IfMissing;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn write(&self) -> Result<WriteResult> {
        write_with_rules(&self.path, &self.content, &self.rules)
    }
}

/// Rules that determine how a file is written.
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

/// How to handle a file that already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    /// Generated output, always replaced.
    #[default]
    Always,
    /// Scaffolding owned by the user once created.
    IfMissing,
}
