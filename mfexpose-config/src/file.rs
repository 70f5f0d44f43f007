use std::path::{Path, PathBuf};

use crate::{Config, Error, Result};

/// An `mfexpose.toml` on disk with both raw content and parsed config.
#[derive(Debug)]
pub struct ConfigFile {
    path: PathBuf,
    content: String,
    config: Config,
}

impl ConfigFile {
    /// Open and parse a config file.
    ///
    /// Relative paths inside the file resolve against the file's directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let config = Config::from_str_with_filename(&content, &path.display().to_string())?
            .resolve_paths(base_dir(&path));

        Ok(Self {
            path,
            content,
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }
}

fn base_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_open_resolves_against_config_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mfexpose.toml");
        std::fs::write(
            &path,
            "[exposes]\nexport_file = \"index.ts\"\ngenerate_dir = \"exposes\"\n",
        )
        .unwrap();

        let file = ConfigFile::open(&path).unwrap();

        assert_eq!(file.config().export_file, temp.path().join("index.ts"));
        assert_eq!(file.config().generate_dir, temp.path().join("exposes"));
        assert!(file.content().starts_with("[exposes]"));
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();

        let err = ConfigFile::open(temp.path().join("mfexpose.toml")).unwrap_err();

        assert!(matches!(*err, Error::Io { .. }));
    }
}
