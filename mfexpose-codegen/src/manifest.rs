//! The `index.json` exposes map consumed by the module-federation host.

use std::path::{Path, PathBuf};

use eyre::{Context, Result, eyre};
use indexmap::IndexMap;
use mfexpose_core::File;
use mfexpose_typescript::ExportedSymbol;
use serde::Serialize;

pub const MANIFEST_FILE_NAME: &str = "index.json";

/// Ordered map of `./<name>` to `./<dir>/<name>`.
///
/// Values are relative to the parent of the generated directory, which is
/// where the host configuration is expected to live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExposesManifest {
    entries: IndexMap<String, String>,
}

impl ExposesManifest {
    /// Build the manifest for `symbols` generated into `generate_dir`.
    pub fn build(generate_dir: &Path, symbols: &[ExportedSymbol]) -> Result<Self> {
        let dir_name = generate_dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| eyre!("'{}' has no directory name", generate_dir.display()))?;
        Ok(Self::for_dir_name(dir_name, symbols))
    }

    pub fn for_dir_name(dir_name: &str, symbols: &[ExportedSymbol]) -> Self {
        let mut entries = IndexMap::with_capacity(symbols.len());
        for symbol in symbols {
            // A repeated key keeps its first position.
            entries.insert(
                format!("./{}", symbol.public_name),
                format!("./{}/{}", dir_name, symbol.public_name),
            );
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pretty-printed JSON with two-space indentation and no trailing newline.
    pub fn render(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("failed to serialize exposes manifest")
    }

    /// Write `index.json` into `dir`.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE_NAME);
        File::new(&path, self.render()?).write()?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols() -> Vec<ExportedSymbol> {
        vec![
            ExportedSymbol::named("get", "get", "\"./utils\"", "\"../utils\""),
            ExportedSymbol::named("myPick", "pick", "\"./utils\"", "\"../utils\""),
        ]
    }

    #[test]
    fn test_render_pretty_json_in_symbol_order() {
        let manifest = ExposesManifest::build(Path::new("src/exposes"), &symbols()).unwrap();

        insta::assert_snapshot!(manifest.render().unwrap(), @r#"
        {
          "./get": "./exposes/get",
          "./myPick": "./exposes/myPick"
        }
        "#);
    }

    #[test]
    fn test_empty_manifest_renders_empty_object() {
        let manifest = ExposesManifest::for_dir_name("exposes", &[]);

        assert!(manifest.is_empty());
        assert_eq!(manifest.render().unwrap(), "{}");
    }

    #[test]
    fn test_repeated_name_keeps_single_entry() {
        let mut symbols = symbols();
        symbols.push(ExportedSymbol::named("get", "get", "\"./other\"", "\"../other\""));

        let manifest = ExposesManifest::for_dir_name("exposes", &symbols);

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.iter().next(), Some(("./get", "./exposes/get")));
    }

    #[test]
    fn test_build_requires_directory_name() {
        assert!(ExposesManifest::build(Path::new("/"), &symbols()).is_err());
    }

    #[test]
    fn test_write_creates_index_json() {
        let temp = tempfile::TempDir::new().unwrap();
        let manifest = ExposesManifest::for_dir_name("exposes", &symbols());

        let path = manifest.write(temp.path()).unwrap();

        assert_eq!(path, temp.path().join("index.json"));
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["./myPick"], "./exposes/myPick");
    }
}
