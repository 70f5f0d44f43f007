use std::{
    path::{Component, Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;
use toml::Spanned;

use crate::{ConfigFile, Error, FileType, ReplaceRule, Result, SourceContext, Transform};

/// Default config file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "mfexpose.toml";

/// Fully resolved generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The barrel module to read.
    pub export_file: PathBuf,
    /// Output directory, replaced wholesale on every generation.
    pub generate_dir: PathBuf,
    pub filetype: FileType,
    pub transform: Transform,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    exposes: RawExposes,
    #[serde(default)]
    transform: Vec<Spanned<ReplaceRule>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawExposes {
    export_file: Spanned<PathBuf>,
    generate_dir: Spanned<PathBuf>,
    #[serde(default)]
    filetype: FileType,
}

impl Config {
    pub fn new(export_file: impl Into<PathBuf>, generate_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_file: export_file.into(),
            generate_dir: generate_dir.into(),
            filetype: FileType::default(),
            transform: Transform::default(),
        }
    }

    pub fn with_filetype(mut self, filetype: FileType) -> Self {
        self.filetype = filetype;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Parse a config file, resolving relative paths against its directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        ConfigFile::open(path).map(ConfigFile::into_config)
    }

    /// Parse config content; paths are kept exactly as written.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let raw: RawConfig = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

        if raw.exposes.export_file.get_ref().as_os_str().is_empty() {
            return Err(ctx.validation_error(
                "export_file must not be empty",
                Some(raw.exposes.export_file.span()),
            ));
        }

        for rule in &raw.transform {
            if rule.get_ref().from.is_empty() {
                return Err(ctx.validation_error(
                    "transform 'from' must not be empty",
                    Some(rule.span()),
                ));
            }
        }

        let generate_span = raw.exposes.generate_dir.span();
        let config = Config {
            export_file: raw.exposes.export_file.into_inner(),
            generate_dir: raw.exposes.generate_dir.into_inner(),
            filetype: raw.exposes.filetype,
            transform: Transform::new(raw.transform.into_iter().map(Spanned::into_inner).collect()),
        };

        config
            .check_layout()
            .map_err(|message| ctx.validation_error(message, Some(generate_span)))?;

        Ok(config)
    }

    /// Join relative paths onto `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.export_file.is_relative() {
            self.export_file = base.join(&self.export_file);
        }
        if self.generate_dir.is_relative() {
            self.generate_dir = base.join(&self.generate_dir);
        }
        self
    }

    /// Check that the output directory can be owned by the generator.
    ///
    /// The directory needs a name of its own (it is embedded in the manifest)
    /// and must not contain the barrel, which would be wiped on the next run.
    pub fn check_layout(&self) -> std::result::Result<(), String> {
        let generate_dir = normalize(&self.generate_dir);
        match generate_dir.components().next_back() {
            Some(Component::Normal(_)) => {}
            _ => {
                return Err(format!(
                    "generate_dir '{}' must name a directory",
                    self.generate_dir.display()
                ));
            }
        }

        if resolve(&self.export_file).starts_with(resolve(&self.generate_dir)) {
            return Err(format!(
                "generate_dir '{}' contains export_file '{}' and would delete it",
                self.generate_dir.display(),
                self.export_file.display()
            ));
        }

        Ok(())
    }

    /// Render this configuration as `mfexpose.toml` content.
    pub fn to_toml(&self) -> String {
        let mut out = String::from("[exposes]\n");
        out.push_str(&format!(
            "export_file = {}\n",
            toml_string(&self.export_file.to_string_lossy())
        ));
        out.push_str(&format!(
            "generate_dir = {}\n",
            toml_string(&self.generate_dir.to_string_lossy())
        ));
        out.push_str(&format!("filetype = \"{}\"\n", self.filetype));
        for rule in self.transform.rules() {
            out.push_str("\n[[transform]]\n");
            out.push_str(&format!("from = {}\n", toml_string(&rule.from)));
            out.push_str(&format!("to = {}\n", toml_string(&rule.to)));
        }
        out
    }
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Config::from_str_with_filename(s, CONFIG_FILE_NAME)
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Absolute form of `path` for containment checks.
///
/// Relative paths are joined onto the working directory and `..` is folded
/// lexically. The deepest existing ancestor is canonicalized so symlinked and
/// differently spelled prefixes compare equal.
fn resolve(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut lexical = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other),
        }
    }

    let mut existing = lexical.as_path();
    let mut rest = Vec::new();
    loop {
        if let Ok(canonical) = std::fs::canonicalize(existing) {
            return rest.iter().rev().fold(canonical, |acc, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return lexical,
        }
    }
}

fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}
