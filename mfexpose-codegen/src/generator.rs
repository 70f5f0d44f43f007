//! One generation: parse the barrel, classify it, publish facades and manifest.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use eyre::Result;
use mfexpose_config::{Config, FileType};
use mfexpose_core::{GeneratedFile, StagingDir};
use mfexpose_typescript::{
    Barrel, Classification, ExportedSymbol, PathTransform, SkippedStatement, analyze,
};

use crate::{ExposesManifest, FacadeFile, manifest::MANIFEST_FILE_NAME, write_facades};

/// What a completed generation produced.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub generate_dir: PathBuf,
    pub symbols: Vec<ExportedSymbol>,
    pub skipped: Vec<SkippedStatement>,
    /// Public names declared more than once; the last declaration won.
    pub duplicates: Vec<String>,
    pub manifest_path: PathBuf,
}

impl GenerationReport {
    /// Number of distinct facade files on disk.
    pub fn facade_count(&self) -> usize {
        self.symbols
            .iter()
            .map(|s| s.public_name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// A file that would be generated, for dry runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    pub path: PathBuf,
    pub content: String,
}

/// Regenerate `generate_dir` from the barrel at `export_file`.
///
/// The barrel is parsed before anything is touched, so a parse failure
/// leaves the previous generation in place. Facades and manifest are staged
/// next to `generate_dir` and swapped in together.
pub fn regenerate(
    export_file: &Path,
    generate_dir: &Path,
    filetype: FileType,
    transform: &dyn PathTransform,
) -> Result<GenerationReport> {
    let classification = parse_and_classify(export_file, transform)?;
    let manifest = ExposesManifest::build(generate_dir, &classification.symbols)?;

    let staging = StagingDir::new(generate_dir)?;
    write_facades(staging.path(), &classification.symbols, filetype)?;
    manifest.write(staging.path())?;
    staging.publish()?;

    tracing::info!(
        dir = %generate_dir.display(),
        facades = classification.symbols.len(),
        "generated facades"
    );

    let duplicates = classification
        .duplicate_names()
        .into_iter()
        .map(String::from)
        .collect();
    Ok(GenerationReport {
        generate_dir: generate_dir.to_path_buf(),
        manifest_path: generate_dir.join(MANIFEST_FILE_NAME),
        symbols: classification.symbols,
        skipped: classification.skipped,
        duplicates,
    })
}

fn parse_and_classify(export_file: &Path, transform: &dyn PathTransform) -> Result<Classification> {
    let barrel = Barrel::open(export_file).map_err(|e| eyre::Report::new(*e))?;
    Ok(analyze(&barrel, transform))
}

/// Generator bound to a validated configuration.
#[derive(Debug, Clone)]
pub struct Generator {
    config: Config,
}

impl Generator {
    pub fn new(config: Config) -> Result<Self> {
        config.check_layout().map_err(eyre::Report::msg)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and classify without writing anything.
    pub fn analyze(&self) -> Result<Classification> {
        let transform = |s: &str| self.config.transform.apply(s);
        parse_and_classify(&self.config.export_file, &transform)
    }

    /// The files a generation would write, in write order.
    pub fn preview(&self) -> Result<Vec<PreviewFile>> {
        let classification = self.analyze()?;
        let dir = &self.config.generate_dir;

        let mut files: Vec<PreviewFile> = Vec::with_capacity(classification.symbols.len() + 1);
        for symbol in &classification.symbols {
            let facade = FacadeFile::new(symbol, self.config.filetype);
            let path = facade.path(dir);
            // Mirror last-wins on disk.
            files.retain(|f| f.path != path);
            files.push(PreviewFile {
                path,
                content: facade.render(),
            });
        }

        let manifest = ExposesManifest::build(dir, &classification.symbols)?;
        files.push(PreviewFile {
            path: dir.join(MANIFEST_FILE_NAME),
            content: manifest.render()?,
        });
        Ok(files)
    }

    pub fn generate(&self) -> Result<GenerationReport> {
        let transform = |s: &str| self.config.transform.apply(s);
        regenerate(
            &self.config.export_file,
            &self.config.generate_dir,
            self.config.filetype,
            &transform,
        )
    }
}
