//! Check command report data structures.

use std::path::PathBuf;

use mfexpose_typescript::{Classification, ExportedSymbol, SkippedStatement};

use super::output::{Output, Report};

/// Report data from classifying a barrel without writing.
#[derive(Debug)]
pub struct CheckReport {
    pub export_file: PathBuf,
    pub generate_dir: PathBuf,
    pub symbols: Vec<ExportedSymbol>,
    pub skipped: Vec<SkippedStatement>,
    pub duplicates: Vec<String>,
}

impl CheckReport {
    pub fn new(export_file: PathBuf, generate_dir: PathBuf, classification: Classification) -> Self {
        let duplicates = classification
            .duplicate_names()
            .into_iter()
            .map(String::from)
            .collect();
        Self {
            export_file,
            generate_dir,
            symbols: classification.symbols,
            skipped: classification.skipped,
            duplicates,
        }
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for name in &self.duplicates {
            out.warning(&format!("'{}' is exported more than once, the last export wins", name));
        }

        out.preformatted(&format!("✓ {} is valid", self.export_file.display()));
        out.newline();

        let count = self.symbols.len();
        out.section(&format!(
            "{} symbol{} -> {}",
            count,
            if count == 1 { "" } else { "s" },
            self.generate_dir.display()
        ));
        for symbol in &self.symbols {
            out.list_item(&format!(
                "{} ({}, line {})",
                symbol.public_name, symbol.kind, symbol.line
            ));
        }

        if !self.skipped.is_empty() {
            out.newline();
            out.section("Skipped");
            for skipped in &self.skipped {
                out.list_item(&format!(
                    "line {}: {} [{}]",
                    skipped.line, skipped.text, skipped.reason
                ));
            }
        }
    }
}
