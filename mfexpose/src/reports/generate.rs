//! Generate command report data structures.

use mfexpose_codegen::{GenerationReport, PreviewFile};

use super::output::{Output, Report};

/// Report data from a generate run.
#[derive(Debug)]
pub struct GenerateReport {
    pub result: GenerationResult,
}

#[derive(Debug)]
pub enum GenerationResult {
    /// Facades were published.
    Written(GenerationReport),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(report) => render_written(out, report),
            GenerationResult::Preview(files) => render_preview(out, files),
        }
    }
}

pub(super) fn render_written(out: &mut dyn Output, report: &GenerationReport) {
    for name in &report.duplicates {
        out.warning(&format!("'{}' is exported more than once, the last export wins", name));
    }

    let count = report.facade_count();
    out.section(&format!(
        "Generated {} facade{} in {}",
        count,
        if count == 1 { "" } else { "s" },
        report.generate_dir.display()
    ));
    let mut listed: Vec<&str> = Vec::with_capacity(count);
    for symbol in &report.symbols {
        if !listed.contains(&symbol.public_name.as_str()) {
            listed.push(&symbol.public_name);
            out.added_item(&symbol.public_name);
        }
    }

    if !report.skipped.is_empty() {
        out.key_value("Skipped statements", &report.skipped.len().to_string());
    }
    out.key_value("Manifest", &report.manifest_path.display().to_string());
}

fn render_preview(out: &mut dyn Output, files: &[PreviewFile]) {
    for file in files {
        out.divider(&file.path.display().to_string());
        out.preformatted(&file.content);
    }

    out.divider("Summary");
    out.preformatted(&format!("{} files would be generated", files.len()));
}
