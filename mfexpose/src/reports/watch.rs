//! Watch command report data structures.

use mfexpose_codegen::{GenerationReport, Trigger};

use super::{
    generate::render_written,
    output::{Output, Report},
};

/// One regeneration performed by a watch session.
#[derive(Debug)]
pub struct WatchReport {
    pub trigger: Trigger,
    pub report: GenerationReport,
}

impl Report for WatchReport {
    fn render(&self, out: &mut dyn Output) {
        out.divider(&self.trigger.to_string());
        render_written(out, &self.report);
    }
}
