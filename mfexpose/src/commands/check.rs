use clap::Args;
use eyre::Result;
use mfexpose_codegen::Generator;

use super::{ConfigArgs, exit_with};
use crate::reports::{CheckReport, Report, TerminalOutput};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub config: ConfigArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let generator = Generator::new(self.config.load())?;
        let classification = generator.analyze().unwrap_or_else(|e| exit_with(e));

        let config = generator.config();
        CheckReport::new(
            config.export_file.clone(),
            config.generate_dir.clone(),
            classification,
        )
        .render(&mut TerminalOutput::new());
        Ok(())
    }
}
