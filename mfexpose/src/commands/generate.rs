use clap::Args;
use eyre::Result;
use mfexpose_codegen::Generator;

use super::{ConfigArgs, exit_with};
use crate::reports::{GenerateReport, GenerationResult, Report, TerminalOutput};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Preview facades and manifest without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let generator = Generator::new(self.config.load())?;

        let result = if self.dry_run {
            generator.preview().map(GenerationResult::Preview)
        } else {
            generator.generate().map(GenerationResult::Written)
        };
        let result = result.unwrap_or_else(|e| exit_with(e));

        GenerateReport { result }.render(&mut TerminalOutput::new());
        Ok(())
    }
}
