mod check;
mod completions;
mod generate;
mod init;
mod watch;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use init::InitCommand;
use mfexpose_config::{CONFIG_FILE_NAME, Config, ConfigFile, FileType, ReplaceRule};
use watch::WatchCommand;

/// Extension trait for exiting on config errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for mfexpose_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Render a generation error, using the source snippet when the barrel
/// failed to parse.
pub(crate) fn render_error(report: eyre::Report) -> String {
    match report.downcast::<mfexpose_typescript::Error>() {
        Ok(e) => format!("{:?}", miette::Report::new(e)),
        Err(report) => format!("{report:?}"),
    }
}

/// Exit with a rendered generation error.
pub(crate) fn exit_with(report: eyre::Report) -> ! {
    eprintln!("{}", render_error(report));
    std::process::exit(1);
}

/// Options shared by every command that loads a project.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to mfexpose.toml
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Barrel module (overrides exposes.export_file)
    #[arg(long)]
    pub export_file: Option<PathBuf>,

    /// Output directory (overrides exposes.generate_dir)
    #[arg(long)]
    pub generate_dir: Option<PathBuf>,

    /// Facade extension, ts or js (overrides exposes.filetype)
    #[arg(long)]
    pub filetype: Option<FileType>,

    /// Extra FROM=TO specifier rewrite, applied after the configured ones
    #[arg(long = "replace", value_name = "FROM=TO")]
    pub replace: Vec<ReplaceRule>,
}

impl ConfigArgs {
    /// Load the project configuration and apply command-line overrides.
    ///
    /// The config file may be skipped when both paths are given as flags.
    pub fn load(&self) -> Config {
        let mut config = match (&self.export_file, &self.generate_dir) {
            (Some(export_file), Some(generate_dir)) if !self.config.exists() => {
                Config::new(export_file, generate_dir)
            }
            _ => ConfigFile::open(&self.config)
                .unwrap_or_exit()
                .into_config(),
        };

        if let Some(export_file) = &self.export_file {
            config.export_file = export_file.clone();
        }
        if let Some(generate_dir) = &self.generate_dir {
            config.generate_dir = generate_dir.clone();
        }
        if let Some(filetype) = self.filetype {
            config.filetype = filetype;
        }
        for rule in &self.replace {
            config.transform.push(rule.clone());
        }
        config
    }
}

#[derive(Parser)]
#[command(name = "mfexpose")]
#[command(version)]
#[command(about = "Split a barrel module into module-federation facades")]
pub(crate) struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Watch(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter mfexpose.toml
    Init(InitCommand),

    /// Generate facades and index.json from the barrel
    Generate(GenerateCommand),

    /// Classify the barrel without writing anything
    Check(CheckCommand),

    /// Regenerate whenever the barrel changes
    Watch(WatchCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
