use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use mfexpose_config::{CONFIG_FILE_NAME, Config, FileType, ReplaceRule, Transform};
use mfexpose_core::{File, WriteResult};

#[derive(Args)]
pub struct InitCommand {
    /// Directory to create mfexpose.toml in
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Barrel module, relative to the project directory
    #[arg(long, default_value = "src/index.ts")]
    pub export_file: PathBuf,

    /// Output directory, relative to the project directory
    #[arg(long, default_value = "src/exposes")]
    pub generate_dir: PathBuf,

    /// Facade extension, ts or js
    #[arg(long, default_value = "ts")]
    pub filetype: FileType,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE_NAME);
        let content = self.starter_config().to_toml();

        match File::new(&path, content).if_missing().write()? {
            WriteResult::Written => {
                println!("Created {}", path.display());
                println!();
                println!("Next steps:");
                println!("  mfexpose check");
                println!("  mfexpose generate");
            }
            WriteResult::Skipped => {
                println!("{} already exists, leaving it unchanged", path.display());
            }
        }
        Ok(())
    }

    /// Facades live one directory below the barrel, so relative specifiers
    /// gain a `../`.
    fn starter_config(&self) -> Config {
        Config::new(&self.export_file, &self.generate_dir)
            .with_filetype(self.filetype)
            .with_transform(Transform::new(vec![ReplaceRule::new("./", "../")]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(dir: PathBuf) -> InitCommand {
        InitCommand {
            dir,
            export_file: PathBuf::from("src/index.ts"),
            generate_dir: PathBuf::from("src/exposes"),
            filetype: FileType::Ts,
        }
    }

    #[test]
    fn test_starter_config() {
        let cmd = command(PathBuf::from("."));

        insta::assert_snapshot!(cmd.starter_config().to_toml(), @r#"
        [exposes]
        export_file = "src/index.ts"
        generate_dir = "src/exposes"
        filetype = "ts"

        [[transform]]
        from = "./"
        to = "../"
        "#);
    }

    #[test]
    fn test_init_writes_loadable_config() {
        let temp = tempfile::TempDir::new().unwrap();

        command(temp.path().to_path_buf()).run().unwrap();

        let config = Config::from_file(temp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.generate_dir, temp.path().join("src/exposes"));
        assert_eq!(config.transform.apply("\"./a\""), "\"../a\"");
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "# mine\n").unwrap();

        command(temp.path().to_path_buf()).run().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");
    }
}
