//! Facade modules.

use std::path::{Path, PathBuf};

use eyre::Result;
use mfexpose_config::FileType;
use mfexpose_core::GeneratedFile;
use mfexpose_typescript::ExportedSymbol;

/// The generated module for one exported symbol.
#[derive(Debug, Clone, Copy)]
pub struct FacadeFile<'a> {
    symbol: &'a ExportedSymbol,
    filetype: FileType,
}

impl<'a> FacadeFile<'a> {
    pub fn new(symbol: &'a ExportedSymbol, filetype: FileType) -> Self {
        Self { symbol, filetype }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.symbol.public_name, self.filetype.extension())
    }
}

impl GeneratedFile for FacadeFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.file_name())
    }

    fn render(&self) -> String {
        self.symbol.statement()
    }
}

/// Write one facade per symbol into `dir`, in order.
///
/// A repeated public name overwrites the earlier facade. Returns the paths
/// written, one per symbol.
pub fn write_facades(
    dir: &Path,
    symbols: &[ExportedSymbol],
    filetype: FileType,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let facade = FacadeFile::new(symbol, filetype);
        facade.write(dir)?;
        written.push(facade.path(dir));
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_facade_file_name_uses_filetype() {
        let symbol = ExportedSymbol::named("get", "get", "\"./utils\"", "\"../utils\"");

        assert_eq!(FacadeFile::new(&symbol, FileType::Ts).file_name(), "get.ts");
        assert_eq!(FacadeFile::new(&symbol, FileType::Js).file_name(), "get.js");
    }

    #[test]
    fn test_write_facades_writes_statement_without_newline() {
        let temp = TempDir::new().unwrap();
        let symbols = vec![
            ExportedSymbol::named("myGet", "get", "\"./utils\"", "\"../utils\""),
            ExportedSymbol::namespace("utils", "\"./utils\"", "\"../utils\""),
        ];

        let written = write_facades(temp.path(), &symbols, FileType::Ts).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("myGet.ts")).unwrap(),
            r#"export { get as default } from "../utils";"#
        );
        assert_eq!(
            std::fs::read_to_string(temp.path().join("utils.ts")).unwrap(),
            r#"export * as default from "../utils";"#
        );
    }

    #[test]
    fn test_repeated_name_last_wins() {
        let temp = TempDir::new().unwrap();
        let symbols = vec![
            ExportedSymbol::named("Button", "Button", "\"./legacy\"", "\"./legacy\""),
            ExportedSymbol::named("Button", "NewButton", "\"./button\"", "\"./button\""),
        ];

        write_facades(temp.path(), &symbols, FileType::Ts).unwrap();

        assert_eq!(
            std::fs::read_to_string(temp.path().join("Button.ts")).unwrap(),
            r#"export { NewButton as default } from "./button";"#
        );
    }
}
