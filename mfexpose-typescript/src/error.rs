use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for barrel parsing (boxed to keep it small on the stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read barrel module '{path}'")]
    #[diagnostic(help("check `export_file` in mfexpose.toml"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("barrel module has a syntax error")]
    #[diagnostic(
        code(mfexpose::barrel::syntax),
        help("fix the barrel module; nothing was generated")
    )]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("{found}")]
        span: SourceSpan,
        found: String,
    },

    #[error("failed to load the {grammar} grammar")]
    #[diagnostic(code(mfexpose::barrel::grammar))]
    Grammar {
        grammar: &'static str,
        #[source]
        source: tree_sitter::LanguageError,
    },

    #[error("parser gave up on '{filename}'")]
    #[diagnostic(code(mfexpose::barrel::aborted))]
    Aborted { filename: String },
}
