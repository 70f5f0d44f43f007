//! Barrel module parsing.

use std::path::Path;

use miette::{NamedSource, SourceSpan};
use tree_sitter::{Node, Parser, Tree};

use crate::{Error, Result};

/// The tree-sitter grammar a barrel is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    TypeScript,
    /// TypeScript with JSX, for `.tsx` and `.jsx` barrels.
    Tsx,
}

impl Grammar {
    /// Pick the grammar for a file by its extension. Plain JavaScript parses
    /// fine with the TypeScript grammar.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsx" | "jsx") => Grammar::Tsx,
            _ => Grammar::TypeScript,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Grammar::TypeScript => "TypeScript",
            Grammar::Tsx => "TSX",
        }
    }

    fn language(&self) -> tree_sitter::Language {
        match self {
            Grammar::TypeScript => tree_sitter_typescript::language_typescript(),
            Grammar::Tsx => tree_sitter_typescript::language_tsx(),
        }
    }
}

/// A parsed barrel module.
///
/// Owns both the source text and its syntax tree; nodes handed out by
/// [`Barrel::statements`] borrow from it.
pub struct Barrel {
    filename: String,
    source: String,
    tree: Tree,
}

impl std::fmt::Debug for Barrel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Barrel")
            .field("filename", &self.filename)
            .field("len", &self.source.len())
            .finish()
    }
}

impl Barrel {
    /// Read and parse a barrel module from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::parse_with(source, path.display().to_string(), Grammar::for_path(path))
    }

    /// Parse barrel source text with the TypeScript grammar.
    pub fn parse_str(source: &str, filename: &str) -> Result<Self> {
        Self::parse_with(source.to_string(), filename.to_string(), Grammar::TypeScript)
    }

    /// Parse barrel source text with an explicit grammar.
    ///
    /// Any syntax error fails the parse: a barrel the parser had to recover
    /// from cannot be trusted to list every export.
    pub fn parse_with(source: String, filename: String, grammar: Grammar) -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&grammar.language()).map_err(|e| {
            Box::new(Error::Grammar {
                grammar: grammar.name(),
                source: e,
            })
        })?;

        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| Box::new(Error::Aborted {
                filename: filename.clone(),
            }))?;

        if let Some(bad) = first_error(tree.root_node()) {
            let found = if bad.is_missing() {
                format!("expected `{}`", bad.kind())
            } else {
                "unexpected syntax".to_string()
            };
            let span = SourceSpan::from(bad.start_byte()..bad.end_byte());
            return Err(Box::new(Error::Syntax {
                src: NamedSource::new(&filename, source),
                span,
                found,
            }));
        }

        tracing::debug!(file = %filename, grammar = grammar.name(), "parsed barrel module");
        Ok(Self {
            filename,
            source,
            tree,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Top-level statements in source order. Comments are not statements.
    pub fn statements(&self) -> Vec<Node<'_>> {
        let root = self.tree.root_node();
        let mut cursor = root.walk();
        let statements = root
            .named_children(&mut cursor)
            .filter(|node| !node.is_extra())
            .collect();
        statements
    }

    /// Source text covered by `node`.
    pub fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            continue;
        }
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }
    None
}
