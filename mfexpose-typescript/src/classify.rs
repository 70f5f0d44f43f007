//! Barrel classification: statements in, exported symbols out.

use std::collections::HashSet;

use crate::{Barrel, ExportShape, ExportedSymbol, PathTransform};

/// Why a statement or specifier produced no facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `export type { ... } from ...`
    TypeOnly,
    /// `export { type T } from ...`
    TypeOnlySpecifier,
    /// A public name that cannot be used as a facade file name.
    InvalidName,
    /// Any other statement shape.
    Unsupported(&'static str),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TypeOnly => f.write_str("type-only re-export"),
            SkipReason::TypeOnlySpecifier => f.write_str("type-only specifier"),
            SkipReason::InvalidName => f.write_str("name is not a valid file name"),
            SkipReason::Unsupported(reason) => f.write_str(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedStatement {
    /// 1-based line in the barrel.
    pub line: usize,
    /// First line of the statement text.
    pub text: String,
    pub reason: SkipReason,
}

/// Everything learned from one pass over a barrel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Symbols in statement order, then specifier order.
    pub symbols: Vec<ExportedSymbol>,
    pub skipped: Vec<SkippedStatement>,
}

impl Classification {
    /// Public names declared more than once, in order of first repeat.
    ///
    /// The last declaration wins when facades are written.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut repeated = Vec::new();
        for symbol in &self.symbols {
            let name = symbol.public_name.as_str();
            if !seen.insert(name) && !repeated.contains(&name) {
                repeated.push(name);
            }
        }
        repeated
    }
}

/// Classify every top-level statement of `barrel`.
pub fn analyze(barrel: &Barrel, transform: &dyn PathTransform) -> Classification {
    let mut out = Classification::default();

    for node in barrel.statements() {
        let line = node.start_position().row + 1;
        let skip = |reason: SkipReason| SkippedStatement {
            line,
            text: barrel.text(node).lines().next().unwrap_or_default().to_string(),
            reason,
        };

        match ExportShape::of(barrel, node) {
            ExportShape::NamedReExport { source, specifiers } => {
                let target = transform.transform(source);
                for specifier in specifiers {
                    if specifier.type_only {
                        out.skipped.push(skip(SkipReason::TypeOnlySpecifier));
                        continue;
                    }
                    if !is_file_safe(specifier.public_name()) {
                        tracing::warn!(
                            line,
                            name = specifier.public_name(),
                            "skipping public name that is not a file name"
                        );
                        out.skipped.push(skip(SkipReason::InvalidName));
                        continue;
                    }
                    let symbol = if specifier.is_default() {
                        ExportedSymbol::default_passthrough(
                            specifier.public_name(),
                            source,
                            target.as_str(),
                        )
                    } else {
                        ExportedSymbol::named(
                            specifier.public_name(),
                            specifier.name,
                            source,
                            target.as_str(),
                        )
                    };
                    out.symbols.push(symbol.at_line(line));
                }
            }
            ExportShape::NamespaceReExport { source, alias } => {
                if !is_file_safe(alias) {
                    tracing::warn!(line, name = alias, "skipping public name that is not a file name");
                    out.skipped.push(skip(SkipReason::InvalidName));
                    continue;
                }
                let target = transform.transform(source);
                out.symbols
                    .push(ExportedSymbol::namespace(alias, source, target).at_line(line));
            }
            ExportShape::TypeOnlyReExport => {
                out.skipped.push(skip(SkipReason::TypeOnly));
            }
            ExportShape::Unsupported { reason } => {
                tracing::debug!(line, reason, "ignoring statement");
                out.skipped.push(skip(SkipReason::Unsupported(reason)));
            }
        }
    }

    for name in out.duplicate_names() {
        tracing::warn!(name, "public name exported more than once; the last declaration wins");
    }

    out
}

/// Public names become `<generate_dir>/<name>.<ext>`, so string-literal
/// aliases must stay a single path component.
fn is_file_safe(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// The exported symbols of `barrel`, in emission order.
pub fn classify(barrel: &Barrel, transform: &dyn PathTransform) -> Vec<ExportedSymbol> {
    analyze(barrel, transform).symbols
}
