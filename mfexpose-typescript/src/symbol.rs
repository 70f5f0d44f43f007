//! Exported symbols and the facade statements they render to.

/// Rewrites a quoted source specifier before it is embedded in a facade.
///
/// Implemented for any `Fn(&str) -> String`, so closures work directly.
pub trait PathTransform {
    fn transform(&self, specifier: &str) -> String;
}

impl<F> PathTransform for F
where
    F: Fn(&str) -> String,
{
    fn transform(&self, specifier: &str) -> String {
        self(specifier)
    }
}

/// The transform that leaves specifiers untouched.
pub fn identity(specifier: &str) -> String {
    specifier.to_string()
}

/// How a facade forwards its symbol as a default export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// `export { name as default } from ...`
    NamedAsDefault,
    /// `export { default } from ...`
    DefaultPassthrough,
    /// `export * as default from ...`
    NamespaceAsDefault,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::NamedAsDefault => "named",
            SymbolKind::DefaultPassthrough => "default",
            SymbolKind::NamespaceAsDefault => "namespace",
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One public name exposed by the barrel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSymbol {
    /// Consumer-facing name; the facade file's base name.
    pub public_name: String,
    /// Name re-exported from the underlying module, for named specifiers.
    pub original_name: Option<String>,
    /// Quoted source specifier as written in the barrel.
    pub source: String,
    /// Quoted source specifier after the path transform.
    pub target: String,
    pub kind: SymbolKind,
    /// 1-based line of the statement in the barrel.
    pub line: usize,
}

impl ExportedSymbol {
    pub fn named(
        public_name: impl Into<String>,
        original_name: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            public_name: public_name.into(),
            original_name: Some(original_name.into()),
            source: source.into(),
            target: target.into(),
            kind: SymbolKind::NamedAsDefault,
            line: 0,
        }
    }

    pub fn default_passthrough(
        public_name: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            public_name: public_name.into(),
            original_name: None,
            source: source.into(),
            target: target.into(),
            kind: SymbolKind::DefaultPassthrough,
            line: 0,
        }
    }

    pub fn namespace(
        public_name: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            public_name: public_name.into(),
            original_name: None,
            source: source.into(),
            target: target.into(),
            kind: SymbolKind::NamespaceAsDefault,
            line: 0,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// The facade module's single statement, without a trailing newline.
    pub fn statement(&self) -> String {
        match (self.kind, &self.original_name) {
            (SymbolKind::NamedAsDefault, Some(original)) => {
                format!("export {{ {} as default }} from {};", original, self.target)
            }
            // A named symbol always carries its original name; fall back to
            // the public name rather than rendering an empty specifier.
            (SymbolKind::NamedAsDefault, None) => {
                format!(
                    "export {{ {} as default }} from {};",
                    self.public_name, self.target
                )
            }
            (SymbolKind::DefaultPassthrough, _) => {
                format!("export {{ default }} from {};", self.target)
            }
            (SymbolKind::NamespaceAsDefault, _) => {
                format!("export * as default from {};", self.target)
            }
        }
    }
}
