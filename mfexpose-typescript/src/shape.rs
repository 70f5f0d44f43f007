//! Re-export statement shapes.
//!
//! Every top-level statement of a barrel falls into exactly one
//! [`ExportShape`]. Only the two value re-export shapes produce facades; the
//! others are matched explicitly so callers can report what was skipped.

use tree_sitter::Node;

use crate::Barrel;

/// One `name` or `name as alias` entry of an export clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Specifier<'a> {
    /// The exported name as written, quotes included for string names.
    pub name: &'a str,
    /// The name after `as`, unquoted.
    pub alias: Option<&'a str>,
    /// `export { type Foo } from ...`
    pub type_only: bool,
}

impl<'a> Specifier<'a> {
    pub fn is_default(&self) -> bool {
        self.name == "default"
    }

    /// The name consumers import: the alias when renamed, otherwise the
    /// name itself.
    pub fn public_name(&self) -> &'a str {
        self.alias.unwrap_or_else(|| unquote(self.name))
    }
}

/// Syntactic category of a top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportShape<'a> {
    /// `export { a, b as c, default, default as D } from '...'`
    NamedReExport {
        source: &'a str,
        specifiers: Vec<Specifier<'a>>,
    },
    /// `export * as ns from '...'`
    NamespaceReExport { source: &'a str, alias: &'a str },
    /// `export type { ... } from '...'`
    TypeOnlyReExport,
    /// Anything else: local exports, declarations, `export * from '...'`,
    /// imports and other statements.
    Unsupported { reason: &'static str },
}

impl<'a> ExportShape<'a> {
    /// Classify one top-level statement of `barrel`.
    pub fn of(barrel: &'a Barrel, node: Node<'a>) -> Self {
        if node.kind() != "export_statement" {
            return ExportShape::Unsupported {
                reason: "not an export statement",
            };
        }

        // Checked before anything else; type-only clauses never reach
        // specifier analysis.
        if is_type_only(barrel.text(node)) {
            return ExportShape::TypeOnlyReExport;
        }

        let Some(source) = node.child_by_field_name("source") else {
            return ExportShape::Unsupported {
                reason: "export without a `from` clause",
            };
        };
        let source = barrel.text(source);

        let mut cursor = node.walk();
        let children: Vec<Node<'a>> = node.named_children(&mut cursor).collect();

        if let Some(namespace) = children.iter().find(|c| c.kind() == "namespace_export") {
            return match namespace_alias(barrel, *namespace) {
                Some(alias) => ExportShape::NamespaceReExport { source, alias },
                None => ExportShape::Unsupported {
                    reason: "namespace export without an alias",
                },
            };
        }

        let Some(clause) = children.iter().find(|c| c.kind() == "export_clause") else {
            return ExportShape::Unsupported {
                reason: "wildcard re-export without a namespace alias",
            };
        };

        let mut cursor = clause.walk();
        let specifiers = clause
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "export_specifier")
            .filter_map(|c| specifier(barrel, c))
            .collect();

        ExportShape::NamedReExport { source, specifiers }
    }
}

/// `export type { ... }`, allowing any whitespace after `export`.
fn is_type_only(text: &str) -> bool {
    text.strip_prefix("export")
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix("type"))
        .and_then(|rest| rest.chars().next())
        .is_some_and(|next| next.is_whitespace() || next == '{')
}

fn specifier<'a>(barrel: &'a Barrel, node: Node<'a>) -> Option<Specifier<'a>> {
    let Some(name) = node.child_by_field_name("name") else {
        tracing::warn!(
            line = node.start_position().row + 1,
            text = barrel.text(node),
            "skipping export specifier without a readable name"
        );
        return None;
    };

    let type_only = node
        .child(0)
        .is_some_and(|first| !first.is_named() && matches!(first.kind(), "type" | "typeof"));

    Some(Specifier {
        name: barrel.text(name),
        alias: node
            .child_by_field_name("alias")
            .map(|alias| unquote(barrel.text(alias))),
        type_only,
    })
}

fn namespace_alias<'a>(barrel: &'a Barrel, node: Node<'a>) -> Option<&'a str> {
    let mut cursor = node.walk();
    let alias = node
        .named_children(&mut cursor)
        .last()
        .map(|alias| unquote(barrel.text(alias)));
    alias
}

/// Strip the quotes of an arbitrary module namespace name (`"a-b"`).
fn unquote(name: &str) -> &str {
    let bytes = name.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(b'"'), Some(b'"')) | (Some(b'\''), Some(b'\'')) if name.len() >= 2 => {
            &name[1..name.len() - 1]
        }
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes(source: &str) -> Vec<String> {
        let barrel = Barrel::parse_str(source, "index.ts").unwrap();
        barrel
            .statements()
            .into_iter()
            .map(|node| format!("{:?}", ExportShape::of(&barrel, node)))
            .collect()
    }

    fn first_shape<T>(source: &str, check: impl FnOnce(ExportShape<'_>) -> T) -> T {
        let barrel = Barrel::parse_str(source, "index.ts").unwrap();
        let node = barrel.statements()[0];
        check(ExportShape::of(&barrel, node))
    }

    #[test]
    fn test_named_re_export_specifiers() {
        first_shape(
            r#"export { get, pick as myPick, default as Utils } from "./utils";"#,
            |shape| {
                let ExportShape::NamedReExport { source, specifiers } = shape else {
                    panic!("expected a named re-export");
                };
                assert_eq!(source, "\"./utils\"");
                let pairs: Vec<_> = specifiers.iter().map(|s| (s.name, s.alias)).collect();
                assert_eq!(
                    pairs,
                    vec![
                        ("get", None),
                        ("pick", Some("myPick")),
                        ("default", Some("Utils"))
                    ]
                );
            },
        );
    }

    #[test]
    fn test_bare_default_specifier() {
        first_shape(r#"export { default } from './utils';"#, |shape| {
            let ExportShape::NamedReExport { source, specifiers } = shape else {
                panic!("expected a named re-export");
            };
            assert_eq!(source, "'./utils'");
            assert_eq!(specifiers.len(), 1);
            assert!(specifiers[0].is_default());
            assert_eq!(specifiers[0].public_name(), "default");
        });
    }

    #[test]
    fn test_namespace_re_export() {
        first_shape(r#"export * as utils from "./utils";"#, |shape| {
            assert_eq!(
                shape,
                ExportShape::NamespaceReExport {
                    source: "\"./utils\"",
                    alias: "utils"
                }
            );
        });
    }

    #[test]
    fn test_type_only_re_export() {
        first_shape(r#"export type { TUtils } from "./utils";"#, |shape| {
            assert_eq!(shape, ExportShape::TypeOnlyReExport);
        });
    }

    #[test]
    fn test_unsupported_statements() {
        let shapes = shapes(
            r#"
            import { a } from "./a";
            export * from "./b";
            export const c = 1;
            export { a };
            "#,
        );
        assert_eq!(shapes.len(), 4);
        assert!(shapes.iter().all(|s| s.starts_with("Unsupported")));
    }

    #[test]
    fn test_is_type_only() {
        assert!(is_type_only("export type { A } from './a';"));
        assert!(is_type_only("export  type{ A } from './a';"));
        assert!(!is_type_only("export { type } from './a';"));
        assert!(!is_type_only("export { A } from './types';"));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"a-b\""), "a-b");
        assert_eq!(unquote("'a'"), "a");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("\""), "\"");
    }
}
