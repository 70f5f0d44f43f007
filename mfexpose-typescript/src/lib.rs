// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Barrel module parsing and re-export classification.
//!
//! A barrel is parsed with tree-sitter, each top-level statement is matched
//! against the supported re-export shapes, and every exported name becomes an
//! [`ExportedSymbol`] carrying the single-default-export statement of its
//! facade module.
//!
//! ```ignore
//! let barrel = Barrel::parse_str(r#"export { get as myGet } from "./utils";"#, "index.ts")?;
//! let symbols = classify(&barrel, &|s: &str| s.replacen("./", "../", 1));
//! assert_eq!(symbols[0].public_name, "myGet");
//! assert_eq!(symbols[0].statement(), r#"export { get as default } from "../utils";"#);
//! ```

mod barrel;
mod classify;
mod error;
mod shape;
mod symbol;

pub use barrel::{Barrel, Grammar};
pub use classify::{Classification, SkipReason, SkippedStatement, analyze, classify};
pub use error::{Error, Result};
pub use shape::{ExportShape, Specifier};
pub use symbol::{ExportedSymbol, PathTransform, SymbolKind, identity};
