//! The conversion engine.
//!
//! ## Module Structure
//!
//! - `classify`: decides whether a string is human-facing text
//! - `normalize`: canonical word stream used for key derivation
//! - `keygen`: slug derivation rule chain
//! - `namespace`: namespace/group inference from file paths
//! - `rewrite`: AST collection, decisions and text splicing
//! - `conversion`: per-run statistics, records and manual-review entries
//! - `file_scanner`: source file discovery for batch scans
//! - `parsers`: swc parsing
//! - `data`, `error`: shared types

pub mod classify;
pub mod conversion;
pub mod data;
pub mod error;
pub mod file_scanner;
pub mod keygen;
pub mod namespace;
pub mod normalize;
pub mod parsers;
pub mod rewrite;

pub use classify::TextClassifier;
pub use conversion::ConversionContext;
pub use data::{NsGroup, SourceUnit, TranslationKey};
pub use error::CodemodError;
pub use keygen::{KeyContext, KeyGenerator};
pub use namespace::NamespaceResolver;
pub use normalize::Normalizer;
pub use rewrite::Codemod;
