//! i18n-codemod - externalize hardcoded UI strings into translation lookups
//!
//! i18n-codemod is a CLI tool and library that finds user-visible string
//! literals in React/TSX sources and rewrites them into `t('ns:group.key',
//! { defaultValue })` calls with keys derived deterministically from the text
//! and the file's location.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (convert, scan, init and reporting)
//! - `config`: Configuration file loading and the key-map/synonym tables
//! - `core`: Conversion engine (classify, derive keys, rewrite)
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
