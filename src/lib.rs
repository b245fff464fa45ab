//! CFML / Lucee linter and formatter.
//!
//! The pipeline resolves settings ([`config`]), selects files ([`scanner`]), decodes
//! them ([`encoding`]), parses them with a pluggable backend ([`parser`]), runs the
//! rule registry ([`rules`]) through the coordinator ([`engine`]) and hands the
//! aggregate ([`result`]) to a renderer ([`output`]).

pub mod cli;
pub mod commands;
pub mod config;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod output;
pub mod parser;
pub mod path_utils;
pub mod result;
pub mod rules;
pub mod scanner;

pub use error::{CfmlLintError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VIOLATIONS: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
