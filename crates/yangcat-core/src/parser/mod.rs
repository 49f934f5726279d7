//! Parser module: YANG statement trees
//!
//! The resolver only needs a navigable statement tree (keyword, argument,
//! substatements) for each schema file. [`StatementParser`] is the seam for
//! plugging in a full YANG compiler; [`YangParser`] is the built-in
//! lightweight implementation.

mod lexer;
mod statement;
mod yang;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use statement::Statement;
pub use yang::YangParser;

/// Errors that can occur while parsing a schema file
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unterminated {what} starting on line {line}")]
    Unterminated { what: &'static str, line: usize },

    #[error("Unexpected {found} on line {line}")]
    Unexpected { found: String, line: usize },

    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Expected a module or submodule, found `{0}`")]
    NotAModule(String),
}

/// Turns a schema file into its top-level statement
pub trait StatementParser: Send + Sync {
    /// Parse the file at `path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a well-formed
    /// module or submodule.
    fn parse_file(&self, path: &Path) -> Result<Statement, ParseError>;
}
