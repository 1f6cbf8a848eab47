//! Errors that abort an analysis run.
//!
//! Anything recoverable (an occurrence the front end could not resolve, an
//! occurrence naming an unknown declaration) is logged and skipped instead.

use crate::model::{DeclId, Location};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UsageError>;

#[derive(Error, Debug)]
pub enum UsageError {
    #[error("Failed to read fact document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse fact document {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Declaration {id} is declared twice ({first} and {second})")]
    DuplicateDeclaration {
        id: DeclId,
        first: Location,
        second: Location,
    },

    #[error("File {path} is listed more than once in the semantic model")]
    DuplicateFile { path: PathBuf },

    #[error("Declaration {id} referenced by {context} does not exist")]
    DanglingDeclaration { id: DeclId, context: String },

    #[error("Couldn't open debug file {path}: {source}")]
    DebugSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write debug graph: {0}")]
    DebugWrite(#[from] std::io::Error),

    #[error("Malformed ignore string {0:?}")]
    MalformedIgnore(String),

    #[error("Invalid ignore pattern {pattern:?}: {source}")]
    IgnorePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to load config {path}: {message}")]
    Config { path: PathBuf, message: String },
}
