//! Error types shared by the solvers and the command-line front end.
//!
//! Parsing of puzzle input is deliberately lenient and never fails, so the only
//! failures left are reading an input file and an example run that disagrees
//! with its published answer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can terminate a solver invocation.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// The puzzle input file could not be opened or read.
    #[error("failed to read input file {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A built-in example produced a different answer than the published one.
    #[error("example result {actual} does not match expected {expected}")]
    ExampleMismatch {
        /// Published answer for the example.
        expected: String,
        /// Answer the solver produced.
        actual: String,
    },
}

impl PuzzleError {
    /// Wraps an I/O error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
