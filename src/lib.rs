#![deny(missing_docs)]
//! This crate provides solvers for two small number puzzles: a safe dial that
//! counts how often it reads zero, and a gift-shop scanner that sums product
//! IDs made of repeated digit blocks.

/// The `dial` module simulates the 100-position safe dial and counts zeros, either where rotations
/// stop or on every click.
pub mod dial;

/// The `error` module defines the errors a solver run can end with.
pub mod error;

/// The `gift_shop` module scans ID ranges for numbers whose digits repeat a block.
pub mod gift_shop;

/// The `lenient` module parses numeric prefixes the way both puzzle inputs expect.
pub mod lenient;
