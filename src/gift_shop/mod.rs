#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides the gift-shop product ID scanner.
//!
//! Product IDs are invalid when their decimal digits are a block repeated
//! exactly twice (part 1) or at least twice (part 2). The answer is the sum of
//! all invalid IDs found in a list of inclusive ranges.

/// The `solver` module contains the range model, the predicates and the scan.
pub mod solver;
