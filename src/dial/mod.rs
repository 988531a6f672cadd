#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides the dial-safe simulator.
//!
//! A 100-position dial starts at 50 and is turned left or right by a list of
//! instructions. The answer is how often the dial reads zero, either only where
//! a rotation stops or on every click that passes it.

/// The `solver` module contains the instruction model and the simulation.
pub mod solver;
