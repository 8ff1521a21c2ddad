//! Score-related types and data structures.
//!
//! This module contains types for representing scores and results:
//! - `Grade` - letter grades (F, D, C, B, A, S, SS)
//! - `Score`, `HitCounts` - the live accumulator of a session
//! - `SessionStats` - the snapshot handed to result screens

mod grade;
mod stats;
mod tally;

pub use grade::*;
pub use stats::*;
pub use tally::*;
