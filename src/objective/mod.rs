//! Objectives, dominance relations, and penalty functions
//!
//! This module defines how solutions are ordered: the sense-aware
//! [`Objective`], the dominance comparators used by archives and selection,
//! and the penalty functions that summarize constraint violation.

pub mod dominance;
pub mod epsilon;
#[allow(clippy::module_inception)]
pub mod objective;
pub mod penalty;

pub mod prelude {
    pub use super::dominance::*;
    pub use super::epsilon::*;
    pub use super::objective::*;
    pub use super::penalty::*;
}
