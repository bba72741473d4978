//! Variation and selection operators
//!
//! This module provides selection, crossover, and mutation operators that
//! act on [`Solution`](crate::population::solution::Solution)s.

pub mod compound;
pub mod crossover;
pub mod mutation;
pub mod selection;
pub mod traits;

pub mod prelude {
    pub use super::compound::*;
    pub use super::crossover::*;
    pub use super::mutation::*;
    pub use super::selection::*;
    pub use super::traits::Variation;
}
