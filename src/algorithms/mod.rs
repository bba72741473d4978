//! Evolutionary algorithms
//!
//! This module provides the [`Algorithm`](traits::Algorithm) abstraction
//! driven by the island model, and an NSGA-II implementation of it.

pub mod nsga2;
pub mod traits;

pub mod prelude {
    pub use super::nsga2::*;
    pub use super::traits::*;
}
