//! Solutions, populations, and archives
//!
//! This module provides the Solution and Population types along with the
//! dominance-pruned archives built on top of them.

pub mod archive;
pub mod epsilon_archive;
#[allow(clippy::module_inception)]
pub mod population;
pub mod solution;

pub mod prelude {
    pub use super::archive::*;
    pub use super::epsilon_archive::*;
    pub use super::population::*;
    pub use super::solution::*;
}
