//! # moea-islands
//!
//! Multi-objective evolutionary search with an island model.
//!
//! The crate is built around dominance-ordered solution sets and a threaded
//! island layer:
//!
//! - **Archives**: [`NondominatedPopulation`](population::archive::NondominatedPopulation)
//!   and [`EpsilonBoxDominanceArchive`](population::epsilon_archive::EpsilonBoxDominanceArchive)
//!   keep only mutually nondominated solutions
//! - **Variation**: probability-gated operators over real, binary, grammar, and
//!   permutation variables that never modify their parents
//! - **Islands**: one OS thread per algorithm instance, with migration through
//!   mutex-guarded immigration queues
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use moea_islands::prelude::*;
//! use std::sync::Arc;
//!
//! let problem: Arc<dyn Problem> = Arc::new(MyProblem::new());
//! let variation = CompoundVariation::new(
//!     Sbx::new(0.9, 15.0)?,
//!     PolynomialMutation::new(0.1, 20.0)?,
//! )?;
//!
//! let mut model = IslandModel::builder()
//!     .topology(Topology::Ring)
//!     .migration(SingleNeighborMigration::new())
//!     .migration_frequency(1000)
//!     .build()?;
//!
//! for _ in 0..4 {
//!     model.add_island(
//!         Nsga2::builder()
//!             .population_size(100)
//!             .problem(Arc::clone(&problem))
//!             .variation(variation.clone())
//!             .build()?,
//!     );
//! }
//!
//! let front = model.run(100_000)?;
//! ```

pub mod algorithms;
pub mod error;
pub mod island;
pub mod objective;
pub mod operators;
pub mod population;
pub mod problem;
pub mod variable;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::error::*;
    pub use crate::island::prelude::*;
    pub use crate::objective::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::problem::*;
    pub use crate::variable::*;
}
