//! Island model
//!
//! Independent algorithm instances evolving concurrently, exchanging
//! solutions through thread-safe immigration queues.

#[allow(clippy::module_inception)]
pub mod island;
pub mod migration;
pub mod model;
pub mod queue;
pub mod topology;

pub mod prelude {
    pub use super::island::*;
    pub use super::migration::*;
    pub use super::model::*;
    pub use super::queue::*;
    pub use super::topology::*;
}
