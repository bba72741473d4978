//! Island connectivity

use serde::{Deserialize, Serialize};

/// Migration topology determines which islands exchange individuals
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    /// Every island sends to every other island
    #[default]
    FullyConnected,
    /// Each island sends to the next, wrapping around
    Ring,
    /// All islands send to/receive from a central hub
    Star { hub: usize },
}

impl Topology {
    /// Neighbor indices of island `current` among `count` islands
    pub fn neighbors(&self, current: usize, count: usize) -> Vec<usize> {
        match *self {
            Self::FullyConnected => (0..count).filter(|&i| i != current).collect(),
            Self::Ring => {
                if count <= 1 {
                    vec![]
                } else {
                    vec![(current + 1) % count]
                }
            }
            Self::Star { hub } => {
                if current == hub {
                    (0..count).filter(|&i| i != current).collect()
                } else if hub < count {
                    vec![hub]
                } else {
                    vec![]
                }
            }
        }
    }
}
