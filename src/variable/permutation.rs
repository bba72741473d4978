//! Permutation decision variable
//!
//! Represents an ordering of the indices `0..n` (routing, scheduling).

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::VariableError;

/// Permutation of `0..n`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permutation {
    perm: Vec<usize>,
}

impl Permutation {
    /// Try to create a permutation, returning an error if invalid
    pub fn try_new(perm: Vec<usize>) -> Result<Self, VariableError> {
        let result = Self { perm };
        if result.is_valid() {
            Ok(result)
        } else {
            Err(VariableError::InvalidStructure(
                "Input is not a valid permutation of 0..n".to_string(),
            ))
        }
    }

    /// Create the identity permutation [0, 1, 2, ..., n-1]
    pub fn identity(n: usize) -> Self {
        Self {
            perm: (0..n).collect(),
        }
    }

    /// Get the length of the permutation
    pub fn len(&self) -> usize {
        self.perm.len()
    }

    /// Check if the permutation is empty
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// Get the element at index i
    pub fn get(&self, i: usize) -> Option<usize> {
        self.perm.get(i).copied()
    }

    /// Get a reference to the underlying slice
    pub fn as_slice(&self) -> &[usize] {
        &self.perm
    }

    /// Swap two elements at positions i and j
    pub fn swap(&mut self, i: usize, j: usize) {
        self.perm.swap(i, j);
    }

    /// Shuffle into a uniformly random ordering
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.perm.shuffle(rng);
    }

    /// Check that every index in `0..n` appears exactly once
    pub fn is_valid(&self) -> bool {
        let n = self.perm.len();
        let mut seen = vec![false; n];
        for &p in &self.perm {
            if p >= n || seen[p] {
                return false;
            }
            seen[p] = true;
        }
        true
    }

    /// Sum over elements of how far each element moved between the orderings
    pub fn positional_distance(&self, other: &Self) -> usize {
        let mut position = vec![usize::MAX; other.perm.len()];
        for (i, &p) in other.perm.iter().enumerate() {
            if p < position.len() {
                position[p] = i;
            }
        }

        self.perm
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| {
                position
                    .get(p)
                    .filter(|&&j| j != usize::MAX)
                    .map(|&j| i.abs_diff(j))
            })
            .sum()
    }
}
