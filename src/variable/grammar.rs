//! Grammar decision variable
//!
//! An integer codon sequence used by grammatical evolution. Every codon lies
//! in `[0, max_value)`; the sequence length may change under crossover.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::VariableError;

/// Default exclusive upper limit for codon values
pub const DEFAULT_MAX_VALUE: usize = 256;

/// Variable-length codon sequence
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grammar {
    codons: Vec<usize>,
    max_value: usize,
}

impl Grammar {
    /// Create an all-zero codon sequence of the given length
    pub fn new(length: usize) -> Self {
        Self {
            codons: vec![0; length],
            max_value: DEFAULT_MAX_VALUE,
        }
    }

    /// Create from explicit codons with the given exclusive maximum
    pub fn from_codons(codons: Vec<usize>, max_value: usize) -> Result<Self, VariableError> {
        if max_value == 0 {
            return Err(VariableError::InvalidStructure(
                "max_value must be positive".to_string(),
            ));
        }
        if let Some(&codon) = codons.iter().find(|&&c| c >= max_value) {
            return Err(VariableError::InvalidCodon { codon, max_value });
        }
        Ok(Self { codons, max_value })
    }

    /// Exclusive upper limit for codon values
    pub fn max_value(&self) -> usize {
        self.max_value
    }

    /// Number of codons
    pub fn len(&self) -> usize {
        self.codons.len()
    }

    /// Check if there are no codons
    pub fn is_empty(&self) -> bool {
        self.codons.is_empty()
    }

    /// The codon sequence
    pub fn codons(&self) -> &[usize] {
        &self.codons
    }

    /// Get a single codon
    pub fn get(&self, index: usize) -> Option<usize> {
        self.codons.get(index).copied()
    }

    /// Set a single codon
    pub fn set(&mut self, index: usize, codon: usize) -> Result<(), VariableError> {
        if codon >= self.max_value {
            return Err(VariableError::InvalidCodon {
                codon,
                max_value: self.max_value,
            });
        }
        match self.codons.get_mut(index) {
            Some(slot) => {
                *slot = codon;
                Ok(())
            }
            None => Err(VariableError::InvalidStructure(format!(
                "codon index {} out of bounds for length {}",
                index,
                self.codons.len()
            ))),
        }
    }

    /// Draw every codon uniformly from `[0, max_value)`
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for codon in &mut self.codons {
            *codon = rng.gen_range(0..self.max_value);
        }
    }

    /// Replace one codon with a uniform draw
    pub(crate) fn redraw<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) {
        self.codons[index] = rng.gen_range(0..self.max_value);
    }

    /// Split off the codons at and after `at`
    pub(crate) fn split_tail(&mut self, at: usize) -> Vec<usize> {
        self.codons.split_off(at)
    }

    /// Append codons, clamping each into `[0, max_value)`
    pub(crate) fn extend_tail(&mut self, tail: Vec<usize>) {
        let limit = self.max_value - 1;
        self.codons.extend(tail.into_iter().map(|c| c.min(limit)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_from_codons_rejects_out_of_range() {
        assert_eq!(
            Grammar::from_codons(vec![1, 2, 10], 10),
            Err(VariableError::InvalidCodon {
                codon: 10,
                max_value: 10
            })
        );
        assert!(Grammar::from_codons(vec![1, 2, 9], 10).is_ok());
        assert!(Grammar::from_codons(vec![], 0).is_err());
    }

    #[test]
    fn test_set_validates_codon() {
        let mut grammar = Grammar::new(4);
        assert!(grammar.set(0, 255).is_ok());
        assert!(grammar.set(0, 256).is_err());
        assert!(grammar.set(4, 1).is_err());
    }

    #[test]
    fn test_randomize_stays_below_max() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let mut grammar = Grammar::from_codons(vec![0; 50], 5).unwrap();
        grammar.randomize(&mut rng);
        assert!(grammar.codons().iter().all(|&c| c < 5));
    }

    #[test]
    fn test_split_and_extend() {
        let mut grammar = Grammar::from_codons(vec![1, 2, 3, 4], 10).unwrap();
        let tail = grammar.split_tail(1);
        assert_eq!(tail, vec![2, 3, 4]);
        assert_eq!(grammar.codons(), &[1]);

        grammar.extend_tail(vec![7, 12]);
        assert_eq!(grammar.codons(), &[1, 7, 9]);
    }
}
