//! Binary decision variable
//!
//! A fixed-length bit string used by binary-encoded problems.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed-length bit string variable
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// Create a new bit string with the given bits
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create an all-zeros bit string of the given length
    pub fn zeros(length: usize) -> Self {
        Self {
            bits: vec![false; length],
        }
    }

    /// Create an all-ones bit string of the given length
    pub fn ones(length: usize) -> Self {
        Self {
            bits: vec![true; length],
        }
    }

    /// Create a uniformly random bit string
    pub fn random<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..length).map(|_| rng.gen()).collect(),
        }
    }

    /// Get the length of the bit string
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the bit string is empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get a specific bit
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Set a specific bit
    pub fn set(&mut self, index: usize, value: bool) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = value;
        }
    }

    /// Flip a specific bit
    pub fn flip(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = !*bit;
        }
    }

    /// Re-draw every bit uniformly at random
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for bit in &mut self.bits {
            *bit = rng.gen();
        }
    }

    /// The underlying bits
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Number of cleared bits
    pub fn count_zeros(&self) -> usize {
        self.len() - self.count_ones()
    }

    /// Hamming distance to another bit string
    ///
    /// Bits beyond the shorter string count as differing.
    pub fn hamming_distance(&self, other: &Self) -> usize {
        let common = self
            .bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| a != b)
            .count();
        common + self.len().abs_diff(other.len())
    }

    /// Swap the bits at `index` between two bit strings
    pub(crate) fn swap_with(&mut self, other: &mut Self, index: usize) {
        std::mem::swap(&mut self.bits[index], &mut other.bits[index]);
    }
}

impl std::ops::Index<usize> for BitString {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl<const N: usize> From<[bool; N]> for BitString {
    fn from(arr: [bool; N]) -> Self {
        Self { bits: arr.to_vec() }
    }
}

impl std::fmt::Display for BitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_bit_string_zeros_and_ones() {
        let zeros = BitString::zeros(5);
        assert_eq!(zeros.count_ones(), 0);
        assert_eq!(zeros.count_zeros(), 5);

        let ones = BitString::ones(5);
        assert_eq!(ones.count_ones(), 5);
    }

    #[test]
    fn test_bit_string_get_set_flip() {
        let mut bs = BitString::zeros(3);
        assert_eq!(bs.get(3), None);

        bs.set(1, true);
        assert_eq!(bs.get(1), Some(true));

        bs.flip(1);
        bs.flip(2);
        assert_eq!(bs.bits(), &[false, false, true]);
    }

    #[test]
    fn test_bit_string_hamming_distance() {
        let bs1 = BitString::new(vec![true, false, true, false]);
        let bs2 = BitString::new(vec![true, true, false, false]);
        assert_eq!(bs1.hamming_distance(&bs2), 2);

        let short = BitString::new(vec![true]);
        assert_eq!(bs1.hamming_distance(&short), 3);
    }

    #[test]
    fn test_bit_string_random_length() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let bs = BitString::random(64, &mut rng);
        assert_eq!(bs.len(), 64);
    }

    #[test]
    fn test_bit_string_display() {
        let bs: BitString = [true, false, true, true].into();
        assert_eq!(format!("{}", bs), "1011");
    }

    #[test]
    fn test_bit_string_swap_with() {
        let mut a = BitString::zeros(2);
        let mut b = BitString::ones(2);
        a.swap_with(&mut b, 0);
        assert_eq!(a.bits(), &[true, false]);
        assert_eq!(b.bits(), &[false, true]);
    }
}
