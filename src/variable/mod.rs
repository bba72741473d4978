//! Decision variables
//!
//! Solutions may mix encodings. `Variable` is a closed sum type over the
//! supported kinds so that operators can match exhaustively and skip the
//! kinds they do not handle.

pub mod bit_string;
pub mod grammar;
pub mod permutation;
pub mod real;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use bit_string::BitString;
pub use grammar::Grammar;
pub use permutation::Permutation;
pub use real::{Bounds, RealVariable};

/// Encoding kind of a variable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableKind {
    Real,
    Binary,
    Grammar,
    Permutation,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Real => "real",
            Self::Binary => "binary",
            Self::Grammar => "grammar",
            Self::Permutation => "permutation",
        };
        f.write_str(name)
    }
}

/// A single decision variable
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Variable {
    Real(RealVariable),
    Binary(BitString),
    Grammar(Grammar),
    Permutation(Permutation),
}

impl Variable {
    /// Encoding kind of this variable
    pub fn kind(&self) -> VariableKind {
        match self {
            Self::Real(_) => VariableKind::Real,
            Self::Binary(_) => VariableKind::Binary,
            Self::Grammar(_) => VariableKind::Grammar,
            Self::Permutation(_) => VariableKind::Permutation,
        }
    }

    /// Re-draw the variable uniformly from its domain
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self {
            Self::Real(v) => v.randomize(rng),
            Self::Binary(v) => v.randomize(rng),
            Self::Grammar(v) => v.randomize(rng),
            Self::Permutation(v) => v.randomize(rng),
        }
    }

    /// Distance in decision space
    ///
    /// Variables of different kinds are one unit apart.
    pub fn distance(&self, other: &Self) -> f64 {
        match (self, other) {
            (Self::Real(a), Self::Real(b)) => (a.value() - b.value()).abs(),
            (Self::Binary(a), Self::Binary(b)) => a.hamming_distance(b) as f64,
            (Self::Grammar(a), Self::Grammar(b)) => {
                let differing = a
                    .codons()
                    .iter()
                    .zip(b.codons())
                    .filter(|(x, y)| x != y)
                    .count();
                (differing + a.len().abs_diff(b.len())) as f64
            }
            (Self::Permutation(a), Self::Permutation(b)) => a.positional_distance(b) as f64,
            _ => 1.0,
        }
    }

    pub fn as_real(&self) -> Option<&RealVariable> {
        match self {
            Self::Real(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&BitString> {
        match self {
            Self::Binary(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_grammar(&self) -> Option<&Grammar> {
        match self {
            Self::Grammar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_permutation(&self) -> Option<&Permutation> {
        match self {
            Self::Permutation(v) => Some(v),
            _ => None,
        }
    }
}

impl From<RealVariable> for Variable {
    fn from(v: RealVariable) -> Self {
        Self::Real(v)
    }
}

impl From<BitString> for Variable {
    fn from(v: BitString) -> Self {
        Self::Binary(v)
    }
}

impl From<Grammar> for Variable {
    fn from(v: Grammar) -> Self {
        Self::Grammar(v)
    }
}

impl From<Permutation> for Variable {
    fn from(v: Permutation) -> Self {
        Self::Permutation(v)
    }
}

pub mod prelude {
    pub use super::bit_string::*;
    pub use super::grammar::*;
    pub use super::permutation::*;
    pub use super::real::*;
    pub use super::{Variable, VariableKind};
}
