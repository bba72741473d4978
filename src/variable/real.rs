//! Bounded real-valued decision variable

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::VariableError;

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl Bounds {
    /// Create new bounds, rejecting `min > max` and non-finite limits
    pub fn new(min: f64, max: f64) -> Result<Self, VariableError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(VariableError::InvalidStructure(format!(
                "invalid bounds [{}, {}]",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Unit bounds [0, 1]
    pub fn unit() -> Self {
        Self { min: 0.0, max: 1.0 }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Check if a value is within bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value to be within bounds
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Real-valued variable constrained to its bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealVariable {
    value: f64,
    bounds: Bounds,
}

impl RealVariable {
    /// Create a variable at the midpoint of the bounds
    pub fn new(bounds: Bounds) -> Self {
        Self {
            value: bounds.min + bounds.range() / 2.0,
            bounds,
        }
    }

    /// Create a variable holding `value`, which must lie within the bounds
    pub fn with_value(value: f64, bounds: Bounds) -> Result<Self, VariableError> {
        let mut variable = Self::new(bounds);
        variable.set_value(value)?;
        Ok(variable)
    }

    /// Current value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Bounds of this variable
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Set the value, rejecting values outside the bounds
    pub fn set_value(&mut self, value: f64) -> Result<(), VariableError> {
        if !self.bounds.contains(value) {
            return Err(VariableError::OutOfRange {
                value,
                min: self.bounds.min,
                max: self.bounds.max,
            });
        }
        self.value = value;
        Ok(())
    }

    /// Set the value, clamping into the bounds
    pub(crate) fn set_clamped(&mut self, value: f64) {
        self.value = self.bounds.clamp(value);
    }

    /// Draw a uniform value within the bounds
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.value = if self.bounds.range() > 0.0 {
            rng.gen_range(self.bounds.min..=self.bounds.max)
        } else {
            self.bounds.min
        };
    }
}
