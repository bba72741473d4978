//! Test problems shared by the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use moea_islands::prelude::*;

/// Schaffer's problem: minimize x² and (x - 2)² for x in [-10, 10]
///
/// The Pareto set is x in [0, 2].
pub struct Schaffer;

impl Problem for Schaffer {
    fn name(&self) -> &str {
        "Schaffer"
    }

    fn number_of_variables(&self) -> usize {
        1
    }

    fn number_of_objectives(&self) -> usize {
        2
    }

    fn number_of_constraints(&self) -> usize {
        0
    }

    fn evaluate(&self, solution: &mut Solution) -> EvoResult<()> {
        let x = solution.variables[0]
            .as_real()
            .map(RealVariable::value)
            .ok_or_else(|| {
                EvolutionError::UnsupportedOperation("expected a real variable".to_string())
            })?;
        solution.set_objectives(&[x * x, (x - 2.0) * (x - 2.0)])
    }

    fn new_solution(&self) -> Solution {
        let bounds = Bounds::new(-10.0, 10.0).expect("valid bounds");
        Solution::new(
            vec![RealVariable::new(bounds).into()],
            vec![Objective::minimize(), Objective::minimize()],
            0,
        )
    }
}

/// Bit string problem trading ones against leading zeros
///
/// Minimizes the number of zeros and the number of leading ones.
pub struct LeadingOnesTradeoff {
    pub length: usize,
}

impl Problem for LeadingOnesTradeoff {
    fn name(&self) -> &str {
        "LeadingOnesTradeoff"
    }

    fn number_of_variables(&self) -> usize {
        1
    }

    fn number_of_objectives(&self) -> usize {
        2
    }

    fn number_of_constraints(&self) -> usize {
        0
    }

    fn evaluate(&self, solution: &mut Solution) -> EvoResult<()> {
        let (zeros, leading_ones) = match solution.variables[0].as_binary() {
            Some(bits) => (
                bits.count_zeros(),
                bits.bits().iter().take_while(|&&bit| bit).count(),
            ),
            None => {
                return Err(EvolutionError::UnsupportedOperation(
                    "expected a binary variable".to_string(),
                ))
            }
        };
        solution.set_objectives(&[zeros as f64, leading_ones as f64])
    }

    fn new_solution(&self) -> Solution {
        Solution::new(
            vec![BitString::zeros(self.length).into()],
            vec![Objective::minimize(), Objective::minimize()],
            0,
        )
    }
}

pub type RealVariation = CompoundVariation<Sbx, PolynomialMutation>;

pub fn real_variation() -> RealVariation {
    CompoundVariation::new(
        Sbx::new(0.9, 15.0).expect("valid SBX"),
        PolynomialMutation::new(1.0, 20.0).expect("valid PM"),
    )
    .expect("valid pipeline")
}

pub fn schaffer_nsga2(population_size: usize, seed: u64) -> Nsga2<RealVariation> {
    Nsga2::builder()
        .population_size(population_size)
        .seed(seed)
        .problem(Arc::new(Schaffer))
        .variation(real_variation())
        .build()
        .expect("valid NSGA-II")
}
