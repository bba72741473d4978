//! Dominance comparators
//!
//! A comparator orders two solutions by dominance:
//!
//! - `Ordering::Less`: the first solution dominates the second
//! - `Ordering::Greater`: the second solution dominates the first
//! - `Ordering::Equal`: the solutions are mutually nondominated
//!
//! Comparisons fail with [`EvolutionError::TypeMismatch`] when the two
//! solutions disagree on objective senses or arities.

use std::cmp::Ordering;

use crate::error::{EvoResult, EvolutionError};
use crate::population::solution::{Solution, CROWDING_DISTANCE, RANK};

/// Dominance relation between two solutions
pub trait DominanceComparator: Send + Sync {
    /// Compare two solutions
    fn compare(&self, a: &Solution, b: &Solution) -> EvoResult<Ordering>;

    /// True if `a` dominates `b`
    fn dominates(&self, a: &Solution, b: &Solution) -> EvoResult<bool> {
        Ok(self.compare(a, b)? == Ordering::Less)
    }
}

impl<C: DominanceComparator + ?Sized> DominanceComparator for &C {
    fn compare(&self, a: &Solution, b: &Solution) -> EvoResult<Ordering> {
        (**self).compare(a, b)
    }
}

/// Combine two per-component verdicts into a dominance ordering
pub(crate) fn combine(a_better: bool, b_better: bool) -> Ordering {
    match (a_better, b_better) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn ensure_objective_arity(a: &Solution, b: &Solution) -> EvoResult<()> {
    if a.number_of_objectives() != b.number_of_objectives() {
        return Err(EvolutionError::type_mismatch(
            format!("{} objectives", a.number_of_objectives()),
            format!("{} objectives", b.number_of_objectives()),
        ));
    }
    Ok(())
}

/// Pareto dominance over objective values only
#[derive(Clone, Copy, Debug, Default)]
pub struct ParetoObjectiveComparator;

impl DominanceComparator for ParetoObjectiveComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> EvoResult<Ordering> {
        ensure_objective_arity(a, b)?;

        let mut a_better = false;
        let mut b_better = false;

        // Every pair is compared so a sense mismatch anywhere is reported.
        for (oa, ob) in a.objectives().iter().zip(b.objectives()) {
            match oa.compare(ob)? {
                Ordering::Less => a_better = true,
                Ordering::Greater => b_better = true,
                Ordering::Equal => {}
            }
        }

        Ok(combine(a_better, b_better))
    }
}

/// Orders solutions by aggregate constraint violation
///
/// A feasible solution dominates an infeasible one; between two infeasible
/// solutions the smaller total violation dominates.
#[derive(Clone, Copy, Debug, Default)]
pub struct AggregateConstraintComparator;

impl DominanceComparator for AggregateConstraintComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> EvoResult<Ordering> {
        if a.number_of_constraints() != b.number_of_constraints() {
            return Err(EvolutionError::type_mismatch(
                format!("{} constraints", a.number_of_constraints()),
                format!("{} constraints", b.number_of_constraints()),
            ));
        }

        let va = a.aggregate_violation();
        let vb = b.aggregate_violation();

        Ok(match (va == 0.0, vb == 0.0) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => va.partial_cmp(&vb).unwrap_or(Ordering::Equal),
        })
    }
}

/// Constraint-aware Pareto dominance
///
/// Constraint violation is compared first; objectives break the tie.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParetoDominanceComparator;

impl DominanceComparator for ParetoDominanceComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> EvoResult<Ordering> {
        ChainedComparator::new(AggregateConstraintComparator, ParetoObjectiveComparator)
            .compare(a, b)
    }
}

/// Lower nondominated rank is better; unranked solutions rank last
#[derive(Clone, Copy, Debug, Default)]
pub struct RankComparator;

impl DominanceComparator for RankComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> EvoResult<Ordering> {
        let ra = a.attribute(RANK).unwrap_or(f64::INFINITY);
        let rb = b.attribute(RANK).unwrap_or(f64::INFINITY);
        Ok(ra.partial_cmp(&rb).unwrap_or(Ordering::Equal))
    }
}

/// Larger crowding distance is better; missing distances count as zero
#[derive(Clone, Copy, Debug, Default)]
pub struct CrowdingComparator;

impl DominanceComparator for CrowdingComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> EvoResult<Ordering> {
        let ca = a.attribute(CROWDING_DISTANCE).unwrap_or(0.0);
        let cb = b.attribute(CROWDING_DISTANCE).unwrap_or(0.0);
        Ok(cb.partial_cmp(&ca).unwrap_or(Ordering::Equal))
    }
}

/// Applies `first`, falling back to `second` when `first` ties
#[derive(Clone, Copy, Debug, Default)]
pub struct ChainedComparator<A, B> {
    first: A,
    second: B,
}

impl<A, B> ChainedComparator<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> DominanceComparator for ChainedComparator<A, B>
where
    A: DominanceComparator,
    B: DominanceComparator,
{
    fn compare(&self, a: &Solution, b: &Solution) -> EvoResult<Ordering> {
        match self.first.compare(a, b)? {
            Ordering::Equal => self.second.compare(a, b),
            decided => Ok(decided),
        }
    }
}

/// Rank then crowding distance, as produced by nondominated sorting
pub type NondominatedSortingComparator = ChainedComparator<RankComparator, CrowdingComparator>;

impl NondominatedSortingComparator {
    /// Rank first, crowding distance second
    pub fn rank_and_crowding() -> Self {
        ChainedComparator::new(RankComparator, CrowdingComparator)
    }
}
