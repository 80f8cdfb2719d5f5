//! Heuristic policies for the CNF best-first solver
//!
//! A policy supplies the two capabilities the shared branching loop needs:
//! a cost estimate for a partial boolean assignment and the next variable
//! to branch on. The four variants trade generality for domain knowledge:
//! plain unsatisfied-clause counting, degree-weighted counting, MOM-style
//! dynamic ordering, and Jeroslow-Wang exponential scoring.

use crate::config::CnfHeuristic;
use crate::sat::cnf::literal_value;
use crate::sat::{Clause, CnfFormula};
use std::collections::HashMap;

/// Strategy interface for the CNF best-first search
pub trait CnfPolicy {
    fn name(&self) -> &'static str;

    /// Heuristic cost of a partial assignment (lower is closer to a
    /// satisfying assignment)
    fn cost(&self, formula: &CnfFormula, values: &[Option<bool>]) -> u64;

    /// Next variable to branch on; defaults to the lowest unassigned id
    fn select_variable(&self, formula: &CnfFormula, values: &[Option<bool>]) -> Option<i32> {
        first_unassigned(formula, values)
    }
}

impl CnfHeuristic {
    /// Instantiate the policy this configuration value names
    pub fn policy(self) -> Box<dyn CnfPolicy + Send + Sync> {
        match self {
            CnfHeuristic::CountUnsatisfied => Box::new(CountUnsatisfied),
            CnfHeuristic::Weighted => Box::new(Weighted),
            CnfHeuristic::Moms => Box::new(Moms),
            CnfHeuristic::JeroslowWang => Box::new(JeroslowWang),
        }
    }
}

fn first_unassigned(formula: &CnfFormula, values: &[Option<bool>]) -> Option<i32> {
    (1..=formula.variable_count() as i32).find(|&var| values[var as usize].is_none())
}

fn unassigned_vars(clause: &Clause, values: &[Option<bool>]) -> Vec<i32> {
    clause
        .literals
        .iter()
        .filter(|&&lit| literal_value(lit, values).is_none())
        .map(|lit| lit.abs())
        .collect()
}

/// Pick the highest-scoring variable deterministically (lowest id wins
/// ties), falling back to sequential order when nothing scored
fn best_scored(
    scores: HashMap<i32, f64>,
    formula: &CnfFormula,
    values: &[Option<bool>],
) -> Option<i32> {
    let mut best: Option<(i32, f64)> = None;
    for (var, score) in scores {
        best = match best {
            None => Some((var, score)),
            Some((bv, bs)) if score > bs || (score == bs && var < bv) => Some((var, score)),
            keep => keep,
        };
    }
    best.map(|(var, _)| var)
        .or_else(|| first_unassigned(formula, values))
}

/// Baseline: count clauses not yet satisfied
pub struct CountUnsatisfied;

impl CnfPolicy for CountUnsatisfied {
    fn name(&self) -> &'static str {
        "count-unsatisfied"
    }

    fn cost(&self, formula: &CnfFormula, values: &[Option<bool>]) -> u64 {
        formula
            .clauses
            .iter()
            .filter(|clause| !clause.evaluate(values).satisfied)
            .count() as u64
    }
}

/// Domain-weighted counting: an unsatisfied degree clause costs ten times
/// a geometry clause
pub struct Weighted;

impl CnfPolicy for Weighted {
    fn name(&self) -> &'static str {
        "weighted"
    }

    fn cost(&self, formula: &CnfFormula, values: &[Option<bool>]) -> u64 {
        formula
            .clauses
            .iter()
            .enumerate()
            .filter(|(_, clause)| !clause.evaluate(values).satisfied)
            .map(|(index, _)| if formula.is_degree_clause(index) { 10 } else { 1 })
            .sum()
    }
}

/// Maximum Occurrences in Minimum-length clauses: unit clauses are about
/// to be violated and dominate the cost; variable selection favors those
/// appearing most in short, unsatisfied clauses.
pub struct Moms;

impl CnfPolicy for Moms {
    fn name(&self) -> &'static str {
        "moms"
    }

    fn cost(&self, formula: &CnfFormula, values: &[Option<bool>]) -> u64 {
        let mut score = 0u64;
        for (index, clause) in formula.clauses.iter().enumerate() {
            let eval = clause.evaluate(values);
            if eval.satisfied {
                continue;
            }
            let mut weight = if formula.is_degree_clause(index) { 10 } else { 1 };
            if eval.unassigned == 1 {
                weight += 20;
            }
            score += weight;
        }
        score
    }

    fn select_variable(&self, formula: &CnfFormula, values: &[Option<bool>]) -> Option<i32> {
        let mut counts: HashMap<i32, f64> = HashMap::new();

        for (index, clause) in formula.clauses.iter().enumerate() {
            if clause.evaluate(values).satisfied {
                continue;
            }
            let vars = unassigned_vars(clause, values);

            let mut weight = if formula.is_degree_clause(index) { 5.0 } else { 1.0 };
            if vars.len() <= 2 {
                weight *= 5.0;
            }
            for var in vars {
                *counts.entry(var).or_insert(0.0) += weight;
            }
        }

        best_scored(counts, formula, values)
    }
}

/// Jeroslow-Wang: each unsatisfied clause contributes 2^(-unassigned), so
/// clauses on the verge of violation dominate both the cost and the
/// variable choice
pub struct JeroslowWang;

impl CnfPolicy for JeroslowWang {
    fn name(&self) -> &'static str {
        "jeroslow-wang"
    }

    fn cost(&self, formula: &CnfFormula, values: &[Option<bool>]) -> u64 {
        let mut score = 0.0f64;
        for (index, clause) in formula.clauses.iter().enumerate() {
            let eval = clause.evaluate(values);
            if eval.satisfied {
                continue;
            }
            let weight = if formula.is_degree_clause(index) { 10.0 } else { 1.0 };
            if eval.unassigned > 0 {
                score += weight * 20.0 * 0.5f64.powi(eval.unassigned as i32 - 1);
            } else {
                // Already falsified
                score += 1000.0;
            }
        }
        score as u64
    }

    fn select_variable(&self, formula: &CnfFormula, values: &[Option<bool>]) -> Option<i32> {
        let mut scores: HashMap<i32, f64> = HashMap::new();

        for (index, clause) in formula.clauses.iter().enumerate() {
            if clause.evaluate(values).satisfied {
                continue;
            }
            let vars = unassigned_vars(clause, values);
            if vars.is_empty() {
                continue;
            }

            let mut increment = 2.0f64.powi(-(vars.len() as i32));
            if formula.is_degree_clause(index) {
                increment *= 5.0;
            }
            for var in vars {
                *scores.entry(var).or_insert(0.0) += increment;
            }
        }

        best_scored(scores, formula, values)
    }
}
