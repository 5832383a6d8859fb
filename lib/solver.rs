//! Thin modeling facade over the external mixed-integer solver.
//!
//! The synthesis layer needs a small slice of a MILP modeling surface:
//! binary and bounded-integer decision variables, linear equality
//! constraints, a quadratic equality constraint over pairs of binaries, a
//! zero objective, and value readback after a feasible solve. [`Model`]
//! provides exactly that slice on top of [`microlp`], keeping the solver
//! dependency confined to this module.
//!
//! The backend is linear, so the quadratic capability is realized by exact
//! product linearization: every product u·v of binary variables is replaced
//! by a fresh binary y with y ≤ u, y ≤ v, and y ≥ u + v − 1, which pins y to
//! u·v for all four corner assignments. The quadratic constraint is
//! therefore only available for binary operands.
//!
//! Every model is built fresh for one solve and owns all of its state;
//! nothing is shared between solves.

use std::fmt;
use microlp::{ ComparisonOp, Error as MilpError, OptimizationDirection, Problem, Solution };
use rustc_hash::FxHashSet;

pub use microlp::Variable;

/// Result of running a solve on a [`Model`].
pub enum SolveOutcome {
    /// The solver found a feasible (and, under the zero objective, optimal)
    /// assignment.
    Optimal(Assignment),
    /// The constraint system admits no assignment; the legitimate negative
    /// outcome.
    Infeasible,
    /// The solver itself failed.
    Failed(String),
}

impl fmt::Debug for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optimal(..) => write!(f, "Optimal(..)"),
            Self::Infeasible => write!(f, "Infeasible"),
            Self::Failed(message) => write!(f, "Failed({:?})", message),
        }
    }
}

/// Variable values of a feasible solve.
pub struct Assignment {
    solution: Solution,
}

impl Assignment {
    /// Value assigned to `var`.
    ///
    /// Integer and binary variables are reported as floats and should be
    /// rounded by the caller.
    pub fn value(&self, var: Variable) -> f64 { self.solution[var] }
}

/// A feasibility model: decision variables and constraints under a zero
/// minimization objective.
pub struct Model {
    problem: Problem,
    binaries: FxHashSet<Variable>,
}

impl Default for Model {
    fn default() -> Self { Self::new() }
}

impl Model {
    /// Create a new, empty model.
    pub fn new() -> Self {
        Self {
            problem: Problem::new(OptimizationDirection::Minimize),
            binaries: FxHashSet::default(),
        }
    }

    /// Add a binary decision variable.
    pub fn add_binary(&mut self) -> Variable {
        let var = self.problem.add_binary_var(0.0);
        self.binaries.insert(var);
        var
    }

    /// Add an integer decision variable with inclusive bounds.
    pub fn add_integer(&mut self, lo: i32, hi: i32) -> Variable {
        self.problem.add_integer_var(0.0, (lo, hi))
    }

    /// Constrain `Σ coeff·var == rhs`.
    pub fn add_linear_eq(&mut self, terms: &[(Variable, f64)], rhs: f64) {
        self.problem.add_constraint(terms, ComparisonOp::Eq, rhs);
    }

    /// Constrain `Σ u·v == rhs` over pairs of *binary* variables.
    ///
    /// *Panics if any operand is not a binary variable of this model.*
    pub fn add_quadratic_eq(
        &mut self,
        products: &[(Variable, Variable)],
        rhs: f64,
    ) {
        let mut sum: Vec<(Variable, f64)> = Vec::with_capacity(products.len());
        for &(u, v) in products {
            assert!(
                self.binaries.contains(&u) && self.binaries.contains(&v),
                "quadratic constraints only support products of binaries",
            );
            if u == v {
                // u² = u for binary u
                sum.push((u, 1.0));
                continue;
            }
            let y = self.add_binary();
            self.problem.add_constraint(
                &[(y, 1.0), (u, -1.0)][..], ComparisonOp::Le, 0.0);
            self.problem.add_constraint(
                &[(y, 1.0), (v, -1.0)][..], ComparisonOp::Le, 0.0);
            self.problem.add_constraint(
                &[(y, 1.0), (u, -1.0), (v, -1.0)][..], ComparisonOp::Ge, -1.0);
            sum.push((y, 1.0));
        }
        self.problem.add_constraint(sum, ComparisonOp::Eq, rhs);
    }

    /// Run the solve.
    pub fn solve(&self) -> SolveOutcome {
        match self.problem.solve() {
            Ok(solution) => SolveOutcome::Optimal(Assignment { solution }),
            Err(MilpError::Infeasible) => SolveOutcome::Infeasible,
            Err(err) => SolveOutcome::Failed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rounded(assignment: &Assignment, var: Variable) -> i64 {
        assignment.value(var).round() as i64
    }

    #[test]
    fn feasible_binary_system() {
        let mut model = Model::new();
        let x = model.add_binary();
        let y = model.add_binary();
        model.add_linear_eq(&[(x, 1.0), (y, 1.0)], 1.0);
        match model.solve() {
            SolveOutcome::Optimal(sol) => {
                assert_eq!(rounded(&sol, x) + rounded(&sol, y), 1);
            },
            outcome => panic!("expected a solution, got {:?}", outcome),
        }
    }

    #[test]
    fn infeasible_binary_system() {
        let mut model = Model::new();
        let x = model.add_binary();
        let y = model.add_binary();
        model.add_linear_eq(&[(x, 1.0), (y, 1.0)], 3.0);
        assert!(matches!(model.solve(), SolveOutcome::Infeasible));
    }

    #[test]
    fn quadratic_products_are_exact() {
        // ab + cd = 1 with a = b = 1 forces cd = 0
        let mut model = Model::new();
        let a = model.add_binary();
        let b = model.add_binary();
        let c = model.add_binary();
        let d = model.add_binary();
        model.add_quadratic_eq(&[(a, b), (c, d)], 1.0);
        model.add_linear_eq(&[(a, 1.0)], 1.0);
        model.add_linear_eq(&[(b, 1.0)], 1.0);
        match model.solve() {
            SolveOutcome::Optimal(sol) => {
                assert_eq!(rounded(&sol, c) * rounded(&sol, d), 0);
            },
            outcome => panic!("expected a solution, got {:?}", outcome),
        }

        // ...and all four set to 1 is contradictory
        let mut model = Model::new();
        let vars: Vec<Variable> = (0..4).map(|_| model.add_binary()).collect();
        model.add_quadratic_eq(&[(vars[0], vars[1]), (vars[2], vars[3])], 1.0);
        for var in vars {
            model.add_linear_eq(&[(var, 1.0)], 1.0);
        }
        assert!(matches!(model.solve(), SolveOutcome::Infeasible));
    }

    #[test]
    fn squared_binary() {
        let mut model = Model::new();
        let u = model.add_binary();
        model.add_quadratic_eq(&[(u, u)], 1.0);
        match model.solve() {
            SolveOutcome::Optimal(sol) => { assert_eq!(rounded(&sol, u), 1); },
            outcome => panic!("expected a solution, got {:?}", outcome),
        }
    }

    #[test]
    fn evenness_via_integer_slack() {
        // 0.5 (x1 + x2) = k with x1 = 1 forces x2 = 1
        let mut model = Model::new();
        let x1 = model.add_binary();
        let x2 = model.add_binary();
        let k = model.add_integer(-2, 2);
        model.add_linear_eq(&[(x1, 0.5), (x2, 0.5), (k, -1.0)], 0.0);
        model.add_linear_eq(&[(x1, 1.0)], 1.0);
        match model.solve() {
            SolveOutcome::Optimal(sol) => { assert_eq!(rounded(&sol, x2), 1); },
            outcome => panic!("expected a solution, got {:?}", outcome),
        }
    }
}
