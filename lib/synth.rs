//! Synthesis of single-qubit Clifford layers rotating a stabilizer onto a
//! graph state.
//!
//! Given a stabilizer generating set and a target graph, the synthesis
//! problem asks for one single-qubit Clifford per qubit (a [`LocalGate`])
//! such that the transformed generators stabilize the graph state ∣Γ⟩. With
//! R and S the n×m X- and Z-component bit matrices of the generators
//! (R[i, j] = x-component of generator j at qubit i), A the adjacency
//! matrix, and Axx, Axz, Azx, Azz the diagonal matrices of per-qubit gate
//! entries, the defining equation system is
//!
//! > A·(Axx·R + Axz·S) + Azx·R + Azz·S ≡ 0 (mod 2),
//!
//! entry by entry, together with the per-qubit invertibility condition
//! axx·azz + axz·azx ≡ 1 (mod 2). The gate entries are the unknowns, so the
//! system is built symbolically (see [`symbolic`][crate::symbolic]), each
//! entry is simplified to a linear term, and the mod-2 equations are handed
//! to the mixed-integer solver by requiring half of each left-hand side to
//! equal a free integer, which holds iff the side is even. The quadratic
//! condition goes to the solver as-is, one constraint per qubit.
//!
//! Such a layer exists iff the stabilizer state is local-Clifford
//! equivalent to ∣Γ⟩, which is the core subproblem in the construction of
//! hardware-tailored readout circuits; see [arXiv:2203.03646][ht] for the
//! surrounding scheme.
//!
//! [ht]: https://arxiv.org/abs/2203.03646

use nalgebra as na;
use tracing::{ debug, trace };
use crate::{
    gate::LocalGate,
    graph::Graph,
    graphd::GraphD,
    pauli::PauliBits,
    solver::{ Model, SolveOutcome, Variable },
    symbolic::{ symbol_diag, Block, Expr },
};

/// Error returned by the synthesis entry points.
///
/// An infeasible instance is *not* an error (it is reported as `Ok(None)`),
/// but an internal failure of the solver collaborator is surfaced here
/// rather than being collapsed into the negative result.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    /// A generator acts on a different number of qubits than the graph has
    /// vertices.
    #[error("generator {index} acts on {found} qubits, expected {expected}")]
    SizeMismatch { index: usize, expected: usize, found: usize },

    /// The external solver failed during model construction or solve.
    #[error("solver failure: {0}")]
    Solver(String),
}

/// Find a local Clifford layer (if one exists) rotating the state
/// stabilized by `stabilizer` into the graph state described by `graph`.
///
/// Returns `Ok(None)` if no such layer exists. Statically sized variant of
/// [`find_ht_circuit_d`]; both share one implementation and agree on every
/// input.
pub fn find_ht_circuit<P, const N: usize>(
    graph: &Graph<N>,
    stabilizer: &[P],
) -> Result<Option<[LocalGate; N]>, SynthesisError>
where P: PauliBits
{
    let adj: na::DMatrix<bool>
        = na::DMatrix::from_fn(N, N, |i, j| graph.adjacency()[i][j]);
    let layer = find_ht_circuit_core(N, &adj, stabilizer)?;
    Ok(layer.map(|gates| {
        gates.try_into().expect("solver layer length mismatch")
    }))
}

/// Find a local Clifford layer (if one exists) rotating the state
/// stabilized by `stabilizer` into the graph state described by `graph`.
///
/// Returns `Ok(None)` if no such layer exists. Runtime-sized variant of
/// [`find_ht_circuit`].
pub fn find_ht_circuit_d<P>(
    graph: &GraphD,
    stabilizer: &[P],
) -> Result<Option<Vec<LocalGate>>, SynthesisError>
where P: PauliBits
{
    find_ht_circuit_core(graph.num_vertices(), graph.adjacency(), stabilizer)
}

#[allow(non_snake_case)]
fn find_ht_circuit_core<P>(
    n: usize,
    adj: &na::DMatrix<bool>,
    stabilizer: &[P],
) -> Result<Option<Vec<LocalGate>>, SynthesisError>
where P: PauliBits
{
    for (index, op) in stabilizer.iter().enumerate() {
        if op.num_qubits() != n {
            return Err(SynthesisError::SizeMismatch {
                index,
                expected: n,
                found: op.num_qubits(),
            });
        }
    }
    if n == 0 { return Ok(Some(Vec::new())); }
    let m = stabilizer.len();

    // bit matrices of the generators, lifted into the symbolic domain
    let R: na::DMatrix<Expr>
        = na::DMatrix::from_fn(n, m, |i, j| {
            Expr::from(i64::from(stabilizer[j].x(i)))
        });
    let S: na::DMatrix<Expr>
        = na::DMatrix::from_fn(n, m, |i, j| {
            Expr::from(i64::from(stabilizer[j].z(i)))
        });
    let A: na::DMatrix<Expr> = adj.map(|edge| Expr::from(i64::from(edge)));

    // diagonal matrices of unknowns, one per symplectic block
    let Axx = symbol_diag(n, Block::Xx);
    let Axz = symbol_diag(n, Block::Xz);
    let Azx = symbol_diag(n, Block::Zx);
    let Azz = symbol_diag(n, Block::Zz);

    let lhs = &A * (&Axx * &R + &Axz * &S) + &Azx * &R + &Azz * &S;
    debug!("synthesizing over {} qubits, {} generators", n, m);
    trace!("R =\n{}", R);
    trace!("S =\n{}", S);

    let mut model = Model::new();

    // per-qubit gate unknowns and the symplectic condition
    // axx·azz + axz·azx = 1
    let mut vars: Vec<[Variable; 4]> = Vec::with_capacity(n);
    for _ in 0..n {
        let axx = model.add_binary();
        let axz = model.add_binary();
        let azx = model.add_binary();
        let azz = model.add_binary();
        model.add_quadratic_eq(&[(axx, azz), (axz, azx)], 1.0);
        vars.push([axx, axz, azx, azz]);
    }

    // one equation per (qubit, generator) pair: lhs[(i, j)] must be even,
    // i.e. half of it must equal an integer slack
    for j in 0..m {
        for i in 0..n {
            let term = lhs[(i, j)].simplified();
            assert!(
                term.is_linear(),
                "equation ({}, {}) is not linear in the gate unknowns: {}",
                i, j, term,
            );
            trace!("equation ({}, {}): {} = 0 (mod 2)", i, j, term);
            let mut coeffs: Vec<(Variable, f64)>
                = term.linear.iter()
                .map(|(var, coeff)| {
                    (vars[var.qubit][var.block.index()], 0.5 * *coeff as f64)
                })
                .collect();
            let mass: i64
                = term.constant.abs()
                + term.linear.values().map(|coeff| coeff.abs()).sum::<i64>();
            let bound = (mass / 2 + 1) as i32;
            let slack = model.add_integer(-bound, bound);
            coeffs.push((slack, -1.0));
            model.add_linear_eq(&coeffs, -0.5 * term.constant as f64);
        }
    }

    match model.solve() {
        SolveOutcome::Infeasible => {
            debug!("no local Clifford layer exists");
            Ok(None)
        },
        SolveOutcome::Failed(message) => {
            debug!("solver failed: {}", message);
            Err(SynthesisError::Solver(message))
        },
        SolveOutcome::Optimal(assignment) => {
            let layer: Vec<LocalGate>
                = vars.iter()
                .map(|quad| {
                    LocalGate::new(
                        assignment.value(quad[0]).round() as u8,
                        assignment.value(quad[1]).round() as u8,
                        assignment.value(quad[2]).round() as u8,
                        assignment.value(quad[3]).round() as u8,
                    )
                })
                .collect();
            debug_assert!(layer.iter().all(LocalGate::is_symplectic));
            Ok(Some(layer))
        },
    }
}

#[cfg(test)]
mod test {
    use crate::pauli::Pauli;
    use super::*;

    fn paulis(strings: &[&str]) -> Vec<Pauli> {
        strings.iter().map(|s| s.parse().unwrap()).collect()
    }

    // direct mod-2 evaluation of the defining equation system
    fn satisfies<P>(graph: &GraphD, stabilizer: &[P], layer: &[LocalGate])
        -> bool
    where P: PauliBits
    {
        let n = graph.num_vertices();
        for op in stabilizer.iter() {
            for i in 0..n {
                let mut total: u32 = 0;
                for k in 0..n {
                    if graph.has_edge(i, k) {
                        total += u32::from(
                            layer[k].axx * op.x(k) + layer[k].axz * op.z(k));
                    }
                }
                total += u32::from(
                    layer[i].azx * op.x(i) + layer[i].azz * op.z(i));
                if total % 2 != 0 { return false; }
            }
        }
        true
    }

    fn all_symplectic(layer: &[LocalGate]) -> bool {
        layer.iter().all(LocalGate::is_symplectic)
    }

    #[test]
    fn empty_graph_trivial_stabilizer() {
        let graph = GraphD::new(2);
        let stabilizer = paulis(&["XI", "IX"]);
        let layer = find_ht_circuit_d(&graph, &stabilizer).unwrap()
            .expect("expected a solution");
        assert!(all_symplectic(&layer));
        assert!(satisfies(&graph, &stabilizer, &layer));
    }

    #[test]
    fn canonical_generators_admit_identity() {
        let graph = GraphD::linear(2);
        let stabilizer = paulis(&["XZ", "ZX"]);
        let layer = find_ht_circuit_d(&graph, &stabilizer).unwrap()
            .expect("expected a solution");
        assert!(all_symplectic(&layer));
        assert!(satisfies(&graph, &stabilizer, &layer));
        // the identity layer is itself a witness
        assert!(satisfies(&graph, &stabilizer, &[LocalGate::I, LocalGate::I]));
    }

    #[test]
    fn hadamard_conjugated_star_generators() {
        // the canonical generators of the 3-star, conjugated by H on qubit
        // 1: the layer must swap the X/Z roles there
        let graph = GraphD::star(3, 0);
        let stabilizer = paulis(&["XXZ", "ZZI", "ZIX"]);
        let layer = find_ht_circuit_d(&graph, &stabilizer).unwrap()
            .expect("expected a solution");
        assert!(all_symplectic(&layer));
        assert!(satisfies(&graph, &stabilizer, &layer));
        assert_eq!(layer[1].axz, 1);
        assert_eq!(layer[1].azx, 1);
        assert_eq!(layer[1].azz, 0);
    }

    #[test]
    fn entangled_stabilizer_of_product_target_is_infeasible() {
        // a Bell pair is not local-Clifford equivalent to ∣++⟩
        let graph = GraphD::new(2);
        let stabilizer = paulis(&["XX", "ZZ"]);
        assert_eq!(find_ht_circuit_d(&graph, &stabilizer), Ok(None));
    }

    #[test]
    fn own_stabilizers_are_always_feasible() {
        for graph in [
            GraphD::cycle(4),
            GraphD::complete(4),
            GraphD::pusteblume(5),
        ] {
            let stabilizer = graph.stabilizers();
            let layer = find_ht_circuit_d(&graph, &stabilizer).unwrap()
                .expect("expected a solution");
            assert!(all_symplectic(&layer));
            assert!(satisfies(&graph, &stabilizer, &layer));
        }
    }

    #[test]
    fn fixed_and_dynamic_agree() {
        // feasible instance
        let stabilizer = paulis(&["XXZ", "ZZI", "ZIX"]);
        let fixed = find_ht_circuit(&Graph::<3>::star(0), &stabilizer)
            .unwrap();
        let graph_d = GraphD::star(3, 0);
        let dynamic = find_ht_circuit_d(&graph_d, &stabilizer).unwrap();
        let fixed = fixed.expect("expected a solution");
        let dynamic = dynamic.expect("expected a solution");
        assert!(satisfies(&graph_d, &stabilizer, &fixed));
        assert!(satisfies(&graph_d, &stabilizer, &dynamic));

        // infeasible instance
        let stabilizer = paulis(&["XX", "ZZ"]);
        assert_eq!(
            find_ht_circuit(&Graph::<2>::new(), &stabilizer),
            Ok(None),
        );
        assert_eq!(
            find_ht_circuit_d(&GraphD::new(2), &stabilizer),
            Ok(None),
        );
    }

    #[test]
    fn underdetermined_generator_set() {
        // fewer generators than qubits only relaxes the system
        let graph = GraphD::new(2);
        let stabilizer = paulis(&["XI"]);
        let layer = find_ht_circuit_d(&graph, &stabilizer).unwrap()
            .expect("expected a solution");
        assert!(all_symplectic(&layer));
        assert!(satisfies(&graph, &stabilizer, &layer));
    }

    #[test]
    fn empty_generator_set() {
        let layer = find_ht_circuit_d::<Pauli>(&GraphD::new(3), &[]).unwrap()
            .expect("expected a solution");
        assert_eq!(layer.len(), 3);
        assert!(all_symplectic(&layer));
    }

    #[test]
    fn dynamic_paulis_as_input() {
        let graph = GraphD::pusteblume(5);
        let stabilizer = graph.stabilizers(); // Vec<PauliD>
        let layer = find_ht_circuit_d(&graph, &stabilizer).unwrap()
            .expect("expected a solution");
        assert!(satisfies(&graph, &stabilizer, &layer));
    }

    #[test]
    fn rejects_mismatched_generator_length() {
        let graph = GraphD::new(3);
        let stabilizer = paulis(&["XII", "XX"]);
        assert_eq!(
            find_ht_circuit_d(&graph, &stabilizer),
            Err(SynthesisError::SizeMismatch {
                index: 1,
                expected: 3,
                found: 2,
            }),
        );
    }
}
