//! Tools for synthesizing per-qubit Clifford corrections that rotate a
//! stabilizer state onto a target graph state.
//!
//! The synthesis pipeline encodes Pauli operators in the binary symplectic
//! representation, states the rotation conditions as symbolic mod-2
//! equations over the unknown entries of per-qubit symplectic matrices, and
//! hands the resulting system to a mixed-integer solver; a feasible
//! assignment decodes into one single-qubit Clifford per qubit. See
//! [`synth`] for the entry points.

pub mod phase;
pub mod pauli;
pub mod symbolic;
pub mod gate;
pub mod graph;
pub mod graphd;
pub mod solver;
pub mod synth;
