//! *n*-qubit Pauli operators in the binary symplectic representation.
//!
//! An *n*-qubit Pauli string is encoded by two bit vectors `r` and `s`: bit
//! *i* of `r` is set iff qubit *i* carries an X or Y component, and bit *i*
//! of `s` is set iff it carries a Z or Y component. Commutation of two
//! operators then reduces to a GF(2) bilinear form on their bit vectors,
//! which is the workhorse of everything downstream.
//!
//! The overall phase is a power of *i* ([`Phase`]) and is stored internally
//! in the "X then Z" convention, where Y is represented as *i*XZ. The
//! conventional phase (with Y as a native operator) is recovered by
//! subtracting the number of Y components, i.e. the popcount of `r & s`,
//! modulo 4.
//!
//! Two representations are provided: [`Pauli`] packs each bit vector into a
//! single `u64` and is therefore limited to 64 qubits, while [`PauliD`]
//! stores u32 limbs and scales to any register size. Both expose the same
//! operation surface and implement [`PauliBits`], which is all the circuit
//! synthesis layer needs to see.

use std::{ fmt, str::FromStr };
use crate::phase::Phase;

/// Error returned when parsing a Pauli operator from a string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PauliError {
    /// Encountered a character outside `{I, X, Y, Z}` (after an optional
    /// `i`/`-i`/`-` phase prefix).
    #[error("invalid character '{0}' in Pauli string")]
    InvalidCharacter(char),

    /// The string describes more qubits than the packed representation can
    /// hold.
    #[error("operator on {0} qubits exceeds the 64-qubit packed limit")]
    TooManyQubits(usize),
}

/// Read-only view of the symplectic bit components of a Pauli operator.
///
/// This is the only surface the synthesis formulator consumes, so it can be
/// fed from either the packed or the dynamically sized representation.
pub trait PauliBits {
    /// Number of qubits the operator acts on.
    fn num_qubits(&self) -> usize;

    /// X component at `qubit`, as a GF(2) value.
    fn x(&self, qubit: usize) -> u8;

    /// Z component at `qubit`, as a GF(2) value.
    fn z(&self, qubit: usize) -> u8;
}

// Single-qubit Paulis indexed by x + 2z.
const PAULI_CHARS: [char; 4] = ['I', 'X', 'Z', 'Y'];

// Split an optional leading phase marker from the operator body, returning
// the phase as a power of i.
fn split_phase_prefix(string: &str) -> (i8, &str) {
    if let Some(rest) = string.strip_prefix("-i") {
        (3, rest)
    } else if let Some(rest) = string.strip_prefix('i') {
        (1, rest)
    } else if let Some(rest) = string.strip_prefix('-') {
        (2, rest)
    } else {
        (0, string)
    }
}

fn phase_prefix_str(phase: Phase) -> &'static str {
    match phase {
        Phase::Pi0 => "",
        Phase::Pi1h => "i",
        Phase::Pi => "-",
        Phase::Pi3h => "-i",
    }
}

/// An *n*-qubit Pauli operator, bit-packed into one `u64` per symplectic
/// component.
///
/// Limited to *n* ≤ 64; see [`PauliD`] for the general case.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pauli {
    r: u64,
    s: u64,
    n: usize,
    phase: Phase,
}

impl Pauli {
    /// Create an identity operator on `n` qubits.
    ///
    /// *Panics if `n` is greater than 64.*
    pub fn new(n: usize) -> Self {
        assert!(n <= 64, "packed Pauli operators hold at most 64 qubits");
        Self { r: 0, s: 0, n, phase: Phase::Pi0 }
    }

    /// Create an operator with a single X at `qubit`, e.g. `IIXII`.
    pub fn single_x(n: usize, qubit: usize) -> Self {
        let mut pauli = Self::new(n);
        pauli.set_x(qubit, 1);
        pauli
    }

    /// Create an operator with a single Z at `qubit`, e.g. `IIZII`.
    pub fn single_z(n: usize, qubit: usize) -> Self {
        let mut pauli = Self::new(n);
        pauli.set_z(qubit, 1);
        pauli
    }

    /// Number of qubits the operator acts on.
    pub fn num_qubits(&self) -> usize { self.n }

    /// X component at `qubit`, as a GF(2) value.
    pub fn x(&self, qubit: usize) -> u8 {
        debug_assert!(qubit < self.n);
        ((self.r >> qubit) & 1) as u8
    }

    /// Z component at `qubit`, as a GF(2) value.
    pub fn z(&self, qubit: usize) -> u8 {
        debug_assert!(qubit < self.n);
        ((self.s >> qubit) & 1) as u8
    }

    /// Set the X component at `qubit`; only the lowest bit of `value` is
    /// used.
    pub fn set_x(&mut self, qubit: usize, value: u8) -> &mut Self {
        debug_assert!(qubit < self.n);
        self.r = (self.r & !(1 << qubit)) | (u64::from(value & 1) << qubit);
        self
    }

    /// Set the Z component at `qubit`; only the lowest bit of `value` is
    /// used.
    pub fn set_z(&mut self, qubit: usize, value: u8) -> &mut Self {
        debug_assert!(qubit < self.n);
        self.s = (self.s & !(1 << qubit)) | (u64::from(value & 1) << qubit);
        self
    }

    // Phase accumulated by writing each Y as iXZ.
    fn y_phase(&self) -> Phase {
        Phase::from_int(((self.r & self.s).count_ones() & 3) as i8)
    }

    /// Phase of the operator with Y taken as a native Pauli (XZ = −*i*Y).
    pub fn phase(&self) -> Phase { self.phase - self.y_phase() }

    /// Phase of the operator with every Y written as *i*XZ.
    pub fn xz_phase(&self) -> Phase { self.phase }

    /// Advance the phase by `inc` powers of *i*.
    pub fn increase_phase(&mut self, inc: i8) -> &mut Self {
        self.phase += Phase::from_int(inc);
        self
    }

    /// Retract the phase by `dec` powers of *i*.
    pub fn decrease_phase(&mut self, dec: i8) -> &mut Self {
        self.phase -= Phase::from_int(dec);
        self
    }

    /// Number of non-identity single-qubit components.
    pub fn pauli_weight(&self) -> usize {
        (self.r | self.s).count_ones() as usize
    }

    /// Number of identity single-qubit components.
    pub fn identity_count(&self) -> usize { self.n - self.pauli_weight() }

    /// Raw X-component bit field, e.g. `XYZI` → `0b0011`.
    pub fn x_bits(&self) -> u64 { self.r }

    /// Raw Z-component bit field, e.g. `XYZI` → `0b0110`.
    pub fn z_bits(&self) -> u64 { self.s }

    /// Bit field with a 1 for every identity component, e.g. `XYZI` →
    /// `0b1000`.
    pub fn identity_bits(&self) -> u64 {
        let mask: u64
            = if self.n == 0 { 0 } else { u64::MAX >> (64 - self.n) };
        !(self.r | self.s) & mask
    }

    /// Commutator of two equal-length Pauli operators: 0 if they commute, 1
    /// if they anticommute.
    pub fn commutator(&self, other: &Self) -> u8 {
        debug_assert_eq!(self.n, other.n);
        (((self.r & other.s) ^ (other.r & self.s)).count_ones() & 1) as u8
    }
}

impl PauliBits for Pauli {
    fn num_qubits(&self) -> usize { self.num_qubits() }
    fn x(&self, qubit: usize) -> u8 { self.x(qubit) }
    fn z(&self, qubit: usize) -> u8 { self.z(qubit) }
}

impl FromStr for Pauli {
    type Err = PauliError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let (prefix, ops) = split_phase_prefix(string);
        if ops.len() > 64 { return Err(PauliError::TooManyQubits(ops.len())); }
        let mut pauli = Self::new(ops.len());
        for (i, c) in ops.chars().enumerate() {
            match c {
                'I' => { },
                'X' => { pauli.r |= 1 << i; },
                'Y' => { pauli.r |= 1 << i; pauli.s |= 1 << i; },
                'Z' => { pauli.s |= 1 << i; },
                _ => { return Err(PauliError::InvalidCharacter(c)); },
            }
        }
        pauli.phase = Phase::from_int(prefix) + pauli.y_phase();
        Ok(pauli)
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", phase_prefix_str(self.phase()))?;
        for i in 0..self.n {
            write!(f, "{}",
                PAULI_CHARS[(self.x(i) + 2 * self.z(i)) as usize])?;
        }
        Ok(())
    }
}

/// Like [`Pauli`], but not limited to 64 qubits.
///
/// The symplectic components are packed into u32 limbs, `(n >> 5) + 1` of
/// them per component.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PauliD {
    r: Vec<u32>,
    s: Vec<u32>,
    n: usize,
    phase: Phase,
}

impl PauliD {
    /// Create an identity operator on `n` qubits.
    pub fn new(n: usize) -> Self {
        let limbs: usize = (n >> 5) + 1;
        Self { r: vec![0; limbs], s: vec![0; limbs], n, phase: Phase::Pi0 }
    }

    /// Create an operator with a single X at `qubit`.
    pub fn single_x(n: usize, qubit: usize) -> Self {
        let mut pauli = Self::new(n);
        pauli.set_x(qubit, 1);
        pauli
    }

    /// Create an operator with a single Z at `qubit`.
    pub fn single_z(n: usize, qubit: usize) -> Self {
        let mut pauli = Self::new(n);
        pauli.set_z(qubit, 1);
        pauli
    }

    /// Number of qubits the operator acts on.
    pub fn num_qubits(&self) -> usize { self.n }

    /// X component at `qubit`, as a GF(2) value.
    pub fn x(&self, qubit: usize) -> u8 {
        debug_assert!(qubit < self.n);
        ((self.r[qubit >> 5] >> (qubit & 31)) & 1) as u8
    }

    /// Z component at `qubit`, as a GF(2) value.
    pub fn z(&self, qubit: usize) -> u8 {
        debug_assert!(qubit < self.n);
        ((self.s[qubit >> 5] >> (qubit & 31)) & 1) as u8
    }

    /// Set the X component at `qubit`; only the lowest bit of `value` is
    /// used.
    pub fn set_x(&mut self, qubit: usize, value: u8) -> &mut Self {
        debug_assert!(qubit < self.n);
        let limb = &mut self.r[qubit >> 5];
        *limb = (*limb & !(1 << (qubit & 31)))
            | (u32::from(value & 1) << (qubit & 31));
        self
    }

    /// Set the Z component at `qubit`; only the lowest bit of `value` is
    /// used.
    pub fn set_z(&mut self, qubit: usize, value: u8) -> &mut Self {
        debug_assert!(qubit < self.n);
        let limb = &mut self.s[qubit >> 5];
        *limb = (*limb & !(1 << (qubit & 31)))
            | (u32::from(value & 1) << (qubit & 31));
        self
    }

    fn y_phase(&self) -> Phase {
        let count: u32
            = self.r.iter().zip(self.s.iter())
            .map(|(ri, si)| (ri & si).count_ones())
            .sum();
        Phase::from_int((count & 3) as i8)
    }

    /// Phase of the operator with Y taken as a native Pauli (XZ = −*i*Y).
    pub fn phase(&self) -> Phase { self.phase - self.y_phase() }

    /// Phase of the operator with every Y written as *i*XZ.
    pub fn xz_phase(&self) -> Phase { self.phase }

    /// Advance the phase by `inc` powers of *i*.
    pub fn increase_phase(&mut self, inc: i8) -> &mut Self {
        self.phase += Phase::from_int(inc);
        self
    }

    /// Retract the phase by `dec` powers of *i*.
    pub fn decrease_phase(&mut self, dec: i8) -> &mut Self {
        self.phase -= Phase::from_int(dec);
        self
    }

    /// Number of non-identity single-qubit components.
    pub fn pauli_weight(&self) -> usize {
        self.r.iter().zip(self.s.iter())
            .map(|(ri, si)| (ri | si).count_ones() as usize)
            .sum()
    }

    /// Number of identity single-qubit components.
    pub fn identity_count(&self) -> usize { self.n - self.pauli_weight() }

    /// Commutator of two equal-length Pauli operators: 0 if they commute, 1
    /// if they anticommute.
    pub fn commutator(&self, other: &Self) -> u8 {
        debug_assert_eq!(self.n, other.n);
        let count: u32
            = self.r.iter().zip(self.s.iter())
            .zip(other.r.iter().zip(other.s.iter()))
            .map(|((r1, s1), (r2, s2))| ((r1 & s2) ^ (r2 & s1)).count_ones())
            .sum();
        (count & 1) as u8
    }
}

impl PauliBits for PauliD {
    fn num_qubits(&self) -> usize { self.num_qubits() }
    fn x(&self, qubit: usize) -> u8 { self.x(qubit) }
    fn z(&self, qubit: usize) -> u8 { self.z(qubit) }
}

impl FromStr for PauliD {
    type Err = PauliError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let (prefix, ops) = split_phase_prefix(string);
        let mut pauli = Self::new(ops.len());
        for (i, c) in ops.chars().enumerate() {
            match c {
                'I' => { },
                'X' => { pauli.set_x(i, 1); },
                'Y' => { pauli.set_x(i, 1); pauli.set_z(i, 1); },
                'Z' => { pauli.set_z(i, 1); },
                _ => { return Err(PauliError::InvalidCharacter(c)); },
            }
        }
        pauli.phase = Phase::from_int(prefix) + pauli.y_phase();
        Ok(pauli)
    }
}

impl fmt::Display for PauliD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", phase_prefix_str(self.phase()))?;
        for i in 0..self.n {
            write!(f, "{}",
                PAULI_CHARS[(self.x(i) + 2 * self.z(i)) as usize])?;
        }
        Ok(())
    }
}

impl From<&Pauli> for PauliD {
    fn from(pauli: &Pauli) -> Self {
        let mut out = Self::new(pauli.n);
        for i in 0..pauli.n {
            out.set_x(i, pauli.x(i));
            out.set_z(i, pauli.z(i));
        }
        out.phase = pauli.phase;
        out
    }
}

impl From<Pauli> for PauliD {
    fn from(pauli: Pauli) -> Self { Self::from(&pauli) }
}

impl TryFrom<&PauliD> for Pauli {
    type Error = PauliError;

    fn try_from(pauli: &PauliD) -> Result<Self, Self::Error> {
        if pauli.n > 64 { return Err(PauliError::TooManyQubits(pauli.n)); }
        let mut out = Self::new(pauli.n);
        for i in 0..pauli.n {
            out.set_x(i, pauli.x(i));
            out.set_z(i, pauli.z(i));
        }
        out.phase = pauli.phase;
        Ok(out)
    }
}
