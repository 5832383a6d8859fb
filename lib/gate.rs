//! Single-qubit Clifford gates described by their action on the symplectic
//! (X, Z) components of a Pauli operator.
//!
//! Up to Pauli factors and global phase, a single-qubit Clifford is fixed by
//! a 2×2 matrix over GF(2) mapping (x, z) ↦ (axx·x + axz·z, azx·x + azz·z),
//! subject to invertibility. There are exactly six such matrices, one per
//! single-qubit symplectic class.

use std::fmt;

/// Action of a single-qubit Clifford on the (X, Z) components of a Pauli,
/// as a 2×2 binary matrix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocalGate {
    pub axx: u8,
    pub axz: u8,
    pub azx: u8,
    pub azz: u8,
}

impl LocalGate {
    /// Identity.
    pub const I: Self = Self { axx: 1, axz: 0, azx: 0, azz: 1 };

    /// Hadamard: swaps the X and Z roles.
    pub const H: Self = Self { axx: 0, axz: 1, azx: 1, azz: 0 };

    /// Phase gate: X ↦ Y, Z ↦ Z.
    pub const S: Self = Self { axx: 1, axz: 0, azx: 1, azz: 1 };

    /// H after S: X ↦ Y, Z ↦ X.
    pub const HS: Self = Self { axx: 1, axz: 1, azx: 1, azz: 0 };

    /// S after H: X ↦ Z, Z ↦ Y.
    pub const SH: Self = Self { axx: 0, axz: 1, azx: 1, azz: 1 };

    /// H·S·H: X ↦ X, Z ↦ Y.
    pub const HSH: Self = Self { axx: 1, axz: 1, azx: 0, azz: 1 };

    /// Build a gate from its four matrix entries; only the lowest bit of
    /// each value is used.
    pub fn new(axx: u8, axz: u8, azx: u8, azz: u8) -> Self {
        Self { axx: axx & 1, axz: axz & 1, azx: azx & 1, azz: azz & 1 }
    }

    /// Return `true` if the matrix is invertible over GF(2), i.e.
    /// axx·azz + axz·azx ≡ 1 (mod 2).
    pub fn is_symplectic(&self) -> bool {
        (self.axx & self.azz) ^ (self.axz & self.azx) == 1
    }

    /// Name of the symplectic class, if the gate is one of the six valid
    /// matrices.
    pub fn name(&self) -> Option<&'static str> {
        match *self {
            Self::I => Some("I"),
            Self::H => Some("H"),
            Self::S => Some("S"),
            Self::HS => Some("HS"),
            Self::SH => Some("SH"),
            Self::HSH => Some("HSH"),
            _ => None,
        }
    }
}

impl fmt::Display for LocalGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{} {}]", self.axx, self.axz)?;
        write!(f, "[{} {}]", self.azx, self.azz)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn six_classes_are_symplectic() {
        let gates
            = [LocalGate::I, LocalGate::H, LocalGate::S,
            LocalGate::HS, LocalGate::SH, LocalGate::HSH];
        for gate in gates {
            assert!(gate.is_symplectic(), "{:?}", gate);
            assert!(gate.name().is_some());
        }
    }

    #[test]
    fn degenerate_matrices_are_not() {
        assert!(!LocalGate::new(0, 0, 0, 0).is_symplectic());
        assert!(!LocalGate::new(1, 1, 1, 1).is_symplectic());
        assert!(!LocalGate::new(1, 0, 1, 0).is_symplectic());
        assert_eq!(LocalGate::new(1, 1, 1, 1).name(), None);
    }

    #[test]
    fn masks_entry_values() {
        assert_eq!(LocalGate::new(3, 3, 2, 1), LocalGate::HSH);
    }

    #[test]
    fn renders_as_matrix() {
        assert_eq!(LocalGate::H.to_string(), "[0 1]\n[1 0]");
    }
}
