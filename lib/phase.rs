//! The overall phase of a Pauli operator, limited to integer powers of the
//! complex unit *i*.

use std::{
    fmt,
    ops::{ Neg, Add, AddAssign, Sub, SubAssign },
};
use num_complex::Complex64 as C64;

/// A complex phase factor *i*<sup>*k*</sup>, *k* ∈ {0, 1, 2, 3}.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// +1
    #[default]
    Pi0,
    /// +*i* (π/2)
    Pi1h,
    /// –1 (π)
    Pi,
    /// –*i* (3π/2)
    Pi3h,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Pi0 => write!(f, "+1"),
            Self::Pi1h => write!(f, "+i"),
            Self::Pi => write!(f, "-1"),
            Self::Pi3h => write!(f, "-i"),
        }
    }
}

impl Phase {
    /// Convert to the bare power of *i*.
    pub fn to_int(self) -> i8 {
        match self {
            Self::Pi0  => 0,
            Self::Pi1h => 1,
            Self::Pi   => 2,
            Self::Pi3h => 3,
        }
    }

    /// Convert from a bare power of *i* (modulo 4).
    pub fn from_int(i: i8) -> Self {
        match i.rem_euclid(4) {
            0 => Self::Pi0,
            1 => Self::Pi1h,
            2 => Self::Pi,
            3 => Self::Pi3h,
            _ => unreachable!(),
        }
    }

    pub fn as_complex(self) -> C64 {
        match self {
            Self::Pi0  => 1.0_f64.into(),
            Self::Pi1h => C64::i(),
            Self::Pi   => (-1.0_f64).into(),
            Self::Pi3h => -C64::i(),
        }
    }
}

impl Neg for Phase {
    type Output = Self;

    fn neg(self) -> Self::Output { Self::from_int(-self.to_int()) }
}

macro_rules! impl_phase_math {
    (
        $trait:ident,
        $trait_fn:ident,
        $trait_assign:ident,
        $trait_assign_fn:ident,
        $op:tt
    ) => {
        impl $trait for Phase {
            type Output = Self;

            fn $trait_fn(self, rhs: Self) -> Self::Output {
                Self::from_int(self.to_int() $op rhs.to_int())
            }
        }

        impl $trait_assign for Phase {
            fn $trait_assign_fn(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }
    }
}
impl_phase_math!(Add, add, AddAssign, add_assign, +);
impl_phase_math!(Sub, sub, SubAssign, sub_assign, -);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn phase_arithmetic() {
        assert_eq!(Phase::Pi1h + Phase::Pi3h, Phase::Pi0);
        assert_eq!(Phase::Pi + Phase::Pi, Phase::Pi0);
        assert_eq!(Phase::Pi0 - Phase::Pi1h, Phase::Pi3h);
        assert_eq!(-Phase::Pi1h, Phase::Pi3h);
        assert_eq!(Phase::from_int(7), Phase::Pi3h);
        assert_eq!(Phase::from_int(-1), Phase::Pi3h);
    }

    #[test]
    fn phase_complex() {
        assert_eq!(Phase::Pi1h.as_complex(), C64::i());
        assert_eq!((Phase::Pi1h + Phase::Pi1h).as_complex(), C64::from(-1.0));
    }
}
