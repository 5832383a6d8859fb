//! Symbolic polynomial expressions over the unknown entries of per-qubit
//! symplectic matrices.
//!
//! The circuit synthesis layer states its equations over 4*n* formal
//! unknowns: one entry per qubit for each of the four diagonal blocks of an
//! unknown symplectic transformation. [`Expr`] is a plain expression tree
//! over those unknowns with ordinary integer arithmetic (*not* GF(2)
//! arithmetic; the mod-2 semantics is imposed only when the equations are
//! handed to the solver). [`Expr::simplified`] reduces a tree to the [`Term`]
//! normal form: a collected constant, a coefficient per first-degree
//! variable, and any residual higher-degree monomials. The synthesis
//! equations are linear in the unknowns by construction, so a non-empty
//! monomial set at the solver boundary indicates a bug upstream, not a
//! property of the input.

use std::{
    collections::BTreeMap,
    fmt,
    mem,
    ops::{ Add, AddAssign, Mul, MulAssign },
};
use itertools::Itertools;
use nalgebra as na;
use num_traits::{ One, Zero };

/// One of the four diagonal blocks of the unknown symplectic transformation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Block {
    /// X-from-X entries.
    Xx,
    /// X-from-Z entries.
    Xz,
    /// Z-from-X entries.
    Zx,
    /// Z-from-Z entries.
    Zz,
}

impl Block {
    /// All blocks, in decode order.
    pub const ALL: [Self; 4] = [Self::Xx, Self::Xz, Self::Zx, Self::Zz];

    /// Position of the block in decode order.
    pub fn index(self) -> usize {
        match self {
            Self::Xx => 0,
            Self::Xz => 1,
            Self::Zx => 2,
            Self::Zz => 3,
        }
    }

    /// Display tag of the block.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Xx => "axx",
            Self::Xz => "axz",
            Self::Zx => "azx",
            Self::Zz => "azz",
        }
    }
}

/// A named symbolic unknown: one entry of one symplectic block, for one
/// qubit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var {
    pub block: Block,
    pub qubit: usize,
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.block.tag(), self.qubit)
    }
}

/// A symbolic polynomial expression: integer constants, unknowns, sums, and
/// products.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(i64),
    Sym(Var),
    Sum(Vec<Expr>),
    Prod(Vec<Expr>),
}

impl Default for Expr {
    fn default() -> Self { Self::Num(0) }
}

impl From<i64> for Expr {
    fn from(num: i64) -> Self { Self::Num(num) }
}

impl From<Var> for Expr {
    fn from(var: Var) -> Self { Self::Sym(var) }
}

impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Num(0), e) | (e, Self::Num(0)) => e,
            (Self::Num(a), Self::Num(b)) => Self::Num(a + b),
            (Self::Sum(mut a), Self::Sum(b)) => {
                a.extend(b);
                Self::Sum(a)
            },
            (Self::Sum(mut a), e) | (e, Self::Sum(mut a)) => {
                a.push(e);
                Self::Sum(a)
            },
            (a, b) => Self::Sum(vec![a, b]),
        }
    }
}

impl AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        *self = mem::take(self) + rhs;
    }
}

impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Num(0), _) | (_, Self::Num(0)) => Self::Num(0),
            (Self::Num(1), e) | (e, Self::Num(1)) => e,
            (Self::Num(a), Self::Num(b)) => Self::Num(a * b),
            (Self::Prod(mut a), Self::Prod(b)) => {
                a.extend(b);
                Self::Prod(a)
            },
            (Self::Prod(mut a), e) | (e, Self::Prod(mut a)) => {
                a.push(e);
                Self::Prod(a)
            },
            (a, b) => Self::Prod(vec![a, b]),
        }
    }
}

impl MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        *self = mem::take(self) * rhs;
    }
}

impl Zero for Expr {
    fn zero() -> Self { Self::Num(0) }

    fn is_zero(&self) -> bool { matches!(self, Self::Num(0)) }
}

impl One for Expr {
    fn one() -> Self { Self::Num(1) }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(num) => write!(f, "{}", num),
            Self::Sym(var) => write!(f, "{}", var),
            Self::Sum(terms) => {
                write!(f, "(")?;
                for (k, term) in terms.iter().enumerate() {
                    if k > 0 { write!(f, " + ")?; }
                    write!(f, "{}", term)?;
                }
                write!(f, ")")
            },
            Self::Prod(factors) => {
                for (k, factor) in factors.iter().enumerate() {
                    if k > 0 { write!(f, "*")?; }
                    write!(f, "{}", factor)?;
                }
                Ok(())
            },
        }
    }
}

impl Expr {
    // Expand into a flat list of monomials (coefficient, unsorted variable
    // multiset), distributing products over sums.
    fn expand(&self) -> Vec<(i64, Vec<Var>)> {
        match self {
            Self::Num(num) => vec![(*num, Vec::new())],
            Self::Sym(var) => vec![(1, vec![*var])],
            Self::Sum(terms)
                => terms.iter().flat_map(|term| term.expand()).collect(),
            Self::Prod(factors) => {
                factors.iter()
                    .map(|factor| factor.expand())
                    .fold(vec![(1, Vec::new())], |acc, factor| {
                        acc.iter().cartesian_product(factor.iter())
                            .map(|((c1, v1), (c2, v2))| {
                                let mut vars = v1.clone();
                                vars.extend(v2.iter().copied());
                                (c1 * c2, vars)
                            })
                            .collect()
                    })
            },
        }
    }

    /// Reduce to the [`Term`] normal form.
    ///
    /// Flattens nested sums, distributes products, and collects
    /// coefficients; the mathematical value of the expression is preserved
    /// and the reduction is idempotent.
    pub fn simplified(&self) -> Term {
        let mut constant: i64 = 0;
        let mut linear: BTreeMap<Var, i64> = BTreeMap::new();
        let mut products: BTreeMap<Vec<Var>, i64> = BTreeMap::new();
        for (coeff, mut vars) in self.expand() {
            if coeff == 0 { continue; }
            match vars.len() {
                0 => { constant += coeff; },
                1 => { *linear.entry(vars[0]).or_insert(0) += coeff; },
                _ => {
                    vars.sort_unstable();
                    *products.entry(vars).or_insert(0) += coeff;
                },
            }
        }
        linear.retain(|_, coeff| *coeff != 0);
        products.retain(|_, coeff| *coeff != 0);
        Term { constant, linear, products }
    }
}

/// Normal form of a simplified expression.
///
/// Represents `constant + Σ coeff·var + Σ coeff·(var·var·...)`; the last
/// group must be empty by the time a term reaches the solver translation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Term {
    /// Collected numeric constant.
    pub constant: i64,
    /// Coefficient per first-degree variable.
    pub linear: BTreeMap<Var, i64>,
    /// Coefficient per degree-≥2 monomial (variables sorted).
    pub products: BTreeMap<Vec<Var>, i64>,
}

impl Term {
    /// Return `true` if the term has no monomials of degree 2 or higher.
    pub fn is_linear(&self) -> bool { self.products.is_empty() }

    /// Rebuild an expression tree with the same mathematical value.
    pub fn to_expr(&self) -> Expr {
        let mut expr = Expr::Num(self.constant);
        for (var, coeff) in self.linear.iter() {
            expr += Expr::Num(*coeff) * Expr::Sym(*var);
        }
        for (vars, coeff) in self.products.iter() {
            let mono
                = vars.iter()
                .fold(Expr::Num(*coeff), |acc, var| acc * Expr::Sym(*var));
            expr += mono;
        }
        expr
    }

    /// Re-simplify; a fixed point of [`Expr::simplified`].
    pub fn simplified(&self) -> Self { self.to_expr().simplified() }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pieces: Vec<String> = Vec::new();
        if self.constant != 0 || (self.linear.is_empty() && self.products.is_empty()) {
            pieces.push(self.constant.to_string());
        }
        for (var, coeff) in self.linear.iter() {
            if *coeff == 1 {
                pieces.push(var.to_string());
            } else {
                pieces.push(format!("{}*{}", coeff, var));
            }
        }
        for (vars, coeff) in self.products.iter() {
            let mono = vars.iter().map(|v| v.to_string()).join("*");
            if *coeff == 1 {
                pieces.push(mono);
            } else {
                pieces.push(format!("{}*{}", coeff, mono));
            }
        }
        write!(f, "{}", pieces.join(" + "))
    }
}

/// Build the *n*×*n* diagonal matrix holding a fresh unknown
/// `Var { block, qubit: i }` at every position (*i*, *i*).
pub fn symbol_diag(n: usize, block: Block) -> na::DMatrix<Expr> {
    na::DMatrix::from_fn(n, n, |i, j| {
        if i == j { Expr::from(Var { block, qubit: i }) } else { Expr::zero() }
    })
}
