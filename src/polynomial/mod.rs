pub mod print;

#[cfg(test)]
mod proptests;

use super::ordered_ops;
use crate::error::PolyError;
use itertools::Itertools;
use std::convert::Infallible;

pub type Exponent = u32;

pub trait Coefficient:
    core::fmt::Debug
    + core::fmt::Display
    + PartialEq
    + PartialOrd
    + Clone
    + std::ops::Neg<Output = Self>
    + num_traits::CheckedAdd
    + num_traits::CheckedSub
    + num_traits::CheckedMul
    + num_traits::CheckedNeg
    + num_traits::Zero
    + num_traits::One
    + num_traits::ToPrimitive
{
}

impl Coefficient for i8 {}
impl Coefficient for i16 {}
impl Coefficient for i32 {}
impl Coefficient for i64 {}
impl Coefficient for i128 {}
impl Coefficient for isize {}

/// Unwraps the result of an operation that can not fail.
fn infallible<T>(r: Result<T, Infallible>) -> T {
    match r {
        Ok(v) => v,
        Err(never) => match never {},
    }
}

fn overflow<T>(v: Option<T>) -> Result<T, PolyError> {
    v.ok_or(PolyError::Overflow)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term<C> {
    coefficient: C,
    exponent: Exponent,
}

impl<C> Term<C> {
    pub fn new(coefficient: C, exponent: Exponent) -> Self {
        Term {
            coefficient,
            exponent,
        }
    }

    pub fn coefficient(&self) -> &C {
        &self.coefficient
    }

    pub fn exponent(&self) -> Exponent {
        self.exponent
    }
}

impl<C: Coefficient> Term<C> {
    fn checked_mul(&self, rhs: &Self) -> Result<Self, PolyError> {
        Ok(Term {
            coefficient: overflow(self.coefficient.checked_mul(&rhs.coefficient))?,
            exponent: overflow(self.exponent.checked_add(rhs.exponent))?,
        })
    }
}

impl<C: Coefficient> std::ops::Mul for &Term<C> {
    type Output = Term<C>;

    fn mul(self, rhs: &Term<C>) -> Term<C> {
        Term {
            coefficient: self.coefficient.clone() * rhs.coefficient.clone(),
            exponent: self.exponent + rhs.exponent,
        }
    }
}

impl<C> From<(C, Exponent)> for Term<C> {
    fn from((coefficient, exponent): (C, Exponent)) -> Self {
        Term::new(coefficient, exponent)
    }
}

/// Univariate polynomial in sparse representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<C> {
    // Terms are sorted in strictly decreasing order of exponent, and no
    // coefficient is zero. No terms means zero.
    terms: Vec<Term<C>>,
}

impl<C> Default for Polynomial<C> {
    fn default() -> Self {
        Polynomial { terms: Vec::new() }
    }
}

impl<C: Coefficient> Polynomial<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a polynomial from a list of coefficients, the first one having
    /// the highest power, and the last one being the constant term.
    pub fn from_coefficients(coefficients: impl IntoIterator<Item = C>) -> Result<Self, PolyError> {
        let coefficients: Vec<C> = coefficients.into_iter().collect();
        let count = Exponent::try_from(coefficients.len()).map_err(|_| PolyError::Overflow)?;

        // Exponents are assigned from count - 1 down to 0.
        Self::from_terms(
            coefficients
                .into_iter()
                .zip((0..count).rev())
                .map(|(coefficient, exponent)| Term::new(coefficient, exponent)),
        )
    }

    /// Builds a polynomial by inserting the terms one by one, in any order.
    pub fn from_terms(terms: impl IntoIterator<Item = Term<C>>) -> Result<Self, PolyError> {
        let mut poly = Self::new();
        for t in terms {
            poly.insert(t)?;
        }
        Ok(poly)
    }

    pub fn get_terms(&self) -> &[Term<C>] {
        &self.terms[..]
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    /// Tells whether exponents are strictly decreasing and no coefficient is zero.
    pub fn is_normalized(&self) -> bool {
        self.terms.iter().all(|t| !t.coefficient.is_zero())
            && self
                .terms
                .iter()
                .tuple_windows()
                .all(|(a, b)| a.exponent > b.exponent)
    }

    /// Position right after all the terms with strictly greater exponent.
    fn insertion_point(&self, exponent: Exponent) -> usize {
        self.terms.partition_point(|t| t.exponent > exponent)
    }

    /// Inserts a term, summing it with the existing term of same exponent if
    /// there is one. A zero sum removes the term.
    pub fn insert(&mut self, term: Term<C>) -> Result<(), PolyError> {
        if term.coefficient.is_zero() {
            return Ok(());
        }

        let pos = self.insertion_point(term.exponent);
        if self.terms.get(pos).map_or(true, |t| t.exponent != term.exponent) {
            self.terms.insert(pos, term);
            return Ok(());
        }

        let existing = &mut self.terms[pos];
        let sum = overflow(existing.coefficient.checked_add(&term.coefficient))?;
        if sum.is_zero() {
            self.terms.remove(pos);
        } else {
            existing.coefficient = sum;
        }

        Ok(())
    }

    /// Inserts a term without merging it with a term of same exponent. The
    /// new term goes before any existing term of same exponent.
    ///
    /// Leaves the polynomial non-normalized until `coalesce_adjacent()` runs.
    fn insert_uncoalesced(&mut self, term: Term<C>) {
        if !term.coefficient.is_zero() {
            let pos = self.insertion_point(term.exponent);
            self.terms.insert(pos, term);
        }
    }

    fn coalesce_adjacent<E>(
        &mut self,
        mut add: impl FnMut(&C, &C) -> Result<C, E>,
    ) -> Result<(), E> {
        ordered_ops::try_coalesce_adjacent(
            &mut self.terms,
            |a, b| a.exponent == b.exponent,
            |a, b| {
                let coefficient = add(&a.coefficient, &b.coefficient)?;
                Ok(if coefficient.is_zero() {
                    None
                } else {
                    Some(Term::new(coefficient, a.exponent))
                })
            },
        )
    }

    fn check_index(&self, index: usize) -> Result<(), PolyError> {
        if index < self.terms.len() {
            Ok(())
        } else {
            Err(PolyError::OutOfRange {
                index,
                len: self.terms.len(),
            })
        }
    }

    pub fn get(&self, index: usize) -> Result<&Term<C>, PolyError> {
        self.check_index(index)?;
        Ok(&self.terms[index])
    }

    /// Replaces the term at a position. The new exponent must still lie
    /// strictly between the neighbors' exponents. A zero coefficient removes
    /// the term.
    pub fn set(&mut self, index: usize, term: Term<C>) -> Result<(), PolyError> {
        self.check_index(index)?;

        let fits_left = index == 0 || self.terms[index - 1].exponent > term.exponent;
        let fits_right = self
            .terms
            .get(index + 1)
            .map_or(true, |next| next.exponent < term.exponent);
        if !(fits_left && fits_right) {
            return Err(PolyError::Misplaced {
                index,
                exponent: term.exponent,
            });
        }

        if term.coefficient.is_zero() {
            self.terms.remove(index);
        } else {
            self.terms[index] = term;
        }
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Term<C>, PolyError> {
        self.check_index(index)?;
        Ok(self.terms.remove(index))
    }

    /// Evaluates the polynomial at `x`, in floating point.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.terms
            .iter()
            .map(|t| {
                t.coefficient.to_f64().unwrap_or(f64::NAN) * x.powf(f64::from(t.exponent))
            })
            .sum()
    }

    /// Merges the terms of both polynomials, combining the coefficients of
    /// matching exponents with `combine`, and mapping coefficients present only
    /// in `rhs` with `rhs_only`.
    fn sum_terms<E>(
        &self,
        rhs: &Self,
        mut combine: impl FnMut(&C, &C) -> Result<C, E>,
        mut rhs_only: impl FnMut(&C) -> Result<C, E>,
    ) -> Result<Self, E> {
        let mut terms = Vec::with_capacity(self.terms.len() + rhs.terms.len());
        ordered_ops::try_sum(
            self.terms.iter().cloned(),
            rhs.terms.iter().cloned(),
            |x, y| y.exponent.cmp(&x.exponent),
            |x, y| {
                let coefficient = combine(&x.coefficient, &y.coefficient)?;
                Ok(if coefficient.is_zero() {
                    None
                } else {
                    Some(Term::new(coefficient, x.exponent))
                })
            },
            |y| Ok(Term::new(rhs_only(&y.coefficient)?, y.exponent)),
            &mut terms,
        )?;

        Ok(Self { terms })
    }

    /// Full cross product, followed by the merge of equal exponents.
    fn product_terms<E>(
        &self,
        rhs: &Self,
        mut mul: impl FnMut(&Term<C>, &Term<C>) -> Result<Term<C>, E>,
        add: impl FnMut(&C, &C) -> Result<C, E>,
    ) -> Result<Self, E> {
        let mut result = Self::new();
        for a in self.terms.iter() {
            for b in rhs.terms.iter() {
                result.insert_uncoalesced(mul(a, b)?);
            }
        }

        result.coalesce_adjacent(add)?;

        Ok(result)
    }

    pub fn checked_add(&self, rhs: &Self) -> Result<Self, PolyError> {
        self.sum_terms(
            rhs,
            |a, b| overflow(a.checked_add(b)),
            |b| Ok(b.clone()),
        )
    }

    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, PolyError> {
        self.sum_terms(
            rhs,
            |a, b| overflow(a.checked_sub(b)),
            |b| overflow(b.checked_neg()),
        )
    }

    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, PolyError> {
        self.product_terms(rhs, Term::checked_mul, |a, b| overflow(a.checked_add(b)))
    }
}

impl<C: Coefficient> std::ops::Add for &Polynomial<C> {
    type Output = Polynomial<C>;

    fn add(self, rhs: &Polynomial<C>) -> Polynomial<C> {
        infallible(self.sum_terms(
            rhs,
            |a, b| Ok(a.clone() + b.clone()),
            |b| Ok(b.clone()),
        ))
    }
}

impl<C: Coefficient> std::ops::Add for Polynomial<C> {
    type Output = Polynomial<C>;

    fn add(self, rhs: Polynomial<C>) -> Polynomial<C> {
        &self + &rhs
    }
}

impl<C: Coefficient> std::ops::Sub for &Polynomial<C> {
    type Output = Polynomial<C>;

    fn sub(self, rhs: &Polynomial<C>) -> Polynomial<C> {
        infallible(self.sum_terms(
            rhs,
            |a, b| Ok(a.clone() - b.clone()),
            |b| Ok(-b.clone()),
        ))
    }
}

impl<C: Coefficient> std::ops::Mul for &Polynomial<C> {
    type Output = Polynomial<C>;

    fn mul(self, rhs: &Polynomial<C>) -> Polynomial<C> {
        infallible(self.product_terms(rhs, |a, b| Ok(a * b), |a, b| Ok(a.clone() + b.clone())))
    }
}

impl<C: Coefficient> std::ops::Neg for Polynomial<C> {
    type Output = Self;

    fn neg(mut self) -> Self {
        for term in self.terms.iter_mut() {
            term.coefficient = -term.coefficient.clone();
        }
        self
    }
}

impl<C: Coefficient> num_traits::Zero for Polynomial<C> {
    fn zero() -> Self {
        Polynomial { terms: Vec::new() }
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}
