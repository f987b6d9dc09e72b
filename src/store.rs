//! Named polynomial slots and the operations over them.

use std::{fmt::Display, str::FromStr};

use tracing::{debug, trace};

use crate::{
    error::PolyError,
    polynomial::{Coefficient, Polynomial, Term},
};

/// Name of a polynomial held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    A,
    B,
    C,
    /// Where arithmetic results are written.
    R,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::A, Slot::B, Slot::C, Slot::R];

    pub fn name(self) -> char {
        match self {
            Slot::A => 'A',
            Slot::B => 'B',
            Slot::C => 'C',
            Slot::R => 'R',
        }
    }

    pub fn is_operand(self) -> bool {
        self != Slot::R
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<char> for Slot {
    type Error = PolyError;

    fn try_from(name: char) -> Result<Self, PolyError> {
        Ok(match name {
            'A' => Slot::A,
            'B' => Slot::B,
            'C' => Slot::C,
            'R' => Slot::R,
            _ => return Err(PolyError::UnknownPolynomial(name.to_string())),
        })
    }
}

impl FromStr for Slot {
    type Err = PolyError;

    fn from_str(s: &str) -> Result<Self, PolyError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(name), None) => Slot::try_from(name),
            _ => Err(PolyError::UnknownPolynomial(s.to_string())),
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What happens to the result slot's previous content when a new arithmetic
/// result is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultPolicy {
    /// The result slot holds only the latest result.
    #[default]
    Replace,
    /// Each new result is added to whatever the result slot holds.
    Accumulate,
}

#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub result_policy: ResultPolicy,
}

/// Owns one polynomial per slot, all initially zero.
#[derive(Debug, Clone)]
pub struct PolynomialStore<C> {
    slots: [Polynomial<C>; 4],
    config: StoreConfig,
}

impl<C: Coefficient> Default for PolynomialStore<C> {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl<C: Coefficient> PolynomialStore<C> {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            slots: Default::default(),
            config,
        }
    }

    pub fn get(&self, slot: Slot) -> &Polynomial<C> {
        &self.slots[slot.index()]
    }

    /// Looks a slot up by its textual name.
    pub fn get_by_name(&self, name: &str) -> Result<&Polynomial<C>, PolyError> {
        Ok(self.get(name.parse()?))
    }

    /// Replaces the slot content by the given terms, in any order.
    pub fn set_polynomial(
        &mut self,
        slot: Slot,
        terms: impl IntoIterator<Item = Term<C>>,
    ) -> Result<(), PolyError> {
        let poly = Polynomial::from_terms(terms)?;
        debug!(%slot, %poly, "polynomial set");
        self.slots[slot.index()] = poly;
        Ok(())
    }

    /// Replaces the slot content by the polynomial whose coefficients are
    /// listed from the highest power down to the constant term.
    pub fn set_coefficients(
        &mut self,
        slot: Slot,
        coefficients: impl IntoIterator<Item = C>,
    ) -> Result<(), PolyError> {
        let poly = Polynomial::from_coefficients(coefficients)?;
        debug!(%slot, %poly, "polynomial set");
        self.slots[slot.index()] = poly;
        Ok(())
    }

    pub fn clear_polynomial(&mut self, slot: Slot) {
        debug!(%slot, "polynomial cleared");
        self.slots[slot.index()].clear();
    }

    pub fn print(&self, slot: Slot) -> String {
        self.get(slot).to_string()
    }

    pub fn evaluate(&self, slot: Slot, x: f64) -> f64 {
        let value = self.get(slot).evaluate(x);
        trace!(%slot, x, value, "evaluated");
        value
    }

    pub fn add(&mut self, lhs: Slot, rhs: Slot) -> Result<&Polynomial<C>, PolyError> {
        let result = self.get(lhs).checked_add(self.get(rhs))?;
        self.store_result(result)
    }

    pub fn subtract(&mut self, lhs: Slot, rhs: Slot) -> Result<&Polynomial<C>, PolyError> {
        let result = self.get(lhs).checked_sub(self.get(rhs))?;
        self.store_result(result)
    }

    pub fn multiply(&mut self, lhs: Slot, rhs: Slot) -> Result<&Polynomial<C>, PolyError> {
        let result = self.get(lhs).checked_mul(self.get(rhs))?;
        self.store_result(result)
    }

    fn store_result(&mut self, result: Polynomial<C>) -> Result<&Polynomial<C>, PolyError> {
        let stored = match self.config.result_policy {
            ResultPolicy::Replace => result,
            ResultPolicy::Accumulate => self.get(Slot::R).checked_add(&result)?,
        };
        debug!(
            policy = ?self.config.result_policy,
            result = %stored,
            "result slot written"
        );

        let slot = &mut self.slots[Slot::R.index()];
        *slot = stored;
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(policy: ResultPolicy) -> PolynomialStore<i64> {
        PolynomialStore::new(StoreConfig {
            result_policy: policy,
        })
    }

    #[test]
    fn slot_names() {
        for slot in Slot::ALL {
            assert_eq!(slot.to_string().parse::<Slot>(), Ok(slot));
        }
        assert!(!Slot::R.is_operand());
        assert!(Slot::C.is_operand());

        assert_eq!(
            "D".parse::<Slot>(),
            Err(PolyError::UnknownPolynomial("D".to_string()))
        );
        assert_eq!(
            "AB".parse::<Slot>(),
            Err(PolyError::UnknownPolynomial("AB".to_string()))
        );
        assert_eq!(
            Slot::try_from('a'),
            Err(PolyError::UnknownPolynomial("a".to_string()))
        );

        let store = PolynomialStore::<i64>::default();
        assert!(store.get_by_name("B").unwrap().is_empty());
        assert!(store.get_by_name("").is_err());
    }

    #[test]
    fn set_print_clear() {
        let mut store = PolynomialStore::<i64>::default();

        store.set_coefficients(Slot::A, [1, -1]).unwrap();
        assert_eq!(store.print(Slot::A), "x-1");

        store.set_coefficients(Slot::A, [1, 0, 1]).unwrap();
        assert_eq!(store.print(Slot::A), "x^2+1");
        assert_eq!(store.evaluate(Slot::A, 2.0), 5.0);

        store
            .set_polynomial(
                Slot::B,
                [Term::new(2, 0), Term::new(3, 5), Term::new(-1, 0)],
            )
            .unwrap();
        assert_eq!(store.print(Slot::B), "3x^5+1");

        // Clearing touches only the named slot.
        store.clear_polynomial(Slot::A);
        assert_eq!(store.print(Slot::A), "");
        assert_eq!(store.print(Slot::B), "3x^5+1");
    }

    #[test]
    fn arithmetic_writes_result_slot() {
        let mut store = store_with(ResultPolicy::Replace);
        store.set_coefficients(Slot::A, [1, 1]).unwrap();
        store.set_coefficients(Slot::B, [1, -1]).unwrap();

        assert_eq!(store.multiply(Slot::A, Slot::B).unwrap().to_string(), "x^2-1");
        assert_eq!(store.print(Slot::R), "x^2-1");

        assert_eq!(store.add(Slot::A, Slot::B).unwrap().to_string(), "2x");
        assert_eq!(store.subtract(Slot::A, Slot::B).unwrap().to_string(), "2");
        assert_eq!(store.subtract(Slot::A, Slot::A).unwrap().to_string(), "");
        assert_eq!(store.print(Slot::R), "");

        // Operands are left alone:
        assert_eq!(store.print(Slot::A), "x+1");
        assert_eq!(store.print(Slot::B), "x-1");
    }

    #[test]
    fn accumulating_result_slot() {
        let mut store = store_with(ResultPolicy::Accumulate);
        store.set_coefficients(Slot::A, [1, 1]).unwrap();
        store.set_coefficients(Slot::B, [1, -1]).unwrap();

        assert_eq!(store.add(Slot::A, Slot::B).unwrap().to_string(), "2x");
        assert_eq!(store.add(Slot::A, Slot::B).unwrap().to_string(), "4x");
        assert_eq!(store.multiply(Slot::A, Slot::B).unwrap().to_string(), "x^2+4x-1");

        store.clear_polynomial(Slot::R);
        assert_eq!(store.subtract(Slot::A, Slot::B).unwrap().to_string(), "2");
    }

    #[test]
    fn failed_operation_leaves_store_untouched() {
        let mut store = PolynomialStore::<i8>::default();
        store.set_coefficients(Slot::A, [100, 0]).unwrap();
        store.set_coefficients(Slot::B, [-1]).unwrap();
        store.subtract(Slot::A, Slot::B).unwrap();

        assert_eq!(store.add(Slot::A, Slot::A), Err(PolyError::Overflow));
        assert_eq!(store.print(Slot::R), "100x+1");

        assert_eq!(
            store.set_polynomial(Slot::B, [Term::new(100, 1), Term::new(100, 1)]),
            Err(PolyError::Overflow)
        );
        assert_eq!(store.print(Slot::B), "-1");
    }
}
