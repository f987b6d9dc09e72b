//! Canonical textual form of a polynomial, like `27x^2+x-1`.

use std::fmt::{Display, Write};

use super::{Coefficient, Polynomial, Term};

impl<C: Coefficient> Display for Term<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only a coefficient of exactly 1 is omitted; -1 is printed in full.
        match self.exponent {
            0 => Display::fmt(&self.coefficient, f),
            1 if self.coefficient.is_one() => f.write_char('x'),
            1 => write!(f, "{}x", self.coefficient),
            e if self.coefficient.is_one() => write!(f, "x^{}", e),
            e => write!(f, "{}x^{}", self.coefficient, e),
        }
    }
}

/// The zero polynomial is printed as an empty string.
impl<C: Coefficient> Display for Polynomial<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for t in self.terms.iter().filter(|t| !t.coefficient.is_zero()) {
            if !first && t.coefficient > C::zero() {
                f.write_char('+')?;
            }
            Display::fmt(t, f)?;
            first = false;
        }

        Ok(())
    }
}
