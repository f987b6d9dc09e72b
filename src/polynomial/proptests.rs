//! Property-based tests for the polynomial algebra.

use num_traits::Zero;
use proptest::prelude::*;

use super::{Polynomial, Term};

type P = Polynomial<i64>;

fn small_term() -> impl Strategy<Value = Term<i64>> {
    (-50i64..50, 0u32..12).prop_map(|(c, e)| Term::new(c, e))
}

// Built from unordered terms, so construction itself exercises insertion.
fn small_poly() -> impl Strategy<Value = P> {
    proptest::collection::vec(small_term(), 0..10)
        .prop_map(|terms| P::from_terms(terms).expect("small terms can not overflow"))
}

fn sorted_pairs(p: &P) -> Vec<(i64, u32)> {
    let mut v: Vec<_> = p
        .get_terms()
        .iter()
        .map(|t| (*t.coefficient(), t.exponent()))
        .collect();
    v.sort_unstable();
    v
}

proptest! {
    #[test]
    fn insertion_keeps_normal_form(p in small_poly(), extra in small_term()) {
        prop_assert!(p.is_normalized());

        let mut q = p.clone();
        q.insert(extra).unwrap();
        prop_assert!(q.is_normalized());
    }

    #[test]
    fn results_are_normalized(a in small_poly(), b in small_poly()) {
        prop_assert!(a.checked_add(&b).unwrap().is_normalized());
        prop_assert!(a.checked_sub(&b).unwrap().is_normalized());
        prop_assert!(a.checked_mul(&b).unwrap().is_normalized());
    }

    #[test]
    fn multiply_by_zero_prints_empty(p in small_poly()) {
        prop_assert_eq!(p.checked_mul(&P::zero()).unwrap().to_string(), "");
    }

    #[test]
    fn multiply_commutative(a in small_poly(), b in small_poly()) {
        let ab = a.checked_mul(&b).unwrap();
        let ba = b.checked_mul(&a).unwrap();
        prop_assert_eq!(sorted_pairs(&ab), sorted_pairs(&ba));
    }

    #[test]
    fn add_commutative(a in small_poly(), b in small_poly()) {
        prop_assert_eq!(a.checked_add(&b).unwrap(), b.checked_add(&a).unwrap());
    }

    #[test]
    fn sub_undoes_add(a in small_poly(), b in small_poly()) {
        let sum = a.checked_add(&b).unwrap();
        prop_assert_eq!(sum.checked_sub(&b).unwrap(), a);
    }

    #[test]
    fn distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
        let left = a.checked_mul(&b.checked_add(&c).unwrap()).unwrap();
        let right = a
            .checked_mul(&b)
            .unwrap()
            .checked_add(&a.checked_mul(&c).unwrap())
            .unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn evaluate_at_one_sums_coefficients(p in small_poly()) {
        let sum: i64 = p.get_terms().iter().map(|t| *t.coefficient()).sum();
        prop_assert_eq!(p.evaluate(1.0), sum as f64);
    }

    #[test]
    fn evaluation_is_a_ring_morphism(a in small_poly(), b in small_poly(), x in -2i32..=2) {
        let x = f64::from(x);
        let product = a.checked_mul(&b).unwrap();
        prop_assert_eq!(product.evaluate(x), a.evaluate(x) * b.evaluate(x));
    }
}
