//! Expansion arithmetic over fixed-capacity stack buffers.
//!
//! An expansion is a sequence of doubles, ordered by increasing magnitude and
//! pairwise nonoverlapping, whose exact sum is the value it represents. The
//! zero-eliminating operations below never emit zero components, except for a
//! single `0.0` when the whole value is zero, so every expansion they produce
//! has at least one component and its last component carries the sign.
//!
//! [`Expansion<N>`] stores up to `N` components inline. Its typed constructors
//! refuse, at compile time, an output capacity smaller than the worst case of
//! their inputs, which is how the predicates size every intermediate buffer.

use crate::eft::{fast_two_sum, split, two_product_presplit, two_sum};
use std::cmp::Ordering;
use thiserror::Error;

/// Reasons an expansion can be rejected by [`Expansion::try_from_slice`] or
/// [`Expansion::check_invariants`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ExpansionError {
    #[error("an expansion needs at least one component")]
    Empty,
    #[error("expansion length {len} exceeds capacity {capacity}")]
    CapacityExceeded { len: usize, capacity: usize },
    #[error("expansion component {index} is not finite")]
    NonFinite { index: usize },
    #[error("expansion component {index} is larger in magnitude than its successor")]
    Unsorted { index: usize },
    #[error("expansion component {index} overlaps its successor")]
    Overlapping { index: usize },
}

/// Fixed-capacity expansion stored inline.
#[derive(Clone, Debug, PartialEq)]
pub struct Expansion<const N: usize> {
    len: usize,
    components: [f64; N],
}

impl<const N: usize> Expansion<N> {
    /// The zero value: one component equal to `0.0`.
    pub const fn zero() -> Self {
        const { assert!(N > 0, "an expansion needs room for one component") };
        Self {
            len: 1,
            components: [0.0; N],
        }
    }

    /// Stores `parts` verbatim, in increasing magnitude order.
    ///
    /// Used for the raw outputs of the error-free transforms, which may
    /// contain zero components.
    #[inline(always)]
    pub fn from_components<const M: usize>(parts: [f64; M]) -> Self {
        const { assert!(M > 0 && M <= N, "component count exceeds capacity") };
        let mut result = Self::zero();
        result.components[..M].copy_from_slice(&parts);
        result.len = M;
        result
    }

    /// Copies and validates a slice of components.
    pub fn try_from_slice(slice: &[f64]) -> Result<Self, ExpansionError> {
        if slice.is_empty() {
            return Err(ExpansionError::Empty);
        }
        if slice.len() > N {
            return Err(ExpansionError::CapacityExceeded {
                len: slice.len(),
                capacity: N,
            });
        }
        let mut result = Self::zero();
        result.components[..slice.len()].copy_from_slice(slice);
        result.len = slice.len();
        result.check_invariants()?;
        Ok(result)
    }

    /// Exact sum `e + f`, zero-eliminated.
    #[inline(always)]
    pub fn sum<const A: usize, const B: usize>(e: &Expansion<A>, f: &Expansion<B>) -> Self {
        const { assert!(A + B <= N, "sum capacity must cover both operands") };
        let mut result = Self::zero();
        result.len =
            fast_expansion_sum_zeroelim(e.components(), f.components(), &mut result.components);
        result
    }

    /// Exact product `e * b`, zero-eliminated.
    #[inline(always)]
    pub fn scale<const A: usize>(e: &Expansion<A>, b: f64) -> Self {
        const { assert!(2 * A <= N, "scale capacity must be twice the operand") };
        let mut result = Self::zero();
        result.len = scale_expansion_zeroelim(e.components(), b, &mut result.components);
        result
    }

    /// Overwrites `self` with `slice`, unchecked beyond the capacity.
    #[inline(always)]
    pub(crate) fn assign_slice(&mut self, slice: &[f64]) {
        self.components[..slice.len()].copy_from_slice(slice);
        self.len = slice.len();
    }

    /// Replaces `self` with `e + f`. The caller guarantees the result fits.
    #[inline(always)]
    pub(crate) fn assign_sum(&mut self, e: &[f64], f: &[f64]) {
        self.len = fast_expansion_sum_zeroelim(e, f, &mut self.components);
    }

    /// Number of populated components.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Compile-time capacity.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Reports whether the represented value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.components().iter().all(|&c| c == 0.0)
    }

    /// The populated components, least significant first.
    pub fn components(&self) -> &[f64] {
        &self.components[..self.len]
    }

    /// One-word approximation of the value.
    pub fn estimate(&self) -> f64 {
        estimate(self.components())
    }

    /// The last component. For zero-eliminated expansions its sign is the
    /// sign of the exact value.
    #[inline(always)]
    pub fn most_significant(&self) -> f64 {
        self.components[self.len - 1]
    }

    /// The exact negation.
    pub fn negated(&self) -> Self {
        let mut result = self.clone();
        for component in &mut result.components[..self.len] {
            *component = -*component;
        }
        result
    }

    /// Checks finiteness, magnitude ordering and the nonoverlapping property.
    /// Zero components are ignored.
    pub fn check_invariants(&self) -> Result<(), ExpansionError> {
        check_components(self.components())
    }
}

impl<const N: usize> Default for Expansion<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> From<f64> for Expansion<N> {
    fn from(value: f64) -> Self {
        Self::from_components([value])
    }
}

/// Naive left-to-right sum of all components.
#[inline(always)]
pub fn estimate(e: &[f64]) -> f64 {
    debug_assert!(!e.is_empty(), "expansions have at least one component");
    e.iter().fold(0.0, |acc, &c| acc + c)
}

/// Sums the expansions `e` and `f` into `h`, eliminating zero components, and
/// returns the length written. `h` must hold `e.len() + f.len()` components.
///
/// Components are folded in order of increasing magnitude; the comparison
/// `(fnow > enow) == (fnow > -enow)` holds when `|enow|` does not exceed `|fnow|`.
pub fn fast_expansion_sum_zeroelim(e: &[f64], f: &[f64], h: &mut [f64]) -> usize {
    debug_assert!(!e.is_empty() && !f.is_empty());
    debug_assert!(h.len() >= e.len() + f.len(), "output buffer too small");

    let mut eindex = 0usize;
    let mut findex = 0usize;
    let mut hindex = 0usize;
    let mut enow = e[0];
    let mut fnow = f[0];

    let mut q = if (fnow > enow) == (fnow > -enow) {
        eindex += 1;
        enow
    } else {
        findex += 1;
        fnow
    };

    if eindex < e.len() && findex < f.len() {
        enow = e[eindex];
        fnow = f[findex];
        let (qnew, hh) = if (fnow > enow) == (fnow > -enow) {
            eindex += 1;
            fast_two_sum(enow, q)
        } else {
            findex += 1;
            fast_two_sum(fnow, q)
        };
        q = qnew;
        if hh != 0.0 {
            h[hindex] = hh;
            hindex += 1;
        }

        while eindex < e.len() && findex < f.len() {
            enow = e[eindex];
            fnow = f[findex];
            let (qnew, hh) = if (fnow > enow) == (fnow > -enow) {
                eindex += 1;
                two_sum(q, enow)
            } else {
                findex += 1;
                two_sum(q, fnow)
            };
            q = qnew;
            if hh != 0.0 {
                h[hindex] = hh;
                hindex += 1;
            }
        }
    }

    for &component in e[eindex..].iter().chain(&f[findex..]) {
        let (qnew, hh) = two_sum(q, component);
        q = qnew;
        if hh != 0.0 {
            h[hindex] = hh;
            hindex += 1;
        }
    }

    if q != 0.0 || hindex == 0 {
        h[hindex] = q;
        hindex += 1;
    }

    hindex
}

/// Multiplies the expansion `e` by `b` into `h`, eliminating zero components,
/// and returns the length written. `h` must hold `2 * e.len()` components.
pub fn scale_expansion_zeroelim(e: &[f64], b: f64, h: &mut [f64]) -> usize {
    debug_assert!(!e.is_empty());
    debug_assert!(h.len() >= 2 * e.len(), "output buffer too small");

    let (bhi, blo) = split(b);
    let (mut q, hh) = two_product_presplit(e[0], b, bhi, blo);
    let mut hindex = 0usize;
    if hh != 0.0 {
        h[hindex] = hh;
        hindex += 1;
    }

    for &enow in &e[1..] {
        let (product1, product0) = two_product_presplit(enow, b, bhi, blo);
        let (sum, hh) = two_sum(q, product0);
        if hh != 0.0 {
            h[hindex] = hh;
            hindex += 1;
        }
        let (qnew, hh) = fast_two_sum(product1, sum);
        q = qnew;
        if hh != 0.0 {
            h[hindex] = hh;
            hindex += 1;
        }
    }

    if q != 0.0 || hindex == 0 {
        h[hindex] = q;
        hindex += 1;
    }

    hindex
}

fn compare_magnitude(a: f64, b: f64) -> Ordering {
    match a.abs().partial_cmp(&b.abs()) {
        Some(order) => order,
        None => Ordering::Equal,
    }
}

fn check_components(components: &[f64]) -> Result<(), ExpansionError> {
    if let Some(index) = components.iter().position(|c| !c.is_finite()) {
        return Err(ExpansionError::NonFinite { index });
    }

    let mut previous: Option<(usize, f64)> = None;
    for (index, &component) in components.iter().enumerate() {
        if component == 0.0 {
            continue;
        }
        if let Some((low_index, low)) = previous {
            if compare_magnitude(low, component) == Ordering::Greater {
                return Err(ExpansionError::Unsorted { index: low_index });
            }
            if low.abs() >= lowest_set_bit(component) {
                return Err(ExpansionError::Overlapping { index: low_index });
            }
        }
        previous = Some((index, component));
    }

    Ok(())
}

/// Value of the least significant nonzero bit of a finite, nonzero `value`.
fn lowest_set_bit(value: f64) -> f64 {
    let bits = value.abs().to_bits();
    let biased_exponent = (bits >> 52) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased_exponent - 1075)
    };
    let power = exponent + mantissa.trailing_zeros() as i32;
    if power >= -1022 {
        f64::from_bits(((power + 1023) as u64) << 52)
    } else {
        f64::from_bits(1u64 << (power + 1074))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eft::{two_product, two_two_diff};

    #[test]
    fn zero_has_one_component() {
        let zero = Expansion::<4>::zero();
        assert_eq!(zero.components(), &[0.0]);
        assert!(zero.is_zero());
        assert_eq!(zero.most_significant(), 0.0);
    }

    #[test]
    fn sum_preserves_cancellation() {
        let a = Expansion::<2>::try_from_slice(&[1.0, 1.0e16]).unwrap();
        let b = Expansion::<1>::from(-1.0e16);
        let sum = Expansion::<3>::sum(&a, &b);
        assert_eq!(sum.components(), &[1.0]);
        sum.check_invariants().unwrap();
    }

    #[test]
    fn sum_of_zeros_is_single_zero() {
        let zero = Expansion::<1>::zero();
        let sum = Expansion::<2>::sum(&zero, &zero);
        assert_eq!(sum.components(), &[0.0]);
    }

    #[test]
    fn scale_is_exact() {
        let e = Expansion::<1>::from(0.1);
        let scaled = Expansion::<2>::scale(&e, 0.1);
        let (x, y) = two_product(0.1, 0.1);
        assert_eq!(scaled.components(), &[y, x]);
    }

    #[test]
    fn raw_two_two_diff_output_is_accepted() {
        let (a1, a0) = two_product(0.3, 0.7);
        let (b1, b0) = two_product(0.2, 0.9);
        let diff = Expansion::<4>::from_components(two_two_diff(a1, a0, b1, b0));
        diff.check_invariants().unwrap();
        assert_eq!(diff.len(), 4);
    }

    #[test]
    fn overlapping_components_fail_invariants() {
        assert_eq!(
            Expansion::<2>::try_from_slice(&[0.75, 1.5]),
            Err(ExpansionError::Overlapping { index: 0 })
        );
        Expansion::<2>::try_from_slice(&[0.75, 1.0]).unwrap();
    }

    #[test]
    fn unsorted_components_fail_invariants() {
        assert_eq!(
            Expansion::<2>::try_from_slice(&[4.0, 0.5]),
            Err(ExpansionError::Unsorted { index: 0 })
        );
    }

    #[test]
    fn try_from_slice_reports_capacity() {
        assert_eq!(
            Expansion::<1>::try_from_slice(&[1.0, 4.0]),
            Err(ExpansionError::CapacityExceeded {
                len: 2,
                capacity: 1
            })
        );
        assert_eq!(
            Expansion::<1>::try_from_slice(&[]),
            Err(ExpansionError::Empty)
        );
    }

    #[test]
    fn lowest_set_bit_handles_normals_and_subnormals() {
        assert_eq!(lowest_set_bit(12.0), 4.0);
        assert_eq!(lowest_set_bit(-0.375), 0.125);
        assert_eq!(lowest_set_bit(f64::from_bits(6)), f64::from_bits(2));
    }
}
