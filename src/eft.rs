//! Error-free transformations.
//!
//! Every function here returns a rounded result together with the exact
//! rounding error, so that `result + error` equals the infinitely precise
//! value of the operation. Results are returned most significant first for the
//! two-component operations, and as increasing-magnitude arrays (ready to be
//! used as expansions) for the multi-component ones.
//!
//! All operations assume IEEE-754 binary64 with round-to-nearest. The exact
//! sequence of roundings matters: Rust never contracts `a * b + c` into a fused
//! multiply-add on its own, and nothing here may be rewritten to do so.

use crate::bounds::SPLITTER;

/// Sum of `a` and `b` with its rounding error. Requires `|a| >= |b|`, or at
/// least that the exponent of `a` is not below the exponent of `b`; debug
/// builds check that the error is exact.
#[inline(always)]
pub fn fast_two_sum(a: f64, b: f64) -> (f64, f64) {
    let sum = a + b;
    let b_virtual = sum - a;
    let err = b - b_virtual;
    debug_assert!(
        !sum.is_finite() || (sum, err) == two_sum(a, b),
        "FAST-TWO-SUM lost bits on {} + {}",
        a,
        b
    );
    (sum, err)
}

/// Sum of `a` and `b` with its rounding error, for any magnitude ordering.
#[inline(always)]
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let sum = a + b;
    let b_virtual = sum - a;
    let a_virtual = sum - b_virtual;
    let b_roundoff = b - b_virtual;
    let a_roundoff = a - a_virtual;
    let err = a_roundoff + b_roundoff;
    (sum, err)
}

/// Rounding error of an already computed `diff = a - b`.
#[inline(always)]
pub fn two_diff_tail(a: f64, b: f64, diff: f64) -> f64 {
    let b_virtual = a - diff;
    let a_virtual = diff + b_virtual;
    let b_roundoff = b_virtual - b;
    let a_roundoff = a - a_virtual;
    a_roundoff + b_roundoff
}

/// Difference of `a` and `b` with its rounding error.
#[inline(always)]
pub fn two_diff(a: f64, b: f64) -> (f64, f64) {
    let diff = a - b;
    (diff, two_diff_tail(a, b, diff))
}

/// Splits `a` into two non-overlapping halves of at most 26 significant bits
/// each, with `hi + lo == a` exactly.
#[inline(always)]
pub fn split(a: f64) -> (f64, f64) {
    let c = SPLITTER * a;
    let a_big = c - a;
    let hi = c - a_big;
    let lo = a - hi;
    (hi, lo)
}

#[inline(always)]
fn two_product_tail_presplit(a: f64, ahi: f64, alo: f64, bhi: f64, blo: f64, x: f64) -> f64 {
    debug_assert_eq!(ahi + alo, a);
    let err1 = x - (ahi * bhi);
    let err2 = err1 - (alo * bhi);
    let err3 = err2 - (ahi * blo);
    (alo * blo) - err3
}

/// Product of `a` and `b` with its rounding error (Dekker's algorithm).
#[inline(always)]
pub fn two_product(a: f64, b: f64) -> (f64, f64) {
    let x = a * b;
    let (ahi, alo) = split(a);
    let (bhi, blo) = split(b);
    (x, two_product_tail_presplit(a, ahi, alo, bhi, blo, x))
}

/// Like [`two_product`], reusing a split of `b` that the caller already holds.
#[inline(always)]
pub fn two_product_presplit(a: f64, b: f64, bhi: f64, blo: f64) -> (f64, f64) {
    let x = a * b;
    let (ahi, alo) = split(a);
    (x, two_product_tail_presplit(a, ahi, alo, bhi, blo, x))
}

#[inline(always)]
fn two_product_2presplit(a: f64, ahi: f64, alo: f64, b: f64, bhi: f64, blo: f64) -> (f64, f64) {
    let x = a * b;
    (x, two_product_tail_presplit(a, ahi, alo, bhi, blo, x))
}

/// Square of `a` with its rounding error; needs a single split.
#[inline(always)]
pub fn square(a: f64) -> (f64, f64) {
    let x = a * a;
    let (ahi, alo) = split(a);
    let err1 = x - (ahi * ahi);
    let err3 = err1 - ((ahi + ahi) * alo);
    (x, (alo * alo) - err3)
}

/// Adds `b` to the two-component expansion `a1 + a0`.
#[inline(always)]
pub fn two_one_sum(a1: f64, a0: f64, b: f64) -> [f64; 3] {
    let (i, x0) = two_sum(a0, b);
    let (x2, x1) = two_sum(a1, i);
    [x0, x1, x2]
}

/// Subtracts `b` from the two-component expansion `a1 + a0`.
#[inline(always)]
pub fn two_one_diff(a1: f64, a0: f64, b: f64) -> [f64; 3] {
    let (i, x0) = two_diff(a0, b);
    let (x2, x1) = two_sum(a1, i);
    [x0, x1, x2]
}

/// Exact sum of two two-component expansions.
#[inline(always)]
pub fn two_two_sum(a1: f64, a0: f64, b1: f64, b0: f64) -> [f64; 4] {
    let [x0, t0, j] = two_one_sum(a1, a0, b0);
    let [x1, x2, x3] = two_one_sum(j, t0, b1);
    [x0, x1, x2, x3]
}

/// Exact difference of two two-component expansions.
#[inline(always)]
pub fn two_two_diff(a1: f64, a0: f64, b1: f64, b0: f64) -> [f64; 4] {
    let [x0, t0, j] = two_one_diff(a1, a0, b0);
    let [x1, x2, x3] = two_one_diff(j, t0, b1);
    [x0, x1, x2, x3]
}

/// Exact product of the two-component expansion `a1 + a0` and the scalar `b`.
#[inline(always)]
pub fn two_one_product(a1: f64, a0: f64, b: f64) -> [f64; 4] {
    let (bhi, blo) = split(b);
    let (i, x0) = two_product_presplit(a0, b, bhi, blo);
    let (j, t0) = two_product_presplit(a1, b, bhi, blo);
    let (k, x1) = two_sum(i, t0);
    let (x3, x2) = fast_two_sum(j, k);
    [x0, x1, x2, x3]
}

/// Exact product of two two-component expansions.
pub fn two_two_product(a1: f64, a0: f64, b1: f64, b0: f64) -> [f64; 8] {
    let (a0hi, a0lo) = split(a0);
    let (bhi, blo) = split(b0);
    let (i, x0) = two_product_2presplit(a0, a0hi, a0lo, b0, bhi, blo);
    let (a1hi, a1lo) = split(a1);
    let (j, t0) = two_product_2presplit(a1, a1hi, a1lo, b0, bhi, blo);
    let (k, t1) = two_sum(i, t0);
    let (l, t2) = fast_two_sum(j, k);

    let (bhi, blo) = split(b1);
    let (i, t0) = two_product_2presplit(a0, a0hi, a0lo, b1, bhi, blo);
    let (k, x1) = two_sum(t1, t0);
    let (j, t1) = two_sum(t2, k);
    let (m, t2) = two_sum(l, j);

    let (j, t0) = two_product_2presplit(a1, a1hi, a1lo, b1, bhi, blo);
    let (n, t0) = two_sum(i, t0);
    let (i, x2) = two_sum(t1, t0);
    let (k, t1) = two_sum(t2, i);
    let (l, t2) = two_sum(m, k);

    let (k, t0) = two_sum(j, n);
    let (j, x3) = two_sum(t1, t0);
    let (i, t1) = two_sum(t2, j);
    let (m, t2) = two_sum(l, i);

    let (i, x4) = two_sum(t1, k);
    let (k, x5) = two_sum(t2, i);
    let (x7, x6) = two_sum(m, k);
    [x0, x1, x2, x3, x4, x5, x6, x7]
}
