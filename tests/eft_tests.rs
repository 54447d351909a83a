use adaptive_predicates::eft::{
    fast_two_sum, split, square, two_diff, two_one_diff, two_one_product, two_one_sum,
    two_product, two_sum, two_two_diff, two_two_product, two_two_sum,
};
use num_rational::BigRational;
use num_traits::Zero;
use quickcheck::{QuickCheck, TestResult};
use quickcheck_macros::quickcheck;

const QC_TESTS: u64 = 500;
const QC_MAX_TESTS: u64 = 20_000;

const LCG_A: u64 = 6364136223846793005;
const LCG_C: u64 = 1;

/// Products of operands inside this range neither overflow nor lose bits to
/// underflow.
const PRODUCT_LIMIT: f64 = 1.0e140;

fn f64_to_rational(value: f64) -> Option<BigRational> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        return Some(BigRational::zero());
    }
    BigRational::from_float(value)
}

fn components_to_rational(components: &[f64]) -> Option<BigRational> {
    components
        .iter()
        .try_fold(BigRational::zero(), |acc, &component| {
            Some(acc + f64_to_rational(component)?)
        })
}

fn product_safe(values: &[f64]) -> bool {
    values.iter().all(|&v| {
        v == 0.0 || (v.is_finite() && (1.0 / PRODUCT_LIMIT..=PRODUCT_LIMIT).contains(&v.abs()))
    })
}

fn lcg_next(state: &mut u64) -> f64 {
    *state = state.wrapping_mul(LCG_A).wrapping_add(LCG_C);
    let val = ((*state >> 32) as f64) / (u32::MAX as f64);
    (val * 2.0) - 1.0
}

/// Random value with a random binary exponent in `[-40, 40]`.
fn lcg_scaled(state: &mut u64) -> f64 {
    let mantissa = lcg_next(state);
    let exponent = (lcg_next(state) * 40.0).round() as i32;
    mantissa * 2.0f64.powi(exponent)
}

/// Two-component expansion `(hi, lo)` whose components usually both carry
/// bits.
fn lcg_pair(state: &mut u64) -> (f64, f64) {
    let hi = lcg_scaled(state);
    let lo = hi * f64::EPSILON * lcg_next(state) / 3.0;
    two_sum(hi, lo)
}

fn run_qc_seed(prop: fn(u64) -> TestResult) {
    QuickCheck::new()
        .tests(QC_TESTS)
        .max_tests(QC_MAX_TESTS)
        .quickcheck(prop);
}

#[quickcheck]
fn two_sum_is_exact(a: f64, b: f64) -> TestResult {
    let (Some(ra), Some(rb)) = (f64_to_rational(a), f64_to_rational(b)) else {
        return TestResult::discard();
    };
    let (sum, err) = two_sum(a, b);
    let Some(rs) = components_to_rational(&[err, sum]) else {
        return TestResult::discard();
    };
    TestResult::from_bool(sum == a + b && rs == ra + rb)
}

#[quickcheck]
fn two_diff_is_exact(a: f64, b: f64) -> TestResult {
    let (Some(ra), Some(rb)) = (f64_to_rational(a), f64_to_rational(b)) else {
        return TestResult::discard();
    };
    let (diff, err) = two_diff(a, b);
    let Some(rd) = components_to_rational(&[err, diff]) else {
        return TestResult::discard();
    };
    TestResult::from_bool(diff == a - b && rd == ra - rb)
}

#[quickcheck]
fn fast_two_sum_agrees_with_two_sum_when_ordered(a: f64, b: f64) -> TestResult {
    if !(a.is_finite() && b.is_finite() && (a + b).is_finite()) {
        return TestResult::discard();
    }
    let (big, small) = if a.abs() >= b.abs() { (a, b) } else { (b, a) };
    TestResult::from_bool(fast_two_sum(big, small) == two_sum(big, small))
}

#[quickcheck]
fn two_product_is_exact(a: f64, b: f64) -> TestResult {
    if !product_safe(&[a, b]) {
        return TestResult::discard();
    }
    let (Some(ra), Some(rb)) = (f64_to_rational(a), f64_to_rational(b)) else {
        return TestResult::discard();
    };
    let (product, err) = two_product(a, b);
    let Some(rp) = components_to_rational(&[err, product]) else {
        return TestResult::discard();
    };
    TestResult::from_bool(product == a * b && rp == ra * rb)
}

#[quickcheck]
fn square_matches_two_product(a: f64) -> TestResult {
    if !product_safe(&[a]) {
        return TestResult::discard();
    }
    TestResult::from_bool(square(a) == two_product(a, a))
}

#[quickcheck]
fn split_halves_recombine(a: f64) -> TestResult {
    if !(a == 0.0 || (1.0e-100..=1.0e100).contains(&a.abs())) {
        return TestResult::discard();
    }
    let (hi, lo) = split(a);
    // Each half fits in 26 bits, so its square is exact.
    let exact_square = |x: f64| f64_to_rational(x * x) == f64_to_rational(x).map(|r| &r * &r);
    TestResult::from_bool(hi + lo == a && exact_square(hi) && exact_square(lo))
}

fn property_two_one_sums(seed: u64) -> TestResult {
    let mut state = seed;
    let (a1, a0) = lcg_pair(&mut state);
    let b = lcg_scaled(&mut state);
    let (Some(ra), Some(rb)) = (components_to_rational(&[a0, a1]), f64_to_rational(b)) else {
        return TestResult::discard();
    };
    let (Some(sum), Some(diff)) = (
        components_to_rational(&two_one_sum(a1, a0, b)),
        components_to_rational(&two_one_diff(a1, a0, b)),
    ) else {
        return TestResult::discard();
    };
    TestResult::from_bool(sum == &ra + &rb && diff == ra - rb)
}

#[test]
fn quickcheck_two_one_sums() {
    run_qc_seed(property_two_one_sums);
}

fn property_two_two_sums(seed: u64) -> TestResult {
    let mut state = seed;
    let (a1, a0) = lcg_pair(&mut state);
    let (b1, b0) = lcg_pair(&mut state);
    let (Some(ra), Some(rb)) = (
        components_to_rational(&[a0, a1]),
        components_to_rational(&[b0, b1]),
    ) else {
        return TestResult::discard();
    };
    let sum = two_two_sum(a1, a0, b1, b0);
    let diff = two_two_diff(a1, a0, b1, b0);
    let (Some(rsum), Some(rdiff)) = (components_to_rational(&sum), components_to_rational(&diff))
    else {
        return TestResult::discard();
    };
    TestResult::from_bool(rsum == &ra + &rb && rdiff == ra - rb)
}

#[test]
fn quickcheck_two_two_sums() {
    run_qc_seed(property_two_two_sums);
}

fn property_two_one_product(seed: u64) -> TestResult {
    let mut state = seed;
    let (a1, a0) = lcg_pair(&mut state);
    let b = lcg_scaled(&mut state);
    let (Some(ra), Some(rb)) = (components_to_rational(&[a0, a1]), f64_to_rational(b)) else {
        return TestResult::discard();
    };
    let product = two_one_product(a1, a0, b);
    let Some(rp) = components_to_rational(&product) else {
        return TestResult::discard();
    };
    TestResult::from_bool(rp == ra * rb)
}

#[test]
fn quickcheck_two_one_product() {
    run_qc_seed(property_two_one_product);
}

fn property_two_two_product(seed: u64) -> TestResult {
    let mut state = seed;
    let (a1, a0) = lcg_pair(&mut state);
    let (b1, b0) = lcg_pair(&mut state);
    let (Some(ra), Some(rb)) = (
        components_to_rational(&[a0, a1]),
        components_to_rational(&[b0, b1]),
    ) else {
        return TestResult::discard();
    };
    let Some(rp) = components_to_rational(&two_two_product(a1, a0, b1, b0)) else {
        return TestResult::discard();
    };
    TestResult::from_bool(rp == ra * rb)
}

#[test]
fn quickcheck_two_two_product() {
    run_qc_seed(property_two_two_product);
}

#[test]
fn explicit_half_ulp_tie() {
    let tiny = 2f64.powi(-53);
    assert_eq!(two_sum(1.0, tiny), (1.0, tiny));
    assert_eq!(two_diff(1.0, tiny), (1.0 - 2f64.powi(-53), 0.0));
}
