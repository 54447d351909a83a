//! Orientation of four points in space.
//!
//! The result is positive when `pd` lies below the plane through `pa, pb, pc`,
//! where "below" means that `pa, pb, pc` appear counterclockwise when viewed
//! from above the plane. It is negative above the plane and zero when the four
//! points are coplanar. Equivalently, it is the signed volume (times six) of
//! the tetrahedron `pa, pb, pc, pd`.

use super::Coord3;
use crate::bounds::{O3D_ERRBOUND_A, O3D_ERRBOUND_B, O3D_ERRBOUND_C, RESULT_ERRBOUND};
use crate::cascade::{Accumulator, Tier, escalate, settles};
use crate::eft::{two_diff_tail, two_one_product, two_product, two_two_diff};
use crate::expansion::Expansion;

/// Plain floating-point orientation. Not robust.
#[inline]
pub fn orient3d_fast(pa: &Coord3, pb: &Coord3, pc: &Coord3, pd: &Coord3) -> f64 {
    let adx = pa.x - pd.x;
    let bdx = pb.x - pd.x;
    let cdx = pc.x - pd.x;
    let ady = pa.y - pd.y;
    let bdy = pb.y - pd.y;
    let cdy = pc.y - pd.y;
    let adz = pa.z - pd.z;
    let bdz = pb.z - pd.z;
    let cdz = pc.z - pd.z;

    adx * (bdy * cdz - bdz * cdy) + bdx * (cdy * adz - cdz * ady) + cdx * (ady * bdz - adz * bdy)
}

/// Adaptive orientation with an exact sign.
#[inline]
pub fn orient3d(pa: &Coord3, pb: &Coord3, pc: &Coord3, pd: &Coord3) -> f64 {
    let adx = pa.x - pd.x;
    let bdx = pb.x - pd.x;
    let cdx = pc.x - pd.x;
    let ady = pa.y - pd.y;
    let bdy = pb.y - pd.y;
    let cdy = pc.y - pd.y;
    let adz = pa.z - pd.z;
    let bdz = pb.z - pd.z;
    let cdz = pc.z - pd.z;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;

    let det = adz * (bdxcdy - cdxbdy) + bdz * (cdxady - adxcdy) + cdz * (adxbdy - bdxady);

    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * adz.abs()
        + (cdxady.abs() + adxcdy.abs()) * bdz.abs()
        + (adxbdy.abs() + bdxady.abs()) * cdz.abs();

    if settles(det, O3D_ERRBOUND_A * permanent) {
        return det;
    }
    orient3d_adapt(pa, pb, pc, pd, permanent)
}

#[cold]
fn orient3d_adapt(pa: &Coord3, pb: &Coord3, pc: &Coord3, pd: &Coord3, permanent: f64) -> f64 {
    escalate("orient3d", Tier::Coarse);
    let adx = pa.x - pd.x;
    let bdx = pb.x - pd.x;
    let cdx = pc.x - pd.x;
    let ady = pa.y - pd.y;
    let bdy = pb.y - pd.y;
    let cdy = pc.y - pd.y;
    let adz = pa.z - pd.z;
    let bdz = pb.z - pd.z;
    let cdz = pc.z - pd.z;

    let bc = cross(bdx, cdy, cdx, bdy);
    let ca = cross(cdx, ady, adx, cdy);
    let ab = cross(adx, bdy, bdx, ady);

    let adet = Expansion::<8>::scale(&bc, adz);
    let bdet = Expansion::<8>::scale(&ca, bdz);
    let cdet = Expansion::<8>::scale(&ab, cdz);
    let abdet = Expansion::<16>::sum(&adet, &bdet);
    let coarse = Expansion::<24>::sum(&abdet, &cdet);

    let mut det = coarse.estimate();
    if settles(det, O3D_ERRBOUND_B * permanent) {
        return det;
    }

    escalate("orient3d", Tier::TailCorrected);
    let adxtail = two_diff_tail(pa.x, pd.x, adx);
    let bdxtail = two_diff_tail(pb.x, pd.x, bdx);
    let cdxtail = two_diff_tail(pc.x, pd.x, cdx);
    let adytail = two_diff_tail(pa.y, pd.y, ady);
    let bdytail = two_diff_tail(pb.y, pd.y, bdy);
    let cdytail = two_diff_tail(pc.y, pd.y, cdy);
    let adztail = two_diff_tail(pa.z, pd.z, adz);
    let bdztail = two_diff_tail(pb.z, pd.z, bdz);
    let cdztail = two_diff_tail(pc.z, pd.z, cdz);

    if adxtail == 0.0
        && bdxtail == 0.0
        && cdxtail == 0.0
        && adytail == 0.0
        && bdytail == 0.0
        && cdytail == 0.0
        && adztail == 0.0
        && bdztail == 0.0
        && cdztail == 0.0
    {
        return det;
    }

    let errbound = O3D_ERRBOUND_C * permanent + RESULT_ERRBOUND * det.abs();
    det += (adz * ((bdx * cdytail + cdy * bdxtail) - (bdy * cdxtail + cdx * bdytail))
        + adztail * (bdx * cdy - bdy * cdx))
        + (bdz * ((cdx * adytail + ady * cdxtail) - (cdy * adxtail + adx * cdytail))
            + bdztail * (cdx * ady - cdy * adx))
        + (cdz * ((adx * bdytail + bdy * adxtail) - (ady * bdxtail + bdx * adytail))
            + cdztail * (adx * bdy - ady * bdx));
    if settles(det, errbound) {
        return det;
    }

    escalate("orient3d", Tier::Exact);
    let mut fin = Accumulator::<192>::new(&coarse);

    // Terms linear in the xy tails, paired per z cofactor.
    let at_b = tail_cross(adxtail, adytail, bdx, bdy);
    let at_c = tail_cross(adytail, adxtail, cdy, cdx);
    let bt_c = tail_cross(bdxtail, bdytail, cdx, cdy);
    let bt_a = tail_cross(bdytail, bdxtail, ady, adx);
    let ct_a = tail_cross(cdxtail, cdytail, adx, ady);
    let ct_b = tail_cross(cdytail, cdxtail, bdy, bdx);

    let bct = Expansion::<8>::sum(&bt_c, &ct_b);
    fin.add(Expansion::<16>::scale(&bct, adz).components());
    let cat = Expansion::<8>::sum(&ct_a, &at_c);
    fin.add(Expansion::<16>::scale(&cat, bdz).components());
    let abt = Expansion::<8>::sum(&at_b, &bt_a);
    fin.add(Expansion::<16>::scale(&abt, cdz).components());

    if adztail != 0.0 {
        fin.add(Expansion::<8>::scale(&bc, adztail).components());
    }
    if bdztail != 0.0 {
        fin.add(Expansion::<8>::scale(&ca, bdztail).components());
    }
    if cdztail != 0.0 {
        fin.add(Expansion::<8>::scale(&ab, cdztail).components());
    }

    if adxtail != 0.0 {
        if bdytail != 0.0 {
            add_tail_product(&mut fin, adxtail, bdytail, cdz, cdztail);
        }
        if cdytail != 0.0 {
            add_tail_product(&mut fin, -adxtail, cdytail, bdz, bdztail);
        }
    }
    if bdxtail != 0.0 {
        if cdytail != 0.0 {
            add_tail_product(&mut fin, bdxtail, cdytail, adz, adztail);
        }
        if adytail != 0.0 {
            add_tail_product(&mut fin, -bdxtail, adytail, cdz, cdztail);
        }
    }
    if cdxtail != 0.0 {
        if adytail != 0.0 {
            add_tail_product(&mut fin, cdxtail, adytail, bdz, bdztail);
        }
        if bdytail != 0.0 {
            add_tail_product(&mut fin, -cdxtail, bdytail, adz, adztail);
        }
    }

    if adztail != 0.0 {
        fin.add(Expansion::<16>::scale(&bct, adztail).components());
    }
    if bdztail != 0.0 {
        fin.add(Expansion::<16>::scale(&cat, bdztail).components());
    }
    if cdztail != 0.0 {
        fin.add(Expansion::<16>::scale(&abt, cdztail).components());
    }

    fin.most_significant()
}

/// `a * b - c * d` as a four-component expansion.
#[inline(always)]
fn cross(a: f64, b: f64, c: f64, d: f64) -> Expansion<4> {
    let (s1, s0) = two_product(a, b);
    let (t1, t0) = two_product(c, d);
    Expansion::from_components(two_two_diff(s1, s0, t1, t0))
}

/// `xtail * qy - ytail * qx`, using as few components as the zero tails allow.
#[inline(always)]
fn tail_cross(xtail: f64, ytail: f64, qx: f64, qy: f64) -> Expansion<4> {
    match (xtail == 0.0, ytail == 0.0) {
        (true, true) => Expansion::zero(),
        (true, false) => {
            let (hi, lo) = two_product(-ytail, qx);
            Expansion::from_components([lo, hi])
        }
        (false, true) => {
            let (hi, lo) = two_product(xtail, qy);
            Expansion::from_components([lo, hi])
        }
        (false, false) => cross(xtail, qy, ytail, qx),
    }
}

/// Adds `xtail * ytail * (z + ztail)`, skipping a zero `ztail`.
#[inline(always)]
fn add_tail_product(fin: &mut Accumulator<192>, xtail: f64, ytail: f64, z: f64, ztail: f64) {
    let (p1, p0) = two_product(xtail, ytail);
    fin.add(&two_one_product(p1, p0, z));
    if ztail != 0.0 {
        fin.add(&two_one_product(p1, p0, ztail));
    }
}

/// Exact orientation without the adaptive filters, expanded over the input
/// coordinates.
pub fn orient3d_exact(pa: &Coord3, pb: &Coord3, pc: &Coord3, pd: &Coord3) -> f64 {
    let ab = cross(pa.x, pb.y, pb.x, pa.y);
    let bc = cross(pb.x, pc.y, pc.x, pb.y);
    let cd = cross(pc.x, pd.y, pd.x, pc.y);
    let da = cross(pd.x, pa.y, pa.x, pd.y);
    let ac = cross(pa.x, pc.y, pc.x, pa.y);
    let bd = cross(pb.x, pd.y, pd.x, pb.y);

    let cda = Expansion::<12>::sum(&Expansion::<8>::sum(&cd, &da), &ac);
    let dab = Expansion::<12>::sum(&Expansion::<8>::sum(&da, &ab), &bd);
    let abc = Expansion::<12>::sum(&Expansion::<8>::sum(&ab, &bc), &ac.negated());
    let bcd = Expansion::<12>::sum(&Expansion::<8>::sum(&bc, &cd), &bd.negated());

    let adet = Expansion::<24>::scale(&bcd, pa.z);
    let bdet = Expansion::<24>::scale(&cda, -pb.z);
    let cdet = Expansion::<24>::scale(&dab, pc.z);
    let ddet = Expansion::<24>::scale(&abc, -pd.z);

    let abdet = Expansion::<48>::sum(&adet, &bdet);
    let cddet = Expansion::<48>::sum(&cdet, &ddet);
    let deter = Expansion::<96>::sum(&abdet, &cddet);
    deter.most_significant()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::exact_escalations;
    use crate::geometry::Sign;

    fn p(x: f64, y: f64, z: f64) -> Coord3 {
        Coord3::new(x, y, z)
    }

    #[test]
    fn signed_volume_of_unit_tetrahedra() {
        let origin = p(0.0, 0.0, 0.0);
        let apex = p(0.0, 0.0, 1.0);
        let below = (origin, p(0.0, 1.0, 0.0), p(1.0, 0.0, 0.0), apex);
        assert!(orient3d(&below.0, &below.1, &below.2, &below.3) > 0.0);
        assert!(orient3d_exact(&below.0, &below.1, &below.2, &below.3) > 0.0);
        assert!(orient3d_fast(&below.0, &below.1, &below.2, &below.3) > 0.0);

        let tilted = (origin, p(1.0, 0.0, 0.0), p(0.0, 1.0, 1.0), apex);
        assert!(orient3d(&tilted.0, &tilted.1, &tilted.2, &tilted.3) < 0.0);
        assert!(orient3d_exact(&tilted.0, &tilted.1, &tilted.2, &tilted.3) < 0.0);
    }

    #[test]
    fn coplanar_points_give_exact_zero() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(1.0, 1.0, 0.0);
        let c = p(0.0, 1.0, 1.0);
        assert_eq!(orient3d(&a, &b, &c, &c), 0.0);
        assert_eq!(orient3d_exact(&a, &b, &c, &c), 0.0);

        let d = p(1.0, 2.0, 1.0);
        assert_eq!(orient3d(&a, &b, &c, &d), 0.0);
        assert_eq!(orient3d_exact(&a, &b, &c, &d), 0.0);
    }

    #[test]
    fn inexact_differences_match_exact_evaluation() {
        // The plane z = 0.1 x + 0.3 y sampled at coordinates whose differences
        // round; the fourth point is nudged by one ulp in z.
        let a = p(0.1, 0.2, 0.1 * 0.1 + 0.3 * 0.2);
        let b = p(1.7, 0.3, 0.1 * 1.7 + 0.3 * 0.3);
        let c = p(0.4, 2.9, 0.1 * 0.4 + 0.3 * 2.9);
        let z: f64 = 0.1 * 3.3 + 0.3 * 1.1;
        for dz in [f64::from_bits(z.to_bits() - 1), z, f64::from_bits(z.to_bits() + 1)] {
            let d = p(3.3, 1.1, dz);
            let expected = orient3d_exact(&a, &b, &c, &d);
            let robust = orient3d(&a, &b, &c, &d);
            assert_eq!(robust > 0.0, expected > 0.0);
            assert_eq!(robust < 0.0, expected < 0.0);
        }
    }

    #[test]
    fn shifted_lattice_reaches_the_exact_tier() {
        // Coplanar integer points shifted by an inexact offset, one
        // coordinate nudged by a few ulps.
        let cases = [
            (
                [
                    p(13.001, 5.001, -17.999),
                    p(16.001, 0.001, -18.999),
                    p(10.001, 2.001, -16.999),
                    p(-1.9990000000000006, 14.001, -12.999),
                ],
                Sign::Negative,
            ),
            (
                [
                    p(4.001, -7.999, -14.999),
                    p(3.001, -5.999, -16.999),
                    p(2.001, -5.999, -15.999),
                    p(8.001, -13.999, -9.999),
                ],
                Sign::Negative,
            ),
            (
                [
                    p(-17.999, 3.001, 6.000999999999999),
                    p(-21.999, -0.999, 11.001),
                    p(-19.999, 1.001, 3.001),
                    p(-23.999, -2.999, -2.999),
                ],
                Sign::Positive,
            ),
            (
                [
                    p(9.3, 11.3, -10.700000000000005),
                    p(12.3, 14.3, -13.7),
                    p(12.3, 14.3, -7.7),
                    p(15.3, 17.3, 1.3),
                ],
                Sign::Zero,
            ),
        ];
        for ([a, b, c, d], expected) in cases {
            let before = exact_escalations();
            let robust = orient3d(&a, &b, &c, &d);
            assert_eq!(exact_escalations(), before + 1);
            assert_eq!(Sign::of(robust), expected);
            assert_eq!(Sign::of(orient3d_exact(&a, &b, &c, &d)), expected);
            assert_eq!(Sign::of(orient3d(&b, &a, &c, &d)), expected.reversed());
        }
    }
}
