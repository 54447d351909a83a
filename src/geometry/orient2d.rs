//! Orientation of three points in the plane.
//!
//! Every entry point returns a value whose sign is the sign of
//! `det(pa - pc, pb - pc)`: positive when `pa, pb, pc` turn counterclockwise,
//! negative when clockwise and zero when collinear.

use super::Coord;
use crate::bounds::{CCW_ERRBOUND_A, CCW_ERRBOUND_B, CCW_ERRBOUND_C, RESULT_ERRBOUND};
use crate::cascade::{Tier, escalate, settles};
use crate::eft::{two_diff, two_diff_tail, two_product, two_two_diff, two_two_product};
use crate::expansion::Expansion;

/// Plain floating-point orientation. Fast, but the sign is wrong when the
/// points are nearly collinear.
#[inline]
pub fn orient2d_fast(pa: &Coord, pb: &Coord, pc: &Coord) -> f64 {
    let acx = pa.x - pc.x;
    let bcx = pb.x - pc.x;
    let acy = pa.y - pc.y;
    let bcy = pb.y - pc.y;
    acx * bcy - acy * bcx
}

/// Adaptive orientation with an exact sign.
///
/// The floating-point determinant is returned as is when the error bound
/// proves its sign. Otherwise the computation escalates tier by tier and
/// returns the first approximation whose sign is certain.
#[inline]
pub fn orient2d(pa: &Coord, pb: &Coord, pc: &Coord) -> f64 {
    let detleft = (pa.x - pc.x) * (pb.y - pc.y);
    let detright = (pa.y - pc.y) * (pb.x - pc.x);
    let det = detleft - detright;

    // Products of opposite sign (or a zero left product) cannot cancel.
    let detsum = if detleft > 0.0 {
        if detright <= 0.0 {
            return det;
        }
        detleft + detright
    } else if detleft < 0.0 {
        if detright >= 0.0 {
            return det;
        }
        -detleft - detright
    } else {
        return det;
    };

    if settles(det, CCW_ERRBOUND_A * detsum) {
        return det;
    }
    orient2d_adapt(pa, pb, pc, detsum)
}

#[cold]
fn orient2d_adapt(pa: &Coord, pb: &Coord, pc: &Coord, detsum: f64) -> f64 {
    escalate("orient2d", Tier::Coarse);
    let acx = pa.x - pc.x;
    let bcx = pb.x - pc.x;
    let acy = pa.y - pc.y;
    let bcy = pb.y - pc.y;

    let (detleft, detlefttail) = two_product(acx, bcy);
    let (detright, detrighttail) = two_product(acy, bcx);
    let b = Expansion::<4>::from_components(two_two_diff(
        detleft,
        detlefttail,
        detright,
        detrighttail,
    ));

    let mut det = b.estimate();
    if settles(det, CCW_ERRBOUND_B * detsum) {
        return det;
    }

    escalate("orient2d", Tier::TailCorrected);
    let acxtail = two_diff_tail(pa.x, pc.x, acx);
    let bcxtail = two_diff_tail(pb.x, pc.x, bcx);
    let acytail = two_diff_tail(pa.y, pc.y, acy);
    let bcytail = two_diff_tail(pb.y, pc.y, bcy);

    if acxtail == 0.0 && acytail == 0.0 && bcxtail == 0.0 && bcytail == 0.0 {
        return det;
    }

    let errbound = CCW_ERRBOUND_C * detsum + RESULT_ERRBOUND * det.abs();
    det += (acx * bcytail + bcy * acxtail) - (acy * bcxtail + bcx * acytail);
    if settles(det, errbound) {
        return det;
    }

    escalate("orient2d", Tier::Exact);
    let c1 = Expansion::<8>::sum(&b, &cross_difference(acxtail, bcy, acytail, bcx));
    let c2 = Expansion::<12>::sum(&c1, &cross_difference(acx, bcytail, acy, bcxtail));
    let d = Expansion::<16>::sum(&c2, &cross_difference(acxtail, bcytail, acytail, bcxtail));
    d.most_significant()
}

/// `a * b - c * d` as a four-component expansion.
#[inline(always)]
fn cross_difference(a: f64, b: f64, c: f64, d: f64) -> Expansion<4> {
    let (s1, s0) = two_product(a, b);
    let (t1, t0) = two_product(c, d);
    Expansion::from_components(two_two_diff(s1, s0, t1, t0))
}

/// Exact orientation without the adaptive filters, expanded directly over the
/// input coordinates.
pub fn orient2d_exact(pa: &Coord, pb: &Coord, pc: &Coord) -> f64 {
    let aterms = cross_difference(pa.x, pb.y, pa.x, pc.y);
    let bterms = cross_difference(pb.x, pc.y, pb.x, pa.y);
    let cterms = cross_difference(pc.x, pa.y, pc.x, pb.y);
    let v = Expansion::<8>::sum(&aterms, &bterms);
    let w = Expansion::<12>::sum(&v, &cterms);
    w.most_significant()
}

/// Exact orientation from the exactly represented coordinate differences.
/// Slower than [`orient2d_exact`]; kept as an independent cross-check.
pub fn orient2d_slow(pa: &Coord, pb: &Coord, pc: &Coord) -> f64 {
    let (acx, acxtail) = two_diff(pa.x, pc.x);
    let (acy, acytail) = two_diff(pa.y, pc.y);
    let (bcx, bcxtail) = two_diff(pb.x, pc.x);
    let (bcy, bcytail) = two_diff(pb.y, pc.y);

    let axby = Expansion::<8>::from_components(two_two_product(acx, acxtail, bcy, bcytail));
    let bxay = Expansion::<8>::from_components(two_two_product(bcx, bcxtail, -acy, -acytail));
    let deter = Expansion::<16>::sum(&axby, &bxay);
    deter.most_significant()
}
