//! In-circle test for four points in the plane.
//!
//! The result is positive when `pd` lies inside the circle through `pa, pb, pc`,
//! negative when it lies outside and zero when the four points are cocircular.
//! `pa, pb, pc` must be in counterclockwise order, or the sign is reversed.

use super::Coord;
use crate::bounds::{ICC_ERRBOUND_A, ICC_ERRBOUND_B, ICC_ERRBOUND_C, RESULT_ERRBOUND};
use crate::cascade::{Accumulator, Tier, escalate, settles};
use crate::eft::{square, two_diff_tail, two_product, two_two_diff, two_two_sum};
use crate::expansion::Expansion;

/// Plain floating-point in-circle test. Not robust.
#[inline]
pub fn incircle_fast(pa: &Coord, pb: &Coord, pc: &Coord, pd: &Coord) -> f64 {
    let adx = pa.x - pd.x;
    let ady = pa.y - pd.y;
    let bdx = pb.x - pd.x;
    let bdy = pb.y - pd.y;
    let cdx = pc.x - pd.x;
    let cdy = pc.y - pd.y;

    let abdet = adx * bdy - bdx * ady;
    let bcdet = bdx * cdy - cdx * bdy;
    let cadet = cdx * ady - adx * cdy;
    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    alift * bcdet + blift * cadet + clift * abdet
}

/// Adaptive in-circle test with an exact sign.
#[inline]
pub fn incircle(pa: &Coord, pb: &Coord, pc: &Coord, pd: &Coord) -> f64 {
    let adx = pa.x - pd.x;
    let bdx = pb.x - pd.x;
    let cdx = pc.x - pd.x;
    let ady = pa.y - pd.y;
    let bdy = pb.y - pd.y;
    let cdy = pc.y - pd.y;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let alift = adx * adx + ady * ady;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let blift = bdx * bdx + bdy * bdy;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy) + blift * (cdxady - adxcdy) + clift * (adxbdy - bdxady);

    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * alift
        + (cdxady.abs() + adxcdy.abs()) * blift
        + (adxbdy.abs() + bdxady.abs()) * clift;

    if settles(det, ICC_ERRBOUND_A * permanent) {
        return det;
    }
    incircle_adapt(pa, pb, pc, pd, permanent)
}

/// Translated coordinates of one input point relative to `pd`, with the
/// rounding error of each difference and the exact squared distance.
struct Lifted {
    dx: f64,
    dy: f64,
    dxtail: f64,
    dytail: f64,
    square: Expansion<4>,
}

impl Lifted {
    fn new(p: &Coord, pd: &Coord) -> Self {
        let dx = p.x - pd.x;
        let dy = p.y - pd.y;
        let (dxdx1, dxdx0) = square(dx);
        let (dydy1, dydy0) = square(dy);
        Self {
            dx,
            dy,
            dxtail: two_diff_tail(p.x, pd.x, dx),
            dytail: two_diff_tail(p.y, pd.y, dy),
            square: Expansion::from_components(two_two_sum(dxdx1, dxdx0, dydy1, dydy0)),
        }
    }

    fn has_tail(&self) -> bool {
        self.dxtail != 0.0 || self.dytail != 0.0
    }
}

#[cold]
fn incircle_adapt(pa: &Coord, pb: &Coord, pc: &Coord, pd: &Coord, permanent: f64) -> f64 {
    escalate("incircle", Tier::Coarse);
    let adx = pa.x - pd.x;
    let bdx = pb.x - pd.x;
    let cdx = pc.x - pd.x;
    let ady = pa.y - pd.y;
    let bdy = pb.y - pd.y;
    let cdy = pc.y - pd.y;

    let bc = cross(bdx, cdy, cdx, bdy);
    let ca = cross(cdx, ady, adx, cdy);
    let ab = cross(adx, bdy, bdx, ady);

    let abdet = Expansion::<64>::sum(&lift(&bc, adx, ady), &lift(&ca, bdx, bdy));
    let coarse = Expansion::<96>::sum(&abdet, &lift(&ab, cdx, cdy));

    let mut det = coarse.estimate();
    if settles(det, ICC_ERRBOUND_B * permanent) {
        return det;
    }

    escalate("incircle", Tier::TailCorrected);
    let a = Lifted::new(pa, pd);
    let b = Lifted::new(pb, pd);
    let c = Lifted::new(pc, pd);

    if !a.has_tail() && !b.has_tail() && !c.has_tail() {
        return det;
    }

    let (adxtail, adytail) = (a.dxtail, a.dytail);
    let (bdxtail, bdytail) = (b.dxtail, b.dytail);
    let (cdxtail, cdytail) = (c.dxtail, c.dytail);

    let errbound = ICC_ERRBOUND_C * permanent + RESULT_ERRBOUND * det.abs();
    det += ((adx * adx + ady * ady)
        * ((bdx * cdytail + cdy * bdxtail) - (bdy * cdxtail + cdx * bdytail))
        + 2.0 * (adx * adxtail + ady * adytail) * (bdx * cdy - bdy * cdx))
        + ((bdx * bdx + bdy * bdy)
            * ((cdx * adytail + ady * cdxtail) - (cdy * adxtail + adx * cdytail))
            + 2.0 * (bdx * bdxtail + bdy * bdytail) * (cdx * ady - cdy * adx))
        + ((cdx * cdx + cdy * cdy)
            * ((adx * bdytail + bdy * adxtail) - (ady * bdxtail + bdx * adytail))
            + 2.0 * (cdx * cdxtail + cdy * cdytail) * (adx * bdy - ady * bdx));
    if settles(det, errbound) {
        return det;
    }

    escalate("incircle", Tier::Exact);
    let mut fin = Accumulator::<1152>::new(&coarse);

    // Each vertex is visited with the two that follow it cyclically and the
    // cofactor they span.
    let rotations = [(&a, &b, &c, &bc), (&b, &c, &a, &ca), (&c, &a, &b, &ab)];

    let mut scaled_cofactors: [(Expansion<8>, Expansion<8>); 3] =
        std::array::from_fn(|_| (Expansion::zero(), Expansion::zero()));
    for (slot, &(p, q, r, cofactor)) in scaled_cofactors.iter_mut().zip(&rotations) {
        if p.dxtail != 0.0 {
            slot.0 = Expansion::scale(cofactor, p.dxtail);
            fin.add(
                first_order(&slot.0, p.dx, p.dxtail, (&r.square, q.dy), (&q.square, -r.dy))
                    .components(),
            );
        }
        if p.dytail != 0.0 {
            slot.1 = Expansion::scale(cofactor, p.dytail);
            fin.add(
                first_order(&slot.1, p.dy, p.dytail, (&q.square, r.dx), (&r.square, -q.dx))
                    .components(),
            );
        }
    }

    for ((p, q, r, _), (xt_cofactor, yt_cofactor)) in rotations.iter().zip(&scaled_cofactors) {
        if !p.has_tail() {
            continue;
        }

        // Cofactor terms linear and quadratic in the tails of `q` and `r`.
        let (linear, quadratic) = if q.has_tail() || r.has_tail() {
            let (ti1, ti0) = two_product(q.dxtail, r.dy);
            let (tj1, tj0) = two_product(q.dx, r.dytail);
            let u = Expansion::<4>::from_components(two_two_sum(ti1, ti0, tj1, tj0));
            let (ti1, ti0) = two_product(r.dxtail, -q.dy);
            let (tj1, tj0) = two_product(r.dx, -q.dytail);
            let v = Expansion::<4>::from_components(two_two_sum(ti1, ti0, tj1, tj0));
            (
                Expansion::<8>::sum(&u, &v),
                cross(q.dxtail, r.dytail, r.dxtail, q.dytail),
            )
        } else {
            (Expansion::zero(), Expansion::zero())
        };

        if p.dxtail != 0.0 {
            let tail = p.dxtail;
            let tail_linear = Expansion::<16>::scale(&linear, tail);
            fin.add(second_order(xt_cofactor, &tail_linear, p.dx, tail).components());
            if q.dytail != 0.0 {
                let scaled = Expansion::<8>::scale(&r.square, tail);
                fin.add(Expansion::<16>::scale(&scaled, q.dytail).components());
            }
            if r.dytail != 0.0 {
                let scaled = Expansion::<8>::scale(&q.square, -tail);
                fin.add(Expansion::<16>::scale(&scaled, r.dytail).components());
            }
            fin.add(third_order(&tail_linear, &quadratic, p.dx, tail).components());
        }
        if p.dytail != 0.0 {
            let tail = p.dytail;
            let tail_linear = Expansion::<16>::scale(&linear, tail);
            fin.add(second_order(yt_cofactor, &tail_linear, p.dy, tail).components());
            fin.add(third_order(&tail_linear, &quadratic, p.dy, tail).components());
        }
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

/// `cofactor * (dx² + dy²)`.
fn lift(cofactor: &Expansion<4>, dx: f64, dy: f64) -> Expansion<32> {
    let xx = Expansion::<16>::scale(&Expansion::<8>::scale(cofactor, dx), dx);
    let yy = Expansion::<16>::scale(&Expansion::<8>::scale(cofactor, dy), dy);
    Expansion::sum(&xx, &yy)
}

/// Terms linear in one coordinate tail: the lifted cofactor contribution
/// `2 * coord * (cofactor * tail)` and the two squared distances scaled by the
/// tail and a cross coordinate.
fn first_order(
    tail_cofactor: &Expansion<8>,
    coord: f64,
    tail: f64,
    (first, first_factor): (&Expansion<4>, f64),
    (second, second_factor): (&Expansion<4>, f64),
) -> Expansion<48> {
    let temp16a = Expansion::<16>::scale(tail_cofactor, 2.0 * coord);
    let temp16b = Expansion::<16>::scale(&Expansion::<8>::scale(first, tail), first_factor);
    let temp16c = Expansion::<16>::scale(&Expansion::<8>::scale(second, tail), second_factor);
    let temp32a = Expansion::<32>::sum(&temp16a, &temp16b);
    Expansion::sum(&temp16c, &temp32a)
}

/// `tail² * cofactor + 2 * coord * tail * linear`.
fn second_order(
    tail_cofactor: &Expansion<8>,
    tail_linear: &Expansion<16>,
    coord: f64,
    tail: f64,
) -> Expansion<48> {
    let temp16a = Expansion::<16>::scale(tail_cofactor, tail);
    let temp32a = Expansion::<32>::scale(tail_linear, 2.0 * coord);
    Expansion::sum(&temp16a, &temp32a)
}

/// `tail² * linear + (2 * coord + tail) * tail * quadratic`.
fn third_order(
    tail_linear: &Expansion<16>,
    quadratic: &Expansion<4>,
    coord: f64,
    tail: f64,
) -> Expansion<64> {
    let temp32a = Expansion::<32>::scale(tail_linear, tail);
    let tail_quadratic = Expansion::<8>::scale(quadratic, tail);
    let temp16a = Expansion::<16>::scale(&tail_quadratic, 2.0 * coord);
    let temp16b = Expansion::<16>::scale(&tail_quadratic, tail);
    let temp32b = Expansion::<32>::sum(&temp16a, &temp16b);
    Expansion::sum(&temp32a, &temp32b)
}

/// Exact in-circle test without the adaptive filters, expanded over the
/// input coordinates.
pub fn incircle_exact(pa: &Coord, pb: &Coord, pc: &Coord, pd: &Coord) -> f64 {
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

    let adet = lifted_exact(&bcd, pa, 1.0);
    let bdet = lifted_exact(&cda, pb, -1.0);
    let cdet = lifted_exact(&dab, pc, 1.0);
    let ddet = lifted_exact(&abc, pd, -1.0);

    let abdet = Expansion::<192>::sum(&adet, &bdet);
    let cddet = Expansion::<192>::sum(&cdet, &ddet);
    let deter = Expansion::<384>::sum(&abdet, &cddet);
    deter.most_significant()
}

/// `sign * cofactor * (p.x² + p.y²)`.
fn lifted_exact(cofactor: &Expansion<12>, p: &Coord, sign: f64) -> Expansion<96> {
    let det48x = Expansion::<48>::scale(&Expansion::<24>::scale(cofactor, p.x), sign * p.x);
    let det48y = Expansion::<48>::scale(&Expansion::<24>::scale(cofactor, p.y), sign * p.y);
    Expansion::sum(&det48x, &det48y)
}
