//! In-sphere test for five points in space.
//!
//! The result is positive when `pe` lies inside the sphere through
//! `pa, pb, pc, pd`, negative when it lies outside and zero when the five
//! points are cospherical. `pa, pb, pc, pd` must be ordered so that
//! [`orient3d`](super::orient3d) of them is positive, or the sign is reversed.

use super::Coord3;
use crate::bounds::{ISP_ERRBOUND_A, ISP_ERRBOUND_B, ISP_ERRBOUND_C, RESULT_ERRBOUND};
use crate::cascade::{Tier, escalate, settles};
use crate::eft::{two_diff_tail, two_product, two_two_diff};
use crate::expansion::Expansion;

/// Plain floating-point in-sphere test. Not robust.
#[inline]
pub fn insphere_fast(pa: &Coord3, pb: &Coord3, pc: &Coord3, pd: &Coord3, pe: &Coord3) -> f64 {
    let aex = pa.x - pe.x;
    let bex = pb.x - pe.x;
    let cex = pc.x - pe.x;
    let dex = pd.x - pe.x;
    let aey = pa.y - pe.y;
    let bey = pb.y - pe.y;
    let cey = pc.y - pe.y;
    let dey = pd.y - pe.y;
    let aez = pa.z - pe.z;
    let bez = pb.z - pe.z;
    let cez = pc.z - pe.z;
    let dez = pd.z - pe.z;

    let ab = aex * bey - bex * aey;
    let bc = bex * cey - cex * bey;
    let cd = cex * dey - dex * cey;
    let da = dex * aey - aex * dey;

    let ac = aex * cey - cex * aey;
    let bd = bex * dey - dex * bey;

    let abc = aez * bc - bez * ac + cez * ab;
    let bcd = bez * cd - cez * bd + dez * bc;
    let cda = cez * da + dez * ac + aez * cd;
    let dab = dez * ab + aez * bd + bez * da;

    let alift = aex * aex + aey * aey + aez * aez;
    let blift = bex * bex + bey * bey + bez * bez;
    let clift = cex * cex + cey * cey + cez * cez;
    let dlift = dex * dex + dey * dey + dez * dez;

    (dlift * abc - clift * dab) + (blift * cda - alift * bcd)
}

/// Adaptive in-sphere test with an exact sign.
pub fn insphere(pa: &Coord3, pb: &Coord3, pc: &Coord3, pd: &Coord3, pe: &Coord3) -> f64 {
    let aex = pa.x - pe.x;
    let bex = pb.x - pe.x;
    let cex = pc.x - pe.x;
    let dex = pd.x - pe.x;
    let aey = pa.y - pe.y;
    let bey = pb.y - pe.y;
    let cey = pc.y - pe.y;
    let dey = pd.y - pe.y;
    let aez = pa.z - pe.z;
    let bez = pb.z - pe.z;
    let cez = pc.z - pe.z;
    let dez = pd.z - pe.z;

    let aexbey = aex * bey;
    let bexaey = bex * aey;
    let ab = aexbey - bexaey;
    let bexcey = bex * cey;
    let cexbey = cex * bey;
    let bc = bexcey - cexbey;
    let cexdey = cex * dey;
    let dexcey = dex * cey;
    let cd = cexdey - dexcey;
    let dexaey = dex * aey;
    let aexdey = aex * dey;
    let da = dexaey - aexdey;

    let aexcey = aex * cey;
    let cexaey = cex * aey;
    let ac = aexcey - cexaey;
    let bexdey = bex * dey;
    let dexbey = dex * bey;
    let bd = bexdey - dexbey;

    let abc = aez * bc - bez * ac + cez * ab;
    let bcd = bez * cd - cez * bd + dez * bc;
    let cda = cez * da + dez * ac + aez * cd;
    let dab = dez * ab + aez * bd + bez * da;

    let alift = aex * aex + aey * aey + aez * aez;
    let blift = bex * bex + bey * bey + bez * bez;
    let clift = cex * cex + cey * cey + cez * cez;
    let dlift = dex * dex + dey * dey + dez * dez;

    let det = (dlift * abc - clift * dab) + (blift * cda - alift * bcd);

    let (aezplus, bezplus, cezplus, dezplus) = (aez.abs(), bez.abs(), cez.abs(), dez.abs());
    let aexbeyplus = aexbey.abs();
    let bexaeyplus = bexaey.abs();
    let bexceyplus = bexcey.abs();
    let cexbeyplus = cexbey.abs();
    let cexdeyplus = cexdey.abs();
    let dexceyplus = dexcey.abs();
    let dexaeyplus = dexaey.abs();
    let aexdeyplus = aexdey.abs();
    let aexceyplus = aexcey.abs();
    let cexaeyplus = cexaey.abs();
    let bexdeyplus = bexdey.abs();
    let dexbeyplus = dexbey.abs();
    let permanent = ((cexdeyplus + dexceyplus) * bezplus
        + (dexbeyplus + bexdeyplus) * cezplus
        + (bexceyplus + cexbeyplus) * dezplus)
        * alift
        + ((dexaeyplus + aexdeyplus) * cezplus
            + (aexceyplus + cexaeyplus) * dezplus
            + (cexdeyplus + dexceyplus) * aezplus)
            * blift
        + ((aexbeyplus + bexaeyplus) * dezplus
            + (bexdeyplus + dexbeyplus) * aezplus
            + (dexaeyplus + aexdeyplus) * bezplus)
            * clift
        + ((bexceyplus + cexbeyplus) * aezplus
            + (cexaeyplus + aexceyplus) * bezplus
            + (aexbeyplus + bexaeyplus) * cezplus)
            * dlift;

    if settles(det, ISP_ERRBOUND_A * permanent) {
        return det;
    }
    insphere_adapt(pa, pb, pc, pd, pe, permanent)
}

#[cold]
fn insphere_adapt(
    pa: &Coord3,
    pb: &Coord3,
    pc: &Coord3,
    pd: &Coord3,
    pe: &Coord3,
    permanent: f64,
) -> f64 {
    escalate("insphere", Tier::Coarse);
    let aex = pa.x - pe.x;
    let bex = pb.x - pe.x;
    let cex = pc.x - pe.x;
    let dex = pd.x - pe.x;
    let aey = pa.y - pe.y;
    let bey = pb.y - pe.y;
    let cey = pc.y - pe.y;
    let dey = pd.y - pe.y;
    let aez = pa.z - pe.z;
    let bez = pb.z - pe.z;
    let cez = pc.z - pe.z;
    let dez = pd.z - pe.z;

    let ab = cross(aex, bey, bex, aey);
    let bc = cross(bex, cey, cex, bey);
    let cd = cross(cex, dey, dex, cey);
    let da = cross(dex, aey, aex, dey);
    let ac = cross(aex, cey, cex, aey);
    let bd = cross(bex, dey, dex, bey);

    let det = {
        let adet = lift([(&cd, bez), (&bd, -cez), (&bc, dez)], aex, aey, aez, -1.0);
        let bdet = lift([(&da, cez), (&ac, dez), (&cd, aez)], bex, bey, bez, 1.0);
        let abdet = Expansion::<576>::sum(&adet, &bdet);
        let cdet = lift([(&ab, dez), (&bd, aez), (&da, bez)], cex, cey, cez, -1.0);
        let ddet = lift([(&bc, aez), (&ac, -bez), (&ab, cez)], dex, dey, dez, 1.0);
        let cddet = Expansion::<576>::sum(&cdet, &ddet);
        Expansion::<1152>::sum(&abdet, &cddet).estimate()
    };
    if settles(det, ISP_ERRBOUND_B * permanent) {
        return det;
    }

    escalate("insphere", Tier::TailCorrected);
    let aextail = two_diff_tail(pa.x, pe.x, aex);
    let aeytail = two_diff_tail(pa.y, pe.y, aey);
    let aeztail = two_diff_tail(pa.z, pe.z, aez);
    let bextail = two_diff_tail(pb.x, pe.x, bex);
    let beytail = two_diff_tail(pb.y, pe.y, bey);
    let beztail = two_diff_tail(pb.z, pe.z, bez);
    let cextail = two_diff_tail(pc.x, pe.x, cex);
    let ceytail = two_diff_tail(pc.y, pe.y, cey);
    let ceztail = two_diff_tail(pc.z, pe.z, cez);
    let dextail = two_diff_tail(pd.x, pe.x, dex);
    let deytail = two_diff_tail(pd.y, pe.y, dey);
    let deztail = two_diff_tail(pd.z, pe.z, dez);

    let tails = [
        aextail, aeytail, aeztail, bextail, beytail, beztail, cextail, ceytail, ceztail, dextail,
        deytail, deztail,
    ];
    if tails.iter().all(|&tail| tail == 0.0) {
        return det;
    }

    let ab3 = ab.most_significant();
    let bc3 = bc.most_significant();
    let cd3 = cd.most_significant();
    let da3 = da.most_significant();
    let ac3 = ac.most_significant();
    let bd3 = bd.most_significant();

    let errbound = ISP_ERRBOUND_C * permanent + RESULT_ERRBOUND * det.abs();
    let abeps = (aex * beytail + bey * aextail) - (aey * bextail + bex * aeytail);
    let bceps = (bex * ceytail + cey * bextail) - (bey * cextail + cex * beytail);
    let cdeps = (cex * deytail + dey * cextail) - (cey * dextail + dex * ceytail);
    let daeps = (dex * aeytail + aey * dextail) - (dey * aextail + aex * deytail);
    let aceps = (aex * ceytail + cey * aextail) - (aey * cextail + cex * aeytail);
    let bdeps = (bex * deytail + dey * bextail) - (bey * dextail + dex * beytail);
    let det = det
        + (((bex * bex + bey * bey + bez * bez)
            * ((cez * daeps + dez * aceps + aez * cdeps)
                + (ceztail * da3 + deztail * ac3 + aeztail * cd3))
            + (dex * dex + dey * dey + dez * dez)
                * ((aez * bceps - bez * aceps + cez * abeps)
                    + (aeztail * bc3 - beztail * ac3 + ceztail * ab3)))
            - ((aex * aex + aey * aey + aez * aez)
                * ((bez * cdeps - cez * bdeps + dez * bceps)
                    + (beztail * cd3 - ceztail * bd3 + deztail * bc3))
                + (cex * cex + cey * cey + cez * cez)
                    * ((dez * abeps + aez * bdeps + bez * daeps)
                        + (deztail * ab3 + aeztail * bd3 + beztail * da3))))
        + 2.0
            * (((bex * bextail + bey * beytail + bez * beztail)
                * (cez * da3 + dez * ac3 + aez * cd3)
                + (dex * dextail + dey * deytail + dez * deztail)
                    * (aez * bc3 - bez * ac3 + cez * ab3))
                - ((aex * aextail + aey * aeytail + aez * aeztail)
                    * (bez * cd3 - cez * bd3 + dez * bc3)
                    + (cex * cextail + cey * ceytail + cez * ceztail)
                        * (dez * ab3 + aez * bd3 + bez * da3)));
    if settles(det, errbound) {
        return det;
    }

    escalate("insphere", Tier::Exact);
    insphere_exact(pa, pb, pc, pd, pe)
}

/// `a * b - c * d` as a four-component expansion.
#[inline(always)]
fn cross(a: f64, b: f64, c: f64, d: f64) -> Expansion<4> {
    let (s1, s0) = two_product(a, b);
    let (t1, t0) = two_product(c, d);
    Expansion::from_components(two_two_diff(s1, s0, t1, t0))
}

/// `sign * (dx² + dy² + dz²) * (t0 + (t1 + t2))` where each `t` is a
/// two-dimensional cofactor scaled by a z difference.
fn lift(
    [(e0, s0), (e1, s1), (e2, s2)]: [(&Expansion<4>, f64); 3],
    dx: f64,
    dy: f64,
    dz: f64,
    sign: f64,
) -> Expansion<288> {
    let temp8a = Expansion::<8>::scale(e0, s0);
    let temp8b = Expansion::<8>::scale(e1, s1);
    let temp8c = Expansion::<8>::scale(e2, s2);
    let temp16 = Expansion::<16>::sum(&temp8a, &temp8b);
    let temp24 = Expansion::<24>::sum(&temp8c, &temp16);

    let xdet = Expansion::<96>::scale(&Expansion::<48>::scale(&temp24, dx), sign * dx);
    let ydet = Expansion::<96>::scale(&Expansion::<48>::scale(&temp24, dy), sign * dy);
    let zdet = Expansion::<96>::scale(&Expansion::<48>::scale(&temp24, dz), sign * dz);
    let xydet = Expansion::<192>::sum(&xdet, &ydet);
    Expansion::sum(&xydet, &zdet)
}

/// Exact in-sphere test without the adaptive filters, expanded over the input
/// coordinates.
pub fn insphere_exact(pa: &Coord3, pb: &Coord3, pc: &Coord3, pd: &Coord3, pe: &Coord3) -> f64 {
    let ab = cross(pa.x, pb.y, pb.x, pa.y);
    let bc = cross(pb.x, pc.y, pc.x, pb.y);
    let cd = cross(pc.x, pd.y, pd.x, pc.y);
    let de = cross(pd.x, pe.y, pe.x, pd.y);
    let ea = cross(pe.x, pa.y, pa.x, pe.y);
    let ac = cross(pa.x, pc.y, pc.x, pa.y);
    let bd = cross(pb.x, pd.y, pd.x, pb.y);
    let ce = cross(pc.x, pe.y, pe.x, pc.y);
    let da = cross(pd.x, pa.y, pa.x, pd.y);
    let eb = cross(pe.x, pb.y, pb.x, pe.y);

    // Three-point minors: `lead + (first + second)`, each a 2D cofactor
    // scaled by a z coordinate.
    let abc = triple((&ab, pc.z), (&bc, pa.z), (&ac, -pb.z));
    let bcd = triple((&bc, pd.z), (&cd, pb.z), (&bd, -pc.z));
    let cde = triple((&cd, pe.z), (&de, pc.z), (&ce, -pd.z));
    let dea = triple((&de, pa.z), (&ea, pd.z), (&da, -pe.z));
    let eab = triple((&ea, pb.z), (&ab, pe.z), (&eb, -pa.z));
    let abd = triple((&ab, pd.z), (&bd, pa.z), (&da, pb.z));
    let bce = triple((&bc, pe.z), (&ce, pb.z), (&eb, pc.z));
    let cda = triple((&cd, pa.z), (&da, pc.z), (&ac, pd.z));
    let deb = triple((&de, pb.z), (&eb, pd.z), (&bd, pe.z));
    let eac = triple((&ea, pc.z), (&ac, pe.z), (&ce, pa.z));

    let adet = lift_exact(quad(&cde, &bce, &deb, &bcd), pa);
    let bdet = lift_exact(quad(&dea, &cda, &eac, &cde), pb);
    let abdet = Expansion::<2304>::sum(&adet, &bdet);

    let cdet = lift_exact(quad(&eab, &deb, &abd, &dea), pc);
    let ddet = lift_exact(quad(&abc, &eac, &bce, &eab), pd);
    let edet = lift_exact(quad(&bcd, &abd, &cda, &abc), pe);
    let cddet = Expansion::<2304>::sum(&cdet, &ddet);
    let cdedet = Expansion::<3456>::sum(&cddet, &edet);

    let deter = Expansion::<5760>::sum(&abdet, &cdedet);
    deter.most_significant()
}

fn triple(
    (lead, lead_z): (&Expansion<4>, f64),
    (first, first_z): (&Expansion<4>, f64),
    (second, second_z): (&Expansion<4>, f64),
) -> Expansion<24> {
    let temp8a = Expansion::<8>::scale(first, first_z);
    let temp8b = Expansion::<8>::scale(second, second_z);
    let temp16 = Expansion::<16>::sum(&temp8a, &temp8b);
    let temp8c = Expansion::<8>::scale(lead, lead_z);
    Expansion::sum(&temp8c, &temp16)
}

/// Four-point minor `(p + q) - (r + s)`.
fn quad(
    p: &Expansion<24>,
    q: &Expansion<24>,
    r: &Expansion<24>,
    s: &Expansion<24>,
) -> Expansion<96> {
    let temp48a = Expansion::<48>::sum(p, q);
    let temp48b = Expansion::<48>::sum(r, s);
    Expansion::sum(&temp48a, &temp48b.negated())
}

/// `minor * (p.x² + p.y² + p.z²)`.
fn lift_exact(minor: Expansion<96>, p: &Coord3) -> Expansion<1152> {
    let det384x = Expansion::<384>::scale(&Expansion::<192>::scale(&minor, p.x), p.x);
    let det384y = Expansion::<384>::scale(&Expansion::<192>::scale(&minor, p.y), p.y);
    let det384z = Expansion::<384>::scale(&Expansion::<192>::scale(&minor, p.z), p.z);
    let detxy = Expansion::<768>::sum(&det384x, &det384y);
    Expansion::sum(&detxy, &det384z)
}
