//! Machine constants and the per-predicate error bounds.
//!
//! `EPSILON` is half an ulp of one (`2^-53`), the largest relative error of a
//! single correctly rounded operation, and `SPLITTER` is `2^ceil(53 / 2) + 1`,
//! which lets [`split`](crate::eft::split) cut a double into two 26-bit halves.
//!
//! Each predicate has three bounds, one per adaptive tier: `A` guards the plain
//! floating-point filter, `B` the estimate of the coarse expansion and `C` the
//! tail-corrected value (which additionally pays `RESULT_ERRBOUND * |det|`).
//! All of them multiply the permanent of the determinant at the call site.

pub const EPSILON: f64 = 0.5 * f64::EPSILON;
pub const SPLITTER: f64 = 134_217_729.0;

pub const RESULT_ERRBOUND: f64 = (3.0 + 8.0 * EPSILON) * EPSILON;

pub const CCW_ERRBOUND_A: f64 = (3.0 + 16.0 * EPSILON) * EPSILON;
pub const CCW_ERRBOUND_B: f64 = (2.0 + 12.0 * EPSILON) * EPSILON;
pub const CCW_ERRBOUND_C: f64 = (9.0 + 64.0 * EPSILON) * EPSILON * EPSILON;

pub const O3D_ERRBOUND_A: f64 = (7.0 + 56.0 * EPSILON) * EPSILON;
pub const O3D_ERRBOUND_B: f64 = (3.0 + 28.0 * EPSILON) * EPSILON;
pub const O3D_ERRBOUND_C: f64 = (26.0 + 288.0 * EPSILON) * EPSILON * EPSILON;

pub const ICC_ERRBOUND_A: f64 = (10.0 + 96.0 * EPSILON) * EPSILON;
pub const ICC_ERRBOUND_B: f64 = (4.0 + 48.0 * EPSILON) * EPSILON;
pub const ICC_ERRBOUND_C: f64 = (44.0 + 576.0 * EPSILON) * EPSILON * EPSILON;

pub const ISP_ERRBOUND_A: f64 = (16.0 + 224.0 * EPSILON) * EPSILON;
pub const ISP_ERRBOUND_B: f64 = (5.0 + 72.0 * EPSILON) * EPSILON;
pub const ISP_ERRBOUND_C: f64 = (71.0 + 1408.0 * EPSILON) * EPSILON * EPSILON;
