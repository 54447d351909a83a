//! Adaptive precision floating-point predicates for computational geometry.
//!
//! Every predicate evaluates a small determinant whose sign answers a
//! geometric question. Most calls finish with ordinary f64 arithmetic guarded
//! by a forward error bound; near-degenerate inputs escalate through
//! progressively more precise tiers, ending in exact expansion arithmetic, so
//! the returned sign is always correct.
//!
//! # Quick Start
//!
//! ```rust
//! use adaptive_predicates::{Coord, Sign, orient2d};
//!
//! let a = Coord::new(0.0, 0.0);
//! let b = Coord::new(1.0, 0.0);
//! let c = Coord::new(0.5, 1.0);
//!
//! match Sign::of(orient2d(&a, &b, &c)) {
//!     Sign::Positive => println!("c is left of ab"),
//!     Sign::Negative => println!("c is right of ab"),
//!     Sign::Zero => println!("c is on line ab"),
//! }
//! ```
//!
//! Nearly collinear points are decided exactly where the plain formula is not:
//!
//! ```rust
//! use adaptive_predicates::{Coord, orient2d, orient2d_fast};
//!
//! let a = Coord::new(0.5, f64::from_bits(0.5f64.to_bits() + 1));
//! let b = Coord::new(12.0, 12.0);
//! let c = Coord::new(24.0, 24.0);
//!
//! assert_eq!(orient2d_fast(&a, &b, &c), 0.0);
//! assert!(orient2d(&a, &b, &c) > 0.0);
//! ```
//!
//! # Available Predicates
//!
//! - [`orient2d`]: Orientation of a point relative to a directed line
//! - [`orient3d`]: Orientation of a point relative to an oriented plane
//! - [`incircle`]: Test if a point lies inside the circumcircle of a triangle
//! - [`insphere`]: Test if a point lies inside the circumsphere of a tetrahedron
//!
//! Each has a `_fast` variant (plain arithmetic, not robust) and an `_exact`
//! variant (exact arithmetic without the adaptive filters).
//!
//! # Building Blocks
//!
//! The [`eft`] and [`expansion`] modules expose the error-free transforms and
//! the expansion arithmetic the predicates are built from, and [`bounds`]
//! holds their error-bound constants.
//!
//! ```rust
//! use adaptive_predicates::{Expansion, eft::two_sum};
//!
//! let (sum, err) = two_sum(1.0e16, 1.0);
//! let e = Expansion::<2>::from_components([err, sum]);
//! let f = Expansion::<1>::from(-1.0e16);
//! assert_eq!(Expansion::<3>::sum(&e, &f).estimate(), 1.0);
//! ```
//!
//! [`settles`] is the bound test every tier uses, and [`Tier`] names the
//! levels a predicate escalates through:
//!
//! ```rust
//! use adaptive_predicates::{Tier, bounds::CCW_ERRBOUND_A, settles};
//!
//! let (detleft, detright) = (3.0 * 2.0, 1.0 * 1.0);
//! let det = detleft - detright;
//! assert!(settles(det, CCW_ERRBOUND_A * (detleft + detright)));
//! assert!(!settles(1.0e-20, CCW_ERRBOUND_A * 2.0));
//! assert_eq!(Tier::TailCorrected.to_string(), "tail-corrected");
//! ```
//!
//! # Features
//!
//! - `tracing`: emit a `trace!` event each time a predicate escalates past
//!   its floating-point filter.

pub mod bounds;
pub mod cascade;
pub mod eft;
pub mod expansion;
mod geometry;

pub use cascade::{Tier, settles};
pub use expansion::{Expansion, ExpansionError};
pub use geometry::{
    Coord, Coord3, Sign, incircle, incircle_exact, incircle_fast, insphere, insphere_exact,
    insphere_fast, orient2d, orient2d_exact, orient2d_fast, orient2d_slow, orient3d,
    orient3d_exact, orient3d_fast,
};
