mod coord;
mod incircle;
mod insphere;
mod orient2d;
mod orient3d;
mod sign;

pub use coord::{Coord, Coord3};
pub use incircle::{incircle, incircle_exact, incircle_fast};
pub use insphere::{insphere, insphere_exact, insphere_fast};
pub use orient2d::{orient2d, orient2d_exact, orient2d_fast, orient2d_slow};
pub use orient3d::{orient3d, orient3d_exact, orient3d_fast};
pub use sign::Sign;
