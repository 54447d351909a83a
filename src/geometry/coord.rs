/// 2D point with ordinary floating-point coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Coord {
    fn from(value: (f64, f64)) -> Self {
        Coord::new(value.0, value.1)
    }
}

impl From<[f64; 2]> for Coord {
    fn from([x, y]: [f64; 2]) -> Self {
        Coord::new(x, y)
    }
}

/// 3D point with ordinary floating-point coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coord3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<(f64, f64, f64)> for Coord3 {
    fn from(value: (f64, f64, f64)) -> Self {
        Coord3::new(value.0, value.1, value.2)
    }
}

impl From<[f64; 3]> for Coord3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Coord3::new(x, y, z)
    }
}
