//! Axis-aligned rectangles and the overlap test every collision goes through.

/// An axis-aligned rectangle in playfield units (`y` grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// True iff `a` and `b` overlap.
///
/// All four half-plane tests are strict, so rectangles that merely share an
/// edge do not collide.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}
