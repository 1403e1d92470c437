//! Axis-aligned box helpers for character regions.
//!
//! Image coordinates: `x` grows to the right, `y` grows downwards, so the
//! top edge of a box has the smallest `y`.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Slope of the line through `self` and `other`, `f64::INFINITY` when
    /// both share the same `x`.
    pub fn slope(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        if dx == 0.0 {
            return f64::INFINITY;
        }
        (self.y - other.y) / dx
    }
}

/// Four corners of a box, clockwise from the top left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl Corners {
    /// Box spanned by the topmost, rightmost, bottommost and leftmost points
    /// of a shape.
    pub fn from_extremes(top: Point, right: Point, bottom: Point, left: Point) -> Self {
        Self {
            top_left: Point::new(left.x, top.y),
            top_right: Point::new(right.x, top.y),
            bottom_right: Point::new(right.x, bottom.y),
            bottom_left: Point::new(left.x, bottom.y),
        }
    }

    /// Smallest box holding both `self` and `other`, built corner by corner.
    pub fn merge(&self, other: &Corners) -> Corners {
        Corners {
            top_left: Point::new(
                self.top_left.x.min(other.top_left.x),
                self.top_left.y.min(other.top_left.y),
            ),
            top_right: Point::new(
                self.top_right.x.max(other.top_right.x),
                self.top_right.y.min(other.top_right.y),
            ),
            bottom_right: Point::new(
                self.bottom_right.x.max(other.bottom_right.x),
                self.bottom_right.y.max(other.bottom_right.y),
            ),
            bottom_left: Point::new(
                self.bottom_left.x.min(other.bottom_left.x),
                self.bottom_left.y.max(other.bottom_left.y),
            ),
        }
    }

    pub fn width(&self) -> f64 {
        (self.top_left.x - self.top_right.x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.top_left.y - self.bottom_left.y).abs()
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.top_left.x + self.width() / 2.0,
            self.top_left.y + self.height() / 2.0,
        )
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Whether `p` lies inside the box, edges included.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.top_left.x
            && p.x <= self.top_right.x
            && p.y >= self.top_left.y
            && p.y <= self.bottom_right.y
    }
}
