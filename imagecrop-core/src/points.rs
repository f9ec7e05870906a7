use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A position in some coordinate space.
///
/// The space (image-native, viewport-rendered or page) is never stored on the
/// point itself; callers track it by context and convert explicitly through
/// [`crate::transforms`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn mul_scalar(&self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }

    pub fn div_scalar(&self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Width and height. Used for the image's native size and, as a ratio only,
/// for aspect ratios.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle given by its two extreme corners.
///
/// Every rectangle built through [`Rect::from_corners`] is normalized:
/// `top_left` is never right of or below `bottom_right`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Rect {
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Builds a normalized rectangle spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            top_left: Point::new(a.x.min(b.x), a.y.min(b.y)),
            bottom_right: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::from_corners(
            origin,
            Point::new(origin.x + size.width, origin.y + size.height),
        )
    }

    /// Re-orders the corners so the rectangle is normalized.
    pub fn normalized(&self) -> Self {
        Self::from_corners(self.top_left, self.bottom_right)
    }

    pub fn left(&self) -> f64 {
        self.top_left.x
    }

    pub fn top(&self) -> f64 {
        self.top_left.y
    }

    pub fn right(&self) -> f64 {
        self.bottom_right.x
    }

    pub fn bottom(&self) -> f64 {
        self.bottom_right.y
    }

    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.top_left.x + self.bottom_right.x) / 2.0,
            (self.top_left.y + self.bottom_right.y) / 2.0,
        )
    }

    pub fn is_valid(&self) -> bool {
        self.top_left.x <= self.bottom_right.x && self.top_left.y <= self.bottom_right.y
    }

    pub fn is_finite(&self) -> bool {
        self.top_left.is_finite() && self.bottom_right.is_finite()
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    pub fn translate(&self, delta: Point) -> Self {
        Self {
            top_left: self.top_left + delta,
            bottom_right: self.bottom_right + delta,
        }
    }

    /// Moves the rectangle so its top-left corner sits at `origin`, keeping its size.
    pub fn with_origin(&self, origin: Point) -> Self {
        Self::from_origin_size(origin, self.size())
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.top_left.approx_eq(&other.top_left, epsilon)
            && self.bottom_right.approx_eq(&other.bottom_right, epsilon)
    }
}
