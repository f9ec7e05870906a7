//! Aspect ratio constraint solver.
//!
//! Given a proposed rectangle and the handle being dragged, derives the
//! ratio-conforming rectangle. The corner/edge opposite the handle is the
//! pivot and stays fixed.
//!
//! Authority policy for corner drags: whichever dimension moved further (in
//! image pixels) from the gesture's starting size wins, the other is
//! recomputed from the ratio. A tie goes to the width. Edge drags always
//! keep the dragged dimension and grow the other one symmetrically around
//! the edge's center line.

use crate::error::CropError;
use crate::handles::{HandleId, Side};
use crate::points::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// A validated width:height ratio. Both components are positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Size", into = "Size")]
pub struct AspectRatio {
    width: f64,
    height: f64,
}

impl AspectRatio {
    pub fn new(width: f64, height: f64) -> Result<Self, CropError> {
        if Size::new(width, height).is_positive() {
            Ok(Self { width, height })
        } else {
            Err(CropError::InvalidAspectRatio { width, height })
        }
    }

    /// width / height
    pub fn value(&self) -> f64 {
        self.width / self.height
    }

    pub fn as_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether `rect` already has this ratio, within `epsilon` (relative).
    pub fn matches(&self, rect: &Rect, epsilon: f64) -> bool {
        let (w, h) = (rect.width(), rect.height());
        if h <= 0.0 {
            return w <= 0.0;
        }
        ((w / h) / self.value() - 1.0).abs() <= epsilon
    }
}

impl TryFrom<Size> for AspectRatio {
    type Error = CropError;

    fn try_from(size: Size) -> Result<Self, Self::Error> {
        Self::new(size.width, size.height)
    }
}

impl From<AspectRatio> for Size {
    fn from(ratio: AspectRatio) -> Self {
        ratio.as_size()
    }
}

/// Constrains `proposed` to `ratio`, measuring authority from a zero-sized
/// start (a fresh selection).
///
/// - no ratio: `proposed` is returned unchanged
/// - `Some(HandleId::Body)`: a move, size is kept as is
/// - `None` handle: snap, the largest rectangle of the ratio that fits inside
///   `proposed`, sharing its center
pub fn constrain(proposed: Rect, ratio: Option<AspectRatio>, handle: Option<HandleId>) -> Rect {
    constrain_from(proposed, ratio, handle, Size::ZERO)
}

/// Like [`constrain`], with `origin` being the selection's size when the
/// gesture started. Used to pick the authoritative dimension.
pub fn constrain_from(
    proposed: Rect,
    ratio: Option<AspectRatio>,
    handle: Option<HandleId>,
    origin: Size,
) -> Rect {
    let Some(ratio) = ratio else {
        return proposed;
    };
    let r = ratio.value();

    let Some(handle) = handle else {
        return fit_inside(&proposed, r);
    };

    let pivot = handle.anchor(&proposed);
    let (w, h) = (proposed.width(), proposed.height());

    match (handle.x_side(), handle.y_side()) {
        (Some(x_side), Some(y_side)) => {
            let width_rules = (w - origin.width).abs() >= (h - origin.height).abs();
            let size = if width_rules {
                Size::new(w, w / r)
            } else {
                Size::new(h * r, h)
            };
            from_corner_pivot(pivot, x_side, y_side, size)
        }
        (Some(x_side), None) => {
            let far_x = pivot.x + x_side.sign() * w;
            let half = w / r / 2.0;
            Rect::from_corners(
                Point::new(pivot.x, pivot.y - half),
                Point::new(far_x, pivot.y + half),
            )
        }
        (None, Some(y_side)) => {
            let far_y = pivot.y + y_side.sign() * h;
            let half = h * r / 2.0;
            Rect::from_corners(
                Point::new(pivot.x - half, pivot.y),
                Point::new(pivot.x + half, far_y),
            )
        }
        (None, None) => proposed,
    }
}

/// Rectangle of `size` growing from `pivot` toward the given sides.
pub(crate) fn from_corner_pivot(pivot: Point, x_side: Side, y_side: Side, size: Size) -> Rect {
    Rect::from_corners(
        pivot,
        Point::new(
            pivot.x + x_side.sign() * size.width,
            pivot.y + y_side.sign() * size.height,
        ),
    )
}

/// Largest rectangle with ratio `r` inside `rect`, sharing its center.
fn fit_inside(rect: &Rect, r: f64) -> Rect {
    let (w, h) = (rect.width(), rect.height());
    let size = if h * r <= w {
        Size::new(h * r, h)
    } else {
        Size::new(w, w / r)
    };
    let c = rect.center();
    Rect::new(
        Point::new(c.x - size.width / 2.0, c.y - size.height / 2.0),
        Point::new(c.x + size.width / 2.0, c.y + size.height / 2.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn square() -> Option<AspectRatio> {
        Some(AspectRatio::new(1.0, 1.0).unwrap())
    }

    fn ratio_of(rect: &Rect) -> f64 {
        rect.width() / rect.height()
    }

    #[test]
    fn aspect_ratio_rejects_bad_components() {
        assert!(AspectRatio::new(0.0, 1.0).is_err());
        assert!(AspectRatio::new(1.0, -2.0).is_err());
        assert!(AspectRatio::new(f64::INFINITY, 1.0).is_err());
        assert!(AspectRatio::new(16.0, 9.0).is_ok());
    }

    #[test]
    fn aspect_ratio_deserializes_through_validation() {
        let ok: AspectRatio = serde_json::from_str(r#"{"width":4,"height":3}"#).unwrap();
        assert!((ok.value() - 4.0 / 3.0).abs() < EPS);
        assert!(serde_json::from_str::<AspectRatio>(r#"{"width":0,"height":3}"#).is_err());
    }

    #[test]
    fn no_ratio_is_identity() {
        let rect = Rect::new(Point::new(10.0, 10.0), Point::new(50.0, 90.0));
        assert_eq!(constrain(rect, None, Some(HandleId::SouthEast)), rect);
    }

    #[test]
    fn move_keeps_size() {
        let rect = Rect::new(Point::new(10.0, 10.0), Point::new(50.0, 90.0));
        assert_eq!(constrain(rect, square(), Some(HandleId::Body)), rect);
    }

    #[test]
    fn width_authoritative_corner_drag() {
        // Dragged from (100,100) to (400,250): width changed more.
        let proposed = Rect::new(Point::new(100.0, 100.0), Point::new(400.0, 250.0));
        let result = constrain(proposed, square(), Some(HandleId::SouthEast));
        assert_eq!(
            result,
            Rect::new(Point::new(100.0, 100.0), Point::new(400.0, 400.0))
        );
    }

    #[test]
    fn height_authoritative_corner_drag() {
        let proposed = Rect::new(Point::new(100.0, 100.0), Point::new(150.0, 300.0));
        let ratio = Some(AspectRatio::new(2.0, 1.0).unwrap());
        let result = constrain(proposed, ratio, Some(HandleId::SouthEast));
        assert!(result.approx_eq(
            &Rect::new(Point::new(100.0, 100.0), Point::new(500.0, 300.0)),
            EPS
        ));
    }

    #[test]
    fn corner_pivot_stays_fixed_for_north_west_drag() {
        let proposed = Rect::new(Point::new(250.0, 50.0), Point::new(400.0, 300.0));
        let result = constrain(proposed, square(), Some(HandleId::NorthWest));
        assert_eq!(result.bottom_right, Point::new(400.0, 300.0));
        assert!((ratio_of(&result) - 1.0).abs() < EPS);
        // Height moved further than width from zero, so 250 wins.
        assert_eq!(result.top_left, Point::new(150.0, 50.0));
    }

    #[test]
    fn authority_measured_from_gesture_origin() {
        // Started as 200x200; user pulled mostly to the right.
        let origin = Size::new(200.0, 200.0);
        let proposed = Rect::new(Point::new(0.0, 0.0), Point::new(260.0, 210.0));
        let result = constrain_from(proposed, square(), Some(HandleId::SouthEast), origin);
        assert_eq!(result.bottom_right, Point::new(260.0, 260.0));
    }

    #[test]
    fn east_edge_grows_height_symmetrically() {
        let proposed = Rect::new(Point::new(100.0, 100.0), Point::new(300.0, 200.0));
        let result = constrain(proposed, square(), Some(HandleId::East));
        assert_eq!(
            result,
            Rect::new(Point::new(100.0, 50.0), Point::new(300.0, 250.0))
        );
    }

    #[test]
    fn north_edge_grows_width_symmetrically() {
        let proposed = Rect::new(Point::new(100.0, 100.0), Point::new(300.0, 200.0));
        let ratio = Some(AspectRatio::new(1.0, 2.0).unwrap());
        let result = constrain(proposed, ratio, Some(HandleId::North));
        assert_eq!(result.bottom(), 200.0);
        assert_eq!(result.top(), 100.0);
        assert!((result.width() - 50.0).abs() < EPS);
        assert!((result.center().x - 200.0).abs() < EPS);
    }

    #[test]
    fn snap_fits_inside_and_keeps_center() {
        let proposed = Rect::new(Point::new(100.0, 100.0), Point::new(400.0, 300.0));
        let result = constrain(proposed, square(), None);
        assert_eq!(
            result,
            Rect::new(Point::new(150.0, 100.0), Point::new(350.0, 300.0))
        );
    }

    #[test]
    fn ratio_holds_for_sampled_drags() {
        let ratios = [(1.0, 1.0), (16.0, 9.0), (3.0, 4.0), (2.35, 1.0)];
        let corners = [
            Point::new(400.0, 250.0),
            Point::new(10.0, 580.0),
            Point::new(120.0, 101.0),
            Point::new(-50.0, -80.0),
        ];
        let anchor = Point::new(100.0, 100.0);
        for (w, h) in ratios {
            let ratio = AspectRatio::new(w, h).unwrap();
            for corner in corners {
                let handle = HandleId::SouthEast.facing(anchor, corner);
                let proposed = Rect::from_corners(anchor, corner);
                let result = constrain(proposed, Some(ratio), Some(handle));
                assert!(
                    ratio.matches(&result, 1e-9),
                    "ratio {w}:{h} corner {corner:?} gave {result:?}"
                );
                assert!(result.is_valid());
                assert_eq!(handle.anchor(&result), anchor);
            }
        }
    }

    #[test]
    fn matches_checks_relative_ratio() {
        let ratio = AspectRatio::new(4.0, 3.0).unwrap();
        let rect = Rect::new(Point::new(0.0, 0.0), Point::new(400.0, 300.0));
        assert!(ratio.matches(&rect, 1e-9));
        let off = Rect::new(Point::new(0.0, 0.0), Point::new(401.0, 300.0));
        assert!(!ratio.matches(&off, 1e-6));
    }
}
