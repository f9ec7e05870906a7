//! Bounds clamping against the image's pixel extent.
//!
//! Both entry points return a rectangle inside `[0, width] x [0, height]`
//! and leave an already-contained rectangle untouched, which makes them
//! idempotent.

use crate::aspect::{from_corner_pivot, AspectRatio};
use crate::handles::{HandleId, Side};
use crate::points::{Point, Rect, Size};

/// Clamps after a move: translates back into bounds, keeping the size. A
/// dimension at least as large as the image's becomes the full dimension.
pub fn clamp(rect: Rect, image: Size) -> Rect {
    if is_contained(&rect, image) {
        return rect;
    }
    let (left, right) = clamp_span(rect.left(), rect.right(), image.width);
    let (top, bottom) = clamp_span(rect.top(), rect.bottom(), image.height);
    Rect::new(Point::new(left, top), Point::new(right, bottom))
}

/// Clamps after a resize with `handle`: shrinks toward the pivot (the
/// handle's opposite corner/edge). With a ratio, both dimensions shrink by
/// the same factor so the ratio survives.
pub fn clamp_toward(
    rect: Rect,
    image: Size,
    handle: HandleId,
    ratio: Option<AspectRatio>,
) -> Rect {
    if is_contained(&rect, image) {
        return rect;
    }
    if handle == HandleId::Body {
        return clamp(rect, image);
    }

    let pivot = handle.anchor(&rect);
    let shrunk = match ratio {
        None => shrink_free(&rect, image, handle),
        Some(_) => shrink_proportional(&rect, image, handle, pivot),
    };

    // Rounding in the shrink can leave the far side an ulp outside.
    intersect(&shrunk, image)
}

pub fn is_contained(rect: &Rect, image: Size) -> bool {
    rect.left() >= 0.0
        && rect.top() >= 0.0
        && rect.right() <= image.width
        && rect.bottom() <= image.height
}

/// Clamps a single axis span `[lo, hi]` into `[0, limit]`, translating when
/// it fits and collapsing to the full span when it does not.
fn clamp_span(lo: f64, hi: f64, limit: f64) -> (f64, f64) {
    if lo >= 0.0 && hi <= limit {
        return (lo, hi);
    }
    let len = hi - lo;
    if len >= limit {
        (0.0, limit)
    } else if lo < 0.0 {
        (0.0, len)
    } else {
        (limit - len, limit)
    }
}

/// Intersects the dragged edges with the image; axes the handle does not
/// drag are translated in like a move.
fn shrink_free(rect: &Rect, image: Size, handle: HandleId) -> Rect {
    let (left, right) = match handle.x_side() {
        Some(_) => intersect_span(rect.left(), rect.right(), image.width),
        None => clamp_span(rect.left(), rect.right(), image.width),
    };
    let (top, bottom) = match handle.y_side() {
        Some(_) => intersect_span(rect.top(), rect.bottom(), image.height),
        None => clamp_span(rect.top(), rect.bottom(), image.height),
    };
    Rect::new(Point::new(left, top), Point::new(right, bottom))
}

fn intersect(rect: &Rect, image: Size) -> Rect {
    let (left, right) = intersect_span(rect.left(), rect.right(), image.width);
    let (top, bottom) = intersect_span(rect.top(), rect.bottom(), image.height);
    Rect::new(Point::new(left, top), Point::new(right, bottom))
}

fn intersect_span(lo: f64, hi: f64, limit: f64) -> (f64, f64) {
    let lo = lo.clamp(0.0, limit);
    let hi = hi.clamp(0.0, limit);
    (lo, hi.max(lo))
}

fn shrink_proportional(rect: &Rect, image: Size, handle: HandleId, pivot: Point) -> Rect {
    let (w, h) = (rect.width(), rect.height());

    // Room from the pivot toward each dragged side. An undragged axis may
    // slide, so its room is the full image dimension.
    let room_x = match handle.x_side() {
        Some(side) => room_from(pivot.x, side, image.width),
        None => image.width,
    };
    let room_y = match handle.y_side() {
        Some(side) => room_from(pivot.y, side, image.height),
        None => image.height,
    };
    let factor = fit_factor(room_x, w).min(fit_factor(room_y, h));
    let size = Size::new(w * factor, h * factor);

    match (handle.x_side(), handle.y_side()) {
        (Some(x_side), Some(y_side)) => from_corner_pivot(pivot, x_side, y_side, size),
        (Some(x_side), None) => {
            let half = size.height / 2.0;
            let (top, bottom) = clamp_span(pivot.y - half, pivot.y + half, image.height);
            Rect::from_corners(
                Point::new(pivot.x, top),
                Point::new(pivot.x + x_side.sign() * size.width, bottom),
            )
        }
        (None, Some(y_side)) => {
            let half = size.width / 2.0;
            let (left, right) = clamp_span(pivot.x - half, pivot.x + half, image.width);
            Rect::from_corners(
                Point::new(left, pivot.y),
                Point::new(right, pivot.y + y_side.sign() * size.height),
            )
        }
        (None, None) => clamp(*rect, image),
    }
}

fn room_from(pivot: f64, side: Side, limit: f64) -> f64 {
    let room = match side {
        Side::Min => pivot,
        Side::Max => limit - pivot,
    };
    room.max(0.0)
}

fn fit_factor(room: f64, len: f64) -> f64 {
    if len > room {
        room / len
    } else {
        1.0
    }
}
