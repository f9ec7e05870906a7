//! Resize handles: identification, geometry and hit-testing.

use crate::points::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Which end of an axis a handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left on the x axis, top on the y axis.
    Min,
    /// Right on the x axis, bottom on the y axis.
    Max,
}

impl Side {
    pub fn flip(self) -> Self {
        match self {
            Side::Min => Side::Max,
            Side::Max => Side::Min,
        }
    }

    /// +1 when growing toward `Max`, -1 toward `Min`.
    pub fn sign(self) -> f64 {
        match self {
            Side::Min => -1.0,
            Side::Max => 1.0,
        }
    }

    /// Side of `pivot` that `p` lies on. Ties count as `Max`.
    fn of(p: f64, pivot: f64) -> Self {
        if p >= pivot {
            Side::Max
        } else {
            Side::Min
        }
    }
}

/// The eight resize handles plus the rectangle body (used for moving).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandleId {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    Body,
}

impl HandleId {
    /// Every resize handle, corners first. Hit-testing walks this order so
    /// corners win where boxes overlap.
    pub const RESIZE_HANDLES: [HandleId; 8] = [
        HandleId::NorthWest,
        HandleId::NorthEast,
        HandleId::SouthEast,
        HandleId::SouthWest,
        HandleId::North,
        HandleId::East,
        HandleId::South,
        HandleId::West,
    ];

    pub fn from_sides(x: Option<Side>, y: Option<Side>) -> Self {
        match (x, y) {
            (Some(Side::Min), Some(Side::Min)) => HandleId::NorthWest,
            (None, Some(Side::Min)) => HandleId::North,
            (Some(Side::Max), Some(Side::Min)) => HandleId::NorthEast,
            (Some(Side::Max), None) => HandleId::East,
            (Some(Side::Max), Some(Side::Max)) => HandleId::SouthEast,
            (None, Some(Side::Max)) => HandleId::South,
            (Some(Side::Min), Some(Side::Max)) => HandleId::SouthWest,
            (Some(Side::Min), None) => HandleId::West,
            (None, None) => HandleId::Body,
        }
    }

    /// The x-axis edge this handle drags, if any.
    pub fn x_side(self) -> Option<Side> {
        match self {
            HandleId::NorthWest | HandleId::West | HandleId::SouthWest => Some(Side::Min),
            HandleId::NorthEast | HandleId::East | HandleId::SouthEast => Some(Side::Max),
            HandleId::North | HandleId::South | HandleId::Body => None,
        }
    }

    /// The y-axis edge this handle drags, if any.
    pub fn y_side(self) -> Option<Side> {
        match self {
            HandleId::NorthWest | HandleId::North | HandleId::NorthEast => Some(Side::Min),
            HandleId::SouthWest | HandleId::South | HandleId::SouthEast => Some(Side::Max),
            HandleId::East | HandleId::West | HandleId::Body => None,
        }
    }

    pub fn is_corner(self) -> bool {
        self.x_side().is_some() && self.y_side().is_some()
    }

    pub fn is_edge(self) -> bool {
        self.x_side().is_some() != self.y_side().is_some()
    }

    pub fn opposite(self) -> Self {
        Self::from_sides(self.x_side().map(Side::flip), self.y_side().map(Side::flip))
    }

    /// Where this handle sits on `rect`: a corner, an edge midpoint, or the
    /// center for [`HandleId::Body`].
    pub fn position(self, rect: &Rect) -> Point {
        let center = rect.center();
        let x = match self.x_side() {
            Some(Side::Min) => rect.left(),
            Some(Side::Max) => rect.right(),
            None => center.x,
        };
        let y = match self.y_side() {
            Some(Side::Min) => rect.top(),
            Some(Side::Max) => rect.bottom(),
            None => center.y,
        };
        Point::new(x, y)
    }

    /// The point held fixed while this handle is dragged.
    pub fn anchor(self, rect: &Rect) -> Point {
        self.opposite().position(rect)
    }

    /// Re-derives the dragged handle once the pointer may have crossed the
    /// anchor, so that the anchor stays the opposite corner/edge.
    pub fn facing(self, anchor: Point, pointer: Point) -> Self {
        Self::from_sides(
            self.x_side().map(|_| Side::of(pointer.x, anchor.x)),
            self.y_side().map(|_| Side::of(pointer.y, anchor.y)),
        )
    }

    /// Square box of side `size` centered on the handle.
    pub fn handle_box(self, rect: &Rect, size: f64) -> Rect {
        let c = self.position(rect);
        let half = size / 2.0;
        Rect::new(
            Point::new(c.x - half, c.y - half),
            Point::new(c.x + half, c.y + half),
        )
    }

    /// CSS cursor name for hovering this handle.
    pub fn css_cursor(self) -> &'static str {
        match self {
            HandleId::NorthWest | HandleId::SouthEast => "nwse-resize",
            HandleId::NorthEast | HandleId::SouthWest => "nesw-resize",
            HandleId::North | HandleId::South => "ns-resize",
            HandleId::East | HandleId::West => "ew-resize",
            HandleId::Body => "move",
        }
    }
}

/// Finds what part of `rect` lies under `p`.
///
/// `hit_size` is the side of each handle's square hit box, in the same space
/// as `rect` and `p`.
pub fn hit_test(rect: &Rect, p: Point, hit_size: f64) -> Option<HandleId> {
    HandleId::RESIZE_HANDLES
        .into_iter()
        .find(|handle| handle.handle_box(rect, hit_size).contains(p))
        .or_else(|| rect.contains(p).then_some(HandleId::Body))
}
