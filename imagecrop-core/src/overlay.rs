//! Render-space geometry for the selection overlay.
//!
//! The host draws the overlay; this only computes where things go, in
//! viewport-rendered pixels.

use crate::handles::HandleId;
use crate::points::{Point, Rect, Size};
use crate::transforms::{rect_to_viewport, to_viewport, Scale};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct HandleBox {
    pub handle: HandleId,
    pub rect: Rect,
}

/// Everything needed to paint the selection over the rendered image.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    /// Rendered size of the whole image.
    pub viewport: Size,
    /// The live-or-committed selection, in viewport pixels.
    pub selection: Option<Rect>,
    /// Resize handle boxes, empty without a selection.
    pub handles: Vec<HandleBox>,
    /// Regions outside the selection to shade (top, bottom, left, right).
    pub shades: Vec<Rect>,
    /// Whether a gesture is in progress.
    pub dragging: bool,
}

impl Overlay {
    pub fn build(
        selection: Option<Rect>,
        image: Size,
        scale: Scale,
        handle_size: f64,
        dragging: bool,
    ) -> Self {
        let bottom_right = to_viewport(Point::new(image.width, image.height), scale);
        let viewport = Size::new(bottom_right.x, bottom_right.y);
        let selection = selection.map(|rect| rect_to_viewport(rect, scale));

        let handles = selection
            .map(|rect| {
                HandleId::RESIZE_HANDLES
                    .into_iter()
                    .map(|handle| HandleBox {
                        handle,
                        rect: handle.handle_box(&rect, handle_size),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let shades = selection
            .map(|rect| shade_regions(&rect, viewport))
            .unwrap_or_default();

        Self {
            viewport,
            selection,
            handles,
            shades,
            dragging,
        }
    }
}

/// The four bands around `sel`: full-width above and below, and the left and
/// right pieces between them. Empty bands are skipped.
fn shade_regions(sel: &Rect, viewport: Size) -> Vec<Rect> {
    let (w, h) = (viewport.width, viewport.height);
    [
        Rect::new(Point::ORIGIN, Point::new(w, sel.top())),
        Rect::new(Point::new(0.0, sel.bottom()), Point::new(w, h)),
        Rect::new(
            Point::new(0.0, sel.top()),
            Point::new(sel.left(), sel.bottom()),
        ),
        Rect::new(
            Point::new(sel.right(), sel.top()),
            Point::new(w, sel.bottom()),
        ),
    ]
    .into_iter()
    .filter(|band| band.area() > 0.0)
    .collect()
}
