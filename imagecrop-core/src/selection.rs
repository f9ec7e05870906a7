//! Selection state machine.
//!
//! Owns the committed rectangle and the drag state, and turns pointer
//! gestures (already converted to image space) into a validated rectangle.
//! Every intermediate rectangle goes through the aspect solver and the
//! bounds clamper, using the ratio current at that event.

use crate::aspect::{constrain, constrain_from, AspectRatio};
use crate::clamp::{clamp, clamp_toward};
use crate::config::CropConfig;
use crate::handles::{hit_test, HandleId};
use crate::points::{Point, Rect, Size};

/// The active gesture. Exactly one variant holds at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// Drawing a fresh selection from `anchor`.
    Creating { anchor: Point },
    /// Dragging the body; `grab_offset` is pointer minus the top-left corner.
    Moving { grab_offset: Point },
    /// Dragging `handle`; `anchor` is the opposite corner/edge midpoint,
    /// `origin` the selection as it was when the gesture started and `grab`
    /// the pointer minus the handle's position at that time.
    Resizing {
        handle: HandleId,
        anchor: Point,
        origin: Rect,
        grab: Point,
    },
}

/// Result of feeding one pointer event to the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Not a valid input in the current state.
    Ignored,
    /// A gesture began.
    Started(DragState),
    /// The live rectangle was recomputed.
    Live(Option<Rect>),
    /// The gesture ended and its rectangle became the committed selection.
    Committed {
        selection: Option<Rect>,
        changed: bool,
    },
    /// The gesture was abandoned; the previous committed selection stays.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct SelectionMachine {
    image: Size,
    ratio: Option<AspectRatio>,
    committed: Option<Rect>,
    live: Option<Rect>,
    drag: DragState,
    config: CropConfig,
}

impl SelectionMachine {
    /// Creates an idle machine. `initial` is normalized, clamped and snapped
    /// to `ratio`; a degenerate result means no selection.
    pub fn new(
        image: Size,
        ratio: Option<AspectRatio>,
        initial: Option<Rect>,
        config: CropConfig,
    ) -> Self {
        let mut machine = Self {
            image,
            ratio,
            committed: None,
            live: None,
            drag: DragState::Idle,
            config,
        };
        machine.committed = initial
            .map(|rect| machine.snap(clamp(rect.normalized(), image)))
            .filter(|rect| !machine.is_degenerate(rect));
        machine
    }

    pub fn image(&self) -> Size {
        self.image
    }

    pub fn ratio(&self) -> Option<AspectRatio> {
        self.ratio
    }

    pub fn committed(&self) -> Option<Rect> {
        self.committed
    }

    pub fn live(&self) -> Option<Rect> {
        self.live
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != DragState::Idle
    }

    /// The rectangle to render: the live one during a gesture, else the committed one.
    pub fn current(&self) -> Option<Rect> {
        if self.is_dragging() {
            self.live
        } else {
            self.committed
        }
    }

    /// What part of the committed selection lies under `p`.
    pub fn hover(&self, p: Point, hit_size: f64) -> Option<HandleId> {
        self.committed.and_then(|rect| hit_test(&rect, p, hit_size))
    }

    /// Starts a gesture. `hit_size` is the handle hit box side in image pixels.
    pub fn pointer_down(&mut self, p: Point, hit_size: f64) -> Transition {
        if self.is_dragging() {
            log::debug!("Ignoring pointer-down during {:?}", self.drag);
            return Transition::Ignored;
        }

        let p = self.clamp_point(p);
        self.drag = match self.committed.map(|rect| (rect, hit_test(&rect, p, hit_size))) {
            Some((rect, Some(HandleId::Body))) => DragState::Moving {
                grab_offset: p - rect.top_left,
            },
            Some((rect, Some(handle))) => DragState::Resizing {
                handle,
                anchor: handle.anchor(&rect),
                origin: rect,
                grab: p - handle.position(&rect),
            },
            _ => DragState::Creating { anchor: p },
        };
        self.live = match self.drag {
            DragState::Creating { anchor } => Some(Rect::from_corners(anchor, anchor)),
            _ => self.committed,
        };

        Transition::Started(self.drag)
    }

    /// Recomputes the live rectangle for the pointer at `p`.
    pub fn pointer_move(&mut self, p: Point) -> Transition {
        let p = self.clamp_point(p);
        let next = match self.drag {
            DragState::Idle => return Transition::Ignored,
            DragState::Creating { anchor } => {
                let handle = HandleId::SouthEast.facing(anchor, p);
                let proposed = Rect::from_corners(anchor, p);
                let constrained = constrain(proposed, self.ratio, Some(handle));
                clamp_toward(constrained, self.image, handle, self.ratio)
            }
            DragState::Moving { grab_offset } => {
                let Some(current) = self.live else {
                    return Transition::Ignored;
                };
                // The ratio may have changed since the gesture started.
                let current = self.snap(current);
                clamp(current.with_origin(p - grab_offset), self.image)
            }
            DragState::Resizing {
                handle,
                anchor,
                origin,
                grab,
            } => {
                let p = p - grab;
                let facing = handle.facing(anchor, p);
                let proposed = resize_proposal(handle, anchor, origin, p);
                let constrained =
                    constrain_from(proposed, self.ratio, Some(facing), origin.size());
                clamp_toward(constrained, self.image, facing, self.ratio)
            }
        };

        self.live = Some(next);
        Transition::Live(self.live)
    }

    /// Ends the gesture at `p` and commits. A degenerate rectangle commits as
    /// "no selection".
    pub fn pointer_up(&mut self, p: Point) -> Transition {
        if !self.is_dragging() {
            log::debug!("Ignoring pointer-up while idle");
            return Transition::Ignored;
        }
        self.pointer_move(p);
        self.commit()
    }

    /// Ends the gesture with the live rectangle as it stands.
    pub fn commit(&mut self) -> Transition {
        if !self.is_dragging() {
            return Transition::Ignored;
        }
        let selection = self.live.take().filter(|rect| !self.is_degenerate(rect));
        let changed = selection != self.committed;
        self.committed = selection;
        self.drag = DragState::Idle;

        Transition::Committed { selection, changed }
    }

    /// Abandons the gesture without committing.
    pub fn pointer_cancel(&mut self) -> Transition {
        if !self.is_dragging() {
            return Transition::Ignored;
        }
        self.live = None;
        self.drag = DragState::Idle;
        Transition::Cancelled
    }

    /// Replaces the aspect ratio. A new ratio snaps the committed selection;
    /// clearing it leaves the selection untouched. Returns the new committed
    /// selection when it changed.
    pub fn set_ratio(&mut self, ratio: Option<AspectRatio>) -> Option<Option<Rect>> {
        self.ratio = ratio;
        let current = self.committed?;
        let snapped = self.snap(current);
        if snapped == current {
            return None;
        }
        self.committed = Some(snapped).filter(|rect| !self.is_degenerate(rect));
        Some(self.committed)
    }

    fn snap(&self, rect: Rect) -> Rect {
        match self.ratio {
            Some(ratio) if !ratio.matches(&rect, self.config.aspect_epsilon) => {
                clamp(constrain(rect, Some(ratio), None), self.image)
            }
            _ => rect,
        }
    }

    fn is_degenerate(&self, rect: &Rect) -> bool {
        let min = self.config.min_selection_size;
        rect.width() <= min || rect.height() <= min
    }

    /// Pulls `p` into the image. Infinite coordinates land on the nearest edge.
    fn clamp_point(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(0.0, self.image.width),
            p.y.clamp(0.0, self.image.height),
        )
    }
}

/// Rectangle spanned by a resize gesture before any constraint: corners
/// span anchor to pointer, edges only move their own axis.
fn resize_proposal(handle: HandleId, anchor: Point, origin: Rect, p: Point) -> Rect {
    match (handle.x_side(), handle.y_side()) {
        (Some(_), Some(_)) => Rect::from_corners(anchor, p),
        (Some(_), None) => Rect::from_corners(
            Point::new(anchor.x, origin.top()),
            Point::new(p.x, origin.bottom()),
        ),
        (None, Some(_)) => Rect::from_corners(
            Point::new(origin.left(), anchor.y),
            Point::new(origin.right(), p.y),
        ),
        (None, None) => origin,
    }
}
