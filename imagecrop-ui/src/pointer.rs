use imagecrop_core::Point;

/// Which engine input a DOM pointer event maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

impl PointerPhase {
    pub fn from_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            "pointerdown" => Some(Self::Down),
            "pointermove" => Some(Self::Move),
            "pointerup" => Some(Self::Up),
            "pointercancel" | "lostpointercapture" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Pointer position in page coordinates.
pub fn page_point(event: &web_sys::MouseEvent) -> Point {
    Point::new(event.page_x() as f64, event.page_y() as f64)
}
