pub mod aspect;
pub mod bridge;
pub mod clamp;
pub mod config;
pub mod error;
pub mod handles;
pub mod messages;
pub mod overlay;
pub mod points;
pub mod selection;
pub mod transforms;

pub use aspect::{constrain, constrain_from, AspectRatio};
pub use bridge::CropEngine;
pub use clamp::{clamp, clamp_toward, is_contained};
pub use config::{CropConfig, DEFAULT_CONFIG};
pub use error::CropError;
pub use handles::{hit_test, HandleId, Side};
pub use messages::{Flags, HostToWidget, WidgetToHost};
pub use overlay::{HandleBox, Overlay};
pub use points::{Point, Rect, Size};
pub use selection::{DragState, SelectionMachine, Transition};
pub use transforms::{
    length_to_image, page_to_image, page_to_viewport, rect_to_image, rect_to_viewport, to_image,
    to_viewport, viewport_to_page, Scale,
};
