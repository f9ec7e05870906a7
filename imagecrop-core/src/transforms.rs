//! Conversions between the three coordinate spaces the widget deals with.
//!
//! - **image**: the image's own pixel grid; everything crossing the widget
//!   boundary is expressed here.
//! - **viewport**: pixels of the image as currently rendered on screen.
//! - **page**: viewport coordinates shifted by the element's page offset.
//!
//! image → viewport multiplies by [`Scale`], viewport → page adds the offset.

use crate::error::CropError;
use crate::points::{Point, Rect};

/// Ratio `viewport_rendered_width / image_native_width`.
///
/// Only constructible from a strictly positive, finite value, so the
/// conversion functions below can never produce NaN or infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f64);

impl Scale {
    pub const IDENTITY: Scale = Scale(1.0);

    pub fn new(value: f64) -> Result<Self, CropError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(CropError::InvalidScale(value))
        }
    }

    /// Derives the scale from the rendered width and the image's native width.
    pub fn from_widths(viewport_width: f64, image_width: f64) -> Result<Self, CropError> {
        if !(viewport_width.is_finite() && viewport_width > 0.0) {
            return Err(CropError::InvalidCropAreaWidth(viewport_width));
        }
        Self::new(viewport_width / image_width)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Image-native point → viewport-rendered point.
pub fn to_viewport(p: Point, scale: Scale) -> Point {
    p.mul_scalar(scale.0)
}

/// Viewport-rendered point → image-native point.
pub fn to_image(p: Point, scale: Scale) -> Point {
    p.div_scalar(scale.0)
}

pub fn rect_to_viewport(rect: Rect, scale: Scale) -> Rect {
    Rect::new(
        to_viewport(rect.top_left, scale),
        to_viewport(rect.bottom_right, scale),
    )
}

pub fn rect_to_image(rect: Rect, scale: Scale) -> Rect {
    Rect::new(
        to_image(rect.top_left, scale),
        to_image(rect.bottom_right, scale),
    )
}

/// Converts a length in viewport pixels to image pixels.
pub fn length_to_image(length: f64, scale: Scale) -> f64 {
    length / scale.0
}

/// Page point → viewport point, given the element's page offset.
pub fn page_to_viewport(p: Point, offset: Point) -> Point {
    p - offset
}

pub fn viewport_to_page(p: Point, offset: Point) -> Point {
    p + offset
}

/// Page point straight to image space.
pub fn page_to_image(p: Point, offset: Point, scale: Scale) -> Point {
    to_image(page_to_viewport(p, offset), scale)
}
