use crate::error::CropError;
use crate::points::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Construction input supplied by the host page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Flags {
    /// Native pixel size of the image.
    pub image: Size,
    /// Width the image is rendered at, in page pixels.
    pub crop_area_width: f64,
    /// Page offset of the rendered image. When absent the widget asks for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Point>,
    /// Initial selection in image space.
    #[serde(default)]
    pub selection: Option<Rect>,
    /// Initial ratio constraint; absent means free ratio.
    #[serde(default)]
    pub aspect_ratio: Option<Size>,
}

impl Flags {
    pub fn new(image: Size, crop_area_width: f64) -> Self {
        Self {
            image,
            crop_area_width,
            offset: None,
            selection: None,
            aspect_ratio: None,
        }
    }

    /// Strict check of every field. The engine itself is more lenient and
    /// falls back per field; see [`crate::CropEngine::new`].
    pub fn validate(&self) -> Result<(), CropError> {
        self.validate_image()?;
        if !(self.crop_area_width.is_finite() && self.crop_area_width > 0.0) {
            return Err(CropError::InvalidCropAreaWidth(self.crop_area_width));
        }
        if let Some(offset) = self.offset {
            if !offset.is_finite() {
                return Err(CropError::InvalidOffset {
                    x: offset.x,
                    y: offset.y,
                });
            }
        }
        if let Some(selection) = self.selection {
            if !selection.is_finite() {
                return Err(CropError::InvalidSelection);
            }
        }
        if let Some(ratio) = self.aspect_ratio {
            if !ratio.is_positive() {
                return Err(CropError::InvalidAspectRatio {
                    width: ratio.width,
                    height: ratio.height,
                });
            }
        }
        Ok(())
    }

    pub fn validate_image(&self) -> Result<(), CropError> {
        if self.image.is_positive() {
            Ok(())
        } else {
            Err(CropError::InvalidImageSize {
                width: self.image.width,
                height: self.image.height,
            })
        }
    }
}

/// Signals sent from the host page to the widget.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostToWidget {
    /// The rendered width of the image changed.
    ViewportChanged { width: f64 },

    /// Replace the ratio constraint; `null` clears it.
    #[serde(rename_all = "camelCase")]
    ChangeAspectRatio { aspect_ratio: Option<Size> },

    /// Answer to a prior `requestOffset`.
    ReceiveOffset { offset: Point },
}

/// Signals sent from the widget to the host page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WidgetToHost {
    /// The committed selection changed. `None` means it was cleared.
    SelectionChanged { selection: Option<Rect> },

    /// The widget needs the element's page offset.
    RequestOffset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse_minimal() {
        let json = r#"{"image":{"width":900,"height":600},"cropAreaWidth":450}"#;
        let flags: Flags = serde_json::from_str(json).unwrap();
        assert_eq!(flags, Flags::new(Size::new(900.0, 600.0), 450.0));
        assert!(flags.validate().is_ok());
    }

    #[test]
    fn flags_parse_full() {
        let json = r#"{
            "image": {"width": 900, "height": 600},
            "cropAreaWidth": 900,
            "offset": {"x": 12, "y": 34},
            "selection": {"topLeft": {"x": 100, "y": 100}, "bottomRight": {"x": 400, "y": 300}},
            "aspectRatio": {"width": 16, "height": 9}
        }"#;
        let flags: Flags = serde_json::from_str(json).unwrap();
        assert_eq!(flags.offset, Some(Point::new(12.0, 34.0)));
        assert_eq!(
            flags.selection,
            Some(Rect::new(Point::new(100.0, 100.0), Point::new(400.0, 300.0)))
        );
        assert_eq!(flags.aspect_ratio, Some(Size::new(16.0, 9.0)));
    }

    #[test]
    fn flags_null_means_absent() {
        let json = r#"{"image":{"width":1,"height":1},"cropAreaWidth":1,"selection":null,"aspectRatio":null}"#;
        let flags: Flags = serde_json::from_str(json).unwrap();
        assert!(flags.selection.is_none());
        assert!(flags.aspect_ratio.is_none());
    }

    #[test]
    fn flags_validate_rejects_bad_fields() {
        let mut flags = Flags::new(Size::new(0.0, 600.0), 900.0);
        assert!(matches!(
            flags.validate(),
            Err(CropError::InvalidImageSize { .. })
        ));

        flags.image = Size::new(900.0, 600.0);
        flags.crop_area_width = -1.0;
        assert!(matches!(
            flags.validate(),
            Err(CropError::InvalidCropAreaWidth(_))
        ));

        flags.crop_area_width = 900.0;
        flags.aspect_ratio = Some(Size::new(1.0, 0.0));
        assert!(matches!(
            flags.validate(),
            Err(CropError::InvalidAspectRatio { .. })
        ));
    }

    #[test]
    fn host_to_widget_viewport_changed() {
        let msg: HostToWidget =
            serde_json::from_str(r#"{"type":"viewportChanged","width":450}"#).unwrap();
        assert_eq!(msg, HostToWidget::ViewportChanged { width: 450.0 });
    }

    #[test]
    fn host_to_widget_change_aspect_ratio() {
        let msg: HostToWidget = serde_json::from_str(
            r#"{"type":"changeAspectRatio","aspectRatio":{"width":1,"height":1}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            HostToWidget::ChangeAspectRatio {
                aspect_ratio: Some(Size::new(1.0, 1.0))
            }
        );

        let cleared: HostToWidget =
            serde_json::from_str(r#"{"type":"changeAspectRatio","aspectRatio":null}"#).unwrap();
        assert_eq!(
            cleared,
            HostToWidget::ChangeAspectRatio { aspect_ratio: None }
        );
    }

    #[test]
    fn host_to_widget_receive_offset_roundtrip() {
        let msg = HostToWidget::ReceiveOffset {
            offset: Point::new(5.0, 7.5),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"receiveOffset""#));

        let parsed: HostToWidget = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn unknown_message_is_an_error() {
        assert!(serde_json::from_str::<HostToWidget>(r#"{"type":"explode"}"#).is_err());
    }

    #[test]
    fn widget_to_host_selection_changed_shape() {
        let msg = WidgetToHost::SelectionChanged {
            selection: Some(Rect::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0))),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(
            json,
            r#"{"type":"selectionChanged","selection":{"topLeft":{"x":1.0,"y":2.0},"bottomRight":{"x":3.0,"y":4.0}}}"#
        );

        let cleared = serde_json::to_string(&WidgetToHost::SelectionChanged { selection: None })
            .unwrap();
        assert_eq!(cleared, r#"{"type":"selectionChanged","selection":null}"#);
    }

    #[test]
    fn widget_to_host_request_offset_shape() {
        let json = serde_json::to_string(&WidgetToHost::RequestOffset).unwrap();
        assert_eq!(json, r#"{"type":"requestOffset"}"#);
    }
}
