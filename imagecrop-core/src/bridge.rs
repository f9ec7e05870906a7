//! The widget boundary: host signals and page-space pointer events in,
//! `WidgetToHost` signals out.
//!
//! Scale and offset are read at every event, so a viewport change that
//! lands in the middle of a drag applies to the very next pointer move.

use crate::aspect::AspectRatio;
use crate::config::{CropConfig, DEFAULT_CONFIG};
use crate::error::CropError;
use crate::handles::HandleId;
use crate::messages::{Flags, HostToWidget, WidgetToHost};
use crate::overlay::Overlay;
use crate::points::{Point, Rect, Size};
use crate::selection::{DragState, SelectionMachine, Transition};
use crate::transforms::{length_to_image, page_to_image, Scale};

pub struct CropEngine {
    scale: Scale,
    offset: Point,
    offset_pending: bool,
    machine: SelectionMachine,
    config: CropConfig,
    /// Signals produced but not yet handed to the host.
    outbox: Vec<WidgetToHost>,
}

impl CropEngine {
    pub fn new(flags: &Flags) -> Result<Self, CropError> {
        Self::with_config(flags, DEFAULT_CONFIG)
    }

    /// Builds the engine from host flags. Only a bad image size is fatal;
    /// other invalid fields are logged and replaced by their defaults.
    ///
    /// Startup signals (`requestOffset`, a sanitized `selectionChanged`) are
    /// queued and come out of the next [`CropEngine::take_signals`] or of the
    /// first handled event.
    pub fn with_config(flags: &Flags, config: CropConfig) -> Result<Self, CropError> {
        flags.validate_image()?;
        let image = flags.image;

        let scale = Scale::from_widths(flags.crop_area_width, image.width).unwrap_or_else(|e| {
            log::warn!("{e}, rendering at scale 1");
            Scale::IDENTITY
        });

        let ratio = match flags.aspect_ratio.map(AspectRatio::try_from).transpose() {
            Ok(ratio) => ratio,
            Err(e) => {
                log::warn!("{e}, starting with a free ratio");
                None
            }
        };

        let initial = match flags.selection {
            Some(rect) if !rect.is_finite() => {
                log::warn!("{}, starting without a selection", CropError::InvalidSelection);
                None
            }
            other => other,
        };

        let machine = SelectionMachine::new(image, ratio, initial, config);

        let mut engine = Self {
            scale,
            offset: Point::ORIGIN,
            offset_pending: false,
            machine,
            config,
            outbox: Vec::new(),
        };

        if engine.machine.committed() != flags.selection {
            engine.outbox.push(WidgetToHost::SelectionChanged {
                selection: engine.machine.committed(),
            });
        }

        match flags.offset {
            Some(offset) if offset.is_finite() => engine.offset = offset,
            Some(offset) => {
                log::warn!(
                    "{}, asking the host instead",
                    CropError::InvalidOffset {
                        x: offset.x,
                        y: offset.y
                    }
                );
                engine.request_offset();
            }
            None => engine.request_offset(),
        }

        log::info!(
            "Crop engine ready: image {}x{}, scale {:.4}, ratio {:?}",
            image.width,
            image.height,
            scale.value(),
            ratio.map(|r| r.as_size())
        );

        Ok(engine)
    }

    /// Drains every queued signal, oldest first.
    pub fn take_signals(&mut self) -> Vec<WidgetToHost> {
        std::mem::take(&mut self.outbox)
    }

    pub fn handle(&mut self, msg: HostToWidget) -> Vec<WidgetToHost> {
        match msg {
            HostToWidget::ViewportChanged { width } => self.viewport_changed(width),
            HostToWidget::ChangeAspectRatio { aspect_ratio } => {
                self.change_aspect_ratio(aspect_ratio)
            }
            HostToWidget::ReceiveOffset { offset } => self.receive_offset(offset),
        }
    }

    /// Parses and handles a serialized [`HostToWidget`].
    pub fn handle_json(&mut self, json: &str) -> Result<Vec<WidgetToHost>, CropError> {
        let msg: HostToWidget = serde_json::from_str(json)?;
        Ok(self.handle(msg))
    }

    /// Recomputes the scale. The selection is in image space and does not
    /// change; the element may have moved, so the offset is asked for again.
    pub fn viewport_changed(&mut self, width: f64) -> Vec<WidgetToHost> {
        match Scale::from_widths(width, self.machine.image().width) {
            Ok(scale) => {
                self.scale = scale;
                self.request_offset();
            }
            Err(e) => log::warn!("Ignoring viewport change: {e}"),
        }
        self.take_signals()
    }

    /// Replaces the ratio constraint, snapping the committed selection to it.
    /// An invalid ratio is rejected and the current one kept.
    pub fn change_aspect_ratio(&mut self, ratio: Option<Size>) -> Vec<WidgetToHost> {
        match ratio.map(AspectRatio::try_from).transpose() {
            Ok(ratio) => {
                if let Some(selection) = self.machine.set_ratio(ratio) {
                    self.outbox.push(WidgetToHost::SelectionChanged { selection });
                }
            }
            Err(e) => log::warn!("Keeping current aspect ratio: {e}"),
        }
        self.take_signals()
    }

    pub fn receive_offset(&mut self, offset: Point) -> Vec<WidgetToHost> {
        if !self.offset_pending {
            log::debug!("Ignoring unrequested offset {offset:?}");
        } else if !offset.is_finite() {
            log::warn!(
                "Ignoring offset reply: {}",
                CropError::InvalidOffset {
                    x: offset.x,
                    y: offset.y
                }
            );
        } else {
            self.offset = offset;
            self.offset_pending = false;
        }
        self.take_signals()
    }

    pub fn pointer_down(&mut self, page: Point) -> Vec<WidgetToHost> {
        if let Some(p) = self.image_point(page) {
            self.machine.pointer_down(p, self.hit_size());
        }
        self.take_signals()
    }

    /// Updates the live rectangle. Nothing is emitted; the live rectangle is
    /// published through [`CropEngine::overlay`].
    pub fn pointer_move(&mut self, page: Point) -> Vec<WidgetToHost> {
        if let Some(p) = self.image_point(page) {
            self.machine.pointer_move(p);
        }
        self.take_signals()
    }

    pub fn pointer_up(&mut self, page: Point) -> Vec<WidgetToHost> {
        let transition = match self.image_point(page) {
            Some(p) => self.machine.pointer_up(p),
            None => self.machine.commit(),
        };
        if let Transition::Committed {
            selection,
            changed: true,
        } = transition
        {
            self.outbox.push(WidgetToHost::SelectionChanged { selection });
        }
        self.take_signals()
    }

    pub fn pointer_cancel(&mut self) -> Vec<WidgetToHost> {
        self.machine.pointer_cancel();
        self.take_signals()
    }

    /// CSS cursor name for the pointer at `page`.
    pub fn cursor_at(&self, page: Point) -> &'static str {
        match self.machine.drag_state() {
            DragState::Creating { .. } => "crosshair",
            DragState::Moving { .. } => HandleId::Body.css_cursor(),
            DragState::Resizing { handle, .. } => handle.css_cursor(),
            DragState::Idle => self
                .image_point(page)
                .and_then(|p| self.machine.hover(p, self.hit_size()))
                .map_or("crosshair", HandleId::css_cursor),
        }
    }

    /// Geometry for drawing the selection at the current scale.
    pub fn overlay(&self) -> Overlay {
        Overlay::build(
            self.machine.current(),
            self.machine.image(),
            self.scale,
            self.config.handle_hit_size,
            self.machine.is_dragging(),
        )
    }

    /// The committed selection, in image space.
    pub fn selection(&self) -> Option<Rect> {
        self.machine.committed()
    }

    /// The in-progress rectangle during a gesture.
    pub fn live_selection(&self) -> Option<Rect> {
        self.machine.live()
    }

    pub fn image(&self) -> Size {
        self.machine.image()
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn is_offset_pending(&self) -> bool {
        self.offset_pending
    }

    pub fn aspect_ratio(&self) -> Option<AspectRatio> {
        self.machine.ratio()
    }

    pub fn drag_state(&self) -> DragState {
        self.machine.drag_state()
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    fn request_offset(&mut self) {
        if self.offset_pending {
            log::debug!("Offset request already pending");
            return;
        }
        self.offset_pending = true;
        self.outbox.push(WidgetToHost::RequestOffset);
    }

    fn image_point(&self, page: Point) -> Option<Point> {
        if !page.is_finite() {
            log::debug!("Ignoring non-finite pointer position {page:?}");
            return None;
        }
        Some(page_to_image(page, self.offset, self.scale))
    }

    /// Handle hit box side in image pixels at the current scale.
    fn hit_size(&self) -> f64 {
        length_to_image(self.config.handle_hit_size, self.scale)
    }
}
