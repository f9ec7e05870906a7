use crate::pointer::{page_point, PointerPhase};
use crate::ports::Ports;
use gloo_utils::format::JsValueSerdeExt;
use imagecrop_core::{CropEngine, Flags, Point, Size, WidgetToHost};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Creates a crop widget from the host's flags.
///
/// Signals produced during construction (`requestOffset`, a sanitized
/// `selectionChanged`) are delivered on the next microtask, so subscribers
/// registered right after `embed` returns still receive them.
#[wasm_bindgen]
pub fn embed(flags: JsValue) -> Result<ImageCrop, JsValue> {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    let flags: Flags = flags
        .into_serde()
        .map_err(|e| JsValue::from_str(&format!("Invalid flags: {}", e)))?;
    ImageCrop::new(&flags)
}

#[wasm_bindgen]
pub struct ImageCrop {
    engine: Rc<RefCell<CropEngine>>,
    ports: Rc<Ports>,
}

impl ImageCrop {
    fn new(flags: &Flags) -> Result<Self, JsValue> {
        let engine = CropEngine::new(flags).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let widget = Self {
            engine: Rc::new(RefCell::new(engine)),
            ports: Rc::new(Ports::default()),
        };

        let engine = Rc::clone(&widget.engine);
        let ports = Rc::clone(&widget.ports);
        wasm_bindgen_futures::spawn_local(async move {
            let signals = engine.borrow_mut().take_signals();
            ports.dispatch(signals);
        });

        Ok(widget)
    }

    /// Runs `f` against the engine, then hands its signals to subscribers
    /// once the borrow is released.
    fn run(&self, f: impl FnOnce(&mut CropEngine) -> Vec<WidgetToHost>) {
        let signals = f(&mut self.engine.borrow_mut());
        self.ports.dispatch(signals);
    }
}

#[wasm_bindgen]
impl ImageCrop {
    #[wasm_bindgen(js_name = viewportChanged)]
    pub fn viewport_changed(&self, width: f64) {
        self.run(|engine| engine.viewport_changed(width));
    }

    /// `null` or `undefined` clears the constraint.
    #[wasm_bindgen(js_name = changeAspectRatio)]
    pub fn change_aspect_ratio(&self, ratio: JsValue) -> Result<(), JsValue> {
        let ratio: Option<Size> = ratio
            .into_serde()
            .map_err(|e| JsValue::from_str(&format!("Invalid aspect ratio: {}", e)))?;
        self.run(|engine| engine.change_aspect_ratio(ratio));
        Ok(())
    }

    #[wasm_bindgen(js_name = receiveOffset)]
    pub fn receive_offset(&self, offset: JsValue) -> Result<(), JsValue> {
        let offset: Point = offset
            .into_serde()
            .map_err(|e| JsValue::from_str(&format!("Invalid offset: {}", e)))?;
        self.run(|engine| engine.receive_offset(offset));
        Ok(())
    }

    /// `callback(selection)` with an image-space rectangle, or `null` when
    /// the selection was cleared.
    #[wasm_bindgen(js_name = subscribeSelectionChanged)]
    pub fn subscribe_selection_changed(&self, callback: js_sys::Function) {
        self.ports.subscribe_selection_changed(callback);
    }

    /// `callback()` whenever the widget needs its page offset; answer with
    /// `receiveOffset`.
    #[wasm_bindgen(js_name = subscribeRequestOffset)]
    pub fn subscribe_request_offset(&self, callback: js_sys::Function) {
        self.ports.subscribe_request_offset(callback);
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, page_x: f64, page_y: f64) {
        self.run(|engine| engine.pointer_down(Point::new(page_x, page_y)));
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, page_x: f64, page_y: f64) {
        self.run(|engine| engine.pointer_move(Point::new(page_x, page_y)));
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self, page_x: f64, page_y: f64) {
        self.run(|engine| engine.pointer_up(Point::new(page_x, page_y)));
    }

    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&self) {
        self.run(CropEngine::pointer_cancel);
    }

    /// Feeds a DOM `pointerdown`/`pointermove`/`pointerup`/`pointercancel`.
    #[wasm_bindgen(js_name = handlePointerEvent)]
    pub fn handle_pointer_event(&self, event: &web_sys::PointerEvent) {
        let Some(phase) = PointerPhase::from_event_type(&event.type_()) else {
            log::debug!("Ignoring {} event", event.type_());
            return;
        };
        let page = page_point(event);
        self.run(|engine| match phase {
            PointerPhase::Down => engine.pointer_down(page),
            PointerPhase::Move => engine.pointer_move(page),
            PointerPhase::Up => engine.pointer_up(page),
            PointerPhase::Cancel => engine.pointer_cancel(),
        });
    }

    /// The committed selection in image space, or `null`.
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        JsValue::from_serde(&self.engine.borrow().selection())
            .map_err(|e| JsValue::from_str(&format!("Serialize error: {}", e)))
    }

    /// Viewport-space geometry for drawing the selection.
    pub fn overlay(&self) -> Result<JsValue, JsValue> {
        JsValue::from_serde(&self.engine.borrow().overlay())
            .map_err(|e| JsValue::from_str(&format!("Serialize error: {}", e)))
    }

    #[wasm_bindgen(js_name = cursorAt)]
    pub fn cursor_at(&self, page_x: f64, page_y: f64) -> String {
        self.engine
            .borrow()
            .cursor_at(Point::new(page_x, page_y))
            .to_string()
    }
}
