use gloo_utils::format::JsValueSerdeExt;
use imagecrop_core::WidgetToHost;
use std::cell::RefCell;
use wasm_bindgen::JsValue;

/// JS subscribers for the widget's outgoing signals.
#[derive(Default)]
pub struct Ports {
    selection_changed: RefCell<Vec<js_sys::Function>>,
    request_offset: RefCell<Vec<js_sys::Function>>,
}

impl Ports {
    pub fn subscribe_selection_changed(&self, callback: js_sys::Function) {
        self.selection_changed.borrow_mut().push(callback);
    }

    pub fn subscribe_request_offset(&self, callback: js_sys::Function) {
        self.request_offset.borrow_mut().push(callback);
    }

    /// Delivers `signals` in order. Must be called with no engine borrow held:
    /// subscribers may call straight back into the widget.
    pub fn dispatch(&self, signals: Vec<WidgetToHost>) {
        for signal in signals {
            match signal {
                WidgetToHost::SelectionChanged { selection } => {
                    match JsValue::from_serde(&selection) {
                        Ok(arg) => Self::notify(&self.selection_changed, &arg),
                        Err(e) => log::warn!("Failed to serialize selection: {}", e),
                    }
                }
                WidgetToHost::RequestOffset => {
                    Self::notify(&self.request_offset, &JsValue::UNDEFINED)
                }
            }
        }
    }

    fn notify(subscribers: &RefCell<Vec<js_sys::Function>>, arg: &JsValue) {
        // Snapshot so a callback can subscribe without a double borrow.
        let callbacks = subscribers.borrow().clone();
        for callback in callbacks {
            if let Err(e) = callback.call1(&JsValue::NULL, arg) {
                log::warn!("Subscriber threw: {:?}", e);
            }
        }
    }
}
