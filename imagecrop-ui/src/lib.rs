//! Browser surface for the crop engine: JS subscriptions, `JsValue`
//! conversion and DOM pointer events. All interaction logic lives in
//! `imagecrop-core`.

mod pointer;
mod ports;
mod widget;

pub use pointer::PointerPhase;
pub use widget::{embed, ImageCrop};
