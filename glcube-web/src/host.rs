//! Browser collaborators: canvas lookup and sizing, user alerts

use glcube_core::{Notifier, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::to_js;

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))
}

pub fn canvas_by_id(document: &Document, id: &str) -> Result<HtmlCanvasElement, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id `{id}`")))?;
    Ok(element.dyn_into::<HtmlCanvasElement>()?)
}

/// Sizes the canvas to the page body and returns the resulting surface.
pub fn fit_canvas_to_body(
    document: &Document,
    canvas: &HtmlCanvasElement,
) -> Result<Surface, JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let width = body.client_width().max(0) as u32;
    let height = body.client_height().max(0) as u32;

    canvas.set_width(width);
    canvas.set_height(height);
    log::info!("canvas size: {width}x{height}");

    Surface::new(width, height).map_err(to_js)
}

/// Reports fatal startup problems through `window.alert`.
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, message: &str) {
        let shown = web_sys::window().map(|window| window.alert_with_message(message));
        if !matches!(shown, Some(Ok(()))) {
            log::error!("could not show alert: {message}");
        }
    }
}
