//! `requestAnimationFrame` loop around a `FrameDriver`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glcube_core::{FrameDriver, Tick};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

use crate::context::WebGlContext;
use crate::host::window;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Keeps exactly one frame request outstanding until stopped.
///
/// The callback holds a handle to itself so it can reschedule; `stop`
/// cancels the pending request and drops the callback to break that cycle.
pub struct AnimationLoop {
    driver: Rc<RefCell<FrameDriver<WebGlContext>>>,
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
    pub fn start(driver: FrameDriver<WebGlContext>) -> Result<Self, JsValue> {
        let driver = Rc::new(RefCell::new(driver));
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let frame = {
            let driver = driver.clone();
            let callback = callback.clone();
            let pending = pending.clone();
            Closure::wrap(Box::new(move |timestamp: f64| {
                pending.set(None);
                if driver.borrow_mut().tick(timestamp) != Tick::Continue {
                    return;
                }
                match request_frame(&callback) {
                    Ok(id) => pending.set(Some(id)),
                    Err(err) => log::error!("failed to schedule next frame: {err:?}"),
                }
            }) as Box<dyn FnMut(f64)>)
        };
        *callback.borrow_mut() = Some(frame);

        pending.set(Some(request_frame(&callback)?));
        log::debug!("animation loop scheduled");

        Ok(Self {
            driver,
            callback,
            pending,
        })
    }

    /// Cancels the outstanding request and stops the driver.
    pub fn stop(&self) {
        if let Some(id) = self.pending.take() {
            if let Err(err) = window().and_then(|w| w.cancel_animation_frame(id)) {
                log::warn!("failed to cancel frame {id}: {err:?}");
            }
        }
        self.driver.borrow_mut().stop();
        self.callback.borrow_mut().take();
    }

    pub fn rotation(&self) -> f32 {
        self.driver.borrow().rotation()
    }

    pub fn frames(&self) -> u64 {
        self.driver.borrow().frames()
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    let callback = callback.borrow();
    let closure = callback
        .as_ref()
        .ok_or_else(|| JsValue::from_str("animation loop was stopped"))?;
    window()?.request_animation_frame(closure.as_ref().unchecked_ref())
}
