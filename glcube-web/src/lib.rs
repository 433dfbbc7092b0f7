//! glcube Web - WebGL renderer for the rotating cube
//!
//! Binds the core pipeline to a browser canvas and drives it from
//! `requestAnimationFrame`.

use glcube_core::{FirstFrame, FrameDriver, LaunchGuard, RenderConfig, RenderError, Surface};
use wasm_bindgen::prelude::*;

pub mod animation;
pub mod context;
pub mod host;
pub mod logging;

pub use animation::AnimationLoop;
pub use context::{acquire_context, WebGlContext};
pub use host::AlertNotifier;
pub use logging::{init_logging, LoggingConfig};

/// Canvas used by [`run`] when the page does not name one.
pub const DEFAULT_CANVAS_ID: &str = "gocanvas";

pub(crate) fn to_js(err: RenderError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

thread_local! {
    static LAUNCH: LaunchGuard = LaunchGuard::new();
}

/// Claims the page's single pipeline slot.
pub fn claim_launch() -> glcube_core::Result<()> {
    LAUNCH.with(LaunchGuard::claim)
}

fn release_launch() {
    LAUNCH.with(LaunchGuard::release);
}

fn locate_canvas(canvas_id: &str) -> Result<(Surface, Option<WebGlContext>), JsValue> {
    let document = host::window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let canvas = host::canvas_by_id(&document, canvas_id)?;
    let surface = host::fit_canvas_to_body(&document, &canvas)?;
    let context = acquire_context(&canvas)?;
    Ok((surface, context))
}

/// Looks up the canvas, fits it to the page and builds a running driver.
///
/// Only the first successful call per page builds a pipeline; later calls
/// fail with [`RenderError::AlreadyLaunched`].
pub fn launch_on_canvas(
    canvas_id: &str,
    config: RenderConfig,
) -> Result<FrameDriver<WebGlContext>, JsValue> {
    claim_launch().map_err(to_js)?;
    let (surface, context) = match locate_canvas(canvas_id) {
        Ok(found) => found,
        Err(err) => {
            release_launch();
            return Err(err);
        }
    };

    match glcube_core::launch(context, surface, config, &AlertNotifier) {
        Ok(driver) => Ok(driver),
        Err(RenderError::Unsupported) => {
            release_launch();
            Err(to_js(RenderError::Unsupported))
        }
        Err(err) => Err(to_js(err)),
    }
}

/// JavaScript handle to a rotating cube on one canvas
#[wasm_bindgen]
pub struct CubeApp {
    canvas_id: String,
    config: RenderConfig,
    running: Option<AnimationLoop>,
}

#[wasm_bindgen]
impl CubeApp {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> CubeApp {
        CubeApp {
            canvas_id: canvas_id.to_string(),
            config: RenderConfig::default(),
            running: None,
        }
    }

    /// Fail startup on shader compile/link errors instead of drawing nothing.
    #[wasm_bindgen(js_name = setStrictShaders)]
    pub fn set_strict_shaders(&mut self, strict: bool) {
        self.config.strict_shaders = strict;
    }

    /// Caps the per-frame elapsed time, e.g. after a backgrounded tab resumes.
    #[wasm_bindgen(js_name = setMaxFrameDelta)]
    pub fn set_max_frame_delta(&mut self, max_ms: f64) {
        self.config.max_frame_delta_ms = Some(max_ms);
    }

    /// Measure the first frame against timestamp 0 rather than itself.
    #[wasm_bindgen(js_name = setZeroBasedFirstFrame)]
    pub fn set_zero_based_first_frame(&mut self, zero_based: bool) {
        self.config.first_frame = if zero_based {
            FirstFrame::FromZero
        } else {
            FirstFrame::SeedFromFirst
        };
    }

    /// Builds the pipeline and starts animating.
    ///
    /// A page gets one pipeline: starting twice, or after [`run`] or another
    /// `CubeApp`, is an error. `stop` is final.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.running.is_some() {
            return Err(to_js(RenderError::AlreadyLaunched));
        }
        let driver = launch_on_canvas(&self.canvas_id, self.config.clone())?;
        self.running = Some(AnimationLoop::start(driver)?);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.stop();
        }
    }

    pub fn rotation(&self) -> f32 {
        self.running.as_ref().map_or(0.0, AnimationLoop::rotation)
    }

    pub fn frames(&self) -> f64 {
        self.running.as_ref().map_or(0, AnimationLoop::frames) as f64
    }
}

/// Starts a cube on `canvas_id` and keeps it running for the life of the page.
#[wasm_bindgen]
pub fn run(canvas_id: Option<String>) -> Result<(), JsValue> {
    let canvas_id = canvas_id.as_deref().unwrap_or(DEFAULT_CANVAS_ID);
    let driver = launch_on_canvas(canvas_id, RenderConfig::default())?;
    // The page owns the loop from here on.
    std::mem::forget(AnimationLoop::start(driver)?);
    Ok(())
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    init_logging(LoggingConfig::default());
    Ok(())
}
