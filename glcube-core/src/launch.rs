//! Startup: turn an optional context into a running frame driver

use std::cell::Cell;

use crate::capabilities::Capabilities;
use crate::config::RenderConfig;
use crate::context::{GraphicsContext, Notifier};
use crate::driver::FrameDriver;
use crate::error::{RenderError, Result};
use crate::geometry::CubeGeometry;
use crate::pipeline::Pipeline;
use crate::projection::Surface;

pub const UNSUPPORTED_MESSAGE: &str = "browser might not support webgl";

/// Admits a single launch, so one buffer triple, one program and one frame
/// loop exist per host.
#[derive(Debug, Default)]
pub struct LaunchGuard {
    launched: Cell<bool>,
}

impl LaunchGuard {
    pub const fn new() -> Self {
        Self {
            launched: Cell::new(false),
        }
    }

    /// Fails with [`RenderError::AlreadyLaunched`] after the first claim.
    pub fn claim(&self) -> Result<()> {
        if self.launched.replace(true) {
            log::warn!("refusing to launch a second cube pipeline");
            return Err(RenderError::AlreadyLaunched);
        }
        Ok(())
    }

    /// Gives the claim back when startup failed before creating GPU objects.
    pub fn release(&self) {
        self.launched.set(false);
    }

    pub fn is_claimed(&self) -> bool {
        self.launched.get()
    }
}

/// Builds the pipeline on `context` and returns a started driver.
///
/// Without a context the user is notified and nothing else happens.
pub fn launch<C, N>(
    context: Option<C>,
    surface: Surface,
    config: RenderConfig,
    notifier: &N,
) -> Result<FrameDriver<C>>
where
    C: GraphicsContext,
    N: Notifier + ?Sized,
{
    let Some(ctx) = context else {
        log::error!("{UNSUPPORTED_MESSAGE}");
        notifier.notify(UNSUPPORTED_MESSAGE);
        return Err(RenderError::Unsupported);
    };

    let caps = Capabilities::query(&ctx)?;
    let pipeline = Pipeline::init(&ctx, caps, CubeGeometry::standard(), surface, &config)?;
    let mut driver = FrameDriver::new(ctx, pipeline, config);
    driver.start();
    Ok(driver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::DriverState;
    use crate::testing::{RecordingContext, RecordingNotifier};

    #[test]
    fn test_unsupported_context_notifies_and_stops() {
        let notifier = RecordingNotifier::default();
        let surface = Surface::new(320, 240).unwrap();
        let result =
            launch::<RecordingContext, _>(None, surface, RenderConfig::default(), &notifier);
        assert_eq!(result.err(), Some(RenderError::Unsupported));
        assert_eq!(notifier.messages(), vec![UNSUPPORTED_MESSAGE.to_string()]);
    }

    #[test]
    fn test_guard_admits_one_launch() {
        let guard = LaunchGuard::new();
        assert!(!guard.is_claimed());
        assert_eq!(guard.claim(), Ok(()));
        assert_eq!(guard.claim(), Err(RenderError::AlreadyLaunched));
        assert!(guard.is_claimed());

        guard.release();
        assert_eq!(guard.claim(), Ok(()));
    }

    #[test]
    fn test_launch_starts_the_driver() {
        let notifier = RecordingNotifier::default();
        let surface = Surface::new(320, 240).unwrap();
        let ctx = RecordingContext::new();
        let driver = launch(Some(ctx), surface, RenderConfig::default(), &notifier).unwrap();
        assert_eq!(driver.state(), DriverState::Running);
        assert!(notifier.messages().is_empty());
        assert_eq!(driver.context().uploads().len(), 3);
    }

    #[test]
    fn test_missing_capability_aborts_before_gpu_calls() {
        let notifier = RecordingNotifier::default();
        let surface = Surface::new(320, 240).unwrap();
        let ctx = RecordingContext::new().without_constant("STATIC_DRAW");
        let result = launch(Some(ctx), surface, RenderConfig::default(), &notifier);
        assert_eq!(result.err(), Some(RenderError::MissingCapability("STATIC_DRAW")));
    }
}
