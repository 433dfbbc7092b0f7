//! Per-frame driver: advance the spin, upload the model matrix, draw

use nalgebra::Matrix4;

use crate::config::{FirstFrame, RenderConfig};
use crate::context::GraphicsContext;
use crate::pipeline::Pipeline;
use crate::transform::{to_float_array, Spin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Built but not yet scheduled.
    Idle,
    Running,
    /// Stopped by the host; never leaves this state.
    Stopped,
}

/// What the host scheduler should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A frame was drawn; request the next one.
    Continue,
    /// The driver has not been started; nothing was drawn.
    Idle,
    /// The driver was stopped; do not reschedule.
    Stopped,
}

/// Owns the context, the pipeline handles and the only mutable animation
/// state (the spin), and is the sole thing the frame callback touches.
pub struct FrameDriver<C: GraphicsContext> {
    ctx: C,
    pipeline: Pipeline<C>,
    config: RenderConfig,
    spin: Spin,
    model: Matrix4<f32>,
    state: DriverState,
    frames: u64,
}

impl<C: GraphicsContext> FrameDriver<C> {
    pub fn new(ctx: C, pipeline: Pipeline<C>, config: RenderConfig) -> Self {
        Self {
            ctx,
            pipeline,
            config,
            spin: Spin::new(),
            model: Matrix4::identity(),
            state: DriverState::Idle,
            frames: 0,
        }
    }

    /// Idle -> Running. Has no effect once running or stopped.
    pub fn start(&mut self) {
        if self.state == DriverState::Idle {
            self.state = DriverState::Running;
            log::debug!("frame driver running");
        }
    }

    /// Ends the animation; later ticks draw nothing.
    pub fn stop(&mut self) {
        if self.state != DriverState::Stopped {
            log::info!("frame driver stopped after {} frames", self.frames);
            self.state = DriverState::Stopped;
        }
    }

    /// Draws one frame for the host timestamp `now` (milliseconds).
    pub fn tick(&mut self, now: f64) -> Tick {
        match self.state {
            DriverState::Idle => return Tick::Idle,
            DriverState::Stopped => return Tick::Stopped,
            DriverState::Running => {}
        }

        if self.frames == 0 {
            if self.config.first_frame == FirstFrame::SeedFromFirst {
                self.spin = Spin::seeded(now);
            }
            log::info!("first frame at {now:.1}ms");
        }

        let (spin, model) = match self.config.max_frame_delta_ms {
            Some(max) => self.spin.advance_clamped(now, max),
            None => self.spin.advance(now),
        };
        self.spin = spin;
        self.model = model;

        let caps = &self.pipeline.caps;
        self.ctx
            .uniform_matrix4(self.pipeline.model_uniform.as_ref(), &to_float_array(&model));

        self.ctx.enable(caps.depth_test);
        self.ctx.clear(caps.color_buffer_bit);
        self.ctx.clear(caps.depth_buffer_bit);

        self.ctx
            .draw_elements(caps.triangles, self.pipeline.index_count, caps.unsigned_short, 0);

        self.frames += 1;
        Tick::Continue
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn rotation(&self) -> f32 {
        self.spin.rotation
    }

    pub fn model_matrix(&self) -> &Matrix4<f32> {
        &self.model
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn pipeline(&self) -> &Pipeline<C> {
        &self.pipeline
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }
}
