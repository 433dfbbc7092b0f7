//! glcube Core Library - rotating cube pipeline, independent of the host
//!
//! This library holds everything that does not need a browser: the cube
//! tables, camera and model transforms, the capability table, the
//! `GraphicsContext` seam, pipeline setup and the per-frame driver.

pub mod capabilities;
pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod launch;
pub mod pipeline;
pub mod projection;
pub mod shaders;
pub mod transform;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types
pub use capabilities::Capabilities;
pub use config::{FirstFrame, RenderConfig};
pub use context::{GraphicsContext, Notifier};
pub use driver::{DriverState, FrameDriver, Tick};
pub use error::{RenderError, Result, ShaderStage};
pub use geometry::CubeGeometry;
pub use launch::{launch, LaunchGuard, UNSUPPORTED_MESSAGE};
pub use pipeline::Pipeline;
pub use projection::{Camera, Surface};
pub use transform::{to_float_array, Spin, Transform};
