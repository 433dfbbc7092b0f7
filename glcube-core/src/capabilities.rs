//! Capability table: the symbolic constants the pipeline needs, resolved once

use crate::context::GraphicsContext;
use crate::error::{RenderError, Result};

/// Numeric tokens the context exposes for buffer targets, shader stages,
/// primitive and element types, depth comparison and clear masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub array_buffer: u32,
    pub element_array_buffer: u32,
    pub static_draw: u32,
    pub vertex_shader: u32,
    pub fragment_shader: u32,
    pub float: u32,
    pub unsigned_short: u32,
    pub triangles: u32,
    pub depth_test: u32,
    pub lequal: u32,
    pub color_buffer_bit: u32,
    pub depth_buffer_bit: u32,
    /// Only needed when shader status is checked.
    pub compile_status: Option<u32>,
    pub link_status: Option<u32>,
}

impl Capabilities {
    /// Queries every token from `ctx`.
    ///
    /// A name the context does not know is reported as
    /// [`RenderError::MissingCapability`] instead of leaking a sentinel into
    /// later calls.
    pub fn query<C: GraphicsContext>(ctx: &C) -> Result<Self> {
        let get = |name: &'static str| {
            ctx.constant(name).ok_or(RenderError::MissingCapability(name))
        };

        let caps = Self {
            array_buffer: get("ARRAY_BUFFER")?,
            element_array_buffer: get("ELEMENT_ARRAY_BUFFER")?,
            static_draw: get("STATIC_DRAW")?,
            vertex_shader: get("VERTEX_SHADER")?,
            fragment_shader: get("FRAGMENT_SHADER")?,
            float: get("FLOAT")?,
            unsigned_short: get("UNSIGNED_SHORT")?,
            triangles: get("TRIANGLES")?,
            depth_test: get("DEPTH_TEST")?,
            lequal: get("LEQUAL")?,
            color_buffer_bit: get("COLOR_BUFFER_BIT")?,
            depth_buffer_bit: get("DEPTH_BUFFER_BIT")?,
            compile_status: ctx.constant("COMPILE_STATUS"),
            link_status: ctx.constant("LINK_STATUS"),
        };
        log::debug!("resolved graphics capabilities: {caps:?}");
        Ok(caps)
    }

    /// The WebGL 1 values answered by the recording context.
    #[cfg(any(test, feature = "testing"))]
    pub const fn webgl1() -> Self {
        Self {
            array_buffer: 0x8892,
            element_array_buffer: 0x8893,
            static_draw: 0x88E4,
            vertex_shader: 0x8B31,
            fragment_shader: 0x8B30,
            float: 0x1406,
            unsigned_short: 0x1403,
            triangles: 0x0004,
            depth_test: 0x0B71,
            lequal: 0x0203,
            color_buffer_bit: 0x4000,
            depth_buffer_bit: 0x0100,
            compile_status: Some(0x8B81),
            link_status: Some(0x8B82),
        }
    }
}
