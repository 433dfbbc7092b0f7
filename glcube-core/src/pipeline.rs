//! One-time GPU setup: buffers, shader program, attributes and static state

use crate::capabilities::Capabilities;
use crate::config::RenderConfig;
use crate::context::GraphicsContext;
use crate::error::{RenderError, Result, ShaderStage};
use crate::geometry::{float_bytes, index_bytes, CubeGeometry, COMPONENTS};
use crate::projection::{Camera, Surface};
use crate::shaders::{
    COLOR_ATTRIBUTE, FRAGMENT_SHADER_SOURCE, MODEL_UNIFORM, POSITION_ATTRIBUTE, PROJECTION_UNIFORM,
    VERTEX_SHADER_SOURCE, VIEW_UNIFORM,
};
use crate::transform::to_float_array;

/// Mid-gray, slightly transparent.
pub const CLEAR_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 0.9];
pub const CLEAR_DEPTH: f32 = 1.0;

/// GPU objects created at startup, alive for the rest of the process
pub struct Pipeline<C: GraphicsContext> {
    pub caps: Capabilities,
    pub vertex_buffer: C::Buffer,
    pub color_buffer: C::Buffer,
    pub index_buffer: C::Buffer,
    pub program: C::Program,
    pub projection_uniform: Option<C::UniformLocation>,
    pub view_uniform: Option<C::UniformLocation>,
    pub model_uniform: Option<C::UniformLocation>,
    pub index_count: i32,
}

impl<C: GraphicsContext> Pipeline<C> {
    /// Builds the pipeline against `ctx`.
    ///
    /// Buffer bindings are global context state, so the steps run in a fixed
    /// order: upload, compile, link, resolve, point attributes at their
    /// buffers, activate, set static state, upload the camera matrices.
    pub fn init(
        ctx: &C,
        caps: Capabilities,
        geometry: CubeGeometry<'_>,
        surface: Surface,
        config: &RenderConfig,
    ) -> Result<Self> {
        let vertex_buffer = upload(ctx, caps.array_buffer, float_bytes(geometry.positions), &caps)?;
        let color_buffer = upload(ctx, caps.array_buffer, float_bytes(geometry.colors), &caps)?;
        let index_buffer = upload(
            ctx,
            caps.element_array_buffer,
            index_bytes(geometry.indices),
            &caps,
        )?;
        log::debug!("uploaded cube geometry ({} indices)", geometry.index_count());

        let vertex_shader = compile(ctx, &caps, ShaderStage::Vertex, VERTEX_SHADER_SOURCE, config)?;
        let fragment_shader = compile(
            ctx,
            &caps,
            ShaderStage::Fragment,
            FRAGMENT_SHADER_SOURCE,
            config,
        )?;

        let program = ctx.create_program().ok_or(RenderError::CreateObject("program"))?;
        ctx.attach_shader(&program, &vertex_shader);
        ctx.attach_shader(&program, &fragment_shader);
        ctx.link_program(&program);
        if config.strict_shaders {
            check_link(ctx, &caps, &program)?;
        }

        let projection_uniform = ctx.uniform_location(&program, PROJECTION_UNIFORM);
        let view_uniform = ctx.uniform_location(&program, VIEW_UNIFORM);
        let model_uniform = ctx.uniform_location(&program, MODEL_UNIFORM);
        for (name, found) in [
            (PROJECTION_UNIFORM, projection_uniform.is_some()),
            (VIEW_UNIFORM, view_uniform.is_some()),
            (MODEL_UNIFORM, model_uniform.is_some()),
        ] {
            if !found {
                log::warn!("uniform `{name}` not found; uploads to it are dropped");
            }
        }

        ctx.bind_buffer(caps.array_buffer, Some(&vertex_buffer));
        bind_attribute(ctx, &caps, &program, POSITION_ATTRIBUTE, config)?;
        ctx.bind_buffer(caps.array_buffer, Some(&color_buffer));
        bind_attribute(ctx, &caps, &program, COLOR_ATTRIBUTE, config)?;

        ctx.use_program(Some(&program));

        let [r, g, b, a] = CLEAR_COLOR;
        ctx.clear_color(r, g, b, a);
        ctx.clear_depth(CLEAR_DEPTH);
        ctx.viewport(0, 0, surface.width as i32, surface.height as i32);
        ctx.depth_func(caps.lequal);

        let camera = Camera::for_surface(surface);
        ctx.uniform_matrix4(
            projection_uniform.as_ref(),
            &to_float_array(&camera.projection_matrix()),
        );
        ctx.uniform_matrix4(view_uniform.as_ref(), &to_float_array(&camera.view_matrix()));

        // The draw call reads whatever element buffer is bound.
        ctx.bind_buffer(caps.element_array_buffer, Some(&index_buffer));

        log::debug!("pipeline ready for {}x{} surface", surface.width, surface.height);

        Ok(Self {
            caps,
            vertex_buffer,
            color_buffer,
            index_buffer,
            program,
            projection_uniform,
            view_uniform,
            model_uniform,
            index_count: geometry.index_count() as i32,
        })
    }
}

/// Creates a buffer on `target` and fills it with `bytes` as static data.
fn upload<C: GraphicsContext>(
    ctx: &C,
    target: u32,
    bytes: &[u8],
    caps: &Capabilities,
) -> Result<C::Buffer> {
    let buffer = ctx.create_buffer().ok_or(RenderError::CreateObject("buffer"))?;
    ctx.bind_buffer(target, Some(&buffer));
    ctx.buffer_data(target, bytes, caps.static_draw);
    Ok(buffer)
}

fn compile<C: GraphicsContext>(
    ctx: &C,
    caps: &Capabilities,
    stage: ShaderStage,
    source: &str,
    config: &RenderConfig,
) -> Result<C::Shader> {
    let kind = match stage {
        ShaderStage::Vertex => caps.vertex_shader,
        ShaderStage::Fragment => caps.fragment_shader,
    };
    let shader = ctx.create_shader(kind).ok_or(RenderError::CreateObject("shader"))?;
    ctx.shader_source(&shader, source);
    ctx.compile_shader(&shader);

    if config.strict_shaders {
        let compiled = caps
            .compile_status
            .map(|status| ctx.shader_parameter(&shader, status))
            .unwrap_or(true);
        if !compiled {
            return Err(RenderError::ShaderCompile {
                stage,
                log: ctx.shader_info_log(&shader).unwrap_or_default(),
            });
        }
    }
    Ok(shader)
}

fn check_link<C: GraphicsContext>(
    ctx: &C,
    caps: &Capabilities,
    program: &C::Program,
) -> Result<()> {
    let Some(status) = caps.link_status else {
        log::warn!("context has no LINK_STATUS; skipping link check");
        return Ok(());
    };
    if ctx.program_parameter(program, status) {
        Ok(())
    } else {
        Err(RenderError::ProgramLink {
            log: ctx.program_info_log(program).unwrap_or_default(),
        })
    }
}

/// Points `name` at the currently bound array buffer: 3 floats, tightly
/// packed, not normalized.
fn bind_attribute<C: GraphicsContext>(
    ctx: &C,
    caps: &Capabilities,
    program: &C::Program,
    name: &'static str,
    config: &RenderConfig,
) -> Result<()> {
    let location = ctx.attrib_location(program, name);
    if location < 0 {
        if config.strict_shaders {
            return Err(RenderError::MissingAttribute(name));
        }
        log::warn!("attribute `{name}` not found; leaving it unbound");
        return Ok(());
    }
    let index = location as u32;
    ctx.vertex_attrib_pointer(index, COMPONENTS as i32, caps.float, false, 0, 0);
    ctx.enable_vertex_attrib_array(index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{CUBE_COLORS, CUBE_INDICES, CUBE_POSITIONS};
    use crate::testing::{Call, RecordingContext};

    const ARRAY: u32 = 0x8892;
    const ELEMENT: u32 = 0x8893;
    const STATIC_DRAW: u32 = 0x88E4;

    /// Reads recorded bytes back without assuming the `Vec<u8>` is aligned.
    fn decode<T: bytemuck::Pod>(bytes: &[u8]) -> Vec<T> {
        bytes
            .chunks_exact(std::mem::size_of::<T>())
            .map(bytemuck::pod_read_unaligned)
            .collect()
    }

    fn surface() -> Surface {
        Surface::new(800, 600).unwrap()
    }

    fn init(ctx: &RecordingContext, config: &RenderConfig) -> Result<Pipeline<RecordingContext>> {
        let caps = Capabilities::query(ctx)?;
        Pipeline::init(ctx, caps, CubeGeometry::standard(), surface(), config)
    }

    #[test]
    fn test_buffers_are_uploaded_in_order() {
        let ctx = RecordingContext::new();
        let pipeline = init(&ctx, &RenderConfig::default()).unwrap();
        let calls = ctx.calls();

        assert_eq!(calls[0], Call::CreateBuffer(pipeline.vertex_buffer));
        assert_eq!(
            calls[1],
            Call::BindBuffer { target: ARRAY, buffer: Some(pipeline.vertex_buffer) }
        );
        assert!(matches!(calls[2], Call::BufferData { target: ARRAY, usage: STATIC_DRAW, .. }));
        assert_eq!(calls[3], Call::CreateBuffer(pipeline.color_buffer));
        assert_eq!(calls[6], Call::CreateBuffer(pipeline.index_buffer));
        assert!(matches!(calls[8], Call::BufferData { target: ELEMENT, usage: STATIC_DRAW, .. }));
    }

    #[test]
    fn test_uploaded_bytes_round_trip() {
        let ctx = RecordingContext::new();
        init(&ctx, &RenderConfig::default()).unwrap();
        let uploads = ctx.uploads();
        assert_eq!(uploads.len(), 3);

        let positions: Vec<f32> = decode(&uploads[0].1);
        let colors: Vec<f32> = decode(&uploads[1].1);
        let indices: Vec<u16> = decode(&uploads[2].1);
        assert_eq!(positions, CUBE_POSITIONS);
        assert_eq!(colors, CUBE_COLORS);
        assert_eq!(indices, CUBE_INDICES);
    }

    #[test]
    fn test_repeated_upload_is_identical() {
        let first = RecordingContext::new();
        let second = RecordingContext::new();
        init(&first, &RenderConfig::default()).unwrap();
        init(&second, &RenderConfig::default()).unwrap();
        assert_eq!(first.uploads(), second.uploads());
    }

    #[test]
    fn test_attributes_follow_their_buffers() {
        let ctx = RecordingContext::new();
        let pipeline = init(&ctx, &RenderConfig::default()).unwrap();
        let calls = ctx.calls();

        let pointer = |index| Call::VertexAttribPointer {
            index,
            size: 3,
            kind: 0x1406,
            normalized: false,
            stride: 0,
            offset: 0,
        };
        let position_at = calls.iter().position(|c| *c == pointer(0)).unwrap();
        let color_at = calls.iter().position(|c| *c == pointer(1)).unwrap();
        assert_eq!(
            calls[position_at - 1],
            Call::BindBuffer { target: ARRAY, buffer: Some(pipeline.vertex_buffer) }
        );
        assert_eq!(calls[position_at + 1], Call::EnableVertexAttribArray(0));
        assert_eq!(
            calls[color_at - 1],
            Call::BindBuffer { target: ARRAY, buffer: Some(pipeline.color_buffer) }
        );
        assert_eq!(calls[color_at + 1], Call::EnableVertexAttribArray(1));
    }

    #[test]
    fn test_static_state_and_camera_upload() {
        let ctx = RecordingContext::new();
        let pipeline = init(&ctx, &RenderConfig::default()).unwrap();
        let calls = ctx.calls();

        assert!(calls.contains(&Call::UseProgram(Some(pipeline.program))));
        assert!(calls.contains(&Call::ClearColor([0.5, 0.5, 0.5, 0.9])));
        assert!(calls.contains(&Call::ClearDepth(1.0)));
        assert!(calls.contains(&Call::Viewport([0, 0, 800, 600])));
        assert!(calls.contains(&Call::DepthFunc(0x0203)));

        let camera = Camera::new(800, 600);
        assert!(calls.contains(&Call::UniformMatrix4 {
            location: Some("Pmatrix".to_string()),
            data: to_float_array(&camera.projection_matrix()),
        }));
        assert!(calls.contains(&Call::UniformMatrix4 {
            location: Some("Vmatrix".to_string()),
            data: to_float_array(&camera.view_matrix()),
        }));
        assert_eq!(ctx.count(|c| matches!(c, Call::UniformMatrix4 { .. })), 2);
        assert_eq!(
            calls.last(),
            Some(&Call::BindBuffer { target: ELEMENT, buffer: Some(pipeline.index_buffer) })
        );
        assert_eq!(pipeline.index_count, 36);
    }

    #[test]
    fn test_baseline_ignores_shader_failures() {
        let ctx = RecordingContext::new().failing_compile(0x8B30).failing_link();
        assert!(init(&ctx, &RenderConfig::baseline()).is_ok());
    }

    #[test]
    fn test_strict_reports_compile_failure() {
        let ctx = RecordingContext::new().failing_compile(0x8B30);
        let err = init(&ctx, &RenderConfig::default().with_strict_shaders(true)).err();
        assert_eq!(
            err,
            Some(RenderError::ShaderCompile {
                stage: ShaderStage::Fragment,
                log: "ERROR: 0:1: syntax error".to_string(),
            })
        );
    }

    #[test]
    fn test_strict_reports_link_failure() {
        let ctx = RecordingContext::new().failing_link();
        let err = init(&ctx, &RenderConfig::default().with_strict_shaders(true)).err();
        assert_eq!(
            err,
            Some(RenderError::ProgramLink { log: "varyings do not match".to_string() })
        );
    }

    #[test]
    fn test_missing_attribute_is_skipped_unless_strict() {
        let ctx = RecordingContext::new().without_binding("color");
        init(&ctx, &RenderConfig::default()).unwrap();
        assert_eq!(ctx.count(|c| matches!(c, Call::EnableVertexAttribArray(_))), 1);

        let ctx = RecordingContext::new().without_binding("color");
        let err = init(&ctx, &RenderConfig::default().with_strict_shaders(true)).err();
        assert_eq!(err, Some(RenderError::MissingAttribute("color")));
    }

    #[test]
    fn test_missing_uniform_passes_through_as_none() {
        let ctx = RecordingContext::new().without_binding("Vmatrix");
        let pipeline = init(&ctx, &RenderConfig::default()).unwrap();
        assert!(pipeline.view_uniform.is_none());
        let dropped = ctx.count(|c| matches!(c, Call::UniformMatrix4 { location: None, .. }));
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_lost_context_fails_on_first_buffer() {
        let ctx = RecordingContext::new().lost();
        let err = init(&ctx, &RenderConfig::default()).err();
        assert_eq!(err, Some(RenderError::CreateObject("buffer")));
        assert!(ctx.calls().is_empty());
    }
}
