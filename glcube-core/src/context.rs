//! The graphics API surface the pipeline is written against
//!
//! Every call is synchronous and mutates state shared by the whole context
//! (the currently bound buffers, the active program). Callers are responsible
//! for issuing binds in the order the pipeline needs them.

/// An immediate-mode graphics context in the style of WebGL 1.
///
/// Enum-like values are plain `u32` tokens, resolved once through
/// [`GraphicsContext::constant`] into a [`Capabilities`](crate::Capabilities)
/// table.
pub trait GraphicsContext {
    type Buffer: Clone;
    type Shader;
    type Program;
    type UniformLocation;

    /// Looks up a symbolic constant such as `"ARRAY_BUFFER"` by name.
    fn constant(&self, name: &str) -> Option<u32>;

    fn create_buffer(&self) -> Option<Self::Buffer>;
    fn bind_buffer(&self, target: u32, buffer: Option<&Self::Buffer>);
    fn buffer_data(&self, target: u32, data: &[u8], usage: u32);

    fn create_shader(&self, kind: u32) -> Option<Self::Shader>;
    fn shader_source(&self, shader: &Self::Shader, source: &str);
    fn compile_shader(&self, shader: &Self::Shader);
    /// Boolean shader parameter, e.g. `COMPILE_STATUS`.
    fn shader_parameter(&self, shader: &Self::Shader, pname: u32) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;

    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn link_program(&self, program: &Self::Program);
    /// Boolean program parameter, e.g. `LINK_STATUS`.
    fn program_parameter(&self, program: &Self::Program, pname: u32) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> Option<String>;
    fn use_program(&self, program: Option<&Self::Program>);

    fn uniform_location(
        &self,
        program: &Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;
    /// Returns `-1` when the program has no active attribute of that name.
    fn attrib_location(&self, program: &Self::Program, name: &str) -> i32;
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        kind: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );
    fn enable_vertex_attrib_array(&self, index: u32);

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_depth(&self, depth: f32);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn depth_func(&self, func: u32);
    fn enable(&self, capability: u32);
    fn clear(&self, mask: u32);

    /// Uploads a column-major 4x4 matrix; `location` may be `None` and is
    /// then ignored by the context.
    fn uniform_matrix4(&self, location: Option<&Self::UniformLocation>, data: &[f32; 16]);
    fn draw_elements(&self, mode: u32, count: i32, kind: u32, offset: i32);
}

/// Blocking user-facing notification, used for fatal startup failures.
pub trait Notifier {
    fn notify(&self, message: &str);
}
