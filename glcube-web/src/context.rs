//! `GraphicsContext` backed by the browser's WebGL 1 context

use glcube_core::GraphicsContext;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGlBuffer, WebGlProgram, WebGlRenderingContext, WebGlShader,
    WebGlUniformLocation,
};

/// Context names tried in order; older browsers only answer to the second.
const CONTEXT_NAMES: [&str; 2] = ["webgl", "experimental-webgl"];

#[derive(Clone)]
pub struct WebGlContext {
    gl: WebGlRenderingContext,
}

impl WebGlContext {
    pub fn new(gl: WebGlRenderingContext) -> Self {
        Self { gl }
    }
}

/// Returns the first WebGL context the canvas hands out, or `None` when the
/// browser supports none of them.
pub fn acquire_context(canvas: &HtmlCanvasElement) -> Result<Option<WebGlContext>, JsValue> {
    for name in CONTEXT_NAMES {
        if let Some(object) = canvas.get_context(name)? {
            let gl: WebGlRenderingContext = object.dyn_into()?;
            log::debug!("acquired `{name}` context");
            return Ok(Some(WebGlContext::new(gl)));
        }
    }
    Ok(None)
}

impl GraphicsContext for WebGlContext {
    type Buffer = WebGlBuffer;
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type UniformLocation = WebGlUniformLocation;

    fn constant(&self, name: &str) -> Option<u32> {
        js_sys::Reflect::get(self.gl.as_ref(), &JsValue::from_str(name))
            .ok()?
            .as_f64()
            .map(|value| value as u32)
    }

    fn create_buffer(&self) -> Option<WebGlBuffer> {
        self.gl.create_buffer()
    }

    fn bind_buffer(&self, target: u32, buffer: Option<&WebGlBuffer>) {
        self.gl.bind_buffer(target, buffer);
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        self.gl.buffer_data_with_u8_array(target, data, usage);
    }

    fn create_shader(&self, kind: u32) -> Option<WebGlShader> {
        self.gl.create_shader(kind)
    }

    fn shader_source(&self, shader: &WebGlShader, source: &str) {
        self.gl.shader_source(shader, source);
    }

    fn compile_shader(&self, shader: &WebGlShader) {
        self.gl.compile_shader(shader);
    }

    fn shader_parameter(&self, shader: &WebGlShader, pname: u32) -> bool {
        self.gl.get_shader_parameter(shader, pname).as_bool().unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &WebGlShader) -> Option<String> {
        self.gl.get_shader_info_log(shader)
    }

    fn create_program(&self) -> Option<WebGlProgram> {
        self.gl.create_program()
    }

    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        self.gl.attach_shader(program, shader);
    }

    fn link_program(&self, program: &WebGlProgram) {
        self.gl.link_program(program);
    }

    fn program_parameter(&self, program: &WebGlProgram, pname: u32) -> bool {
        self.gl.get_program_parameter(program, pname).as_bool().unwrap_or(false)
    }

    fn program_info_log(&self, program: &WebGlProgram) -> Option<String> {
        self.gl.get_program_info_log(program)
    }

    fn use_program(&self, program: Option<&WebGlProgram>) {
        self.gl.use_program(program);
    }

    fn uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    fn attrib_location(&self, program: &WebGlProgram, name: &str) -> i32 {
        self.gl.get_attrib_location(program, name)
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        kind: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.gl
            .vertex_attrib_pointer_with_i32(index, size, kind, normalized, stride, offset);
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.gl.enable_vertex_attrib_array(index);
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.gl.clear_color(r, g, b, a);
    }

    fn clear_depth(&self, depth: f32) {
        self.gl.clear_depth(depth);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.gl.viewport(x, y, width, height);
    }

    fn depth_func(&self, func: u32) {
        self.gl.depth_func(func);
    }

    fn enable(&self, capability: u32) {
        self.gl.enable(capability);
    }

    fn clear(&self, mask: u32) {
        self.gl.clear(mask);
    }

    fn uniform_matrix4(&self, location: Option<&WebGlUniformLocation>, data: &[f32; 16]) {
        self.gl.uniform_matrix4fv_with_f32_array(location, false, data);
    }

    fn draw_elements(&self, mode: u32, count: i32, kind: u32, offset: i32) {
        self.gl.draw_elements_with_i32(mode, count, kind, offset);
    }
}
