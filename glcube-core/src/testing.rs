//! In-memory [`GraphicsContext`] that records every state-changing call.
//!
//! Lookups (`constant`, `uniform_location`, `attrib_location`, status
//! queries) are answered from configurable tables and are not recorded.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use crate::context::{GraphicsContext, Notifier};

const WEBGL1_CONSTANTS: &[(&str, u32)] = &[
    ("ARRAY_BUFFER", 0x8892),
    ("ELEMENT_ARRAY_BUFFER", 0x8893),
    ("STATIC_DRAW", 0x88E4),
    ("VERTEX_SHADER", 0x8B31),
    ("FRAGMENT_SHADER", 0x8B30),
    ("FLOAT", 0x1406),
    ("UNSIGNED_SHORT", 0x1403),
    ("TRIANGLES", 0x0004),
    ("DEPTH_TEST", 0x0B71),
    ("LEQUAL", 0x0203),
    ("COLOR_BUFFER_BIT", 0x4000),
    ("DEPTH_BUFFER_BIT", 0x0100),
    ("COMPILE_STATUS", 0x8B81),
    ("LINK_STATUS", 0x8B82),
];

const COMPILE_STATUS: u32 = 0x8B81;
const LINK_STATUS: u32 = 0x8B82;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderId {
    pub id: u32,
    pub kind: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformId(pub String);

/// A recorded state-changing call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateBuffer(BufferId),
    BindBuffer { target: u32, buffer: Option<BufferId> },
    BufferData { target: u32, bytes: Vec<u8>, usage: u32 },
    CreateShader(ShaderId),
    ShaderSource { shader: u32, source: String },
    CompileShader(u32),
    CreateProgram(ProgramId),
    AttachShader { program: ProgramId, shader: u32 },
    LinkProgram(ProgramId),
    UseProgram(Option<ProgramId>),
    VertexAttribPointer {
        index: u32,
        size: i32,
        kind: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    EnableVertexAttribArray(u32),
    ClearColor([f32; 4]),
    ClearDepth(f32),
    Viewport([i32; 4]),
    DepthFunc(u32),
    Enable(u32),
    Clear(u32),
    UniformMatrix4 { location: Option<String>, data: [f32; 16] },
    DrawElements { mode: u32, count: i32, kind: u32, offset: i32 },
}

#[derive(Debug, Default)]
pub struct RecordingContext {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    missing_constants: HashSet<&'static str>,
    missing_names: HashSet<&'static str>,
    failing_shader_kind: Option<u32>,
    failing_link: bool,
    lost: bool,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_constant(mut self, name: &'static str) -> Self {
        self.missing_constants.insert(name);
        self
    }

    /// Makes the program report no uniform or attribute named `name`.
    pub fn without_binding(mut self, name: &'static str) -> Self {
        self.missing_names.insert(name);
        self
    }

    /// Shaders of `kind` report a failed compile.
    pub fn failing_compile(mut self, kind: u32) -> Self {
        self.failing_shader_kind = Some(kind);
        self
    }

    pub fn failing_link(mut self) -> Self {
        self.failing_link = true;
        self
    }

    /// Every `create_*` call returns no handle.
    pub fn lost(mut self) -> Self {
        self.lost = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| predicate(call)).count()
    }

    /// Byte payloads of every `buffer_data` call, in order.
    pub fn uploads(&self) -> Vec<(u32, Vec<u8>)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::BufferData { target, bytes, .. } => Some((*target, bytes.clone())),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl GraphicsContext for RecordingContext {
    type Buffer = BufferId;
    type Shader = ShaderId;
    type Program = ProgramId;
    type UniformLocation = UniformId;

    fn constant(&self, name: &str) -> Option<u32> {
        if self.missing_constants.contains(name) {
            return None;
        }
        WEBGL1_CONSTANTS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, value)| *value)
    }

    fn create_buffer(&self) -> Option<BufferId> {
        if self.lost {
            return None;
        }
        let buffer = BufferId(self.next());
        self.record(Call::CreateBuffer(buffer));
        Some(buffer)
    }

    fn bind_buffer(&self, target: u32, buffer: Option<&BufferId>) {
        self.record(Call::BindBuffer {
            target,
            buffer: buffer.copied(),
        });
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        self.record(Call::BufferData {
            target,
            bytes: data.to_vec(),
            usage,
        });
    }

    fn create_shader(&self, kind: u32) -> Option<ShaderId> {
        if self.lost {
            return None;
        }
        let shader = ShaderId { id: self.next(), kind };
        self.record(Call::CreateShader(shader));
        Some(shader)
    }

    fn shader_source(&self, shader: &ShaderId, source: &str) {
        self.record(Call::ShaderSource {
            shader: shader.id,
            source: source.to_string(),
        });
    }

    fn compile_shader(&self, shader: &ShaderId) {
        self.record(Call::CompileShader(shader.id));
    }

    fn shader_parameter(&self, shader: &ShaderId, pname: u32) -> bool {
        pname == COMPILE_STATUS && self.failing_shader_kind != Some(shader.kind)
    }

    fn shader_info_log(&self, shader: &ShaderId) -> Option<String> {
        (self.failing_shader_kind == Some(shader.kind))
            .then(|| "ERROR: 0:1: syntax error".to_string())
    }

    fn create_program(&self) -> Option<ProgramId> {
        if self.lost {
            return None;
        }
        let program = ProgramId(self.next());
        self.record(Call::CreateProgram(program));
        Some(program)
    }

    fn attach_shader(&self, program: &ProgramId, shader: &ShaderId) {
        self.record(Call::AttachShader {
            program: *program,
            shader: shader.id,
        });
    }

    fn link_program(&self, program: &ProgramId) {
        self.record(Call::LinkProgram(*program));
    }

    fn program_parameter(&self, _program: &ProgramId, pname: u32) -> bool {
        pname == LINK_STATUS && !self.failing_link
    }

    fn program_info_log(&self, _program: &ProgramId) -> Option<String> {
        self.failing_link.then(|| "varyings do not match".to_string())
    }

    fn use_program(&self, program: Option<&ProgramId>) {
        self.record(Call::UseProgram(program.copied()));
    }

    fn uniform_location(&self, _program: &ProgramId, name: &str) -> Option<UniformId> {
        (!self.missing_names.contains(name)).then(|| UniformId(name.to_string()))
    }

    fn attrib_location(&self, _program: &ProgramId, name: &str) -> i32 {
        if self.missing_names.contains(name) {
            return -1;
        }
        match name {
            "position" => 0,
            "color" => 1,
            _ => -1,
        }
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
        self.record(Call::VertexAttribPointer {
            index,
            size,
            kind,
            normalized,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear_depth(&self, depth: f32) {
        self.record(Call::ClearDepth(depth));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport([x, y, width, height]));
    }

    fn depth_func(&self, func: u32) {
        self.record(Call::DepthFunc(func));
    }

    fn enable(&self, capability: u32) {
        self.record(Call::Enable(capability));
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn uniform_matrix4(&self, location: Option<&UniformId>, data: &[f32; 16]) {
        self.record(Call::UniformMatrix4 {
            location: location.map(|l| l.0.clone()),
            data: *data,
        });
    }

    fn draw_elements(&self, mode: u32, count: i32, kind: u32, offset: i32) {
        self.record(Call::DrawElements {
            mode,
            count,
            kind,
            offset,
        });
    }
}

/// Collects notifications instead of showing them
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
