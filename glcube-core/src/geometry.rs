//! Static cube geometry: positions, per-vertex colors and triangle indices

/// Floats per position and per color.
pub const COMPONENTS: usize = 3;
pub const VERTEX_COUNT: usize = 24;
pub const INDEX_COUNT: usize = 36;

/// Four vertices per face, six faces, spanning [-1, 1] on every axis.
#[rustfmt::skip]
pub const CUBE_POSITIONS: [f32; VERTEX_COUNT * COMPONENTS] = [
    // Back
    -1.0, -1.0, -1.0,   1.0, -1.0, -1.0,   1.0,  1.0, -1.0,  -1.0,  1.0, -1.0,
    // Front
    -1.0, -1.0,  1.0,   1.0, -1.0,  1.0,   1.0,  1.0,  1.0,  -1.0,  1.0,  1.0,
    // Left
    -1.0, -1.0, -1.0,  -1.0,  1.0, -1.0,  -1.0,  1.0,  1.0,  -1.0, -1.0,  1.0,
    // Right
     1.0, -1.0, -1.0,   1.0,  1.0, -1.0,   1.0,  1.0,  1.0,   1.0, -1.0,  1.0,
    // Bottom
    -1.0, -1.0, -1.0,  -1.0, -1.0,  1.0,   1.0, -1.0,  1.0,   1.0, -1.0, -1.0,
    // Top
    -1.0,  1.0, -1.0,  -1.0,  1.0,  1.0,   1.0,  1.0,  1.0,   1.0,  1.0, -1.0,
];

/// One flat color per face. The first two faces exceed [0, 1] and are kept
/// as-is; the rasterizer saturates them.
#[rustfmt::skip]
pub const CUBE_COLORS: [f32; VERTEX_COUNT * COMPONENTS] = [
    5.0, 3.0, 7.0,  5.0, 3.0, 7.0,  5.0, 3.0, 7.0,  5.0, 3.0, 7.0,
    1.0, 1.0, 3.0,  1.0, 1.0, 3.0,  1.0, 1.0, 3.0,  1.0, 1.0, 3.0,
    0.0, 0.0, 1.0,  0.0, 0.0, 1.0,  0.0, 0.0, 1.0,  0.0, 0.0, 1.0,
    1.0, 0.0, 0.0,  1.0, 0.0, 0.0,  1.0, 0.0, 0.0,  1.0, 0.0, 0.0,
    1.0, 1.0, 0.0,  1.0, 1.0, 0.0,  1.0, 1.0, 0.0,  1.0, 1.0, 0.0,
    0.0, 1.0, 0.0,  0.0, 1.0, 0.0,  0.0, 1.0, 0.0,  0.0, 1.0, 0.0,
];

/// Two triangles per face.
#[rustfmt::skip]
pub const CUBE_INDICES: [u16; INDEX_COUNT] = [
    0, 1, 2,  0, 2, 3,
    4, 5, 6,  4, 6, 7,
    8, 9, 10,  8, 10, 11,
    12, 13, 14,  12, 14, 15,
    16, 17, 18,  16, 18, 19,
    20, 21, 22,  20, 22, 23,
];

/// Native-endian bytes of a float table, as handed to `bufferData`.
pub fn float_bytes(data: &[f32]) -> &[u8] {
    bytemuck::cast_slice(data)
}

/// Native-endian bytes of an index table.
pub fn index_bytes(data: &[u16]) -> &[u8] {
    bytemuck::cast_slice(data)
}

/// The three tables uploaded by the pipeline
#[derive(Debug, Clone, Copy)]
pub struct CubeGeometry<'a> {
    pub positions: &'a [f32],
    pub colors: &'a [f32],
    pub indices: &'a [u16],
}

impl CubeGeometry<'static> {
    pub fn standard() -> Self {
        Self {
            positions: &CUBE_POSITIONS,
            colors: &CUBE_COLORS,
            indices: &CUBE_INDICES,
        }
    }
}

impl<'a> CubeGeometry<'a> {
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Default for CubeGeometry<'static> {
    fn default() -> Self {
        Self::standard()
    }
}
