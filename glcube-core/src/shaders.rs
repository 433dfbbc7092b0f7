//! GLSL ES 1.0 sources for the cube program

pub const POSITION_ATTRIBUTE: &str = "position";
pub const COLOR_ATTRIBUTE: &str = "color";
pub const PROJECTION_UNIFORM: &str = "Pmatrix";
pub const VIEW_UNIFORM: &str = "Vmatrix";
pub const MODEL_UNIFORM: &str = "Mmatrix";

/// Transforms positions to clip space and forwards the vertex color.
pub const VERTEX_SHADER_SOURCE: &str = r#"
attribute vec3 position;
attribute vec3 color;
uniform mat4 Pmatrix;
uniform mat4 Vmatrix;
uniform mat4 Mmatrix;
varying vec3 vColor;

void main(void) {
    gl_Position = Pmatrix * Vmatrix * Mmatrix * vec4(position, 1.0);
    vColor = color;
}
"#;

/// Writes the interpolated color at full opacity.
pub const FRAGMENT_SHADER_SOURCE: &str = r#"
precision mediump float;
varying vec3 vColor;

void main(void) {
    gl_FragColor = vec4(vColor, 1.0);
}
"#;
