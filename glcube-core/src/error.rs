//! Errors raised while bringing up or driving the render pipeline

use thiserror::Error;

/// Shader stage, used when reporting compile failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    /// The host could not hand out a graphics context.
    #[error("graphics context unavailable: browser might not support webgl")]
    Unsupported,

    #[error("graphics context does not expose constant `{0}`")]
    MissingCapability(&'static str),

    /// The context returned no handle, typically after a context loss.
    #[error("failed to create {0} object")]
    CreateObject(&'static str),

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {log}")]
    ProgramLink { log: String },

    #[error("shader program has no active attribute `{0}`")]
    MissingAttribute(&'static str),

    /// A pipeline already exists; only one is built per page.
    #[error("the cube pipeline has already been launched")]
    AlreadyLaunched,

    #[error("invalid surface size {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure() {
        let err = RenderError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "syntax error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "fragment shader failed to compile: syntax error"
        );
        assert_eq!(
            RenderError::MissingCapability("LEQUAL").to_string(),
            "graphics context does not expose constant `LEQUAL`"
        );
    }
}
