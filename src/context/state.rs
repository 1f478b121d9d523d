use crate::gl;

/// Represents the framebuffer bindings of an OpenGL context.
///
/// `0` is the default framebuffer. The values always mirror what was last sent to the
/// device, so commands whose target is already bound can be skipped.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct GlState {
    /// The framebuffer bound to `GL_DRAW_FRAMEBUFFER`.
    pub draw_framebuffer: gl::types::GLuint,

    /// The framebuffer bound to `GL_READ_FRAMEBUFFER`.
    pub read_framebuffer: gl::types::GLuint,
}
