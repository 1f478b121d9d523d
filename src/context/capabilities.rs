use crate::backend::Device;
use crate::context::ExtensionsList;
use crate::gl;
use crate::version::{Api, Version};

/// Represents the framebuffer limits of the device.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Value of `GL_MAX_COLOR_ATTACHMENTS`, as reported by the driver.
    ///
    /// This is the raw value. The catalog of attachment points built by the context is
    /// clamped to a sane range.
    pub max_color_attachments: gl::types::GLint,

    /// Maximum number of elements that can be passed with `glDrawBuffers`.
    pub max_draw_buffers: gl::types::GLint,
}

/// Loads the capabilities.
pub fn get_capabilities(device: &dyn Device, version: &Version, extensions: &ExtensionsList)
                        -> Capabilities
{
    Capabilities {
        max_color_attachments: {
            if version >= &Version(Api::Gl, 3, 0) || version >= &Version(Api::GlEs, 3, 0) ||
               extensions.gl_arb_framebuffer_object || extensions.gl_ext_framebuffer_object ||
               extensions.gl_ext_draw_buffers
            {
                device.get_integer(gl::MAX_COLOR_ATTACHMENTS)
            } else {
                1
            }
        },

        max_draw_buffers: {
            if version >= &Version(Api::Gl, 2, 0) || version >= &Version(Api::GlEs, 3, 0) ||
               extensions.gl_ext_draw_buffers
            {
                device.get_integer(gl::MAX_DRAW_BUFFERS)
            } else {
                1
            }
        },
    }
}
