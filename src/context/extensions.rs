use crate::backend::Device;
use crate::gl;
use crate::version::{Api, Version};

/// Contains data about the list of extensions.
///
/// Only the extensions that change framebuffer behavior or format renderability are tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtensionsList {
    /// GL_ARB_depth_texture
    pub gl_arb_depth_texture: bool,
    /// GL_ARB_ES2_compatibility
    pub gl_arb_es2_compatibility: bool,
    /// GL_ARB_framebuffer_object
    pub gl_arb_framebuffer_object: bool,
    /// GL_ARB_texture_float
    pub gl_arb_texture_float: bool,
    /// GL_ARB_texture_rg
    pub gl_arb_texture_rg: bool,
    /// GL_ARB_texture_stencil8
    pub gl_arb_texture_stencil8: bool,
    /// GL_ARM_rgba8
    pub gl_arm_rgba8: bool,
    /// GL_EXT_color_buffer_float
    pub gl_ext_color_buffer_float: bool,
    /// GL_EXT_color_buffer_half_float
    pub gl_ext_color_buffer_half_float: bool,
    /// GL_EXT_draw_buffers
    pub gl_ext_draw_buffers: bool,
    /// GL_EXT_framebuffer_blit
    pub gl_ext_framebuffer_blit: bool,
    /// GL_EXT_framebuffer_object
    pub gl_ext_framebuffer_object: bool,
    /// GL_EXT_packed_depth_stencil
    pub gl_ext_packed_depth_stencil: bool,
    /// GL_EXT_texture_integer
    pub gl_ext_texture_integer: bool,
    /// GL_NV_framebuffer_blit
    pub gl_nv_framebuffer_blit: bool,
    /// GL_OES_depth24
    pub gl_oes_depth24: bool,
    /// GL_OES_depth32
    pub gl_oes_depth32: bool,
    /// GL_OES_depth_texture
    pub gl_oes_depth_texture: bool,
    /// GL_OES_packed_depth_stencil
    pub gl_oes_packed_depth_stencil: bool,
    /// GL_OES_rgb8_rgba8
    pub gl_oes_rgb8_rgba8: bool,
    /// GL_OES_texture_stencil8
    pub gl_oes_texture_stencil8: bool,
}

/// Returns the list of extensions supported by the backend.
///
/// The version must match the one of the backend.
pub fn get_extensions(device: &dyn Device, version: &Version) -> ExtensionsList {
    let strings = get_extensions_strings(device, version);

    let mut extensions = ExtensionsList::default();

    for extension in strings.iter() {
        match &extension[..] {
            "GL_ARB_depth_texture" => extensions.gl_arb_depth_texture = true,
            "GL_ARB_ES2_compatibility" => extensions.gl_arb_es2_compatibility = true,
            "GL_ARB_framebuffer_object" => extensions.gl_arb_framebuffer_object = true,
            "GL_ARB_texture_float" => extensions.gl_arb_texture_float = true,
            "GL_ARB_texture_rg" => extensions.gl_arb_texture_rg = true,
            "GL_ARB_texture_stencil8" => extensions.gl_arb_texture_stencil8 = true,
            "GL_ARM_rgba8" => extensions.gl_arm_rgba8 = true,
            "GL_EXT_color_buffer_float" => extensions.gl_ext_color_buffer_float = true,
            "GL_EXT_color_buffer_half_float" => extensions.gl_ext_color_buffer_half_float = true,
            "GL_EXT_draw_buffers" => extensions.gl_ext_draw_buffers = true,
            "GL_EXT_framebuffer_blit" => extensions.gl_ext_framebuffer_blit = true,
            "GL_EXT_framebuffer_object" => extensions.gl_ext_framebuffer_object = true,
            "GL_EXT_packed_depth_stencil" => extensions.gl_ext_packed_depth_stencil = true,
            "GL_EXT_texture_integer" => extensions.gl_ext_texture_integer = true,
            "GL_NV_framebuffer_blit" => extensions.gl_nv_framebuffer_blit = true,
            "GL_OES_depth24" => extensions.gl_oes_depth24 = true,
            "GL_OES_depth32" => extensions.gl_oes_depth32 = true,
            "GL_OES_depth_texture" => extensions.gl_oes_depth_texture = true,
            "GL_OES_packed_depth_stencil" => extensions.gl_oes_packed_depth_stencil = true,
            "GL_OES_rgb8_rgba8" => extensions.gl_oes_rgb8_rgba8 = true,
            "GL_OES_texture_stencil8" => extensions.gl_oes_texture_stencil8 = true,
            _ => ()
        }
    }

    extensions
}

/// Returns the list of all extension names supported by the OpenGL implementation.
///
/// GL 3 and ES 3 deprecate the single space-separated string in favor of `glGetStringi`.
fn get_extensions_strings(device: &dyn Device, version: &Version) -> Vec<String> {
    if version >= &Version(Api::Gl, 3, 0) || version >= &Version(Api::GlEs, 3, 0) {
        let num_extensions = device.get_integer(gl::NUM_EXTENSIONS).max(0);

        (0 .. num_extensions as gl::types::GLuint)
            .filter_map(|num| device.get_string_i(gl::EXTENSIONS, num))
            .collect()

    } else {
        match device.get_string(gl::EXTENSIONS) {
            Some(list) => list.split(' ').filter(|e| !e.is_empty()).map(|e| e.to_owned()).collect(),
            None => Vec::new(),
        }
    }
}
