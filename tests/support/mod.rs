/*!
Test supports module.

*/

#![allow(dead_code)]

use glframe::backend::fake::FakeDevice;
use glframe::backend::Device;
use glframe::gl;
use glframe::texture::{DepthFormat, DepthStencilFormat, StencilFormat, UncompressedFloatFormat};
use glframe::{Context, ContextOptions, CubeLayer, RenderBuffer, Texture2d, TextureCube};

/// Initializes the logger once per test binary. Set `RUST_LOG=glframe=trace` to see the
/// commands.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a context over a desktop OpenGL 3.3 fake device.
///
/// Also returns a handle to the device, to inspect the commands it received.
pub fn build_context() -> (Context, FakeDevice) {
    build_context_with(FakeDevice::new("3.3.0 Fake"))
}

/// Builds a context over the given fake device.
///
/// Error checking is disabled, so that `assert_no_error` can see the errors.
pub fn build_context_with(device: FakeDevice) -> (Context, FakeDevice) {
    init_logger();

    let options = ContextOptions { check_errors: false };
    let context = Context::new(device.clone(), options).unwrap();
    (context, device)
}

/// Panics if the device recorded an error.
pub fn assert_no_error(device: &FakeDevice) {
    let error = device.get_error();
    assert_eq!(error, gl::NO_ERROR, "device reported error 0x{:x}", error);
}

/// Imports a 128x128 RGBA8 texture.
pub fn build_color_texture(context: &Context, id: gl::types::GLuint) -> Texture2d {
    unsafe {
        Texture2d::from_id(context, id, UncompressedFloatFormat::U8U8U8U8.to_texture_format(),
                           128, 128)
    }
}

/// Imports a 128x128 RGBA8 cube map.
pub fn build_color_cubemap(context: &Context, id: gl::types::GLuint) -> TextureCube {
    unsafe {
        TextureCube::from_id(context, id, UncompressedFloatFormat::U8U8U8U8.to_texture_format(),
                             128)
    }
}

/// Imports a 128x128 24-bit depth texture.
pub fn build_depth_texture(context: &Context, id: gl::types::GLuint) -> Texture2d {
    unsafe {
        Texture2d::from_id(context, id, DepthFormat::I24.to_texture_format(), 128, 128)
    }
}

/// Imports a 128x128 24-bit depth renderbuffer.
pub fn build_depth_renderbuffer(context: &Context, id: gl::types::GLuint) -> RenderBuffer {
    unsafe {
        RenderBuffer::from_id(context, id, DepthFormat::I24.to_texture_format(), 128, 128)
    }
}

/// Imports a 128x128 8-bit stencil renderbuffer.
pub fn build_stencil_renderbuffer(context: &Context, id: gl::types::GLuint) -> RenderBuffer {
    unsafe {
        RenderBuffer::from_id(context, id, StencilFormat::I8.to_texture_format(), 128, 128)
    }
}

/// Imports a 128x128 D24S8 renderbuffer.
pub fn build_depth_stencil_renderbuffer(context: &Context, id: gl::types::GLuint)
                                        -> RenderBuffer
{
    unsafe {
        RenderBuffer::from_id(context, id, DepthStencilFormat::I24I8.to_texture_format(),
                              128, 128)
    }
}

/// Allocates a framebuffer with a single color texture at point 0, written by draw buffer 0.
pub fn build_framebuffer(context: &Context, texture: &Texture2d) -> glframe::Framebuffer {
    let mut builder = context.new_framebuffer_builder();
    builder.attach_color_at(context.color_attachment_points()[0], context.draw_buffers()[0],
                            texture).unwrap();
    context.allocate_framebuffer(builder).unwrap()
}

/// Every face, in the order of the `GL_TEXTURE_CUBE_MAP_*` enums.
pub const CUBE_LAYERS: [CubeLayer; 6] = [
    CubeLayer::PositiveX, CubeLayer::NegativeX,
    CubeLayer::PositiveY, CubeLayer::NegativeY,
    CubeLayer::PositiveZ, CubeLayer::NegativeZ,
];
