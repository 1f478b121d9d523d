/*!

A render buffer is similar to a texture, but is optimized for usage as a draw target.

Contrary to a texture, you can't sample nor modify the content of a render buffer.
You should prefer render buffers over textures when you know that you don't need to read or modify
the data of the render buffer.

Like textures, render buffers are created elsewhere and imported here with `RenderBuffer::from_id`.

*/
use crate::context::Context;
use crate::framebuffer::{ColorAttachment, ToColorAttachment};
use crate::framebuffer::{DepthAttachment, ToDepthAttachment};
use crate::framebuffer::{DepthStencilAttachment, ToDepthStencilAttachment};
use crate::framebuffer::{StencilAttachment, ToStencilAttachment};
use crate::gl;
use crate::texture::{SharedName, TextureFormat};
use crate::GlObject;

/// A render buffer is similar to a texture, but is optimized for usage as a draw target.
///
/// Contrary to a texture, you can't sample or modify the content of the `RenderBuffer`.
#[derive(Debug)]
pub struct RenderBuffer {
    name: SharedName,
    format: TextureFormat,
    width: u32,
    height: u32,
}

impl RenderBuffer {
    /// Builds a handle to an existing render buffer.
    ///
    /// # Safety
    ///
    /// `id` must be the name of a render buffer of the share group of `context`, whose storage
    /// has the given format and dimensions.
    pub unsafe fn from_id(context: &Context, id: gl::types::GLuint, format: TextureFormat,
                          width: u32, height: u32) -> RenderBuffer
    {
        RenderBuffer {
            name: SharedName::new(context, id),
            format,
            width,
            height,
        }
    }

    /// Returns the format of the render buffer.
    #[inline]
    pub fn get_format(&self) -> TextureFormat {
        self.format
    }

    /// Returns the dimensions of the render buffer.
    #[inline]
    pub fn get_dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Records that the render buffer has been destroyed by its owner.
    #[inline]
    pub fn mark_deleted(&self) {
        self.name.mark_deleted();
    }

    /// Returns true if `mark_deleted` has been called.
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.name.is_deleted()
    }

    #[inline]
    pub(crate) fn name(&self) -> &SharedName {
        &self.name
    }
}

impl GlObject for RenderBuffer {
    type Id = gl::types::GLuint;

    #[inline]
    fn get_id(&self) -> gl::types::GLuint {
        self.name.id()
    }
}

impl<'a> ToColorAttachment<'a> for &'a RenderBuffer {
    #[inline]
    fn to_color_attachment(self) -> ColorAttachment<'a> {
        ColorAttachment::RenderBuffer(self)
    }
}

impl<'a> ToDepthAttachment<'a> for &'a RenderBuffer {
    #[inline]
    fn to_depth_attachment(self) -> DepthAttachment<'a> {
        DepthAttachment::RenderBuffer(self)
    }
}

impl<'a> ToStencilAttachment<'a> for &'a RenderBuffer {
    #[inline]
    fn to_stencil_attachment(self) -> StencilAttachment<'a> {
        StencilAttachment::RenderBuffer(self)
    }
}

impl<'a> ToDepthStencilAttachment<'a> for &'a RenderBuffer {
    #[inline]
    fn to_depth_stencil_attachment(self) -> DepthStencilAttachment<'a> {
        DepthStencilAttachment::RenderBuffer(self)
    }
}
