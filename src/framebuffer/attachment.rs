use std::fmt;

use crate::context::Context;
use crate::framebuffer::{FramebufferError, RenderBuffer};
use crate::gl;
use crate::texture::{CubeLayer, SharedName, StorageKind, Texture2d, TextureCube, TextureFormat};
use crate::GlObject;
use crate::ToGlEnum;

/// The four classes of attachments, each with its own renderability requirement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    /// The image must be color-renderable.
    Color,
    /// The image must be depth-renderable and not stencil-renderable.
    Depth,
    /// The image must be stencil-renderable and not depth-renderable.
    Stencil,
    /// The image must be both depth-renderable and stencil-renderable.
    DepthStencil,
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = match *self {
            AttachmentKind::Color => "color",
            AttachmentKind::Depth => "depth",
            AttachmentKind::Stencil => "stencil",
            AttachmentKind::DepthStencil => "depth-stencil",
        };

        fmt.write_str(desc)
    }
}

/// Describes an attachment for a color buffer.
#[derive(Copy, Clone, Debug)]
pub enum ColorAttachment<'a> {
    /// A two-dimensional texture.
    Texture2d(&'a Texture2d),
    /// A face of a cube map.
    TextureCubeFace(&'a TextureCube, CubeLayer),
    /// A render buffer.
    RenderBuffer(&'a RenderBuffer),
}

/// Trait for objects that can be used as color attachments.
pub trait ToColorAttachment<'a> {
    /// Builds the `ColorAttachment`.
    fn to_color_attachment(self) -> ColorAttachment<'a>;
}

impl<'a> ToColorAttachment<'a> for ColorAttachment<'a> {
    #[inline]
    fn to_color_attachment(self) -> ColorAttachment<'a> {
        self
    }
}

/// Describes an attachment for a depth buffer.
#[derive(Copy, Clone, Debug)]
pub enum DepthAttachment<'a> {
    /// A two-dimensional texture.
    Texture2d(&'a Texture2d),
    /// A render buffer.
    RenderBuffer(&'a RenderBuffer),
}

/// Trait for objects that can be used as depth attachments.
pub trait ToDepthAttachment<'a> {
    /// Builds the `DepthAttachment`.
    fn to_depth_attachment(self) -> DepthAttachment<'a>;
}

impl<'a> ToDepthAttachment<'a> for DepthAttachment<'a> {
    #[inline]
    fn to_depth_attachment(self) -> DepthAttachment<'a> {
        self
    }
}

/// Describes an attachment for a stencil buffer.
#[derive(Copy, Clone, Debug)]
pub enum StencilAttachment<'a> {
    /// A two-dimensional texture.
    Texture2d(&'a Texture2d),
    /// A render buffer.
    RenderBuffer(&'a RenderBuffer),
}

/// Trait for objects that can be used as stencil attachments.
pub trait ToStencilAttachment<'a> {
    /// Builds the `StencilAttachment`.
    fn to_stencil_attachment(self) -> StencilAttachment<'a>;
}

impl<'a> ToStencilAttachment<'a> for StencilAttachment<'a> {
    #[inline]
    fn to_stencil_attachment(self) -> StencilAttachment<'a> {
        self
    }
}

/// Describes an attachment for a depth and stencil buffer.
#[derive(Copy, Clone, Debug)]
pub enum DepthStencilAttachment<'a> {
    /// A two-dimensional texture.
    Texture2d(&'a Texture2d),
    /// A render buffer.
    RenderBuffer(&'a RenderBuffer),
}

/// Trait for objects that can be used as depth and stencil attachments.
pub trait ToDepthStencilAttachment<'a> {
    /// Builds the `DepthStencilAttachment`.
    fn to_depth_stencil_attachment(self) -> DepthStencilAttachment<'a>;
}

impl<'a> ToDepthStencilAttachment<'a> for DepthStencilAttachment<'a> {
    #[inline]
    fn to_depth_stencil_attachment(self) -> DepthStencilAttachment<'a> {
        self
    }
}

impl<'a> ToColorAttachment<'a> for &'a Texture2d {
    #[inline]
    fn to_color_attachment(self) -> ColorAttachment<'a> {
        ColorAttachment::Texture2d(self)
    }
}

impl<'a> ToDepthAttachment<'a> for &'a Texture2d {
    #[inline]
    fn to_depth_attachment(self) -> DepthAttachment<'a> {
        DepthAttachment::Texture2d(self)
    }
}

impl<'a> ToStencilAttachment<'a> for &'a Texture2d {
    #[inline]
    fn to_stencil_attachment(self) -> StencilAttachment<'a> {
        StencilAttachment::Texture2d(self)
    }
}

impl<'a> ToDepthStencilAttachment<'a> for &'a Texture2d {
    #[inline]
    fn to_depth_stencil_attachment(self) -> DepthStencilAttachment<'a> {
        DepthStencilAttachment::Texture2d(self)
    }
}

impl<'a> ToColorAttachment<'a> for (&'a TextureCube, CubeLayer) {
    #[inline]
    fn to_color_attachment(self) -> ColorAttachment<'a> {
        ColorAttachment::TextureCubeFace(self.0, self.1)
    }
}

/// The command needed to attach an image.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum RawAttachment {
    Texture {
        tex_target: gl::types::GLenum,
        texture: gl::types::GLuint,
    },
    RenderBuffer(gl::types::GLuint),
}

/// Any image that can be attached, whatever the attachment class.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Image<'a> {
    Texture2d(&'a Texture2d),
    TextureCubeFace(&'a TextureCube, CubeLayer),
    RenderBuffer(&'a RenderBuffer),
}

impl<'a> Image<'a> {
    fn name(&self) -> &'a SharedName {
        match *self {
            Image::Texture2d(t) => t.name(),
            Image::TextureCubeFace(t, _) => t.name(),
            Image::RenderBuffer(r) => r.name(),
        }
    }

    fn what(&self) -> &'static str {
        match *self {
            Image::Texture2d(_) | Image::TextureCubeFace(..) => "texture",
            Image::RenderBuffer(_) => "render buffer",
        }
    }

    pub fn format(&self) -> TextureFormat {
        match *self {
            Image::Texture2d(t) => t.get_format(),
            Image::TextureCubeFace(t, _) => t.get_format(),
            Image::RenderBuffer(r) => r.get_format(),
        }
    }

    pub fn storage(&self) -> StorageKind {
        match *self {
            Image::Texture2d(_) | Image::TextureCubeFace(..) => StorageKind::Texture,
            Image::RenderBuffer(_) => StorageKind::RenderBuffer,
        }
    }

    pub fn raw(&self) -> RawAttachment {
        match *self {
            Image::Texture2d(t) => RawAttachment::Texture {
                tex_target: gl::TEXTURE_2D,
                texture: t.get_id(),
            },
            Image::TextureCubeFace(t, layer) => RawAttachment::Texture {
                tex_target: layer.to_glenum(),
                texture: t.get_id(),
            },
            Image::RenderBuffer(r) => RawAttachment::RenderBuffer(r.get_id()),
        }
    }

    /// Checks that the image is alive and usable by `context`.
    pub fn check_alive(&self, context: &Context) -> Result<(), FramebufferError> {
        self.name().check(context, self.what())
    }

    /// Checks liveness and the renderability requirement of `kind`.
    pub fn check(&self, context: &Context, kind: AttachmentKind) -> Result<(), FramebufferError> {
        self.check_alive(context)?;

        let format = self.format();
        let storage = self.storage();

        let ok = match kind {
            AttachmentKind::Color => format.is_color_renderable(storage, context),
            AttachmentKind::Depth => {
                format.is_depth_renderable(storage, context) &&
                !format.is_stencil_renderable(storage, context)
            },
            AttachmentKind::Stencil => {
                format.is_stencil_renderable(storage, context) &&
                !format.is_depth_renderable(storage, context)
            },
            AttachmentKind::DepthStencil => {
                format.is_depth_renderable(storage, context) &&
                format.is_stencil_renderable(storage, context)
            },
        };

        if ok {
            Ok(())
        } else {
            Err(FramebufferError::IncompatibleAttachment { format, kind })
        }
    }
}

impl<'a> ColorAttachment<'a> {
    pub(crate) fn image(&self) -> Image<'a> {
        match *self {
            ColorAttachment::Texture2d(t) => Image::Texture2d(t),
            ColorAttachment::TextureCubeFace(t, layer) => Image::TextureCubeFace(t, layer),
            ColorAttachment::RenderBuffer(r) => Image::RenderBuffer(r),
        }
    }
}

impl<'a> DepthAttachment<'a> {
    pub(crate) fn image(&self) -> Image<'a> {
        match *self {
            DepthAttachment::Texture2d(t) => Image::Texture2d(t),
            DepthAttachment::RenderBuffer(r) => Image::RenderBuffer(r),
        }
    }
}

impl<'a> StencilAttachment<'a> {
    pub(crate) fn image(&self) -> Image<'a> {
        match *self {
            StencilAttachment::Texture2d(t) => Image::Texture2d(t),
            StencilAttachment::RenderBuffer(r) => Image::RenderBuffer(r),
        }
    }
}

impl<'a> DepthStencilAttachment<'a> {
    pub(crate) fn image(&self) -> Image<'a> {
        match *self {
            DepthStencilAttachment::Texture2d(t) => Image::Texture2d(t),
            DepthStencilAttachment::RenderBuffer(r) => Image::RenderBuffer(r),
        }
    }
}

