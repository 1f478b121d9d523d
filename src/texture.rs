/*!
Textures that can be attached to a framebuffer.

Glframe doesn't create textures or upload data to them. The types in this module are handles
to textures that were created somewhere else, described with enough information to check
them before they are attached: the OpenGL name, the format and the dimensions.

A handle remembers the share group of the context it was imported into. It can be attached by
any context of that group.

When the owner of the texture destroys it, it must call `mark_deleted` on every handle. Any
later attempt to attach the texture fails with `ResourceDeleted` instead of reaching the driver
with a dangling name.

*/
use std::cell::Cell;

use crate::context::{Context, ShareGroupId};
use crate::framebuffer::FramebufferError;
use crate::gl;
use crate::GlObject;
use crate::ToGlEnum;

pub use crate::image_format::{DepthFormat, DepthStencilFormat, StencilFormat, StorageKind};
pub use crate::image_format::{TextureFormat, UncompressedFloatFormat, UncompressedIntFormat};
pub use crate::image_format::UncompressedUintFormat;

/// Name of an object that is shared between the contexts of a share group.
#[derive(Debug)]
pub(crate) struct SharedName {
    id: gl::types::GLuint,
    share_group: ShareGroupId,
    deleted: Cell<bool>,
}

impl SharedName {
    pub(crate) fn new(context: &Context, id: gl::types::GLuint) -> SharedName {
        SharedName {
            id,
            share_group: context.get_share_group(),
            deleted: Cell::new(false),
        }
    }

    #[inline]
    pub(crate) fn id(&self) -> gl::types::GLuint {
        self.id
    }

    #[inline]
    pub(crate) fn mark_deleted(&self) {
        self.deleted.set(true);
    }

    #[inline]
    pub(crate) fn is_deleted(&self) -> bool {
        self.deleted.get()
    }

    /// Checks that `context` may use this object.
    pub(crate) fn check(&self, context: &Context, what: &'static str)
                        -> Result<(), FramebufferError>
    {
        context.check_shared(self.share_group, what)?;

        if self.deleted.get() {
            return Err(FramebufferError::ResourceDeleted(what));
        }

        Ok(())
    }
}

/// A two-dimensional texture.
#[derive(Debug)]
pub struct Texture2d {
    name: SharedName,
    format: TextureFormat,
    width: u32,
    height: u32,
}

impl Texture2d {
    /// Builds a handle to an existing `GL_TEXTURE_2D` texture.
    ///
    /// # Safety
    ///
    /// `id` must be the name of a two-dimensional texture of the share group of `context`,
    /// whose level 0 has the given format and dimensions.
    pub unsafe fn from_id(context: &Context, id: gl::types::GLuint, format: TextureFormat,
                          width: u32, height: u32) -> Texture2d
    {
        Texture2d {
            name: SharedName::new(context, id),
            format,
            width,
            height,
        }
    }

    /// Returns the format of the texture.
    #[inline]
    pub fn get_format(&self) -> TextureFormat {
        self.format
    }

    /// Returns the width of the texture.
    #[inline]
    pub fn get_width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    #[inline]
    pub fn get_height(&self) -> u32 {
        self.height
    }

    /// Records that the texture has been destroyed by its owner.
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

impl GlObject for Texture2d {
    type Id = gl::types::GLuint;

    #[inline]
    fn get_id(&self) -> gl::types::GLuint {
        self.name.id()
    }
}

/// Represents a layer of a cubemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum CubeLayer {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl ToGlEnum for CubeLayer {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            CubeLayer::PositiveX => gl::TEXTURE_CUBE_MAP_POSITIVE_X,
            CubeLayer::NegativeX => gl::TEXTURE_CUBE_MAP_NEGATIVE_X,
            CubeLayer::PositiveY => gl::TEXTURE_CUBE_MAP_POSITIVE_Y,
            CubeLayer::NegativeY => gl::TEXTURE_CUBE_MAP_NEGATIVE_Y,
            CubeLayer::PositiveZ => gl::TEXTURE_CUBE_MAP_POSITIVE_Z,
            CubeLayer::NegativeZ => gl::TEXTURE_CUBE_MAP_NEGATIVE_Z,
        }
    }
}

/// A cube map texture. Each face is a square image of `dimension` pixels.
#[derive(Debug)]
pub struct TextureCube {
    name: SharedName,
    format: TextureFormat,
    dimension: u32,
}

impl TextureCube {
    /// Builds a handle to an existing `GL_TEXTURE_CUBE_MAP` texture.
    ///
    /// # Safety
    ///
    /// `id` must be the name of a cube map of the share group of `context`, whose six faces
    /// have the given format and dimension at level 0.
    pub unsafe fn from_id(context: &Context, id: gl::types::GLuint, format: TextureFormat,
                          dimension: u32) -> TextureCube
    {
        TextureCube {
            name: SharedName::new(context, id),
            format,
            dimension,
        }
    }

    /// Returns the format of the texture.
    #[inline]
    pub fn get_format(&self) -> TextureFormat {
        self.format
    }

    /// Returns the width and height of each face.
    #[inline]
    pub fn get_dimension(&self) -> u32 {
        self.dimension
    }

    /// Records that the texture has been destroyed by its owner.
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

impl GlObject for TextureCube {
    type Id = gl::types::GLuint;

    #[inline]
    fn get_id(&self) -> gl::types::GLuint {
        self.name.id()
    }
}
