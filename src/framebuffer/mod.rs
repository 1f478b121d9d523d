/*!
Framebuffers allow you to render to textures and render buffers.

Building a framebuffer is done in two steps:

 - A `FramebufferBuilder`, obtained with `Context::new_framebuffer_builder`, collects the
   images to attach. Every `attach_*` call checks right away that the image belongs to the
   right share group, hasn't been deleted, and has a format that can be rendered to for
   this kind of attachment.
 - `Context::allocate_framebuffer` creates the OpenGL object, attaches everything, programs
   the draw buffers and asks the device whether the framebuffer is complete.

```no_run
# use glframe::{Context, Texture2d, RenderBuffer};
# fn example(context: &Context, color: &Texture2d, depth: &RenderBuffer) {
let mut builder = context.new_framebuffer_builder();
builder.attach_color_at(context.color_attachment_points()[0],
                        context.draw_buffers()[0], color).unwrap();
builder.attach_depth(depth).unwrap();

let framebuffer = context.allocate_framebuffer(builder).unwrap();
assert_eq!(framebuffer.get_depth_bits(), 24);
# }
```

# Draw buffers

Each color attachment is associated with a draw buffer, which is the fragment shader output
that writes to it. If a color attachment is detached after being associated with a draw buffer,
the association stays in the builder but the draw buffer is programmed to `GL_NONE` when the
framebuffer is allocated.

# Depth and stencil

A framebuffer has either a depth attachment and/or a stencil attachment, or a single
depth-stencil attachment. Attaching one form removes the other from the builder.

*/
use std::cell::Cell;
use std::error::Error;
use std::fmt;

use smallvec::SmallVec;

use crate::context::{Context, ContextId};
use crate::fbo;
use crate::gl;
use crate::texture::TextureFormat;
use crate::GlObject;
use crate::ToGlEnum;

pub use self::attachment::{AttachmentKind, ColorAttachment, ToColorAttachment};
pub use self::attachment::{DepthAttachment, ToDepthAttachment};
pub use self::attachment::{DepthStencilAttachment, ToDepthStencilAttachment};
pub use self::attachment::{StencilAttachment, ToStencilAttachment};
pub use self::builder::FramebufferBuilder;
pub use self::points::{ColorAttachmentPoint, DrawBuffer, MAX_COLOR_SLOTS, MIN_COLOR_SLOTS};
pub use self::render_buffer::RenderBuffer;

pub(crate) mod attachment;
pub(crate) mod points;

mod binding;
mod builder;
mod render_buffer;

/// One of the two framebuffer binding points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BindTarget {
    /// `GL_DRAW_FRAMEBUFFER`.
    Draw,
    /// `GL_READ_FRAMEBUFFER`.
    Read,
}

impl ToGlEnum for BindTarget {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            BindTarget::Draw => gl::DRAW_FRAMEBUFFER,
            BindTarget::Read => gl::READ_FRAMEBUFFER,
        }
    }
}

impl fmt::Display for BindTarget {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BindTarget::Draw => fmt.write_str("draw"),
            BindTarget::Read => fmt.write_str("read"),
        }
    }
}

/// Completeness of a framebuffer, as reported by `glCheckFramebufferStatus`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FramebufferStatus {
    /// The framebuffer can be used.
    Complete,
    /// One of the attachments is not attachment complete.
    IncompleteAttachment,
    /// A draw buffer points to an attachment point without image.
    IncompleteDrawBuffer,
    /// The read buffer points to an attachment point without image.
    IncompleteReadBuffer,
    /// No image is attached.
    MissingImageAttachment,
    /// The combination of formats is not supported by the implementation.
    Unsupported,
    /// Any other value, including multisample and layer mismatches.
    Unknown,
}

impl FramebufferStatus {
    /// Converts the value returned by `glCheckFramebufferStatus`.
    pub fn from_glenum(value: gl::types::GLenum) -> FramebufferStatus {
        match value {
            gl::FRAMEBUFFER_COMPLETE => FramebufferStatus::Complete,
            gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => FramebufferStatus::IncompleteAttachment,
            gl::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => FramebufferStatus::IncompleteDrawBuffer,
            gl::FRAMEBUFFER_INCOMPLETE_READ_BUFFER => FramebufferStatus::IncompleteReadBuffer,
            gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => {
                FramebufferStatus::MissingImageAttachment
            },
            gl::FRAMEBUFFER_UNSUPPORTED => FramebufferStatus::Unsupported,
            _ => FramebufferStatus::Unknown,
        }
    }
}

impl fmt::Display for FramebufferStatus {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = match *self {
            FramebufferStatus::Complete => "complete",
            FramebufferStatus::IncompleteAttachment => "incomplete attachment",
            FramebufferStatus::IncompleteDrawBuffer => "incomplete draw buffer",
            FramebufferStatus::IncompleteReadBuffer => "incomplete read buffer",
            FramebufferStatus::MissingImageAttachment => "missing image attachment",
            FramebufferStatus::Unsupported => "unsupported",
            FramebufferStatus::Unknown => "unknown status",
        };

        fmt.write_str(desc)
    }
}

/// Error that can happen while building or using framebuffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramebufferError {
    /// The object was created by a context that doesn't share objects with this one.
    WrongContext(&'static str),

    /// The object has already been deleted.
    ResourceDeleted(&'static str),

    /// The format of the image can't be rendered to with this kind of attachment.
    IncompatibleAttachment {
        /// Format of the image.
        format: TextureFormat,
        /// The kind of attachment that was requested.
        kind: AttachmentKind,
    },

    /// The request doesn't make sense.
    ParameterError(String),

    /// The operation requires a framebuffer to be bound to this target.
    FramebufferNotBound(BindTarget),

    /// The device reported that the framebuffer isn't complete.
    FramebufferInvalid(FramebufferStatus),

    /// The device doesn't meet the minimum requirements.
    NonCompliantDevice(String),
}

impl fmt::Display for FramebufferError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramebufferError::WrongContext(what) =>
                write!(fmt, "The {} belongs to a context that doesn't share objects with \
                             this one", what),
            FramebufferError::ResourceDeleted(what) =>
                write!(fmt, "The {} has already been deleted", what),
            FramebufferError::IncompatibleAttachment { format, kind } =>
                write!(fmt, "Format {:?} can't be used as a {} attachment", format, kind),
            FramebufferError::ParameterError(msg) => fmt.write_str(msg),
            FramebufferError::FramebufferNotBound(target) =>
                write!(fmt, "No framebuffer is bound for {}ing", match target {
                    BindTarget::Draw => "draw",
                    BindTarget::Read => "read",
                }),
            FramebufferError::FramebufferInvalid(status) =>
                write!(fmt, "The framebuffer is not complete: {}", status),
            FramebufferError::NonCompliantDevice(msg) =>
                write!(fmt, "The device doesn't meet the minimum requirements: {}", msg),
        }
    }
}

impl Error for FramebufferError {}

/// A complete framebuffer object.
///
/// Created by `Context::allocate_framebuffer` and destroyed by `Context::delete_framebuffer`.
/// Dropping a framebuffer without deleting it leaks the OpenGL object.
#[derive(Debug)]
pub struct Framebuffer {
    id: gl::types::GLuint,
    context: ContextId,
    deleted: Cell<bool>,
    depth_bits: u16,
    stencil_bits: u16,
    // color attachment index for each draw buffer
    draw_buffers: SmallVec<[Option<u32>; 8]>,
}

impl Framebuffer {
    pub(crate) fn new(id: gl::types::GLuint, context: ContextId, depth_bits: u16,
                      stencil_bits: u16, draw_buffers: SmallVec<[Option<u32>; 8]>)
                      -> Framebuffer
    {
        Framebuffer {
            id,
            context,
            deleted: Cell::new(false),
            depth_bits,
            stencil_bits,
            draw_buffers,
        }
    }

    /// Returns the context this framebuffer belongs to.
    #[inline]
    pub fn get_context(&self) -> ContextId {
        self.context
    }

    /// Returns the number of bits of the depth buffer, or 0 if there is none.
    #[inline]
    pub fn get_depth_bits(&self) -> u16 {
        self.depth_bits
    }

    /// Returns the number of bits of the stencil buffer, or 0 if there is none.
    #[inline]
    pub fn get_stencil_bits(&self) -> u16 {
        self.stencil_bits
    }

    /// Returns true if the framebuffer has been deleted.
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted.get()
    }

    /// Returns the index of the color attachment that `buffer` writes to, or `None` if the
    /// draw buffer was programmed to `GL_NONE`.
    pub fn get_draw_buffer_target(&self, buffer: DrawBuffer) -> Option<u32> {
        if buffer.get_context() != self.context {
            return None;
        }

        self.draw_buffers.get(buffer.get_index() as usize).cloned().flatten()
    }

    #[inline]
    pub(crate) fn mark_deleted(&self) {
        self.deleted.set(true);
    }
}

impl GlObject for Framebuffer {
    type Id = gl::types::GLuint;

    #[inline]
    fn get_id(&self) -> gl::types::GLuint {
        self.id
    }
}

impl Context {
    /// Starts building a framebuffer for this context.
    #[inline]
    pub fn new_framebuffer_builder(&self) -> FramebufferBuilder<'_> {
        FramebufferBuilder::new(self)
    }

    /// Creates a framebuffer object from the content of a builder.
    ///
    /// On success the framebuffer is left bound for drawing. On failure nothing is left
    /// behind: the object is deleted and the draw binding reverts to the default framebuffer.
    pub fn allocate_framebuffer<'a>(&self, builder: FramebufferBuilder<'a>)
                                    -> Result<Framebuffer, FramebufferError>
    {
        fbo::allocate(self, builder)
    }

    /// Deletes a framebuffer.
    ///
    /// If the framebuffer is bound for drawing or reading, the binding reverts to the
    /// default framebuffer.
    pub fn delete_framebuffer(&self, framebuffer: &Framebuffer) -> Result<(), FramebufferError> {
        self.check_framebuffer(framebuffer)?;

        let mut ctxt = self.make_command_context();
        fbo::destroy(&mut ctxt, framebuffer.get_id());
        framebuffer.mark_deleted();

        Ok(())
    }

    /// Checks that a framebuffer can be used with this context.
    pub(crate) fn check_framebuffer(&self, framebuffer: &Framebuffer)
                                    -> Result<(), FramebufferError>
    {
        self.check_unshared(framebuffer.get_context(), "framebuffer")?;

        if framebuffer.is_deleted() {
            return Err(FramebufferError::ResourceDeleted("framebuffer"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::FramebufferStatus;
    use crate::gl;

    #[test]
    fn status_conversion() {
        assert_eq!(FramebufferStatus::from_glenum(gl::FRAMEBUFFER_COMPLETE),
                   FramebufferStatus::Complete);
        assert_eq!(FramebufferStatus::from_glenum(gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT),
                   FramebufferStatus::MissingImageAttachment);
        assert_eq!(FramebufferStatus::from_glenum(gl::FRAMEBUFFER_UNSUPPORTED),
                   FramebufferStatus::Unsupported);
    }

    #[test]
    fn unlisted_statuses_are_unknown() {
        for &value in &[gl::FRAMEBUFFER_UNDEFINED, gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE,
                        gl::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS, 0, 0xdead]
        {
            assert_eq!(FramebufferStatus::from_glenum(value), FramebufferStatus::Unknown);
        }
    }
}
