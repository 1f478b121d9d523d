/*!
Color attachment points and draw buffers.

Both catalogs are built once, when the context is created, from `GL_MAX_COLOR_ATTACHMENTS` and
`GL_MAX_DRAW_BUFFERS`. Every OpenGL 3.0 and OpenGL ES 3.0 implementation supports at least eight
of each; glframe refuses to run on anything less.

*/
use std::cmp::Ordering;
use std::fmt;

use log::{debug, error};

use crate::context::ContextId;
use crate::framebuffer::FramebufferError;
use crate::gl;

/// Devices that report fewer slots than this are rejected.
pub const MIN_COLOR_SLOTS: u32 = 8;

/// Devices that report more slots than this are clamped.
pub const MAX_COLOR_SLOTS: u32 = 1024;

/// One of the `GL_COLOR_ATTACHMENTi` slots of a framebuffer.
///
/// Attachment points can only be used with the context that created them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ColorAttachmentPoint {
    index: u32,
    context: ContextId,
}

impl ColorAttachmentPoint {
    /// Returns the index of the attachment point. `0` is `GL_COLOR_ATTACHMENT0`.
    #[inline]
    pub fn get_index(&self) -> u32 {
        self.index
    }

    /// Returns the context this attachment point belongs to.
    #[inline]
    pub fn get_context(&self) -> ContextId {
        self.context
    }

    #[inline]
    pub(crate) fn to_glenum(&self) -> gl::types::GLenum {
        gl::COLOR_ATTACHMENT0 + self.index
    }
}

impl fmt::Display for ColorAttachmentPoint {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "color attachment {}", self.index)
    }
}

/// One of the fragment outputs, as programmed by `glDrawBuffers`.
///
/// Draw buffers are ordered by index. They can only be used with the context that
/// created them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DrawBuffer {
    index: u32,
    context: ContextId,
}

impl DrawBuffer {
    /// Returns the index of the draw buffer.
    #[inline]
    pub fn get_index(&self) -> u32 {
        self.index
    }

    /// Returns the context this draw buffer belongs to.
    #[inline]
    pub fn get_context(&self) -> ContextId {
        self.context
    }
}

impl PartialOrd for DrawBuffer {
    #[inline]
    fn partial_cmp(&self, other: &DrawBuffer) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DrawBuffer {
    #[inline]
    fn cmp(&self, other: &DrawBuffer) -> Ordering {
        (self.index, self.context).cmp(&(other.index, other.context))
    }
}

impl fmt::Display for DrawBuffer {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "draw buffer {}", self.index)
    }
}

/// Applies the floor and the ceiling to a count reported by the device.
fn checked_count(context: ContextId, reported: gl::types::GLint, what: &str)
                 -> Result<u32, FramebufferError>
{
    if reported < MIN_COLOR_SLOTS as gl::types::GLint {
        let msg = format!("Reported number of {} {} is less than the required {}",
                          what, reported, MIN_COLOR_SLOTS);
        error!("[{}] {}", context, msg);
        return Err(FramebufferError::NonCompliantDevice(msg));
    }

    let reported = reported as u32;
    if reported > MAX_COLOR_SLOTS {
        debug!("[{}] clamped unreasonable {} count {} to {}", context, what, reported,
               MAX_COLOR_SLOTS);
        return Ok(MAX_COLOR_SLOTS);
    }

    Ok(reported)
}

pub(crate) fn make_color_attachment_points(context: ContextId, reported: gl::types::GLint)
                                           -> Result<Vec<ColorAttachmentPoint>, FramebufferError>
{
    let count = checked_count(context, reported, "color attachments")?;
    Ok((0 .. count).map(|index| ColorAttachmentPoint { index, context }).collect())
}

pub(crate) fn make_draw_buffers(context: ContextId, reported: gl::types::GLint)
                                -> Result<Vec<DrawBuffer>, FramebufferError>
{
    let count = checked_count(context, reported, "draw buffers")?;
    Ok((0 .. count).map(|index| DrawBuffer { index, context }).collect())
}
