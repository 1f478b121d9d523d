use log::debug;

use crate::context::Context;
use crate::framebuffer::{BindTarget, FramebufferError};
use crate::gl;
use crate::BlitTarget;
use crate::Rect;
use crate::ToGlEnum;

/// The buffers copied by a blit.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct BlitMask {
    /// Copy the color buffer.
    pub color: bool,
    /// Copy the depth buffer.
    pub depth: bool,
    /// Copy the stencil buffer.
    pub stencil: bool,
}

impl BlitMask {
    /// Only the color buffer.
    #[inline]
    pub fn color() -> BlitMask {
        BlitMask { color: true, depth: false, stencil: false }
    }

    /// Only the depth buffer.
    #[inline]
    pub fn depth() -> BlitMask {
        BlitMask { color: false, depth: true, stencil: false }
    }

    /// Only the stencil buffer.
    #[inline]
    pub fn stencil() -> BlitMask {
        BlitMask { color: false, depth: false, stencil: true }
    }

    /// Color, depth and stencil.
    #[inline]
    pub fn all() -> BlitMask {
        BlitMask { color: true, depth: true, stencil: true }
    }

    fn to_glbitfield(self) -> gl::types::GLbitfield {
        let mut mask = 0;
        if self.color { mask |= gl::COLOR_BUFFER_BIT; }
        if self.depth { mask |= gl::DEPTH_BUFFER_BIT; }
        if self.stencil { mask |= gl::STENCIL_BUFFER_BIT; }
        mask
    }
}

/// Interpolation used when the source and destination rectangles have different sizes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlitFilter {
    /// The nearest texel is used.
    Nearest,
    /// The four nearest texels are interpolated. Only valid for color.
    Linear,
}

impl ToGlEnum for BlitFilter {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            BlitFilter::Nearest => gl::NEAREST,
            BlitFilter::Linear => gl::LINEAR,
        }
    }
}

impl Context {
    /// Copies a rectangle of the framebuffer bound for reading to a rectangle of the
    /// framebuffer bound for drawing.
    ///
    /// Both framebuffers must have been bound beforehand and must be different. Depth and
    /// stencil can only be copied with `BlitFilter::Nearest`.
    pub fn blit_framebuffer(&self, source: &Rect, target: &BlitTarget, mask: BlitMask,
                            filter: BlitFilter) -> Result<(), FramebufferError>
    {
        let ctxt = self.make_command_context();

        let read = ctxt.state.read_framebuffer;
        let draw = ctxt.state.draw_framebuffer;

        if draw == 0 {
            return Err(FramebufferError::FramebufferNotBound(BindTarget::Draw));
        }

        if read == 0 {
            return Err(FramebufferError::FramebufferNotBound(BindTarget::Read));
        }

        if read == draw {
            return Err(FramebufferError::ParameterError(
                "The source and destination of a blit must be different framebuffers"
                    .to_owned()));
        }

        if (mask.depth || mask.stencil) && filter != BlitFilter::Nearest {
            return Err(FramebufferError::ParameterError(
                "Depth and stencil buffers can only be blitted with nearest filtering"
                    .to_owned()));
        }

        let src = [
            to_glint(Some(source.left))?,
            to_glint(Some(source.bottom))?,
            to_glint(source.left.checked_add(source.width))?,
            to_glint(source.bottom.checked_add(source.height))?,
        ];

        let dst_left = to_glint(Some(target.left))?;
        let dst_bottom = to_glint(Some(target.bottom))?;
        let dst = [
            dst_left,
            dst_bottom,
            to_glint(dst_left.checked_add(target.width))?,
            to_glint(dst_bottom.checked_add(target.height))?,
        ];

        debug!("[{}] blit {} {:?} -> {} {:?} {:?}", ctxt.id, read, src, draw, dst, mask);
        ctxt.device.blit_framebuffer(src, dst, mask.to_glbitfield(), filter.to_glenum());
        Ok(())
    }
}

/// Converts a blit coordinate, failing if it overflowed or doesn't fit in a `GLint`.
fn to_glint<T>(value: Option<T>) -> Result<gl::types::GLint, FramebufferError>
    where gl::types::GLint: TryFrom<T>
{
    value.and_then(|v| gl::types::GLint::try_from(v).ok())
         .ok_or_else(|| FramebufferError::ParameterError(
             "Blit coordinates don't fit in a signed 32 bits integer".to_owned()))
}

#[cfg(test)]
mod tests {
    use super::BlitMask;
    use crate::gl;

    #[test]
    fn mask_bits() {
        assert_eq!(BlitMask::default().to_glbitfield(), 0);
        assert_eq!(BlitMask::color().to_glbitfield(), gl::COLOR_BUFFER_BIT);
        assert_eq!(BlitMask::all().to_glbitfield(),
                   gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT | gl::STENCIL_BUFFER_BIT);
    }
}
