use std::collections::BTreeMap;

use log::trace;

use crate::context::{Context, ContextId};
use crate::framebuffer::attachment::AttachmentKind;
use crate::framebuffer::{ColorAttachment, ToColorAttachment};
use crate::framebuffer::{ColorAttachmentPoint, DrawBuffer, FramebufferError};
use crate::framebuffer::{DepthAttachment, ToDepthAttachment};
use crate::framebuffer::{DepthStencilAttachment, ToDepthStencilAttachment};
use crate::framebuffer::{StencilAttachment, ToStencilAttachment};

/// Collects the attachments of a framebuffer before it is allocated.
///
/// Obtained with `Context::new_framebuffer_builder`. A builder can only be allocated by
/// the context that created it.
#[derive(Debug)]
pub struct FramebufferBuilder<'a> {
    context: &'a Context,
    // one entry per color attachment point of the context
    pub(crate) colors: Vec<Option<ColorAttachment<'a>>>,
    pub(crate) draw_buffers: BTreeMap<DrawBuffer, ColorAttachmentPoint>,
    pub(crate) depth: Option<DepthAttachment<'a>>,
    pub(crate) stencil: Option<StencilAttachment<'a>>,
    pub(crate) depth_stencil: Option<DepthStencilAttachment<'a>>,
}

impl<'a> FramebufferBuilder<'a> {
    pub(crate) fn new(context: &'a Context) -> FramebufferBuilder<'a> {
        FramebufferBuilder {
            context,
            colors: vec![None; context.color_attachment_points().len()],
            draw_buffers: BTreeMap::new(),
            depth: None,
            stencil: None,
            depth_stencil: None,
        }
    }

    /// Returns the context that created this builder.
    #[inline]
    pub fn get_context_id(&self) -> ContextId {
        self.context.get_id()
    }

    /// Attaches a color image at `point` and makes `buffer` write to it.
    ///
    /// Replaces whatever was attached at `point` before. `buffer` stops writing to the point
    /// it was previously associated with.
    pub fn attach_color_at<A>(&mut self, point: ColorAttachmentPoint, buffer: DrawBuffer,
                              attachment: A) -> Result<(), FramebufferError>
                              where A: ToColorAttachment<'a>
    {
        self.context.check_unshared(point.get_context(), "color attachment point")?;
        self.context.check_unshared(buffer.get_context(), "draw buffer")?;

        let attachment = attachment.to_color_attachment();
        attachment.image().check(self.context, AttachmentKind::Color)?;

        trace!("[{}] builder: {} -> {}", self.context.get_id(), buffer, point);
        self.colors[point.get_index() as usize] = Some(attachment);
        self.draw_buffers.insert(buffer, point);
        Ok(())
    }

    /// Removes the image attached at `point`.
    ///
    /// Draw buffers associated with `point` keep their association, but will be programmed
    /// to `GL_NONE` unless something is attached again.
    pub fn detach_color_at(&mut self, point: ColorAttachmentPoint)
                           -> Result<(), FramebufferError>
    {
        self.context.check_unshared(point.get_context(), "color attachment point")?;
        self.colors[point.get_index() as usize] = None;
        Ok(())
    }

    /// Attaches a depth image. Removes the depth-stencil attachment, if any.
    pub fn attach_depth<A>(&mut self, attachment: A) -> Result<(), FramebufferError>
                           where A: ToDepthAttachment<'a>
    {
        let attachment = attachment.to_depth_attachment();
        attachment.image().check(self.context, AttachmentKind::Depth)?;

        self.depth = Some(attachment);
        self.depth_stencil = None;
        Ok(())
    }

    /// Attaches a stencil image. Removes the depth-stencil attachment, if any.
    pub fn attach_stencil<A>(&mut self, attachment: A) -> Result<(), FramebufferError>
                             where A: ToStencilAttachment<'a>
    {
        let attachment = attachment.to_stencil_attachment();
        attachment.image().check(self.context, AttachmentKind::Stencil)?;

        self.stencil = Some(attachment);
        self.depth_stencil = None;
        Ok(())
    }

    /// Attaches a combined depth-stencil image. Removes the depth and stencil attachments,
    /// if any.
    pub fn attach_depth_stencil<A>(&mut self, attachment: A) -> Result<(), FramebufferError>
                                   where A: ToDepthStencilAttachment<'a>
    {
        let attachment = attachment.to_depth_stencil_attachment();
        attachment.image().check(self.context, AttachmentKind::DepthStencil)?;

        self.depth = None;
        self.stencil = None;
        self.depth_stencil = Some(attachment);
        Ok(())
    }

    /// Removes the depth attachment and the depth-stencil attachment.
    #[inline]
    pub fn detach_depth(&mut self) {
        self.depth = None;
        self.depth_stencil = None;
    }

    /// Removes the stencil attachment and the depth-stencil attachment.
    #[inline]
    pub fn detach_stencil(&mut self) {
        self.stencil = None;
        self.depth_stencil = None;
    }

    /// Returns the image attached at `point`.
    pub fn get_color_attachment(&self, point: ColorAttachmentPoint)
                                -> Option<ColorAttachment<'a>>
    {
        if point.get_context() != self.context.get_id() {
            return None;
        }

        self.colors.get(point.get_index() as usize).cloned().flatten()
    }

    /// Returns the attachment point `buffer` is associated with, even if nothing is attached
    /// there anymore.
    pub fn get_draw_buffer_mapping(&self, buffer: DrawBuffer) -> Option<ColorAttachmentPoint> {
        if buffer.get_context() != self.context.get_id() {
            return None;
        }

        self.draw_buffers.get(&buffer).cloned()
    }

    /// Returns the depth attachment.
    #[inline]
    pub fn get_depth_attachment(&self) -> Option<DepthAttachment<'a>> {
        self.depth
    }

    /// Returns the stencil attachment.
    #[inline]
    pub fn get_stencil_attachment(&self) -> Option<StencilAttachment<'a>> {
        self.stencil
    }

    /// Returns the depth-stencil attachment.
    #[inline]
    pub fn get_depth_stencil_attachment(&self) -> Option<DepthStencilAttachment<'a>> {
        self.depth_stencil
    }
}
