/*!
Contains everything related to the interface between glframe and OpenGL framebuffer objects.

Allocation replays the content of a `FramebufferBuilder` in a fixed order: depth, stencil,
depth-stencil, then the color attachments in ascending order. The draw buffers are then
programmed for every draw buffer of the context, and the device is asked whether the result
is complete.

If it isn't, the framebuffer object is deleted and the draw binding reverts to the default
framebuffer, so that a failed allocation leaves nothing behind.

*/
use log::{debug, trace, warn};
use smallvec::SmallVec;

use crate::context::{CommandContext, Context};
use crate::framebuffer::attachment::{Image, RawAttachment};
use crate::framebuffer::{BindTarget, Framebuffer, FramebufferBuilder, FramebufferError};
use crate::framebuffer::FramebufferStatus;
use crate::gl;
use crate::ToGlEnum;

pub(crate) fn allocate(context: &Context, builder: FramebufferBuilder<'_>)
                       -> Result<Framebuffer, FramebufferError>
{
    context.check_unshared(builder.get_context_id(), "framebuffer builder")?;

    if builder.depth.is_some() && builder.depth_stencil.is_some() {
        return Err(FramebufferError::ParameterError(
            "A framebuffer can't have both a depth and a depth-stencil attachment".to_owned()));
    }

    if builder.stencil.is_some() && builder.depth_stencil.is_some() {
        return Err(FramebufferError::ParameterError(
            "A framebuffer can't have both a stencil and a depth-stencil attachment".to_owned()));
    }

    // images may have been deleted since they were attached
    let depth = builder.depth.map(|a| a.image());
    let stencil = builder.stencil.map(|a| a.image());
    let depth_stencil = builder.depth_stencil.map(|a| a.image());
    let colors: SmallVec<[Option<Image<'_>>; 8]> =
        builder.colors.iter().map(|c| c.map(|a| a.image())).collect();

    for image in depth.iter().chain(stencil.iter()).chain(depth_stencil.iter())
                      .chain(colors.iter().flatten())
    {
        image.check_alive(context)?;
    }

    let mut ctxt = context.make_command_context();

    let id = ctxt.device.gen_framebuffer();
    debug!("[{}] allocating framebuffer {}", ctxt.id, id);
    bind_framebuffer(&mut ctxt, id, BindTarget::Draw);

    let mut depth_bits = 0;
    let mut stencil_bits = 0;

    if let Some(image) = depth {
        debug!("[{}] [{}] attach depth {:?}", ctxt.id, id, image.format());
        attach(&ctxt, gl::DEPTH_ATTACHMENT, image.raw());
        depth_bits = image.format().get_depth_bits();
    }

    if let Some(image) = stencil {
        debug!("[{}] [{}] attach stencil {:?}", ctxt.id, id, image.format());
        attach(&ctxt, gl::STENCIL_ATTACHMENT, image.raw());
        stencil_bits = image.format().get_stencil_bits();
    }

    if let Some(image) = depth_stencil {
        debug!("[{}] [{}] attach depth-stencil {:?}", ctxt.id, id, image.format());
        attach(&ctxt, gl::DEPTH_STENCIL_ATTACHMENT, image.raw());
        depth_bits = image.format().get_depth_bits();
        stencil_bits = image.format().get_stencil_bits();
    }

    for (point, image) in context.color_attachment_points().iter().zip(colors.iter()) {
        if let Some(image) = image {
            debug!("[{}] [{}] attach color {} {:?}", ctxt.id, id, point.get_index(),
                   image.format());
            attach(&ctxt, point.to_glenum(), image.raw());
        }
    }

    let mut raw_buffers: SmallVec<[gl::types::GLenum; 8]> = SmallVec::new();
    let mut targets: SmallVec<[Option<u32>; 8]> = SmallVec::new();

    for buffer in context.draw_buffers() {
        let point = builder.draw_buffers.get(buffer)
                           .filter(|p| colors[p.get_index() as usize].is_some());

        match point {
            Some(point) => {
                debug!("[{}] [{}] draw buffer {} -> color {}", ctxt.id, id,
                       buffer.get_index(), point.get_index());
                raw_buffers.push(point.to_glenum());
                targets.push(Some(point.get_index()));
            },
            None => {
                debug!("[{}] [{}] draw buffer {} -> none", ctxt.id, id, buffer.get_index());
                raw_buffers.push(gl::NONE);
                targets.push(None);
            },
        }
    }

    ctxt.device.draw_buffers(&raw_buffers);

    let status = FramebufferStatus::from_glenum(
        ctxt.device.check_framebuffer_status(gl::DRAW_FRAMEBUFFER));

    if status != FramebufferStatus::Complete {
        warn!("[{}] framebuffer {} rejected by the device: {}", ctxt.id, id, status);
        bind_framebuffer(&mut ctxt, 0, BindTarget::Draw);
        ctxt.device.delete_framebuffer(id);
        return Err(FramebufferError::FramebufferInvalid(status));
    }

    debug!("[{}] framebuffer {} complete, depth bits {}, stencil bits {}", ctxt.id, id,
           depth_bits, stencil_bits);

    Ok(Framebuffer::new(id, context.get_id(), depth_bits, stencil_bits, targets))
}

/// Unbinds a framebuffer object from both targets, then deletes it.
pub(crate) fn destroy(ctxt: &mut CommandContext<'_>, fbo_id: gl::types::GLuint) {
    if ctxt.state.draw_framebuffer == fbo_id {
        bind_framebuffer(ctxt, 0, BindTarget::Draw);
    }

    if ctxt.state.read_framebuffer == fbo_id {
        bind_framebuffer(ctxt, 0, BindTarget::Read);
    }

    debug!("[{}] deleting framebuffer {}", ctxt.id, fbo_id);
    ctxt.device.delete_framebuffer(fbo_id);
}

/// Binds a framebuffer object to one of the targets. Does nothing if it is already bound.
///
/// `0` is the default framebuffer.
pub(crate) fn bind_framebuffer(ctxt: &mut CommandContext<'_>, fbo_id: gl::types::GLuint,
                               target: BindTarget)
{
    let current = match target {
        BindTarget::Draw => ctxt.state.draw_framebuffer,
        BindTarget::Read => ctxt.state.read_framebuffer,
    };

    if current == fbo_id {
        trace!("[{}] {} framebuffer {} already bound", ctxt.id, target, fbo_id);
        return;
    }

    trace!("[{}] bind {} framebuffer {} -> {}", ctxt.id, target, current, fbo_id);
    ctxt.device.bind_framebuffer(target.to_glenum(), fbo_id);

    match target {
        BindTarget::Draw => ctxt.state.draw_framebuffer = fbo_id,
        BindTarget::Read => ctxt.state.read_framebuffer = fbo_id,
    }
}

/// Attaches an image to the framebuffer currently bound for drawing.
fn attach(ctxt: &CommandContext<'_>, slot: gl::types::GLenum, attachment: RawAttachment) {
    match attachment {
        RawAttachment::Texture { tex_target, texture } => {
            ctxt.device.framebuffer_texture_2d(gl::DRAW_FRAMEBUFFER, slot, tex_target,
                                               texture, 0);
        },
        RawAttachment::RenderBuffer(id) => {
            ctxt.device.framebuffer_renderbuffer(gl::DRAW_FRAMEBUFFER, slot, id);
        },
    }
}
