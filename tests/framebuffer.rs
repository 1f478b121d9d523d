use glframe::backend::fake::{FakeCommand, FakeDevice, FakeImage};
use glframe::gl;
use glframe::{FramebufferError, FramebufferStatus, GlObject};

mod support;

#[test]
fn single_color_texture() {
    let (context, device) = support::build_context();
    let texture = support::build_color_texture(&context, 1);

    let framebuffer = support::build_framebuffer(&context, &texture);

    assert_eq!(framebuffer.get_depth_bits(), 0);
    assert_eq!(framebuffer.get_stencil_bits(), 0);
    assert_eq!(framebuffer.get_context(), context.get_id());
    assert!(!framebuffer.is_deleted());
    assert!(context.is_draw_framebuffer_bound(&framebuffer).unwrap());
    assert_eq!(device.draw_binding(), framebuffer.get_id());

    let fake = device.framebuffer(framebuffer.get_id()).unwrap();
    assert_eq!(fake.attachments.get(&gl::COLOR_ATTACHMENT0),
               Some(&FakeImage::Texture { target: gl::TEXTURE_2D, id: 1, level: 0 }));

    support::assert_no_error(&device);
}

#[test]
fn allocated_framebuffer_is_complete() {
    let (context, device) = support::build_context();
    let texture = support::build_color_texture(&context, 1);

    let _framebuffer = support::build_framebuffer(&context, &texture);
    assert_eq!(context.validate_draw_framebuffer().unwrap(), FramebufferStatus::Complete);

    support::assert_no_error(&device);
}

#[test]
fn depth_and_stencil_bits() {
    let (context, device) = support::build_context();
    let color = support::build_color_texture(&context, 1);
    let depth = support::build_depth_renderbuffer(&context, 2);
    let stencil = support::build_stencil_renderbuffer(&context, 3);

    let mut builder = context.new_framebuffer_builder();
    builder.attach_color_at(context.color_attachment_points()[0], context.draw_buffers()[0],
                            &color).unwrap();
    builder.attach_depth(&depth).unwrap();
    builder.attach_stencil(&stencil).unwrap();

    let framebuffer = context.allocate_framebuffer(builder).unwrap();
    assert_eq!(framebuffer.get_depth_bits(), 24);
    assert_eq!(framebuffer.get_stencil_bits(), 8);

    let fake = device.framebuffer(framebuffer.get_id()).unwrap();
    assert_eq!(fake.attachments.get(&gl::DEPTH_ATTACHMENT), Some(&FakeImage::RenderBuffer(2)));
    assert_eq!(fake.attachments.get(&gl::STENCIL_ATTACHMENT), Some(&FakeImage::RenderBuffer(3)));

    support::assert_no_error(&device);
}

#[test]
fn depth_stencil_bits() {
    let (context, device) = support::build_context();
    let packed = support::build_depth_stencil_renderbuffer(&context, 1);

    let mut builder = context.new_framebuffer_builder();
    builder.attach_depth_stencil(&packed).unwrap();

    let framebuffer = context.allocate_framebuffer(builder).unwrap();
    assert_eq!(framebuffer.get_depth_bits(), 24);
    assert_eq!(framebuffer.get_stencil_bits(), 8);

    let fake = device.framebuffer(framebuffer.get_id()).unwrap();
    assert_eq!(fake.attachments.get(&gl::DEPTH_ATTACHMENT), Some(&FakeImage::RenderBuffer(1)));
    assert_eq!(fake.attachments.get(&gl::STENCIL_ATTACHMENT), Some(&FakeImage::RenderBuffer(1)));

    support::assert_no_error(&device);
}

#[test]
fn attachment_order() {
    let (context, device) = support::build_context();
    let first = support::build_color_texture(&context, 1);
    let second = support::build_color_texture(&context, 2);
    let depth = support::build_depth_renderbuffer(&context, 3);
    let stencil = support::build_stencil_renderbuffer(&context, 4);

    let points = context.color_attachment_points();
    let buffers = context.draw_buffers();

    let mut builder = context.new_framebuffer_builder();
    builder.attach_color_at(points[3], buffers[0], &second).unwrap();
    builder.attach_color_at(points[1], buffers[1], &first).unwrap();
    builder.attach_stencil(&stencil).unwrap();
    builder.attach_depth(&depth).unwrap();

    device.clear_commands();
    let framebuffer = context.allocate_framebuffer(builder).unwrap();
    let id = framebuffer.get_id();

    let attachments: Vec<gl::types::GLenum> = device.commands().into_iter()
        .filter_map(|c| match c {
            FakeCommand::FramebufferTexture2D { attachment, .. } => Some(attachment),
            FakeCommand::FramebufferRenderbuffer { attachment, .. } => Some(attachment),
            _ => None,
        })
        .collect();

    assert_eq!(attachments, vec![gl::DEPTH_ATTACHMENT, gl::STENCIL_ATTACHMENT,
                                 gl::COLOR_ATTACHMENT0 + 1, gl::COLOR_ATTACHMENT0 + 3]);

    let commands = device.commands();
    assert_eq!(commands[0], FakeCommand::GenFramebuffer(id));
    assert_eq!(commands[1], FakeCommand::BindFramebuffer { target: gl::DRAW_FRAMEBUFFER, id });
    assert_eq!(commands.last(), Some(&FakeCommand::CheckFramebufferStatus(gl::DRAW_FRAMEBUFFER)));

    support::assert_no_error(&device);
}

#[test]
fn draw_buffers_are_programmed_for_every_slot() {
    let (context, device) = support::build_context();
    let first = support::build_color_texture(&context, 1);
    let second = support::build_color_texture(&context, 2);

    let points = context.color_attachment_points();
    let buffers = context.draw_buffers();

    let mut builder = context.new_framebuffer_builder();
    builder.attach_color_at(points[2], buffers[0], &first).unwrap();
    builder.attach_color_at(points[0], buffers[3], &second).unwrap();

    let framebuffer = context.allocate_framebuffer(builder).unwrap();

    let expected = [
        gl::COLOR_ATTACHMENT0 + 2, gl::NONE, gl::NONE, gl::COLOR_ATTACHMENT0,
        gl::NONE, gl::NONE, gl::NONE, gl::NONE,
    ];

    let fake = device.framebuffer(framebuffer.get_id()).unwrap();
    assert_eq!(&fake.draw_buffers[..], &expected[..]);

    assert_eq!(framebuffer.get_draw_buffer_target(buffers[0]), Some(2));
    assert_eq!(framebuffer.get_draw_buffer_target(buffers[1]), None);
    assert_eq!(framebuffer.get_draw_buffer_target(buffers[3]), Some(0));

    support::assert_no_error(&device);
}

#[test]
fn dangling_draw_buffer_is_ignored() {
    let (context, device) = support::build_context();
    let color = support::build_color_texture(&context, 1);
    let other = support::build_color_texture(&context, 2);

    let points = context.color_attachment_points();
    let buffers = context.draw_buffers();

    let mut builder = context.new_framebuffer_builder();
    builder.attach_color_at(points[0], buffers[0], &color).unwrap();
    builder.attach_color_at(points[1], buffers[1], &other).unwrap();
    builder.detach_color_at(points[0]).unwrap();

    let framebuffer = context.allocate_framebuffer(builder).unwrap();
    assert_eq!(framebuffer.get_draw_buffer_target(buffers[0]), None);
    assert_eq!(framebuffer.get_draw_buffer_target(buffers[1]), Some(1));

    let fake = device.framebuffer(framebuffer.get_id()).unwrap();
    assert_eq!(fake.draw_buffers[0], gl::NONE);
    assert!(fake.attachments.get(&gl::COLOR_ATTACHMENT0).is_none());

    support::assert_no_error(&device);
}

#[test]
fn cube_face_attachment() {
    let (context, device) = support::build_context();
    let cubemap = support::build_color_cubemap(&context, 7);

    let mut builder = context.new_framebuffer_builder();
    builder.attach_color_at(context.color_attachment_points()[0], context.draw_buffers()[0],
                            (&cubemap, support::CUBE_LAYERS[4])).unwrap();

    let framebuffer = context.allocate_framebuffer(builder).unwrap();

    let fake = device.framebuffer(framebuffer.get_id()).unwrap();
    assert_eq!(fake.attachments.get(&gl::COLOR_ATTACHMENT0),
               Some(&FakeImage::Texture { target: gl::TEXTURE_CUBE_MAP_POSITIVE_Z, id: 7,
                                          level: 0 }));

    support::assert_no_error(&device);
}

#[test]
fn empty_builder_is_incomplete() {
    let (context, device) = support::build_context();

    let builder = context.new_framebuffer_builder();

    match context.allocate_framebuffer(builder) {
        Err(FramebufferError::FramebufferInvalid(FramebufferStatus::MissingImageAttachment)) => (),
        a => panic!("{:?}", a),
    }

    assert!(!context.is_any_draw_framebuffer_bound());
    assert_eq!(device.draw_binding(), 0);
    assert_eq!(device.live_framebuffers(), 0);

    support::assert_no_error(&device);
}

#[test]
fn failed_allocation_rolls_back() {
    let (context, device) = support::build_context();
    let texture = support::build_color_texture(&context, 1);

    device.force_status(Some(gl::FRAMEBUFFER_UNSUPPORTED));

    let mut builder = context.new_framebuffer_builder();
    builder.attach_color_at(context.color_attachment_points()[0], context.draw_buffers()[0],
                            &texture).unwrap();

    match context.allocate_framebuffer(builder) {
        Err(FramebufferError::FramebufferInvalid(FramebufferStatus::Unsupported)) => (),
        a => panic!("{:?}", a),
    }

    assert_eq!(context.get_state().draw_framebuffer, 0);
    assert_eq!(device.draw_binding(), 0);
    assert_eq!(device.live_framebuffers(), 0);

    // a later allocation isn't affected
    device.force_status(None);
    let framebuffer = support::build_framebuffer(&context, &texture);
    assert!(context.is_draw_framebuffer_bound(&framebuffer).unwrap());

    support::assert_no_error(&device);
}

#[test]
fn failed_allocation_restores_default_even_if_another_was_bound() {
    let (context, device) = support::build_context();
    let texture = support::build_color_texture(&context, 1);

    let first = support::build_framebuffer(&context, &texture);
    assert!(context.is_draw_framebuffer_bound(&first).unwrap());

    device.force_status(Some(gl::FRAMEBUFFER_UNDEFINED));

    let mut builder = context.new_framebuffer_builder();
    builder.attach_color_at(context.color_attachment_points()[0], context.draw_buffers()[0],
                            &texture).unwrap();

    match context.allocate_framebuffer(builder) {
        Err(FramebufferError::FramebufferInvalid(FramebufferStatus::Unknown)) => (),
        a => panic!("{:?}", a),
    }

    assert!(!context.is_draw_framebuffer_bound(&first).unwrap());
    assert!(!context.is_any_draw_framebuffer_bound());
    assert_eq!(device.live_framebuffers(), 1);

    support::assert_no_error(&device);
}

#[test]
fn texture_deleted_after_attach() {
    let (context, device) = support::build_context();
    let texture = support::build_color_texture(&context, 1);

    let mut builder = context.new_framebuffer_builder();
    builder.attach_color_at(context.color_attachment_points()[0], context.draw_buffers()[0],
                            &texture).unwrap();

    texture.mark_deleted();

    device.clear_commands();
    match context.allocate_framebuffer(builder) {
        Err(FramebufferError::ResourceDeleted(_)) => (),
        a => panic!("{:?}", a),
    }

    // nothing reached the device
    assert!(device.commands().is_empty());
}

#[test]
fn delete_framebuffer() {
    let (context, device) = support::build_context();
    let texture = support::build_color_texture(&context, 1);

    let framebuffer = support::build_framebuffer(&context, &texture);
    context.bind_read_framebuffer(&framebuffer).unwrap();

    context.delete_framebuffer(&framebuffer).unwrap();

    assert!(framebuffer.is_deleted());
    assert!(!context.is_any_draw_framebuffer_bound());
    assert!(!context.is_any_read_framebuffer_bound());
    assert_eq!(device.live_framebuffers(), 0);
    assert_eq!(device.draw_binding(), 0);
    assert_eq!(device.read_binding(), 0);

    support::assert_no_error(&device);
}

#[test]
fn deleted_framebuffer_cannot_be_used() {
    let (context, _) = support::build_context();
    let texture = support::build_color_texture(&context, 1);

    let framebuffer = support::build_framebuffer(&context, &texture);
    context.delete_framebuffer(&framebuffer).unwrap();

    match context.bind_draw_framebuffer(&framebuffer) {
        Err(FramebufferError::ResourceDeleted(_)) => (),
        a => panic!("{:?}", a),
    }

    match context.is_draw_framebuffer_bound(&framebuffer) {
        Err(FramebufferError::ResourceDeleted(_)) => (),
        a => panic!("{:?}", a),
    }

    match context.delete_framebuffer(&framebuffer) {
        Err(FramebufferError::ResourceDeleted(_)) => (),
        a => panic!("{:?}", a),
    }
}

#[test]
fn errors_are_drained_when_checking() {
    support::init_logger();

    let device = FakeDevice::new("3.3.0 Fake");
    let options = glframe::ContextOptions { check_errors: true };
    let context = glframe::Context::new(device.clone(), options).unwrap();

    device.push_error(gl::INVALID_VALUE);
    context.unbind_draw_framebuffer();

    support::assert_no_error(&device);
}
