use glframe::backend::fake::FakeCommand;
use glframe::gl;
use glframe::{BindTarget, BlitFilter, BlitMask, BlitTarget, FramebufferError, Rect};

mod support;

const SOURCE: Rect = Rect { left: 0, bottom: 0, width: 64, height: 32 };
const TARGET: BlitTarget = BlitTarget { left: 10, bottom: 20, width: 128, height: -64 };

fn build_pair(context: &glframe::Context, texture: &glframe::Texture2d)
              -> (glframe::Framebuffer, glframe::Framebuffer)
{
    let a = support::build_framebuffer(context, texture);
    let b = support::build_framebuffer(context, texture);
    context.bind_read_framebuffer(&a).unwrap();
    context.bind_draw_framebuffer(&b).unwrap();
    (a, b)
}

#[test]
fn blit_color() {
    let (context, device) = support::build_context();
    let texture = support::build_color_texture(&context, 1);
    let _pair = build_pair(&context, &texture);

    device.clear_commands();
    context.blit_framebuffer(&SOURCE, &TARGET, BlitMask::color(), BlitFilter::Linear).unwrap();

    assert_eq!(device.commands(), vec![
        FakeCommand::BlitFramebuffer {
            src: [0, 0, 64, 32],
            dst: [10, 20, 138, -44],
            mask: gl::COLOR_BUFFER_BIT,
            filter: gl::LINEAR,
        },
    ]);

    support::assert_no_error(&device);
}

#[test]
fn depth_requires_nearest() {
    let (context, device) = support::build_context();
    let texture = support::build_color_texture(&context, 1);
    let _pair = build_pair(&context, &texture);

    device.clear_commands();

    match context.blit_framebuffer(&SOURCE, &TARGET, BlitMask::depth(), BlitFilter::Linear) {
        Err(FramebufferError::ParameterError(_)) => (),
        a => panic!("{:?}", a),
    }

    match context.blit_framebuffer(&SOURCE, &TARGET, BlitMask::stencil(), BlitFilter::Linear) {
        Err(FramebufferError::ParameterError(_)) => (),
        a => panic!("{:?}", a),
    }

    assert!(device.commands().is_empty());

    context.blit_framebuffer(&SOURCE, &TARGET, BlitMask::depth(), BlitFilter::Nearest).unwrap();
    context.blit_framebuffer(&SOURCE, &TARGET, BlitMask::all(), BlitFilter::Nearest).unwrap();

    support::assert_no_error(&device);
}

#[test]
fn requires_draw_target() {
    let (context, _) = support::build_context();
    let texture = support::build_color_texture(&context, 1);
    let _pair = build_pair(&context, &texture);

    context.unbind_draw_framebuffer();

    match context.blit_framebuffer(&SOURCE, &TARGET, BlitMask::color(), BlitFilter::Nearest) {
        Err(FramebufferError::FramebufferNotBound(BindTarget::Draw)) => (),
        a => panic!("{:?}", a),
    }
}

#[test]
fn requires_read_target() {
    let (context, _) = support::build_context();
    let texture = support::build_color_texture(&context, 1);
    let _pair = build_pair(&context, &texture);

    context.unbind_read_framebuffer();

    match context.blit_framebuffer(&SOURCE, &TARGET, BlitMask::color(), BlitFilter::Nearest) {
        Err(FramebufferError::FramebufferNotBound(BindTarget::Read)) => (),
        a => panic!("{:?}", a),
    }
}

#[test]
fn blit_to_self() {
    let (context, device) = support::build_context();
    let texture = support::build_color_texture(&context, 1);

    let framebuffer = support::build_framebuffer(&context, &texture);
    context.bind_read_framebuffer(&framebuffer).unwrap();

    device.clear_commands();

    match context.blit_framebuffer(&SOURCE, &TARGET, BlitMask::color(), BlitFilter::Nearest) {
        Err(FramebufferError::ParameterError(_)) => (),
        a => panic!("{:?}", a),
    }

    assert!(device.commands().is_empty());
}

#[test]
fn coordinates_out_of_range() {
    let (context, device) = support::build_context();
    let texture = support::build_color_texture(&context, 1);
    let _pair = build_pair(&context, &texture);

    device.clear_commands();

    let wrapping = Rect { left: u32::MAX, bottom: 0, width: 1, height: 10 };
    match context.blit_framebuffer(&wrapping, &TARGET, BlitMask::color(), BlitFilter::Nearest) {
        Err(FramebufferError::ParameterError(_)) => (),
        a => panic!("{:?}", a),
    }

    let too_large = Rect { left: 3_000_000_000, bottom: 0, width: 10, height: 10 };
    match context.blit_framebuffer(&too_large, &TARGET, BlitMask::color(), BlitFilter::Nearest) {
        Err(FramebufferError::ParameterError(_)) => (),
        a => panic!("{:?}", a),
    }

    let far_target = BlitTarget { left: i32::MAX as u32, bottom: 0, width: 1, height: 10 };
    match context.blit_framebuffer(&SOURCE, &far_target, BlitMask::color(), BlitFilter::Nearest) {
        Err(FramebufferError::ParameterError(_)) => (),
        a => panic!("{:?}", a),
    }

    assert!(!device.commands().iter().any(|c| match c {
        FakeCommand::BlitFramebuffer { .. } => true,
        _ => false,
    }));
}
