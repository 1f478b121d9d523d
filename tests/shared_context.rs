use std::cmp::Ordering;

use glframe::backend::fake::FakeDevice;
use glframe::{Context, ContextOptions, FramebufferError};

mod support;

fn build_shared(other: &Context) -> (Context, FakeDevice) {
    let device = FakeDevice::new("3.3.0 Fake");
    let options = ContextOptions { check_errors: false };
    let context = Context::new_shared(device.clone(), options, other).unwrap();
    (context, device)
}

#[test]
fn share_group_is_joined() {
    let (first, _) = support::build_context();
    let (second, _) = build_shared(&first);

    assert!(first.get_id() != second.get_id());
    assert_eq!(first.get_share_group(), second.get_share_group());
}

#[test]
fn textures_are_shared() {
    let (first, _) = support::build_context();
    let (second, device) = build_shared(&first);

    let texture = support::build_color_texture(&first, 1);
    let framebuffer = support::build_framebuffer(&second, &texture);

    assert_eq!(framebuffer.get_context(), second.get_id());
    support::assert_no_error(&device);
}

#[test]
fn textures_from_other_groups_are_rejected() {
    let (first, _) = support::build_context();
    let (unrelated, _) = support::build_context();

    let texture = support::build_color_texture(&unrelated, 1);
    let depth = support::build_depth_renderbuffer(&unrelated, 2);

    let mut builder = first.new_framebuffer_builder();

    match builder.attach_color_at(first.color_attachment_points()[0], first.draw_buffers()[0],
                                  &texture)
    {
        Err(FramebufferError::WrongContext(_)) => (),
        a => panic!("{:?}", a),
    }

    match builder.attach_depth(&depth) {
        Err(FramebufferError::WrongContext(_)) => (),
        a => panic!("{:?}", a),
    }
}

#[test]
fn points_and_buffers_are_not_shared() {
    let (first, _) = support::build_context();
    let (second, _) = build_shared(&first);

    let texture = support::build_color_texture(&first, 1);

    let mut builder = first.new_framebuffer_builder();

    match builder.attach_color_at(second.color_attachment_points()[0], first.draw_buffers()[0],
                                  &texture)
    {
        Err(FramebufferError::WrongContext(_)) => (),
        a => panic!("{:?}", a),
    }

    match builder.attach_color_at(first.color_attachment_points()[0], second.draw_buffers()[0],
                                  &texture)
    {
        Err(FramebufferError::WrongContext(_)) => (),
        a => panic!("{:?}", a),
    }

    match builder.detach_color_at(second.color_attachment_points()[0]) {
        Err(FramebufferError::WrongContext(_)) => (),
        a => panic!("{:?}", a),
    }
}

#[test]
fn builders_are_not_shared() {
    let (first, _) = support::build_context();
    let (second, device) = build_shared(&first);

    let texture = support::build_color_texture(&first, 1);

    let mut builder = first.new_framebuffer_builder();
    builder.attach_color_at(first.color_attachment_points()[0], first.draw_buffers()[0],
                            &texture).unwrap();

    match second.allocate_framebuffer(builder) {
        Err(FramebufferError::WrongContext(_)) => (),
        a => panic!("{:?}", a),
    }

    assert!(device.commands().is_empty());
}

#[test]
fn framebuffers_are_not_shared() {
    let (first, _) = support::build_context();
    let (second, _) = build_shared(&first);

    let texture = support::build_color_texture(&first, 1);
    let framebuffer = support::build_framebuffer(&first, &texture);

    match second.bind_draw_framebuffer(&framebuffer) {
        Err(FramebufferError::WrongContext(_)) => (),
        a => panic!("{:?}", a),
    }

    match second.is_draw_framebuffer_bound(&framebuffer) {
        Err(FramebufferError::WrongContext(_)) => (),
        a => panic!("{:?}", a),
    }

    match second.delete_framebuffer(&framebuffer) {
        Err(FramebufferError::WrongContext(_)) => (),
        a => panic!("{:?}", a),
    }

    assert!(!framebuffer.is_deleted());
    assert_eq!(framebuffer.get_draw_buffer_target(second.draw_buffers()[0]), None);
}

#[test]
fn binding_state_is_per_context() {
    let (first, _) = support::build_context();
    let (second, _) = build_shared(&first);

    let texture = support::build_color_texture(&first, 1);
    let _framebuffer = support::build_framebuffer(&first, &texture);

    assert!(first.is_any_draw_framebuffer_bound());
    assert!(!second.is_any_draw_framebuffer_bound());
}

#[test]
fn draw_buffers_of_other_contexts_are_distinct() {
    let (first, _) = support::build_context();
    let (second, _) = build_shared(&first);

    let ours = first.draw_buffers()[0];
    let theirs = second.draw_buffers()[0];

    assert_eq!(ours.get_index(), theirs.get_index());
    assert!(ours != theirs);
    assert!(ours.cmp(&theirs) != Ordering::Equal);
    assert!(ours < first.draw_buffers()[1]);

    let texture = support::build_color_texture(&first, 1);

    let mut builder = first.new_framebuffer_builder();
    builder.attach_color_at(first.color_attachment_points()[0], ours, &texture).unwrap();

    assert_eq!(builder.get_draw_buffer_mapping(ours), Some(first.color_attachment_points()[0]));
    assert_eq!(builder.get_draw_buffer_mapping(theirs), None);
}
