/*!
Typed construction and validation of OpenGL framebuffer objects.

Glframe sits between your rendering code and the driver. You hand it textures and renderbuffers
that some other part of your program created, and it assembles them into framebuffer objects:
formats are checked when you attach an image, the device is asked for completeness when the
framebuffer is allocated, and the draw and read bindings are tracked per context.

# Overview

Everything starts with a `Context`, built on top of a `Device`:

```
use glframe::backend::fake::FakeDevice;
use glframe::{Context, ContextOptions};

let device = FakeDevice::new("3.3.0 Fake");
let context = Context::new(device, ContextOptions::default()).unwrap();
assert!(context.color_attachment_points().len() >= 8);
```

The device is usually a `backend::GlDevice` wrapping your windowing library. The software
`backend::fake::FakeDevice` is available for tests.

Then:

 - Import the textures and renderbuffers you want to render to with `Texture2d::from_id`,
   `TextureCube::from_id` or `RenderBuffer::from_id`.
 - Call `Context::new_framebuffer_builder` and attach your images. Each `attach_*` method
   checks the context and the format immediately.
 - Call `Context::allocate_framebuffer`. You either get a complete `Framebuffer`, bound for
   drawing, or a `FramebufferError::FramebufferInvalid` with the status reported by the device.

```
use glframe::backend::fake::FakeDevice;
use glframe::texture::{Texture2d, UncompressedFloatFormat};
use glframe::{Context, ContextOptions};

let context = Context::new(FakeDevice::new("3.3.0 Fake"), ContextOptions::default()).unwrap();
let texture = unsafe {
    Texture2d::from_id(&context, 1, UncompressedFloatFormat::U8U8U8U8.to_texture_format(),
                       256, 256)
};

let point = context.color_attachment_points()[0];
let buffer = context.draw_buffers()[0];

let mut builder = context.new_framebuffer_builder();
builder.attach_color_at(point, buffer, &texture).unwrap();

let framebuffer = context.allocate_framebuffer(builder).unwrap();
assert!(context.is_draw_framebuffer_bound(&framebuffer).unwrap());
```

# Binding

Glframe never binds a framebuffer behind your back, except while allocating. Operations that
need a bound framebuffer, like `validate_draw_framebuffer` or `blit_framebuffer`, fail with
`FramebufferNotBound` instead of binding one.

*/
#![warn(missing_docs)]

pub use crate::context::{Capabilities, Context, ContextId, ContextOptions, ExtensionsList};
pub use crate::context::{GlState, ShareGroupId};
pub use crate::framebuffer::{BindTarget, Framebuffer, FramebufferBuilder, FramebufferError};
pub use crate::framebuffer::{FramebufferStatus, RenderBuffer};
pub use crate::ops::{BlitFilter, BlitMask};
pub use crate::texture::{CubeLayer, Texture2d, TextureCube};
pub use crate::version::{Api, Version};

pub mod backend;
pub mod framebuffer;
pub mod texture;

mod context;
mod fbo;
mod image_format;
mod ops;
mod version;

/// The generated OpenGL bindings.
#[allow(missing_docs, clippy::all)]
pub mod gl {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

/// Trait for objects that are OpenGL objects.
pub trait GlObject {
    /// The type of identifier for this object.
    type Id;

    /// Returns the id of the object.
    fn get_id(&self) -> Self::Id;
}

/// Internal trait for enums that can be turned into GLenum.
trait ToGlEnum {
    /// Returns the value.
    fn to_glenum(&self) -> gl::types::GLenum;
}

/// Trait for objects that describe the capabilities of an OpenGL backend.
pub trait CapabilitiesSource {
    /// Returns the version of the backend.
    fn get_version(&self) -> &Version;

    /// Returns the list of extensions that are supported.
    fn get_extensions(&self) -> &ExtensionsList;

    /// Returns the capabilities of the backend.
    fn get_capabilities(&self) -> &Capabilities;
}

/// Area of a surface in pixels.
///
/// In the OpenGL ecosystem, the (0,0) coordinate is at the bottom-left hand corner of the images.
/// The area covers the pixels from `left` included to `left + width` excluded, and the same
/// vertically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    /// Number of pixels between the left border of the surface and the left border of
    /// the rectangle.
    pub left: u32,
    /// Number of pixels between the bottom border of the surface and the bottom border
    /// of the rectangle.
    pub bottom: u32,
    /// Width of the area in pixels.
    pub width: u32,
    /// Height of the area in pixels.
    pub height: u32,
}

/// Area of a surface in pixels. Similar to a `Rect` except that dimensions can be negative.
///
/// A negative width or height mirrors the image during a blit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlitTarget {
    /// Number of pixels between the left border of the surface and the left border of
    /// the rectangle.
    pub left: u32,
    /// Number of pixels between the bottom border of the surface and the bottom border
    /// of the rectangle.
    pub bottom: u32,
    /// Width of the area in pixels. Can be negative.
    pub width: i32,
    /// Height of the area in pixels. Can be negative.
    pub height: i32,
}
