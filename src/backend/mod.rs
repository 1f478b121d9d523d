/*!

The interface between glframe and the OpenGL implementation.

A `Context` never calls OpenGL directly. Every command goes through the `Device` trait, which
is implemented by:

 - `GlDevice`, which loads the real function pointers through a `Backend`.
 - `fake::FakeDevice`, a software device that records commands and simulates framebuffer
   completeness. It's what the test suite runs against.

*/
use std::ops::Deref;
use std::os::raw::c_void;
use std::rc::Rc;

use crate::gl;

pub use self::gl_device::GlDevice;

pub mod fake;
mod gl_device;

/// Trait for types that can be used as a backend for a `GlDevice`.
///
/// This is the windowing side of the driver: it knows how to find function pointers and
/// how to make the OpenGL context current.
pub trait Backend {
    /// Returns the address of an OpenGL function.
    ///
    /// Must be called in the same thread and after the backend has been made current
    /// with `make_current`.
    unsafe fn get_proc_address(&self, symbol: &str) -> *const c_void;

    /// Returns true if the OpenGL context is the current one in the thread.
    fn is_current(&self) -> bool;

    /// Makes the OpenGL context the current context in the current thread.
    unsafe fn make_current(&self);
}

impl<T> Backend for Rc<T> where T: Backend {
    unsafe fn get_proc_address(&self, symbol: &str) -> *const c_void {
        self.deref().get_proc_address(symbol)
    }

    fn is_current(&self) -> bool {
        self.deref().is_current()
    }

    unsafe fn make_current(&self) {
        self.deref().make_current();
    }
}

/// The raw commands a `Context` needs from the device.
///
/// Implementations don't validate anything. Targets and attachments are passed as the
/// OpenGL enums (`gl::DRAW_FRAMEBUFFER`, `gl::COLOR_ATTACHMENT0 + n`, ...).
pub trait Device {
    /// `glGetString`. Returns `None` if the driver returned a null pointer.
    fn get_string(&self, name: gl::types::GLenum) -> Option<String>;

    /// `glGetStringi`.
    fn get_string_i(&self, name: gl::types::GLenum, index: gl::types::GLuint) -> Option<String>;

    /// `glGetIntegerv` for a single value.
    fn get_integer(&self, pname: gl::types::GLenum) -> gl::types::GLint;

    /// `glGenFramebuffers` for a single name.
    fn gen_framebuffer(&self) -> gl::types::GLuint;

    /// `glDeleteFramebuffers` for a single name.
    fn delete_framebuffer(&self, id: gl::types::GLuint);

    /// `glBindFramebuffer`.
    fn bind_framebuffer(&self, target: gl::types::GLenum, id: gl::types::GLuint);

    /// `glFramebufferTexture2D`.
    fn framebuffer_texture_2d(&self, target: gl::types::GLenum, attachment: gl::types::GLenum,
                              tex_target: gl::types::GLenum, texture: gl::types::GLuint,
                              level: gl::types::GLint);

    /// `glFramebufferRenderbuffer`.
    fn framebuffer_renderbuffer(&self, target: gl::types::GLenum,
                                attachment: gl::types::GLenum,
                                renderbuffer: gl::types::GLuint);

    /// `glDrawBuffers` on the framebuffer currently bound for drawing.
    fn draw_buffers(&self, buffers: &[gl::types::GLenum]);

    /// `glCheckFramebufferStatus`.
    fn check_framebuffer_status(&self, target: gl::types::GLenum) -> gl::types::GLenum;

    /// `glBlitFramebuffer`. Rectangles are `[x0, y0, x1, y1]`.
    fn blit_framebuffer(&self, src: [gl::types::GLint; 4], dst: [gl::types::GLint; 4],
                        mask: gl::types::GLbitfield, filter: gl::types::GLenum);

    /// `glGetError`.
    fn get_error(&self) -> gl::types::GLenum;
}
