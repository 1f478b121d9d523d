use std::ffi::CStr;
use std::os::raw::c_char;

use crate::backend::{Backend, Device};
use crate::gl;

/// A `Device` that forwards every command to a real OpenGL implementation.
pub struct GlDevice<B> {
    gl: gl::Gl,
    backend: B,
    check_current_context: bool,
}

impl<B> GlDevice<B> where B: Backend {
    /// Loads the OpenGL functions from the backend.
    ///
    /// If `check_current_context` is true, the backend is made current before each command
    /// whenever `is_current` returns false.
    ///
    /// # Safety
    ///
    /// The backend must stay valid as long as the device is alive, and the OpenGL context
    /// must only be used from the current thread.
    pub unsafe fn new(backend: B, check_current_context: bool) -> GlDevice<B> {
        backend.make_current();
        let gl = gl::Gl::load_with(|symbol| backend.get_proc_address(symbol) as *const _);

        GlDevice {
            gl,
            backend,
            check_current_context,
        }
    }

    /// Returns the backend this device was created with.
    #[inline]
    pub fn get_backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    fn make_current(&self) {
        if self.check_current_context && !self.backend.is_current() {
            unsafe { self.backend.make_current() };
        }
    }
}

unsafe fn string_from_ptr(ptr: *const gl::types::GLubyte) -> Option<String> {
    if ptr.is_null() {
        return None;
    }

    Some(CStr::from_ptr(ptr as *const c_char).to_string_lossy().into_owned())
}

impl<B> Device for GlDevice<B> where B: Backend {
    fn get_string(&self, name: gl::types::GLenum) -> Option<String> {
        self.make_current();
        unsafe { string_from_ptr(self.gl.GetString(name)) }
    }

    fn get_string_i(&self, name: gl::types::GLenum, index: gl::types::GLuint) -> Option<String> {
        self.make_current();
        unsafe { string_from_ptr(self.gl.GetStringi(name, index)) }
    }

    fn get_integer(&self, pname: gl::types::GLenum) -> gl::types::GLint {
        self.make_current();
        let mut value = 0;
        unsafe { self.gl.GetIntegerv(pname, &mut value) };
        value
    }

    fn gen_framebuffer(&self) -> gl::types::GLuint {
        self.make_current();
        let mut id = 0;
        unsafe { self.gl.GenFramebuffers(1, &mut id) };
        id
    }

    fn delete_framebuffer(&self, id: gl::types::GLuint) {
        self.make_current();
        unsafe { self.gl.DeleteFramebuffers(1, [id].as_ptr()) };
    }

    fn bind_framebuffer(&self, target: gl::types::GLenum, id: gl::types::GLuint) {
        self.make_current();
        unsafe { self.gl.BindFramebuffer(target, id) };
    }

    fn framebuffer_texture_2d(&self, target: gl::types::GLenum, attachment: gl::types::GLenum,
                              tex_target: gl::types::GLenum, texture: gl::types::GLuint,
                              level: gl::types::GLint)
    {
        self.make_current();
        unsafe { self.gl.FramebufferTexture2D(target, attachment, tex_target, texture, level) };
    }

    fn framebuffer_renderbuffer(&self, target: gl::types::GLenum,
                                attachment: gl::types::GLenum,
                                renderbuffer: gl::types::GLuint)
    {
        self.make_current();
        unsafe {
            self.gl.FramebufferRenderbuffer(target, attachment, gl::RENDERBUFFER, renderbuffer)
        };
    }

    fn draw_buffers(&self, buffers: &[gl::types::GLenum]) {
        self.make_current();
        unsafe {
            self.gl.DrawBuffers(buffers.len() as gl::types::GLsizei, buffers.as_ptr())
        };
    }

    fn check_framebuffer_status(&self, target: gl::types::GLenum) -> gl::types::GLenum {
        self.make_current();
        unsafe { self.gl.CheckFramebufferStatus(target) }
    }

    fn blit_framebuffer(&self, src: [gl::types::GLint; 4], dst: [gl::types::GLint; 4],
                        mask: gl::types::GLbitfield, filter: gl::types::GLenum)
    {
        self.make_current();
        unsafe {
            self.gl.BlitFramebuffer(src[0], src[1], src[2], src[3],
                                    dst[0], dst[1], dst[2], dst[3], mask, filter)
        };
    }

    fn get_error(&self) -> gl::types::GLenum {
        self.make_current();
        unsafe { self.gl.GetError() }
    }
}
