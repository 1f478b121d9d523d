/*!

A software `Device`.

The fake device keeps framebuffer objects in memory and answers `glCheckFramebufferStatus`
with a simplified version of the completeness rules:

 - The default framebuffer is always complete.
 - A framebuffer without any image attached is `GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT`.
 - A draw buffer that points to an empty color attachment is
   `GL_FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER`.
 - Everything else is complete, unless a status was forced with `force_status`.

Every command is recorded and can be inspected with `commands`. Cloning a `FakeDevice` gives
another handle to the same device, so a test can keep one clone while the `Context` owns
the other.

```
use glframe::backend::fake::FakeDevice;

let device = FakeDevice::new("OpenGL ES 3.0 Fake")
    .with_extensions(&["GL_EXT_color_buffer_float"])
    .with_max_color_attachments(4);
```

*/
use std::cell::RefCell;
use std::rc::Rc;

use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::backend::Device;
use crate::gl;

/// An image attached to a fake framebuffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FakeImage {
    /// A face or level of a texture.
    Texture {
        /// `GL_TEXTURE_2D` or one of the cube map faces.
        target: gl::types::GLenum,
        /// Name of the texture.
        id: gl::types::GLuint,
        /// Mipmap level.
        level: gl::types::GLint,
    },

    /// A renderbuffer.
    RenderBuffer(gl::types::GLuint),
}

/// State of a framebuffer object stored in the fake device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeFramebuffer {
    /// Attached images, indexed by attachment enum.
    ///
    /// Attaching to `GL_DEPTH_STENCIL_ATTACHMENT` fills both the depth and the stencil entries.
    pub attachments: FnvHashMap<gl::types::GLenum, FakeImage>,

    /// Last value passed to `glDrawBuffers`.
    pub draw_buffers: SmallVec<[gl::types::GLenum; 8]>,
}

/// A command received by the fake device.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum FakeCommand {
    GenFramebuffer(gl::types::GLuint),
    DeleteFramebuffer(gl::types::GLuint),
    BindFramebuffer { target: gl::types::GLenum, id: gl::types::GLuint },
    FramebufferTexture2D {
        target: gl::types::GLenum,
        attachment: gl::types::GLenum,
        tex_target: gl::types::GLenum,
        texture: gl::types::GLuint,
        level: gl::types::GLint,
    },
    FramebufferRenderbuffer {
        target: gl::types::GLenum,
        attachment: gl::types::GLenum,
        renderbuffer: gl::types::GLuint,
    },
    DrawBuffers(Vec<gl::types::GLenum>),
    CheckFramebufferStatus(gl::types::GLenum),
    BlitFramebuffer {
        src: [gl::types::GLint; 4],
        dst: [gl::types::GLint; 4],
        mask: gl::types::GLbitfield,
        filter: gl::types::GLenum,
    },
}

struct FakeState {
    version: String,
    extensions: Vec<String>,
    max_color_attachments: gl::types::GLint,
    max_draw_buffers: gl::types::GLint,
    forced_status: Option<gl::types::GLenum>,

    next_name: gl::types::GLuint,
    framebuffers: FnvHashMap<gl::types::GLuint, FakeFramebuffer>,
    draw_framebuffer: gl::types::GLuint,
    read_framebuffer: gl::types::GLuint,

    errors: Vec<gl::types::GLenum>,
    commands: Vec<FakeCommand>,
}

impl FakeState {
    fn bound(&self, target: gl::types::GLenum) -> Option<gl::types::GLuint> {
        match target {
            gl::DRAW_FRAMEBUFFER | gl::FRAMEBUFFER => Some(self.draw_framebuffer),
            gl::READ_FRAMEBUFFER => Some(self.read_framebuffer),
            _ => None,
        }
    }

    /// Returns the framebuffer bound to `target`, or records an error if there is none.
    fn bound_object(&mut self, target: gl::types::GLenum) -> Option<&mut FakeFramebuffer> {
        let id = match self.bound(target) {
            Some(id) => id,
            None => {
                self.errors.push(gl::INVALID_ENUM);
                return None;
            },
        };

        if id == 0 {
            self.errors.push(gl::INVALID_OPERATION);
            return None;
        }

        self.framebuffers.get_mut(&id)
    }

    fn attach(&mut self, target: gl::types::GLenum, attachment: gl::types::GLenum,
              image: Option<FakeImage>)
    {
        let framebuffer = match self.bound_object(target) {
            Some(fb) => fb,
            None => return,
        };

        let slots: SmallVec<[gl::types::GLenum; 2]> = if attachment == gl::DEPTH_STENCIL_ATTACHMENT {
            SmallVec::from_slice(&[gl::DEPTH_ATTACHMENT, gl::STENCIL_ATTACHMENT])
        } else {
            SmallVec::from_slice(&[attachment])
        };

        for slot in slots {
            match image {
                Some(image) => { framebuffer.attachments.insert(slot, image); },
                None => { framebuffer.attachments.remove(&slot); },
            }
        }
    }

    fn status(&self, target: gl::types::GLenum) -> gl::types::GLenum {
        let id = match self.bound(target) {
            Some(id) => id,
            None => return 0,
        };

        if id == 0 {
            return gl::FRAMEBUFFER_COMPLETE;
        }

        if let Some(forced) = self.forced_status {
            return forced;
        }

        let framebuffer = match self.framebuffers.get(&id) {
            Some(fb) => fb,
            None => return gl::FRAMEBUFFER_UNDEFINED,
        };

        if framebuffer.attachments.is_empty() {
            return gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT;
        }

        let dangling = framebuffer.draw_buffers.iter()
            .any(|&b| b != gl::NONE && !framebuffer.attachments.contains_key(&b));
        if dangling {
            return gl::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER;
        }

        gl::FRAMEBUFFER_COMPLETE
    }
}

/// A software device. See the module documentation.
#[derive(Clone)]
pub struct FakeDevice {
    state: Rc<RefCell<FakeState>>,
}

impl FakeDevice {
    /// Builds a device that reports `version` as its `GL_VERSION`, no extensions, and eight
    /// color attachments and draw buffers.
    pub fn new(version: &str) -> FakeDevice {
        FakeDevice {
            state: Rc::new(RefCell::new(FakeState {
                version: version.to_owned(),
                extensions: Vec::new(),
                max_color_attachments: 8,
                max_draw_buffers: 8,
                forced_status: None,
                next_name: 1,
                framebuffers: FnvHashMap::default(),
                draw_framebuffer: 0,
                read_framebuffer: 0,
                errors: Vec::new(),
                commands: Vec::new(),
            })),
        }
    }

    /// Sets the list of extensions reported by the device.
    pub fn with_extensions(self, extensions: &[&str]) -> FakeDevice {
        self.state.borrow_mut().extensions = extensions.iter().map(|e| e.to_string()).collect();
        self
    }

    /// Sets the value of `GL_MAX_COLOR_ATTACHMENTS`.
    pub fn with_max_color_attachments(self, value: gl::types::GLint) -> FakeDevice {
        self.state.borrow_mut().max_color_attachments = value;
        self
    }

    /// Sets the value of `GL_MAX_DRAW_BUFFERS`.
    pub fn with_max_draw_buffers(self, value: gl::types::GLint) -> FakeDevice {
        self.state.borrow_mut().max_draw_buffers = value;
        self
    }

    /// Makes `glCheckFramebufferStatus` return `status` for every framebuffer object, or
    /// restores the simulated rules with `None`.
    pub fn force_status(&self, status: Option<gl::types::GLenum>) {
        self.state.borrow_mut().forced_status = status;
    }

    /// Queues an error that will be returned by the next call to `glGetError`.
    pub fn push_error(&self, error: gl::types::GLenum) {
        self.state.borrow_mut().errors.push(error);
    }

    /// Returns the commands received since creation or since the last `clear_commands`.
    pub fn commands(&self) -> Vec<FakeCommand> {
        self.state.borrow().commands.clone()
    }

    /// Forgets the recorded commands.
    pub fn clear_commands(&self) {
        self.state.borrow_mut().commands.clear();
    }

    /// Returns the state of a framebuffer object, or `None` if the name doesn't exist.
    pub fn framebuffer(&self, id: gl::types::GLuint) -> Option<FakeFramebuffer> {
        self.state.borrow().framebuffers.get(&id).cloned()
    }

    /// Returns the number of framebuffer objects that haven't been deleted.
    pub fn live_framebuffers(&self) -> usize {
        self.state.borrow().framebuffers.len()
    }

    /// Returns the name bound to `GL_DRAW_FRAMEBUFFER`.
    pub fn draw_binding(&self) -> gl::types::GLuint {
        self.state.borrow().draw_framebuffer
    }

    /// Returns the name bound to `GL_READ_FRAMEBUFFER`.
    pub fn read_binding(&self) -> gl::types::GLuint {
        self.state.borrow().read_framebuffer
    }
}

impl Device for FakeDevice {
    fn get_string(&self, name: gl::types::GLenum) -> Option<String> {
        let state = self.state.borrow();

        match name {
            gl::VERSION => Some(state.version.clone()),
            gl::VENDOR => Some("glframe".to_owned()),
            gl::RENDERER => Some("fake device".to_owned()),
            gl::EXTENSIONS => Some(state.extensions.join(" ")),
            _ => None,
        }
    }

    fn get_string_i(&self, name: gl::types::GLenum, index: gl::types::GLuint) -> Option<String> {
        let state = self.state.borrow();

        match name {
            gl::EXTENSIONS => state.extensions.get(index as usize).cloned(),
            _ => None,
        }
    }

    fn get_integer(&self, pname: gl::types::GLenum) -> gl::types::GLint {
        let state = self.state.borrow();

        match pname {
            gl::MAX_COLOR_ATTACHMENTS => state.max_color_attachments,
            gl::MAX_DRAW_BUFFERS => state.max_draw_buffers,
            gl::NUM_EXTENSIONS => state.extensions.len() as gl::types::GLint,
            gl::DRAW_FRAMEBUFFER_BINDING => state.draw_framebuffer as gl::types::GLint,
            gl::READ_FRAMEBUFFER_BINDING => state.read_framebuffer as gl::types::GLint,
            _ => 0,
        }
    }

    fn gen_framebuffer(&self) -> gl::types::GLuint {
        let mut state = self.state.borrow_mut();

        let id = state.next_name;
        state.next_name += 1;
        state.framebuffers.insert(id, FakeFramebuffer::default());
        state.commands.push(FakeCommand::GenFramebuffer(id));
        id
    }

    fn delete_framebuffer(&self, id: gl::types::GLuint) {
        let mut state = self.state.borrow_mut();
        state.commands.push(FakeCommand::DeleteFramebuffer(id));

        // deleting a bound framebuffer reverts the binding to the default framebuffer
        if state.framebuffers.remove(&id).is_some() {
            if state.draw_framebuffer == id {
                state.draw_framebuffer = 0;
            }
            if state.read_framebuffer == id {
                state.read_framebuffer = 0;
            }
        }
    }

    fn bind_framebuffer(&self, target: gl::types::GLenum, id: gl::types::GLuint) {
        let mut state = self.state.borrow_mut();
        state.commands.push(FakeCommand::BindFramebuffer { target, id });

        if id != 0 && !state.framebuffers.contains_key(&id) {
            state.errors.push(gl::INVALID_OPERATION);
            return;
        }

        match target {
            gl::DRAW_FRAMEBUFFER => state.draw_framebuffer = id,
            gl::READ_FRAMEBUFFER => state.read_framebuffer = id,
            gl::FRAMEBUFFER => {
                state.draw_framebuffer = id;
                state.read_framebuffer = id;
            },
            _ => state.errors.push(gl::INVALID_ENUM),
        }
    }

    fn framebuffer_texture_2d(&self, target: gl::types::GLenum, attachment: gl::types::GLenum,
                              tex_target: gl::types::GLenum, texture: gl::types::GLuint,
                              level: gl::types::GLint)
    {
        let mut state = self.state.borrow_mut();
        state.commands.push(FakeCommand::FramebufferTexture2D {
            target, attachment, tex_target, texture, level,
        });

        let image = if texture == 0 {
            None
        } else {
            Some(FakeImage::Texture { target: tex_target, id: texture, level })
        };

        state.attach(target, attachment, image);
    }

    fn framebuffer_renderbuffer(&self, target: gl::types::GLenum,
                                attachment: gl::types::GLenum,
                                renderbuffer: gl::types::GLuint)
    {
        let mut state = self.state.borrow_mut();
        state.commands.push(FakeCommand::FramebufferRenderbuffer {
            target, attachment, renderbuffer,
        });

        let image = if renderbuffer == 0 { None } else { Some(FakeImage::RenderBuffer(renderbuffer)) };
        state.attach(target, attachment, image);
    }

    fn draw_buffers(&self, buffers: &[gl::types::GLenum]) {
        let mut state = self.state.borrow_mut();
        state.commands.push(FakeCommand::DrawBuffers(buffers.to_vec()));

        if buffers.len() > state.max_draw_buffers as usize {
            state.errors.push(gl::INVALID_VALUE);
            return;
        }

        if let Some(framebuffer) = state.bound_object(gl::DRAW_FRAMEBUFFER) {
            framebuffer.draw_buffers = SmallVec::from_slice(buffers);
        }
    }

    fn check_framebuffer_status(&self, target: gl::types::GLenum) -> gl::types::GLenum {
        let mut state = self.state.borrow_mut();
        state.commands.push(FakeCommand::CheckFramebufferStatus(target));

        let status = state.status(target);
        if status == 0 {
            state.errors.push(gl::INVALID_ENUM);
        }
        status
    }

    fn blit_framebuffer(&self, src: [gl::types::GLint; 4], dst: [gl::types::GLint; 4],
                        mask: gl::types::GLbitfield, filter: gl::types::GLenum)
    {
        let mut state = self.state.borrow_mut();
        state.commands.push(FakeCommand::BlitFramebuffer { src, dst, mask, filter });

        if state.draw_framebuffer == state.read_framebuffer && state.draw_framebuffer != 0 {
            state.errors.push(gl::INVALID_OPERATION);
        }
    }

    fn get_error(&self) -> gl::types::GLenum {
        let mut state = self.state.borrow_mut();

        if state.errors.is_empty() {
            gl::NO_ERROR
        } else {
            state.errors.remove(0)
        }
    }
}
