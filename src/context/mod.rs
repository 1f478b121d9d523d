use std::cell::{RefCell, RefMut};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, error};

use crate::backend::Device;
use crate::framebuffer::points::{self, ColorAttachmentPoint, DrawBuffer};
use crate::framebuffer::FramebufferError;
use crate::gl;
use crate::version::{self, Api, Version};
use crate::CapabilitiesSource;

pub use self::capabilities::Capabilities;
pub use self::extensions::ExtensionsList;
pub use self::state::GlState;

mod capabilities;
mod extensions;
mod state;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_SHARE_GROUP_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies a `Context` for the lifetime of the process.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextId(u64);

impl fmt::Display for ContextId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "context #{}", self.0)
    }
}

/// Identifies a set of contexts that share object names.
///
/// Textures and renderbuffers can be used by every context of their share group.
/// Framebuffers, attachment points, draw buffers and builders can't.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ShareGroupId(u64);

/// Options passed when creating a `Context`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ContextOptions {
    /// If true, `glGetError` is polled after every sequence of commands and the errors are
    /// logged. Defaults to true in debug builds.
    pub check_errors: bool,
}

impl Default for ContextOptions {
    #[inline]
    fn default() -> ContextOptions {
        ContextOptions {
            check_errors: cfg!(debug_assertions),
        }
    }
}

/// Stores the state and information required for glframe to execute framebuffer commands.
///
/// A context is tied to the thread that owns its device: it is neither `Send` nor `Sync`.
pub struct Context {
    id: ContextId,
    share_group: ShareGroupId,
    device: Box<dyn Device>,
    state: RefCell<GlState>,
    version: Version,
    extensions: ExtensionsList,
    capabilities: Capabilities,
    color_attachment_points: Vec<ColorAttachmentPoint>,
    draw_buffers: Vec<DrawBuffer>,
    options: ContextOptions,
}

/// Everything a command needs, with the binding state borrowed for the duration of the
/// command.
pub(crate) struct CommandContext<'a> {
    pub id: ContextId,
    pub device: &'a dyn Device,
    pub state: RefMut<'a, GlState>,
    check_errors: bool,
}

impl<'a> Drop for CommandContext<'a> {
    fn drop(&mut self) {
        if self.check_errors {
            report_errors(self.id, self.device);
        }
    }
}

impl Context {
    /// Builds a new context on top of a device.
    ///
    /// The device is queried for its version, extensions and limits. Fails with
    /// `NonCompliantDevice` if the device can't bind separate draw and read framebuffers,
    /// or if it reports fewer than eight color attachments or draw buffers.
    pub fn new<D>(device: D, options: ContextOptions) -> Result<Context, FramebufferError>
                  where D: Device + 'static
    {
        let group = ShareGroupId(NEXT_SHARE_GROUP_ID.fetch_add(1, Ordering::Relaxed));
        Context::build(Box::new(device), options, group)
    }

    /// Builds a new context that shares textures and renderbuffers with `other`.
    ///
    /// The device must really share object names with the device of `other`, which is
    /// something only the windowing layer can arrange.
    pub fn new_shared<D>(device: D, options: ContextOptions, other: &Context)
                         -> Result<Context, FramebufferError>
                         where D: Device + 'static
    {
        Context::build(Box::new(device), options, other.share_group)
    }

    fn build(device: Box<dyn Device>, options: ContextOptions, share_group: ShareGroupId)
             -> Result<Context, FramebufferError>
    {
        let id = ContextId(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed));

        let version = match version::get_gl_version(&*device) {
            Some(v) => v,
            None => {
                let msg = format!("Unable to parse GL_VERSION {:?}",
                                  device.get_string(gl::VERSION));
                error!("[{}] {}", id, msg);
                return Err(FramebufferError::NonCompliantDevice(msg));
            },
        };

        let extensions = extensions::get_extensions(&*device, &version);
        let capabilities = capabilities::get_capabilities(&*device, &version, &extensions);

        check_gl_compatibility(id, &version, &extensions)?;

        let color_attachment_points =
            points::make_color_attachment_points(id, capabilities.max_color_attachments)?;
        let draw_buffers = points::make_draw_buffers(id, capabilities.max_draw_buffers)?;

        debug!("[{}] {:?}, {} color attachment points, {} draw buffers", id, version,
               color_attachment_points.len(), draw_buffers.len());

        Ok(Context {
            id,
            share_group,
            device,
            state: RefCell::new(GlState::default()),
            version,
            extensions,
            capabilities,
            color_attachment_points,
            draw_buffers,
            options,
        })
    }

    /// Returns the identity of this context.
    #[inline]
    pub fn get_id(&self) -> ContextId {
        self.id
    }

    /// Returns the share group of this context.
    #[inline]
    pub fn get_share_group(&self) -> ShareGroupId {
        self.share_group
    }

    /// Returns the options this context was created with.
    #[inline]
    pub fn get_options(&self) -> &ContextOptions {
        &self.options
    }

    /// Returns a copy of the current binding state.
    ///
    /// This is how to query the names currently bound to `GL_DRAW_FRAMEBUFFER` and
    /// `GL_READ_FRAMEBUFFER`. `0` means the default framebuffer is bound.
    #[inline]
    pub fn get_state(&self) -> GlState {
        *self.state.borrow()
    }

    /// Returns the color attachment points supported by the device, in ascending order.
    #[inline]
    pub fn color_attachment_points(&self) -> &[ColorAttachmentPoint] {
        &self.color_attachment_points
    }

    /// Returns the draw buffers supported by the device, in ascending order.
    #[inline]
    pub fn draw_buffers(&self) -> &[DrawBuffer] {
        &self.draw_buffers
    }

    pub(crate) fn make_command_context(&self) -> CommandContext<'_> {
        CommandContext {
            id: self.id,
            device: &*self.device,
            state: self.state.borrow_mut(),
            check_errors: self.options.check_errors,
        }
    }

    /// Fails with `WrongContext` unless `owner` is this context.
    pub(crate) fn check_unshared(&self, owner: ContextId, what: &'static str)
                                 -> Result<(), FramebufferError>
    {
        if owner == self.id {
            Ok(())
        } else {
            Err(FramebufferError::WrongContext(what))
        }
    }

    /// Fails with `WrongContext` unless `group` is the share group of this context.
    pub(crate) fn check_shared(&self, group: ShareGroupId, what: &'static str)
                               -> Result<(), FramebufferError>
    {
        if group == self.share_group {
            Ok(())
        } else {
            Err(FramebufferError::WrongContext(what))
        }
    }
}

impl CapabilitiesSource for Context {
    #[inline]
    fn get_version(&self) -> &Version {
        &self.version
    }

    #[inline]
    fn get_extensions(&self) -> &ExtensionsList {
        &self.extensions
    }

    #[inline]
    fn get_capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Context")
            .field("id", &self.id)
            .field("share_group", &self.share_group)
            .field("version", &self.version)
            .field("state", &*self.state.borrow())
            .finish()
    }
}

fn report_errors(id: ContextId, device: &dyn Device) {
    // a lost context can keep returning errors, don't loop forever
    for _ in 0 .. 32 {
        let error = device.get_error();

        let name = match error {
            gl::NO_ERROR => return,
            gl::INVALID_ENUM => "GL_INVALID_ENUM",
            gl::INVALID_VALUE => "GL_INVALID_VALUE",
            gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
            gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
            gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
            _ => "unknown error",
        };

        error!("[{}] device reported {} (0x{:x})", id, name, error);
    }
}

fn check_gl_compatibility(id: ContextId, version: &Version, extensions: &ExtensionsList)
                          -> Result<(), FramebufferError>
{
    let mut result = Vec::new();

    if !(version >= &Version(Api::Gl, 3, 0)) && !(version >= &Version(Api::GlEs, 2, 0)) &&
       !extensions.gl_arb_framebuffer_object && !extensions.gl_ext_framebuffer_object
    {
        result.push("OpenGL implementation doesn't support framebuffers");
    }

    if !(version >= &Version(Api::Gl, 3, 0)) && !(version >= &Version(Api::GlEs, 3, 0)) &&
       !extensions.gl_arb_framebuffer_object && !extensions.gl_ext_framebuffer_blit &&
       !extensions.gl_nv_framebuffer_blit
    {
        result.push("OpenGL implementation doesn't support separate draw and read framebuffers");
    }

    if result.is_empty() {
        Ok(())
    } else {
        let msg = result.join("\n");
        error!("[{}] {}", id, msg);
        Err(FramebufferError::NonCompliantDevice(msg))
    }
}
