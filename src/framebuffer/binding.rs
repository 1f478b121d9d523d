use crate::context::Context;
use crate::fbo;
use crate::framebuffer::{BindTarget, Framebuffer, FramebufferError, FramebufferStatus};
use crate::GlObject;
use crate::ToGlEnum;

impl Context {
    /// Binds a framebuffer for drawing. Does nothing if it is already bound.
    pub fn bind_draw_framebuffer(&self, framebuffer: &Framebuffer)
                                 -> Result<(), FramebufferError>
    {
        self.bind(framebuffer, BindTarget::Draw)
    }

    /// Binds a framebuffer for reading. Does nothing if it is already bound.
    pub fn bind_read_framebuffer(&self, framebuffer: &Framebuffer)
                                 -> Result<(), FramebufferError>
    {
        self.bind(framebuffer, BindTarget::Read)
    }

    /// Binds the default framebuffer for drawing.
    pub fn unbind_draw_framebuffer(&self) {
        let mut ctxt = self.make_command_context();
        fbo::bind_framebuffer(&mut ctxt, 0, BindTarget::Draw);
    }

    /// Binds the default framebuffer for reading.
    pub fn unbind_read_framebuffer(&self) {
        let mut ctxt = self.make_command_context();
        fbo::bind_framebuffer(&mut ctxt, 0, BindTarget::Read);
    }

    /// Returns true if `framebuffer` is bound for drawing.
    pub fn is_draw_framebuffer_bound(&self, framebuffer: &Framebuffer)
                                     -> Result<bool, FramebufferError>
    {
        self.check_framebuffer(framebuffer)?;
        Ok(self.get_state().draw_framebuffer == framebuffer.get_id())
    }

    /// Returns true if `framebuffer` is bound for reading.
    pub fn is_read_framebuffer_bound(&self, framebuffer: &Framebuffer)
                                     -> Result<bool, FramebufferError>
    {
        self.check_framebuffer(framebuffer)?;
        Ok(self.get_state().read_framebuffer == framebuffer.get_id())
    }

    /// Returns true if a framebuffer other than the default one is bound for drawing.
    #[inline]
    pub fn is_any_draw_framebuffer_bound(&self) -> bool {
        self.get_state().draw_framebuffer != 0
    }

    /// Returns true if a framebuffer other than the default one is bound for reading.
    #[inline]
    pub fn is_any_read_framebuffer_bound(&self) -> bool {
        self.get_state().read_framebuffer != 0
    }

    /// Asks the device for the completeness of the framebuffer bound for drawing.
    ///
    /// Fails with `FramebufferNotBound` if the default framebuffer is bound.
    pub fn validate_draw_framebuffer(&self) -> Result<FramebufferStatus, FramebufferError> {
        self.validate(BindTarget::Draw)
    }

    /// Asks the device for the completeness of the framebuffer bound for reading.
    ///
    /// Fails with `FramebufferNotBound` if the default framebuffer is bound.
    pub fn validate_read_framebuffer(&self) -> Result<FramebufferStatus, FramebufferError> {
        self.validate(BindTarget::Read)
    }

    fn bind(&self, framebuffer: &Framebuffer, target: BindTarget)
            -> Result<(), FramebufferError>
    {
        self.check_framebuffer(framebuffer)?;

        let mut ctxt = self.make_command_context();
        fbo::bind_framebuffer(&mut ctxt, framebuffer.get_id(), target);
        Ok(())
    }

    fn validate(&self, target: BindTarget) -> Result<FramebufferStatus, FramebufferError> {
        let ctxt = self.make_command_context();

        let bound = match target {
            BindTarget::Draw => ctxt.state.draw_framebuffer,
            BindTarget::Read => ctxt.state.read_framebuffer,
        };

        if bound == 0 {
            return Err(FramebufferError::FramebufferNotBound(target));
        }

        let status = ctxt.device.check_framebuffer_status(target.to_glenum());
        Ok(FramebufferStatus::from_glenum(status))
    }
}

