//! Handing the GL context back to the host in the state it expects.

use gl::types::GLenum;

/// Texture targets unbound by [`gl_reset`].
const TEXTURE_TARGETS: [GLenum; 2] = [gl::TEXTURE_1D, gl::TEXTURE_2D];

/// Reset OpenGL state back to the host's expected defaults: no program, no
/// textures, buffers or VAO bound, blending off, host FBO bound.
///
/// # Safety
///
/// Must be called with the host's GL context current.
pub unsafe fn gl_reset(host_fbo: u32) {
    unsafe {
        gl::UseProgram(0);

        let mut num_samplers = 0;
        gl::GetIntegerv(gl::MAX_TEXTURE_IMAGE_UNITS, &mut num_samplers);

        for target in TEXTURE_TARGETS {
            for sampler in 0..num_samplers.max(0) as u32 {
                gl::ActiveTexture(gl::TEXTURE0 + sampler);
                gl::BindTexture(target, 0);
            }
        }
        gl::ActiveTexture(gl::TEXTURE0);

        gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        gl::BindVertexArray(0);
        gl::Disable(gl::BLEND);
        gl::BlendFunc(gl::ONE, gl::ZERO);

        gl::BindFramebuffer(gl::FRAMEBUFFER, host_fbo);
    }
}

/// Pop every pending GL error, oldest first.
///
/// # Safety
///
/// Must be called with a GL context current.
pub unsafe fn drain_gl_errors() -> Vec<GLenum> {
    let mut errors = Vec::new();
    loop {
        let err = unsafe { gl::GetError() };
        if err == gl::NO_ERROR || errors.len() >= 32 {
            break;
        }
        errors.push(err);
    }
    errors
}

/// Log any pending GL errors, then [`gl_reset`].
///
/// # Safety
///
/// Must be called with the host's GL context current.
pub unsafe fn restore_host_state(host_fbo: u32) {
    unsafe {
        let errors = drain_gl_errors();
        if !errors.is_empty() {
            tracing::warn!(?errors, "GL errors after draw");
        }
        gl_reset(host_fbo);
    }
}

/// Runs `restore` with the host FBO when dropped, so the host gets its GL
/// state back on every exit path of a draw, including `?` and panics.
pub struct HostStateGuard<F: FnMut(u32)> {
    host_fbo: u32,
    restore: F,
}

impl<F: FnMut(u32)> HostStateGuard<F> {
    pub fn new(host_fbo: u32, restore: F) -> Self {
        HostStateGuard { host_fbo, restore }
    }
}

impl<F: FnMut(u32)> Drop for HostStateGuard<F> {
    fn drop(&mut self) {
        (self.restore)(self.host_fbo);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::*;

    fn guarded_draw(restored: &RefCell<Vec<u32>>, fail: bool) -> anyhow::Result<u32> {
        let _guard = HostStateGuard::new(42, |fbo| restored.borrow_mut().push(fbo));
        if fail {
            anyhow::bail!("render buffer allocation failed");
        }
        Ok(7)
    }

    #[test]
    fn restores_after_success_and_early_error() {
        let restored = RefCell::new(Vec::new());

        assert_eq!(guarded_draw(&restored, false).unwrap(), 7);
        assert!(guarded_draw(&restored, true).is_err());

        assert_eq!(*restored.borrow(), vec![42, 42]);
    }

    #[test]
    fn restores_when_the_draw_panics() {
        let restored = RefCell::new(Vec::new());

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let _guard = HostStateGuard::new(9, |fbo| restored.borrow_mut().push(fbo));
            panic!("user render closure panicked");
        }));

        assert!(outcome.is_err());
        assert_eq!(*restored.borrow(), vec![9]);
    }
}
