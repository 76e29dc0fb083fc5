//! glium backend over whatever GL context the host made current.

use std::cell::Cell;
use std::sync::Once;

static GL_INIT_ONCE: Once = Once::new();

#[derive(Debug)]
pub(crate) struct HostGlBackend {
    size: Cell<(u32, u32)>,
}

impl HostGlBackend {
    /// GL function pointers are loaded once per process via `gl_loader`; the
    /// host context must be current.
    pub(crate) fn new(size: (u32, u32)) -> Self {
        GL_INIT_ONCE.call_once(|| {
            gl_loader::init_gl();
            gl::load_with(|s| gl_loader::get_proc_address(s).cast());
        });

        Self {
            size: Cell::new(size),
        }
    }

    pub(crate) fn set_size(&self, size: (u32, u32)) {
        self.size.set(size);
    }
}

/// # Safety
///
/// Only valid inside FFGL host callbacks, where the host has already made the
/// right OpenGL context current. The backend never switches contexts itself.
unsafe impl glium::backend::Backend for HostGlBackend {
    fn swap_buffers(&self) -> Result<(), glium::SwapBuffersError> {
        Ok(())
    }

    unsafe fn get_proc_address(&self, symbol: &str) -> *const std::os::raw::c_void {
        gl_loader::get_proc_address(symbol).cast()
    }

    fn get_framebuffer_dimensions(&self) -> (u32, u32) {
        self.size.get()
    }

    fn is_current(&self) -> bool {
        true
    }

    unsafe fn make_current(&self) {}

    fn resize(&self, new_size: (u32, u32)) {
        self.set_size(new_size);
    }
}
