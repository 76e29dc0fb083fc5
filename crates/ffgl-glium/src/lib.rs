//! Utilities for creating FFGL plugins using the glium library.
//!
//! Create an [`FFGLGlium`] when the host instantiates your plugin and call
//! [`FFGLGlium::draw`] from your instance's draw method.
//!
//! ### Warning
//!
//! This module makes assumptions about the OpenGL context inside the host:
//! it is current on the calling thread for every callback and the host
//! rebinds whatever it needs after the plugin returns.

use std::fmt::{Debug, Formatter};
use std::rc::Rc;

use anyhow::{anyhow, Context as _};
use ffgl_core::{FFGLData, GLInput};
use glium::backend::Context;
use glium::framebuffer::{RenderBuffer, SimpleFrameBuffer};
use glium::{CapabilitiesSource, Frame, Surface, Texture2d};
use tracing::{debug, trace};

mod gl_backend;
pub mod glsl;
pub mod texture;
pub mod validate_gl;

use glsl::GlslVersion;

/// Render buffer kept between frames; recreated when the size changes.
struct CachedRenderBuffer {
    rb: RenderBuffer,
    dims: (u32, u32),
}

/// A glium context riding on the host's GL context.
pub struct FFGLGlium {
    pub ctx: Rc<Context>,
    backend: Rc<gl_backend::HostGlBackend>,
    glsl: GlslVersion,
    cached_rb: Option<CachedRenderBuffer>,
}

impl Debug for FFGLGlium {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FFGLGlium")
            .field("glsl", &self.glsl)
            .finish_non_exhaustive()
    }
}

/// The surface user closures render into.
pub type DefaultSurface<'a> = SimpleFrameBuffer<'a>;

impl FFGLGlium {
    /// Create a glium context for a new instance. Fails if the host context
    /// is not one glium can drive or speaks no supported GLSL version.
    pub fn new(inst_data: &FFGLData) -> anyhow::Result<Self> {
        let backend = Rc::new(gl_backend::HostGlBackend::new(inst_data.get_dimensions()));

        let ctx = unsafe {
            Context::new(
                backend.clone(),
                false,
                glium::debug::DebugCallbackBehavior::Ignore,
            )
        }
        .map_err(|err| anyhow!("host GL context rejected: {err:?}"))?;

        debug!(
            version = %ctx.get_opengl_version_string(),
            glsl = ?ctx.get_capabilities().supported_glsl_versions,
            "host GL context"
        );

        let glsl = glsl::get_best_version(&*ctx)
            .context("host GL context supports neither GLSL 4.10 nor 3.30 core")?;

        Ok(Self {
            ctx,
            backend,
            glsl,
            cached_rb: None,
        })
    }

    /// GLSL dialect shaders for this context should be compiled as.
    pub fn glsl_version(&self) -> GlslVersion {
        self.glsl
    }

    /// Re-sync glium's state cache with the real GL state, which the host
    /// may have changed since the last callback.
    pub fn rebuild(&self) -> anyhow::Result<()> {
        unsafe { self.ctx.rebuild(self.backend.clone()) }
            .map_err(|err| anyhow!("could not rebuild glium context: {err:?}"))
    }

    /// Render one frame.
    ///
    /// `render_frame` draws into an internal `render_res` render buffer with
    /// the host's input textures imported; the result is then blitted into
    /// the host FBO at `out_res`. The host's GL state is reset on the way
    /// out, whether or not drawing succeeded.
    pub fn draw(
        &mut self,
        render_res: (u32, u32),
        out_res: (u32, u32),
        frame_data: &GLInput,
        render_frame: impl FnOnce(&mut DefaultSurface, &[Texture2d]) -> anyhow::Result<()>,
    ) -> anyhow::Result<()> {
        let _restore = validate_gl::HostStateGuard::new(frame_data.host, |fbo| unsafe {
            validate_gl::restore_host_state(fbo)
        });

        self.backend.set_size(out_res);
        self.rebuild()?;

        if self.cached_rb.as_ref().map(|c| c.dims) != Some(render_res) {
            let rb = RenderBuffer::new(
                &self.ctx,
                glium::texture::UncompressedFloatFormat::U8U8U8U8,
                render_res.0,
                render_res.1,
            )
            .map_err(|err| anyhow!("render buffer {render_res:?}: {err:?}"))?;
            debug!(?render_res, "render buffer (re)created");
            self.cached_rb = Some(CachedRenderBuffer {
                rb,
                dims: render_res,
            });
        }

        let Some(cached) = &self.cached_rb else {
            anyhow::bail!("render buffer missing");
        };
        let mut fb = SimpleFrameBuffer::new(&self.ctx, &cached.rb)
            .map_err(|err| anyhow!("framebuffer over render buffer: {err:?}"))?;

        let textures: Vec<Texture2d> = frame_data
            .textures
            .iter()
            .map(|info| unsafe { texture::import_host_texture(&self.ctx, info) })
            .collect();

        let rendered = render_frame(&mut fb, &textures);

        let frame = Frame::new(self.ctx.clone(), out_res);
        fb.fill(&frame, glium::uniforms::MagnifySamplerFilter::Nearest);

        unsafe {
            gl::BindFramebuffer(gl::DRAW_FRAMEBUFFER, frame_data.host);
            blit_fb(render_res, out_res);
        }
        let finished = frame.finish();
        self.rebuild()?;
        finished.map_err(|err| anyhow!("finishing frame: {err:?}"))?;

        trace!(?out_res, ?render_res, "rendered");
        rendered
    }
}

/// Blit from the read framebuffer to the draw framebuffer.
///
/// # Safety
///
/// Caller must ensure valid GL context and correctly bound framebuffers.
unsafe fn blit_fb((read_w, read_h): (u32, u32), (write_w, write_h): (u32, u32)) {
    unsafe {
        gl::BlitFramebuffer(
            0,
            0,
            read_w as gl::types::GLint,
            read_h as gl::types::GLint,
            0,
            0,
            write_w as gl::types::GLint,
            write_h as gl::types::GLint,
            gl::COLOR_BUFFER_BIT,
            gl::NEAREST,
        );
    }
}
