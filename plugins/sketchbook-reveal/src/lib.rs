//! Sketchbook Reveal: a content-aware FFGL transition.
//!
//! Edges of the input frame (Sobel over luma) are revealed first, then three
//! layers of procedural hatching fill in the rest as `Progress` runs from 0
//! to 1. The GL work happens in [`renderer`]; [`reference`] evaluates the
//! same program on the CPU.

use anyhow::Context as _;
use ffgl_core::handler::simplified::{SimpleFFGLHandler, SimpleFFGLInstance};
use ffgl_core::info::{fixed_name, PluginInfo, PluginType};
use ffgl_core::parameters::{ParamInfo, ParamValues};
use ffgl_core::{FFGLData, GLInput};
use ffgl_glium::texture::texture_size;
use ffgl_glium::FFGLGlium;
use tracing::{trace, warn};

pub mod clock;
pub mod params;
pub mod reference;
pub mod renderer;
pub mod shader;

use clock::FrameClock;
use params::{ParamId, ShaderUniforms, PARAM_COUNT, PARAM_TABLE};
use renderer::SketchRenderer;

pub struct SketchbookReveal {
    glium: FFGLGlium,
    renderer: SketchRenderer,
    params: ParamValues<PARAM_COUNT>,
    clock: FrameClock,
}

impl SketchbookReveal {
    pub fn uniforms(&self) -> ShaderUniforms {
        ShaderUniforms::from_params(self.params.as_array())
    }
}

impl SimpleFFGLInstance for SketchbookReveal {
    fn new(inst_data: &FFGLData) -> anyhow::Result<Self> {
        let glium = FFGLGlium::new(inst_data)?;
        let renderer = SketchRenderer::new(&glium.ctx, glium.glsl_version())?;

        Ok(Self {
            glium,
            renderer,
            params: ParamValues::from_defaults(&PARAM_TABLE),
            clock: FrameClock::new(),
        })
    }

    fn plugin_info() -> PluginInfo {
        PluginInfo {
            unique_id: *b"SKBR",
            name: fixed_name("Sketchbook Reveal"),
            ty: PluginType::Effect,
            version: (1, 0),
            about: "by eyelanoesis (AI-assisted)".to_string(),
            description: "Content-aware sketch reveal transition with edge detection and hatching"
                .to_string(),
            inputs: (1, 1),
        }
    }

    fn num_params() -> usize {
        PARAM_COUNT
    }

    fn param_info(index: usize) -> &'static dyn ParamInfo {
        PARAM_TABLE[index]
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get(index).unwrap_or(0.0)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if let Err(err) = self.params.set(&PARAM_TABLE, index, value) {
            warn!("{err}");
        }
    }

    fn param_display(&self, index: usize) -> String {
        match ParamId::from_index(index) {
            Some(id) => id.display(self.get_param(index)),
            None => String::new(),
        }
    }

    fn draw(&mut self, data: &FFGLData, frame_data: GLInput) -> anyhow::Result<()> {
        let input = frame_data.first().context("no input texture")?;
        let resolution = texture_size(input);

        let out_res = match data.get_dimensions() {
            (0, _) | (_, 0) => resolution,
            dims => dims,
        };

        let time = self.clock.tick();
        let uniforms = self.uniforms();
        trace!(frame = self.clock.frames(), time, ?resolution, "sketch reveal");

        let renderer = &self.renderer;
        self.glium
            .draw(out_res, out_res, &frame_data, |surface, textures| {
                let texture = textures.first().context("input texture was not imported")?;
                renderer.draw(surface, texture, resolution, time, &uniforms)
            })
    }
}

ffgl_core::plugin_main!(SimpleFFGLHandler<SketchbookReveal>);
