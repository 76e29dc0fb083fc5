//! GL side of the effect: one program and a fullscreen quad.

use ffgl_glium::glsl::GlslVersion;
use glium::backend::Facade;
use glium::index::{NoIndices, PrimitiveType};
use glium::uniforms::{MagnifySamplerFilter, MinifySamplerFilter, SamplerWrapFunction};
use glium::{implement_vertex, uniform, DrawParameters, Program, Surface, Texture2d, VertexBuffer};

use crate::params::ShaderUniforms;
use crate::shader::ShaderSources;

#[derive(Debug, Clone, Copy)]
struct QuadVertex {
    position: [f32; 2],
}

implement_vertex!(QuadVertex, position);

/// Clip-space quad drawn as a triangle strip.
const QUAD: [QuadVertex; 4] = [
    QuadVertex { position: [-1.0, 1.0] },
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [1.0, -1.0] },
];

/// Owns the GL objects of one instance. Dropping it frees them.
pub struct SketchRenderer {
    program: Program,
    quad: VertexBuffer<QuadVertex>,
}

impl SketchRenderer {
    pub fn new(facade: &impl Facade, version: GlslVersion) -> anyhow::Result<Self> {
        let program = ShaderSources::for_version(version).compile(facade)?;
        let quad = VertexBuffer::immutable(facade, &QUAD)
            .map_err(|err| anyhow::anyhow!("fullscreen quad: {err:?}"))?;
        Ok(SketchRenderer { program, quad })
    }

    /// Draw the effect over the whole of `surface`.
    pub fn draw(
        &self,
        surface: &mut impl Surface,
        input: &Texture2d,
        resolution: (u32, u32),
        time: f32,
        u: &ShaderUniforms,
    ) -> anyhow::Result<()> {
        let sampler = input
            .sampled()
            .magnify_filter(MagnifySamplerFilter::Linear)
            .minify_filter(MinifySamplerFilter::Linear)
            .wrap_function(SamplerWrapFunction::Clamp);

        let uniforms = uniform! {
            inputTexture: sampler,
            resolution: [resolution.0 as f32, resolution.1 as f32],
            time: time,
            progress: u.progress,
            edgeGain: u.edge_gain,
            lumaHatch: u.luma_hatch,
            hatchIntensity: u.hatch_intensity,
            density: u.density,
            jitter: u.jitter,
            overlapDuration: u.overlap_duration,
            overlapSoftness: u.overlap_softness,
            animSpeed: u.anim_speed,
        };

        surface.draw(
            &self.quad,
            NoIndices(PrimitiveType::TriangleStrip),
            &self.program,
            &uniforms,
            &DrawParameters::default(),
        )
        .map_err(|err| anyhow::anyhow!("drawing sketch reveal quad: {err:?}"))
    }
}
