//! CPU evaluation of the sketch reveal fragment program.
//!
//! Mirrors `shaders/sketch_reveal.frag` line for line so the effect can be
//! checked without a GL context. Images are addressed in GL texture order:
//! row 0 is `v = 0`. Sampling is nearest at texel centres with
//! clamp-to-edge, which matches the GPU path at the centres the fragment
//! shader is evaluated at.
//!
//! GPUs evaluate `sin` and friends with their own precision, so compare GPU
//! frames against [`render`] with a tolerance rather than bit for bit.

use image::{Rgba, RgbaImage};

use crate::params::ShaderUniforms;

type Vec2 = [f32; 2];

fn add(a: Vec2, b: Vec2) -> Vec2 {
    [a[0] + b[0], a[1] + b[1]]
}

fn scale(a: Vec2, s: f32) -> Vec2 {
    [a[0] * s, a[1] * s]
}

fn offset(a: Vec2, s: f32) -> Vec2 {
    [a[0] + s, a[1] + s]
}

fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// GLSL `smoothstep`. Equal edges, which GLSL leaves undefined, act as a
/// step at the edge.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn hash(p: Vec2) -> f32 {
    fract((p[0] * 23.3 + p[1] * 91.7).sin() * 7241.155)
}

pub fn luma(c: [f32; 4]) -> f32 {
    c[0] * 0.299 + c[1] * 0.587 + c[2] * 0.114
}

/// Read-only view of an input frame with GLSL-style sampling.
pub struct Sampler<'a> {
    image: &'a RgbaImage,
}

impl<'a> Sampler<'a> {
    pub fn new(image: &'a RgbaImage) -> Self {
        Sampler { image }
    }

    pub fn resolution(&self) -> Vec2 {
        [self.image.width() as f32, self.image.height() as f32]
    }

    /// `texture(inputTexture, uv)`, channels in [0, 1]. An empty image
    /// samples as transparent black.
    pub fn texture(&self, uv: Vec2) -> [f32; 4] {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 {
            return [0.0; 4];
        }
        let texel = |coord: f32, size: u32| -> u32 {
            let i = (coord * size as f32).floor();
            i.clamp(0.0, size.saturating_sub(1) as f32) as u32
        };
        let px = self.image.get_pixel(texel(uv[0], w), texel(uv[1], h));
        px.0.map(|c| c as f32 / 255.0)
    }

    fn luma_at(&self, uv: Vec2, dx: f32, dy: f32) -> f32 {
        let res = self.resolution();
        luma(self.texture([uv[0] + dx / res[0], uv[1] + dy / res[1]]))
    }

    /// 3x3 Sobel magnitude over luma, scaled by 1.4 and clamped to [0, 1].
    pub fn sobel(&self, uv: Vec2) -> f32 {
        let tl = self.luma_at(uv, -1.0, -1.0);
        let l = self.luma_at(uv, -1.0, 0.0);
        let bl = self.luma_at(uv, -1.0, 1.0);
        let t = self.luma_at(uv, 0.0, -1.0);
        let b = self.luma_at(uv, 0.0, 1.0);
        let tr = self.luma_at(uv, 1.0, -1.0);
        let r = self.luma_at(uv, 1.0, 0.0);
        let br = self.luma_at(uv, 1.0, 1.0);
        let gx = -tl - 2.0 * l - bl + tr + 2.0 * r + br;
        let gy = -tl - 2.0 * t - tr + bl + 2.0 * b + br;
        ((gx * gx + gy * gy).sqrt() * 1.4).clamp(0.0, 1.0)
    }
}

/// One hatch layer.
pub fn sketch(
    uv: Vec2,
    rot: f32,
    dens: f32,
    intensity: f32,
    jit: f32,
    prog: f32,
    modulator: f32,
) -> f32 {
    let angle = rot + 0.3 * (prog * 3.1416 + rot).sin();
    let base = uv[0] * angle.cos() + uv[1] * angle.sin();
    let j = (hash(offset(scale(uv, 47.9), base)) - 0.5) * jit;
    let hatch = (base * dens + j * 8.0 + prog * 3.1 + hash(scale(uv, 99.1)) * 4.0).sin();
    let g = smoothstep(-0.35, 0.38, hatch);
    let p_fill = smoothstep(0.29 - modulator * 0.25, 0.91 + modulator * 0.43, prog);
    g * intensity * modulator * p_fill
}

/// Reveal mask in [0, 1] at `uv`; the output colour is `input * mask`.
pub fn mask(input: &Sampler<'_>, uv: Vec2, time: f32, u: &ShaderUniforms) -> f32 {
    let t = time * u.anim_speed;

    let edge = input.sobel(uv);
    let hatch_mod = 1.0 - luma(input.texture(uv)) * u.luma_hatch;

    let edge_reveal = smoothstep(0.14, 0.72, u.progress - u.edge_gain * (1.0 - edge));

    let hatch_a = sketch(
        add(uv, [t * 0.021; 2]),
        0.8,
        u.density,
        u.hatch_intensity,
        u.jitter,
        u.progress,
        hatch_mod * edge,
    );
    let hatch_b = sketch(
        add(uv, [-t * 0.013; 2]),
        -0.7,
        u.density,
        u.hatch_intensity,
        u.jitter * 1.5,
        u.progress,
        hatch_mod * edge * 0.8,
    );
    let hatch_c = sketch(
        add(uv, [t * 0.017; 2]),
        0.0,
        u.density * 0.5,
        u.hatch_intensity * 0.7,
        u.jitter * 0.77,
        u.progress,
        hatch_mod * 0.4,
    );

    let hatch_sum = (hatch_a + hatch_b + hatch_c).clamp(0.0, 1.0);
    let mask_val = (edge_reveal + hatch_sum).clamp(0.0, 1.0);

    let remapped = smoothstep(0.0, u.overlap_duration, u.progress);
    smoothstep(
        remapped - u.overlap_softness,
        remapped + u.overlap_softness,
        mask_val,
    )
}

/// Evaluate the effect for every texel of `input`.
pub fn render(input: &RgbaImage, time: f32, u: &ShaderUniforms) -> RgbaImage {
    let sampler = Sampler::new(input);
    let (w, h) = input.dimensions();

    RgbaImage::from_fn(w, h, |x, y| {
        let uv = [(x as f32 + 0.5) / w as f32, (y as f32 + 0.5) / h as f32];
        let m = mask(&sampler, uv, time, u);
        let src = input.get_pixel(x, y).0;
        Rgba(src.map(|c| (c as f32 * m).round().clamp(0.0, 255.0) as u8))
    })
}
