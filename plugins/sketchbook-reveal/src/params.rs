//! The effect's host parameters and how they map onto shader uniforms.
//!
//! The host only ever sees [0, 1] floats. [`ParamId::to_shader`] stretches
//! each one into the range the fragment shader works in.

use ffgl_core::parameters::{ParamInfo, SimpleParamInfo};

pub const PARAM_COUNT: usize = 9;

const TRANSITION: &str = "Transition";
const EDGES: &str = "Edges";
const HATCHING: &str = "Hatching";

static PROGRESS: SimpleParamInfo = SimpleParamInfo::standard(c"Progress", 0.0).in_group(TRANSITION);
static EDGE_GAIN: SimpleParamInfo = SimpleParamInfo::standard(c"Edge Gain", 0.47).in_group(EDGES);
static LUMA_HATCH: SimpleParamInfo = SimpleParamInfo::standard(c"Luma Hatch", 0.27).in_group(HATCHING);
static HATCH_INTENSITY: SimpleParamInfo =
    SimpleParamInfo::standard(c"Hatch Intensity", 0.5).in_group(HATCHING);
static DENSITY: SimpleParamInfo = SimpleParamInfo::standard(c"Density", 0.35).in_group(HATCHING);
static JITTER: SimpleParamInfo = SimpleParamInfo::standard(c"Jitter", 0.25).in_group(HATCHING);
static OVERLAP_DURATION: SimpleParamInfo =
    SimpleParamInfo::standard(c"Overlap Duration", 0.45).in_group(TRANSITION);
static OVERLAP_SOFTNESS: SimpleParamInfo =
    SimpleParamInfo::standard(c"Overlap Softness", 0.36).in_group(TRANSITION);
static ANIM_SPEED: SimpleParamInfo = SimpleParamInfo::standard(c"Anim Speed", 0.09).in_group(HATCHING);

/// Parameter metadata in host index order.
pub static PARAM_TABLE: [&dyn ParamInfo; PARAM_COUNT] = [
    &PROGRESS,
    &EDGE_GAIN,
    &LUMA_HATCH,
    &HATCH_INTENSITY,
    &DENSITY,
    &JITTER,
    &OVERLAP_DURATION,
    &OVERLAP_SOFTNESS,
    &ANIM_SPEED,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamId {
    Progress,
    EdgeGain,
    LumaHatch,
    HatchIntensity,
    Density,
    Jitter,
    OverlapDuration,
    OverlapSoftness,
    AnimSpeed,
}

impl ParamId {
    pub const ALL: [ParamId; PARAM_COUNT] = [
        ParamId::Progress,
        ParamId::EdgeGain,
        ParamId::LumaHatch,
        ParamId::HatchIntensity,
        ParamId::Density,
        ParamId::Jitter,
        ParamId::OverlapDuration,
        ParamId::OverlapSoftness,
        ParamId::AnimSpeed,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn info(self) -> &'static dyn ParamInfo {
        PARAM_TABLE[self.index()]
    }

    /// Uniform this parameter feeds.
    pub fn uniform_name(self) -> &'static str {
        match self {
            ParamId::Progress => "progress",
            ParamId::EdgeGain => "edgeGain",
            ParamId::LumaHatch => "lumaHatch",
            ParamId::HatchIntensity => "hatchIntensity",
            ParamId::Density => "density",
            ParamId::Jitter => "jitter",
            ParamId::OverlapDuration => "overlapDuration",
            ParamId::OverlapSoftness => "overlapSoftness",
            ParamId::AnimSpeed => "animSpeed",
        }
    }

    /// Map a host value in [0, 1] to the shader's native range.
    pub fn to_shader(self, value: f32) -> f32 {
        match self {
            ParamId::EdgeGain | ParamId::LumaHatch => value * 3.0,
            ParamId::Density => value * 85.0 + 5.0,
            ParamId::OverlapDuration => value * 0.9 + 0.1,
            ParamId::OverlapSoftness => value * 0.5,
            ParamId::Progress | ParamId::HatchIntensity | ParamId::Jitter | ParamId::AnimSpeed => {
                value
            }
        }
    }

    /// Host UI text for a host value: the mapped shader value.
    pub fn display(self, value: f32) -> String {
        let mapped = self.to_shader(value);
        match self {
            ParamId::Density => format!("{mapped:.1}"),
            ParamId::Progress => format!("{:.0}%", mapped * 100.0),
            _ => format!("{mapped:.2}"),
        }
    }
}

/// Per-frame uniform values, already in shader units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderUniforms {
    pub progress: f32,
    pub edge_gain: f32,
    pub luma_hatch: f32,
    pub hatch_intensity: f32,
    pub density: f32,
    pub jitter: f32,
    pub overlap_duration: f32,
    pub overlap_softness: f32,
    pub anim_speed: f32,
}

impl ShaderUniforms {
    pub fn from_params(values: &[f32; PARAM_COUNT]) -> Self {
        let get = |id: ParamId| id.to_shader(values[id.index()]);
        ShaderUniforms {
            progress: get(ParamId::Progress),
            edge_gain: get(ParamId::EdgeGain),
            luma_hatch: get(ParamId::LumaHatch),
            hatch_intensity: get(ParamId::HatchIntensity),
            density: get(ParamId::Density),
            jitter: get(ParamId::Jitter),
            overlap_duration: get(ParamId::OverlapDuration),
            overlap_softness: get(ParamId::OverlapSoftness),
            anim_speed: get(ParamId::AnimSpeed),
        }
    }

    pub fn with_progress(mut self, progress: f32) -> Self {
        self.progress = progress;
        self
    }
}

impl Default for ShaderUniforms {
    fn default() -> Self {
        let defaults = std::array::from_fn(|i| PARAM_TABLE[i].default_val());
        Self::from_params(&defaults)
    }
}
