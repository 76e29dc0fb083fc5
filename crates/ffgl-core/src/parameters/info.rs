use std::ffi::CStr;
use std::fmt::Debug;

/// Parameter kinds a host knows how to present. Discriminants are the
/// `FF_TYPE_*` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ParameterTypes {
    Boolean = 0,
    Event = 1,
    Red = 2,
    Green = 3,
    Blue = 4,
    XPos = 5,
    YPos = 6,
    Standard = 10,
    Option = 11,
    Integer = 13,
    Text = 100,
    Hue = 200,
    Saturation = 201,
    Brightness = 202,
    Alpha = 203,
}

impl ParameterTypes {
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Metadata the host asks for per parameter.
pub trait ParamInfo: Debug + Send + Sync {
    fn name(&self) -> &CStr;

    fn param_type(&self) -> ParameterTypes {
        ParameterTypes::Standard
    }

    fn default_val(&self) -> f32 {
        0.0
    }

    fn min(&self) -> f32 {
        0.0
    }

    fn max(&self) -> f32 {
        1.0
    }

    /// Group name, for hosts that fold parameters into sections.
    fn group(&self) -> Option<&str> {
        None
    }

    fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default_val();
        }
        value.clamp(self.min(), self.max())
    }
}

/// A table row describing one parameter. Usable in `static` items.
#[derive(Debug, Clone)]
pub struct SimpleParamInfo {
    pub name: &'static CStr,
    pub param_type: ParameterTypes,
    pub default: Option<f32>,
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub group: Option<&'static str>,
}

impl SimpleParamInfo {
    pub const fn standard(name: &'static CStr, default: f32) -> Self {
        SimpleParamInfo {
            name,
            param_type: ParameterTypes::Standard,
            default: Some(default),
            min: None,
            max: None,
            group: None,
        }
    }

    pub const fn in_group(mut self, group: &'static str) -> Self {
        self.group = Some(group);
        self
    }
}

impl ParamInfo for SimpleParamInfo {
    fn name(&self) -> &CStr {
        self.name
    }

    fn param_type(&self) -> ParameterTypes {
        self.param_type
    }

    fn default_val(&self) -> f32 {
        self.default.unwrap_or(0.0)
    }

    fn min(&self) -> f32 {
        self.min.unwrap_or(0.0)
    }

    fn max(&self) -> f32 {
        self.max.unwrap_or(1.0)
    }

    fn group(&self) -> Option<&str> {
        self.group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static GAIN: SimpleParamInfo = SimpleParamInfo::standard(c"Gain", 0.47).in_group("Edges");

    #[test]
    fn standard_params_span_unit_range() {
        assert_eq!(GAIN.min(), 0.0);
        assert_eq!(GAIN.max(), 1.0);
        assert_eq!(GAIN.default_val(), 0.47);
        assert_eq!(GAIN.group(), Some("Edges"));
        assert_eq!(GAIN.param_type().code(), 10);
    }

    #[test]
    fn clamp_keeps_values_in_range() {
        assert_eq!(GAIN.clamp(1.5), 1.0);
        assert_eq!(GAIN.clamp(-0.2), 0.0);
        assert_eq!(GAIN.clamp(0.3), 0.3);
        assert_eq!(GAIN.clamp(f32::NAN), 0.47);
    }
}
