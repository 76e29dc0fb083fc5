//! Traits the entry point dispatches into.
//!
//! [`FFGLHandler`] is created once per loaded library and answers the
//! questions a host asks before any instance exists (plugin info, parameter
//! table). [`FFGLInstance`] is one live effect bound to a host GL context.
//!
//! Most plugins implement [`simplified::SimpleFFGLInstance`] instead and let
//! [`simplified::SimpleFFGLHandler`] fill in the rest.

use crate::info::PluginInfo;
use crate::parameters::ParamInfo;
use crate::{FFGLData, GLInput};

pub mod simplified;

pub trait FFGLHandler: Send + Sync + 'static {
    type Instance: FFGLInstance;

    fn init() -> Self;

    fn num_params(&'static self) -> usize;

    /// Only called with `index < num_params()`.
    fn param_info(&'static self, index: usize) -> &'static dyn ParamInfo;

    fn plugin_info(&'static self) -> PluginInfo;

    /// Called from `INSTANTIATEGL` with the host context current. An error
    /// fails the instantiation.
    fn new_instance(&'static self, inst_data: &FFGLData) -> anyhow::Result<Self::Instance>;
}

/// One plugin instance. Parameter indices are bounds-checked by the entry
/// point before any of these are called.
pub trait FFGLInstance {
    fn get_param(&self, index: usize) -> f32;

    fn set_param(&mut self, index: usize, value: f32);

    /// Text shown next to the parameter in the host UI.
    fn param_display(&self, index: usize) -> String {
        format!("{:.2}", self.get_param(index))
    }

    /// Render one frame into `frame_data.host`.
    fn draw(&mut self, inst_data: &FFGLData, frame_data: GLInput) -> anyhow::Result<()>;
}
