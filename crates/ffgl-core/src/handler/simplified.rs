//! Static-table plugins: one type is both the instance and the source of
//! the plugin-wide metadata.

use std::marker::PhantomData;

use super::{FFGLHandler, FFGLInstance};
use crate::info::PluginInfo;
use crate::parameters::ParamInfo;
use crate::{FFGLData, GLInput};

pub trait SimpleFFGLInstance: Sized + 'static {
    /// Build the instance. The host GL context is current.
    fn new(inst_data: &FFGLData) -> anyhow::Result<Self>;

    fn plugin_info() -> PluginInfo;

    fn num_params() -> usize {
        0
    }

    fn param_info(index: usize) -> &'static dyn ParamInfo;

    fn get_param(&self, _index: usize) -> f32 {
        0.0
    }

    fn set_param(&mut self, _index: usize, _value: f32) {}

    fn param_display(&self, index: usize) -> String {
        format!("{:.2}", <Self as SimpleFFGLInstance>::get_param(self, index))
    }

    fn draw(&mut self, data: &FFGLData, frame_data: GLInput) -> anyhow::Result<()>;
}

/// [`FFGLHandler`] for any [`SimpleFFGLInstance`].
pub struct SimpleFFGLHandler<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: SimpleFFGLInstance> FFGLHandler for SimpleFFGLHandler<T> {
    type Instance = T;

    fn init() -> Self {
        SimpleFFGLHandler {
            _marker: PhantomData,
        }
    }

    fn num_params(&'static self) -> usize {
        T::num_params()
    }

    fn param_info(&'static self, index: usize) -> &'static dyn ParamInfo {
        T::param_info(index)
    }

    fn plugin_info(&'static self) -> PluginInfo {
        T::plugin_info()
    }

    fn new_instance(&'static self, inst_data: &FFGLData) -> anyhow::Result<T> {
        T::new(inst_data)
    }
}

impl<T: SimpleFFGLInstance> FFGLInstance for T {
    fn get_param(&self, index: usize) -> f32 {
        SimpleFFGLInstance::get_param(self, index)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        SimpleFFGLInstance::set_param(self, index, value)
    }

    fn param_display(&self, index: usize) -> String {
        SimpleFFGLInstance::param_display(self, index)
    }

    fn draw(&mut self, inst_data: &FFGLData, frame_data: GLInput) -> anyhow::Result<()> {
        SimpleFFGLInstance::draw(self, inst_data, frame_data)
    }
}
