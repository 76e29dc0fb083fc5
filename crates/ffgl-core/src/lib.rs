//! Rust side of the FreeFrame-GL 2.x plugin ABI.
//!
//! A plugin library implements [`handler::FFGLHandler`] (or, more commonly,
//! [`handler::simplified::SimpleFFGLInstance`]) and exports it with
//! [`plugin_main!`]. The generated `plugMain` decodes the host's op codes,
//! manages instance lifetimes and routes parameter and frame calls to the
//! plugin.

pub mod conversions;
pub mod entry;
mod error;
pub mod ffi;
pub mod handler;
pub mod info;
pub mod inputs;
pub mod log;
pub mod parameters;

pub use error::{FFGLError, FFGLResult};
pub use inputs::{FFGLData, GLInput};

/// Export `plugMain` for a handler type.
///
/// ```rust,ignore
/// ffgl_core::plugin_main!(SimpleFFGLHandler<MyEffect>);
/// ```
#[macro_export]
macro_rules! plugin_main {
    ($handler:ty) => {
        static FFGL_PLUGIN_STATE: $crate::entry::PluginState<$handler> =
            $crate::entry::PluginState::new();

        /// FFGL host entry point.
        ///
        /// # Safety
        ///
        /// Called by the host following the FFGL 2.x calling convention.
        #[no_mangle]
        #[allow(non_snake_case)]
        pub unsafe extern "C" fn plugMain(
            function_code: u32,
            input_value: $crate::ffi::FFMixed,
            instance_id: *mut ::std::ffi::c_void,
        ) -> $crate::ffi::FFMixed {
            unsafe {
                $crate::entry::default_ffgl_entry(
                    &FFGL_PLUGIN_STATE,
                    function_code,
                    input_value,
                    instance_id,
                )
            }
        }
    };
}
