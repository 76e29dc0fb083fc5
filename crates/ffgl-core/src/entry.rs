//! `plugMain` dispatch.
//!
//! [`crate::plugin_main!`] expands to a `plugMain` export that forwards every
//! call here. Errors and panics are logged and answered with `FF_FAIL`; they
//! never unwind into the host.

use std::ffi::{c_void, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};

use once_cell::sync::OnceCell;
use tracing::{debug, error, trace, warn};

use crate::conversions::{Op, PluginCapacity};
use crate::ffi::*;
use crate::handler::{FFGLHandler, FFGLInstance};
use crate::info::HostInfo;
use crate::{FFGLData, FFGLError, FFGLResult, GLInput};

/// Library-wide state behind a `plugMain` export.
pub struct PluginState<H> {
    handler: OnceCell<H>,
    info: OnceCell<HostInfo>,
}

impl<H: FFGLHandler> PluginState<H> {
    pub const fn new() -> Self {
        PluginState {
            handler: OnceCell::new(),
            info: OnceCell::new(),
        }
    }

    fn handler(&'static self) -> &'static H {
        self.handler.get_or_init(H::init)
    }

    fn host_info(&'static self) -> &'static HostInfo {
        self.info
            .get_or_init(|| HostInfo::from(&self.handler().plugin_info()))
    }
}

impl<H: FFGLHandler> Default for PluginState<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// What `INSTANTIATEGL` hands back to the host as the instance id.
struct Instance<I> {
    data: FFGLData,
    inner: I,
    display: CString,
}

/// Entry point behind the exported `plugMain`.
///
/// # Safety
///
/// Must only be called by an FFGL host, with `input` and `instance` obeying
/// the FFGL 2.x calling convention for `function`.
pub unsafe fn default_ffgl_entry<H: FFGLHandler>(
    state: &'static PluginState<H>,
    function: u32,
    input: FFMixed,
    instance: *mut c_void,
) -> FFMixed {
    let result = catch_unwind(AssertUnwindSafe(|| unsafe {
        dispatch(state, function, input, instance)
    }));

    match result {
        Ok(Ok(answer)) => answer,
        Ok(Err(err)) => {
            match &err {
                FFGLError::UnknownOp(_) | FFGLError::Unsupported(_) => {
                    trace!(function, "{err}")
                }
                _ => error!(function, "{err:#}"),
            }
            FFMixed::from_u32(FF_FAIL)
        }
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_default();
            error!(function, "{}", FFGLError::Panic(message));
            FFMixed::from_u32(FF_FAIL)
        }
    }
}

unsafe fn dispatch<H: FFGLHandler>(
    state: &'static PluginState<H>,
    function: u32,
    input: FFMixed,
    instance: *mut c_void,
) -> FFGLResult<FFMixed> {
    let op = Op::try_from(function)?;
    let handler = state.handler();

    if op != Op::ProcessOpenGL && op != Op::SetTime {
        trace!(?op, "plugMain");
    }

    let success = || -> FFGLResult<FFMixed> { Ok(FFMixed::from_u32(FF_SUCCESS)) };
    let param_index = |index: u32| -> FFGLResult<usize> {
        let count = handler.num_params();
        let index = index as usize;
        if index < count {
            Ok(index)
        } else {
            Err(FFGLError::ParamOutOfRange { index, count })
        }
    };

    match op {
        Op::GetInfo => Ok(FFMixed::from_ptr(&state.host_info().info)),
        Op::GetExtendedInfo => Ok(FFMixed::from_ptr(&state.host_info().extended)),

        Op::Initialise | Op::InitialiseV2 => {
            crate::log::init_default_subscriber();
            let info = handler.plugin_info();
            debug!(
                id = %String::from_utf8_lossy(&info.unique_id),
                params = handler.num_params(),
                "plugin initialised"
            );
            success()
        }
        Op::Deinitialise => success(),

        Op::GetPluginCaps => {
            let inputs = state.host_info().inputs;
            let answer = match PluginCapacity::from_code(input.as_u32()) {
                Some(PluginCapacity::ProcessOpenGL | PluginCapacity::SetTime) => FF_SUPPORTED,
                Some(PluginCapacity::MinInputFrames) => inputs.0,
                Some(PluginCapacity::MaxInputFrames) => inputs.1,
                _ => FF_UNSUPPORTED,
            };
            Ok(FFMixed::from_u32(answer))
        }

        Op::GetNumParameters => Ok(FFMixed::from_u32(handler.num_params() as u32)),
        Op::GetParameterName => {
            let index = param_index(input.as_u32())?;
            Ok(FFMixed::from_ptr(handler.param_info(index).name().as_ptr()))
        }
        Op::GetParameterDefault => {
            let index = param_index(input.as_u32())?;
            Ok(FFMixed::from_f32(handler.param_info(index).default_val()))
        }
        Op::GetParameterType => {
            let index = param_index(input.as_u32())?;
            Ok(FFMixed::from_u32(handler.param_info(index).param_type().code()))
        }
        Op::GetRange => {
            let range = unsafe { input.as_ptr::<GetRangeStruct>().as_mut() }
                .ok_or(FFGLError::NullPointer("GetRangeStruct"))?;
            let info = handler.param_info(param_index(range.parameterNumber)?);
            range.range = RangeStruct {
                min: info.min(),
                max: info.max(),
            };
            success()
        }
        Op::GetParamGroup => {
            let query = unsafe { input.as_ptr::<GetStringStruct>().as_ref() }
                .ok_or(FFGLError::NullPointer("GetStringStruct"))?;
            let info = handler.param_info(param_index(query.parameterNumber)?);
            let buffer = query.stringBuffer;
            unsafe {
                copy_str_to_host_buffer(
                    buffer.address,
                    buffer.maxToWrite as usize,
                    info.group().unwrap_or(""),
                )
            };
            success()
        }
        Op::GetInputStatus => {
            let status = if input.as_u32() < state.host_info().inputs.1 {
                FF_INPUT_INUSE
            } else {
                FF_INPUT_NOTINUSE
            };
            Ok(FFMixed::from_u32(status))
        }

        Op::InstantiateGL => {
            let viewport = unsafe { input.as_ptr::<FFGLViewportStruct>().as_ref() }
                .ok_or(FFGLError::NullPointer("FFGLViewportStruct"))?;
            let data = FFGLData::new(viewport);
            let inner = handler.new_instance(&data)?;
            debug!(?viewport, "instance created");

            let boxed = Box::new(Instance {
                data,
                inner,
                display: CString::default(),
            });
            Ok(FFMixed::from_ptr(Box::into_raw(boxed)))
        }
        Op::DeinstantiateGL => {
            if instance.is_null() {
                return Err(FFGLError::NoInstance(op));
            }
            drop(unsafe { Box::from_raw(instance as *mut Instance<H::Instance>) });
            debug!("instance destroyed");
            success()
        }

        _ => {
            let inst = unsafe { (instance as *mut Instance<H::Instance>).as_mut() }
                .ok_or(FFGLError::NoInstance(op))?;
            instance_op(handler, state.host_info().inputs, inst, op, input)
        }
    }
}

unsafe fn instance_op<H: FFGLHandler>(
    handler: &'static H,
    inputs: (u32, u32),
    inst: &mut Instance<H::Instance>,
    op: Op,
    input: FFMixed,
) -> FFGLResult<FFMixed> {
    let count = handler.num_params();

    match op {
        Op::GetParameter => {
            let index = input.as_u32() as usize;
            let value = if index < count {
                inst.inner.get_param(index)
            } else {
                warn!(index, "get of unknown parameter");
                0.0
            };
            Ok(FFMixed::from_f32(value))
        }
        Op::SetParameter => {
            let set = unsafe { input.as_ptr::<SetParameterStruct>().as_ref() }
                .ok_or(FFGLError::NullPointer("SetParameterStruct"))?;
            let index = set.ParameterNumber as usize;
            if index >= count {
                return Err(FFGLError::ParamOutOfRange { index, count });
            }
            inst.inner.set_param(index, set.NewParameterValue.as_f32());
            Ok(FFMixed::from_u32(FF_SUCCESS))
        }
        Op::GetParameterDisplay => {
            let index = input.as_u32() as usize;
            if index >= count {
                return Err(FFGLError::ParamOutOfRange { index, count });
            }
            let text = inst.inner.param_display(index);
            let end = text.find('\0').unwrap_or(text.len());
            inst.display = CString::new(&text[..end]).unwrap_or_default();
            Ok(FFMixed::from_ptr(inst.display.as_ptr()))
        }

        Op::ProcessOpenGL => {
            let host = unsafe { input.as_ptr::<ProcessOpenGLStruct>().as_ref() }
                .ok_or(FFGLError::NullPointer("ProcessOpenGLStruct"))?;
            let frame = unsafe { GLInput::from_host(host) }?;

            let needed = inputs.0;
            if frame.textures.len() < needed as usize {
                return Err(FFGLError::MissingInputs {
                    needed,
                    got: frame.textures.len(),
                });
            }

            inst.inner.draw(&inst.data, frame)?;
            Ok(FFMixed::from_u32(FF_SUCCESS))
        }
        Op::SetTime => {
            let millis = unsafe { input.as_ptr::<f64>().as_ref() }
                .ok_or(FFGLError::NullPointer("host time"))?;
            inst.data.set_time(*millis);
            Ok(FFMixed::from_u32(FF_SUCCESS))
        }
        Op::SetBeatInfo => {
            let beat = unsafe { input.as_ptr::<SetBeatinfoStruct>().as_ref() }
                .ok_or(FFGLError::NullPointer("SetBeatinfoStruct"))?;
            inst.data.set_beat(*beat);
            Ok(FFMixed::from_u32(FF_SUCCESS))
        }
        Op::Resize => {
            let viewport = unsafe { input.as_ptr::<FFGLViewportStruct>().as_ref() }
                .ok_or(FFGLError::NullPointer("FFGLViewportStruct"))?;
            inst.data.set_viewport(viewport);
            Ok(FFMixed::from_u32(FF_SUCCESS))
        }

        other => Err(FFGLError::Unsupported(other)),
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;
    use std::sync::Mutex;

    use super::*;
    use crate::handler::simplified::{SimpleFFGLHandler, SimpleFFGLInstance};
    use crate::info::{fixed_name, PluginInfo, PluginType};
    use crate::parameters::{ParamInfo, ParamValues, SimpleParamInfo};

    static GAIN: SimpleParamInfo = SimpleParamInfo::standard(c"Gain", 0.5);
    static MIX: SimpleParamInfo = SimpleParamInfo::standard(c"Mix", 0.25).in_group("Blend");
    static TABLE: [&dyn ParamInfo; 2] = [&GAIN, &MIX];

    /// Handle that makes [`Counter::draw`] panic.
    const EXPLODING_TEXTURE: u32 = 0xDEAD;

    /// Viewport `x` of every dropped [`Counter`].
    static DROPPED: Mutex<Vec<u32>> = Mutex::new(Vec::new());

    struct Counter {
        id: u32,
        params: ParamValues<2>,
        frames: u32,
    }

    impl Drop for Counter {
        fn drop(&mut self) {
            DROPPED.lock().unwrap().push(self.id);
        }
    }

    impl SimpleFFGLInstance for Counter {
        fn new(inst_data: &FFGLData) -> anyhow::Result<Self> {
            Ok(Counter {
                id: inst_data.viewport.x,
                params: ParamValues::from_defaults(&TABLE),
                frames: 0,
            })
        }

        fn plugin_info() -> PluginInfo {
            PluginInfo {
                unique_id: *b"CNTR",
                name: fixed_name("Counter"),
                ty: PluginType::Effect,
                version: (0, 1),
                about: String::new(),
                description: String::new(),
                inputs: (1, 1),
            }
        }

        fn num_params() -> usize {
            TABLE.len()
        }

        fn param_info(index: usize) -> &'static dyn ParamInfo {
            TABLE[index]
        }

        fn get_param(&self, index: usize) -> f32 {
            self.params.get(index).unwrap()
        }

        fn set_param(&mut self, index: usize, value: f32) {
            self.params.set(&TABLE, index, value).unwrap();
        }

        fn draw(&mut self, _data: &FFGLData, frame_data: GLInput) -> anyhow::Result<()> {
            if frame_data.first().map(|t| t.Handle) == Some(EXPLODING_TEXTURE) {
                panic!("draw exploded");
            }
            self.frames += 1;
            Ok(())
        }
    }

    static STATE: PluginState<SimpleFFGLHandler<Counter>> = PluginState::new();

    fn call(op: Op, input: FFMixed, instance: *mut c_void) -> FFMixed {
        unsafe { default_ffgl_entry(&STATE, op as u32, input, instance) }
    }

    fn instantiate(id: u32) -> *mut c_void {
        let viewport = FFGLViewportStruct {
            x: id,
            y: 0,
            width: 64,
            height: 32,
        };
        let answer = call(Op::InstantiateGL, FFMixed::from_ptr(&viewport), std::ptr::null_mut());
        assert_ne!(answer.as_u32(), FF_FAIL);
        answer.as_ptr()
    }

    fn deinstantiate(inst: *mut c_void) -> u32 {
        call(Op::DeinstantiateGL, FFMixed::from_u32(0), inst).as_u32()
    }

    fn set(inst: *mut c_void, index: u32, value: f32) -> u32 {
        let set = SetParameterStruct {
            ParameterNumber: index,
            NewParameterValue: FFMixed::from_f32(value),
        };
        call(Op::SetParameter, FFMixed::from_ptr(&set), inst).as_u32()
    }

    fn get(inst: *mut c_void, index: u32) -> f32 {
        call(Op::GetParameter, FFMixed::from_u32(index), inst).as_f32()
    }

    fn process(inst: *mut c_void, handles: &[u32]) -> u32 {
        let mut textures: Vec<FFGLTextureStruct> = handles
            .iter()
            .map(|&handle| FFGLTextureStruct {
                Width: 64,
                Height: 32,
                HardwareWidth: 64,
                HardwareHeight: 32,
                Handle: handle,
            })
            .collect();
        let mut slots: Vec<*mut FFGLTextureStruct> =
            textures.iter_mut().map(|t| t as *mut _).collect();
        let frame = ProcessOpenGLStruct {
            numInputTextures: slots.len() as u32,
            inputTextures: slots.as_mut_ptr(),
            HostFBO: 0,
        };
        call(Op::ProcessOpenGL, FFMixed::from_ptr(&frame), inst).as_u32()
    }

    fn frames(inst: *mut c_void) -> u32 {
        unsafe { (*(inst as *mut Instance<Counter>)).inner.frames }
    }

    #[test]
    fn parameters_are_clamped_and_bounds_checked() {
        let inst = instantiate(1);

        assert_eq!(get(inst, 0), 0.5);
        assert_eq!(get(inst, 1), 0.25);

        assert_eq!(set(inst, 0, 7.0), FF_SUCCESS);
        assert_eq!(get(inst, 0), 1.0);
        assert_eq!(set(inst, 1, -3.0), FF_SUCCESS);
        assert_eq!(get(inst, 1), 0.0);

        assert_eq!(get(inst, 5), 0.0);
        assert_eq!(set(inst, 3, 0.5), FF_FAIL);
        assert_eq!(get(inst, 0), 1.0);

        assert_eq!(deinstantiate(inst), FF_SUCCESS);
    }

    #[test]
    fn display_string_follows_the_value() {
        let inst = instantiate(2);
        set(inst, 1, 0.3);

        let answer = call(Op::GetParameterDisplay, FFMixed::from_u32(1), inst);
        let text = unsafe { CStr::from_ptr(answer.as_ptr::<std::ffi::c_char>()) };
        assert_eq!(text.to_str().unwrap(), "0.30");

        let missing = call(Op::GetParameterDisplay, FFMixed::from_u32(2), inst);
        assert_eq!(missing.as_u32(), FF_FAIL);

        deinstantiate(inst);
    }

    #[test]
    fn process_needs_an_input_texture() {
        let inst = instantiate(3);

        assert_eq!(process(inst, &[]), FF_FAIL);
        assert_eq!(
            call(Op::ProcessOpenGL, FFMixed::from_u32(0), inst).as_u32(),
            FF_FAIL
        );
        assert_eq!(frames(inst), 0);

        assert_eq!(process(inst, &[7]), FF_SUCCESS);
        assert_eq!(process(inst, &[7]), FF_SUCCESS);
        assert_eq!(frames(inst), 2);

        deinstantiate(inst);
    }

    #[test]
    fn panics_answer_fail_and_leave_the_instance_usable() {
        let inst = instantiate(4);

        assert_eq!(process(inst, &[EXPLODING_TEXTURE]), FF_FAIL);
        assert_eq!(process(inst, &[7]), FF_SUCCESS);
        assert_eq!(frames(inst), 1);

        deinstantiate(inst);
    }

    #[test]
    fn host_time_beat_and_resize_reach_the_instance() {
        let inst = instantiate(5);

        let millis = 2500.0f64;
        assert_eq!(
            call(Op::SetTime, FFMixed::from_ptr(&millis), inst).as_u32(),
            FF_SUCCESS
        );
        let beat = SetBeatinfoStruct {
            bpm: 96.0,
            barPhase: 0.5,
        };
        assert_eq!(
            call(Op::SetBeatInfo, FFMixed::from_ptr(&beat), inst).as_u32(),
            FF_SUCCESS
        );
        let viewport = FFGLViewportStruct {
            x: 5,
            y: 0,
            width: 1920,
            height: 1080,
        };
        assert_eq!(
            call(Op::Resize, FFMixed::from_ptr(&viewport), inst).as_u32(),
            FF_SUCCESS
        );

        let data = unsafe { &(*(inst as *mut Instance<Counter>)).data };
        assert_eq!(data.get_dimensions(), (1920, 1080));
        assert_eq!(data.host_beat.bpm, 96.0);
        assert_eq!(
            data.host_time,
            std::time::UNIX_EPOCH + std::time::Duration::from_millis(2500)
        );

        deinstantiate(inst);
    }

    #[test]
    fn deinstantiate_drops_the_instance() {
        let inst = instantiate(6);
        assert!(!DROPPED.lock().unwrap().contains(&6));

        assert_eq!(deinstantiate(inst), FF_SUCCESS);
        assert!(DROPPED.lock().unwrap().contains(&6));

        assert_eq!(deinstantiate(std::ptr::null_mut()), FF_FAIL);
        let orphan = call(Op::GetParameter, FFMixed::from_u32(0), std::ptr::null_mut());
        assert_eq!(orphan.as_u32(), FF_FAIL);
    }

    #[test]
    fn unsupported_ops_fail_without_touching_the_instance() {
        let inst = instantiate(7);
        assert_eq!(
            call(Op::ProcessFrame, FFMixed::from_u32(0), inst).as_u32(),
            FF_FAIL
        );
        let unknown = unsafe { default_ffgl_entry(&STATE, 999, FFMixed::from_u32(0), inst) };
        assert_eq!(unknown.as_u32(), FF_FAIL);
        assert_eq!(get(inst, 0), 0.5);
        deinstantiate(inst);
    }
}
