//! Inputs from the host to your plugin

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::ffi::*;
use crate::{FFGLError, FFGLResult};

/// Texture inputs for one `PROCESSOPENGL` call.
#[derive(Debug, Clone)]
pub struct GLInput {
    /// Host textures in slot order. Null slots are skipped.
    pub textures: Vec<FFGLTextureStruct>,
    /// Framebuffer the host expects the result in.
    pub host: u32,
}

impl GLInput {
    /// Copy the texture descriptors out of the host struct.
    ///
    /// # Safety
    ///
    /// `val.inputTextures` must point at `val.numInputTextures` readable
    /// pointers, each null or pointing at a valid texture struct.
    pub unsafe fn from_host(val: &ProcessOpenGLStruct) -> FFGLResult<Self> {
        if val.numInputTextures > 0 && val.inputTextures.is_null() {
            return Err(FFGLError::NullPointer("inputTextures"));
        }

        let slots: &[*mut FFGLTextureStruct] = if val.numInputTextures == 0 {
            &[]
        } else {
            unsafe {
                std::slice::from_raw_parts(val.inputTextures, val.numInputTextures as usize)
            }
        };

        let textures = slots
            .iter()
            .filter(|slot| !slot.is_null())
            .map(|slot| unsafe { **slot })
            .collect();

        Ok(GLInput {
            textures,
            host: val.HostFBO,
        })
    }

    pub fn first(&self) -> Option<&FFGLTextureStruct> {
        self.textures.first()
    }
}

/// Standard data that hosts provide to all instances
#[derive(Debug)]
pub struct FFGLData {
    pub created_at: Instant,
    pub viewport: FFGLViewportStruct,
    pub host_time: SystemTime,
    pub host_beat: SetBeatinfoStruct,
}

impl FFGLData {
    pub fn new(viewport: &FFGLViewportStruct) -> FFGLData {
        Self {
            created_at: Instant::now(),
            viewport: *viewport,
            host_time: SystemTime::now(),
            host_beat: SetBeatinfoStruct {
                bpm: 120.0,
                barPhase: 0.0,
            },
        }
    }

    pub fn set_beat(&mut self, beat: SetBeatinfoStruct) {
        self.host_beat = beat;
    }

    pub fn set_time(&mut self, host_millis: f64) {
        if host_millis.is_finite() && host_millis >= 0.0 {
            self.host_time = UNIX_EPOCH + Duration::from_secs_f64(host_millis / 1000.0);
        }
    }

    pub fn set_viewport(&mut self, viewport: &FFGLViewportStruct) {
        self.viewport = *viewport;
    }

    pub fn get_dimensions(&self) -> (u32, u32) {
        (self.viewport.width, self.viewport.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture(handle: u32) -> FFGLTextureStruct {
        FFGLTextureStruct {
            Width: 64,
            Height: 32,
            HardwareWidth: 64,
            HardwareHeight: 32,
            Handle: handle,
        }
    }

    #[test]
    fn reads_pointer_array_and_skips_null_slots() {
        let mut a = texture(7);
        let mut b = texture(9);
        let mut slots = [&mut a as *mut _, std::ptr::null_mut(), &mut b as *mut _];
        let host = ProcessOpenGLStruct {
            numInputTextures: 3,
            inputTextures: slots.as_mut_ptr(),
            HostFBO: 4,
        };

        let input = unsafe { GLInput::from_host(&host) }.unwrap();
        assert_eq!(input.host, 4);
        let handles: Vec<_> = input.textures.iter().map(|t| t.Handle).collect();
        assert_eq!(handles, vec![7, 9]);
    }

    #[test]
    fn null_array_with_count_is_rejected() {
        let host = ProcessOpenGLStruct {
            numInputTextures: 1,
            inputTextures: std::ptr::null_mut(),
            HostFBO: 0,
        };
        assert!(unsafe { GLInput::from_host(&host) }.is_err());
    }

    #[test]
    fn negative_host_time_is_ignored() {
        let mut data = FFGLData::new(&FFGLViewportStruct::default());
        data.set_time(2000.0);
        let before = data.host_time;
        data.set_time(-1.0);
        assert_eq!(data.host_time, before);
        assert_eq!(before, UNIX_EPOCH + Duration::from_secs(2));
    }
}
