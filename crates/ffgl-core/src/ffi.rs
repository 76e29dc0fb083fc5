//! C-repr structs and numeric codes of the FFGL 2.x plugin ABI.
//!
//! Layouts follow `FreeFrame.h` / `FFGL.h` from the FFGL SDK. Op codes live in
//! [`crate::conversions::Op`]; this module only carries what crosses the
//! boundary as raw data.

#![allow(non_snake_case)]

use std::ffi::{c_char, c_void};

// Result codes
pub const FF_SUCCESS: u32 = 0;
pub const FF_FAIL: u32 = 0xFFFF_FFFF;
pub const FF_TRUE: u32 = 1;
pub const FF_FALSE: u32 = 0;
pub const FF_SUPPORTED: u32 = 1;
pub const FF_UNSUPPORTED: u32 = 0;

// Input status
pub const FF_INPUT_NOTINUSE: u32 = 0;
pub const FF_INPUT_INUSE: u32 = 1;

/// API version this crate speaks.
pub const FFGL_API_MAJOR: u32 = 2;
pub const FFGL_API_MINOR: u32 = 1;

/// The value type passed in and out of `plugMain`.
///
/// Scalars travel in `UIntValue` (floats as their bit pattern), everything
/// else as a pointer.
#[repr(C)]
#[derive(Copy, Clone)]
pub union FFMixed {
    pub UIntValue: u32,
    pub PointerValue: *mut c_void,
}

impl FFMixed {
    pub fn from_u32(value: u32) -> Self {
        // Zero the full width first so the upper half of the pointer is
        // never garbage on 64-bit hosts.
        let mut mixed = FFMixed {
            PointerValue: std::ptr::null_mut(),
        };
        mixed.UIntValue = value;
        mixed
    }

    pub fn from_f32(value: f32) -> Self {
        Self::from_u32(value.to_bits())
    }

    pub fn from_ptr<T>(ptr: *const T) -> Self {
        FFMixed {
            PointerValue: ptr as *mut c_void,
        }
    }

    pub fn as_u32(&self) -> u32 {
        // SAFETY: every bit pattern is a valid u32.
        unsafe { self.UIntValue }
    }

    pub fn as_f32(&self) -> f32 {
        f32::from_bits(self.as_u32())
    }

    pub fn as_ptr<T>(&self) -> *mut T {
        // SAFETY: every bit pattern is a valid raw pointer; dereferencing it
        // is the caller's business.
        unsafe { self.PointerValue as *mut T }
    }
}

impl std::fmt::Debug for FFMixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FFMixed({:#x})", self.as_u32())
    }
}

/// Answer to `GET_INFO`.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct PluginInfoStruct {
    pub APIMajorVersion: u32,
    pub APIMinorVersion: u32,
    pub PluginUniqueID: [u8; 4],
    pub PluginName: [u8; 16],
    pub PluginType: u32,
}

/// Answer to `GETEXTENDEDINFO`.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct PluginExtendedInfoStruct {
    pub PluginMajorVersion: u32,
    pub PluginMinorVersion: u32,
    pub Description: *const c_char,
    pub About: *const c_char,
    pub FreeFrameExtendedDataSize: u32,
    pub FreeFrameExtendedDataBlock: *mut c_void,
}

#[repr(C)]
#[derive(Copy, Clone)]
pub struct SetParameterStruct {
    pub ParameterNumber: u32,
    pub NewParameterValue: FFMixed,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct SetBeatinfoStruct {
    pub bpm: f32,
    pub barPhase: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct RangeStruct {
    pub min: f32,
    pub max: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct GetRangeStruct {
    pub parameterNumber: u32,
    pub range: RangeStruct,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct StringBufferStruct {
    pub address: *mut u8,
    pub maxToWrite: u32,
}

/// Used for `GET_PARAM_GROUP` and friends: the host owns the buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct GetStringStruct {
    pub parameterNumber: u32,
    pub stringBuffer: StringBufferStruct,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct FFGLViewportStruct {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FFGLTextureStruct {
    pub Width: u32,
    pub Height: u32,
    pub HardwareWidth: u32,
    pub HardwareHeight: u32,
    pub Handle: u32,
}

/// Argument of `PROCESSOPENGL`. `inputTextures` points at an array of
/// `numInputTextures` texture pointers, any of which may be null.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ProcessOpenGLStruct {
    pub numInputTextures: u32,
    pub inputTextures: *mut *mut FFGLTextureStruct,
    pub HostFBO: u32,
}

/// Write `string` into `dest` as a null-terminated C string, truncating if
/// needed. Returns the number of bytes written, terminator included.
pub fn fill_c_buffer(dest: &mut [u8], string: &str) -> usize {
    let Some(room) = dest.len().checked_sub(1) else {
        return 0;
    };

    // Interior nuls would end the string early on the host side anyway.
    let bytes = string.as_bytes();
    let len = bytes
        .iter()
        .position(|b| *b == 0)
        .unwrap_or(bytes.len())
        .min(room);

    dest[..len].copy_from_slice(&bytes[..len]);
    dest[len] = 0;
    len + 1
}

/// Copy a Rust string into a host-provided buffer, null-terminating it.
///
/// # Safety
///
/// `address` must be null or valid for writes of `max_to_write` bytes.
pub unsafe fn copy_str_to_host_buffer(address: *mut u8, max_to_write: usize, string: &str) -> usize {
    if address.is_null() || max_to_write == 0 {
        return 0;
    }

    let dest = unsafe { std::slice::from_raw_parts_mut(address, max_to_write) };
    fill_c_buffer(dest, string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_c_buffer_truncates_and_terminates() {
        let mut buf = [0xAAu8; 5];
        let written = fill_c_buffer(&mut buf, "Hatching");
        assert_eq!(written, 5);
        assert_eq!(&buf, b"Hatc\0");
    }

    #[test]
    fn fill_c_buffer_stops_at_interior_nul() {
        let mut buf = [0xAAu8; 16];
        let written = fill_c_buffer(&mut buf, "Edge\0Gain");
        assert_eq!(written, 5);
        assert_eq!(&buf[..5], b"Edge\0");
    }

    #[test]
    fn fill_c_buffer_ignores_empty_buffers() {
        let mut buf: [u8; 0] = [];
        assert_eq!(fill_c_buffer(&mut buf, "x"), 0);
    }

    #[test]
    fn mixed_float_bits_survive() {
        let mixed = FFMixed::from_f32(0.47);
        assert_eq!(mixed.as_f32(), 0.47);
    }
}
