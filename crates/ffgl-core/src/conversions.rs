//! Typed views of the numeric codes the host sends through `plugMain`.

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

use crate::FFGLError;

/// Function codes understood by [`crate::entry::default_ffgl_entry`].
///
/// Values come from `FreeFrame.h` (0..=16), `FFGL.h` (17..=23) and the
/// FFGL 2.x additions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum Op {
    GetInfo = 0,
    Initialise = 1,
    Deinitialise = 2,
    ProcessFrame = 3,
    GetNumParameters = 4,
    GetParameterName = 5,
    GetParameterDefault = 6,
    GetParameterDisplay = 7,
    SetParameter = 8,
    GetParameter = 9,
    GetPluginCaps = 10,
    Instantiate = 11,
    Deinstantiate = 12,
    GetExtendedInfo = 13,
    ProcessFrameCopy = 14,
    GetParameterType = 15,
    GetInputStatus = 16,
    ProcessOpenGL = 17,
    InstantiateGL = 18,
    DeinstantiateGL = 19,
    SetTime = 20,
    Connect = 21,
    Disconnect = 22,
    Resize = 23,
    GetNumParameterElements = 31,
    GetParameterUsage = 32,
    GetPluginShortName = 33,
    InitialiseV2 = 34,
    GetParameterElementName = 35,
    GetParameterElementValue = 36,
    SetParameterElementValue = 37,
    SetBeatInfo = 38,
    SetHostInfo = 39,
    SetSampleRate = 40,
    GetRange = 41,
    GetThumbnail = 42,
    GetNumFileParameterExtensions = 43,
    GetFileParameterExtension = 44,
    GetParameterVisibility = 45,
    GetParameterEvents = 46,
    GetNumElementSeparators = 47,
    GetSeparatorElementIndex = 48,
    EnablePluginCap = 49,
    GetParamGroup = 50,
    GetParamDisplayName = 51,
}

impl TryFrom<u32> for Op {
    type Error = FFGLError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Op::from_u32(code).ok_or(FFGLError::UnknownOp(code))
    }
}

/// Capabilities the host can query with `GETPLUGINCAPS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum PluginCapacity {
    Video16Bit = 0,
    Video24Bit = 1,
    Video32Bit = 2,
    ProcessFrameCopy = 3,
    ProcessOpenGL = 4,
    SetTime = 5,
    MinInputFrames = 10,
    MaxInputFrames = 11,
    CopyOrInPlace = 15,
    TopLeftTextureOrientation = 16,
}

impl PluginCapacity {
    pub fn from_code(code: u32) -> Option<Self> {
        Self::from_u32(code)
    }
}
