//! Static identity of a plugin, as reported through `GET_INFO` and
//! `GETEXTENDEDINFO`.

use std::ffi::CString;

use crate::ffi::{
    PluginExtendedInfoStruct, PluginInfoStruct, FFGL_API_MAJOR, FFGL_API_MINOR,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginType {
    Effect,
    Source,
    Mixer,
}

impl PluginType {
    pub fn code(self) -> u32 {
        match self {
            PluginType::Effect => 0,
            PluginType::Source => 1,
            PluginType::Mixer => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PluginInfo {
    pub unique_id: [u8; 4],
    /// Null-padded, not necessarily null-terminated.
    pub name: [u8; 16],
    pub ty: PluginType,
    pub version: (u32, u32),
    pub about: String,
    pub description: String,
    /// Accepted input texture count, inclusive.
    pub inputs: (u32, u32),
}

/// Left-align `name` into a fixed 16 byte field, null padded.
pub const fn fixed_name(name: &str) -> [u8; 16] {
    let bytes = name.as_bytes();
    let mut out = [0u8; 16];
    let mut i = 0;
    while i < bytes.len() && i < 16 {
        out[i] = bytes[i];
        i += 1;
    }
    out
}

/// The host-facing structs for one plugin, with the strings they point into.
///
/// Lives in a static for the lifetime of the library, so the pointers handed
/// to the host stay valid.
pub struct HostInfo {
    pub info: PluginInfoStruct,
    pub extended: PluginExtendedInfoStruct,
    pub inputs: (u32, u32),
    _description: CString,
    _about: CString,
}

// SAFETY: the raw pointers in `extended` only ever point at the CStrings owned
// by the same value, which are never mutated.
unsafe impl Send for HostInfo {}
unsafe impl Sync for HostInfo {}

impl From<&PluginInfo> for HostInfo {
    fn from(info: &PluginInfo) -> Self {
        let description = c_string_lossy(&info.description);
        let about = c_string_lossy(&info.about);

        HostInfo {
            info: PluginInfoStruct {
                APIMajorVersion: FFGL_API_MAJOR,
                APIMinorVersion: FFGL_API_MINOR,
                PluginUniqueID: info.unique_id,
                PluginName: info.name,
                PluginType: info.ty.code(),
            },
            extended: PluginExtendedInfoStruct {
                PluginMajorVersion: info.version.0,
                PluginMinorVersion: info.version.1,
                Description: description.as_ptr(),
                About: about.as_ptr(),
                FreeFrameExtendedDataSize: 0,
                FreeFrameExtendedDataBlock: std::ptr::null_mut(),
            },
            inputs: info.inputs,
            _description: description,
            _about: about,
        }
    }
}

fn c_string_lossy(s: &str) -> CString {
    let end = s.find('\0').unwrap_or(s.len());
    CString::new(&s[..end]).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_name_pads_and_truncates() {
        assert_eq!(&fixed_name("Sketch")[..7], b"Sketch\0");
        assert_eq!(&fixed_name("A name far longer than sixteen"), b"A name far longe");
    }

    #[test]
    fn host_info_points_at_owned_strings() {
        let info = PluginInfo {
            unique_id: *b"TEST",
            name: fixed_name("Test"),
            ty: PluginType::Effect,
            version: (1, 2),
            about: "about".into(),
            description: "desc".into(),
            inputs: (1, 1),
        };
        let host = HostInfo::from(&info);
        assert_eq!(host.info.APIMajorVersion, 2);
        assert_eq!(host.extended.PluginMinorVersion, 2);
        let desc = unsafe { std::ffi::CStr::from_ptr(host.extended.Description) };
        assert_eq!(desc.to_str().unwrap(), "desc");
    }
}
