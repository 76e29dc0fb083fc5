//! Borrowing host textures as glium objects.

use ffgl_core::ffi::FFGLTextureStruct;
use glium::backend::Facade;
use glium::texture::{Dimensions, MipmapsOption, UncompressedFloatFormat};
use glium::Texture2d;

/// Wrap a host texture without taking ownership; dropping the result leaves
/// the GL texture alive.
///
/// # Safety
///
/// `info.Handle` must name a live, unpadded 2D RGBA texture in the context
/// behind `facade`.
pub unsafe fn import_host_texture(facade: &impl Facade, info: &FFGLTextureStruct) -> Texture2d {
    unsafe {
        Texture2d::from_id(
            facade,
            UncompressedFloatFormat::U8U8U8U8,
            info.Handle,
            false,
            MipmapsOption::NoMipmap,
            Dimensions::Texture2d {
                width: info.Width,
                height: info.Height,
            },
        )
    }
}

/// Size of the host image in texels.
pub fn texture_size(info: &FFGLTextureStruct) -> (u32, u32) {
    (info.Width, info.Height)
}
