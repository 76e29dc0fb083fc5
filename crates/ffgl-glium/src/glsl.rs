//! Picking a GLSL dialect the host context can compile.

use glium::CapabilitiesSource;

/// GLSL versions shaders in this workspace are written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GlslVersion {
    Glsl330Core,
    Glsl410Core,
}

impl GlslVersion {
    pub fn header(self) -> &'static str {
        match self {
            GlslVersion::Glsl330Core => "#version 330 core\n",
            GlslVersion::Glsl410Core => "#version 410 core\n",
        }
    }

    fn from_gl(major: u8, minor: u8) -> Option<Self> {
        match (major, minor) {
            (4, 1) => Some(GlslVersion::Glsl410Core),
            (3, 3) => Some(GlslVersion::Glsl330Core),
            _ => None,
        }
    }

    /// Prefix `body` with this version's `#version` line.
    pub fn prepend_to(self, body: &str) -> String {
        let mut source = String::with_capacity(body.len() + 24);
        source.push_str(self.header());
        source.push_str(body);
        source
    }
}

/// Highest supported version out of a list of desktop GL versions.
pub fn best_of(versions: &[glium::Version]) -> Option<GlslVersion> {
    versions
        .iter()
        .filter_map(|v| match v {
            glium::Version(glium::Api::Gl, major, minor) => GlslVersion::from_gl(*major, *minor),
            _ => None,
        })
        .max()
}

/// Best GLSL version for the given context, or `None` if the context speaks
/// none of [`GlslVersion`].
pub fn get_best_version(ctx: &impl CapabilitiesSource) -> Option<GlslVersion> {
    best_of(&ctx.get_capabilities().supported_glsl_versions)
}
