//! GLSL sources for the effect and program creation.
//!
//! The bodies under `shaders/` carry no `#version` line; it is prepended per
//! host context by [`ShaderSources::for_version`].

use anyhow::Context as _;
use ffgl_glium::glsl::GlslVersion;
use glium::backend::Facade;
use glium::program::{Program, ProgramCreationInput};
use tracing::{debug, error};

pub const VERTEX_BODY: &str = include_str!("../shaders/sketch_reveal.vert");
pub const FRAGMENT_BODY: &str = include_str!("../shaders/sketch_reveal.frag");

#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub version: GlslVersion,
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn for_version(version: GlslVersion) -> Self {
        ShaderSources {
            version,
            vertex: version.prepend_to(VERTEX_BODY),
            fragment: version.prepend_to(FRAGMENT_BODY),
        }
    }

    /// Compile and link. Compiler and linker logs end up in the error and in
    /// the `error!` log line.
    pub fn compile(&self, facade: &impl Facade) -> anyhow::Result<Program> {
        let program = Program::new(
            facade,
            ProgramCreationInput::SourceCode {
                vertex_shader: &self.vertex,
                tessellation_control_shader: None,
                tessellation_evaluation_shader: None,
                geometry_shader: None,
                fragment_shader: &self.fragment,
                transform_feedback_varyings: None,
                // The shader writes plain values; no sRGB conversion on output.
                outputs_srgb: true,
                uses_point_size: false,
            },
        );

        match program {
            Ok(program) => {
                debug!(version = ?self.version, "sketch reveal program linked");
                Ok(program)
            }
            Err(err) => {
                error!(version = ?self.version, "shader build failed: {err}");
                Err(err).context("building sketch reveal shader program")
            }
        }
    }
}
