use thiserror::Error;

use crate::conversions::Op;

pub type FFGLResult<T> = Result<T, FFGLError>;

/// Failures at the host boundary. Every variant answers `FF_FAIL`.
#[derive(Error, Debug)]
pub enum FFGLError {
    #[error("unknown op code {0}")]
    UnknownOp(u32),

    #[error("op {0:?} is not supported")]
    Unsupported(Op),

    #[error("host passed a null {0}")]
    NullPointer(&'static str),

    #[error("op {0:?} needs an instance")]
    NoInstance(Op),

    #[error("plugin needs {needed} input texture(s), host sent {got}")]
    MissingInputs { needed: u32, got: usize },

    #[error("parameter index {index} out of range (plugin has {count})")]
    ParamOutOfRange { index: usize, count: usize },

    #[error("panic inside plugin: {0}")]
    Panic(String),

    #[error(transparent)]
    Instance(#[from] anyhow::Error),
}
