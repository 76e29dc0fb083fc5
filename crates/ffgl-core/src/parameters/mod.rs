//! Structs and enums for FFGL parameters.
//! Use [SimpleParamInfo] for plain tables of parameters.
//! Implement [ParamInfo] yourself for more complex cases.

mod info;
mod values;
pub use info::*;
pub use values::*;
