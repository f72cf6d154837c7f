//! # Wrapper Code Generation
//!
//! Modelica wrapper generation and identifier mangling.

mod modelica_codegen;
pub mod naming;

pub use modelica_codegen::*;
pub use naming::{mangle, NameStyle};
