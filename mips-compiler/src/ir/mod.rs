//! Intermediate Representation (IR) module.
//!
//! This module contains the syntax tree, the quad definitions, and the
//! tree-to-quad generator.

pub mod ir;
pub use ir::*;
pub mod ast;
pub mod ir_generator;
