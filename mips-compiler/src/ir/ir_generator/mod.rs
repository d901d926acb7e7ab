//! AST to IR lowering module.
//!
//! This module handles the translation of the syntax tree into a linear
//! sequence of quads.

pub mod context;
pub mod expr;
pub mod stmt;

use crate::ir::ast::Program;
use crate::ir::ProgramIR;

/// Owns the temporary/label counters for one lowering session.
pub use context::IrGenerator;

/// Entry point for lowering an AST Program to ProgramIR.
pub fn lower(program: &Program) -> ProgramIR {
    IrGenerator::new().generate(program)
}
