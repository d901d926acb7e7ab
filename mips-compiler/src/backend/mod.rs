//! MIPS backend: lowers quads to MIPS-style assembly.
//!
//! Module layout:
//! - `abi`         register definitions and ABI constants
//! - `instruction` typed machine instructions and assembly output items
//! - `frame`       stack-slot assignment
//! - `regalloc`    register descriptor and round-robin allocator
//! - `codegen`     code generation driver (quads to assembly)

pub mod abi;
pub mod frame;
pub mod instruction;
pub mod regalloc;
mod codegen;

// Re-export the public API at `backend::` level.
pub use codegen::MipsAsm;

use crate::ir::ProgramIR;
use abi::Register;
use codegen::Codegen;

/// How a `RETURN` leaves the program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReturnStyle {
    /// Spin on a unique `__halt_<N>` label.
    #[default]
    Halt,
    /// `jr $ra`.
    JumpRegister,
}

/// Emitter settings.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub return_style: ReturnStyle,
    /// Number of allocatable registers, taken from the front of the pool.
    pub pool_size: usize,
    /// Trailing `#` comments naming the quad behind each instruction.
    pub annotate: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            return_style: ReturnStyle::Halt,
            pool_size: Register::ALLOCATABLE.len(),
            annotate: true,
        }
    }
}

/// Compile IR to assembly text with default options.
pub fn compile_ir_to_mips(ir: &ProgramIR) -> String {
    compile_ir_to_mips_mapped(ir, &EmitOptions::default()).join()
}

/// Compile IR to assembly with a line-to-quad mapping.
pub fn compile_ir_to_mips_mapped(ir: &ProgramIR, options: &EmitOptions) -> MipsAsm {
    let max = Register::ALLOCATABLE.len();
    if !(2..=max).contains(&options.pool_size) {
        log::warn!(
            "pool size {} out of range, clamping to 2..={max}",
            options.pool_size
        );
    }
    let mut cg = Codegen::new(options.clone());
    cg.emit_program(ir);
    cg.finish_codegen()
}
