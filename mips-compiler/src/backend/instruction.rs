//! Machine-instruction types and assembly output items.
//!
//! This module defines the typed instruction set (`MipsInstr`) and the
//! structured assembly output type (`AsmItem`) used throughout the backend.

use super::abi::Register;
use std::fmt;

// ============================================================================
// Typed machine instruction
// ============================================================================

/// A typed machine instruction.
///
/// Instructions are organised by format:
///
/// - **R-type** (`op rd, rs, rt`): register-to-register operations, plus the
///   dual-output `mult`/`div` which write HI/LO and are read back with `mflo`.
/// - **I-type** (`op rt, rs, imm`): immediates (16-bit fields), loads and
///   stores with a signed displacement, and compare-and-branch.
/// - **J-type** (`j label`) and the register jump `jr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MipsInstr {
    // ── R-type ──────────────────────────────────────────────────────────
    /// `add rd, rs, rt`
    Add { d: Register, s: Register, t: Register },
    /// `sub rd, rs, rt`
    Sub { d: Register, s: Register, t: Register },
    /// `slt rd, rs, rt`: rd = (rs < rt)
    Slt { d: Register, s: Register, t: Register },
    /// `mult rs, rt`: product into HI:LO
    Mult { s: Register, t: Register },
    /// `div rs, rt`: quotient into LO, remainder into HI
    Div { s: Register, t: Register },
    /// `mflo rd`
    Mflo { d: Register },
    /// `jr rs`
    Jr { s: Register },

    // ── I-type ──────────────────────────────────────────────────────────
    /// `addi rt, rs, imm`
    Addi { t: Register, s: Register, imm: i16 },
    /// `lui rt, imm`: imm into the upper half, lower half cleared
    Lui { t: Register, imm: u16 },
    /// `ori rt, rs, imm`: zero-extended immediate
    Ori { t: Register, s: Register, imm: u16 },
    /// `lw rt, offset(base)`
    Lw { t: Register, offset: i32, base: Register },
    /// `sw rt, offset(base)`
    Sw { t: Register, offset: i32, base: Register },
    /// `beq rs, rt, label`
    Beq { s: Register, t: Register, label: String },
    /// `bne rs, rt, label`
    Bne { s: Register, t: Register, label: String },

    // ── J-type ──────────────────────────────────────────────────────────
    /// `j label`
    J { label: String },
}

// ── Convenience constructors ────────────────────────────────────────────

impl MipsInstr {
    /// `add rd, rs, $zero`: idiomatic register-to-register move.
    pub fn mov(d: Register, s: Register) -> Self {
        MipsInstr::Add {
            d,
            s,
            t: Register::ZERO_REG,
        }
    }

    /// `addi rt, $zero, imm`: load a small immediate.
    pub fn load_imm16(t: Register, imm: i16) -> Self {
        MipsInstr::Addi {
            t,
            s: Register::ZERO_REG,
            imm,
        }
    }

    /// `lw rt, offset($fp)`: load from a frame slot.
    pub fn load_frame(t: Register, offset: i32) -> Self {
        MipsInstr::Lw {
            t,
            offset,
            base: Register::FRAME_PTR,
        }
    }

    /// `sw rt, offset($fp)`: store to a frame slot.
    pub fn store_frame(t: Register, offset: i32) -> Self {
        MipsInstr::Sw {
            t,
            offset,
            base: Register::FRAME_PTR,
        }
    }

    pub fn jump(label: impl Into<String>) -> Self {
        MipsInstr::J {
            label: label.into(),
        }
    }

    /// Whether this is a store (`sw`).
    pub fn is_store(&self) -> bool {
        matches!(self, MipsInstr::Sw { .. })
    }
}

// ── Display (assembly text) ────────────────────────────────────

impl fmt::Display for MipsInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // R-type
            MipsInstr::Add { d, s, t } => write!(f, "\tadd {d}, {s}, {t}"),
            MipsInstr::Sub { d, s, t } => write!(f, "\tsub {d}, {s}, {t}"),
            MipsInstr::Slt { d, s, t } => write!(f, "\tslt {d}, {s}, {t}"),
            MipsInstr::Mult { s, t } => write!(f, "\tmult {s}, {t}"),
            MipsInstr::Div { s, t } => write!(f, "\tdiv {s}, {t}"),
            MipsInstr::Mflo { d } => write!(f, "\tmflo {d}"),
            MipsInstr::Jr { s } => write!(f, "\tjr {s}"),

            // I-type
            MipsInstr::Addi { t, s, imm } => write!(f, "\taddi {t}, {s}, {imm}"),
            MipsInstr::Lui { t, imm } => write!(f, "\tlui {t}, {imm:#x}"),
            MipsInstr::Ori { t, s, imm } => write!(f, "\tori {t}, {s}, {imm:#x}"),
            MipsInstr::Lw { t, offset, base } => write!(f, "\tlw {t}, {offset}({base})"),
            MipsInstr::Sw { t, offset, base } => write!(f, "\tsw {t}, {offset}({base})"),
            MipsInstr::Beq { s, t, label } => write!(f, "\tbeq {s}, {t}, {label}"),
            MipsInstr::Bne { s, t, label } => write!(f, "\tbne {s}, {t}, {label}"),

            // J-type
            MipsInstr::J { label } => write!(f, "\tj {label}"),
        }
    }
}

// ============================================================================
// AsmItem (top-level assembly output element)
// ============================================================================

/// A structured assembly output element, later flattened to text.
#[derive(Debug, Clone)]
pub enum AsmItem {
    /// Section directive (`.data`, `.text`).
    Directive(String),
    /// A label on its own line.
    Label(String, Option<usize>),
    /// A typed machine instruction.
    Instr {
        instr: MipsInstr,
        comment: Option<String>,
        ir_map: Option<usize>,
    },
}
