//! Code generation state machine and assembly output.
//!
//! Contains the [`Codegen`] struct (the central code-generation driver),
//! buffer helpers, and final assembly emission.

mod lowering;

use super::abi::Register;
use super::frame::StackFrame;
use super::instruction::{AsmItem, MipsInstr};
use super::regalloc::{RegAllocator, RoundRobinAllocator};
use super::EmitOptions;
use crate::ir::{Opcode, ProgramIR};

/// Column at which trailing `#` comments start.
const COMMENT_COL: usize = 30;

// ============================================================================
// Output type
// ============================================================================

/// Final assembly text, one entry per output line, with the index of the
/// quad each line came from.
#[derive(Debug, Clone)]
pub struct MipsAsm {
    pub lines: Vec<String>,
    pub ir_mapping: Vec<Option<usize>>,
}

impl MipsAsm {
    pub fn join(&self) -> String {
        self.lines.join("\n")
    }
}

// ============================================================================
// Codegen state
// ============================================================================

/// Central code-generation driver.
///
/// Walks the quads once, keeps the register file and stack frame in step with
/// the emitted code, and produces the final [`MipsAsm`].
pub struct Codegen {
    pub(crate) out: Vec<AsmItem>,
    pub(crate) reg: Box<dyn RegAllocator>,
    pub(crate) frame: StackFrame,
    pub(crate) options: EmitOptions,
    pub(crate) stack_ready: bool,
    pub(crate) halt_count: usize,
    pub(crate) current_ir: Option<usize>,
    /// Annotation for the first instruction of the current quad.
    pub(crate) note: Option<String>,
}

impl Codegen {
    pub fn new(options: EmitOptions) -> Self {
        let reg = Box::new(RoundRobinAllocator::with_pool_size(options.pool_size));
        Self::with_regalloc(reg, options)
    }

    pub fn with_regalloc(reg: Box<dyn RegAllocator>, options: EmitOptions) -> Self {
        Self {
            out: Vec::new(),
            reg,
            frame: StackFrame::new(),
            options,
            stack_ready: false,
            halt_count: 0,
            current_ir: None,
            note: None,
        }
    }

    // ── Item emission helpers ───────────────────────────────────────────

    /// Push a typed machine instruction, attaching the pending quad note.
    pub(crate) fn push_asm(&mut self, instr: MipsInstr) {
        let comment = self.note.take();
        self.push_instr(instr, comment);
    }

    /// Push a typed machine instruction with its own comment.
    pub(crate) fn push_commented(&mut self, instr: MipsInstr, comment: impl Into<String>) {
        let comment = self.options.annotate.then(|| comment.into());
        self.push_instr(instr, comment);
    }

    fn push_instr(&mut self, instr: MipsInstr, comment: Option<String>) {
        self.out.push(AsmItem::Instr {
            instr,
            comment,
            ir_map: self.current_ir,
        });
    }

    pub(crate) fn push_label(&mut self, name: impl Into<String>) {
        self.out.push(AsmItem::Label(name.into(), self.current_ir));
    }

    // ── Program walk ────────────────────────────────────────────────────

    /// Lower every quad of `ir` in order.
    pub fn emit_program(&mut self, ir: &ProgramIR) {
        self.out.push(AsmItem::Directive(".data".to_string()));
        self.out.push(AsmItem::Directive(".text".to_string()));

        for (i, quad) in ir.instrs.iter().enumerate() {
            self.current_ir = Some(i);
            self.note = self.options.annotate.then(|| quad.to_string());

            if quad.op.is_control_flow_boundary() {
                self.clear_at_boundary();
            }
            // Top-level code reaching the machine before any function.
            if !self.stack_ready && !matches!(quad.op, Opcode::FuncBegin | Opcode::FuncEnd) {
                self.init_stack();
            }
            self.emit_instr(quad);
        }
        self.current_ir = None;
        self.note = None;
    }

    /// Drop every register residency; values are already in their slots.
    pub(crate) fn clear_at_boundary(&mut self) {
        log::trace!("boundary: clearing {} resident names", self.reg.register_file().len());
        self.reg.clear_residency();
    }

    /// One-time `$sp`/`$fp` setup.
    pub(crate) fn init_stack(&mut self) {
        if self.stack_ready {
            return;
        }
        self.stack_ready = true;
        self.push_commented(
            MipsInstr::Lui {
                t: Register::STACK_PTR,
                imm: 0x7fff,
            },
            "stack init",
        );
        self.push_instr(
            MipsInstr::Ori {
                t: Register::STACK_PTR,
                s: Register::STACK_PTR,
                imm: 0xeffc,
            },
            None,
        );
        self.push_instr(
            MipsInstr::Addi {
                t: Register::FRAME_PTR,
                s: Register::STACK_PTR,
                imm: 0,
            },
            None,
        );
    }

    // ── Final assembly ──────────────────────────────────────────────────

    pub fn finish_codegen(self) -> MipsAsm {
        let mut lines = Vec::new();
        let mut ir_mapping = Vec::new();
        Self::flatten_items(&self.out, &mut lines, &mut ir_mapping);
        MipsAsm { lines, ir_mapping }
    }

    fn flatten_items(items: &[AsmItem], lines: &mut Vec<String>, mapping: &mut Vec<Option<usize>>) {
        for item in items {
            match item {
                AsmItem::Directive(d) => {
                    lines.push(d.clone());
                    mapping.push(None);
                }
                AsmItem::Label(name, ir_map) => {
                    lines.push(format!("{name}:"));
                    mapping.push(*ir_map);
                }
                AsmItem::Instr {
                    instr,
                    comment,
                    ir_map,
                } => {
                    let base = instr.to_string();
                    let line = match comment {
                        Some(c) => {
                            let pad = COMMENT_COL.saturating_sub(base.len()).max(2);
                            format!("{}{}# {}", base, " ".repeat(pad), c)
                        }
                        None => base,
                    };
                    lines.push(line);
                    mapping.push(*ir_map);
                }
            }
        }
    }
}
