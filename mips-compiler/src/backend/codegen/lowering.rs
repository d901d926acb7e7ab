//! Quad → MIPS lowering.
//!
//! Implements `Codegen::emit_instr`, which translates a single quad into zero
//! or more typed machine instructions. Every value definition is stored to its
//! stack slot straight away, so register residency can be dropped at any
//! point without emitting code.

use super::Codegen;
use crate::backend::abi::Register;
use crate::backend::instruction::MipsInstr;
use crate::backend::ReturnStyle;
use crate::ir::{Opcode, Operand, Quad};

impl Codegen {
    /// Lower a single quad into typed machine instructions.
    pub(crate) fn emit_instr(&mut self, quad: &Quad) {
        match quad.op {
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div => self.emit_arith(quad),
            Opcode::Assign => self.emit_assign(quad),
            Opcode::Label => self.push_label(quad.result.as_str()),
            Opcode::Jmp => self.push_asm(MipsInstr::jump(quad.result.as_str())),
            Opcode::Jeq | Opcode::Jne | Opcode::Jgt | Opcode::Jlt => self.emit_cond_jump(quad),
            Opcode::Return => self.emit_return(&quad.arg1),
            Opcode::FuncBegin => {
                self.frame.reset();
                self.push_label(quad.result.as_str());
                self.init_stack();
                log::debug!("function {}", quad.result);
            }
            Opcode::FuncEnd => {
                log::debug!("function {} uses {} bytes of frame", quad.result, self.frame.size());
            }
            Opcode::Param | Opcode::Call => {
                log::warn!("{quad}: no calling convention, nothing emitted");
            }
        }
    }

    // ── Operand materialization ─────────────────────────────────────────

    /// Bring `op` into a register, avoiding `pinned` on eviction.
    ///
    /// Names are always reloaded from their slot and immediates are always
    /// rebuilt, even when already resident.
    fn operand_reg(&mut self, op: &Operand, pinned: &[Register]) -> Register {
        match op {
            Operand::Imm(n) => {
                let r = self.reg.register_avoiding(&n.to_string(), pinned);
                self.materialize_immediate(r, *n);
                r
            }
            Operand::Name(name) => {
                let r = self.reg.register_avoiding(name, pinned);
                let off = self.frame.offset_of(name);
                self.push_asm(MipsInstr::load_frame(r, off));
                r
            }
            Operand::Empty => {
                log::warn!("missing operand read as $zero");
                Register::ZERO_REG
            }
        }
    }

    /// Load a 32-bit literal into `reg`.
    ///
    /// Values that fit a signed 16-bit field take one `addi` against `$zero`;
    /// anything else is built from `lui` plus an `ori` of the low half when
    /// that half is non-zero.
    pub(crate) fn materialize_immediate(&mut self, reg: Register, value: i32) {
        if let Ok(imm) = i16::try_from(value) {
            self.push_asm(MipsInstr::load_imm16(reg, imm));
            return;
        }
        let bits = value as u32;
        let hi = (bits >> 16) as u16;
        let lo = (bits & 0xffff) as u16;
        self.push_asm(MipsInstr::Lui { t: reg, imm: hi });
        if lo != 0 {
            self.push_asm(MipsInstr::Ori {
                t: reg,
                s: reg,
                imm: lo,
            });
        }
    }

    /// Load both source operands; the second never evicts the first.
    fn operand_pair(&mut self, left: &Operand, right: &Operand) -> (Register, Register) {
        let r1 = self.operand_reg(left, &[]);
        let r2 = self.operand_reg(right, &[r1]);
        (r1, r2)
    }

    // ── Per-opcode emission ─────────────────────────────────────────────

    fn emit_arith(&mut self, quad: &Quad) {
        let (r1, r2) = self.operand_pair(&quad.arg1, &quad.arg2);
        self.reg.release_name(&quad.result);
        let rd = self.reg.register_of(&quad.result);
        match quad.op {
            Opcode::Add => self.push_asm(MipsInstr::Add {
                d: rd,
                s: r1,
                t: r2,
            }),
            Opcode::Sub => self.push_asm(MipsInstr::Sub {
                d: rd,
                s: r1,
                t: r2,
            }),
            Opcode::Mul => {
                self.push_asm(MipsInstr::Mult { s: r1, t: r2 });
                self.push_asm(MipsInstr::Mflo { d: rd });
            }
            Opcode::Div => {
                self.push_asm(MipsInstr::Div { s: r1, t: r2 });
                self.push_asm(MipsInstr::Mflo { d: rd });
            }
            _ => unreachable!("emit_arith called with {}", quad.op),
        }
        let off = self.frame.offset_of(&quad.result);
        self.push_asm(MipsInstr::store_frame(rd, off));
    }

    /// The source register becomes the destination's home; no copy.
    fn emit_assign(&mut self, quad: &Quad) {
        let r = self.operand_reg(&quad.arg1, &[]);
        self.reg.alias(&quad.result, r);
        let off = self.frame.offset_of(&quad.result);
        self.push_asm(MipsInstr::store_frame(r, off));
    }

    fn emit_cond_jump(&mut self, quad: &Quad) {
        let (r1, r2) = self.operand_pair(&quad.arg1, &quad.arg2);
        let label = quad.result.clone();
        let at = Register::ASM_TEMP;
        match quad.op {
            Opcode::Jeq => self.push_asm(MipsInstr::Beq {
                s: r1,
                t: r2,
                label,
            }),
            Opcode::Jne => self.push_asm(MipsInstr::Bne {
                s: r1,
                t: r2,
                label,
            }),
            Opcode::Jgt | Opcode::Jlt => {
                // a > b  <=>  b < a
                let (s, t) = if quad.op == Opcode::Jgt { (r2, r1) } else { (r1, r2) };
                self.push_asm(MipsInstr::Slt { d: at, s, t });
                self.push_asm(MipsInstr::Bne {
                    s: at,
                    t: Register::ZERO_REG,
                    label,
                });
            }
            _ => unreachable!("emit_cond_jump called with {}", quad.op),
        }
    }

    fn emit_return(&mut self, value: &Operand) {
        if !value.is_empty() {
            let r = self.operand_reg(value, &[]);
            self.push_asm(MipsInstr::mov(Register::RETURN_REG, r));
        }
        match self.options.return_style {
            ReturnStyle::Halt => {
                let label = format!("__halt_{}", self.halt_count);
                self.halt_count += 1;
                self.push_label(label.as_str());
                self.push_asm(MipsInstr::jump(label));
            }
            ReturnStyle::JumpRegister => self.push_asm(MipsInstr::Jr {
                s: Register::LINK_REG,
            }),
        }
    }
}
