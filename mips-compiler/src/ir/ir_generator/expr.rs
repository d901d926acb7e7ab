use super::context::IrGenerator;
use crate::ir::ast::{BinOp, Expr};
use crate::ir::*;

impl IrGenerator {
    /// Lower an expression and return the operand holding its value.
    ///
    /// Leaves return themselves; every binary node gets exactly one fresh
    /// temporary and one arithmetic quad, children first (left, then right).
    pub fn lower_expr(&mut self, e: &Expr) -> Operand {
        match e {
            Expr::Number(n) => Operand::Imm(*n),
            Expr::Identifier(name) => Operand::Name(name.clone()),
            Expr::Binary { op, left, right } => {
                let l = self.lower_expr(left);
                let r = self.lower_expr(right);
                let t = self.new_temp();
                self.emit(Quad::arith(map_arith(*op), l, r, t.clone()));
                Operand::Name(t)
            }
        }
    }
}

fn map_arith(op: BinOp) -> Opcode {
    match op {
        BinOp::Add => Opcode::Add,
        BinOp::Sub => Opcode::Sub,
        BinOp::Mul => Opcode::Mul,
        BinOp::Div => Opcode::Div,
    }
}
