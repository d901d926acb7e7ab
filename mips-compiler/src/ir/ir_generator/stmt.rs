use super::context::IrGenerator;
use crate::ir::ast::{Block, Expr, FuncDef, Item, Program, Stmt};
use crate::ir::*;

impl IrGenerator {
    // ========== Top-Level Lowering ==========

    pub(crate) fn lower_program(&mut self, p: &Program) {
        for item in &p.items {
            match item {
                Item::Function(func) => self.lower_function(func),
                Item::Stmt(s) => self.lower_stmt(s),
            }
        }
    }

    fn lower_function(&mut self, func: &FuncDef) {
        self.emit(Quad::func_begin(func.name.as_str()));
        self.lower_block(&func.body);
        self.emit(Quad::func_end(func.name.as_str()));
    }

    fn lower_block(&mut self, block: &Block) {
        for s in &block.stmts {
            self.lower_stmt(s);
        }
    }

    pub(crate) fn lower_stmt(&mut self, s: &Stmt) {
        match s {
            Stmt::VarDecl { name, init, .. } => {
                // A bare declaration reserves nothing; the first write allocates the slot.
                if let Some(e) = init {
                    self.lower_assign(name, e);
                }
            }
            Stmt::Assign { name, value } => self.lower_assign(name, value),
            Stmt::Return(value) => {
                let v = match value {
                    Some(e) => self.lower_expr(e),
                    None => Operand::Empty,
                };
                self.emit(Quad::ret(v));
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => self.lower_if(condition, then_branch, else_branch.as_deref()),
            Stmt::While { condition, body } => self.lower_while(condition, body),
            Stmt::Block(block) => self.lower_block(block),
        }
    }

    // ========== Statement Lowering ==========

    fn lower_assign(&mut self, name: &str, rhs: &Expr) {
        let src = self.lower_expr(rhs);
        self.emit(Quad::assign(src, name));
    }

    fn lower_if(&mut self, cond: &Expr, then_blk: &Stmt, else_blk: Option<&Stmt>) {
        let c = self.lower_expr(cond);
        let else_label = self.new_label();
        let end_label = self.new_label();

        self.emit(Quad::jeq(c, Operand::Imm(0), else_label.clone()));
        self.lower_stmt(then_blk);
        self.emit(Quad::jmp(end_label.clone()));
        self.emit(Quad::label(else_label));
        if let Some(s) = else_blk {
            self.lower_stmt(s);
        }
        self.emit(Quad::label(end_label));
    }

    fn lower_while(&mut self, cond: &Expr, body: &Stmt) {
        let start = self.new_label();
        let end = self.new_label();

        self.emit(Quad::label(start.clone()));
        let c = self.lower_expr(cond);
        self.emit(Quad::jeq(c, Operand::Imm(0), end.clone()));
        self.lower_stmt(body);
        self.emit(Quad::jmp(start));
        self.emit(Quad::label(end));
    }
}
