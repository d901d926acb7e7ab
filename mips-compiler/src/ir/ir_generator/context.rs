use crate::ir::ast::Program;
use crate::ir::*;

/// Lowering state: the quads emitted so far plus the temporary and label
/// counters. Every `generate` call starts from zeroed counters, so lowering the
/// same tree twice yields identical output.
#[derive(Debug, Default)]
pub struct IrGenerator {
    pub(crate) out: ProgramIR,
    pub(crate) temp_count: usize,
    pub(crate) label_count: usize,
}

impl IrGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower `program` into a fresh instruction sequence.
    pub fn generate(&mut self, program: &Program) -> ProgramIR {
        self.out = ProgramIR::new();
        self.temp_count = 0;
        self.label_count = 0;
        self.lower_program(program);
        let ir = std::mem::take(&mut self.out);
        log::debug!(
            "lowered program to {} quads ({} temps, {} labels)",
            ir.instrs.len(),
            self.temp_count,
            self.label_count
        );
        ir
    }

    pub fn new_temp(&mut self) -> String {
        let t = format!("t{}", self.temp_count);
        self.temp_count += 1;
        t
    }

    pub fn new_label(&mut self) -> String {
        let l = format!("L{}", self.label_count);
        self.label_count += 1;
        l
    }

    pub fn emit(&mut self, q: Quad) {
        log::trace!("emit {q}");
        self.out.instrs.push(q);
    }
}
