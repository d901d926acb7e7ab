pub mod frontend;
pub mod ir;
pub mod backend;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Lexical error: {0}")]
    Lexical(#[from] frontend::lexer::LexicalError),

    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        location: usize,
        line: usize,
        column: usize,
        message: String,
    },
}

/// Parse source text into a syntax tree.
pub fn compile_to_ast(source: &str) -> Result<ir::ast::Program, CompileError> {
    ir::ast::parse_to_ast(source)
}

pub fn compile_to_ir(source: &str) -> Result<ir::ProgramIR, CompileError> {
    let program = compile_to_ast(source)?;
    Ok(ir::ir_generator::lower(&program))
}

/// Compile source text directly to MIPS assembly.
pub fn compile_to_mips(source: &str) -> Result<String, CompileError> {
    compile_to_mips_with(source, &backend::EmitOptions::default())
}

pub fn compile_to_mips_with(
    source: &str,
    options: &backend::EmitOptions,
) -> Result<String, CompileError> {
    let ir = compile_to_ir(source)?;
    Ok(backend::compile_ir_to_mips_mapped(&ir, options).join())
}
