use anyhow::Context;
use clap::{Parser, ValueEnum};
use mips_compiler::backend::{compile_ir_to_mips_mapped, EmitOptions, ReturnStyle};
use mips_compiler::{compile_to_ast, ir::ir_generator};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mipsc")]
#[command(about = "A compiler from a tiny C subset to MIPS assembly")]
struct Args {
    /// Path to the source file to compile (a built-in sample when omitted)
    file: Option<PathBuf>,

    /// Print the syntax tree outline
    #[arg(long)]
    ast: bool,

    /// Emit IR quads. If none of --ast/--ir/--asm/--both is given, defaults to --asm.
    #[arg(long)]
    ir: bool,

    /// Emit MIPS assembly
    #[arg(long)]
    asm: bool,

    /// Emit both IR and MIPS assembly
    #[arg(long)]
    both: bool,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// How `return` leaves the program
    #[arg(long, value_enum, default_value_t = ReturnOpt::Halt)]
    return_style: ReturnOpt,

    /// Number of allocatable registers (2..=18)
    #[arg(long, default_value_t = 18, value_parser = clap::value_parser!(u8).range(2..=18))]
    pool_size: u8,

    /// Omit the `#` comments naming each IR step
    #[arg(long)]
    no_comments: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ReturnOpt {
    /// Spin on a unique halt label
    Halt,
    /// `jr $ra`
    Jr,
}

impl Args {
    fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            return_style: match self.return_style {
                ReturnOpt::Halt => ReturnStyle::Halt,
                ReturnOpt::Jr => ReturnStyle::JumpRegister,
            },
            pool_size: usize::from(self.pool_size),
            annotate: !self.no_comments,
        }
    }

    /// (tree, ir, asm) sections to print.
    fn sections(&self) -> (bool, bool, bool) {
        let want_ir = self.ir || self.both;
        let want_asm = self.asm || self.both || !(self.ast || want_ir);
        (self.ast, want_ir, want_asm)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let src = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading source file '{}'", path.display()))?,
        None => DEFAULT_SAMPLE.trim().to_string(),
    };
    match &args.file {
        Some(path) => log::info!("compiling {}", path.display()),
        None => log::info!("no input file, compiling the built-in sample"),
    }

    let program = match compile_to_ast(&src) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Compilation error: {e}");
            std::process::exit(1);
        }
    };

    let (want_ast, want_ir, want_asm) = args.sections();
    let mut out: Vec<String> = Vec::new();

    if want_ast {
        out.extend(program.to_tree_lines());
        out.push(String::new());
    }

    let ir = ir_generator::lower(&program);
    if want_ir {
        out.extend(ir.to_lines());
        out.push(String::new());
    }

    if want_asm {
        let asm = compile_ir_to_mips_mapped(&ir, &args.emit_options());
        out.extend(asm.lines);
    }

    let mut text = out.join("\n");
    text.push('\n');
    match &args.output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("writing output file '{}'", path.display()))?,
        None => print!("{text}"),
    }
    Ok(())
}

const DEFAULT_SAMPLE: &str = r#"
int main() {
    int a = 10;
    int b = 5;
    int big = 100000;
    while (b) {
        a = a + b * 2;
        b = b - 1;
    }
    if (a - 40) {
        a = a + big;
    } else {
        a = -a;
    }
    return a;
}
"#;
