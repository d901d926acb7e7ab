use mips_compiler::ir::ast::{BinOp, Expr, Item, Program, Stmt};
use mips_compiler::ir::ir_generator::{lower, IrGenerator};
use mips_compiler::ir::Opcode;
use mips_compiler::{compile_to_ast, compile_to_ir};

fn quads(source: &str) -> Vec<String> {
    compile_to_ir(source)
        .expect("source should lower")
        .to_lines()
}

// ── Straight-line code ───────────────────────────────────────────────────

#[test]
fn end_to_end_example_lowers_to_five_quads() {
    assert_eq!(
        quads("int a = 10; int b = 5; a = a + b; return a;"),
        vec![
            "ASSIGN(10,,a)",
            "ASSIGN(5,,b)",
            "ADD(a,b,t0)",
            "ASSIGN(t0,,a)",
            "RETURN(a,,)",
        ]
    );
}

#[test]
fn bare_declaration_emits_nothing() {
    assert_eq!(quads("int x; x = 3;"), vec!["ASSIGN(3,,x)"]);
}

#[test]
fn operands_are_lowered_left_first() {
    assert_eq!(
        quads("x = (a - b) * (c / d);"),
        vec!["SUB(a,b,t0)", "DIV(c,d,t1)", "MUL(t0,t1,t2)", "ASSIGN(t2,,x)"]
    );
}

#[test]
fn negation_lowers_to_subtraction_from_zero() {
    assert_eq!(
        quads("x = -5; y = -x;"),
        vec!["ASSIGN(-5,,x)", "SUB(0,x,t0)", "ASSIGN(t0,,y)"]
    );
}

#[test]
fn return_without_value_carries_empty_operand() {
    assert_eq!(
        quads("void f() { return; }"),
        vec!["FUNC_BEGIN(,,f)", "RETURN(,,)", "FUNC_END(,,f)"]
    );
}

// ── Control flow ─────────────────────────────────────────────────────────

#[test]
fn if_without_else_still_uses_two_labels() {
    assert_eq!(
        quads("if (a) b = 1;"),
        vec![
            "JEQ(a,0,L0)",
            "ASSIGN(1,,b)",
            "JMP(,,L1)",
            "LABEL(,,L0)",
            "LABEL(,,L1)",
        ]
    );
}

#[test]
fn if_else_shape() {
    assert_eq!(
        quads("if (a - 1) b = 1; else b = 2;"),
        vec![
            "SUB(a,1,t0)",
            "JEQ(t0,0,L0)",
            "ASSIGN(1,,b)",
            "JMP(,,L1)",
            "LABEL(,,L0)",
            "ASSIGN(2,,b)",
            "LABEL(,,L1)",
        ]
    );
}

#[test]
fn while_shape_evaluates_condition_after_start_label() {
    assert_eq!(
        quads("while (n) n = n - 1;"),
        vec![
            "LABEL(,,L0)",
            "JEQ(n,0,L1)",
            "SUB(n,1,t0)",
            "ASSIGN(t0,,n)",
            "JMP(,,L0)",
            "LABEL(,,L1)",
        ]
    );
}

#[test]
fn nested_control_flow_numbers_labels_in_allocation_order() {
    let lines = quads("while (a) { if (b) c = 1; }");
    assert_eq!(lines[0], "LABEL(,,L0)");
    assert_eq!(lines[1], "JEQ(a,0,L1)");
    assert_eq!(lines[2], "JEQ(b,0,L2)");
    assert_eq!(lines.last().map(String::as_str), Some("LABEL(,,L1)"));
}

#[test]
fn functions_are_bracketed() {
    let ir = compile_to_ir("int f() { return 1; } int main() { return 2; }").unwrap();
    let ops: Vec<Opcode> = ir.instrs.iter().map(|q| q.op).collect();
    assert_eq!(
        ops,
        vec![
            Opcode::FuncBegin,
            Opcode::Return,
            Opcode::FuncEnd,
            Opcode::FuncBegin,
            Opcode::Return,
            Opcode::FuncEnd,
        ]
    );
    assert_eq!(ir.instrs[3].result, "main");
}

// ── Determinism ──────────────────────────────────────────────────────────

#[test]
fn generation_is_deterministic() {
    let program = compile_to_ast(
        "int main() { int a = 1; while (a) { if (a) a = a - 1; else a = 2; } return a * 3; }",
    )
    .unwrap();
    let mut gen = IrGenerator::new();
    let first = gen.generate(&program);
    let second = gen.generate(&program);
    assert_eq!(first, second);
    assert_eq!(first, lower(&program));
}

#[test]
fn generator_accepts_hand_built_trees() {
    let program = Program {
        items: vec![Item::Stmt(Stmt::Assign {
            name: "x".into(),
            value: Expr::binary(BinOp::Add, Expr::Number(1), Expr::ident("y")),
        })],
    };
    assert_eq!(
        lower(&program).to_lines(),
        vec!["ADD(1,y,t0)", "ASSIGN(t0,,x)"]
    );
}

// ── Tree outline ─────────────────────────────────────────────────────────

#[test]
fn tree_outline() {
    let program = compile_to_ast(
        "int main() { int a = 1 + b; if (a) a = 2; else { return; } while (a) a = a - 1; return a; }",
    )
    .unwrap();
    let expected = [
        "Program",
        "  Function: int main()",
        "    Block",
        "      VarDecl: int a",
        "        =",
        "          Op: +",
        "            1",
        "            Id: b",
        "      If",
        "        Cond:",
        "          Id: a",
        "        Then:",
        "          Assign: a =",
        "            2",
        "        Else:",
        "          Block",
        "            Return",
        "      While",
        "        Cond:",
        "          Id: a",
        "        Body:",
        "          Assign: a =",
        "            Op: -",
        "              Id: a",
        "              1",
        "      Return",
        "        Id: a",
    ];
    assert_eq!(program.to_tree_lines(), expected);
}
