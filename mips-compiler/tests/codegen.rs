use mips_compiler::backend::{compile_ir_to_mips, compile_ir_to_mips_mapped, EmitOptions, ReturnStyle};
use mips_compiler::{compile_to_ir, compile_to_mips, compile_to_mips_with};

/// Assembly lines with trailing `#` comments removed.
fn asm_lines(source: &str) -> Vec<String> {
    let asm = compile_to_mips(source).expect("source should compile");
    strip(&asm)
}

fn strip(asm: &str) -> Vec<String> {
    asm.lines()
        .map(|l| match l.find('#') {
            Some(i) => l[..i].trim_end().to_string(),
            None => l.to_string(),
        })
        .collect()
}

fn plain(options: EmitOptions) -> EmitOptions {
    EmitOptions {
        annotate: false,
        ..options
    }
}

/// Assert `needles` appear in `haystack` in order, not necessarily adjacent.
fn assert_in_order(haystack: &[String], needles: &[&str]) {
    let mut it = haystack.iter();
    for needle in needles {
        assert!(
            it.any(|l| l == needle),
            "missing (or out of order): {needle:?}\n{}",
            haystack.join("\n")
        );
    }
}

// ── End-to-end ───────────────────────────────────────────────────────────

#[test]
fn end_to_end_example() {
    let lines = asm_lines("int a = 10; int b = 5; a = a + b; return a;");
    let expected = [
        ".data",
        ".text",
        "\tlui $sp, 0x7fff",
        "\tori $sp, $sp, 0xeffc",
        "\taddi $fp, $sp, 0",
        "\taddi $t0, $zero, 10",
        "\tsw $t0, -4($fp)",
        "\taddi $t1, $zero, 5",
        "\tsw $t1, -8($fp)",
        "\tlw $t0, -4($fp)",
        "\tlw $t1, -8($fp)",
        "\tadd $t2, $t0, $t1",
        "\tsw $t2, -12($fp)",
        "\tlw $t2, -12($fp)",
        "\tsw $t2, -4($fp)",
        "\tlw $t2, -4($fp)",
        "\tadd $v0, $t2, $zero",
        "__halt_0:",
        "\tj __halt_0",
    ];
    assert_eq!(lines, expected);
}

#[test]
fn add_step_loads_both_operands_then_stores_into_target() {
    let lines = asm_lines("int a = 10; int b = 5; a = a + b; return a;");
    assert_in_order(
        &lines,
        &[
            "\tlw $t0, -4($fp)",
            "\tlw $t1, -8($fp)",
            "\tadd $t2, $t0, $t1",
            "\tsw $t2, -4($fp)",
        ],
    );
}

#[test]
fn loop_reloads_after_every_boundary() {
    let lines = asm_lines("int a = 1; while (a) { a = a - 1; } return a;");
    let expected = [
        ".data",
        ".text",
        "\tlui $sp, 0x7fff",
        "\tori $sp, $sp, 0xeffc",
        "\taddi $fp, $sp, 0",
        "\taddi $t0, $zero, 1",
        "\tsw $t0, -4($fp)",
        "L0:",
        "\tlw $t0, -4($fp)",
        "\taddi $t1, $zero, 0",
        "\tbeq $t0, $t1, L1",
        "\tlw $t0, -4($fp)",
        "\taddi $t2, $zero, 1",
        "\tsub $t3, $t0, $t2",
        "\tsw $t3, -8($fp)",
        "\tlw $t3, -8($fp)",
        "\tsw $t3, -4($fp)",
        "\tj L0",
        "L1:",
        "\tlw $t0, -4($fp)",
        "\tadd $v0, $t0, $zero",
        "__halt_0:",
        "\tj __halt_0",
    ];
    assert_eq!(lines, expected);
}

// ── Immediates ───────────────────────────────────────────────────────────

#[test]
fn large_literal_is_split_into_lui_ori() {
    let lines = asm_lines("x = 100000;");
    assert_in_order(&lines, &["\tlui $t0, 0x1", "\tori $t0, $t0, 0x86a0", "\tsw $t0, -4($fp)"]);
    assert!(!lines.iter().any(|l| l.starts_with("\taddi $t0")));
}

#[test]
fn literal_with_zero_low_half_skips_ori() {
    let lines = asm_lines("x = 131072;");
    assert_in_order(&lines, &["\tlui $t0, 0x2", "\tsw $t0, -4($fp)"]);
    assert!(!lines.iter().any(|l| l.starts_with("\tori $t0")));
}

#[test]
fn small_negative_literal_is_one_addi() {
    let lines = asm_lines("x = -5;");
    let body: Vec<&String> = lines.iter().skip(5).collect();
    assert_eq!(body, ["\taddi $t0, $zero, -5", "\tsw $t0, -4($fp)"]);
}

// ── Write-through ────────────────────────────────────────────────────────

#[test]
fn every_definition_is_followed_by_one_store() {
    let source = std::fs::read_to_string("../samples/branches.c")
        .expect("Failed to read samples/branches.c");
    let ir = compile_to_ir(&source).unwrap();
    let defs = ir.instrs.iter().filter(|q| q.op.defines_value()).count();
    let asm = strip(&compile_ir_to_mips(&ir));
    let stores = asm.iter().filter(|l| l.starts_with("\tsw ")).count();
    assert_eq!(stores, defs);
}

// ── Functions and returns ────────────────────────────────────────────────

#[test]
fn stack_is_initialised_once_in_first_function() {
    let lines = asm_lines("int f() { return 1; } int main() { int x = 2; return x; }");
    let inits = lines.iter().filter(|l| *l == "\tlui $sp, 0x7fff").count();
    assert_eq!(inits, 1);
    assert_in_order(&lines, &["f:", "\tlui $sp, 0x7fff", "__halt_0:", "main:", "__halt_1:"]);
}

#[test]
fn frame_offsets_restart_per_function() {
    let lines = asm_lines("int f() { int a = 1; return a; } int main() { int b = 2; return b; }");
    assert_in_order(&lines, &["f:", "\tsw $t0, -4($fp)", "main:", "\tsw $t0, -4($fp)"]);
}

#[test]
fn jump_register_return_style() {
    let options = plain(EmitOptions {
        return_style: ReturnStyle::JumpRegister,
        ..EmitOptions::default()
    });
    let asm = compile_to_mips_with("int main() { return 3; }", &options).unwrap();
    let lines = strip(&asm);
    assert_in_order(&lines, &["main:", "\taddi $t0, $zero, 3", "\tadd $v0, $t0, $zero", "\tjr $ra"]);
    assert!(!asm.contains("__halt"));
}

#[test]
fn void_return_only_exits() {
    let lines = asm_lines("void f() { return; }");
    assert_eq!(&lines[lines.len() - 2..], ["__halt_0:", "\tj __halt_0"]);
    assert!(!lines.iter().any(|l| l.contains("$v0")));
}

// ── Allocation ───────────────────────────────────────────────────────────

#[test]
fn small_pool_recycles_registers() {
    let options = plain(EmitOptions {
        pool_size: 2,
        ..EmitOptions::default()
    });
    let asm = compile_to_mips_with("int a = 10; int b = 5; a = a + b; return a;", &options).unwrap();
    assert!(!asm.contains("$t2"));
    assert!(asm.contains("\tadd $t0, $t0, $t1"));
}

#[test]
fn pool_overflow_evicts_round_robin() {
    // 18 distinct names fill the pool; the 19th takes $t0 and the 20th $t1.
    let mut source = String::new();
    for i in 0..20 {
        source.push_str(&format!("v{i} = v{i};\n"));
    }
    let lines = asm_lines(&source);
    assert_in_order(&lines, &["\tlw $t9, -72($fp)", "\tlw $t0, -76($fp)", "\tlw $t1, -80($fp)"]);
}

// ── Output format ────────────────────────────────────────────────────────

#[test]
fn annotations_name_the_quad() {
    let asm = compile_to_mips("int a = 10;").unwrap();
    let line = asm
        .lines()
        .find(|l| l.starts_with("\taddi $t0"))
        .expect("addi line");
    assert!(line.ends_with("# ASSIGN(10,,a)"), "{line:?}");

    let plain_asm = compile_to_mips_with("int a = 10;", &plain(EmitOptions::default())).unwrap();
    assert!(!plain_asm.contains('#'));
}

#[test]
fn mapping_covers_every_line() {
    let ir = compile_to_ir("int a = 1; if (a) a = 2;").unwrap();
    let asm = compile_ir_to_mips_mapped(&ir, &EmitOptions::default());
    assert_eq!(asm.lines.len(), asm.ir_mapping.len());
    assert!(asm.ir_mapping[..2].iter().all(Option::is_none));
    assert!(asm.ir_mapping[2..].iter().all(|m| m.is_some()));
}

// ── Sample programs ──────────────────────────────────────────────────────

#[test]
fn compile_samples() {
    for name in ["countdown.c", "arith.c", "branches.c"] {
        let path = format!("../samples/{name}");
        let source = std::fs::read_to_string(&path).expect("Failed to read sample");
        let asm = compile_to_mips(&source).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert!(asm.starts_with(".data\n.text\n"), "{name}");
        assert!(asm.contains("\tj __halt_0"), "{name}");
    }
}
