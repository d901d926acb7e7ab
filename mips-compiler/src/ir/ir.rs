// A tiny, linear IR of quads: one operator, two source operands, one destination.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramIR {
    pub instrs: Vec<Quad>,
}

impl ProgramIR {
    pub fn new() -> Self {
        Self { instrs: Vec::new() }
    }

    pub fn to_lines(&self) -> Vec<String> {
        self.instrs.iter().map(|q| q.to_string()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Add,
    Sub,
    Mul,
    Div,
    /// `result = arg1`
    Assign,
    /// `result:`
    Label,
    /// `goto result`
    Jmp,
    /// `if arg1 == arg2 goto result`
    Jeq,
    /// `if arg1 != arg2 goto result`
    Jne,
    /// `if arg1 > arg2 goto result`
    Jgt,
    /// `if arg1 < arg2 goto result`
    Jlt,
    /// Reserved: argument passing (never produced).
    Param,
    /// Reserved: function call (never produced).
    Call,
    /// Return with optional value in `arg1`
    Return,
    FuncBegin,
    FuncEnd,
}

impl Opcode {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Assign => "ASSIGN",
            Opcode::Label => "LABEL",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
            Opcode::Jgt => "JGT",
            Opcode::Jlt => "JLT",
            Opcode::Param => "PARAM",
            Opcode::Call => "CALL",
            Opcode::Return => "RETURN",
            Opcode::FuncBegin => "FUNC_BEGIN",
            Opcode::FuncEnd => "FUNC_END",
        }
    }

    pub fn is_arith(&self) -> bool {
        matches!(self, Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div)
    }

    pub fn is_cond_jump(&self) -> bool {
        matches!(self, Opcode::Jeq | Opcode::Jne | Opcode::Jgt | Opcode::Jlt)
    }

    /// Instructions across which register residency cannot be trusted.
    pub fn is_control_flow_boundary(&self) -> bool {
        matches!(
            self,
            Opcode::Label | Opcode::Jmp | Opcode::FuncBegin | Opcode::Call
        ) || self.is_cond_jump()
    }

    /// Whether the instruction defines the value named by `result`.
    pub fn defines_value(&self) -> bool {
        self.is_arith() || matches!(self, Opcode::Assign)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// A quad source operand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Unused operand position.
    #[default]
    Empty,
    /// Literal integer.
    Imm(i32),
    /// Declared variable or compiler temporary.
    Name(String),
}

impl Operand {
    pub fn is_empty(&self) -> bool {
        matches!(self, Operand::Empty)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Name(s.to_string())
    }
}
impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Name(s)
    }
}
impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        Operand::Imm(n)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Empty => Ok(()),
            Operand::Imm(n) => write!(f, "{n}"),
            Operand::Name(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quad {
    pub op: Opcode,
    pub arg1: Operand,
    pub arg2: Operand,
    /// Destination name, or label for jumps and label definitions.
    pub result: String,
}

impl Quad {
    pub fn new(op: Opcode, arg1: Operand, arg2: Operand, result: impl Into<String>) -> Self {
        Self {
            op,
            arg1,
            arg2,
            result: result.into(),
        }
    }

    pub fn arith(op: Opcode, left: Operand, right: Operand, dst: impl Into<String>) -> Self {
        debug_assert!(op.is_arith());
        Self::new(op, left, right, dst)
    }

    pub fn assign(src: Operand, dst: impl Into<String>) -> Self {
        Self::new(Opcode::Assign, src, Operand::Empty, dst)
    }

    pub fn label(name: impl Into<String>) -> Self {
        Self::new(Opcode::Label, Operand::Empty, Operand::Empty, name)
    }

    pub fn jmp(target: impl Into<String>) -> Self {
        Self::new(Opcode::Jmp, Operand::Empty, Operand::Empty, target)
    }

    pub fn jeq(left: Operand, right: Operand, target: impl Into<String>) -> Self {
        Self::new(Opcode::Jeq, left, right, target)
    }

    pub fn ret(value: Operand) -> Self {
        Self::new(Opcode::Return, value, Operand::Empty, "")
    }

    pub fn func_begin(name: impl Into<String>) -> Self {
        Self::new(Opcode::FuncBegin, Operand::Empty, Operand::Empty, name)
    }

    pub fn func_end(name: impl Into<String>) -> Self {
        Self::new(Opcode::FuncEnd, Operand::Empty, Operand::Empty, name)
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{},{})", self.op, self.arg1, self.arg2, self.result)
    }
}
