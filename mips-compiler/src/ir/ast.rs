use crate::frontend::parser::Parser;
use crate::CompileError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub items: Vec<Item>,
}

/// A top-level element: a function definition or a free-standing statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Function(FuncDef),
    Stmt(Stmt),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDef {
    pub return_type: TypeName,
    pub name: String,
    pub body: Block,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Int,
    Void,
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Int => write!(f, "int"),
            TypeName::Void => write!(f, "void"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `int name [= init];`
    VarDecl {
        ty: TypeName,
        name: String,
        init: Option<Expr>,
    },
    /// `name = value;`
    Assign { name: String, value: Expr },
    /// `return [value];`
    Return(Option<Expr>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    Block(Block),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Number(i32),
    Identifier(String),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        };
        write!(f, "{s}")
    }
}

pub fn parse_to_ast(source: &str) -> Result<Program, CompileError> {
    Parser::new(source).parse_program()
}

// ========== Tree outline ==========

impl Program {
    /// Render the tree as an indented outline, two spaces per level.
    pub fn to_tree_lines(&self) -> Vec<String> {
        let mut out = vec!["Program".to_string()];
        for item in &self.items {
            match item {
                Item::Function(func) => outline_func(func, 1, &mut out),
                Item::Stmt(stmt) => outline_stmt(stmt, 1, &mut out),
            }
        }
        out
    }
}

fn push(out: &mut Vec<String>, level: usize, text: impl fmt::Display) {
    out.push(format!("{}{}", "  ".repeat(level), text));
}

fn outline_func(func: &FuncDef, level: usize, out: &mut Vec<String>) {
    push(out, level, format_args!("Function: {} {}()", func.return_type, func.name));
    outline_block(&func.body, level + 1, out);
}

fn outline_block(block: &Block, level: usize, out: &mut Vec<String>) {
    push(out, level, "Block");
    for s in &block.stmts {
        outline_stmt(s, level + 1, out);
    }
}

fn outline_stmt(stmt: &Stmt, level: usize, out: &mut Vec<String>) {
    match stmt {
        Stmt::VarDecl { ty, name, init } => {
            push(out, level, format_args!("VarDecl: {ty} {name}"));
            if let Some(e) = init {
                push(out, level + 1, "=");
                outline_expr(e, level + 2, out);
            }
        }
        Stmt::Assign { name, value } => {
            push(out, level, format_args!("Assign: {name} ="));
            outline_expr(value, level + 1, out);
        }
        Stmt::Return(value) => {
            push(out, level, "Return");
            if let Some(e) = value {
                outline_expr(e, level + 1, out);
            }
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            push(out, level, "If");
            push(out, level + 1, "Cond:");
            outline_expr(condition, level + 2, out);
            push(out, level + 1, "Then:");
            outline_stmt(then_branch, level + 2, out);
            if let Some(e) = else_branch {
                push(out, level + 1, "Else:");
                outline_stmt(e, level + 2, out);
            }
        }
        Stmt::While { condition, body } => {
            push(out, level, "While");
            push(out, level + 1, "Cond:");
            outline_expr(condition, level + 2, out);
            push(out, level + 1, "Body:");
            outline_stmt(body, level + 2, out);
        }
        Stmt::Block(block) => outline_block(block, level, out),
    }
}

fn outline_expr(expr: &Expr, level: usize, out: &mut Vec<String>) {
    match expr {
        Expr::Number(n) => push(out, level, n),
        Expr::Identifier(name) => push(out, level, format_args!("Id: {name}")),
        Expr::Binary { op, left, right } => {
            push(out, level, format_args!("Op: {op}"));
            outline_expr(left, level + 1, out);
            outline_expr(right, level + 1, out);
        }
    }
}
