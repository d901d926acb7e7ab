//! Recursive-descent parser producing the syntax tree.
//!
//! One token of lookahead is enough for every production except the
//! top-level choice between a function definition and a declaration, which
//! peeks three tokens ahead (`int name (`).

use super::lexer::{lex_adapter, position_to_line_col, Token};
use crate::ir::ast::{BinOp, Block, Expr, FuncDef, Item, Program, Stmt, TypeName};
use crate::CompileError;

type SpannedToken = (usize, Token, usize);

pub struct Parser<'source> {
    source: &'source str,
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            pos: 0,
        }
    }

    /// Lex the whole source, then parse `item*` until end of input.
    pub fn parse_program(mut self) -> Result<Program, CompileError> {
        self.tokens = lex_adapter(self.source).collect::<Result<Vec<_>, _>>()?;
        self.pos = 0;

        let mut items = Vec::new();
        while !self.at_end() {
            items.push(self.parse_item()?);
        }
        Ok(Program { items })
    }

    // ========== Token cursor ==========

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|(_, t, _)| t)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).map(|(_, t, _)| t.clone());
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, expected: &Token) -> bool {
        self.peek() == Some(expected)
    }

    fn eat(&mut self, expected: Token) -> Result<(), CompileError> {
        if self.check(&expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    fn expect_ident(&mut self) -> Result<String, CompileError> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Byte offset of the current token, or the end of the source.
    fn location(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(start, _, _)| *start)
            .unwrap_or(self.source.len())
    }

    fn error_here(&self, message: String) -> CompileError {
        let location = self.location();
        let (line, column) = position_to_line_col(self.source, location);
        CompileError::Parse {
            location,
            line,
            column,
            message,
        }
    }

    fn unexpected(&self, expected: &str) -> CompileError {
        let found = match self.peek() {
            Some(t) => t.to_string(),
            None => "end of input".to_string(),
        };
        self.error_here(format!("expected {expected}, found {found}"))
    }

    // ========== Top level ==========

    fn parse_item(&mut self) -> Result<Item, CompileError> {
        let is_func = matches!(self.peek(), Some(Token::Int | Token::Void))
            && matches!(self.peek_nth(1), Some(Token::Ident(_)))
            && matches!(self.peek_nth(2), Some(Token::LParen));
        if is_func {
            Ok(Item::Function(self.parse_func_def()?))
        } else {
            Ok(Item::Stmt(self.parse_stmt()?))
        }
    }

    fn parse_func_def(&mut self) -> Result<FuncDef, CompileError> {
        let return_type = match self.advance() {
            Some(Token::Void) => TypeName::Void,
            _ => TypeName::Int,
        };
        let name = self.expect_ident()?;
        self.eat(Token::LParen)?;
        if self.check(&Token::Void) {
            self.pos += 1;
        }
        if !self.check(&Token::RParen) {
            return Err(self.error_here(format!(
                "function '{name}' declares parameters; only '()' or '(void)' is supported"
            )));
        }
        self.eat(Token::RParen)?;
        let body = self.parse_block()?;
        Ok(FuncDef {
            return_type,
            name,
            body,
        })
    }

    // ========== Statements ==========

    fn parse_block(&mut self) -> Result<Block, CompileError> {
        self.eat(Token::LBrace)?;
        let mut stmts = Vec::new();
        while !self.check(&Token::RBrace) {
            if self.at_end() {
                return Err(self.unexpected(&Token::RBrace.to_string()));
            }
            stmts.push(self.parse_stmt()?);
        }
        self.eat(Token::RBrace)?;
        Ok(Block { stmts })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, CompileError> {
        match self.peek() {
            Some(Token::LBrace) => Ok(Stmt::Block(self.parse_block()?)),
            Some(Token::Int) => self.parse_var_decl(),
            Some(Token::Ident(_)) => self.parse_assign(),
            Some(Token::Return) => self.parse_return(),
            Some(Token::If) => self.parse_if(),
            Some(Token::While) => self.parse_while(),
            _ => Err(self.unexpected("a statement")),
        }
    }

    fn parse_var_decl(&mut self) -> Result<Stmt, CompileError> {
        self.eat(Token::Int)?;
        let name = self.expect_ident()?;
        let init = if self.check(&Token::Assign) {
            self.pos += 1;
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.eat(Token::Semicolon)?;
        Ok(Stmt::VarDecl {
            ty: TypeName::Int,
            name,
            init,
        })
    }

    fn parse_assign(&mut self) -> Result<Stmt, CompileError> {
        let name = self.expect_ident()?;
        self.eat(Token::Assign)?;
        let value = self.parse_expr()?;
        self.eat(Token::Semicolon)?;
        Ok(Stmt::Assign { name, value })
    }

    fn parse_return(&mut self) -> Result<Stmt, CompileError> {
        self.eat(Token::Return)?;
        let value = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.eat(Token::Semicolon)?;
        Ok(Stmt::Return(value))
    }

    fn parse_if(&mut self) -> Result<Stmt, CompileError> {
        self.eat(Token::If)?;
        self.eat(Token::LParen)?;
        let condition = self.parse_expr()?;
        self.eat(Token::RParen)?;
        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.check(&Token::Else) {
            self.pos += 1;
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while(&mut self) -> Result<Stmt, CompileError> {
        self.eat(Token::While)?;
        self.eat(Token::LParen)?;
        let condition = self.parse_expr()?;
        self.eat(Token::RParen)?;
        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::While { condition, body })
    }

    // ========== Expressions ==========

    fn parse_expr(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.parse_term()?;
            left = Expr::binary(op, left, right);
        }
    }

    fn parse_term(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.parse_factor()?;
            left = Expr::binary(op, left, right);
        }
    }

    fn parse_factor(&mut self) -> Result<Expr, CompileError> {
        match self.peek() {
            Some(Token::Number(n)) => {
                let n = *n;
                let lit = self.literal(n)?;
                self.pos += 1;
                Ok(Expr::Number(lit))
            }
            Some(Token::Minus) => {
                if let Some(Token::Number(n)) = self.peek_nth(1) {
                    let n = *n;
                    self.pos += 1;
                    let lit = self.literal(-n)?;
                    self.pos += 1;
                    return Ok(Expr::Number(lit));
                }
                self.pos += 1;
                let operand = self.parse_factor()?;
                Ok(Expr::binary(BinOp::Sub, Expr::Number(0), operand))
            }
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(Expr::Identifier(name))
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let inner = self.parse_expr()?;
                self.eat(Token::RParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn literal(&self, n: i64) -> Result<i32, CompileError> {
        i32::try_from(n).map_err(|_| {
            self.error_here(format!("integer literal {n} does not fit in 32 bits"))
        })
    }
}
