//! `amoeba-par` — Pratt parser turning an `amoeba-lex` token stream into an
//! [`ast::Program`] (spec.md §4.D, component D). Never panics on malformed
//! input; accumulates diagnostics in [`Parser::errors`] instead.
//!
//! ## Pratt parsing (precedence climbing)
//!
//! Amoeba's grammar is expression-oriented, so a classic recursive-descent
//! parser (one function per grammar rule) would need a separate production
//! for every precedence level. Instead each token that can start or
//! continue an expression registers a parse function:
//!
//! - a **prefix** function (`TokenKind -> Expression`), for tokens that can
//!   begin an expression (`-x`, `!x`, a literal, `(`, `if`, `fn`);
//! - an **infix** function (`(Expression, TokenKind) -> Expression`), for
//!   tokens that continue one (`+`, `==`, a call's `(`, an index's `[`).
//!
//! [`Parser::parse_expression`] loops: parse a prefix, then keep folding in
//! infix operators whose precedence is higher than the caller's, recursing
//! into the infix function's own `parse_expression` call for its right-hand
//! side. That recursion is what makes `a + b * c` bind as `a + (b * c)`
//! without a dedicated "multiplicative expression" grammar rule — `+`'s
//! infix handler only recurses at `Sum` precedence, so by the time it asks
//! for its right operand, `*` (a `Product`) still binds tighter and is
//! consumed first.
//!
//! ```text
//! a + b * c
//!         parse_expression(Lowest)
//!         ├─ prefix: a
//!         ├─ peek '+' (Sum) > Lowest → infix
//!         │    parse_expression(Sum)         // '+'.right
//!         │    ├─ prefix: b
//!         │    ├─ peek '*' (Product) > Sum → infix
//!         │    │    parse_expression(Product) // '*'.right
//!         │    │    └─ prefix: c
//!         │    └─ (b * c)
//!         └─ (a + (b * c))
//! ```
//!
//! [`precedence::Precedence`] is the ordered enum this comparison runs
//! against; see its table for the full ordering.

pub mod ast;
mod precedence;

use amoeba_lex::{Lexer, Token, TokenKind};
use amoeba_util::Handler;
use ast::*;
use precedence::{precedence_of, Precedence};
use std::collections::HashMap;

type PrefixFn = fn(&mut Parser) -> Option<Expression>;
type InfixFn = fn(&mut Parser, Expression) -> Option<Expression>;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur_token: Token,
    peek_token: Token,
    handler: Handler,
    prefix_fns: HashMap<TokenKind, PrefixFn>,
    infix_fns: HashMap<TokenKind, InfixFn>,
}

impl<'a> Parser<'a> {
    /// Primes `cur_token`/`peek_token` with the first two tokens from a
    /// fresh [`amoeba_lex::Lexer`] over `input` and registers every
    /// prefix/infix parse function.
    ///
    /// # Examples
    ///
    /// ```
    /// use amoeba_par::Parser;
    ///
    /// let mut parser = Parser::new("1 + 2;");
    /// let program = parser.parse_program();
    /// assert!(parser.errors().is_empty());
    /// assert_eq!(program.to_string(), "(1 + 2)");
    /// ```
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let mut parser = Self {
            lexer,
            cur_token,
            peek_token,
            handler: Handler::new(),
            prefix_fns: HashMap::new(),
            infix_fns: HashMap::new(),
        };

        parser.register_prefix(TokenKind::Ident, Parser::parse_identifier);
        parser.register_prefix(TokenKind::Int, Parser::parse_integer_literal);
        parser.register_prefix(TokenKind::String, Parser::parse_string_literal);
        parser.register_prefix(TokenKind::Bang, Parser::parse_prefix_expression);
        parser.register_prefix(TokenKind::Minus, Parser::parse_prefix_expression);
        parser.register_prefix(TokenKind::True, Parser::parse_boolean_literal);
        parser.register_prefix(TokenKind::False, Parser::parse_boolean_literal);
        parser.register_prefix(TokenKind::LParen, Parser::parse_grouped_expression);
        parser.register_prefix(TokenKind::If, Parser::parse_if_expression);
        parser.register_prefix(TokenKind::Function, Parser::parse_function_literal);
        parser.register_prefix(TokenKind::LBracket, Parser::parse_array_literal);

        parser.register_infix(TokenKind::Plus, Parser::parse_infix_expression);
        parser.register_infix(TokenKind::Minus, Parser::parse_infix_expression);
        parser.register_infix(TokenKind::Slash, Parser::parse_infix_expression);
        parser.register_infix(TokenKind::Asterisk, Parser::parse_infix_expression);
        parser.register_infix(TokenKind::Eq, Parser::parse_infix_expression);
        parser.register_infix(TokenKind::NotEq, Parser::parse_infix_expression);
        parser.register_infix(TokenKind::Lt, Parser::parse_infix_expression);
        parser.register_infix(TokenKind::Gt, Parser::parse_infix_expression);
        parser.register_infix(TokenKind::LParen, Parser::parse_call_expression);
        parser.register_infix(TokenKind::LBracket, Parser::parse_index_expression);

        parser
    }

    pub fn errors(&self) -> Vec<String> {
        self.handler.messages()
    }

    fn register_prefix(&mut self, kind: TokenKind, f: PrefixFn) {
        self.prefix_fns.insert(kind, f);
    }

    fn register_infix(&mut self, kind: TokenKind, f: InfixFn) {
        self.infix_fns.insert(kind, f);
    }

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.next_token();
            true
        } else {
            self.handler.report(
                format!(
                    "expected '{}' to be {}, got {} instead",
                    self.peek_token.literal, kind, self.peek_token.kind
                ),
                self.peek_token.span,
            );
            false
        }
    }

    fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek_token.kind)
    }

    fn cur_precedence(&self) -> Precedence {
        precedence_of(self.cur_token.kind)
    }

    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();
        while !self.cur_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt);
            }
            self.next_token();
        }
        program
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.kind {
            TokenKind::Let => self.parse_let_statement().map(Statement::Let),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            _ => self.parse_expression_statement().map(Statement::Expression),
        }
    }

    fn parse_let_statement(&mut self) -> Option<LetStatement> {
        let token = self.cur_token.clone();
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier { token: self.cur_token.clone(), value: self.cur_token.literal.clone() };
        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest);
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
        Some(LetStatement { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<ReturnStatement> {
        let token = self.cur_token.clone();
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest);
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
        Some(ReturnStatement { token, value })
    }

    fn parse_expression_statement(&mut self) -> Option<ExpressionStatement> {
        let token = self.cur_token.clone();
        let expression = self.parse_expression(Precedence::Lowest);
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
        Some(ExpressionStatement { token, expression })
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let prefix = match self.prefix_fns.get(&self.cur_token.kind) {
            Some(f) => *f,
            None => {
                self.handler.report(
                    format!("no prefix parse function for {} found", self.cur_token.kind),
                    self.cur_token.span,
                );
                return None;
            }
        };
        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let infix = match self.infix_fns.get(&self.peek_token.kind) {
                Some(f) => *f,
                None => return Some(left),
            };
            self.next_token();
            left = infix(self, left)?;
        }
        Some(left)
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(Identifier {
            token: self.cur_token.clone(),
            value: self.cur_token.literal.clone(),
        }))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral(IntegerLiteral { token, value })),
            Err(_) => {
                self.handler.report(
                    format!("could not parse '{}' as integer", token.literal),
                    token.span,
                );
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let value = token.literal.clone();
        Some(Expression::StringLiteral(StringLiteral { token, value }))
    }

    fn parse_boolean_literal(&mut self) -> Option<Expression> {
        Some(Expression::BooleanLiteral(BooleanLiteral {
            token: self.cur_token.clone(),
            value: self.cur_is(TokenKind::True),
        }))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = token.literal.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix(PrefixExpression { token, operator, right: Box::new(right) }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = token.literal.clone();
        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expr)
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.cur_token.clone();
        let mut statements = Vec::new();
        self.next_token();
        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }
        BlockStatement { token, statements }
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If(IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut identifiers = Vec::new();
        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(identifiers);
        }
        self.next_token();
        identifiers.push(Identifier { token: self.cur_token.clone(), value: self.cur_token.literal.clone() });

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            identifiers.push(Identifier { token: self.cur_token.clone(), value: self.cur_token.literal.clone() });
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(identifiers)
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();
        Some(Expression::Function(FunctionLiteral { token, parameters, body }))
    }

    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = Vec::new();
        if self.peek_is(end) {
            self.next_token();
            return Some(list);
        }
        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }
        Some(list)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;
        Some(Expression::Call(CallExpression { token, function: Box::new(function), arguments }))
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(Expression::Array(ArrayLiteral { token, elements }))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RBracket) {
            return None;
        }
        Some(Expression::Index(IndexExpression { token, left: Box::new(left), index: Box::new(index) }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> (Program, Vec<String>) {
        let mut parser = Parser::new(input);
        let program = parser.parse_program();
        (program, parser.errors())
    }

    #[test]
    fn let_statements() {
        let (program, errors) = parse("let x = 5; let y = 10; let foobar = 838383;");
        assert!(errors.is_empty());
        assert_eq!(program.statements.len(), 3);
    }

    #[test]
    fn missing_identifier_after_let_is_a_diagnostic() {
        let (_, errors) = parse("let = 5;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], "expected '=' to be IDENT, got ASSIGN instead");
    }

    #[test]
    fn precedence_reprints_with_parens() {
        let cases = [
            ("a + b * c", "(a + (b * c))"),
            ("-x * y", "((-x) * y)"),
            ("!(true == true)", "(!(true == true))"),
            (
                "(4 + 6 * 2 + 12 / 4) * 2 + -10",
                "((((4 + (6 * 2)) + (12 / 4)) * 2) + (-10))",
            ),
        ];
        for (input, want) in cases {
            let (program, errors) = parse(input);
            assert!(errors.is_empty(), "{input}: {errors:?}");
            assert_eq!(program.to_string(), want);
        }
    }

    #[test]
    fn if_else_reprints() {
        let (program, errors) = parse("if (x < y) { x } else { y }");
        assert!(errors.is_empty());
        assert_eq!(program.to_string(), "if(x < y) xelse y");
    }

    #[test]
    fn function_literal_reprints() {
        let (program, errors) = parse("fn(x, y) { x + y; }");
        assert!(errors.is_empty());
        assert_eq!(program.to_string(), "fn(x, y) {\n(x + y)\n}");
    }

    #[test]
    fn call_array_and_index_reprint() {
        let (program, errors) = parse("add(1, 2 * 3, 4 + 5); [1, 2][1 + 1]");
        assert!(errors.is_empty());
        assert_eq!(
            program.to_string(),
            "add(1, (2 * 3), (4 + 5))([1, 2][(1 + 1)])"
        );
    }

    #[test]
    fn round_trips_through_reprint() {
        let input = "let x = fn(a, b) { if (a > b) { return a; } return b; }; x(1, 2)";
        let (program, errors) = parse(input);
        assert!(errors.is_empty());
        let printed = program.to_string();
        let (reparsed, errors2) = parse(&printed);
        assert!(errors2.is_empty(), "{printed}: {errors2:?}");
        assert_eq!(reparsed.to_string(), printed);
    }

    #[test]
    fn parser_never_panics_on_malformed_input() {
        for input in ["let", "fn(", "if (", "[1, 2", "return", "(((", "let x = "] {
            let mut parser = Parser::new(input);
            let _ = parser.parse_program();
        }
    }
}
