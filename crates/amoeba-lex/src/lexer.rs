//! One-pass lexer (spec.md §4.B).
//!
//! No preallocation, no buffering beyond the current token's start
//! position: each call to [`Lexer::next_token`] reads exactly as many
//! bytes as that token needs and nothing more.

use amoeba_util::Span;

use crate::cursor::Cursor;
use crate::token::{lookup_ident, Token, TokenKind};

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// # Examples
    ///
    /// ```
    /// use amoeba_lex::{Lexer, TokenKind};
    ///
    /// let mut lexer = Lexer::new("let x = 5;");
    /// assert_eq!(lexer.next_token().kind, TokenKind::Let);
    /// ```
    pub fn new(input: &'a str) -> Self {
        Self { cursor: Cursor::new(input), done: false }
    }

    /// Scans and returns the next token, advancing past it. Calling this
    /// again after an `Eof` keeps returning `Eof` rather than panicking.
    ///
    /// # Examples
    ///
    /// ```
    /// use amoeba_lex::{Lexer, TokenKind};
    ///
    /// let mut lexer = Lexer::new("+");
    /// assert_eq!(lexer.next_token().kind, TokenKind::Plus);
    /// assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    /// ```
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.cursor.position();
        let line = self.cursor.line();
        let column = self.cursor.column();
        let span_of = |cursor: &Cursor, start: usize| {
            Span::new(start, cursor.position(), line, column)
        };

        let tok = match self.cursor.ch() {
            b'=' => {
                if self.cursor.peek_char() == b'=' {
                    self.cursor.read_char();
                    self.cursor.read_char();
                    Token::new(TokenKind::Eq, "==", span_of(&self.cursor, start))
                } else {
                    self.cursor.read_char();
                    Token::new(TokenKind::Assign, "=", span_of(&self.cursor, start))
                }
            }
            b'!' => {
                if self.cursor.peek_char() == b'=' {
                    self.cursor.read_char();
                    self.cursor.read_char();
                    Token::new(TokenKind::NotEq, "!=", span_of(&self.cursor, start))
                } else {
                    self.cursor.read_char();
                    Token::new(TokenKind::Bang, "!", span_of(&self.cursor, start))
                }
            }
            b'+' => self.single(TokenKind::Plus, start, line, column),
            b'-' => self.single(TokenKind::Minus, start, line, column),
            b'*' => self.single(TokenKind::Asterisk, start, line, column),
            b'/' => self.single(TokenKind::Slash, start, line, column),
            b'<' => self.single(TokenKind::Lt, start, line, column),
            b'>' => self.single(TokenKind::Gt, start, line, column),
            b',' => self.single(TokenKind::Comma, start, line, column),
            b';' => self.single(TokenKind::Semicolon, start, line, column),
            b':' => self.single(TokenKind::Colon, start, line, column),
            b'(' => self.single(TokenKind::LParen, start, line, column),
            b')' => self.single(TokenKind::RParen, start, line, column),
            b'{' => self.single(TokenKind::LBrace, start, line, column),
            b'}' => self.single(TokenKind::RBrace, start, line, column),
            b'[' => self.single(TokenKind::LBracket, start, line, column),
            b']' => self.single(TokenKind::RBracket, start, line, column),
            b'"' => self.read_string(start, line, column),
            0 => {
                self.done = true;
                Token::new(TokenKind::Eof, "", span_of(&self.cursor, start))
            }
            ch if is_letter(ch) => return self.read_identifier(start, line, column),
            ch if ch.is_ascii_digit() => return self.read_number(start, line, column),
            ch => {
                let literal = (ch as char).to_string();
                self.cursor.read_char();
                Token::new(TokenKind::Illegal, literal, span_of(&self.cursor, start))
            }
        };
        tok
    }

    fn single(&mut self, kind: TokenKind, start: usize, line: u32, column: u32) -> Token {
        let literal = (self.cursor.ch() as char).to_string();
        self.cursor.read_char();
        Token::new(kind, literal, Span::new(start, self.cursor.position(), line, column))
    }

    fn read_identifier(&mut self, start: usize, line: u32, column: u32) -> Token {
        while is_letter(self.cursor.ch()) {
            self.cursor.read_char();
        }
        let literal = self.cursor.slice(start, self.cursor.position());
        let kind = lookup_ident(literal);
        Token::new(kind, literal, Span::new(start, self.cursor.position(), line, column))
    }

    fn read_number(&mut self, start: usize, line: u32, column: u32) -> Token {
        while self.cursor.ch().is_ascii_digit() {
            self.cursor.read_char();
        }
        let literal = self.cursor.slice(start, self.cursor.position());
        Token::new(TokenKind::Int, literal, Span::new(start, self.cursor.position(), line, column))
    }

    /// Consumes until the closing `"`. Hitting `Eof` first silently closes
    /// the string with whatever was read (spec.md §4.B, §9 — preserved
    /// intentionally, not a bug to fix).
    fn read_string(&mut self, start: usize, line: u32, column: u32) -> Token {
        self.cursor.read_char(); // opening quote
        let body_start = self.cursor.position();
        while self.cursor.ch() != b'"' && self.cursor.ch() != 0 {
            self.cursor.read_char();
        }
        let literal = self.cursor.slice(body_start, self.cursor.position()).to_string();
        if self.cursor.ch() == b'"' {
            self.cursor.read_char();
        }
        Token::new(TokenKind::String, literal, Span::new(start, self.cursor.position(), line, column))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.cursor.ch(), b' ' | b'\t' | b'\n' | b'\r') {
            self.cursor.read_char();
        }
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let tok = self.next_token();
        if tok.kind == TokenKind::Eof {
            self.done = true;
        }
        Some(tok)
    }
}
