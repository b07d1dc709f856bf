//! `amoeba-lex` — Amoeba's hand-written lexer (spec.md §4.B).
//!
//! A single-pass, non-failing scanner: unrecognized bytes become
//! [`TokenKind::Illegal`] tokens rather than errors, so the parser is
//! always the first place a lexical problem becomes a diagnostic.
//!
//! ## Token categories
//!
//! Every byte the [`Lexer`] reads falls into one of five buckets:
//!
//! - **Identifiers/keywords** — `[a-zA-Z_]+`, resolved against the fixed
//!   keyword table in [`lookup_ident`] (`fn let true false if else return`);
//!   anything not in that table is `Ident`.
//! - **Integers** — `[0-9]+`, no sign, no float/hex/octal forms (spec.md
//!   Non-goals).
//! - **Strings** — `"` delimited, closing silently at `Eof` instead of
//!   erroring (spec.md §9).
//! - **Operators/delimiters** — single-byte tokens, except `==` and `!=`
//!   which need one byte of lookahead via [`cursor::Cursor::peek_char`].
//! - **Illegal** — any other byte, carried through as its own one-byte
//!   literal so the parser can still report a location for it.
//!
//! ```text
//! "let x = 1 + 2;"
//!   │
//!   ▼
//! [Let] [Ident("x")] [Assign] [Int("1")] [Plus] [Int("2")] [Semicolon] [Eof]
//! ```
//!
//! The lexer never looks at more than one token's worth of context — it
//! has no notion of statements or expressions. That grouping is entirely
//! `amoeba-par`'s job.

mod cursor;
mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{lookup_ident, Token, TokenKind};

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            let done = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn lexes_let_statement() {
        let toks = kinds("let five = 5;");
        assert_eq!(
            toks,
            vec![
                TokenKind::Let,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_operators_and_delimiters() {
        let input = "!-/*5;\n5 < 10 > 5;";
        let toks = kinds(input);
        assert_eq!(
            toks,
            vec![
                TokenKind::Bang,
                TokenKind::Minus,
                TokenKind::Slash,
                TokenKind::Asterisk,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::Lt,
                TokenKind::Int,
                TokenKind::Gt,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn two_char_operators_need_lookahead() {
        let toks = kinds("10 == 10; 10 != 9;");
        assert_eq!(
            toks,
            vec![
                TokenKind::Int,
                TokenKind::Eq,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::NotEq,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_resolve_through_the_table() {
        let toks = kinds("fn let true false if else return");
        assert_eq!(
            toks,
            vec![
                TokenKind::Function,
                TokenKind::Let,
                TokenKind::True,
                TokenKind::False,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::Return,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn strings_arrays_and_hash_position() {
        let mut lexer = Lexer::new(r#""foobar" "foo bar" [1, 2]; {"a": 1}"#);
        let mut literals = Vec::new();
        loop {
            let tok = lexer.next_token();
            if tok.kind == TokenKind::Eof {
                break;
            }
            literals.push((tok.kind, tok.literal));
        }
        assert_eq!(literals[0], (TokenKind::String, "foobar".to_string()));
        assert_eq!(literals[1], (TokenKind::String, "foo bar".to_string()));
        assert!(literals.contains(&(TokenKind::LBracket, "[".to_string())));
        assert!(literals.contains(&(TokenKind::Colon, ":".to_string())));
    }

    #[test]
    fn unterminated_string_closes_silently_at_eof() {
        let mut lexer = Lexer::new("\"unterminated");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::String);
        assert_eq!(tok.literal, "unterminated");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn illegal_byte_carries_offending_character() {
        let mut lexer = Lexer::new("@");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Illegal);
        assert_eq!(tok.literal, "@");
    }

    #[test]
    fn eof_is_idempotent() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn never_panics_and_always_terminates() {
        let samples = [
            "\0\0\0", "\"\"\"", "[[[[", "====", "____", "123abc_$$",
            "let\nif\nelse\n\t\t  ", "\"\\",
        ];
        for s in samples {
            let mut lexer = Lexer::new(s);
            let mut steps = 0;
            loop {
                let tok = lexer.next_token();
                steps += 1;
                if tok.kind == TokenKind::Eof || steps > s.len() + 4 {
                    break;
                }
            }
            assert!(steps <= s.len() + 4, "lexer did not terminate on {s:?}");
        }
    }
}

/// Grounded in the teacher crate's proptest-based lexer fuzz check:
/// arbitrary byte soup must never panic and must always reach `Eof` in a
/// bounded number of steps.
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn arbitrary_input_never_panics_and_terminates(s in "\\PC*") {
            let mut lexer = Lexer::new(&s);
            let mut steps = 0usize;
            loop {
                let tok = lexer.next_token();
                steps += 1;
                prop_assert!(steps <= s.len() + 4, "lexer did not terminate on {:?}", s);
                if tok.kind == TokenKind::Eof {
                    break;
                }
            }
        }
    }
}
