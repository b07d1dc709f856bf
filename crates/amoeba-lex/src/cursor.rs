//! Byte cursor over the source text.
//!
//! Mirrors the `position`/`readPos`/`ch` model from spec.md §4.B: a single
//! forward-only scan, ASCII-at-a-time, with byte `0` standing in for
//! end-of-input so the lexer's `match` arms never need an `Option`.

pub struct Cursor<'a> {
    input: &'a [u8],
    position: usize,
    read_position: usize,
    ch: u8,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut cursor = Self {
            input: input.as_bytes(),
            position: 0,
            read_position: 0,
            ch: 0,
            line: 1,
            column: 0,
        };
        cursor.read_char();
        cursor
    }

    pub fn read_char(&mut self) {
        if self.ch == b'\n' {
            self.line += 1;
            self.column = 0;
        }
        self.ch = if self.read_position >= self.input.len() {
            0
        } else {
            self.input[self.read_position]
        };
        self.position = self.read_position;
        self.read_position += 1;
        self.column += 1;
    }

    pub fn peek_char(&self) -> u8 {
        if self.read_position >= self.input.len() {
            0
        } else {
            self.input[self.read_position]
        }
    }

    pub fn ch(&self) -> u8 {
        self.ch
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        std::str::from_utf8(&self.input[start..end]).unwrap_or_default()
    }
}
