//! Grammar for one layer record of the color table:
//!
//! ```text
//! record := "[" int "]" "=" "{" triple ("," triple)* ","? "}" ","
//! triple := "{" byte "," byte "," byte "}"
//! ```
//!
//! Whitespace is allowed between any two tokens.

use thiserror::Error;

use crate::types::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRecord {
    pub layer_id: usize,
    pub colors: Vec<Color>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected {expected} at column {column}")]
    Expected {
        expected: &'static str,
        column: usize,
    },
    #[error("number at column {column} is out of range")]
    OutOfRange { column: usize },
    #[error("unexpected text at column {column}")]
    Trailing { column: usize },
}

pub fn parse_record(line: &str) -> Result<LayerRecord, RecordError> {
    let mut scanner = Scanner::new(line);

    scanner.expect(b'[', "`[`")?;
    let layer_id = scanner.number()?;
    scanner.expect(b']', "`]`")?;
    scanner.expect(b'=', "`=`")?;
    scanner.expect(b'{', "`{`")?;

    let mut colors = vec![scanner.triple()?];
    while scanner.eat(b',') {
        if scanner.peek() == Some(b'}') {
            break;
        }
        colors.push(scanner.triple()?);
    }

    scanner.expect(b'}', "`}`")?;
    scanner.expect(b',', "`,`")?;
    scanner.finish()?;

    Ok(LayerRecord { layer_id, colors })
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(line: &'a str) -> Self {
        Scanner {
            bytes: line.as_bytes(),
            pos: 0,
        }
    }

    fn column(&self) -> usize {
        self.pos + 1
    }

    fn skip_whitespace(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|byte| byte.is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }

    /// Next significant byte, without consuming it
    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), RecordError> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(RecordError::Expected {
                expected,
                column: self.column(),
            })
        }
    }

    fn number(&mut self) -> Result<usize, RecordError> {
        self.skip_whitespace();
        let column = self.column();
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(RecordError::Expected {
                expected: "a number",
                column,
            });
        }
        // Only ASCII digits were consumed
        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()
            .and_then(|digits| digits.parse().ok())
            .ok_or(RecordError::OutOfRange { column })
    }

    fn byte(&mut self) -> Result<u8, RecordError> {
        self.skip_whitespace();
        let column = self.column();
        let value = self.number()?;
        u8::try_from(value).map_err(|_| RecordError::OutOfRange { column })
    }

    fn triple(&mut self) -> Result<Color, RecordError> {
        self.expect(b'{', "`{`")?;
        let first = self.byte()?;
        self.expect(b',', "`,`")?;
        let second = self.byte()?;
        self.expect(b',', "`,`")?;
        let third = self.byte()?;
        self.expect(b'}', "`}`")?;
        Ok(Color(first, second, third))
    }

    fn finish(&mut self) -> Result<(), RecordError> {
        self.skip_whitespace();
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(RecordError::Trailing {
                column: self.column(),
            })
        }
    }
}
