use std::str::Lines;

/// Forward-only reader over the lines of the source file. Block processors
/// borrow it from the driver and consume exactly the lines they own.
pub struct LineCursor<'a> {
    lines: Lines<'a>,
    line: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        LineCursor {
            lines: text.lines(),
            line: 0,
        }
    }

    /// 1-based number of the line most recently returned, 0 before the first
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line += 1;
        Some(line)
    }
}
