use std::fs;
use std::io;
use std::path::Path;

/// Character supplier consumed by the lexer.
///
/// `advance` moves to the next character and returns it; `None` marks the end
/// of input and is returned for every call after that.
pub trait SourceReader {
    fn advance(&mut self) -> Option<char>;
    fn current_char(&self) -> Option<char>;
    fn position(&self) -> (usize, usize);
    fn line_text(&self) -> String;
}

pub struct StringSource {
    text: String,
    chars: Vec<char>,
    next: usize,
    current: Option<char>,
    line: usize,
    column: usize,
}

impl StringSource {
    pub fn new(text: &str) -> Self {
        StringSource {
            text: text.to_string(),
            chars: text.chars().collect(),
            next: 0,
            current: None,
            line: 1,
            column: 0,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(StringSource::new(&text))
    }
}

impl SourceReader for StringSource {
    fn advance(&mut self) -> Option<char> {
        self.current = self.chars.get(self.next).copied();
        if let Some(c) = self.current {
            self.next += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.current
    }

    fn current_char(&self) -> Option<char> {
        self.current
    }

    fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    fn line_text(&self) -> String {
        self.text
            .lines()
            .nth(self.line.saturating_sub(1))
            .unwrap_or("")
            .to_string()
    }
}
