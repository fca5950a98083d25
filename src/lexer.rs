use crate::source::{SourceReader, StringSource};
use crate::symbols::{DOUBLE_CHAR_SYMBOLS, KEYWORDS, SINGLE_CHAR_SYMBOLS};
use crate::token::{Token, TokenType};
use thiserror::Error;

pub const MAX_IDENTIFIER_LENGTH: usize = 1 << 16;
pub const MAX_STRING_LENGTH: usize = 1 << 16;

// Characters that may directly follow a numeric literal (besides whitespace
// and end of input).
const ALLOWED_AFTER_NUMBER: &[char] = &[
    '=', '<', '>', '!', '+', '-', '*', '/', '(', ')', ';', ',', '&', '|',
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexErrorKind {
    #[error("Unknown token '{0}'")]
    UnknownToken(char),
    #[error("Invalid character '{0}' after number literal")]
    InvalidNumberSuffix(char),
    #[error("Expected decimal digit after '.'")]
    ExpectedDecimal,
    #[error("Number literal is too large")]
    LiteralTooLarge,
    #[error("Identifier length exceeded {} characters", MAX_IDENTIFIER_LENGTH)]
    IdentifierTooLong,
    #[error("String literal exceeded {} characters", MAX_STRING_LENGTH)]
    StringTooLong,
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Invalid token, expected '{expected}', found {found}")]
    IncompleteOperator { expected: char, found: String },
}

#[derive(Error, Debug, Clone)]
#[error("{kind} at line {line}, column {column}\n{source_line}")]
pub struct LexerError {
    pub kind: LexErrorKind,
    pub line: usize,
    pub column: usize,
    pub source_line: String,
}

type LexResult<T> = Result<T, LexerError>;
type TokenBuilder<R> = fn(&mut Lexer<R>, usize, usize) -> LexResult<Option<Token>>;

/// Pull-based tokenizer. Each call to [`Lexer::next_token`] consumes exactly
/// one token from the underlying reader; after the input is exhausted every
/// call yields an `EOF` token.
pub struct Lexer<R: SourceReader> {
    source: R,
}

impl<R: SourceReader> Lexer<R> {
    pub fn new(mut source: R) -> Self {
        source.advance();
        Lexer { source }
    }

    pub fn next_token(&mut self) -> LexResult<Token> {
        self.skip_whitespace_and_comments();
        let (line, column) = self.source.position();

        let builders: [TokenBuilder<R>; 5] = [
            Self::try_identifier,
            Self::try_number,
            Self::try_string,
            Self::try_double_char_symbol,
            Self::try_single_char_symbol,
        ];
        for build in builders {
            if let Some(token) = build(self, line, column)? {
                return Ok(token);
            }
        }

        match self.peek() {
            Some(c) => Err(self.error(LexErrorKind::UnknownToken(c))),
            None => Ok(Token {
                token_type: TokenType::EOF,
                lexeme: String::from("EOF"),
                line,
                column,
            }),
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.source.advance();
                }
                Some('#') => {
                    while let Some(c) = self.source.advance() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn try_identifier(&mut self, line: usize, column: usize) -> LexResult<Option<Token>> {
        let first = match self.peek() {
            Some(c) if c.is_alphabetic() || c == '_' => c,
            _ => return Ok(None),
        };

        let mut buffer = String::from(first);
        let mut length = 1;
        while let Some(c) = self.source.advance() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            buffer.push(c);
            length += 1;
            if length > MAX_IDENTIFIER_LENGTH {
                return Err(self.error(LexErrorKind::IdentifierTooLong));
            }
        }

        let token_type = match KEYWORDS.get(buffer.as_str()) {
            Some(keyword) => keyword.clone(),
            None => TokenType::Identifier(buffer.clone()),
        };
        Ok(Some(Token {
            token_type,
            lexeme: buffer,
            line,
            column,
        }))
    }

    fn try_number(&mut self, line: usize, column: usize) -> LexResult<Option<Token>> {
        let first = match self.peek() {
            Some(c) if c.is_ascii_digit() => c,
            _ => return Ok(None),
        };

        let mut buffer = String::from(first);
        // A leading zero is a complete integer part on its own.
        if first != '0' {
            while let Some(c) = self.source.advance() {
                if !c.is_ascii_digit() {
                    break;
                }
                buffer.push(c);
            }
        } else {
            self.source.advance();
        }

        if self.peek() == Some('.') {
            match self.source.advance() {
                Some(c) if c.is_ascii_digit() => {
                    buffer.push('.');
                    buffer.push(c);
                }
                _ => return Err(self.error(LexErrorKind::ExpectedDecimal)),
            }
            while let Some(c) = self.source.advance() {
                if !c.is_ascii_digit() {
                    break;
                }
                buffer.push(c);
            }
            self.check_number_follow()?;

            let value: f64 = buffer
                .parse()
                .map_err(|_| self.error(LexErrorKind::ExpectedDecimal))?;
            if value.is_infinite() {
                return Err(self.error(LexErrorKind::LiteralTooLarge));
            }
            return Ok(Some(Token {
                token_type: TokenType::FloatLiteral(value),
                lexeme: buffer,
                line,
                column,
            }));
        }

        self.check_number_follow()?;
        let value: i64 = buffer
            .parse()
            .map_err(|_| self.error(LexErrorKind::LiteralTooLarge))?;
        Ok(Some(Token {
            token_type: TokenType::IntLiteral(value),
            lexeme: buffer,
            line,
            column,
        }))
    }

    fn check_number_follow(&self) -> LexResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(c) if c.is_whitespace() || ALLOWED_AFTER_NUMBER.contains(&c) => Ok(()),
            Some(c) => Err(self.error(LexErrorKind::InvalidNumberSuffix(c))),
        }
    }

    fn try_string(&mut self, line: usize, column: usize) -> LexResult<Option<Token>> {
        if self.peek() != Some('"') {
            return Ok(None);
        }

        let mut value = String::new();
        let mut length = 0;
        loop {
            match self.source.advance() {
                None => return Err(self.error(LexErrorKind::UnterminatedString)),
                Some('"') => break,
                // Backslash passes the next character through untouched.
                Some('\\') => match self.source.advance() {
                    Some(c) => value.push(c),
                    None => return Err(self.error(LexErrorKind::UnterminatedString)),
                },
                Some(c) => value.push(c),
            }
            length += 1;
            if length > MAX_STRING_LENGTH {
                return Err(self.error(LexErrorKind::StringTooLong));
            }
        }

        // Consume the closing '"'
        self.source.advance();

        Ok(Some(Token {
            lexeme: format!("\"{}\"", value),
            token_type: TokenType::StringLiteral(value),
            line,
            column,
        }))
    }

    fn try_double_char_symbol(&mut self, line: usize, column: usize) -> LexResult<Option<Token>> {
        let first = match self.peek() {
            Some(c) => c,
            None => return Ok(None),
        };

        match first {
            '&' | '|' => {
                let second = self.source.advance();
                if second != Some(first) {
                    let found = match second {
                        Some(c) => format!("'{}'", c),
                        None => String::from("end of input"),
                    };
                    return Err(self.error(LexErrorKind::IncompleteOperator {
                        expected: first,
                        found,
                    }));
                }
                self.source.advance();
                Ok(self.double_char_token(format!("{}{}", first, first), line, column))
            }
            '<' | '>' | '=' | '!' | '-' => {
                let second = self.source.advance();
                let symbol = match (first, second) {
                    ('-', Some('>')) => Some(String::from("->")),
                    ('-', _) => None,
                    (_, Some('=')) => Some(format!("{}=", first)),
                    _ => None,
                };

                match symbol {
                    Some(symbol) => {
                        self.source.advance();
                        Ok(self.double_char_token(symbol, line, column))
                    }
                    // The first character was already consumed, fall back to
                    // its single-character meaning.
                    None => Ok(SINGLE_CHAR_SYMBOLS.get(&first).map(|token_type| Token {
                        token_type: token_type.clone(),
                        lexeme: first.to_string(),
                        line,
                        column,
                    })),
                }
            }
            _ => Ok(None),
        }
    }

    fn double_char_token(&self, symbol: String, line: usize, column: usize) -> Option<Token> {
        DOUBLE_CHAR_SYMBOLS
            .get(symbol.as_str())
            .map(|token_type| Token {
                token_type: token_type.clone(),
                lexeme: symbol.clone(),
                line,
                column,
            })
    }

    fn try_single_char_symbol(&mut self, line: usize, column: usize) -> LexResult<Option<Token>> {
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(None),
        };

        match SINGLE_CHAR_SYMBOLS.get(&c) {
            Some(token_type) => {
                let token_type = token_type.clone();
                self.source.advance();
                Ok(Some(Token {
                    token_type,
                    lexeme: c.to_string(),
                    line,
                    column,
                }))
            }
            None => Ok(None),
        }
    }

    fn peek(&self) -> Option<char> {
        self.source.current_char()
    }

    fn error(&self, kind: LexErrorKind) -> LexerError {
        let (line, column) = self.source.position();
        LexerError {
            kind,
            line,
            column,
            source_line: self.source.line_text(),
        }
    }
}

/// Tokenizes a whole string up to and including the `EOF` token.
pub fn lex(source: &str) -> Result<Vec<Token>, LexerError> {
    let mut lexer = Lexer::new(StringSource::new(source));
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        let done = token.token_type == TokenType::EOF;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
