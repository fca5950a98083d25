pub mod condition_parser;
pub mod expr_parser;
pub mod function_parser;
pub mod stmt_parser;
pub mod type_parser;

use crate::ast::Program;
use crate::lexer::{Lexer, LexerError};
use crate::source::SourceReader;
use crate::token::{Token, TokenType};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexerError),

    #[error("Unexpected token: expected {expected}, found {found} at line {line}, column {column}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },

    #[error("Invalid syntax: {message}, found {found} at line {line}, column {column}")]
    InvalidSyntax {
        message: String,
        found: String,
        line: usize,
        column: usize,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive-descent parser with a single token of lookahead. Tokens are
/// pulled from the lexer as the grammar asks for them.
pub struct Parser<R: SourceReader> {
    lexer: Lexer<R>,
    current: Token,
}

impl<R: SourceReader> Parser<R> {
    pub fn new(mut lexer: Lexer<R>) -> ParseResult<Self> {
        let current = lexer.next_token()?;
        Ok(Parser { lexer, current })
    }

    /// program := (function_definition | declaration)* EOF
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut program = Program {
            functions: Vec::new(),
            globals: Vec::new(),
        };

        while !self.is_at_end() {
            if let Some(function) = function_parser::try_parse_function(self)? {
                program.functions.push(function);
            } else if let Some(var_type) = type_parser::try_parse_type(self)? {
                let declaration = stmt_parser::parse_declaration_rest(self, var_type)?;
                program.globals.push(declaration);
            } else {
                return Err(self.error("expected function definition or variable declaration"));
            }
        }

        Ok(program)
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    /// Moves to the next token and hands back the one that was current.
    pub fn advance(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub fn check(&self, token_type: &TokenType) -> bool {
        &self.current.token_type == token_type
    }

    pub fn match_token(&mut self, types: &[TokenType]) -> ParseResult<Option<Token>> {
        for token_type in types {
            if self.check(token_type) {
                return self.advance().map(Some);
            }
        }
        Ok(None)
    }

    pub fn consume(&mut self, token_type: TokenType, expected: &str) -> ParseResult<Token> {
        if self.check(&token_type) {
            self.advance()
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Identifier position. Type names are accepted here as well so that
    /// built-ins such as `frc` stay callable.
    pub fn match_identifier(&mut self) -> ParseResult<Option<String>> {
        match &self.current.token_type {
            TokenType::Identifier(name) => {
                let name = name.clone();
                self.advance()?;
                Ok(Some(name))
            }
            token_type if token_type.is_type_name() => {
                let token = self.advance()?;
                Ok(Some(token.lexeme))
            }
            _ => Ok(None),
        }
    }

    pub fn consume_identifier(&mut self, expected: &str) -> ParseResult<String> {
        match self.match_identifier()? {
            Some(name) => Ok(name),
            None => Err(self.unexpected(expected)),
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.check(&TokenType::EOF)
    }

    pub fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: format!("'{}'", self.current.lexeme),
            line: self.current.line,
            column: self.current.column,
        }
    }

    pub fn error(&self, message: &str) -> ParseError {
        ParseError::InvalidSyntax {
            message: message.to_string(),
            found: format!("'{}'", self.current.lexeme),
            line: self.current.line,
            column: self.current.column,
        }
    }
}

#[cfg(test)]
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let mut parser = Parser::new(Lexer::new(crate::source::StringSource::new(source)))?;
    parser.parse_program()
}
