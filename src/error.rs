use crate::lexer::LexerError;
use crate::parser::ParseError;
use crate::runtime::{RuntimeError, SemanticError};
use thiserror::Error;

/// Every failure a run can end with, one variant per pipeline stage.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Lexical(LexerError),

    #[error(transparent)]
    Syntax(ParseError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Header used when reporting the error on the console.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Lexical(_) => "Lexer error",
            Error::Syntax(_) => "Parser error",
            Error::Semantic(_) | Error::Runtime(_) => "Interpreter error",
        }
    }
}

impl From<LexerError> for Error {
    fn from(error: LexerError) -> Self {
        Error::Lexical(error)
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::Lexical(error) => Error::Lexical(error),
            other => Error::Syntax(other),
        }
    }
}
