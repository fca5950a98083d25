use crate::parser::{ParseResult, Parser};
use crate::runtime::VarType;
use crate::source::SourceReader;
use crate::token::TokenType;

pub fn var_type_of(token_type: &TokenType) -> Option<VarType> {
    match token_type {
        TokenType::Integer => Some(VarType::Int),
        TokenType::Float => Some(VarType::Float),
        TokenType::Fraction => Some(VarType::Frc),
        TokenType::String => Some(VarType::String),
        _ => None,
    }
}

pub fn try_parse_type<R: SourceReader>(parser: &mut Parser<R>) -> ParseResult<Option<VarType>> {
    match var_type_of(&parser.peek().token_type) {
        Some(var_type) => {
            parser.advance()?;
            Ok(Some(var_type))
        }
        None => Ok(None),
    }
}

pub fn parse_type<R: SourceReader>(parser: &mut Parser<R>) -> ParseResult<VarType> {
    match try_parse_type(parser)? {
        Some(var_type) => Ok(var_type),
        None => Err(parser.unexpected("type name")),
    }
}
