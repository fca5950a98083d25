use crate::ast::{FunctionBody, FunctionDef, Parameter};
use crate::parser::stmt_parser::parse_statement;
use crate::parser::type_parser::{parse_type, try_parse_type};
use crate::parser::{ParseResult, Parser};
use crate::source::SourceReader;
use crate::token::TokenType;

/// function := 'fn' identifier '(' parameters ')' ('->' type)? statement
pub fn try_parse_function<R: SourceReader>(parser: &mut Parser<R>) -> ParseResult<Option<FunctionDef>> {
    if parser.match_token(&[TokenType::Function])?.is_none() {
        return Ok(None);
    }

    let name = parser.consume_identifier("function name")?;
    parser.consume(TokenType::LeftParen, "'(' after function name")?;
    let params = parse_parameters(parser)?;
    parser.consume(TokenType::RightParen, "')' after parameters")?;

    let return_type = if parser.match_token(&[TokenType::Arrow])?.is_some() {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let body = parse_statement(parser)?;

    Ok(Some(FunctionDef {
        name,
        params,
        body: FunctionBody::User(body),
        return_type,
    }))
}

fn parse_parameters<R: SourceReader>(parser: &mut Parser<R>) -> ParseResult<Vec<Parameter>> {
    let mut params = Vec::new();

    let Some(mut param_type) = try_parse_type(parser)? else {
        return Ok(params);
    };
    loop {
        let name = parser.consume_identifier("parameter name")?;
        params.push(Parameter { param_type, name });

        if parser.match_token(&[TokenType::Comma])?.is_none() {
            return Ok(params);
        }
        param_type = parse_type(parser)?;
    }
}
