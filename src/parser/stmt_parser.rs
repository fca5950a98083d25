use crate::ast::{Declaration, Stmt};
use crate::parser::condition_parser::parse_condition;
use crate::parser::expr_parser::{finish_call, parse_expression};
use crate::parser::type_parser::var_type_of;
use crate::parser::{ParseResult, Parser};
use crate::runtime::VarType;
use crate::source::SourceReader;
use crate::token::TokenType;

/// statement := declaration | assignment | call ';' | if | while | return | block
pub fn parse_statement<R: SourceReader>(parser: &mut Parser<R>) -> ParseResult<Stmt> {
    if let Some(var_type) = var_type_of(&parser.peek().token_type) {
        let type_token = parser.advance()?;
        // `frc(1, 2);` names a function, not a declaration.
        if parser.check(&TokenType::LeftParen) || parser.check(&TokenType::Assignment) {
            return parse_assign_or_call(parser, type_token.lexeme);
        }
        return parse_declaration_rest(parser, var_type).map(Stmt::Define);
    }

    if let TokenType::Identifier(name) = &parser.peek().token_type {
        let name = name.clone();
        parser.advance()?;
        return parse_assign_or_call(parser, name);
    }

    if parser.match_token(&[TokenType::If])?.is_some() {
        return parse_if(parser);
    }
    if parser.match_token(&[TokenType::While])?.is_some() {
        return parse_while(parser);
    }
    if parser.match_token(&[TokenType::Return])?.is_some() {
        let expr = parse_expression(parser)?;
        parser.consume(TokenType::Semicolon, "';' after return value")?;
        return Ok(Stmt::Return(expr));
    }

    parse_block(parser)
}

/// Remainder of `type identifier ('=' expression)? ';'` once the type name
/// has been consumed.
pub fn parse_declaration_rest<R: SourceReader>(
    parser: &mut Parser<R>,
    var_type: VarType,
) -> ParseResult<Declaration> {
    let name = parser.consume_identifier("variable name")?;

    let value = if parser.match_token(&[TokenType::Assignment])?.is_some() {
        Some(parse_expression(parser)?)
    } else {
        None
    };

    parser.consume(TokenType::Semicolon, "';' after variable declaration")?;

    Ok(Declaration {
        var_type,
        name,
        value,
    })
}

fn parse_assign_or_call<R: SourceReader>(parser: &mut Parser<R>, name: String) -> ParseResult<Stmt> {
    if parser.match_token(&[TokenType::Assignment])?.is_some() {
        let value = parse_expression(parser)?;
        parser.consume(TokenType::Semicolon, "';' after assignment")?;
        return Ok(Stmt::Assign(name, value));
    }

    if parser.match_token(&[TokenType::LeftParen])?.is_some() {
        let call = finish_call(parser, name)?;
        parser.consume(TokenType::Semicolon, "';' after function call")?;
        return Ok(Stmt::Call(call));
    }

    Err(parser.unexpected("'=' or '(' after identifier"))
}

fn parse_if<R: SourceReader>(parser: &mut Parser<R>) -> ParseResult<Stmt> {
    parser.consume(TokenType::LeftParen, "'(' after 'if'")?;
    let condition = parse_condition(parser)?;
    parser.consume(TokenType::RightParen, "')' after if condition")?;

    let then_branch = parse_statement(parser)?;
    let else_branch = if parser.match_token(&[TokenType::Else])?.is_some() {
        Some(Box::new(parse_statement(parser)?))
    } else {
        None
    };

    Ok(Stmt::If(condition, Box::new(then_branch), else_branch))
}

fn parse_while<R: SourceReader>(parser: &mut Parser<R>) -> ParseResult<Stmt> {
    parser.consume(TokenType::LeftParen, "'(' after 'while'")?;
    let condition = parse_condition(parser)?;
    parser.consume(TokenType::RightParen, "')' after while condition")?;

    let body = parse_statement(parser)?;
    Ok(Stmt::While(condition, Box::new(body)))
}

fn parse_block<R: SourceReader>(parser: &mut Parser<R>) -> ParseResult<Stmt> {
    parser.consume(TokenType::LeftBrace, "statement")?;

    let mut statements = Vec::new();
    while !parser.check(&TokenType::RightBrace) {
        if parser.is_at_end() {
            return Err(parser.unexpected("'}' after block"));
        }
        statements.push(parse_statement(parser)?);
    }
    parser.advance()?;

    Ok(Stmt::Block(statements))
}
