use crate::ast::{AdditiveOp, Expr, FunctionCall, Literal, MultiplicativeOp};
use crate::parser::{ParseResult, Parser};
use crate::source::SourceReader;
use crate::token::TokenType;

fn additive_operator(token_type: &TokenType) -> Option<AdditiveOp> {
    match token_type {
        TokenType::Plus => Some(AdditiveOp::Add),
        TokenType::Minus => Some(AdditiveOp::Subtract),
        _ => None,
    }
}

fn multiplicative_operator(token_type: &TokenType) -> Option<MultiplicativeOp> {
    match token_type {
        TokenType::Multiply => Some(MultiplicativeOp::Multiply),
        TokenType::Divide => Some(MultiplicativeOp::Divide),
        _ => None,
    }
}

/// expression := subexpression (('+' | '-') subexpression)*
pub fn parse_expression<R: SourceReader>(parser: &mut Parser<R>) -> ParseResult<Expr> {
    let mut expr = parse_subexpression(parser)?;

    while let Some(operator) = additive_operator(&parser.peek().token_type) {
        parser.advance()?;
        let right = parse_subexpression(parser)?;
        expr = Expr::Additive {
            left: Box::new(expr),
            operator,
            right: Box::new(right),
        };
    }

    Ok(expr)
}

/// subexpression := '-'? factor (('*' | '/') factor)*
///
/// The leading minus is stored on the outermost node of the chain, so it is
/// applied once to the accumulated result: `-7 / 2` is `-(7 / 2)`.
fn parse_subexpression<R: SourceReader>(parser: &mut Parser<R>) -> ParseResult<Expr> {
    let negated = parser.match_token(&[TokenType::Minus])?.is_some();
    let mut expr = parse_factor(parser)?;
    let mut rest: Option<(MultiplicativeOp, Box<Expr>)> = None;

    while let Some(operator) = multiplicative_operator(&parser.peek().token_type) {
        parser.advance()?;
        let right = parse_factor(parser)?;
        if let Some(previous) = rest.take() {
            expr = Expr::Multiplicative {
                left: Box::new(expr),
                rest: Some(previous),
                negated: false,
            };
        }
        rest = Some((operator, Box::new(right)));
    }

    if rest.is_none() && !negated {
        return Ok(expr);
    }
    Ok(Expr::Multiplicative {
        left: Box::new(expr),
        rest,
        negated,
    })
}

/// factor := literal | identifier | call | '(' expression ')'
fn parse_factor<R: SourceReader>(parser: &mut Parser<R>) -> ParseResult<Expr> {
    let literal = match &parser.peek().token_type {
        TokenType::IntLiteral(n) => Some(Literal::Int(*n)),
        TokenType::FloatLiteral(n) => Some(Literal::Float(*n)),
        TokenType::StringLiteral(s) => Some(Literal::String(s.clone())),
        _ => None,
    };
    if let Some(literal) = literal {
        parser.advance()?;
        return Ok(Expr::Literal(literal));
    }

    if let Some(name) = parser.match_identifier()? {
        if parser.match_token(&[TokenType::LeftParen])?.is_some() {
            return Ok(Expr::Call(finish_call(parser, name)?));
        }
        return Ok(Expr::Variable(name));
    }

    if parser.match_token(&[TokenType::LeftParen])?.is_some() {
        let inner = parse_expression(parser)?;
        parser.consume(TokenType::RightParen, "')' after expression")?;
        return Ok(Expr::Parenthesized(Box::new(inner)));
    }

    Err(parser.error("expected expression"))
}

/// Argument list of a call whose name and opening parenthesis were consumed.
pub fn finish_call<R: SourceReader>(parser: &mut Parser<R>, name: String) -> ParseResult<FunctionCall> {
    let mut arguments = Vec::new();

    if parser.match_token(&[TokenType::RightParen])?.is_none() {
        loop {
            arguments.push(parse_expression(parser)?);
            if parser.match_token(&[TokenType::Comma])?.is_none() {
                break;
            }
        }
        parser.consume(TokenType::RightParen, "')' after arguments")?;
    }

    Ok(FunctionCall { name, arguments })
}
