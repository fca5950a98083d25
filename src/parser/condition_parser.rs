use crate::ast::{Condition, ConditionOp};
use crate::parser::expr_parser::parse_expression;
use crate::parser::{ParseResult, Parser};
use crate::source::SourceReader;
use crate::token::TokenType;

fn condition_operator(token_type: &TokenType) -> Option<ConditionOp> {
    match token_type {
        TokenType::And => Some(ConditionOp::And),
        TokenType::Or => Some(ConditionOp::Or),
        TokenType::Less => Some(ConditionOp::Less),
        TokenType::LessEqual => Some(ConditionOp::LessEqual),
        TokenType::Greater => Some(ConditionOp::Greater),
        TokenType::GreaterEqual => Some(ConditionOp::GreaterEqual),
        TokenType::Equal => Some(ConditionOp::Equal),
        TokenType::NotEqual => Some(ConditionOp::NotEqual),
        _ => None,
    }
}

/// condition := subcondition (operator subcondition)?
///
/// Non-associative: `a < b < c` needs explicit parentheses.
pub fn parse_condition<R: SourceReader>(parser: &mut Parser<R>) -> ParseResult<Condition> {
    let left = parse_subcondition(parser)?;

    match condition_operator(&parser.peek().token_type) {
        Some(operator) => {
            parser.advance()?;
            let right = parse_subcondition(parser)?;
            Ok(Condition::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            })
        }
        None => Ok(left),
    }
}

/// subcondition := '!'? (expression | '(' condition ')')
fn parse_subcondition<R: SourceReader>(parser: &mut Parser<R>) -> ParseResult<Condition> {
    let negated = parser.match_token(&[TokenType::Negation])?.is_some();

    let operand = if parser.match_token(&[TokenType::LeftParen])?.is_some() {
        let inner = parse_condition(parser)?;
        parser.consume(TokenType::RightParen, "')' after condition")?;
        Condition::Parenthesized(Box::new(inner))
    } else {
        Condition::Expression(parse_expression(parser)?)
    };

    if negated {
        Ok(Condition::Sub {
            operand: Box::new(operand),
            negated,
        })
    } else {
        Ok(operand)
    }
}
