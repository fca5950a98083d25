use crate::ast::{AdditiveOp, ConditionOp, MultiplicativeOp};
use crate::runtime::{check_operands_type, SemanticError, SemanticResult, Value};
use num_integer::Integer;
use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Zero};
use std::cmp::Ordering;

pub fn additive(operator: AdditiveOp, left: Value, right: Value) -> SemanticResult<Value> {
    check_operands_type(&left, &right)?;

    match (operator, left, right) {
        (AdditiveOp::Add, Value::Int(a), Value::Int(b)) => checked(a.checked_add(b).map(Value::Int)),
        (AdditiveOp::Subtract, Value::Int(a), Value::Int(b)) => {
            checked(a.checked_sub(b).map(Value::Int))
        }
        (AdditiveOp::Add, Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
        (AdditiveOp::Subtract, Value::Float(a), Value::Float(b)) => Ok(Value::Float(a - b)),
        (AdditiveOp::Add, Value::Fraction(a), Value::Fraction(b)) => {
            checked(a.checked_add(&b).map(Value::Fraction))
        }
        (AdditiveOp::Subtract, Value::Fraction(a), Value::Fraction(b)) => {
            checked(a.checked_sub(&b).map(Value::Fraction))
        }
        (AdditiveOp::Add, Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
        (operator, Value::String(value), _) => Err(SemanticError::StringOperand {
            operator: operator.to_string(),
            value,
        }),
        (operator, left, _) => Err(SemanticError::UnsupportedOperation {
            operator: operator.to_string(),
            operand_type: left.var_type(),
        }),
    }
}

/// `int / int` is floor division; the other numeric types divide exactly
/// (fractions) or natively (floats).
pub fn multiplicative(operator: MultiplicativeOp, left: Value, right: Value) -> SemanticResult<Value> {
    check_operands_type(&left, &right)?;

    match (operator, left, right) {
        (MultiplicativeOp::Multiply, Value::Int(a), Value::Int(b)) => {
            checked(a.checked_mul(b).map(Value::Int))
        }
        (MultiplicativeOp::Divide, Value::Int(a), Value::Int(b)) => {
            if b == 0 {
                return Err(SemanticError::DivisionByZero);
            }
            // i64::MIN / -1
            if a.checked_div(b).is_none() {
                return Err(SemanticError::Overflow);
            }
            Ok(Value::Int(Integer::div_floor(&a, &b)))
        }
        (MultiplicativeOp::Multiply, Value::Float(a), Value::Float(b)) => Ok(Value::Float(a * b)),
        (MultiplicativeOp::Divide, Value::Float(a), Value::Float(b)) => {
            if b == 0.0 {
                return Err(SemanticError::DivisionByZero);
            }
            Ok(Value::Float(a / b))
        }
        (MultiplicativeOp::Multiply, Value::Fraction(a), Value::Fraction(b)) => {
            checked(a.checked_mul(&b).map(Value::Fraction))
        }
        (MultiplicativeOp::Divide, Value::Fraction(a), Value::Fraction(b)) => {
            if b.is_zero() {
                return Err(SemanticError::DivisionByZero);
            }
            checked(a.checked_div(&b).map(Value::Fraction))
        }
        (operator, Value::String(value), _) => Err(SemanticError::StringOperand {
            operator: operator.to_string(),
            value,
        }),
        (operator, left, _) => Err(SemanticError::UnsupportedOperation {
            operator: operator.to_string(),
            operand_type: left.var_type(),
        }),
    }
}

pub fn negate(value: Value) -> SemanticResult<Value> {
    match value {
        Value::Int(n) => checked(n.checked_neg().map(Value::Int)),
        Value::Float(n) => Ok(Value::Float(-n)),
        Value::Fraction(n) => checked(
            n.numer()
                .checked_neg()
                .map(|numer| Value::Fraction(Rational64::new_raw(numer, *n.denom()))),
        ),
        Value::String(value) => Err(SemanticError::StringOperand {
            operator: String::from("-"),
            value,
        }),
    }
}

/// Logical operators combine truthiness of both (already evaluated) operands.
/// Relational operators need operands of one type. Results are `1` or `0`.
pub fn compare(operator: ConditionOp, left: &Value, right: &Value) -> SemanticResult<Value> {
    let result = match operator {
        ConditionOp::And => left.is_truthy() && right.is_truthy(),
        ConditionOp::Or => left.is_truthy() || right.is_truthy(),
        _ => {
            let ordering = order(left, right)?;
            match operator {
                ConditionOp::Less => ordering == Some(Ordering::Less),
                ConditionOp::LessEqual => {
                    matches!(ordering, Some(Ordering::Less | Ordering::Equal))
                }
                ConditionOp::Greater => ordering == Some(Ordering::Greater),
                ConditionOp::GreaterEqual => {
                    matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
                }
                ConditionOp::Equal => ordering == Some(Ordering::Equal),
                ConditionOp::NotEqual => ordering != Some(Ordering::Equal),
                ConditionOp::And | ConditionOp::Or => false,
            }
        }
    };

    Ok(Value::from_bool(result))
}

// `None` only for comparisons involving NaN.
fn order(left: &Value, right: &Value) -> SemanticResult<Option<Ordering>> {
    check_operands_type(left, right)?;

    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(Some(a.cmp(b))),
        (Value::Float(a), Value::Float(b)) => Ok(a.partial_cmp(b)),
        (Value::Fraction(a), Value::Fraction(b)) => Ok(Some(a.cmp(b))),
        (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
        _ => Err(SemanticError::InvalidOperands {
            left: left.var_type(),
            right: right.var_type(),
        }),
    }
}

fn checked(result: Option<Value>) -> SemanticResult<Value> {
    result.ok_or(SemanticError::Overflow)
}
