use super::{add_native_fn, Builtin};
use crate::ast::FunctionDef;
use crate::runtime::{format_float, SemanticError, SemanticResult, Value, VarType};
use num_integer::Integer;
use num_rational::Rational64;
use num_traits::ToPrimitive;
use std::collections::HashMap;
use std::rc::Rc;

pub fn register(functions: &mut HashMap<String, Rc<FunctionDef>>) {
    add_native_fn(
        functions,
        Builtin::Frc,
        vec![(VarType::Int, "numerator"), (VarType::Int, "denominator")],
        Some(VarType::Frc),
    );

    let conversions = [
        (Builtin::IntToFrc, VarType::Int, VarType::Frc),
        (Builtin::IntToFloat, VarType::Int, VarType::Float),
        (Builtin::FrcToFloat, VarType::Frc, VarType::Float),
        (Builtin::FloatToInt, VarType::Float, VarType::Int),
        (Builtin::FrcToInt, VarType::Frc, VarType::Int),
        (Builtin::FrcToString, VarType::Frc, VarType::String),
        (Builtin::FloatToString, VarType::Float, VarType::String),
        (Builtin::IntToString, VarType::Int, VarType::String),
    ];
    for (builtin, from, to) in conversions {
        add_native_fn(functions, builtin, vec![(from, "value")], Some(to));
    }
}

/// Builds a reduced fraction with a positive denominator.
pub fn frc(numerator: i64, denominator: i64) -> SemanticResult<Value> {
    if denominator == 0 {
        return Err(SemanticError::DivisionByZero);
    }

    // Widened so that negating i64::MIN cannot overflow mid-reduction.
    let (numerator, denominator) = (i128::from(numerator), i128::from(denominator));
    let divisor = Integer::gcd(&numerator, &denominator);
    let (mut numerator, mut denominator) = (numerator / divisor, denominator / divisor);
    if denominator < 0 {
        numerator = -numerator;
        denominator = -denominator;
    }

    match (i64::try_from(numerator), i64::try_from(denominator)) {
        (Ok(numerator), Ok(denominator)) => {
            Ok(Value::Fraction(Rational64::new_raw(numerator, denominator)))
        }
        _ => Err(SemanticError::Overflow),
    }
}

pub fn int_to_frc(value: i64) -> Value {
    Value::Fraction(Rational64::from_integer(value))
}

pub fn int_to_float(value: i64) -> Value {
    Value::Float(value as f64)
}

/// Correctly rounded, even when the terms exceed the f64 mantissa.
pub fn frc_to_float(value: &Rational64) -> Value {
    let converted = value
        .to_f64()
        .unwrap_or_else(|| *value.numer() as f64 / *value.denom() as f64);
    Value::Float(converted)
}

/// Rounds toward negative infinity.
pub fn float_to_int(value: f64) -> SemanticResult<Value> {
    value
        .floor()
        .to_i64()
        .map(Value::Int)
        .ok_or_else(|| SemanticError::InvalidCast {
            value: format_float(value),
            target: VarType::Int,
        })
}

/// Rounds toward negative infinity.
pub fn frc_to_int(value: &Rational64) -> Value {
    Value::Int(Integer::div_floor(value.numer(), value.denom()))
}

pub fn float_to_string(value: f64) -> Value {
    Value::String(format_float(value))
}
