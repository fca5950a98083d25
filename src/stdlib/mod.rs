use crate::ast::{FunctionBody, FunctionDef, Parameter};
use crate::runtime::{SemanticError, SemanticResult, Value, VarType};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

mod cast;
mod stdio;

/// Functions implemented natively. They share the function table with user
/// functions and are told apart by [`FunctionBody::Native`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Print,
    Frc,
    IntToFrc,
    IntToFloat,
    FrcToFloat,
    FloatToInt,
    FrcToInt,
    FrcToString,
    FloatToString,
    IntToString,
}

impl Builtin {
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::Frc => "frc",
            Builtin::IntToFrc => "int_to_frc",
            Builtin::IntToFloat => "int_to_float",
            Builtin::FrcToFloat => "frc_to_float",
            Builtin::FloatToInt => "float_to_int",
            Builtin::FrcToInt => "frc_to_int",
            Builtin::FrcToString => "frc_to_string",
            Builtin::FloatToString => "float_to_string",
            Builtin::IntToString => "int_to_string",
        }
    }
}

pub fn create_stdlib() -> HashMap<String, Rc<FunctionDef>> {
    let mut functions = HashMap::new();

    stdio::register(&mut functions);
    cast::register(&mut functions);

    functions
}

// Registers a signature-only definition for a native function.
fn add_native_fn(
    functions: &mut HashMap<String, Rc<FunctionDef>>,
    builtin: Builtin,
    params: Vec<(VarType, &str)>,
    return_type: Option<VarType>,
) {
    let definition = FunctionDef {
        name: builtin.name().to_string(),
        params: params
            .into_iter()
            .map(|(param_type, name)| Parameter {
                param_type,
                name: name.to_string(),
            })
            .collect(),
        body: FunctionBody::Native(builtin),
        return_type,
    };

    functions.insert(builtin.name().to_string(), Rc::new(definition));
}

/// Runs a built-in over already bound and type-checked arguments.
pub fn call_native(
    builtin: Builtin,
    args: &[Value],
    out: &mut dyn Write,
) -> SemanticResult<Option<Value>> {
    let value = match (builtin, args) {
        (Builtin::Print, [Value::String(text)]) => {
            stdio::print(out, text)?;
            return Ok(None);
        }
        (Builtin::Frc, [Value::Int(numerator), Value::Int(denominator)]) => {
            cast::frc(*numerator, *denominator)?
        }
        (Builtin::IntToFrc, [Value::Int(n)]) => cast::int_to_frc(*n),
        (Builtin::IntToFloat, [Value::Int(n)]) => cast::int_to_float(*n),
        (Builtin::FrcToFloat, [Value::Fraction(n)]) => cast::frc_to_float(n),
        (Builtin::FloatToInt, [Value::Float(n)]) => cast::float_to_int(*n)?,
        (Builtin::FrcToInt, [Value::Fraction(n)]) => cast::frc_to_int(n),
        (Builtin::FrcToString, [Value::Fraction(n)]) => Value::String(n.to_string()),
        (Builtin::FloatToString, [Value::Float(n)]) => cast::float_to_string(*n),
        (Builtin::IntToString, [Value::Int(n)]) => Value::String(n.to_string()),
        _ => return Err(SemanticError::InvalidBuiltinCall(builtin.name().to_string())),
    };

    Ok(Some(value))
}
