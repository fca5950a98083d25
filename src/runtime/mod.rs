pub mod context;

use num_rational::Rational64;
use num_traits::Zero;
use std::fmt;

pub use context::{Context, ContextStack, Variable};

// Runtime value. There is no implicit conversion between the variants; the
// cast built-ins are the only way to move a value from one type to another.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Fraction(Rational64),
    String(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VarType {
    Int,
    Float,
    Frc,
    String,
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            VarType::Int => "int",
            VarType::Float => "float",
            VarType::Frc => "frc",
            VarType::String => "string",
        };
        write!(f, "{}", name)
    }
}

impl Value {
    pub fn var_type(&self) -> VarType {
        match self {
            Value::Int(_) => VarType::Int,
            Value::Float(_) => VarType::Float,
            Value::Fraction(_) => VarType::Frc,
            Value::String(_) => VarType::String,
        }
    }

    /// Value of a declaration without initializer.
    pub fn default_for(var_type: VarType) -> Value {
        match var_type {
            VarType::Int => Value::Int(0),
            VarType::Float => Value::Float(0.0),
            VarType::Frc => Value::Fraction(Rational64::from_integer(1)),
            VarType::String => Value::String(String::new()),
        }
    }

    // Conditions yield C-style truth values.
    pub fn from_bool(value: bool) -> Value {
        Value::Int(i64::from(value))
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Fraction(n) => !n.is_zero(),
            Value::String(s) => !s.is_empty(),
        }
    }
}

impl From<&crate::ast::Literal> for Value {
    fn from(literal: &crate::ast::Literal) -> Self {
        match literal {
            crate::ast::Literal::Int(n) => Value::Int(*n),
            crate::ast::Literal::Float(n) => Value::Float(*n),
            crate::ast::Literal::String(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", format_float(*n)),
            // Ratio prints a bare numerator when the denominator is one.
            Value::Fraction(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

/// Shortest round-trip representation that always keeps a fractional part,
/// e.g. `1.0` and `0.3333333333333333`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        String::from("nan")
    } else if value.is_infinite() {
        if value > 0.0 {
            String::from("inf")
        } else {
            String::from("-inf")
        }
    } else {
        format!("{:?}", value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SemanticError {
    #[error("Undefined variable: {0}.")]
    UndefinedVariable(String),

    #[error("Function {0} is undefined.")]
    UndefinedFunction(String),

    #[error("Variable redefinition: {0}.")]
    VariableRedefinition(String),

    #[error("Multiple definitions of the variable {0}.")]
    GlobalRedefinition(String),

    #[error("Multiple definitions of the function {0}.")]
    FunctionRedefinition(String),

    #[error("Function {function} expected {expected} arguments, {actual} was provided.")]
    ArgumentMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Type mismatch. Expected type: {expected}, provided type: {actual}")]
    TypeMismatch { expected: VarType, actual: VarType },

    #[error("Invalid operands types. Got: {left} and {right}")]
    InvalidOperands { left: VarType, right: VarType },

    #[error("Unsupported operand type {operand_type} for operator: {operator}")]
    UnsupportedOperation {
        operator: String,
        operand_type: VarType,
    },

    #[error("Invalid operation: {operator}, on string value: {value}")]
    StringOperand { operator: String, value: String },

    #[error("Division by zero.")]
    DivisionByZero,

    #[error("Arithmetic overflow.")]
    Overflow,

    #[error("Cannot convert {value} to {target}.")]
    InvalidCast { value: String, target: VarType },

    #[error("Invalid arguments for built-in function {0}.")]
    InvalidBuiltinCall(String),

    #[error("Expected return value.")]
    MissingReturnValue,

    #[error("Not found 'main' function.")]
    MainNotFound,

    #[error("Cannot write program output: {0}")]
    Output(String),

    #[error("On instruction: {instruction}\nWhat: {source}")]
    OnInstruction {
        instruction: String,
        source: Box<SemanticError>,
    },
}

impl SemanticError {
    /// Attaches the text of the statement being executed. Only the innermost
    /// statement is recorded.
    pub fn on_instruction(self, instruction: String) -> SemanticError {
        match self {
            SemanticError::OnInstruction { .. } => self,
            other => SemanticError::OnInstruction {
                instruction,
                source: Box::new(other),
            },
        }
    }

    /// The underlying fault, without instruction context.
    #[cfg(test)]
    pub fn root(&self) -> &SemanticError {
        match self {
            SemanticError::OnInstruction { source, .. } => source.root(),
            other => other,
        }
    }
}

/// A semantic fault surfaced across a function-call boundary.
#[derive(Debug, thiserror::Error)]
#[error("Interpreter error in function: {function}.\nWhat: {source}")]
pub struct RuntimeError {
    pub function: String,
    pub source: SemanticError,
}

pub type SemanticResult<T> = Result<T, SemanticError>;

pub fn check_type(expected: VarType, value: &Value) -> SemanticResult<()> {
    let actual = value.var_type();
    if actual == expected {
        Ok(())
    } else {
        Err(SemanticError::TypeMismatch { expected, actual })
    }
}

pub fn check_operands_type(left: &Value, right: &Value) -> SemanticResult<()> {
    if left.var_type() == right.var_type() {
        Ok(())
    } else {
        Err(SemanticError::InvalidOperands {
            left: left.var_type(),
            right: right.var_type(),
        })
    }
}
