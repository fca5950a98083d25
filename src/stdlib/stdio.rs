use super::{add_native_fn, Builtin};
use crate::ast::FunctionDef;
use crate::runtime::{SemanticError, SemanticResult, VarType};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

pub fn register(functions: &mut HashMap<String, Rc<FunctionDef>>) {
    add_native_fn(functions, Builtin::Print, vec![(VarType::String, "text")], None);
}

// One line per call.
pub fn print(out: &mut dyn Write, text: &str) -> SemanticResult<()> {
    writeln!(out, "{}", text).map_err(|e| SemanticError::Output(e.to_string()))
}
