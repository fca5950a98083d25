use super::{check_type, SemanticError, SemanticResult, Value, VarType};
use crate::ast::FunctionDef;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone, Debug)]
pub struct Variable {
    pub var_type: VarType,
    pub value: Value,
}

/// One call frame. Only the global frame holds functions.
#[derive(Debug, Default)]
pub struct Context {
    pub variables: HashMap<String, Variable>,
    pub functions: HashMap<String, Rc<FunctionDef>>,
    // Declared return type of the function executing in this frame.
    pub return_type: Option<VarType>,
}

/// Call-frame stack: index 0 is the global frame, the last entry is the
/// active call. Blocks never push a frame, so name resolution only ever
/// looks at the active frame and then the global one.
#[derive(Debug)]
pub struct ContextStack {
    frames: Vec<Context>,
}

impl ContextStack {
    pub fn new(global: Context) -> Self {
        ContextStack {
            frames: vec![global],
        }
    }

    pub fn push(&mut self, context: Context) {
        self.frames.push(context);
    }

    /// Pops the active call frame. The global frame is never popped.
    pub fn pop(&mut self) -> Option<Context> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    pub fn global(&self) -> &Context {
        &self.frames[0]
    }

    pub fn local(&self) -> &Context {
        &self.frames[self.frames.len() - 1]
    }

    fn local_mut(&mut self) -> &mut Context {
        let top = self.frames.len() - 1;
        &mut self.frames[top]
    }

    pub fn function(&self, name: &str) -> Option<Rc<FunctionDef>> {
        self.global().functions.get(name).cloned()
    }

    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.local()
            .variables
            .get(name)
            .or_else(|| self.global().variables.get(name))
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn define(&mut self, name: String, variable: Variable) -> SemanticResult<()> {
        if self.is_defined(&name) {
            return Err(SemanticError::VariableRedefinition(name));
        }
        check_type(variable.var_type, &variable.value)?;
        self.local_mut().variables.insert(name, variable);
        Ok(())
    }

    /// Rebinds an existing variable, active frame first. The declared type of
    /// the variable never changes.
    pub fn assign(&mut self, name: &str, value: Value) -> SemanticResult<()> {
        let top = self.frames.len() - 1;
        let frame = if self.frames[top].variables.contains_key(name) {
            top
        } else {
            0
        };

        match self.frames[frame].variables.get_mut(name) {
            Some(variable) => {
                check_type(variable.var_type, &value)?;
                variable.value = value;
                Ok(())
            }
            None => Err(SemanticError::UndefinedVariable(name.to_string())),
        }
    }
}
