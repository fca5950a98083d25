mod operators;

use crate::ast::{Condition, Declaration, Expr, FunctionBody, FunctionCall, FunctionDef, Program, Stmt};
use crate::error::Error;
use crate::parser::Parser;
use crate::runtime::{
    check_type, Context, ContextStack, RuntimeError, SemanticError, Value, Variable,
};
use crate::source::SourceReader;
use crate::stdlib;
use std::collections::HashSet;
use std::io::{self, Write};
use std::rc::Rc;

pub type EvalResult<T> = Result<T, Error>;

/// How a statement finished. `Return` unwinds every enclosing block up to the
/// call boundary.
#[derive(Debug, PartialEq)]
pub enum Flow {
    Normal,
    Return(Value),
}

pub struct Interpreter<R: SourceReader> {
    parser: Parser<R>,
    contexts: ContextStack,
    out: Box<dyn Write>,
}

impl<R: SourceReader> Interpreter<R> {
    pub fn new(parser: Parser<R>) -> Self {
        Self::with_output(parser, Box::new(io::stdout()))
    }

    /// Program output (`print` lines and the final summary) goes to `out`.
    pub fn with_output(parser: Parser<R>, out: Box<dyn Write>) -> Self {
        Interpreter {
            parser,
            contexts: ContextStack::new(Context::default()),
            out,
        }
    }

    /// Parses and executes the whole program. The value returned by `main`
    /// is handed back only when `return_result` is set.
    pub fn run(&mut self, return_result: bool) -> EvalResult<Option<Value>> {
        let program = self.parser.parse_program()?;

        if program.functions.is_empty() && program.globals.is_empty() {
            self.write_line("Parsed data are empty. No program to interpret.")?;
            return Ok(None);
        }

        let result = self.evaluate_program(&program)?;
        if let Some(value) = &result {
            self.write_line(&format!("Program finished with result: {}", value))?;
        }

        Ok(if return_result { result } else { None })
    }

    pub fn evaluate_program(&mut self, program: &Program) -> EvalResult<Option<Value>> {
        self.contexts = ContextStack::new(build_global_context(program)?);

        let main = self
            .contexts
            .function("main")
            .ok_or(SemanticError::MainNotFound)?;

        for declaration in &program.globals {
            self.define_variable(declaration)?;
        }

        // Only a typed `main` produces a program result.
        let result = self.invoke(&main, Vec::new())?;
        Ok(result.filter(|_| main.return_type.is_some()))
    }

    fn evaluate_call(&mut self, call: &FunctionCall) -> EvalResult<Option<Value>> {
        let function = self
            .contexts
            .function(&call.name)
            .ok_or_else(|| SemanticError::UndefinedFunction(call.name.clone()))?;

        // Arguments belong to the caller's frame.
        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate_expression(argument)?);
        }

        self.invoke(&function, arguments)
    }

    fn invoke(&mut self, function: &FunctionDef, arguments: Vec<Value>) -> EvalResult<Option<Value>> {
        if function.params.len() != arguments.len() {
            return Err(SemanticError::ArgumentMismatch {
                function: function.name.clone(),
                expected: function.params.len(),
                actual: arguments.len(),
            }
            .into());
        }
        for (param, argument) in function.params.iter().zip(&arguments) {
            check_type(param.param_type, argument)?;
        }

        let body = match &function.body {
            FunctionBody::Native(builtin) => {
                return Ok(stdlib::call_native(*builtin, &arguments, &mut *self.out)?);
            }
            FunctionBody::User(body) => body,
        };

        let mut frame = Context {
            return_type: function.return_type,
            ..Context::default()
        };
        for (param, value) in function.params.iter().zip(arguments) {
            if frame.variables.contains_key(&param.name) {
                return Err(SemanticError::VariableRedefinition(param.name.clone()).into());
            }
            let variable = Variable {
                var_type: param.param_type,
                value,
            };
            frame.variables.insert(param.name.clone(), variable);
        }

        self.contexts.push(frame);
        let result = self.execute_body(body, function);
        self.contexts.pop();

        result.map_err(|error| match error {
            Error::Semantic(source) => RuntimeError {
                function: function.name.clone(),
                source,
            }
            .into(),
            other => other,
        })
    }

    fn execute_body(&mut self, body: &Stmt, function: &FunctionDef) -> EvalResult<Option<Value>> {
        match self.execute(body)? {
            Flow::Return(value) => Ok(Some(value)),
            Flow::Normal if function.return_type.is_some() => {
                Err(SemanticError::MissingReturnValue.into())
            }
            Flow::Normal => Ok(None),
        }
    }

    /// Executes one statement, attaching its text to any semantic error.
    pub fn execute(&mut self, stmt: &Stmt) -> EvalResult<Flow> {
        self.execute_statement(stmt).map_err(|error| match error {
            Error::Semantic(source) => Error::Semantic(source.on_instruction(stmt.to_string())),
            other => other,
        })
    }

    fn execute_statement(&mut self, stmt: &Stmt) -> EvalResult<Flow> {
        match stmt {
            Stmt::Block(statements) => {
                for statement in statements {
                    if let Flow::Return(value) = self.execute(statement)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::Return(expr) => {
                let value = self.evaluate_expression(expr)?;
                if let Some(return_type) = self.contexts.local().return_type {
                    check_type(return_type, &value)?;
                }
                Ok(Flow::Return(value))
            }
            Stmt::Assign(name, expr) => {
                let value = self.evaluate_expression(expr)?;
                self.contexts.assign(name, value)?;
                Ok(Flow::Normal)
            }
            Stmt::Define(declaration) => {
                self.define_variable(declaration)?;
                Ok(Flow::Normal)
            }
            Stmt::If(condition, then_branch, else_branch) => {
                if self.evaluate_condition(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::While(condition, body) => {
                while self.evaluate_condition(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::Call(call) => {
                self.evaluate_call(call)?;
                Ok(Flow::Normal)
            }
        }
    }

    // Declarations land in the active frame; blocks do not open one.
    fn define_variable(&mut self, declaration: &Declaration) -> EvalResult<()> {
        let value = match &declaration.value {
            Some(expr) => self.evaluate_expression(expr)?,
            None => Value::default_for(declaration.var_type),
        };

        let variable = Variable {
            var_type: declaration.var_type,
            value,
        };
        self.contexts.define(declaration.name.clone(), variable)?;
        Ok(())
    }

    pub fn evaluate_expression(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),
            Expr::Variable(name) => match self.contexts.lookup(name) {
                Some(variable) => Ok(variable.value.clone()),
                None => Err(SemanticError::UndefinedVariable(name.clone()).into()),
            },
            Expr::Call(call) => match self.evaluate_call(call)? {
                Some(value) => Ok(value),
                None => Err(SemanticError::MissingReturnValue.into()),
            },
            Expr::Additive {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate_expression(left)?;
                let right = self.evaluate_expression(right)?;
                Ok(operators::additive(*operator, left, right)?)
            }
            Expr::Multiplicative {
                left,
                rest,
                negated,
            } => {
                let left = self.evaluate_expression(left)?;
                let value = match rest {
                    Some((operator, right)) => {
                        let right = self.evaluate_expression(right)?;
                        operators::multiplicative(*operator, left, right)?
                    }
                    None => left,
                };
                if *negated {
                    Ok(operators::negate(value)?)
                } else {
                    Ok(value)
                }
            }
            Expr::Parenthesized(inner) => self.evaluate_expression(inner),
        }
    }

    pub fn evaluate_condition(&mut self, condition: &Condition) -> EvalResult<Value> {
        match condition {
            Condition::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate_condition(left)?;
                let right = self.evaluate_condition(right)?;
                Ok(operators::compare(*operator, &left, &right)?)
            }
            Condition::Sub { operand, negated } => {
                let value = self.evaluate_condition(operand)?;
                if *negated {
                    Ok(Value::from_bool(!value.is_truthy()))
                } else {
                    Ok(value)
                }
            }
            Condition::Parenthesized(inner) => self.evaluate_condition(inner),
            Condition::Expression(expr) => self.evaluate_expression(expr),
        }
    }

    fn write_line(&mut self, line: &str) -> EvalResult<()> {
        writeln!(self.out, "{}", line).map_err(|e| SemanticError::Output(e.to_string()))?;
        Ok(())
    }
}

/// Function table (built-ins first, then every user definition). Global
/// names are checked for duplicates here; their values are added afterwards,
/// once `main` is known to exist.
fn build_global_context(program: &Program) -> Result<Context, SemanticError> {
    let mut names = HashSet::new();
    for declaration in &program.globals {
        if !names.insert(declaration.name.as_str()) {
            return Err(SemanticError::GlobalRedefinition(declaration.name.clone()));
        }
    }

    let mut global = Context {
        functions: stdlib::create_stdlib(),
        ..Context::default()
    };

    for function in &program.functions {
        if global.functions.contains_key(&function.name) {
            return Err(SemanticError::FunctionRedefinition(function.name.clone()));
        }
        global
            .functions
            .insert(function.name.clone(), Rc::new(function.clone()));
    }

    Ok(global)
}
