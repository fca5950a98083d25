use crate::runtime::{format_float, VarType};
use crate::stdlib::Builtin;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdditiveOp {
    Add,
    Subtract,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MultiplicativeOp {
    Multiply,
    Divide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConditionOp {
    And,
    Or,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Variable(String),
    Call(FunctionCall),
    // `left (+|-) right`
    Additive {
        left: Box<Expr>,
        operator: AdditiveOp,
        right: Box<Expr>,
    },
    // `left (*|/) right`; `rest` is absent for a bare negated factor.
    // `negated` applies once to the value of the whole node.
    Multiplicative {
        left: Box<Expr>,
        rest: Option<(MultiplicativeOp, Box<Expr>)>,
        negated: bool,
    },
    Parenthesized(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    // At most one operator per level.
    Binary {
        left: Box<Condition>,
        operator: ConditionOp,
        right: Box<Condition>,
    },
    Sub {
        operand: Box<Condition>,
        negated: bool,
    },
    Parenthesized(Box<Condition>),
    Expression(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub var_type: VarType,
    pub name: String,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(Vec<Stmt>),
    Return(Expr),
    Assign(String, Expr),
    Define(Declaration),
    If(Condition, Box<Stmt>, Option<Box<Stmt>>),
    While(Condition, Box<Stmt>),
    Call(FunctionCall),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub param_type: VarType,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    Native(Builtin),
    User(Stmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Parameter>,
    pub body: FunctionBody,
    pub return_type: Option<VarType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub functions: Vec<FunctionDef>,
    pub globals: Vec<Declaration>,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(n) => write!(f, "{}", format_float(*n)),
            Literal::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl fmt::Display for AdditiveOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AdditiveOp::Add => write!(f, "+"),
            AdditiveOp::Subtract => write!(f, "-"),
        }
    }
}

impl fmt::Display for MultiplicativeOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MultiplicativeOp::Multiply => write!(f, "*"),
            MultiplicativeOp::Divide => write!(f, "/"),
        }
    }
}

impl fmt::Display for ConditionOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            ConditionOp::And => "&&",
            ConditionOp::Or => "||",
            ConditionOp::Less => "<",
            ConditionOp::LessEqual => "<=",
            ConditionOp::Greater => ">",
            ConditionOp::GreaterEqual => ">=",
            ConditionOp::Equal => "==",
            ConditionOp::NotEqual => "!=",
        };
        write!(f, "{}", symbol)
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let arguments: Vec<String> = self.arguments.iter().map(|a| a.to_string()).collect();
        write!(f, "{}({})", self.name, arguments.join(", "))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => write!(f, "{}", literal),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Call(call) => write!(f, "{}", call),
            Expr::Additive {
                left,
                operator,
                right,
            } => write!(f, "{} {} {}", left, operator, right),
            Expr::Multiplicative {
                left,
                rest,
                negated,
            } => {
                let sign = if *negated { "-" } else { "" };
                match rest {
                    Some((operator, right)) => write!(f, "{}{} {} {}", sign, left, operator, right),
                    None => write!(f, "{}{}", sign, left),
                }
            }
            Expr::Parenthesized(inner) => write!(f, "({})", inner),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Condition::Binary {
                left,
                operator,
                right,
            } => write!(f, "{} {} {}", left, operator, right),
            Condition::Sub { operand, negated } => {
                if *negated {
                    write!(f, "!{}", operand)
                } else {
                    write!(f, "{}", operand)
                }
            }
            Condition::Parenthesized(inner) => write!(f, "({})", inner),
            Condition::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} {} = {};", self.var_type, self.name, value),
            None => write!(f, "{} {};", self.var_type, self.name),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stmt::Block(statements) => {
                write!(f, "{{")?;
                for statement in statements {
                    write!(f, " {}", statement)?;
                }
                write!(f, " }}")
            }
            Stmt::Return(expr) => write!(f, "return {};", expr),
            Stmt::Assign(name, expr) => write!(f, "{} = {};", name, expr),
            Stmt::Define(declaration) => write!(f, "{}", declaration),
            Stmt::If(condition, then_branch, else_branch) => {
                write!(f, "if ({}) {}", condition, then_branch)?;
                if let Some(else_branch) = else_branch {
                    write!(f, " else {}", else_branch)?;
                }
                Ok(())
            }
            Stmt::While(condition, body) => write!(f, "while ({}) {}", condition, body),
            Stmt::Call(call) => write!(f, "{};", call),
        }
    }
}

impl fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.param_type, p.name))
            .collect();
        write!(f, "fn {}({})", self.name, params.join(", "))?;
        if let Some(return_type) = self.return_type {
            write!(f, " -> {}", return_type)?;
        }
        match &self.body {
            FunctionBody::Native(_) => write!(f, " <native>"),
            FunctionBody::User(body) => write!(f, " {}", body),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for global in &self.globals {
            writeln!(f, "{}", global)?;
        }
        for function in &self.functions {
            writeln!(f, "{}", function)?;
        }
        Ok(())
    }
}
