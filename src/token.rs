use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    // Keywords
    Function,
    If,
    Else,
    While,
    Return,

    // Type names
    Integer,
    Float,
    Fraction,
    String,

    // Identifiers and literals
    Identifier(String),
    IntLiteral(i64),
    FloatLiteral(f64),
    StringLiteral(String),

    // Operators
    Plus,
    Minus,
    Multiply,
    Divide,
    Assignment,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    And,
    Or,
    Negation,

    // Punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Semicolon,
    Arrow,

    EOF,
}

impl TokenType {
    pub fn is_type_name(&self) -> bool {
        matches!(
            self,
            TokenType::Integer | TokenType::Float | TokenType::Fraction | TokenType::String
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenType::Function => write!(f, "Function"),
            TokenType::If => write!(f, "If"),
            TokenType::Else => write!(f, "Else"),
            TokenType::While => write!(f, "While"),
            TokenType::Return => write!(f, "Return"),
            TokenType::Integer => write!(f, "Integer"),
            TokenType::Float => write!(f, "Float"),
            TokenType::Fraction => write!(f, "Fraction"),
            TokenType::String => write!(f, "String"),
            TokenType::Identifier(s) => write!(f, "Identifier({})", s),
            TokenType::IntLiteral(n) => write!(f, "IntLiteral({})", n),
            TokenType::FloatLiteral(n) => write!(f, "FloatLiteral({:?})", n),
            TokenType::StringLiteral(s) => write!(f, "StringLiteral(\"{}\")", s),
            TokenType::Plus => write!(f, "Plus"),
            TokenType::Minus => write!(f, "Minus"),
            TokenType::Multiply => write!(f, "Multiply"),
            TokenType::Divide => write!(f, "Divide"),
            TokenType::Assignment => write!(f, "Assignment"),
            TokenType::Equal => write!(f, "Equal"),
            TokenType::NotEqual => write!(f, "NotEqual"),
            TokenType::Less => write!(f, "Less"),
            TokenType::Greater => write!(f, "Greater"),
            TokenType::LessEqual => write!(f, "LessEqual"),
            TokenType::GreaterEqual => write!(f, "GreaterEqual"),
            TokenType::And => write!(f, "And"),
            TokenType::Or => write!(f, "Or"),
            TokenType::Negation => write!(f, "Negation"),
            TokenType::LeftParen => write!(f, "LeftParen"),
            TokenType::RightParen => write!(f, "RightParen"),
            TokenType::LeftBrace => write!(f, "LeftBrace"),
            TokenType::RightBrace => write!(f, "RightBrace"),
            TokenType::Comma => write!(f, "Comma"),
            TokenType::Dot => write!(f, "Dot"),
            TokenType::Semicolon => write!(f, "Semicolon"),
            TokenType::Arrow => write!(f, "Arrow"),
            TokenType::EOF => write!(f, "EOF"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} '{}' at {}:{}",
            self.token_type, self.lexeme, self.line, self.column
        )
    }
}
