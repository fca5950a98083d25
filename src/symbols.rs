use crate::token::TokenType;
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    pub static ref KEYWORDS: HashMap<&'static str, TokenType> = {
        let mut m = HashMap::new();
        m.insert("fn", TokenType::Function);
        m.insert("if", TokenType::If);
        m.insert("else", TokenType::Else);
        m.insert("while", TokenType::While);
        m.insert("return", TokenType::Return);
        m.insert("int", TokenType::Integer);
        m.insert("float", TokenType::Float);
        m.insert("frc", TokenType::Fraction);
        m.insert("string", TokenType::String);
        m
    };

    pub static ref SINGLE_CHAR_SYMBOLS: HashMap<char, TokenType> = {
        let mut m = HashMap::new();
        m.insert('.', TokenType::Dot);
        m.insert(',', TokenType::Comma);
        m.insert('!', TokenType::Negation);
        m.insert('=', TokenType::Assignment);
        m.insert('<', TokenType::Less);
        m.insert('>', TokenType::Greater);
        m.insert('+', TokenType::Plus);
        m.insert('-', TokenType::Minus);
        m.insert('*', TokenType::Multiply);
        m.insert('/', TokenType::Divide);
        m.insert(';', TokenType::Semicolon);
        m.insert('(', TokenType::LeftParen);
        m.insert(')', TokenType::RightParen);
        m.insert('{', TokenType::LeftBrace);
        m.insert('}', TokenType::RightBrace);
        m
    };

    pub static ref DOUBLE_CHAR_SYMBOLS: HashMap<&'static str, TokenType> = {
        let mut m = HashMap::new();
        m.insert("<=", TokenType::LessEqual);
        m.insert(">=", TokenType::GreaterEqual);
        m.insert("==", TokenType::Equal);
        m.insert("!=", TokenType::NotEqual);
        m.insert("->", TokenType::Arrow);
        m.insert("&&", TokenType::And);
        m.insert("||", TokenType::Or);
        m
    };
}
