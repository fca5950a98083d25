mod ast;
mod error;
mod evaluator;
mod lexer;
mod parser;
mod repl;
mod runtime;
mod source;
mod stdlib;
mod symbols;
mod token;

use clap::Parser as _;
use colored::Colorize;
use error::Error;
use evaluator::Interpreter;
use lexer::Lexer;
use parser::Parser;
use runtime::Value;
use source::{SourceReader, StringSource};
use std::path::PathBuf;
use std::process;

/// Interpreter for the bifil language.
#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Program source given inline
    #[arg(short = 't', long = "text", conflicts_with = "file")]
    text: Option<String>,

    /// Path of the program source file
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let result = match (args.text, args.file) {
        (Some(text), _) => run_source(StringSource::new(&text)),
        (None, Some(path)) => match StringSource::from_file(&path) {
            Ok(source) => run_source(source),
            Err(e) => {
                eprintln!("{} cannot read '{}': {}", "Error:".red().bold(), path.display(), e);
                process::exit(1);
            }
        },
        (None, None) => {
            repl::run_repl();
            return;
        }
    };

    if let Err(error) = result {
        report(&error);
        process::exit(1);
    }
}

/// Lexes, parses and executes one program, printing its output to stdout.
pub fn run_source<R: SourceReader>(source: R) -> Result<Option<Value>, Error> {
    let parser = Parser::new(Lexer::new(source))?;
    Interpreter::new(parser).run(true)
}

pub fn report(error: &Error) {
    eprintln!("{}", format!("{}:", error.stage()).red().bold());
    eprintln!("{}", error);
}

#[cfg(test)]
mod tests;
