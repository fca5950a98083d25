mod interpreter;

use crate::error::Error;
use crate::evaluator::Interpreter;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::runtime::{SemanticError, Value};
use crate::source::StringSource;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

// Output sink the tests can read back after the interpreter is done with it.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// Runs a program and returns its result together with everything it printed.
fn execute_with_output(code: &str) -> (Result<Option<Value>, Error>, String) {
    let buffer = SharedBuffer::default();
    let result = Parser::new(Lexer::new(StringSource::new(code)))
        .map_err(Error::from)
        .and_then(|parser| Interpreter::with_output(parser, Box::new(buffer.clone())).run(true));
    (result, buffer.contents())
}

fn execute_code(code: &str) -> Result<Option<Value>, Error> {
    execute_with_output(code).0
}

// Underlying semantic fault, with call and instruction context stripped.
fn semantic_root(error: &Error) -> &SemanticError {
    match error {
        Error::Runtime(e) => e.source.root(),
        Error::Semantic(e) => e.root(),
        other => panic!("expected a semantic failure, got: {}", other),
    }
}

// Name of the function a runtime error was raised in.
fn failing_function(error: &Error) -> &str {
    match error {
        Error::Runtime(e) => &e.function,
        other => panic!("expected a runtime error, got: {}", other),
    }
}
