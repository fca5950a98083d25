use super::{execute_code, execute_with_output, failing_function, semantic_root, SharedBuffer};
use crate::error::Error;
use crate::evaluator::Interpreter;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::runtime::{SemanticError, Value, VarType};
use crate::source::StringSource;
use num_rational::Rational64;

fn result_of(code: &str) -> Value {
    match execute_code(code) {
        Ok(Some(value)) => value,
        Ok(None) => panic!("program returned nothing"),
        Err(e) => panic!("program failed: {}", e),
    }
}

#[test]
fn test_fibonacci() {
    let code = r#"
        fn fib(int n) -> int {
            if (n <= 1) {
                return n;
            }
            return fib(n - 1) + fib(n - 2);
        }

        fn main() -> int {
            return fib(9);
        }
    "#;

    let (result, output) = execute_with_output(code);
    assert_eq!(result.unwrap(), Some(Value::Int(34)));
    assert_eq!(output, "Program finished with result: 34\n");
}

#[test]
fn test_main_not_found() {
    let (result, output) = execute_with_output(
        r#"
        int x = 1;
        fn helper() { print("never"); }
    "#,
    );
    let error = result.unwrap_err();
    assert!(matches!(error, Error::Semantic(SemanticError::MainNotFound)));
    assert_eq!(output, "");
}

#[test]
fn test_empty_program() {
    for code in ["", "   # only a comment\n"] {
        let (result, output) = execute_with_output(code);
        assert_eq!(result.unwrap(), None);
        assert_eq!(output, "Parsed data are empty. No program to interpret.\n");
    }
}

#[test]
fn test_variable_redefinition() {
    let error = execute_code("fn main() { int i = 0; float i = 1.0; }").unwrap_err();
    assert_eq!(failing_function(&error), "main");
    assert!(matches!(
        semantic_root(&error),
        SemanticError::VariableRedefinition(name) if name == "i"
    ));
}

#[test]
fn test_declaration_type_mismatch() {
    let error = execute_code("fn main() { int i = 0.0; }").unwrap_err();
    assert_eq!(failing_function(&error), "main");
    assert!(matches!(
        semantic_root(&error),
        SemanticError::TypeMismatch {
            expected: VarType::Int,
            actual: VarType::Float
        }
    ));
    assert!(error.to_string().contains("On instruction: int i = 0.0;"));
}

#[test]
fn test_return_type_mismatch() {
    let error = execute_code("fn main() -> int { return 0.0; }").unwrap_err();
    assert_eq!(failing_function(&error), "main");
    assert!(matches!(
        semantic_root(&error),
        SemanticError::TypeMismatch {
            expected: VarType::Int,
            actual: VarType::Float
        }
    ));
}

#[test]
fn test_assignment_keeps_declared_type() {
    let error = execute_code("fn main() { string s = \"a\"; s = 1; }").unwrap_err();
    assert!(matches!(
        semantic_root(&error),
        SemanticError::TypeMismatch {
            expected: VarType::String,
            actual: VarType::Int
        }
    ));
}

#[test]
fn test_undefined_function_names_caller() {
    let error = execute_code("fn main() { foo(); }").unwrap_err();
    assert!(matches!(error, Error::Runtime(_)));
    assert_eq!(failing_function(&error), "main");
    assert!(matches!(
        semantic_root(&error),
        SemanticError::UndefinedFunction(name) if name == "foo"
    ));
}

#[test]
fn test_error_names_innermost_function() {
    let code = r#"
        fn inner() { int x = 1.0; }
        fn outer() { inner(); }
        fn main() { outer(); }
    "#;
    let error = execute_code(code).unwrap_err();
    assert_eq!(failing_function(&error), "inner");
}

#[test]
fn test_callee_cannot_see_caller_locals() {
    let code = r#"
        fn peek() -> int { return x; }
        fn main() -> int { int x = 1; return peek(); }
    "#;
    let error = execute_code(code).unwrap_err();
    assert_eq!(failing_function(&error), "peek");
    assert!(matches!(
        semantic_root(&error),
        SemanticError::UndefinedVariable(name) if name == "x"
    ));
}

#[test]
fn test_block_variables_outlive_block() {
    let code = r#"
        fn main() -> int {
            if (1) {
                int inner = 5;
            }
            inner = inner + 1;
            while (inner < 8) {
                inner = inner + 1;
                if (inner == 8) {
                    int late = 100;
                }
            }
            return inner + late;
        }
    "#;
    assert_eq!(result_of(code), Value::Int(108));
}

#[test]
fn test_integer_floor_division() {
    for a in -10..=10 {
        for b in [-3, -2, -1, 1, 2, 3] {
            let code = format!(
                "fn main() -> int {{ int a = {}; int b = {}; return a / b; }}",
                a, b
            );
            let expected = (a as f64 / b as f64).floor() as i64;
            assert_eq!(result_of(&code), Value::Int(expected), "{} / {}", a, b);
        }
    }
}

#[test]
fn test_negation_after_division() {
    assert_eq!(result_of("fn main() -> int { return -7 / 2; }"), Value::Int(-3));
    assert_eq!(result_of("fn main() -> int { return (0 - 7) / 2; }"), Value::Int(-4));
    assert_eq!(result_of("fn main() -> int { return 10 - -2 * 3; }"), Value::Int(16));
}

#[test]
fn test_arithmetic_faults() {
    let cases = [
        ("fn main() -> int { return 1 / 0; }", "division"),
        ("fn main() -> float { return 1.0 / 0.0; }", "division"),
        ("fn main() -> int { return 9223372036854775807 + 1; }", "overflow"),
        ("fn main() -> int { return 1 + 1.0; }", "operands"),
        ("fn main() -> string { return \"a\" * \"b\"; }", "string"),
        ("fn main() -> string { return \"a\" - \"b\"; }", "string"),
        ("fn main() -> string { return -\"a\"; }", "string"),
    ];

    for (code, fault) in cases {
        let error = execute_code(code).unwrap_err();
        let root = semantic_root(&error);
        let matched = match fault {
            "division" => matches!(root, SemanticError::DivisionByZero),
            "overflow" => matches!(root, SemanticError::Overflow),
            "operands" => matches!(
                root,
                SemanticError::InvalidOperands {
                    left: VarType::Int,
                    right: VarType::Float
                }
            ),
            _ => matches!(root, SemanticError::StringOperand { .. }),
        };
        assert!(matched, "{} failed with {}", code, error);
    }
}

#[test]
fn test_string_concatenation() {
    assert_eq!(
        result_of("fn main() -> string { string a = \"ab\"; return a + \"cd\"; }"),
        Value::String("abcd".to_string())
    );
}

#[test]
fn test_fraction_arithmetic() {
    assert_eq!(
        result_of("fn main() -> frc { return frc(1, 3) + frc(1, 6); }"),
        Value::Fraction(Rational64::new(1, 2))
    );
    assert_eq!(
        result_of("fn main() -> frc { return -frc(1, 3) * frc(3, 4); }"),
        Value::Fraction(Rational64::new(-1, 4))
    );
    assert_eq!(
        result_of("fn main() -> frc { return frc(1, 2) / frc(1, 4) - int_to_frc(1); }"),
        Value::Fraction(Rational64::new(1, 1))
    );

    let error = execute_code("fn main() -> frc { return frc(1, 2) / frc(0, 1); }").unwrap_err();
    assert!(matches!(semantic_root(&error), SemanticError::DivisionByZero));
}

#[test]
fn test_default_values() {
    let code = r#"
        fn main() {
            int a;
            float b;
            frc c;
            string d;
            print(int_to_string(a));
            print(float_to_string(b));
            print(frc_to_string(c));
            print(d);
        }
    "#;
    let (result, output) = execute_with_output(code);
    assert_eq!(result.unwrap(), None);
    assert_eq!(output, "0\n0.0\n1\n\n");
}

#[test]
fn test_conditions() {
    let code = r#"
        fn check(int flag, string label) {
            if (flag) print(label + " yes"); else print(label + " no");
        }

        fn main() {
            if ((1 < 2) && (3 >= 3)) check(1, "and"); else check(0, "and");
            if (0 || !1) check(1, "or"); else check(0, "or");
            if ("abc" < "abd") check(1, "strings"); else check(0, "strings");
            if (frc(1, 2) == frc(2, 4)) check(1, "fractions"); else check(0, "fractions");
            if (!(2.5 != 2.5)) check(1, "floats"); else check(0, "floats");
            if ("") check(1, "empty"); else check(0, "empty");
        }
    "#;
    let (result, output) = execute_with_output(code);
    result.unwrap();
    assert_eq!(
        output,
        "and yes\nor no\nstrings yes\nfractions yes\nfloats yes\nempty no\n"
    );
}

#[test]
fn test_logical_operators_evaluate_both_sides() {
    let code = r#"
        fn touch() -> int {
            print("called");
            return 1;
        }

        fn main() {
            if (0 && touch()) print("yes"); else print("no");
        }
    "#;
    let (result, output) = execute_with_output(code);
    result.unwrap();
    assert_eq!(output, "called\nno\n");
}

#[test]
fn test_comparison_requires_same_type() {
    let error = execute_code("fn main() { if (1 < 1.0) {} }").unwrap_err();
    assert!(matches!(
        semantic_root(&error),
        SemanticError::InvalidOperands {
            left: VarType::Int,
            right: VarType::Float
        }
    ));
}

#[test]
fn test_while_loop() {
    let code = r#"
        fn main() -> int {
            int i = 1;
            int sum = 0;
            while (i <= 10) {
                sum = sum + i;
                i = i + 1;
            }
            return sum;
        }
    "#;
    assert_eq!(result_of(code), Value::Int(55));
}

#[test]
fn test_return_exits_loop_and_call() {
    let code = r#"
        fn first_over(int limit) -> int {
            int i = 0;
            while (1) {
                i = i + 1;
                if (i > limit) {
                    return i;
                }
            }
            return 0;
        }

        fn main() -> int {
            return first_over(4);
        }
    "#;
    assert_eq!(result_of(code), Value::Int(5));
}

#[test]
fn test_globals() {
    let code = r#"
        int counter = 10;

        fn bump() {
            counter = counter + 1;
        }

        fn main() -> int {
            bump();
            bump();
            return counter;
        }

        int offset = counter * 2;
    "#;
    assert_eq!(result_of(code), Value::Int(12));
}

#[test]
fn test_global_initializer_calls_function() {
    let code = r#"
        fn seed() -> int { return 7; }
        int start = seed();
        fn main() -> int { return start; }
    "#;
    assert_eq!(result_of(code), Value::Int(7));
}

#[test]
fn test_redefinitions_at_top_level() {
    let error = execute_code("int a = 1; int a = 2; fn main() {}").unwrap_err();
    assert!(matches!(
        error,
        Error::Semantic(SemanticError::GlobalRedefinition(ref name)) if name == "a"
    ));

    let error = execute_code("fn f() {} fn f() {} fn main() {}").unwrap_err();
    assert!(matches!(
        error,
        Error::Semantic(SemanticError::FunctionRedefinition(ref name)) if name == "f"
    ));

    let error = execute_code("fn print(string s) {} fn main() {}").unwrap_err();
    assert!(matches!(
        error,
        Error::Semantic(SemanticError::FunctionRedefinition(ref name)) if name == "print"
    ));
}

#[test]
fn test_duplicate_global_rejected_before_initializers_run() {
    let code = r#"
        fn side() -> int {
            print("side");
            return 1;
        }
        int a = side();
        int a = 2;
        fn main() {}
    "#;
    let (result, output) = execute_with_output(code);
    assert!(matches!(
        result.unwrap_err(),
        Error::Semantic(SemanticError::GlobalRedefinition(ref name)) if name == "a"
    ));
    assert_eq!(output, "");
}

#[test]
fn test_untyped_main_has_no_result() {
    let (result, output) = execute_with_output("fn main() { return 5; }");
    assert_eq!(result.unwrap(), None);
    assert_eq!(output, "");
}

#[test]
fn test_local_cannot_shadow_global() {
    let error = execute_code("int a = 1; fn main() { int a = 2; }").unwrap_err();
    assert!(matches!(
        semantic_root(&error),
        SemanticError::VariableRedefinition(name) if name == "a"
    ));
}

#[test]
fn test_argument_checks() {
    let error = execute_code("fn f(int a) {} fn main() { f(1, 2); }").unwrap_err();
    assert_eq!(failing_function(&error), "main");
    assert!(matches!(
        semantic_root(&error),
        SemanticError::ArgumentMismatch {
            expected: 1,
            actual: 2,
            ..
        }
    ));

    let error = execute_code("fn f(int a) {} fn main() { f(1.0); }").unwrap_err();
    assert!(matches!(
        semantic_root(&error),
        SemanticError::TypeMismatch {
            expected: VarType::Int,
            actual: VarType::Float
        }
    ));
}

#[test]
fn test_missing_return_value() {
    let error = execute_code("fn f() {} fn main() -> int { return f(); }").unwrap_err();
    assert_eq!(failing_function(&error), "main");
    assert!(matches!(semantic_root(&error), SemanticError::MissingReturnValue));

    let error = execute_code("fn main() -> int { int x = 1; }").unwrap_err();
    assert_eq!(failing_function(&error), "main");
    assert!(matches!(semantic_root(&error), SemanticError::MissingReturnValue));
}

#[test]
fn test_untyped_function_may_return() {
    let code = r#"
        fn anything() { return "text"; }
        fn main() -> string { return anything(); }
    "#;
    assert_eq!(result_of(code), Value::String("text".to_string()));
}

#[test]
fn test_recursion_keeps_frames_apart() {
    let code = r#"
        fn sum_to(int n) -> int {
            int here = n;
            if (n == 0) {
                return 0;
            }
            int rest = sum_to(n - 1);
            return here + rest;
        }

        fn main() -> int {
            return sum_to(20);
        }
    "#;
    assert_eq!(result_of(code), Value::Int(210));
}

#[test]
fn test_stage_of_failures() {
    let error = execute_code("fn main() { int x = 12a; }").unwrap_err();
    assert!(matches!(error, Error::Lexical(_)));
    assert_eq!(error.stage(), "Lexer error");

    let error = execute_code("fn main() { int x = ; }").unwrap_err();
    assert!(matches!(error, Error::Syntax(_)));
    assert_eq!(error.stage(), "Parser error");

    let error = execute_code("fn main() { x = 1; }").unwrap_err();
    assert_eq!(error.stage(), "Interpreter error");
}

#[test]
fn test_run_without_result() {
    let buffer = SharedBuffer::default();
    let parser = Parser::new(Lexer::new(StringSource::new("fn main() -> int { return 3; }"))).unwrap();
    let mut interpreter = Interpreter::with_output(parser, Box::new(buffer.clone()));

    assert_eq!(interpreter.run(false).unwrap(), None);
    assert_eq!(buffer.contents(), "Program finished with result: 3\n");
}

#[test]
fn test_context_stack() {
    use crate::runtime::{Context, ContextStack, Variable};

    let mut contexts = ContextStack::new(Context::default());
    let global = Variable {
        var_type: VarType::Int,
        value: Value::Int(1),
    };
    contexts.define("g".to_string(), global).unwrap();
    assert!(contexts.pop().is_none());

    contexts.push(Context::default());
    let local = Variable {
        var_type: VarType::String,
        value: Value::String("x".to_string()),
    };
    contexts.define("l".to_string(), local).unwrap();
    contexts.assign("g", Value::Int(2)).unwrap();
    assert!(contexts.assign("g", Value::Float(2.0)).is_err());
    assert!(contexts.assign("missing", Value::Int(0)).is_err());

    contexts.pop().unwrap();
    assert!(!contexts.is_defined("l"));
    assert_eq!(contexts.lookup("g").unwrap().value, Value::Int(2));
}
