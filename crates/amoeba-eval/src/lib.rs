//! Tree-walking evaluator for Amoeba programs (spec.md §4, components E–H).
//!
//! [`run`] drives a [`amoeba_par::Parser`] over already-lexed source and
//! folds the resulting AST through [`evaluator::eval_program`], returning
//! either the final value or the parser's diagnostics — the same surface a
//! REPL or batch driver consumes (spec.md §4.I).

mod builtins;
mod environment;
mod evaluator;
mod object;

pub use environment::Environment;
pub use evaluator::eval_program;
pub use object::{native_bool, Object, FALSE, NULL, TRUE};

use amoeba_par::Parser;
use std::cell::RefCell;
use std::rc::Rc;

/// Parses and evaluates `source` against `env`. Returns `Err` with the
/// parser's accumulated diagnostics if parsing failed; evaluation errors
/// are returned as `Ok(Object::Error(_))`, matching spec.md §7's
/// error-as-value model.
pub fn run(source: &str, env: &Rc<RefCell<Environment>>) -> Result<Object, Vec<String>> {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();
    let errors = parser.errors();
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(eval_program(&program, env))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(source: &str) -> Object {
        let env = Environment::new();
        run(source, &env).expect("program should parse")
    }

    #[test]
    fn arithmetic_honors_precedence() {
        assert!(matches!(eval("(5 + 5 * 2 - 10 / 2) * 2;"), Object::Integer(20)));
    }

    #[test]
    fn closures_capture_their_defining_environment() {
        let result = eval(
            "let newAdder = fn(x) { fn(y) { x + y }; };\n\
             let addTwo = newAdder(2);\n\
             addTwo(3);",
        );
        assert!(matches!(result, Object::Integer(5)));
    }

    #[test]
    fn string_concatenation() {
        match eval(r#"let greet = fn(name) { "Hello, " + name + "!" }; greet("Amoeba");"#) {
            Object::String(s) => assert_eq!(&*s, "Hello, Amoeba!"),
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn len_over_string_and_array() {
        assert!(matches!(eval(r#"len("four")"#), Object::Integer(4)));
        assert!(matches!(eval("len([1, 2, 3])"), Object::Integer(3)));
    }

    #[test]
    fn push_returns_a_new_array_leaving_the_original_untouched() {
        let result = eval(
            "let a = [1, 2];\n\
             let b = push(a, 3);\n\
             len(a) + len(b);",
        );
        assert!(matches!(result, Object::Integer(5)));
    }

    #[test]
    fn array_indexing_and_out_of_bounds() {
        assert!(matches!(eval("[1, 2, 3][1]"), Object::Integer(2)));
        assert!(matches!(eval("[1, 2, 3][10]"), Object::Null(_)));
    }

    #[test]
    fn truthiness_of_non_boolean_conditions() {
        assert!(matches!(eval("if (0) { 1 } else { 2 }"), Object::Integer(2)));
        assert!(matches!(eval("if (false) { 1 }"), Object::Null(_)));
        assert!(matches!(eval("if ([]) { 1 } else { 2 }"), Object::Integer(1)));
    }

    #[test]
    fn return_short_circuits_nested_blocks() {
        let result = eval(
            "if (10 > 1) {\n\
                 if (10 > 1) {\n\
                     return 10;\n\
                 }\n\
                 return 1;\n\
             }",
        );
        assert!(matches!(result, Object::Integer(10)));
    }

    #[test]
    fn errors_propagate_and_do_not_resume_statements() {
        match eval("4 + false; 5;") {
            Object::Error(msg) => assert_eq!(&*msg, "type mismatch: INTEGER + BOOLEAN"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn minus_on_a_boolean_is_an_unknown_operator_error() {
        match eval("-true;") {
            Object::Error(msg) => assert_eq!(&*msg, "unknown operator: -BOOLEAN"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn undefined_identifiers_surface_as_errors() {
        match eval("foobar;") {
            Object::Error(msg) => assert_eq!(&*msg, "identifier not found: foobar"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn calling_a_non_function_is_an_error() {
        match eval("let x = 5; x(1);") {
            Object::Error(msg) => assert_eq!(&*msg, "not a function: INTEGER"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn parser_diagnostics_surface_before_evaluation_runs() {
        let env = Environment::new();
        let errors = run("let = 5;", &env).expect_err("malformed let should not parse");
        assert!(!errors.is_empty());
    }

    #[test]
    fn let_binding_is_visible_to_later_statements() {
        assert!(matches!(eval("let a = 5; let b = a; b;"), Object::Integer(5)));
    }

    #[test]
    fn boolean_equality_is_by_identity_not_structure() {
        assert!(matches!(eval("true == true"), Object::Boolean(_)));
        assert!(matches!(eval("(1 < 2) == true"), Object::Boolean(b) if *b));
        assert!(matches!(eval("(1 < 2) == false"), Object::Boolean(b) if !*b));
    }
}
