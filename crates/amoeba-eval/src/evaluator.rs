//! Tree-walking evaluator (spec.md §4.G, component G). `eval` is pure over
//! the AST and an environment; the only mutation it performs is `let`
//! binding into that environment. It never panics — every failure mode is
//! an `Object::Error` value that short-circuits like `ReturnValue` but
//! without the unwrap step (spec.md §7).

use crate::environment::Environment;
use crate::object::{error, native_bool, FunctionObject, Object};
use crate::{builtins, object};
use amoeba_par::ast::{
    BlockStatement, Expression, ExpressionStatement, Program, Statement,
};
use std::cell::RefCell;
use std::rc::Rc;

type Env = Rc<RefCell<Environment>>;

pub fn eval_program(program: &Program, env: &Env) -> Object {
    let mut result = object::NULL.clone();
    for statement in &program.statements {
        result = eval_statement(statement, env);
        match &result {
            Object::ReturnValue(inner) => return (**inner).clone(),
            Object::Error(_) => return result,
            _ => {}
        }
    }
    result
}

/// Unlike [`eval_program`], a return value is **not** unwrapped here — it
/// propagates as-is so an enclosing block (or `eval_program`) can relay it
/// upward (spec.md §4.G).
fn eval_block(block: &BlockStatement, env: &Env) -> Object {
    let mut result = object::NULL.clone();
    for statement in &block.statements {
        result = eval_statement(statement, env);
        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(statement: &Statement, env: &Env) -> Object {
    match statement {
        Statement::Expression(ExpressionStatement { expression: Some(expr), .. }) => {
            eval_expression(expr, env)
        }
        Statement::Expression(ExpressionStatement { expression: None, .. }) => object::NULL.clone(),
        Statement::Let(stmt) => {
            let value = match &stmt.value {
                Some(expr) => eval_expression(expr, env),
                None => object::NULL.clone(),
            };
            if value.is_error() {
                return value;
            }
            env.borrow_mut().set(stmt.name.value.clone(), value.clone());
            value
        }
        Statement::Return(stmt) => {
            let value = match &stmt.value {
                Some(expr) => eval_expression(expr, env),
                None => object::NULL.clone(),
            };
            if value.is_error() {
                return value;
            }
            Object::ReturnValue(Box::new(value))
        }
        Statement::Block(block) => eval_block(block, env),
    }
}

fn eval_expression(expr: &Expression, env: &Env) -> Object {
    match expr {
        Expression::IntegerLiteral(lit) => Object::Integer(lit.value),
        Expression::StringLiteral(lit) => Object::String(Rc::from(lit.value.as_str())),
        Expression::BooleanLiteral(lit) => native_bool(lit.value),
        Expression::Identifier(ident) => eval_identifier(&ident.value, env),
        Expression::Prefix(expr) => {
            let right = eval_expression(&expr.right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix(&expr.operator, right)
        }
        Expression::Infix(expr) => {
            let left = eval_expression(&expr.left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(&expr.right, env);
            if right.is_error() {
                return right;
            }
            eval_infix(&expr.operator, left, right)
        }
        Expression::If(expr) => {
            let condition = eval_expression(&expr.condition, env);
            if condition.is_error() {
                return condition;
            }
            if condition.is_truthy() {
                eval_block(&expr.consequence, env)
            } else if let Some(alt) = &expr.alternative {
                eval_block(alt, env)
            } else {
                object::NULL.clone()
            }
        }
        Expression::Function(lit) => Object::Function(Rc::new(FunctionObject {
            parameters: lit.parameters.clone(),
            body: lit.body.clone(),
            env: env.clone(),
        })),
        Expression::Call(expr) => {
            let function = eval_expression(&expr.function, env);
            if function.is_error() {
                return function;
            }
            let args = match eval_expressions(&expr.arguments, env) {
                Ok(args) => args,
                Err(e) => return e,
            };
            apply_function(function, args)
        }
        Expression::Array(lit) => {
            let elements = match eval_expressions(&lit.elements, env) {
                Ok(elements) => elements,
                Err(e) => return e,
            };
            Object::Array(Rc::new(RefCell::new(elements)))
        }
        Expression::Index(expr) => {
            let left = eval_expression(&expr.left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(&expr.index, env);
            if index.is_error() {
                return index;
            }
            eval_index(left, index)
        }
    }
}

/// Evaluates left-to-right, stopping at the first error (spec.md §4.G).
fn eval_expressions(exprs: &[Expression], env: &Env) -> Result<Vec<Object>, Object> {
    let mut result = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expression(expr, env);
        if value.is_error() {
            return Err(value);
        }
        result.push(value);
    }
    Ok(result)
}

fn eval_identifier(name: &str, env: &Env) -> Object {
    if let Some(value) = env.borrow().get(name) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(name) {
        return builtin;
    }
    error(format!("identifier not found: {name}"))
}

fn eval_prefix(operator: &str, right: Object) -> Object {
    match operator {
        "!" => native_bool(!right.is_truthy()),
        "-" => match right {
            Object::Integer(v) => Object::Integer(-v),
            other => error(format!("unknown operator: -{}", other.type_tag())),
        },
        op => error(format!("unknown operator: {op}{}", right.type_tag())),
    }
}

fn eval_infix(operator: &str, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Object::String(l), Object::String(r)) => eval_string_infix(operator, l, r),
        (Object::Boolean(l), Object::Boolean(r)) => eval_boolean_infix(operator, Rc::ptr_eq(l, r)),
        _ if left.type_tag() != right.type_tag() => {
            error(format!("type mismatch: {} {operator} {}", left.type_tag(), right.type_tag()))
        }
        _ => error(format!("unknown operator: {} {operator} {}", left.type_tag(), right.type_tag())),
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left + right),
        "-" => Object::Integer(left - right),
        "*" => Object::Integer(left * right),
        "/" => Object::Integer(left / right),
        "<" => native_bool(left < right),
        ">" => native_bool(left > right),
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        op => error(format!("unknown operator: INTEGER {op} INTEGER")),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Object {
    match operator {
        "+" => Object::String(Rc::from(format!("{left}{right}"))),
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        op => error(format!("unknown operator: STRING {op} STRING")),
    }
}

fn eval_boolean_infix(operator: &str, ptr_eq: bool) -> Object {
    match operator {
        "==" => native_bool(ptr_eq),
        "!=" => native_bool(!ptr_eq),
        op => error(format!("unknown operator: BOOLEAN {op} BOOLEAN")),
    }
}

fn eval_index(left: Object, index: Object) -> Object {
    match (&left, &index) {
        (Object::Array(elems), Object::Integer(idx)) => {
            let elems = elems.borrow();
            if *idx < 0 || *idx as usize >= elems.len() {
                object::NULL.clone()
            } else {
                elems[*idx as usize].clone()
            }
        }
        _ => error(format!("index operator not supported: {}", left.type_tag())),
    }
}

fn apply_function(function: Object, args: Vec<Object>) -> Object {
    match function {
        Object::Function(func) => {
            let call_env = Environment::enclosed(func.env.clone());
            // Arity is intentionally unchecked (spec.md §9): extra
            // arguments are dropped, missing ones leave the parameter
            // unbound so a later reference surfaces "identifier not
            // found" rather than an arity error.
            for (param, arg) in func.parameters.iter().zip(args.into_iter()) {
                call_env.borrow_mut().set(param.value.clone(), arg);
            }
            let evaluated = eval_block(&func.body, &call_env);
            match evaluated {
                Object::ReturnValue(inner) => *inner,
                other => other,
            }
        }
        Object::Builtin(builtin) => (builtin.func)(&args),
        other => error(format!("not a function: {}", other.type_tag())),
    }
}
