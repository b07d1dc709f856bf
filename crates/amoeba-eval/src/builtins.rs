//! Fixed table of host-implemented procedures (spec.md §4.H, component H).
//! Consulted only when an identifier lookup misses in the environment
//! chain — no binding can be mutated, and a `let` can shadow any of them.

use crate::object::{error, BuiltinObject, Object};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;

fn wrong_arity(name: &str, got: usize, want: usize) -> Object {
    error(format!("wrong number of arguments passed to `{name}`: got {got}, want {want}"))
}

fn unsupported_arg(name: &str, ty: &str) -> Object {
    error(format!("argument to `{name}` not supported: {ty}"))
}

fn len(args: &[Object]) -> Object {
    if args.len() != 1 {
        return wrong_arity("len", args.len(), 1);
    }
    match &args[0] {
        Object::String(s) => Object::Integer(s.len() as i64),
        Object::Array(elems) => Object::Integer(elems.borrow().len() as i64),
        other => unsupported_arg("len", other.type_tag()),
    }
}

fn first(args: &[Object]) -> Object {
    if args.len() != 1 {
        return wrong_arity("first", args.len(), 1);
    }
    match &args[0] {
        Object::Array(elems) => elems.borrow().first().cloned().unwrap_or_else(|| crate::object::NULL.clone()),
        other => error(format!("argument to `first` must be ARRAY, got {}", other.type_tag())),
    }
}

fn last(args: &[Object]) -> Object {
    if args.len() != 1 {
        return wrong_arity("last", args.len(), 1);
    }
    match &args[0] {
        Object::Array(elems) => elems.borrow().last().cloned().unwrap_or_else(|| crate::object::NULL.clone()),
        other => error(format!("argument to `last` must be ARRAY, got {}", other.type_tag())),
    }
}

fn rest(args: &[Object]) -> Object {
    if args.len() != 1 {
        return wrong_arity("rest", args.len(), 1);
    }
    match &args[0] {
        Object::Array(elems) => {
            let elems = elems.borrow();
            if elems.is_empty() {
                crate::object::NULL.clone()
            } else {
                Object::Array(Rc::new(RefCell::new(elems[1..].to_vec())))
            }
        }
        other => error(format!("argument to `rest` must be ARRAY, got {}", other.type_tag())),
    }
}

fn push(args: &[Object]) -> Object {
    if args.len() != 2 {
        return wrong_arity("push", args.len(), 2);
    }
    match &args[0] {
        Object::Array(elems) => {
            let mut new_elems = elems.borrow().clone();
            new_elems.push(args[1].clone());
            Object::Array(Rc::new(RefCell::new(new_elems)))
        }
        other => error(format!("first argument to `push` must be ARRAY, got {}", other.type_tag())),
    }
}

/// Writes a single unconditional blank line, then each argument's
/// `inspect()` on its own line — preserved byte-for-byte to match
/// `evaluator/builtins.go`'s `print` (spec.md §9).
fn print(args: &[Object]) -> Object {
    println!();
    for arg in args {
        println!("{}", arg.inspect());
    }
    crate::object::NULL.clone()
}

fn table() -> &'static FxHashMap<&'static str, BuiltinObject> {
    static TABLE: OnceLock<FxHashMap<&'static str, BuiltinObject>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut map = FxHashMap::default();
        map.insert("len", BuiltinObject { name: "len", func: len });
        map.insert("first", BuiltinObject { name: "first", func: first });
        map.insert("last", BuiltinObject { name: "last", func: last });
        map.insert("rest", BuiltinObject { name: "rest", func: rest });
        map.insert("push", BuiltinObject { name: "push", func: push });
        map.insert("print", BuiltinObject { name: "print", func: print });
        map
    })
}

pub fn lookup(name: &str) -> Option<Object> {
    // The table stores function pointers, not `Object`s, so each lookup
    // wraps the entry fresh; builtins are `Copy`-cheap and never mutated.
    table().get(name).map(|b| Object::Builtin(Rc::new(BuiltinObject { name: b.name, func: b.func })))
}
