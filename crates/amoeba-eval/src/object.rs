//! Runtime value variants (spec.md §3, §4.E, component E).

use crate::environment::Environment;
use amoeba_par::ast::{BlockStatement, Identifier};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// `TRUE`, `FALSE`, `NULL` are process-wide singletons (spec.md §3, §9):
/// the `!` operator and boolean infix comparisons compare them by
/// reference (`Rc::ptr_eq`), not by structural equality.
pub static TRUE: once::Lazy<Object> = once::Lazy::new(|| Object::Boolean(Rc::new(true)));
pub static FALSE: once::Lazy<Object> = once::Lazy::new(|| Object::Boolean(Rc::new(false)));
pub static NULL: once::Lazy<Object> = once::Lazy::new(|| Object::Null(Rc::new(())));

/// A tiny `Lazy<T>` so the singletons above don't pull in an external
/// once-cell dependency for three values that never change after first
/// use — grounded in the teacher crate's own `once_cell`-backed singleton
/// pattern, reduced to std's `OnceLock`.
mod once {
    use std::sync::OnceLock;

    pub struct Lazy<T> {
        cell: OnceLock<T>,
        init: fn() -> T,
    }

    impl<T> Lazy<T> {
        pub const fn new(init: fn() -> T) -> Self {
            Self { cell: OnceLock::new(), init }
        }

        pub fn get(&self) -> &T {
            self.cell.get_or_init(self.init)
        }
    }

    impl<T> std::ops::Deref for Lazy<T> {
        type Target = T;
        fn deref(&self) -> &T {
            self.get()
        }
    }
}

pub fn native_bool(value: bool) -> Object {
    if value {
        TRUE.clone()
    } else {
        FALSE.clone()
    }
}

pub type BuiltinFn = fn(&[Object]) -> Object;

#[derive(Clone)]
pub enum Object {
    Integer(i64),
    Boolean(Rc<bool>),
    Null(Rc<()>),
    String(Rc<str>),
    Array(Rc<RefCell<Vec<Object>>>),
    Function(Rc<FunctionObject>),
    Builtin(Rc<BuiltinObject>),
    ReturnValue(Box<Object>),
    Error(Rc<str>),
}

pub struct FunctionObject {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Rc<RefCell<Environment>>,
}

pub struct BuiltinObject {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Object {
    pub fn type_tag(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null(_) => "NULL",
            Object::String(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
        }
    }

    pub fn inspect(&self) -> String {
        match self {
            Object::Integer(v) => v.to_string(),
            Object::Boolean(v) => v.to_string(),
            Object::Null(_) => "null".to_string(),
            Object::String(s) => s.to_string(),
            Object::Array(elems) => {
                let inner: Vec<String> = elems.borrow().iter().map(|e| e.inspect()).collect();
                format!("[{}]", inner.join(", "))
            }
            Object::Function(func) => {
                let params: Vec<String> = func.parameters.iter().map(|p| p.to_string()).collect();
                format!("fn({}) {{\n{}\n}}", params.join(", "), func.body)
            }
            Object::Builtin(_) => "builtin function".to_string(),
            Object::ReturnValue(inner) => inner.inspect(),
            Object::Error(msg) => format!("ERROR: {msg}"),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(b) if !**b) && !matches!(self, Object::Null(_))
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_tag(), self.inspect())
    }
}

pub fn error(message: impl Into<String>) -> Object {
    Object::Error(Rc::from(message.into()))
}
