//! Chained name→value scope (spec.md §3, §4.F, component F).

use crate::object::Object;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

pub struct Environment {
    store: FxHashMap<String, Object>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { store: FxHashMap::default(), outer: None }))
    }

    /// A fresh local frame enclosing `outer` — the mechanism that makes a
    /// function call or closure capture a lexical scope (spec.md §3, §9).
    pub fn enclosed(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { store: FxHashMap::default(), outer: Some(outer) }))
    }

    /// Consults the local frame, then walks outward (spec.md §4.F).
    ///
    /// # Examples
    ///
    /// ```
    /// use amoeba_eval::{Environment, Object};
    ///
    /// let env = Environment::new();
    /// env.borrow_mut().set("x", Object::Integer(5));
    /// assert!(matches!(env.borrow().get("x"), Some(Object::Integer(5))));
    /// assert!(env.borrow().get("missing").is_none());
    /// ```
    pub fn get(&self, name: &str) -> Option<Object> {
        if let Some(value) = self.store.get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
    }

    /// Installs only in the current frame; outer links are never written
    /// through (spec.md §3 invariant).
    pub fn set(&mut self, name: impl Into<String>, value: Object) -> Object {
        let value_clone = value.clone();
        self.store.insert(name.into(), value);
        value_clone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_scope_is_visible_from_inner() {
        let outer = Environment::new();
        outer.borrow_mut().set("x", Object::Integer(1));
        let inner = Environment::enclosed(outer.clone());
        assert!(matches!(inner.borrow().get("x"), Some(Object::Integer(1))));
    }

    #[test]
    fn inner_shadowing_does_not_leak_outward() {
        let outer = Environment::new();
        outer.borrow_mut().set("x", Object::Integer(1));
        let inner = Environment::enclosed(outer.clone());
        inner.borrow_mut().set("x", Object::Integer(2));
        assert!(matches!(inner.borrow().get("x"), Some(Object::Integer(2))));
        assert!(matches!(outer.borrow().get("x"), Some(Object::Integer(1))));
    }
}
