//! Tolerant accessors over a loosely-typed resource tree.
//!
//! Every lookup returns an absence indicator instead of failing: a missing key
//! and a value of the wrong type look the same to callers.

use serde_json::Value;

/// A possibly-absent position inside a JSON tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct Node<'a> {
    value: Option<&'a Value>,
}

impl<'a> Node<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value: Some(value) }
    }

    pub fn missing() -> Self {
        Self { value: None }
    }

    pub fn value(self) -> Option<&'a Value> {
        self.value
    }

    pub fn is_present(self) -> bool {
        self.value.is_some()
    }

    pub fn is_object(self) -> bool {
        self.value.is_some_and(Value::is_object)
    }

    /// Whether this is an object that has `key`, whatever its value.
    pub fn has(self, key: &str) -> bool {
        self.value
            .and_then(Value::as_object)
            .is_some_and(|m| m.contains_key(key))
    }

    /// Child of an object; absent for non-objects.
    pub fn get(self, key: &str) -> Node<'a> {
        Node {
            value: self
                .value
                .and_then(Value::as_object)
                .and_then(|m| m.get(key)),
        }
    }

    /// Walk a dotted path of object keys, e.g. `securityContext.privileged`.
    pub fn path(self, dotted: &str) -> Node<'a> {
        dotted.split('.').fold(self, |node, key| node.get(key))
    }

    pub fn as_str(self) -> Option<&'a str> {
        self.value.and_then(Value::as_str)
    }

    pub fn as_bool(self) -> Option<bool> {
        self.value.and_then(Value::as_bool)
    }

    pub fn str_at(self, dotted: &str) -> Option<&'a str> {
        self.path(dotted).as_str()
    }

    pub fn bool_at(self, dotted: &str) -> Option<bool> {
        self.path(dotted).as_bool()
    }

    /// Elements of an array with their indices; empty for non-arrays.
    pub fn items(self) -> impl Iterator<Item = (usize, Node<'a>)> + 'a {
        self.value
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(Node::new)
            .enumerate()
    }
}
