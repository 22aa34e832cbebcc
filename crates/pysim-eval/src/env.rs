//! Variable environment: one global frame plus a stack of call frames.
//!
//! Lookup is two-level: the innermost call frame, then the globals.
//! Intermediate frames are never visible, so routines see their own
//! locals and top-level names but not their caller's locals.

use crate::value::Value;
use std::collections::BTreeMap;

/// Maximum live call frames before a recursion error.
pub const MAX_CALL_DEPTH: usize = 64;

#[derive(Debug, Clone, Default)]
pub struct Environment {
    globals: BTreeMap<String, Value>,
    frames: Vec<BTreeMap<String, Value>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every binding and every frame.
    pub fn reset(&mut self) {
        self.globals.clear();
        self.frames.clear();
    }

    /// Enter a routine body.
    pub fn push_frame(&mut self) {
        self.frames.push(BTreeMap::new());
    }

    /// Leave a routine body.
    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    pub fn call_depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind a name in the current scope: the innermost frame inside a
    /// call, the globals at top level.
    pub fn define(&mut self, name: &str, value: Value) {
        let scope = self.frames.last_mut().unwrap_or(&mut self.globals);
        scope.insert(name.to_string(), value);
    }

    /// Look up a name: current frame first, then globals.
    pub fn get(&self, name: &str) -> Option<&Value> {
        if let Some(frame) = self.frames.last() {
            if let Some(v) = frame.get(name) {
                return Some(v);
            }
        }
        self.globals.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get_global() {
        let mut env = Environment::new();
        env.define("x", Value::Int(5));
        assert_eq!(env.get("x"), Some(&Value::Int(5)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn test_frame_locals_shadow_globals() {
        let mut env = Environment::new();
        env.define("x", Value::Int(1));
        env.push_frame();
        env.define("x", Value::Int(2));
        assert_eq!(env.get("x"), Some(&Value::Int(2)));
        env.pop_frame();
        assert_eq!(env.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_globals_visible_from_frame() {
        let mut env = Environment::new();
        env.define("g", Value::Int(9));
        env.push_frame();
        assert_eq!(env.get("g"), Some(&Value::Int(9)));
    }

    #[test]
    fn test_caller_locals_not_visible() {
        let mut env = Environment::new();
        env.push_frame();
        env.define("local", Value::Int(1));
        env.push_frame();
        assert_eq!(env.get("local"), None);
        env.pop_frame();
        assert_eq!(env.get("local"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_frame_define_does_not_leak() {
        let mut env = Environment::new();
        env.push_frame();
        env.define("tmp", Value::Int(3));
        env.pop_frame();
        assert_eq!(env.get("tmp"), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut env = Environment::new();
        env.define("x", Value::Int(1));
        env.push_frame();
        env.define("y", Value::Int(2));
        env.reset();
        assert_eq!(env.get("x"), None);
        assert_eq!(env.call_depth(), 0);
    }
}
