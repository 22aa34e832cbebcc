//! The `math` and `random` pseudo-modules.
//!
//! `import math` binds a dict of constants and named builtins; module
//! functions dispatch through the same registry as top-level builtins,
//! under dotted names. `random` is backed by a deterministic xorshift
//! generator owned by the evaluator and reseeded on every reset, so
//! repeated executions of the same snippet agree.

use crate::value::Value;

/// Module names the evaluator recognises.
pub const KNOWN_MODULES: &[&str] = &["math", "random"];

/// Build the binding for `import <name>`, or `None` for modules the
/// engine does not model.
pub fn module_value(name: &str) -> Option<Value> {
    match name {
        "math" => Some(Value::new_dict(vec![
            ("pi".to_string(), Value::Float(std::f64::consts::PI)),
            ("e".to_string(), Value::Float(std::f64::consts::E)),
            ("sqrt".to_string(), Value::Builtin("math.sqrt")),
            ("pow".to_string(), Value::Builtin("math.pow")),
            ("fabs".to_string(), Value::Builtin("math.fabs")),
            ("floor".to_string(), Value::Builtin("math.floor")),
            ("ceil".to_string(), Value::Builtin("math.ceil")),
        ])),
        "random" => Some(Value::new_dict(vec![
            ("random".to_string(), Value::Builtin("random.random")),
            ("randint".to_string(), Value::Builtin("random.randint")),
            ("choice".to_string(), Value::Builtin("random.choice")),
        ])),
        _ => None,
    }
}

/// Fixed seed so `random` is reproducible across executions.
const DEFAULT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Small xorshift64 generator. Not suitable for anything beyond
/// classroom snippets, which is exactly the use here.
#[derive(Debug, Clone)]
pub struct XorShift {
    state: u64,
}

impl XorShift {
    pub fn new() -> Self {
        Self {
            state: DEFAULT_SEED,
        }
    }

    pub fn reseed(&mut self) {
        self.state = DEFAULT_SEED;
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `[lo, hi]`, both ends inclusive.
    pub fn next_in_range(&mut self, lo: i64, hi: i64) -> i64 {
        if lo >= hi {
            return lo;
        }
        let width = (hi - lo) as u64 + 1;
        lo + (self.next_u64() % width) as i64
    }
}

impl Default for XorShift {
    fn default() -> Self {
        Self::new()
    }
}
