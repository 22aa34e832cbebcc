//! The runtime value model.
//!
//! `List` and `Dict` hold `Rc<RefCell<..>>` handles, so cloning a
//! `Value` aliases the container: mutations through one name are
//! visible through every name bound to the same handle. Constructors
//! (`list(x)`, `sorted(x)`, literals, `+` on lists) build fresh
//! handles. Dict keys are display strings, matching the string-keyed
//! objects the exercise snippets use.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Rc<RefCell<Vec<Value>>>),
    Dict(Rc<RefCell<Vec<(String, Value)>>>),
    Tuple(Rc<Vec<Value>>),
    /// A named native callable, dispatched by the evaluator's builtin
    /// registry. Module functions use dotted names (`math.sqrt`).
    Builtin(&'static str),
    /// A user-defined routine, looked up in the routine table by name.
    Routine(String),
}

impl Value {
    /// Wrap a vector in a fresh list handle.
    pub fn new_list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    /// Wrap entries in a fresh dict handle.
    pub fn new_dict(entries: Vec<(String, Value)>) -> Value {
        Value::Dict(Rc::new(RefCell::new(entries)))
    }

    pub fn new_tuple(items: Vec<Value>) -> Value {
        Value::Tuple(Rc::new(items))
    }

    /// Python truthiness: `0`, `0.0`, `""`, `[]`, `{}`, `()`, `None`
    /// and `False` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Dict(entries) => !entries.borrow().is_empty(),
            Value::Tuple(items) => !items.is_empty(),
            Value::Builtin(_) | Value::Routine(_) => true,
        }
    }

    /// Short type name, used inside error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Tuple(_) => "tuple",
            Value::Builtin(_) => "builtin_function_or_method",
            Value::Routine(_) => "function",
        }
    }

    /// The label `type(x)` renders.
    pub fn type_label(&self) -> String {
        format!("<class '{}'>", self.type_name())
    }

    /// Render for `print` position: strings appear bare, containers
    /// render JSON-like with no spaces, integral floats drop the
    /// decimal point.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            other => other.to_repr_string(),
        }
    }

    /// Render for container position: strings are double-quoted.
    pub fn to_repr_string(&self) -> String {
        match self {
            Value::None => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => format_float(*n),
            Value::Str(s) => quote_string(s),
            Value::List(items) => {
                let inner: Vec<String> = items
                    .borrow()
                    .iter()
                    .map(Value::to_repr_string)
                    .collect();
                format!("[{}]", inner.join(","))
            }
            Value::Dict(entries) => {
                let inner: Vec<String> = entries
                    .borrow()
                    .iter()
                    .map(|(k, v)| format!("{}:{}", quote_string(k), v.to_repr_string()))
                    .collect();
                format!("{{{}}}", inner.join(","))
            }
            Value::Tuple(items) => {
                let inner: Vec<String> =
                    items.iter().map(Value::to_repr_string).collect();
                if inner.len() == 1 {
                    format!("({},)", inner[0])
                } else {
                    format!("({})", inner.join(","))
                }
            }
            Value::Builtin(name) => format!("<built-in function {name}>"),
            Value::Routine(name) => format!("<function {name}>"),
        }
    }

    /// Numeric view of `Int` and `Float`, used by arithmetic.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }
}

/// Equality is numeric across `Int`/`Float` and structural for
/// containers. Aliased handles are equal by content, not identity.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                *a as f64 == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => *a.borrow() == *b.borrow(),
            (Value::Dict(a), Value::Dict(b)) => *a.borrow() == *b.borrow(),
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Routine(a), Value::Routine(b)) => a == b,
            _ => false,
        }
    }
}

/// Host-numeric float rendering: integral values drop the decimal
/// point (`3.0` renders as `3`), everything else uses the shortest
/// round-trip form.
pub fn format_float(n: f64) -> String {
    if n.is_finite() && n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Ordering for `<`/`>`-style comparisons and sorting: numeric across
/// `Int`/`Float`, lexicographic for strings, `None` for anything else.
pub fn compare_values(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
    if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        return x.partial_cmp(&y);
    }
    if let (Value::Str(x), Value::Str(y)) = (a, b) {
        return Some(x.cmp(y));
    }
    None
}

fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::None.is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::Str(String::new()).is_truthy());
        assert!(!Value::new_list(vec![]).is_truthy());
        assert!(!Value::new_dict(vec![]).is_truthy());
        assert!(Value::Int(-1).is_truthy());
        assert!(Value::Str("0".to_string()).is_truthy());
        assert!(Value::new_list(vec![Value::None]).is_truthy());
    }

    #[test]
    fn test_numeric_equality_across_kinds() {
        assert_eq!(Value::Int(3), Value::Float(3.0));
        assert_eq!(Value::Float(3.0), Value::Int(3));
        assert_ne!(Value::Int(3), Value::Float(3.5));
        assert_ne!(Value::Int(1), Value::Bool(true));
    }

    #[test]
    fn test_list_equality_is_structural() {
        let a = Value::new_list(vec![Value::Int(1), Value::Int(2)]);
        let b = Value::new_list(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_list_clone_aliases() {
        let a = Value::new_list(vec![Value::Int(1)]);
        let b = a.clone();
        if let Value::List(items) = &a {
            items.borrow_mut().push(Value::Int(2));
        }
        assert_eq!(b.to_display_string(), "[1,2]");
    }

    #[test]
    fn test_display_integral_float() {
        assert_eq!(Value::Float(3.0).to_display_string(), "3");
        assert_eq!(Value::Float(3.5).to_display_string(), "3.5");
        assert_eq!(Value::Float(-2.0).to_display_string(), "-2");
    }

    #[test]
    fn test_display_containers_json_like() {
        let list = Value::new_list(vec![
            Value::Int(1),
            Value::Str("a".to_string()),
            Value::Bool(true),
        ]);
        assert_eq!(list.to_display_string(), "[1,\"a\",True]");

        let dict = Value::new_dict(vec![
            ("x".to_string(), Value::Int(1)),
            ("y".to_string(), Value::Int(2)),
        ]);
        assert_eq!(dict.to_display_string(), "{\"x\":1,\"y\":2}");
    }

    #[test]
    fn test_display_tuple() {
        let t = Value::new_tuple(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(t.to_display_string(), "(1,2)");
        let single = Value::new_tuple(vec![Value::Int(7)]);
        assert_eq!(single.to_display_string(), "(7,)");
    }

    #[test]
    fn test_string_bare_in_print_quoted_in_container() {
        let s = Value::Str("hola".to_string());
        assert_eq!(s.to_display_string(), "hola");
        let list = Value::new_list(vec![s]);
        assert_eq!(list.to_display_string(), "[\"hola\"]");
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(Value::Int(1).type_label(), "<class 'int'>");
        assert_eq!(Value::None.type_label(), "<class 'NoneType'>");
        assert_eq!(
            Value::Builtin("len").type_label(),
            "<class 'builtin_function_or_method'>"
        );
    }
}
