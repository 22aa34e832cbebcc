//! The builtin library, dispatched by name.
//!
//! Bare names resolve through [`lookup_builtin`] when the environment
//! does not shadow them; `math.*` and `random.*` arrive here through
//! their module dicts. Everything operates on already-evaluated
//! [`Value`]s.

use crate::error::{EvalError, EvalResult};
use crate::evaluator::Evaluator;
use crate::value::{compare_values, Value};

/// Builtin names reachable as bare identifiers.
const BUILTIN_NAMES: &[&str] = &[
    "print", "input", "len", "str", "int", "float", "bool", "list", "abs", "max", "min", "sum",
    "sorted", "round", "type", "range",
];

/// Resolve a bare identifier against the registry.
pub(crate) fn lookup_builtin(name: &str) -> Option<&'static str> {
    BUILTIN_NAMES.iter().find(|&&b| b == name).copied()
}

/// In-place sort: numeric order when every element is a number,
/// display-string order otherwise.
pub(crate) fn sort_values(items: &mut [Value]) {
    if items.iter().all(Value::is_number) {
        items.sort_by(|a, b| {
            compare_values(a, b).unwrap_or(std::cmp::Ordering::Equal)
        });
    } else {
        items.sort_by_key(|v| v.to_display_string());
    }
}

impl Evaluator {
    pub(crate) fn call_builtin(&mut self, name: &str, args: Vec<Value>) -> EvalResult<Value> {
        match name {
            "print" => {
                let line: Vec<String> = args.iter().map(Value::to_display_string).collect();
                self.output.push(line.join(" "));
                Ok(Value::None)
            }
            "input" => {
                let prompt = match args.first() {
                    Some(v) => v.to_display_string(),
                    None => String::new(),
                };
                let value = self.input.next_input();
                if !prompt.is_empty() {
                    self.output.push(format!("{prompt}{value}"));
                }
                Ok(Value::Str(value))
            }
            "len" => {
                let arg = one_arg("len", args)?;
                let len = match &arg {
                    Value::Str(s) => s.chars().count(),
                    Value::List(items) => items.borrow().len(),
                    Value::Dict(entries) => entries.borrow().len(),
                    Value::Tuple(items) => items.len(),
                    other => {
                        return Err(EvalError::Type(format!(
                            "object of type '{}' has no len()",
                            other.type_name()
                        )))
                    }
                };
                Ok(Value::Int(len as i64))
            }
            "str" => match args.into_iter().next() {
                Some(v) => Ok(Value::Str(v.to_display_string())),
                None => Ok(Value::Str(String::new())),
            },
            "int" => builtin_int(one_arg("int", args)?),
            "float" => builtin_float(one_arg("float", args)?),
            "bool" => Ok(Value::Bool(one_arg("bool", args)?.is_truthy())),
            "list" => Ok(builtin_list(args.into_iter().next())),
            "abs" => match one_arg("abs", args)? {
                Value::Int(n) => Ok(match n.checked_abs() {
                    Some(a) => Value::Int(a),
                    None => Value::Float((n as f64).abs()),
                }),
                Value::Float(n) => Ok(Value::Float(n.abs())),
                other => Err(EvalError::Type(format!(
                    "bad operand type for abs(): '{}'",
                    other.type_name()
                ))),
            },
            "max" => builtin_extremum("max", args, std::cmp::Ordering::Greater),
            "min" => builtin_extremum("min", args, std::cmp::Ordering::Less),
            "sum" => builtin_sum(one_arg("sum", args)?),
            "sorted" => {
                let mut items = sequence_items(&one_arg("sorted", args)?)
                    .ok_or_else(|| EvalError::Type("'sorted' expects a sequence".to_string()))?;
                sort_values(&mut items);
                Ok(Value::new_list(items))
            }
            "round" => builtin_round(args),
            "type" => Ok(Value::Str(one_arg("type", args)?.type_label())),
            "range" => builtin_range(args),

            // math module
            "math.sqrt" => {
                let n = number_arg("math.sqrt", one_arg("sqrt", args)?)?;
                if n < 0.0 {
                    return Err(EvalError::Value("math domain error".to_string()));
                }
                Ok(Value::Float(n.sqrt()))
            }
            "math.pow" => {
                let mut args = args.into_iter();
                let base = number_arg("math.pow", args.next().unwrap_or(Value::None))?;
                let exp = number_arg("math.pow", args.next().unwrap_or(Value::None))?;
                Ok(Value::Float(base.powf(exp)))
            }
            "math.fabs" => {
                let n = number_arg("math.fabs", one_arg("fabs", args)?)?;
                Ok(Value::Float(n.abs()))
            }
            "math.floor" => {
                let n = number_arg("math.floor", one_arg("floor", args)?)?;
                Ok(Value::Int(n.floor() as i64))
            }
            "math.ceil" => {
                let n = number_arg("math.ceil", one_arg("ceil", args)?)?;
                Ok(Value::Int(n.ceil() as i64))
            }

            // random module
            "random.random" => Ok(Value::Float(self.rng.next_f64())),
            "random.randint" => {
                let mut args = args.into_iter();
                let (Some(Value::Int(lo)), Some(Value::Int(hi))) = (args.next(), args.next())
                else {
                    return Err(EvalError::Type(
                        "randint() requires two integer arguments".to_string(),
                    ));
                };
                if hi < lo {
                    return Err(EvalError::Value(format!(
                        "empty range for randint() ({lo}, {hi})"
                    )));
                }
                Ok(Value::Int(self.rng.next_in_range(lo, hi)))
            }
            "random.choice" => {
                let arg = one_arg("choice", args)?;
                let items = sequence_items(&arg).ok_or_else(|| {
                    EvalError::Type(format!(
                        "'{}' object is not a sequence",
                        arg.type_name()
                    ))
                })?;
                if items.is_empty() {
                    return Err(EvalError::Index(
                        "cannot choose from an empty sequence".to_string(),
                    ));
                }
                let idx = self.rng.next_in_range(0, items.len() as i64 - 1) as usize;
                Ok(items[idx].clone())
            }

            other => Err(EvalError::UndefinedName(other.to_string())),
        }
    }
}

fn one_arg(name: &str, args: Vec<Value>) -> EvalResult<Value> {
    let count = args.len();
    match args.into_iter().next() {
        Some(v) if count == 1 => Ok(v),
        _ => Err(EvalError::Type(format!(
            "{name}() takes exactly one argument ({count} given)"
        ))),
    }
}

fn number_arg(name: &str, value: Value) -> EvalResult<f64> {
    value.as_number().ok_or_else(|| {
        EvalError::Type(format!(
            "{name}() requires a number, not '{}'",
            value.type_name()
        ))
    })
}

/// The elements of a `List`, `Tuple` or `Str`, copied out.
fn sequence_items(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::List(items) => Some(items.borrow().clone()),
        Value::Tuple(items) => Some(items.as_ref().clone()),
        Value::Str(s) => Some(s.chars().map(|c| Value::Str(c.to_string())).collect()),
        _ => None,
    }
}

fn builtin_int(arg: Value) -> EvalResult<Value> {
    match arg {
        Value::Int(n) => Ok(Value::Int(n)),
        Value::Float(n) => Ok(Value::Int(n.trunc() as i64)),
        Value::Bool(b) => Ok(Value::Int(b as i64)),
        Value::Str(s) => {
            let trimmed = s.trim();
            if let Ok(n) = trimmed.parse::<i64>() {
                return Ok(Value::Int(n));
            }
            if let Ok(f) = trimmed.parse::<f64>() {
                return Ok(Value::Int(f.trunc() as i64));
            }
            Err(EvalError::Value(format!(
                "invalid literal for int() with base 10: '{s}'"
            )))
        }
        other => Err(EvalError::Type(format!(
            "int() argument must be a string or a number, not '{}'",
            other.type_name()
        ))),
    }
}

fn builtin_float(arg: Value) -> EvalResult<Value> {
    match arg {
        Value::Int(n) => Ok(Value::Float(n as f64)),
        Value::Float(n) => Ok(Value::Float(n)),
        Value::Bool(b) => Ok(Value::Float(b as i64 as f64)),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| EvalError::Value(format!("could not convert string to float: '{s}'"))),
        other => Err(EvalError::Type(format!(
            "float() argument must be a string or a number, not '{}'",
            other.type_name()
        ))),
    }
}

/// `list()` builds from a string's characters or copies a sequence;
/// anything else yields an empty list.
fn builtin_list(arg: Option<Value>) -> Value {
    match arg {
        Some(value) => match sequence_items(&value) {
            Some(items) => Value::new_list(items),
            None => Value::new_list(Vec::new()),
        },
        None => Value::new_list(Vec::new()),
    }
}

/// Shared implementation of `max` and `min`: a single sequence
/// argument or two-plus scalar arguments.
fn builtin_extremum(
    name: &str,
    args: Vec<Value>,
    keep: std::cmp::Ordering,
) -> EvalResult<Value> {
    let candidates = if args.len() == 1 {
        match sequence_items(&args[0]) {
            Some(items) => items,
            None => args,
        }
    } else {
        args
    };
    if candidates.is_empty() {
        return Err(EvalError::Value(format!("{name}() arg is an empty sequence")));
    }
    let mut best = candidates[0].clone();
    for candidate in &candidates[1..] {
        let Some(ordering) = compare_values(candidate, &best) else {
            return Err(EvalError::Type(format!(
                "'{name}' not supported between instances of '{}' and '{}'",
                candidate.type_name(),
                best.type_name()
            )));
        };
        if ordering == keep {
            best = candidate.clone();
        }
    }
    Ok(best)
}

fn builtin_sum(arg: Value) -> EvalResult<Value> {
    let items = sequence_items(&arg).ok_or_else(|| {
        EvalError::Type(format!("'{}' object is not iterable", arg.type_name()))
    })?;
    let mut int_total: i64 = 0;
    let mut float_total: f64 = 0.0;
    let mut all_int = true;
    for item in &items {
        match item {
            Value::Int(n) => {
                int_total = int_total.wrapping_add(*n);
                float_total += *n as f64;
            }
            Value::Float(n) => {
                all_int = false;
                float_total += *n;
            }
            other => {
                return Err(EvalError::Type(format!(
                    "unsupported operand type(s) for +: 'int' and '{}'",
                    other.type_name()
                )))
            }
        }
    }
    if all_int {
        Ok(Value::Int(int_total))
    } else {
        Ok(Value::Float(float_total))
    }
}

fn builtin_round(args: Vec<Value>) -> EvalResult<Value> {
    let mut args = args.into_iter();
    let value = match args.next() {
        Some(v) => v,
        None => {
            return Err(EvalError::Type(
                "round() takes at least one argument (0 given)".to_string(),
            ))
        }
    };
    let n = value.as_number().ok_or_else(|| {
        EvalError::Type(format!(
            "type '{}' doesn't define __round__ method",
            value.type_name()
        ))
    })?;
    match args.next() {
        None => match value {
            Value::Int(i) => Ok(Value::Int(i)),
            _ => Ok(Value::Int(n.round() as i64)),
        },
        Some(Value::Int(digits)) => {
            let factor = 10f64.powi(digits as i32);
            Ok(Value::Float((n * factor).round() / factor))
        }
        Some(other) => Err(EvalError::Type(format!(
            "'{}' object cannot be interpreted as an integer",
            other.type_name()
        ))),
    }
}

fn builtin_range(args: Vec<Value>) -> EvalResult<Value> {
    let mut bounds = Vec::with_capacity(args.len());
    for arg in &args {
        match arg {
            Value::Int(n) => bounds.push(*n),
            other => {
                return Err(EvalError::Type(format!(
                    "'{}' object cannot be interpreted as an integer",
                    other.type_name()
                )))
            }
        }
    }
    let (start, stop, step) = match bounds.as_slice() {
        [stop] => (0, *stop, 1),
        [start, stop] => (*start, *stop, 1),
        [start, stop, step] => (*start, *stop, *step),
        _ => {
            return Err(EvalError::Type(format!(
                "range expected at most 3 arguments, got {}",
                bounds.len()
            )))
        }
    };
    if step == 0 {
        return Err(EvalError::Value("range() arg 3 must not be zero".to_string()));
    }
    let mut items = Vec::new();
    let mut current = start;
    while (step > 0 && current < stop) || (step < 0 && current > stop) {
        items.push(Value::Int(current));
        current += step;
    }
    Ok(Value::new_list(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_builtin() {
        assert_eq!(lookup_builtin("len"), Some("len"));
        assert_eq!(lookup_builtin("range"), Some("range"));
        assert_eq!(lookup_builtin("eval"), None);
    }

    #[test]
    fn test_range_forms() {
        let r = builtin_range(vec![Value::Int(3)]).unwrap();
        assert_eq!(r.to_display_string(), "[0,1,2]");

        let r = builtin_range(vec![Value::Int(2), Value::Int(5)]).unwrap();
        assert_eq!(r.to_display_string(), "[2,3,4]");

        let r = builtin_range(vec![Value::Int(5), Value::Int(0), Value::Int(-2)]).unwrap();
        assert_eq!(r.to_display_string(), "[5,3,1]");
    }

    #[test]
    fn test_range_zero_step_fails() {
        let err =
            builtin_range(vec![Value::Int(0), Value::Int(5), Value::Int(0)]).unwrap_err();
        assert!(err.to_string().contains("must not be zero"));
    }

    #[test]
    fn test_int_conversions() {
        assert_eq!(builtin_int(Value::Str(" 42 ".to_string())).unwrap(), Value::Int(42));
        assert_eq!(builtin_int(Value::Str("3.9".to_string())).unwrap(), Value::Int(3));
        assert_eq!(builtin_int(Value::Float(-2.7)).unwrap(), Value::Int(-2));
        assert_eq!(builtin_int(Value::Bool(true)).unwrap(), Value::Int(1));
        assert!(builtin_int(Value::Str("abc".to_string())).is_err());
    }

    #[test]
    fn test_float_conversions() {
        assert_eq!(
            builtin_float(Value::Str("3.14".to_string())).unwrap(),
            Value::Float(3.14)
        );
        assert!(builtin_float(Value::Str("pi".to_string())).is_err());
    }

    #[test]
    fn test_list_of_string_is_characters() {
        let l = builtin_list(Some(Value::Str("abc".to_string())));
        assert_eq!(l.to_display_string(), "[\"a\",\"b\",\"c\"]");
    }

    #[test]
    fn test_list_copy_does_not_alias() {
        let original = Value::new_list(vec![Value::Int(1)]);
        let copy = builtin_list(Some(original.clone()));
        if let Value::List(items) = &copy {
            items.borrow_mut().push(Value::Int(2));
        }
        assert_eq!(original.to_display_string(), "[1]");
        assert_eq!(copy.to_display_string(), "[1,2]");
    }

    #[test]
    fn test_max_min_over_sequence_and_scalars() {
        let list = Value::new_list(vec![Value::Int(3), Value::Int(1), Value::Int(2)]);
        assert_eq!(
            builtin_extremum("max", vec![list.clone()], std::cmp::Ordering::Greater).unwrap(),
            Value::Int(3)
        );
        assert_eq!(
            builtin_extremum("min", vec![list], std::cmp::Ordering::Less).unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            builtin_extremum(
                "max",
                vec![Value::Int(1), Value::Float(2.5)],
                std::cmp::Ordering::Greater
            )
            .unwrap(),
            Value::Float(2.5)
        );
    }

    #[test]
    fn test_sum_int_and_mixed() {
        let ints = Value::new_list(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(builtin_sum(ints).unwrap(), Value::Int(6));

        let mixed = Value::new_list(vec![Value::Int(1), Value::Float(0.5)]);
        assert_eq!(builtin_sum(mixed).unwrap(), Value::Float(1.5));

        let empty = Value::new_list(vec![]);
        assert_eq!(builtin_sum(empty).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_sort_values_numeric_then_lexical() {
        let mut nums = vec![Value::Int(3), Value::Float(1.5), Value::Int(2)];
        sort_values(&mut nums);
        assert_eq!(nums, vec![Value::Float(1.5), Value::Int(2), Value::Int(3)]);

        let mut mixed = vec![
            Value::Str("b".to_string()),
            Value::Str("a".to_string()),
            Value::Int(10),
        ];
        sort_values(&mut mixed);
        assert_eq!(mixed[0], Value::Int(10));
    }

    #[test]
    fn test_round_forms() {
        assert_eq!(builtin_round(vec![Value::Float(2.6)]).unwrap(), Value::Int(3));
        assert_eq!(builtin_round(vec![Value::Int(7)]).unwrap(), Value::Int(7));
        assert_eq!(
            builtin_round(vec![Value::Float(3.14159), Value::Int(2)]).unwrap(),
            Value::Float(3.14)
        );
    }
}
