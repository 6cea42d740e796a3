//! Key-path lookup and value coercion

use serde_json::{Map, Value};

/// Where a field may live in a JSON object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Path {
    /// A top-level key
    Flat(&'static str),
    /// A key inside a nested object: `(object, key)`
    Nested(&'static str, &'static str),
}

impl Path {
    fn lookup<'a>(&self, object: &'a Map<String, Value>) -> Option<&'a Value> {
        match self {
            Path::Flat(key) => object.get(*key),
            Path::Nested(parent, key) => object.get(*parent)?.as_object()?.get(*key),
        }
    }
}

/// Resolves typed fields out of one JSON object
///
/// Each lookup walks its paths in order and returns the first value that is
/// defined and coerces to the requested type. `null` counts as undefined,
/// and so does an empty string for string fields.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    object: &'a Map<String, Value>,
}

impl<'a> Resolver<'a> {
    pub fn new(object: &'a Map<String, Value>) -> Self {
        Self { object }
    }

    pub fn string(&self, paths: &[Path]) -> Option<String> {
        self.first(paths, as_string)
    }

    pub fn integer(&self, paths: &[Path]) -> Option<i64> {
        self.first(paths, as_integer)
    }

    pub fn number(&self, paths: &[Path]) -> Option<f64> {
        self.first(paths, as_number)
    }

    /// The elements of an array field. Anything that is not an array
    /// resolves to no elements.
    pub fn array(&self, key: &'static str) -> &'a [Value] {
        match Path::Flat(key).lookup(self.object) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    fn first<T>(&self, paths: &[Path], coerce: fn(&Value) -> Option<T>) -> Option<T> {
        paths
            .iter()
            .find_map(|path| path.lookup(self.object).and_then(coerce))
    }
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_first_defined_path_wins() {
        let obj = object(json!({"nested": {"a": 3}, "a": 7}));
        let resolver = Resolver::new(&obj);
        assert_eq!(
            resolver.integer(&[Path::Nested("nested", "a"), Path::Flat("a")]),
            Some(3)
        );
        assert_eq!(
            resolver.integer(&[Path::Flat("a"), Path::Nested("nested", "a")]),
            Some(7)
        );
    }

    #[test]
    fn test_null_and_empty_fall_through() {
        let obj = object(json!({"nested": {"a": null, "s": ""}, "a": 1, "s": "flat"}));
        let resolver = Resolver::new(&obj);
        assert_eq!(
            resolver.integer(&[Path::Nested("nested", "a"), Path::Flat("a")]),
            Some(1)
        );
        assert_eq!(
            resolver.string(&[Path::Nested("nested", "s"), Path::Flat("s")]).as_deref(),
            Some("flat")
        );
    }

    #[test]
    fn test_zero_is_defined() {
        let obj = object(json!({"nested": {"a": 0}, "a": 9}));
        let resolver = Resolver::new(&obj);
        assert_eq!(
            resolver.integer(&[Path::Nested("nested", "a"), Path::Flat("a")]),
            Some(0)
        );
    }

    #[test]
    fn test_nested_parent_that_is_not_an_object() {
        let obj = object(json!({"nested": "oops", "a": 2}));
        let resolver = Resolver::new(&obj);
        assert_eq!(
            resolver.integer(&[Path::Nested("nested", "a"), Path::Flat("a")]),
            Some(2)
        );
    }

    #[test]
    fn test_coercion() {
        let obj = object(json!({
            "int_str": " 12 ",
            "float_int": 4.0,
            "float_frac": 4.5,
            "num": 19.25,
            "num_str": "3.5",
            "word": "abc",
            "list": [1]
        }));
        let resolver = Resolver::new(&obj);
        assert_eq!(resolver.integer(&[Path::Flat("int_str")]), Some(12));
        assert_eq!(resolver.integer(&[Path::Flat("float_int")]), Some(4));
        assert_eq!(resolver.integer(&[Path::Flat("float_frac")]), None);
        assert_eq!(resolver.number(&[Path::Flat("num_str")]), Some(3.5));
        assert_eq!(resolver.number(&[Path::Flat("word")]), None);
        assert_eq!(resolver.string(&[Path::Flat("num")]).as_deref(), Some("19.25"));
        assert_eq!(resolver.string(&[Path::Flat("list")]), None);
    }

    #[test]
    fn test_array_defaults_to_empty() {
        let obj = object(json!({"items": [1, 2], "scalar": 5}));
        let resolver = Resolver::new(&obj);
        assert_eq!(resolver.array("items").len(), 2);
        assert!(resolver.array("scalar").is_empty());
        assert!(resolver.array("missing").is_empty());
    }
}
