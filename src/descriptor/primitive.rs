use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::value::Value;

/// The closed set of primitive kinds a collection can be typed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    Integer,
    Float,
    Boolean,
    String,
    Array,
    Object,
}

/// Every accepted spelling, in the order they are reported to users.
const VALID_DESIGNATORS: [&str; 10] = [
    "int", "integer", "float", "double", "number", "bool", "boolean", "string", "array", "object",
];

static ALIASES: Lazy<HashMap<&'static str, PrimitiveType>> = Lazy::new(|| {
    HashMap::from([
        ("int", PrimitiveType::Integer),
        ("integer", PrimitiveType::Integer),
        ("float", PrimitiveType::Float),
        ("double", PrimitiveType::Float),
        ("number", PrimitiveType::Float),
        ("bool", PrimitiveType::Boolean),
        ("boolean", PrimitiveType::Boolean),
        ("string", PrimitiveType::String),
        ("array", PrimitiveType::Array),
        ("object", PrimitiveType::Object),
    ])
});

impl PrimitiveType {
    /// Look up a designator, case-insensitively, normalizing aliases.
    pub fn parse(designator: &str) -> Option<Self> {
        ALIASES.get(designator.to_ascii_lowercase().as_str()).copied()
    }

    pub fn resolve(designator: &str) -> Result<Self> {
        Self::parse(designator).ok_or_else(|| {
            Error::designator(
                designator,
                format!("valid primitive types are [{}]", VALID_DESIGNATORS.join(", ")),
            )
        })
    }

    pub fn is_valid_designator(designator: &str) -> bool {
        Self::parse(designator).is_some()
    }

    pub fn valid_designators() -> &'static [&'static str] {
        &VALID_DESIGNATORS
    }

    /// Canonical tag; never an alias.
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::Integer => "integer",
            PrimitiveType::Float => "float",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::String => "string",
            PrimitiveType::Array => "array",
            PrimitiveType::Object => "object",
        }
    }

    pub fn accepts(self, value: &Value) -> bool {
        value.primitive_kind() == Some(self)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn aliases_normalize_to_canonical_tags() {
        assert_eq!(PrimitiveType::parse("int"), Some(PrimitiveType::Integer));
        assert_eq!(PrimitiveType::parse("BOOL"), Some(PrimitiveType::Boolean));
        assert_eq!(PrimitiveType::parse("double"), Some(PrimitiveType::Float));
        assert_eq!(PrimitiveType::parse("Number"), Some(PrimitiveType::Float));
        assert_eq!(PrimitiveType::parse("null"), None);
        assert_eq!(PrimitiveType::parse("App\\Dog"), None);
        for alias in PrimitiveType::valid_designators() {
            let canonical = PrimitiveType::parse(alias).unwrap();
            assert_eq!(PrimitiveType::parse(canonical.as_str()), Some(canonical));
        }
    }

    #[test]
    fn resolve_error_lists_accepted_spellings() {
        let err = PrimitiveType::resolve("decimal").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("`decimal`"));
        assert!(msg.contains("int, integer, float, double, number, bool, boolean, string, array, object"));
    }

    #[test]
    fn accepts_only_its_own_kind() {
        assert!(PrimitiveType::Integer.accepts(&Value::from(1)));
        assert!(!PrimitiveType::Integer.accepts(&Value::from(1.0)));
        assert!(!PrimitiveType::Float.accepts(&Value::from(1)));
        assert!(PrimitiveType::Array.accepts(&Value::from(json!([1, "a"]))));
        assert!(PrimitiveType::Object.accepts(&Value::from(json!({"a": 1}))));
        assert!(!PrimitiveType::String.accepts(&Value::Null));
    }
}
