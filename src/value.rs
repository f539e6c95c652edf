//! Host values stored in collections.
//!
//! `Value` mirrors the shape of a JSON document plus one extra arm, `Instance`,
//! for values of nominal (class/interface) types. Classification onto the six
//! canonical primitive kinds lives here so descriptors and error rendering
//! agree on what "the type of a value" means.
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::{Map, Number};

use crate::descriptor::PrimitiveType;

/// Key marking a JSON object as a nominal instance, e.g. `{"$class": "App\\Dog"}`.
pub const CLASS_KEY: &str = "$class";

#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
    Instance(Rc<Instance>),
}

/// A value of a nominal type. Compared by reference, never by content.
#[derive(Debug)]
pub struct Instance {
    class: String,
    fields: IndexMap<String, Value>,
}

impl Instance {
    pub fn new(class: impl Into<String>) -> Self {
        let class = class.into();
        let class = match class.strip_prefix('\\') {
            Some(rest) => rest.to_string(),
            None => class,
        };
        Self { class, fields: IndexMap::new() }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    /// Wrap into a shareable value. Clones of the result stay identical.
    pub fn into_value(self) -> Value {
        Value::Instance(Rc::new(self))
    }
}

impl Value {
    /// The canonical primitive kind of this value; `None` for `Null`.
    pub fn primitive_kind(&self) -> Option<PrimitiveType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(PrimitiveType::Boolean),
            Value::Integer(_) => Some(PrimitiveType::Integer),
            Value::Float(_) => Some(PrimitiveType::Float),
            Value::String(_) => Some(PrimitiveType::String),
            Value::Array(_) => Some(PrimitiveType::Array),
            Value::Object(_) | Value::Instance(_) => Some(PrimitiveType::Object),
        }
    }

    /// Name of the actual type: the class for instances, the canonical kind otherwise.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Instance(instance) => instance.class_name(),
            other => other.primitive_kind().map_or("null", PrimitiveType::as_str),
        }
    }

    pub fn is_instance(&self) -> bool {
        matches!(self, Value::Instance(_))
    }

    pub fn as_instance(&self) -> Option<&Rc<Instance>> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Strict identity: scalars by value, containers element-wise in order,
    /// instances by reference.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.is_identical(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.is_identical(vb))
            }
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Decode JSON, turning objects that carry a string `$class` key into instances.
    pub fn from_json_tagged(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Array(xs) => {
                Value::Array(xs.into_iter().map(Value::from_json_tagged).collect())
            }
            serde_json::Value::Object(mut map) => match map.shift_remove(CLASS_KEY) {
                Some(serde_json::Value::String(class)) => {
                    let mut instance = Instance::new(class);
                    for (k, v) in map {
                        instance.fields.insert(k, Value::from_json_tagged(v));
                    }
                    instance.into_value()
                }
                Some(other) => {
                    // not a class tag; keep the key as ordinary data
                    let mut out = IndexMap::with_capacity(map.len() + 1);
                    out.insert(CLASS_KEY.to_string(), Value::from(other));
                    for (k, v) in map {
                        out.insert(k, Value::from_json_tagged(v));
                    }
                    Value::Object(out)
                }
                None => Value::Object(
                    map.into_iter()
                        .map(|(k, v)| (k, Value::from_json_tagged(v)))
                        .collect(),
                ),
            },
            other => Value::from(other),
        }
    }

    /// Render as JSON. Instances become objects tagged with `$class`;
    /// non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Float(f) => Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(xs) => serde_json::Value::Array(xs.iter().map(Value::to_json).collect()),
            Value::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Value::Instance(instance) => {
                let mut out = Map::new();
                out.insert(CLASS_KEY.into(), serde_json::Value::from(instance.class_name()));
                for (k, v) in instance.fields() {
                    out.insert(k.clone(), v.to_json());
                }
                serde_json::Value::Object(out)
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.is_identical(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONVERSIONS
// ————————————————————————————————————————————————————————————————————————————

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(xs) => Value::Array(xs.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(i: $t) -> Self { Value::Integer(i64::from(i)) }
        })*
    };
}
from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(xs: Vec<Value>) -> Self {
        Value::Array(xs)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        instance.into_value()
    }
}

impl From<Rc<Instance>> for Value {
    fn from(instance: Rc<Instance>) -> Self {
        Value::Instance(instance)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// METADATA
// ————————————————————————————————————————————————————————————————————————————

/// What a value is, as seen from outside: a primitive kind or a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMetadata {
    is_primitive: bool,
    type_name: String,
}

impl TypeMetadata {
    pub fn of(value: &Value) -> Self {
        Self {
            is_primitive: !value.is_instance(),
            type_name: value.type_name().to_string(),
        }
    }

    pub fn is_primitive_type(&self) -> bool {
        self.is_primitive
    }

    pub fn is_class_type(&self) -> bool {
        !self.is_primitive
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl fmt::Display for TypeMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name)
    }
}
