//! Resolved, immutable runtime types.
//!
//! A [`TypeDescriptor`] is either a primitive kind or a nominal type. It
//! answers three questions:
//! - does a value conform (`is_valid` / `validate`)
//! - is another descriptor the very same type (`is_equal_exact`)
//! - can a collection of another descriptor be poured into this one (`matches`)
pub mod nominal;
pub mod primitive;

use std::fmt;

pub use nominal::NominalType;
pub use primitive::PrimitiveType;

use crate::error::{Error, Result};
use crate::value::Value;

#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    Primitive(PrimitiveType),
    Nominal(NominalType),
}

impl TypeDescriptor {
    /// The canonical designator (`integer`, `App\Dog`, ...).
    pub fn designator(&self) -> &str {
        match self {
            TypeDescriptor::Primitive(kind) => kind.as_str(),
            TypeDescriptor::Nominal(ty) => ty.name(),
        }
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self, TypeDescriptor::Nominal(_))
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        match self {
            TypeDescriptor::Primitive(kind) => kind.accepts(value),
            TypeDescriptor::Nominal(ty) => ty.accepts(value),
        }
    }

    pub fn validate(&self, value: &Value) -> Result<()> {
        if self.is_valid(value) {
            return Ok(());
        }
        Err(Error::ElementType {
            expected: self.designator().to_string(),
            expected_nominal: self.is_nominal(),
            actual: value.type_name().to_string(),
            actual_nominal: value.is_instance(),
        })
    }

    /// Same variant and same canonical name. No subtyping.
    pub fn is_equal_exact(&self, other: &TypeDescriptor) -> bool {
        match (self, other) {
            (TypeDescriptor::Primitive(a), TypeDescriptor::Primitive(b)) => a == b,
            (TypeDescriptor::Nominal(a), TypeDescriptor::Nominal(b)) => a.name() == b.name(),
            _ => false,
        }
    }

    /// Whether `other` is assignable to `self`. Primitives match exactly;
    /// nominal types accept themselves and their subtypes.
    pub fn matches(&self, other: &TypeDescriptor) -> bool {
        match (self, other) {
            (TypeDescriptor::Nominal(a), TypeDescriptor::Nominal(b)) => a.is_assignable_from(b),
            _ => self.is_equal_exact(other),
        }
    }
}

impl From<PrimitiveType> for TypeDescriptor {
    fn from(kind: PrimitiveType) -> Self {
        TypeDescriptor::Primitive(kind)
    }
}

impl From<NominalType> for TypeDescriptor {
    fn from(ty: NominalType) -> Self {
        TypeDescriptor::Nominal(ty)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.designator())
    }
}
