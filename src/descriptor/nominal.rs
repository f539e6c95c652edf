use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::reflect::{self, Reflector};
use crate::value::Value;

/// A class or interface type, checked through the injected [`Reflector`].
#[derive(Clone)]
pub struct NominalType {
    name: String,
    reflector: Rc<dyn Reflector>,
}

impl NominalType {
    pub fn new(designator: &str, reflector: Rc<dyn Reflector>) -> Result<Self> {
        if designator.is_empty() {
            return Err(Error::designator(designator, "value can not be empty"));
        }
        let name = normalize(designator);
        if !reflect::is_type_name(name) || !reflector.type_exists(name) {
            return Err(Error::designator(
                designator,
                "value must be an existing class or interface",
            ));
        }
        Ok(Self { name: name.to_string(), reflector })
    }

    pub fn is_valid_designator(designator: &str, reflector: &dyn Reflector) -> bool {
        let name = normalize(designator);
        reflect::is_type_name(name) && reflector.type_exists(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accepts(&self, value: &Value) -> bool {
        self.reflector.is_instance_of(value, &self.name)
    }

    /// True when `other` is this type or one of its subtypes/implementors.
    pub fn is_assignable_from(&self, other: &NominalType) -> bool {
        self.reflector.is_subtype(&other.name, &self.name)
    }
}

fn normalize(designator: &str) -> &str {
    designator.strip_prefix('\\').unwrap_or(designator)
}

impl fmt::Debug for NominalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NominalType").field(&self.name).finish()
    }
}

impl fmt::Display for NominalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
