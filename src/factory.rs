//! Designator string → [`TypeDescriptor`].
use std::fmt;
use std::rc::Rc;

use crate::descriptor::{NominalType, PrimitiveType, TypeDescriptor};
use crate::error::{Error, Result};
use crate::reflect::{ClassRegistry, Reflector};

/// Resolves designators against a fixed reflector. Primitive aliases always
/// win over nominal names.
#[derive(Clone)]
pub struct TypeFactory {
    reflector: Rc<dyn Reflector>,
}

impl TypeFactory {
    pub fn new(reflector: Rc<dyn Reflector>) -> Self {
        Self { reflector }
    }

    pub fn with_registry(registry: ClassRegistry) -> Self {
        Self::new(Rc::new(registry))
    }

    /// Knows no nominal types.
    pub fn primitives_only() -> Self {
        Self::with_registry(ClassRegistry::empty())
    }

    pub fn reflector(&self) -> &Rc<dyn Reflector> {
        &self.reflector
    }

    pub fn is_valid_designator(&self, designator: &str) -> bool {
        PrimitiveType::is_valid_designator(designator)
            || NominalType::is_valid_designator(designator, self.reflector.as_ref())
    }

    pub fn resolve(&self, designator: &str) -> Result<TypeDescriptor> {
        if let Some(kind) = PrimitiveType::parse(designator) {
            log::trace!("designator `{designator}` resolved to primitive `{kind}`");
            return Ok(kind.into());
        }
        match NominalType::new(designator, self.reflector.clone()) {
            Ok(ty) => {
                log::trace!("designator `{designator}` resolved to nominal `{ty}`");
                Ok(ty.into())
            }
            Err(err) if designator.is_empty() => Err(err),
            Err(_) => Err(Error::designator(
                designator,
                format!(
                    "not a valid primitive type ({}) and also not an existing class or interface",
                    PrimitiveType::valid_designators().join(", ")
                ),
            )),
        }
    }
}

impl Default for TypeFactory {
    fn default() -> Self {
        Self::primitives_only()
    }
}

impl fmt::Debug for TypeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeFactory").finish_non_exhaustive()
    }
}
