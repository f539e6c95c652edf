//! Nominal type reflection.
//!
//! Collections never track a class hierarchy themselves; they ask a
//! [`Reflector`]. [`ClassRegistry`] is the in-memory implementation used by
//! default and by the CLI (loaded from a JSON manifest).
use std::collections::HashSet;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::value::Value;

static TYPE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\\[A-Za-z_][A-Za-z0-9_]*)*$").expect("static regex")
});

/// `Name` or `Namespace\Name`, without a leading separator.
pub fn is_type_name(name: &str) -> bool {
    TYPE_NAME.is_match(name)
}

/// The host capability answering "does this type exist" and "is A a B".
pub trait Reflector {
    fn type_exists(&self, name: &str) -> bool;

    /// Reflexive: every existing type is a subtype of itself.
    fn is_subtype(&self, name: &str, ancestor: &str) -> bool;

    fn is_instance_of(&self, value: &Value, name: &str) -> bool {
        match value {
            Value::Instance(instance) => self.is_subtype(instance.class_name(), name),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Abstract,
    Interface,
}

/// One declared type and the types it directly extends or implements.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub extends: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    types: IndexMap<String, TypeDecl>,
}

impl ClassRegistry {
    /// A registry that knows no types; only primitive designators resolve against it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Declare a type. Parents must already be declared; interfaces may only
    /// extend interfaces and a class has at most one non-interface parent.
    pub fn declare(&mut self, decl: TypeDecl) -> Result<()> {
        let name = decl.name.strip_prefix('\\').unwrap_or(&decl.name).to_string();
        if !is_type_name(&name) {
            return Err(Error::Registry(format!("invalid type name `{}`", decl.name)));
        }
        if self.types.contains_key(&name) {
            return Err(Error::Registry(format!("type `{name}` is already declared")));
        }

        let mut extends = Vec::with_capacity(decl.extends.len());
        let mut class_parents = 0;
        for parent in &decl.extends {
            let parent = parent.strip_prefix('\\').unwrap_or(parent);
            let Some(parent_decl) = self.types.get(parent) else {
                return Err(Error::Registry(format!(
                    "type `{name}` extends unknown type `{parent}` (declare parents first)"
                )));
            };
            match (decl.kind, parent_decl.kind) {
                (TypeKind::Interface, TypeKind::Interface) => {}
                (TypeKind::Interface, _) => {
                    return Err(Error::Registry(format!(
                        "interface `{name}` can only extend interfaces, `{parent}` is not one"
                    )));
                }
                (_, TypeKind::Interface) => {}
                _ => class_parents += 1,
            }
            extends.push(parent.to_string());
        }
        if class_parents > 1 {
            return Err(Error::Registry(format!("class `{name}` extends more than one class")));
        }

        log::trace!("declared {:?} `{name}` extending {extends:?}", decl.kind);
        self.types.insert(name.clone(), TypeDecl { name, kind: decl.kind, extends });
        Ok(())
    }

    pub fn class(&mut self, name: &str, extends: &[&str]) -> Result<()> {
        self.declare_kind(name, TypeKind::Class, extends)
    }

    pub fn abstract_class(&mut self, name: &str, extends: &[&str]) -> Result<()> {
        self.declare_kind(name, TypeKind::Abstract, extends)
    }

    pub fn interface(&mut self, name: &str, extends: &[&str]) -> Result<()> {
        self.declare_kind(name, TypeKind::Interface, extends)
    }

    fn declare_kind(&mut self, name: &str, kind: TypeKind, extends: &[&str]) -> Result<()> {
        self.declare(TypeDecl {
            name: name.to_string(),
            kind,
            extends: extends.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn kind_of(&self, name: &str) -> Option<TypeKind> {
        self.types.get(name).map(|decl| decl.kind)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Build a registry from a JSON manifest; declarations apply in order.
    pub fn from_manifest_str(src: &str) -> Result<Self> {
        let de = &mut serde_json::Deserializer::from_str(src);
        let manifest: Manifest = serde_path_to_error::deserialize(de).map_err(|err| {
            let path = err.path().to_string();
            Error::Registry(format!("manifest at JSON path {path}: {}", err.into_inner()))
        })?;
        Self::from_manifest(manifest)
    }

    pub fn from_manifest(manifest: Manifest) -> Result<Self> {
        let mut registry = Self::empty();
        for decl in manifest.types {
            registry.declare(decl)?;
        }
        Ok(registry)
    }
}

impl Reflector for ClassRegistry {
    fn type_exists(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    fn is_subtype(&self, name: &str, ancestor: &str) -> bool {
        if !self.types.contains_key(name) {
            return false;
        }
        let mut seen = HashSet::new();
        let mut stack = vec![name];
        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(decl) = self.types.get(current) {
                stack.extend(decl.extends.iter().map(String::as_str));
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Instance;

    #[test]
    fn type_names_allow_namespaces() {
        assert!(is_type_name("Dog"));
        assert!(is_type_name("App\\Model\\Dog_2"));
        assert!(!is_type_name("\\Dog"));
        assert!(!is_type_name("2Dog"));
        assert!(!is_type_name("App\\"));
        assert!(!is_type_name(""));
    }

    #[test]
    fn subtyping_is_transitive_and_reflexive() {
        let mut registry = ClassRegistry::empty();
        registry.interface("Named", &[]).unwrap();
        registry.interface("Pet", &["Named"]).unwrap();
        registry.abstract_class("Animal", &[]).unwrap();
        registry.class("Dog", &["Animal", "Pet"]).unwrap();

        assert!(registry.is_subtype("Dog", "Dog"));
        assert!(registry.is_subtype("Dog", "Animal"));
        assert!(registry.is_subtype("Dog", "Named"));
        assert!(!registry.is_subtype("Animal", "Dog"));
        assert!(!registry.is_subtype("Cat", "Cat"));
        assert!(registry.is_instance_of(&Instance::new("Dog").into_value(), "Pet"));
        assert!(!registry.is_instance_of(&Value::from("Dog"), "Dog"));
    }

    #[test]
    fn declaration_rules_are_enforced() {
        let mut registry = ClassRegistry::empty();
        registry.class("A", &[]).unwrap();
        registry.class("B", &[]).unwrap();
        registry.interface("I", &[]).unwrap();

        assert!(matches!(registry.class("C", &["A", "B"]), Err(Error::Registry(_))));
        assert!(matches!(registry.interface("J", &["A"]), Err(Error::Registry(_))));
        assert!(matches!(registry.class("D", &["Missing"]), Err(Error::Registry(_))));
        assert!(matches!(registry.class("A", &[]), Err(Error::Registry(_))));
        assert!(matches!(registry.class("not valid", &[]), Err(Error::Registry(_))));
        registry.class("\\E", &["\\A", "I"]).unwrap();
        assert_eq!(registry.kind_of("E"), Some(TypeKind::Class));
    }

    #[test]
    fn manifest_loads_in_order_and_reports_paths() {
        let src = r#"{"types": [
            {"name": "Shape", "kind": "interface"},
            {"name": "Circle", "extends": ["Shape"]}
        ]}"#;
        let registry = ClassRegistry::from_manifest_str(src).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.is_subtype("Circle", "Shape"));
        assert_eq!(registry.kind_of("Circle"), Some(TypeKind::Class));

        let bad = r#"{"types": [{"name": "X", "kind": "struct"}]}"#;
        let err = ClassRegistry::from_manifest_str(bad).unwrap_err().to_string();
        assert!(err.starts_with("type registry: manifest at JSON path types[0].kind: "), "{err}");
    }
}
