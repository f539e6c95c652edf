//! Runtime-typed, homogeneous collections.
//!
//! A collection is created from a type designator, either a primitive kind
//! (`int`, `float`, `bool`, `string`, `array`, `object` and their aliases) or
//! the name of a class/interface known to a [`Reflector`], and rejects every
//! value that does not conform to it.
//!
//! ```
//! use typed_collection::{Collection, Value};
//!
//! let mut c = Collection::new("int", [3, 1, 2]).unwrap();
//! assert!(c.push_element("four").is_err());
//! let sorted = c.sort_by(|a, b| a.as_i64().cmp(&b.as_i64())).unwrap();
//! assert_eq!(sorted.to_array(), vec![Value::from(1), Value::from(2), Value::from(3)]);
//! ```
pub mod collection;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod iter;
pub mod reflect;
pub mod value;

pub use collection::Collection;
pub use collection::transform::Predicate;
pub use descriptor::{NominalType, PrimitiveType, TypeDescriptor};
pub use error::{Error, Result};
pub use factory::TypeFactory;
pub use iter::CollectionIterator;
pub use reflect::{ClassRegistry, Manifest, Reflector, TypeDecl, TypeKind};
pub use value::{Instance, TypeMetadata, Value};
