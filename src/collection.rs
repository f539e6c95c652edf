//! The runtime-typed, homogeneous sequence.
//!
//! A [`Collection`] is bound to one [`TypeDescriptor`] at construction and
//! validates every value on its way in. Mutators (`push_*`, `unshift_*`,
//! `merge`, `clear`, ...) change the receiver; transformations (`map`,
//! `filter`, `slice`, ...) live in [`transform`] and always build a new
//! collection.
//!
//! Batch insertion is eager: `push_elements`/`unshift_elements` validate and
//! insert one value at a time, so a failing value leaves the values before it
//! in place.
pub mod equality;
pub mod transform;

use std::collections::VecDeque;
use std::collections::vec_deque;
use std::fmt;

use crate::descriptor::TypeDescriptor;
use crate::error::{Error, Result};
use crate::factory::TypeFactory;
use crate::iter::CollectionIterator;
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct Collection {
    descriptor: TypeDescriptor,
    elements: VecDeque<Value>,
    types: TypeFactory,
}

// ————————————————————————————————————————————————————————————————————————————
// CONSTRUCTION
// ————————————————————————————————————————————————————————————————————————————

impl Collection {
    /// Build a collection of a primitive designator. Nominal designators need
    /// a registry, see [`Collection::with_types`].
    pub fn new<I>(designator: &str, elements: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::with_types(&TypeFactory::default(), designator, elements)
    }

    pub fn empty(designator: &str) -> Result<Self> {
        Self::with_types(&TypeFactory::default(), designator, Vec::<Value>::new())
    }

    pub fn with_types<I>(types: &TypeFactory, designator: &str, elements: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let descriptor = types.resolve(designator)?;
        Self::with_descriptor(types.clone(), descriptor, elements)
    }

    pub fn with_descriptor<I>(types: TypeFactory, descriptor: TypeDescriptor, elements: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut out = Self { descriptor, elements: VecDeque::new(), types };
        out.push_elements(elements)?;
        Ok(out)
    }

    /// An empty collection sharing this one's type and registry.
    pub(crate) fn empty_like(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            elements: VecDeque::new(),
            types: self.types.clone(),
        }
    }

    /// A new collection of this type, re-validating `elements`.
    pub(crate) fn derive<I>(&self, elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut out = self.empty_like();
        out.push_elements(elements)?;
        Ok(out)
    }

    /// Concatenate at least two collections into a new one of `designator`.
    /// Every input must be assignable to that type (see
    /// [`TypeDescriptor::matches`]); the registry of the first input resolves
    /// the designator.
    pub fn create_from_collections<'a, I>(designator: &str, collections: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Collection>,
    {
        let collections: Vec<&Collection> = collections.into_iter().collect();
        let Some(first) = collections.first() else {
            return Err(Error::argument("an empty list of typed collections was passed"));
        };
        if collections.len() < 2 {
            return Err(Error::argument("at least 2 collections need to be passed"));
        }

        let mut out = Self::with_types(&first.types, designator, Vec::<Value>::new())?;
        log::debug!(
            "creating `{}` collection from {} collections",
            out.descriptor,
            collections.len()
        );
        out.merge(collections)?;
        Ok(out)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// MUTATORS
// ————————————————————————————————————————————————————————————————————————————

impl Collection {
    pub fn push_element(&mut self, element: impl Into<Value>) -> Result<()> {
        let element = element.into();
        self.descriptor.validate(&element)?;
        self.elements.push_back(element);
        Ok(())
    }

    pub fn unshift_element(&mut self, element: impl Into<Value>) -> Result<()> {
        let element = element.into();
        self.descriptor.validate(&element)?;
        self.elements.push_front(element);
        Ok(())
    }

    pub fn push_elements<I>(&mut self, elements: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        for element in elements {
            self.push_element(element)?;
        }
        Ok(())
    }

    /// Prepend a batch keeping its relative order. Insertion runs back to
    /// front, so on failure the tail of the batch after the offending value
    /// is already in place.
    pub fn unshift_elements<I>(&mut self, elements: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let batch: Vec<Value> = elements.into_iter().map(Into::into).collect();
        for element in batch.into_iter().rev() {
            self.unshift_element(element)?;
        }
        Ok(())
    }

    pub fn set_elements<I>(&mut self, elements: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.clear();
        self.push_elements(elements)
    }

    pub fn pop_element(&mut self) -> Option<Value> {
        self.elements.pop_back()
    }

    pub fn shift_element(&mut self) -> Option<Value> {
        self.elements.pop_front()
    }

    /// Remove the first element identical to `element`.
    pub fn remove_element(&mut self, element: &Value) -> Result<()> {
        match self.index_of_element(element)? {
            Some(index) => {
                self.elements.remove(index);
                Ok(())
            }
            None => Err(Error::ElementNotFound),
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Append every element of `others`, in order. All argument types are
    /// checked before anything is appended.
    pub fn merge<'a, I>(&mut self, others: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Collection>,
    {
        let others: Vec<&Collection> = others.into_iter().collect();
        if let Some(other) = others.iter().find(|other| !self.descriptor.matches(&other.descriptor)) {
            return Err(Error::CollectionTypeMismatch {
                expected: self.descriptor.designator().to_string(),
                actual: other.descriptor.designator().to_string(),
            });
        }
        for other in others {
            log::debug!(
                "merging {} `{}` elements into `{}` collection",
                other.count(),
                other.descriptor,
                self.descriptor
            );
            for element in &other.elements {
                self.push_element(element.clone())?;
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ACCESSORS
// ————————————————————————————————————————————————————————————————————————————

impl Collection {
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// The canonical designator of this collection's type.
    pub fn type_name(&self) -> &str {
        self.descriptor.designator()
    }

    pub fn types(&self) -> &TypeFactory {
        &self.types
    }

    pub fn is_equal_type(&self, other: &Collection) -> bool {
        self.descriptor.is_equal_exact(&other.descriptor)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_non_empty(&self) -> bool {
        !self.is_empty()
    }

    pub fn count(&self) -> usize {
        self.elements.len()
    }

    /// Strict-identity membership; the probe must conform to this type.
    pub fn has_element(&self, element: &Value) -> Result<bool> {
        Ok(self.index_of_element(element)?.is_some())
    }

    pub fn index_of_element(&self, element: &Value) -> Result<Option<usize>> {
        self.descriptor.validate(element)?;
        Ok(self.elements.iter().position(|x| x.is_identical(element)))
    }

    pub fn get_element_by_index(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    pub fn get_first_element(&self) -> Option<&Value> {
        self.elements.front()
    }

    pub fn get_last_element(&self) -> Option<&Value> {
        self.elements.back()
    }

    pub fn first_element_as_collection(&self) -> Result<Collection> {
        self.derive(self.get_first_element().cloned())
    }

    /// Snapshot of the current elements; later mutation doesn't show through.
    pub fn to_array(&self) -> Vec<Value> {
        self.elements.iter().cloned().collect()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, Value> {
        self.elements.iter()
    }

    pub fn get_iterator(&self) -> CollectionIterator {
        CollectionIterator::new(self.to_array())
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Value;
    type IntoIter = vec_deque::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Collection<{}>[{}]", self.descriptor, self.elements.len())
    }
}
