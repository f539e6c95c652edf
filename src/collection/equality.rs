use super::Collection;
use crate::value::Value;

impl Collection {
    /// [`Collection::is_equal_collection_by`] with strict identity as the predicate.
    pub fn is_equal_collection(&self, other: &Collection, strict: bool) -> bool {
        self.is_equal_collection_by(other, Value::is_identical, strict)
    }

    /// Compare contents. Types must be exactly equal and counts the same,
    /// otherwise the predicate is never called.
    ///
    /// With `strict` the elements are compared pairwise by position. Without
    /// it every element of `self` must find a distinct, not yet matched
    /// partner in `other`.
    pub fn is_equal_collection_by<F>(&self, other: &Collection, mut predicate: F, strict: bool) -> bool
    where
        F: FnMut(&Value, &Value) -> bool,
    {
        if !self.is_equal_type(other) || self.count() != other.count() {
            return false;
        }
        if self.is_empty() {
            return true;
        }
        if strict {
            return self.elements.iter().zip(&other.elements).all(|(a, b)| predicate(a, b));
        }

        let mut unmatched: Vec<&Value> = other.elements.iter().collect();
        for element in &self.elements {
            match unmatched.iter().position(|candidate| predicate(element, candidate)) {
                Some(index) => {
                    unmatched.swap_remove(index);
                }
                None => return false,
            }
        }
        true
    }
}
