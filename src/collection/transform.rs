//! Non-mutating operations: each returns a new collection (or a plain
//! answer) and leaves the receiver untouched.
use std::cmp::Ordering;

use super::Collection;
use crate::error::{Error, Result};
use crate::value::Value;

/// Predicate used by [`Collection::group`]: `(element, index) -> bool`.
pub type Predicate<'p> = &'p dyn Fn(&Value, usize) -> bool;

impl Collection {
    /// Map into a new collection of `designator`; every mapped value is validated.
    pub fn map<F, V>(&self, designator: &str, mut mapper: F) -> Result<Collection>
    where
        F: FnMut(&Value, usize) -> V,
        V: Into<Value>,
    {
        let descriptor = self.types.resolve(designator)?;
        let mapped: Vec<Value> = self
            .elements
            .iter()
            .enumerate()
            .map(|(index, element)| mapper(element, index).into())
            .collect();
        Collection::with_descriptor(self.types.clone(), descriptor, mapped)
    }

    /// Like [`Collection::map`], but each call may yield zero or more values
    /// (return `[v]`/`Some(v)` for a single one); they are spliced in order.
    pub fn flat_map<F, I>(&self, designator: &str, mut mapper: F) -> Result<Collection>
    where
        F: FnMut(&Value, usize) -> I,
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let descriptor = self.types.resolve(designator)?;
        let mut spliced = Vec::with_capacity(self.elements.len());
        for (index, element) in self.elements.iter().enumerate() {
            spliced.extend(mapper(element, index).into_iter().map(Into::into));
        }
        Collection::with_descriptor(self.types.clone(), descriptor, spliced)
    }

    pub fn filter<F>(&self, mut predicate: F) -> Result<Collection>
    where
        F: FnMut(&Value, usize) -> bool,
    {
        let kept = self
            .elements
            .iter()
            .enumerate()
            .filter(|(index, element)| predicate(element, *index))
            .map(|(_, element)| element.clone());
        self.derive(kept)
    }

    /// Stable sort: elements comparing `Equal` keep their relative order.
    pub fn sort_by<F>(&self, comparator: F) -> Result<Collection>
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let mut sorted = self.to_array();
        sorted.sort_by(comparator);
        self.derive(sorted)
    }

    /// Split into `predicates.len() + 1` buckets. Each element lands in the
    /// bucket of the first predicate it satisfies, or in the last bucket.
    pub fn group(&self, predicates: &[Predicate<'_>]) -> Result<Vec<Collection>> {
        if predicates.is_empty() {
            return Err(Error::argument("group needs at least one predicate"));
        }
        let n = predicates.len();
        self.bucketize(n + 1, |element, index| {
            predicates
                .iter()
                .position(|predicate| predicate(element, index))
                .unwrap_or(n)
        })?
        .into_iter()
        .map(|bucket| self.derive(bucket))
        .collect()
    }

    /// `(matched, unmatched)`; the two buckets of `group(&[predicate])`.
    pub fn partition<F>(&self, mut predicate: F) -> Result<(Collection, Collection)>
    where
        F: FnMut(&Value, usize) -> bool,
    {
        let mut buckets = self.bucketize(2, |element, index| {
            if predicate(element, index) { 0 } else { 1 }
        })?;
        let unmatched = buckets.pop().unwrap_or_default();
        let matched = buckets.pop().unwrap_or_default();
        Ok((self.derive(matched)?, self.derive(unmatched)?))
    }

    fn bucketize<F>(&self, buckets: usize, mut classify: F) -> Result<Vec<Vec<Value>>>
    where
        F: FnMut(&Value, usize) -> usize,
    {
        let mut out = vec![Vec::new(); buckets];
        for (index, element) in self.elements.iter().enumerate() {
            let bucket = classify(element, index);
            out.get_mut(bucket)
                .ok_or_else(|| Error::argument(format!("bucket {bucket} out of range")))?
                .push(element.clone());
        }
        Ok(out)
    }

    /// Slice with `array_slice`-style offsets: a negative `offset` counts from
    /// the end, a negative `length` stops that many elements before the end,
    /// `None` runs to the end. Out-of-range values clamp.
    pub fn slice(&self, offset: isize, length: Option<isize>) -> Result<Collection> {
        let (start, end) = slice_bounds(self.elements.len(), offset, length);
        self.derive(self.elements.range(start..end).cloned())
    }

    pub fn reverse(&self) -> Result<Collection> {
        self.derive(self.elements.iter().rev().cloned())
    }

    /// Everything but the first `n` elements.
    pub fn drop(&self, n: usize) -> Result<Collection> {
        ensure_positive("drop", n)?;
        self.derive(self.elements.iter().skip(n).cloned())
    }

    /// Everything but the last `n` elements.
    pub fn drop_right(&self, n: usize) -> Result<Collection> {
        ensure_positive("drop_right", n)?;
        let keep = self.elements.len().saturating_sub(n);
        self.derive(self.elements.iter().take(keep).cloned())
    }

    pub fn take(&self, n: usize) -> Result<Collection> {
        ensure_positive("take", n)?;
        self.derive(self.elements.iter().take(n).cloned())
    }

    /// Drop the longest prefix satisfying `predicate`.
    pub fn drop_while<F>(&self, mut predicate: F) -> Result<Collection>
    where
        F: FnMut(&Value) -> bool,
    {
        self.derive(self.elements.iter().skip_while(|element| predicate(element)).cloned())
    }

    /// Keep the longest prefix satisfying `predicate`.
    pub fn take_while<F>(&self, mut predicate: F) -> Result<Collection>
    where
        F: FnMut(&Value) -> bool,
    {
        self.derive(self.elements.iter().take_while(|element| predicate(element)).cloned())
    }

    // ——— queries ———

    pub fn all<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value, usize) -> bool,
    {
        self.elements.iter().enumerate().all(|(index, element)| predicate(element, index))
    }

    pub fn some<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value, usize) -> bool,
    {
        self.elements.iter().enumerate().any(|(index, element)| predicate(element, index))
    }

    pub fn none<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&Value, usize) -> bool,
    {
        !self.some(predicate)
    }

    pub fn find<F>(&self, mut predicate: F) -> Option<&Value>
    where
        F: FnMut(&Value, usize) -> bool,
    {
        self.elements
            .iter()
            .enumerate()
            .find(|(index, element)| predicate(element, *index))
            .map(|(_, element)| element)
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Value, usize),
    {
        for (index, element) in self.elements.iter().enumerate() {
            f(element, index);
        }
    }

    pub fn fold_left<A, F>(&self, initial: A, mut f: F) -> A
    where
        F: FnMut(A, &Value, usize) -> A,
    {
        self.elements
            .iter()
            .enumerate()
            .fold(initial, |acc, (index, element)| f(acc, element, index))
    }

    /// Right-to-left; `f` still receives each element's original index.
    pub fn fold_right<A, F>(&self, initial: A, mut f: F) -> A
    where
        F: FnMut(A, &Value, usize) -> A,
    {
        self.elements
            .iter()
            .enumerate()
            .rev()
            .fold(initial, |acc, (index, element)| f(acc, element, index))
    }
}

fn ensure_positive(operation: &str, n: usize) -> Result<()> {
    if n == 0 {
        return Err(Error::argument(format!("{operation} expects a positive count, got 0")));
    }
    Ok(())
}

/// Resolve slice arguments against `len` into a clamped `start..end`.
fn slice_bounds(len: usize, offset: isize, length: Option<isize>) -> (usize, usize) {
    let len_i = len as isize;
    let start = if offset < 0 {
        (len_i + offset).max(0)
    } else {
        offset.min(len_i)
    };
    let end = match length {
        None => len_i,
        Some(l) if l < 0 => len_i + l,
        Some(l) => start.saturating_add(l).min(len_i),
    };
    let end = end.max(start);
    (start as usize, end as usize)
}
