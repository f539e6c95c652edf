//! Read-only cursor over a collection snapshot.
use crate::error::{Error, Result};
use crate::value::Value;

/// A seekable cursor with positional reads. It owns a copy of the elements
/// taken when it was created; writes must go through [`crate::Collection`].
#[derive(Debug, Clone)]
pub struct CollectionIterator {
    elements: Vec<Value>,
    position: usize,
}

impl CollectionIterator {
    pub(crate) fn new(elements: Vec<Value>) -> Self {
        Self { elements, position: 0 }
    }

    pub fn current(&self) -> Option<&Value> {
        self.elements.get(self.position)
    }

    pub fn advance(&mut self) {
        if self.position < self.elements.len() {
            self.position += 1;
        }
    }

    /// Position of the cursor, `None` once past the end.
    pub fn key(&self) -> Option<usize> {
        self.valid().then_some(self.position)
    }

    pub fn valid(&self) -> bool {
        self.position < self.elements.len()
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position >= self.elements.len() {
            return Err(Error::argument(format!(
                "seek position {position} is out of range (count {})",
                self.elements.len()
            )));
        }
        self.position = position;
        Ok(())
    }

    pub fn offset_exists(&self, offset: usize) -> bool {
        offset < self.elements.len()
    }

    pub fn offset_get(&self, offset: usize) -> Option<&Value> {
        self.elements.get(offset)
    }

    pub fn offset_set(&mut self, _offset: usize, _value: Value) -> Result<()> {
        Err(Error::ReadOnly { operation: "offset_set", use_instead: "push_element" })
    }

    pub fn offset_unset(&mut self, _offset: usize) -> Result<()> {
        Err(Error::ReadOnly { operation: "offset_unset", use_instead: "remove_element" })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Iterator for CollectionIterator {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let out = self.current().cloned();
        self.advance();
        out
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.elements.len() - self.position;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for CollectionIterator {}
