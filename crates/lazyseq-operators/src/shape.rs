//! Shape-specialised upstream access for filter/project stages.
//!
//! The source's [`Shape`] is resolved once when the stage is built. Array and
//! list sources are then walked by index; anything else goes through its own
//! cursor.

use std::sync::Arc;

use lazyseq_core::source::SharedList;
use lazyseq_core::{Sequence, Shape};

use crate::traits::Live;

pub enum ShapeCursor<S: Sequence> {
    Array { items: Arc<[S::Item]>, index: usize },
    List { list: SharedList<S::Item>, index: usize },
    Generic(S::Cursor),
}

impl<S> Iterator for ShapeCursor<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        match self {
            ShapeCursor::Array { items, index } => {
                let item = items.get(*index)?.clone();
                *index += 1;
                Some(item)
            }
            // Length is re-read every step so pushes made mid-traversal show up.
            ShapeCursor::List { list, index } => {
                let item = list.get(*index)?;
                *index += 1;
                Some(item)
            }
            ShapeCursor::Generic(cursor) => cursor.next(),
        }
    }
}

/// A stage's upstream: the source, its resolved shape, and the live cursor.
pub struct Upstream<S: Sequence> {
    source: S,
    shape: Shape<S::Item>,
    live: Live<ShapeCursor<S>>,
}

impl<S: Sequence> Upstream<S> {
    pub fn new(source: S) -> Self {
        let shape = source.shape();
        Self {
            source,
            shape,
            live: Live::new(),
        }
    }

    /// Element count without traversing: read off the shape, else asked of
    /// the source.
    pub fn fast_count(&self) -> Option<usize> {
        self.shape.len().or_else(|| self.source.fast_count())
    }

    /// Open a fresh traversal matching the resolved shape.
    pub fn open(&mut self) {
        let cursor = match &self.shape {
            Shape::Array(items) => ShapeCursor::Array {
                items: Arc::clone(items),
                index: 0,
            },
            Shape::List(list) => ShapeCursor::List {
                list: list.clone(),
                index: 0,
            },
            Shape::Generic => ShapeCursor::Generic(self.source.cursor()),
        };
        self.live.set(cursor);
    }

    pub fn close(&mut self) {
        self.live.clear();
    }
}

impl<S> Upstream<S>
where
    S: Sequence,
    S::Item: Clone,
{
    /// Next upstream element, `None` once exhausted or closed.
    pub fn pull(&mut self) -> Option<S::Item> {
        self.live.get_mut()?.next()
    }
}

impl<S: Sequence> Clone for Upstream<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            shape: self.shape.clone(),
            live: Live::new(),
        }
    }
}
