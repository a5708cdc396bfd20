//! Stage state machine shared by the fused filter/project stages.
//!
//! A stage is an immutable operator configuration plus the state of at most
//! one live traversal. Requesting a traversal either claims the stage itself
//! (fresh, and on the thread that built it) or hands out a duplicate carrying
//! the same configuration. Either way a physical stage instance never has two
//! live cursors.
//!
//! State tags: `Fresh` (0), `Started` (1), `Running` (2), `Done` (-1).

use std::thread::{self, ThreadId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum StageState {
    Fresh = 0,
    Started = 1,
    Running = 2,
    Done = -1,
}

/// State tag plus the thread that created the stage.
#[derive(Debug)]
pub struct StageHeader {
    state: StageState,
    owner: ThreadId,
}

impl StageHeader {
    pub fn new() -> Self {
        Self {
            state: StageState::Fresh,
            owner: thread::current().id(),
        }
    }

    pub fn state(&self) -> StageState {
        self.state
    }

    pub fn set_state(&mut self, state: StageState) {
        self.state = state;
    }

    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    /// Take the single-traversal fast path: succeeds only for a fresh stage on
    /// its owning thread, moving it to `Started`.
    pub fn claim(&mut self) -> bool {
        if self.state == StageState::Fresh && self.owner == thread::current().id() {
            self.state = StageState::Started;
            true
        } else {
            false
        }
    }
}

impl Default for StageHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StageHeader {
    /// A clone is a new stage: fresh, owned by the cloning thread.
    fn clone(&self) -> Self {
        Self::new()
    }
}

/// Per-traversal state. Never survives a clone, so cloning a stage copies its
/// configuration only.
#[derive(Debug)]
pub struct Live<T>(Option<T>);

impl<T> Live<T> {
    pub fn new() -> Self {
        Live(None)
    }

    pub fn set(&mut self, value: T) {
        self.0 = Some(value);
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.0.as_mut()
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

impl<T> Default for Live<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Live<T> {
    fn clone(&self) -> Self {
        Live(None)
    }
}

pub trait Stage: Sized + Clone {
    type Item;

    fn header(&self) -> &StageHeader;
    fn header_mut(&mut self) -> &mut StageHeader;

    /// Produce the next element. `Started` opens the upstream traversal and
    /// moves to `Running`; exhaustion disposes the stage.
    fn advance(&mut self) -> Option<Self::Item>;

    /// Drop upstream cursors and any held value.
    fn release(&mut self);

    /// Idempotent: release resources and move to `Done`.
    fn dispose(&mut self) {
        if self.header().state() != StageState::Done {
            self.release();
            self.header_mut().set_state(StageState::Done);
        }
    }

    /// Same configuration, already `Started`.
    fn started_duplicate(&self) -> Self {
        let mut dup = self.clone();
        dup.header_mut().set_state(StageState::Started);
        dup
    }

    /// By-value traversal: reuse `self` when it can be claimed.
    fn start(mut self) -> Cursor<Self> {
        if self.header_mut().claim() {
            return Cursor { stage: self };
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(stage = std::any::type_name::<Self>(), "stage busy, duplicating");
        Cursor {
            stage: self.started_duplicate(),
        }
    }

    /// In-place traversal: the first traversal of a fresh stage runs on the
    /// stage itself; any later or foreign-thread request gets a duplicate.
    fn traverse(&mut self) -> Traversal<'_, Self> {
        if self.header_mut().claim() {
            return Traversal::Reused(self);
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(stage = std::any::type_name::<Self>(), "stage busy, duplicating");
        Traversal::Duplicated(Cursor {
            stage: self.started_duplicate(),
        })
    }
}

/// Owning cursor over a stage. Dropping it disposes the stage.
pub struct Cursor<S: Stage> {
    stage: S,
}

impl<S: Stage> Cursor<S> {
    /// Cursor over a duplicate of `stage`; the original is left untouched.
    pub fn duplicate_of(stage: &S) -> Self {
        Self {
            stage: stage.started_duplicate(),
        }
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }
}

impl<S: Stage> Iterator for Cursor<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        match self.stage.header().state() {
            StageState::Started | StageState::Running => self.stage.advance(),
            StageState::Fresh | StageState::Done => None,
        }
    }
}

impl<S: Stage> Drop for Cursor<S> {
    fn drop(&mut self) {
        self.stage.dispose();
    }
}

/// Result of [`Stage::traverse`].
pub enum Traversal<'a, S: Stage> {
    Reused(&'a mut S),
    Duplicated(Cursor<S>),
}

impl<S: Stage> Traversal<'_, S> {
    pub fn is_reused(&self) -> bool {
        matches!(self, Traversal::Reused(_))
    }
}

impl<S: Stage> Iterator for Traversal<'_, S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        match self {
            Traversal::Reused(stage) => match stage.header().state() {
                StageState::Started | StageState::Running => stage.advance(),
                StageState::Fresh | StageState::Done => None,
            },
            Traversal::Duplicated(cursor) => cursor.next(),
        }
    }
}

impl<S: Stage> Drop for Traversal<'_, S> {
    fn drop(&mut self) {
        if let Traversal::Reused(stage) = self {
            stage.dispose();
        }
    }
}

/// Sequences whose traversal must first build something (a lookup, a sorted
/// buffer) implement this; [`Deferred`] runs it on the first `next`.
pub trait Materialize {
    type Iter: Iterator;

    fn materialize(self) -> Self::Iter;
}

pub struct Deferred<M: Materialize> {
    pending: Option<M>,
    iter: Option<M::Iter>,
}

impl<M: Materialize> Deferred<M> {
    pub fn new(pending: M) -> Self {
        Self {
            pending: Some(pending),
            iter: None,
        }
    }
}

impl<M: Materialize> Iterator for Deferred<M> {
    type Item = <M::Iter as Iterator>::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(pending) = self.pending.take() {
            self.iter = Some(pending.materialize());
        }
        let item = self.iter.as_mut()?.next();
        if item.is_none() {
            self.iter = None;
        }
        item
    }
}
