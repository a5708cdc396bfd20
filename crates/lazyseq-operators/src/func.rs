//! Callable building blocks stages are generic over.
//!
//! Closures implement these through blanket impls; the named combinators
//! ([`And`], [`Compose`], [`Always`], [`Identity`]) are what fusion produces.

/// Element filter.
pub trait Predicate<T> {
    fn test(&self, item: &T) -> bool;

    /// True when `test` accepts every element, so counts pass through.
    fn accepts_all(&self) -> bool {
        false
    }
}

impl<T, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    fn test(&self, item: &T) -> bool {
        self(item)
    }
}

/// Absent predicate: accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Always;

impl<T> Predicate<T> for Always {
    fn test(&self, _item: &T) -> bool {
        true
    }

    fn accepts_all(&self) -> bool {
        true
    }
}

/// Two fused filters.
#[derive(Debug, Clone, Copy)]
pub struct And<P, Q>(pub P, pub Q);

impl<T, P: Predicate<T>, Q: Predicate<T>> Predicate<T> for And<P, Q> {
    fn test(&self, item: &T) -> bool {
        self.0.test(item) && self.1.test(item)
    }
}

/// Element projection.
pub trait Selector<T> {
    type Output;

    fn select(&self, item: T) -> Self::Output;
}

impl<T, R, F> Selector<T> for F
where
    F: Fn(T) -> R,
{
    type Output = R;

    fn select(&self, item: T) -> R {
        self(item)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T> Selector<T> for Identity {
    type Output = T;

    fn select(&self, item: T) -> T {
        item
    }
}

/// `second(first(x))`: two fused projections.
#[derive(Debug, Clone, Copy)]
pub struct Compose<F, G>(pub F, pub G);

impl<T, F, G> Selector<T> for Compose<F, G>
where
    F: Selector<T>,
    G: Selector<F::Output>,
{
    type Output = G::Output;

    fn select(&self, item: T) -> G::Output {
        self.1.select(self.0.select(item))
    }
}

/// Predicate that may look at the element's position.
pub trait IndexedPredicate<T> {
    fn test_at(&self, item: &T, index: usize) -> bool;
}

/// Ignores the index.
#[derive(Debug, Clone, Copy)]
pub struct Plain<F>(pub F);

/// Receives the index.
#[derive(Debug, Clone, Copy)]
pub struct Indexed<F>(pub F);

impl<T, F: Fn(&T) -> bool> IndexedPredicate<T> for Plain<F> {
    fn test_at(&self, item: &T, _index: usize) -> bool {
        (self.0)(item)
    }
}

impl<T, F: Fn(&T, usize) -> bool> IndexedPredicate<T> for Indexed<F> {
    fn test_at(&self, item: &T, index: usize) -> bool {
        (self.0)(item, index)
    }
}

/// Produces the inner collection for one outer element of `flat_map`.
pub trait CollectionSelector<T> {
    type Collection: IntoIterator;

    fn collection(&self, item: &T, index: usize) -> Self::Collection;
}

impl<T, I: IntoIterator, F: Fn(&T) -> I> CollectionSelector<T> for Plain<F> {
    type Collection = I;

    fn collection(&self, item: &T, _index: usize) -> I {
        (self.0)(item)
    }
}

impl<T, I: IntoIterator, F: Fn(&T, usize) -> I> CollectionSelector<T> for Indexed<F> {
    type Collection = I;

    fn collection(&self, item: &T, index: usize) -> I {
        (self.0)(item, index)
    }
}

/// Combines an outer element with one of its inner elements.
pub trait ResultSelector<T, U> {
    type Output;

    fn combine(&self, outer: &T, inner: U) -> Self::Output;
}

/// Yields the inner element unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct InnerOnly;

impl<T, U> ResultSelector<T, U> for InnerOnly {
    type Output = U;

    fn combine(&self, _outer: &T, inner: U) -> U {
        inner
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Combine<F>(pub F);

impl<T, U, R, F: Fn(&T, U) -> R> ResultSelector<T, U> for Combine<F> {
    type Output = R;

    fn combine(&self, outer: &T, inner: U) -> R {
        (self.0)(outer, inner)
    }
}

/// Checked position counter for the `*_indexed` operators.
pub(crate) fn bump(index: &mut usize) -> usize {
    let current = *index;
    *index = match current.checked_add(1) {
        Some(next) => next,
        None => panic!("{}", lazyseq_core::Error::Overflow("element index")),
    };
    current
}
