//! The `Query` extension trait: every operator as a method on any [`Sequence`].
//!
//! Lazy operators consume the receiver and return a new stage; nothing runs
//! until that stage is traversed. Terminal operators drive one traversal and
//! return a value. Stages with fusion rules (`Where`, `WhereSelect`) and
//! `OrderedSequence` add inherent methods that take precedence over these.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use lazyseq_core::source::{ArraySource, SharedList};
use lazyseq_core::{Comparer, DefaultEquality, DefaultOrder, EqualityComparer, Result, Sequence};
use lazyseq_mem::{Lookup, Set};

use crate::combine::{Concat, DefaultIfEmpty, FlatMap, Reverse, Zip};
use crate::filter::{Where, WhereIndexed};
use crate::func::{Combine, Identity, Indexed, InnerOnly, Plain};
use crate::group::{GroupBy, GroupResult};
use crate::join::{GroupJoin, Join};
use crate::map::{Select, SelectIndexed};
use crate::partition::{Skip, SkipWhile, Take, TakeWhile};
use crate::set_ops::{Distinct, Except, Intersect, Union};
use crate::sort::{OrderedSequence, Primary};
use crate::terminal::numeric::{Averageable, Extremum, Summable};
use crate::terminal::{aggregate, convert, element};

pub trait Query: Sequence + Sized {
    // ----- filter / project -----

    fn filter<P>(self, predicate: P) -> Where<Self, P>
    where
        Self::Item: Clone,
        P: Fn(&Self::Item) -> bool + Clone,
    {
        Where::new(self, predicate)
    }

    /// The predicate also receives the element's position.
    fn filter_indexed<P>(self, predicate: P) -> WhereIndexed<Self, P>
    where
        P: Fn(&Self::Item, usize) -> bool + Clone,
    {
        WhereIndexed::new(self, predicate)
    }

    fn map<F, R>(self, selector: F) -> Select<Self, F>
    where
        Self::Item: Clone,
        F: Fn(Self::Item) -> R + Clone,
    {
        Select::new(self, selector)
    }

    fn map_indexed<F, R>(self, selector: F) -> SelectIndexed<Self, F>
    where
        F: Fn(Self::Item, usize) -> R + Clone,
    {
        SelectIndexed::new(self, selector)
    }

    fn flat_map<F, I>(self, selector: F) -> FlatMap<Self, Plain<F>, InnerOnly>
    where
        F: Fn(&Self::Item) -> I + Clone,
        I: IntoIterator,
    {
        FlatMap::new(self, Plain(selector), InnerOnly)
    }

    fn flat_map_indexed<F, I>(self, selector: F) -> FlatMap<Self, Indexed<F>, InnerOnly>
    where
        F: Fn(&Self::Item, usize) -> I + Clone,
        I: IntoIterator,
    {
        FlatMap::new(self, Indexed(selector), InnerOnly)
    }

    /// Flatten, combining each outer element with each of its inner ones.
    fn flat_map_with<F, I, G, R>(self, selector: F, result: G) -> FlatMap<Self, Plain<F>, Combine<G>>
    where
        F: Fn(&Self::Item) -> I + Clone,
        I: IntoIterator,
        G: Fn(&Self::Item, I::Item) -> R + Clone,
    {
        FlatMap::new(self, Plain(selector), Combine(result))
    }

    fn flat_map_indexed_with<F, I, G, R>(
        self,
        selector: F,
        result: G,
    ) -> FlatMap<Self, Indexed<F>, Combine<G>>
    where
        F: Fn(&Self::Item, usize) -> I + Clone,
        I: IntoIterator,
        G: Fn(&Self::Item, I::Item) -> R + Clone,
    {
        FlatMap::new(self, Indexed(selector), Combine(result))
    }

    // ----- partitioning -----

    fn take(self, count: isize) -> Take<Self> {
        Take::new(self, count)
    }

    fn skip(self, count: isize) -> Skip<Self> {
        Skip::new(self, count)
    }

    fn take_while<P>(self, predicate: P) -> TakeWhile<Self, Plain<P>>
    where
        P: Fn(&Self::Item) -> bool + Clone,
    {
        TakeWhile::new(self, Plain(predicate))
    }

    fn take_while_indexed<P>(self, predicate: P) -> TakeWhile<Self, Indexed<P>>
    where
        P: Fn(&Self::Item, usize) -> bool + Clone,
    {
        TakeWhile::new(self, Indexed(predicate))
    }

    fn skip_while<P>(self, predicate: P) -> SkipWhile<Self, Plain<P>>
    where
        P: Fn(&Self::Item) -> bool + Clone,
    {
        SkipWhile::new(self, Plain(predicate))
    }

    fn skip_while_indexed<P>(self, predicate: P) -> SkipWhile<Self, Indexed<P>>
    where
        P: Fn(&Self::Item, usize) -> bool + Clone,
    {
        SkipWhile::new(self, Indexed(predicate))
    }

    // ----- combining -----

    fn concat<B>(self, other: B) -> Concat<Self, B>
    where
        B: Sequence<Item = Self::Item>,
    {
        Concat::new(self, other)
    }

    fn zip<B, F, R>(self, other: B, combine: F) -> Zip<Self, B, F>
    where
        B: Sequence,
        F: Fn(Self::Item, B::Item) -> R + Clone,
    {
        Zip::new(self, other, combine)
    }

    fn reverse(self) -> Reverse<Self> {
        Reverse::new(self)
    }

    /// A single `Default` element in place of an empty sequence.
    fn default_if_empty(self) -> DefaultIfEmpty<Self, Self::Item>
    where
        Self::Item: Default + Clone,
    {
        DefaultIfEmpty::new(self, <Self::Item as Default>::default())
    }

    fn default_if_empty_or(self, value: Self::Item) -> DefaultIfEmpty<Self, Self::Item>
    where
        Self::Item: Clone,
    {
        DefaultIfEmpty::new(self, value)
    }

    // ----- set operators -----

    fn distinct(self) -> Distinct<Self, DefaultEquality>
    where
        Self::Item: Hash + Eq + Clone,
    {
        Distinct::new(self, DefaultEquality)
    }

    fn distinct_with<C>(self, comparer: C) -> Distinct<Self, C>
    where
        Self::Item: Clone,
        C: EqualityComparer<Self::Item>,
    {
        Distinct::new(self, comparer)
    }

    fn union<B>(self, other: B) -> Union<Self, B, DefaultEquality>
    where
        Self::Item: Hash + Eq + Clone,
        B: Sequence<Item = Self::Item>,
    {
        Union::new(self, other, DefaultEquality)
    }

    fn union_with<B, C>(self, other: B, comparer: C) -> Union<Self, B, C>
    where
        Self::Item: Clone,
        B: Sequence<Item = Self::Item>,
        C: EqualityComparer<Self::Item>,
    {
        Union::new(self, other, comparer)
    }

    fn intersect<B>(self, other: B) -> Intersect<Self, B, DefaultEquality>
    where
        Self::Item: Hash + Eq + Clone,
        B: Sequence<Item = Self::Item>,
    {
        Intersect::new(self, other, DefaultEquality)
    }

    fn intersect_with<B, C>(self, other: B, comparer: C) -> Intersect<Self, B, C>
    where
        Self::Item: Clone,
        B: Sequence<Item = Self::Item>,
        C: EqualityComparer<Self::Item>,
    {
        Intersect::new(self, other, comparer)
    }

    fn except<B>(self, other: B) -> Except<Self, B, DefaultEquality>
    where
        Self::Item: Hash + Eq + Clone,
        B: Sequence<Item = Self::Item>,
    {
        Except::new(self, other, DefaultEquality)
    }

    fn except_with<B, C>(self, other: B, comparer: C) -> Except<Self, B, C>
    where
        Self::Item: Clone,
        B: Sequence<Item = Self::Item>,
        C: EqualityComparer<Self::Item>,
    {
        Except::new(self, other, comparer)
    }

    // ----- ordering -----

    fn order_by<F, K>(self, key: F) -> OrderedSequence<Self, Primary<F, DefaultOrder>>
    where
        F: Fn(&Self::Item) -> K + Clone,
        K: Ord,
    {
        OrderedSequence::new(self, Primary::new(key, DefaultOrder, false))
    }

    fn order_by_descending<F, K>(self, key: F) -> OrderedSequence<Self, Primary<F, DefaultOrder>>
    where
        F: Fn(&Self::Item) -> K + Clone,
        K: Ord,
    {
        OrderedSequence::new(self, Primary::new(key, DefaultOrder, true))
    }

    fn order_by_with<F, K, C>(self, key: F, comparer: C) -> OrderedSequence<Self, Primary<F, C>>
    where
        F: Fn(&Self::Item) -> K + Clone,
        C: Comparer<K>,
    {
        OrderedSequence::new(self, Primary::new(key, comparer, false))
    }

    fn order_by_descending_with<F, K, C>(
        self,
        key: F,
        comparer: C,
    ) -> OrderedSequence<Self, Primary<F, C>>
    where
        F: Fn(&Self::Item) -> K + Clone,
        C: Comparer<K>,
    {
        OrderedSequence::new(self, Primary::new(key, comparer, true))
    }

    // ----- grouping and joins -----

    fn group_by<KF, K>(self, key: KF) -> GroupBy<Self, KF, Identity, DefaultEquality>
    where
        KF: Fn(&Self::Item) -> K + Clone,
        K: Hash + Eq + Clone,
    {
        GroupBy::new(self, key, Identity, DefaultEquality)
    }

    fn group_by_element<KF, K, EF, E>(self, key: KF, element: EF) -> GroupBy<Self, KF, EF, DefaultEquality>
    where
        KF: Fn(&Self::Item) -> K + Clone,
        K: Hash + Eq + Clone,
        EF: Fn(Self::Item) -> E + Clone,
    {
        GroupBy::new(self, key, element, DefaultEquality)
    }

    fn group_by_with<KF, K, EF, E, C>(self, key: KF, element: EF, comparer: C) -> GroupBy<Self, KF, EF, C>
    where
        KF: Fn(&Self::Item) -> K + Clone,
        K: Clone,
        EF: Fn(Self::Item) -> E + Clone,
        C: EqualityComparer<K>,
    {
        GroupBy::new(self, key, element, comparer)
    }

    /// One `result(key, elements)` per group.
    fn group_by_result<KF, K, F, R>(self, key: KF, result: F) -> GroupResult<Self, KF, Identity, DefaultEquality, F>
    where
        KF: Fn(&Self::Item) -> K + Clone,
        K: Hash + Eq + Clone,
        F: Fn(K, ArraySource<Self::Item>) -> R + Clone,
    {
        GroupBy::new(self, key, Identity, DefaultEquality).select_result(result)
    }

    fn group_by_result_with<KF, K, EF, E, F, R, C>(
        self,
        key: KF,
        element: EF,
        result: F,
        comparer: C,
    ) -> GroupResult<Self, KF, EF, C, F>
    where
        KF: Fn(&Self::Item) -> K + Clone,
        K: Clone,
        EF: Fn(Self::Item) -> E + Clone,
        F: Fn(K, ArraySource<E>) -> R + Clone,
        C: EqualityComparer<K>,
    {
        GroupBy::new(self, key, element, comparer).select_result(result)
    }

    /// Inner equi-join; results come in outer order, then inner order.
    fn join<I, OK, IK, K, R, T>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: R,
    ) -> Join<Self, I, OK, IK, R, DefaultEquality>
    where
        I: Sequence,
        OK: Fn(&Self::Item) -> K + Clone,
        IK: Fn(&I::Item) -> K + Clone,
        K: Hash + Eq,
        R: Fn(&Self::Item, &I::Item) -> T + Clone,
    {
        Join::new(self, inner, outer_key, inner_key, result, DefaultEquality)
    }

    fn join_with<I, OK, IK, K, R, T, C>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: R,
        comparer: C,
    ) -> Join<Self, I, OK, IK, R, C>
    where
        I: Sequence,
        OK: Fn(&Self::Item) -> K + Clone,
        IK: Fn(&I::Item) -> K + Clone,
        R: Fn(&Self::Item, &I::Item) -> T + Clone,
        C: EqualityComparer<K>,
    {
        Join::new(self, inner, outer_key, inner_key, result, comparer)
    }

    /// One result per outer element with all of its inner matches.
    fn group_join<I, OK, IK, K, R, T>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: R,
    ) -> GroupJoin<Self, I, OK, IK, R, DefaultEquality>
    where
        I: Sequence,
        OK: Fn(&Self::Item) -> K + Clone,
        IK: Fn(&I::Item) -> K + Clone,
        K: Hash + Eq,
        R: Fn(Self::Item, ArraySource<I::Item>) -> T + Clone,
    {
        GroupJoin::new(self, inner, outer_key, inner_key, result, DefaultEquality)
    }

    fn group_join_with<I, OK, IK, K, R, T, C>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: R,
        comparer: C,
    ) -> GroupJoin<Self, I, OK, IK, R, C>
    where
        I: Sequence,
        OK: Fn(&Self::Item) -> K + Clone,
        IK: Fn(&I::Item) -> K + Clone,
        R: Fn(Self::Item, ArraySource<I::Item>) -> T + Clone,
        C: EqualityComparer<K>,
    {
        GroupJoin::new(self, inner, outer_key, inner_key, result, comparer)
    }

    // ----- counting and quantifiers -----

    fn count(self) -> Result<usize> {
        crate::terminal::count(self)
    }

    fn count_by<P>(self, predicate: P) -> Result<usize>
    where
        P: Fn(&Self::Item) -> bool,
    {
        crate::terminal::count_by(self, predicate)
    }

    fn long_count(self) -> Result<u64> {
        crate::terminal::long_count(self)
    }

    fn long_count_by<P>(self, predicate: P) -> Result<u64>
    where
        P: Fn(&Self::Item) -> bool,
    {
        crate::terminal::long_count_by(self, predicate)
    }

    fn any(self) -> bool {
        crate::terminal::any(self)
    }

    fn any_by<P>(self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        crate::terminal::any_by(self, predicate)
    }

    fn all<P>(self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        crate::terminal::all(self, predicate)
    }

    fn contains(self, value: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        crate::terminal::contains(self, value)
    }

    fn contains_with<C>(self, value: &Self::Item, comparer: C) -> bool
    where
        C: EqualityComparer<Self::Item>,
    {
        crate::terminal::contains_with(self, value, comparer)
    }

    // ----- element access -----

    fn first(self) -> Result<Self::Item> {
        element::first(self)
    }

    fn first_by<P>(self, predicate: P) -> Result<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        element::first_by(self, predicate)
    }

    fn first_or_default(self) -> Self::Item
    where
        Self::Item: Default,
    {
        element::first_or_default(self)
    }

    fn first_or_default_by<P>(self, predicate: P) -> Self::Item
    where
        Self::Item: Default,
        P: Fn(&Self::Item) -> bool,
    {
        element::first_or_default_by(self, predicate)
    }

    fn last(self) -> Result<Self::Item>
    where
        Self::Item: Clone,
    {
        element::last(self)
    }

    fn last_by<P>(self, predicate: P) -> Result<Self::Item>
    where
        Self::Item: Clone,
        P: Fn(&Self::Item) -> bool,
    {
        element::last_by(self, predicate)
    }

    fn last_or_default(self) -> Self::Item
    where
        Self::Item: Clone + Default,
    {
        element::last_or_default(self)
    }

    fn last_or_default_by<P>(self, predicate: P) -> Self::Item
    where
        Self::Item: Clone + Default,
        P: Fn(&Self::Item) -> bool,
    {
        element::last_or_default_by(self, predicate)
    }

    fn single(self) -> Result<Self::Item> {
        element::single(self)
    }

    fn single_by<P>(self, predicate: P) -> Result<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        element::single_by(self, predicate)
    }

    /// `Default` when empty; still fails on a second element.
    fn single_or_default(self) -> Result<Self::Item>
    where
        Self::Item: Default,
    {
        element::single_or_default(self)
    }

    fn single_or_default_by<P>(self, predicate: P) -> Result<Self::Item>
    where
        Self::Item: Default,
        P: Fn(&Self::Item) -> bool,
    {
        element::single_or_default_by(self, predicate)
    }

    fn element_at(self, index: isize) -> Result<Self::Item>
    where
        Self::Item: Clone,
    {
        element::element_at(self, index)
    }

    fn element_at_or_default(self, index: isize) -> Self::Item
    where
        Self::Item: Clone + Default,
    {
        element::element_at_or_default(self, index)
    }

    // ----- aggregation -----

    fn aggregate<F>(self, func: F) -> Result<Self::Item>
    where
        F: Fn(Self::Item, Self::Item) -> Self::Item,
    {
        aggregate::aggregate(self, func)
    }

    fn aggregate_seeded<A, F>(self, seed: A, func: F) -> A
    where
        F: Fn(A, Self::Item) -> A,
    {
        aggregate::aggregate_seeded(self, seed, func)
    }

    fn aggregate_with<A, F, R, G>(self, seed: A, func: F, result: G) -> R
    where
        F: Fn(A, Self::Item) -> A,
        G: FnOnce(A) -> R,
    {
        aggregate::aggregate_with(self, seed, func, result)
    }

    fn sequence_equal<B>(self, other: B) -> bool
    where
        B: Sequence<Item = Self::Item>,
        Self::Item: PartialEq,
    {
        aggregate::sequence_equal(self, other)
    }

    fn sequence_equal_with<B, C>(self, other: B, comparer: C) -> bool
    where
        B: Sequence<Item = Self::Item>,
        C: EqualityComparer<Self::Item>,
    {
        aggregate::sequence_equal_with(self, other, comparer)
    }

    fn min_with<C>(self, comparer: C) -> Result<Self::Item>
    where
        C: Comparer<Self::Item>,
    {
        aggregate::min_with(self, comparer)
    }

    fn max_with<C>(self, comparer: C) -> Result<Self::Item>
    where
        C: Comparer<Self::Item>,
    {
        aggregate::max_with(self, comparer)
    }

    // ----- numeric -----

    fn sum(self) -> Result<<Self::Item as Summable>::Total>
    where
        Self::Item: Summable,
    {
        <Self::Item as Summable>::sum_all(self.into_cursor())
    }

    fn sum_of<F, N>(self, selector: F) -> Result<N::Total>
    where
        F: Fn(Self::Item) -> N,
        N: Summable,
    {
        N::sum_all(self.into_cursor().map(selector))
    }

    fn min(self) -> Result<Self::Item>
    where
        Self::Item: Extremum,
    {
        <Self::Item as Extremum>::min_all(self.into_cursor())
    }

    fn min_of<F, N>(self, selector: F) -> Result<N>
    where
        F: Fn(Self::Item) -> N,
        N: Extremum,
    {
        N::min_all(self.into_cursor().map(selector))
    }

    fn max(self) -> Result<Self::Item>
    where
        Self::Item: Extremum,
    {
        <Self::Item as Extremum>::max_all(self.into_cursor())
    }

    fn max_of<F, N>(self, selector: F) -> Result<N>
    where
        F: Fn(Self::Item) -> N,
        N: Extremum,
    {
        N::max_all(self.into_cursor().map(selector))
    }

    fn average(self) -> Result<<Self::Item as Averageable>::Average>
    where
        Self::Item: Averageable,
    {
        <Self::Item as Averageable>::average_all(self.into_cursor())
    }

    fn average_of<F, N>(self, selector: F) -> Result<N::Average>
    where
        F: Fn(Self::Item) -> N,
        N: Averageable,
    {
        N::average_all(self.into_cursor().map(selector))
    }

    // ----- conversions -----

    fn to_vec(self) -> Vec<Self::Item> {
        convert::to_vec(self)
    }

    fn to_array(self) -> Box<[Self::Item]> {
        convert::to_array(self)
    }

    fn to_list(self) -> SharedList<Self::Item> {
        convert::to_list(self)
    }

    fn to_dictionary<K, KF>(self, key: KF) -> Result<HashMap<K, Self::Item>>
    where
        K: Hash + Eq,
        KF: Fn(&Self::Item) -> K,
    {
        convert::to_dictionary(self, key)
    }

    fn to_dictionary_map<K, V, KF, VF>(self, key: KF, value: VF) -> Result<HashMap<K, V>>
    where
        K: Hash + Eq,
        KF: Fn(&Self::Item) -> K,
        VF: Fn(Self::Item) -> V,
    {
        convert::to_dictionary_map(self, key, value)
    }

    fn to_lookup<K, KF>(self, key: KF) -> Lookup<K, Self::Item, DefaultEquality>
    where
        K: Hash + Eq,
        KF: Fn(&Self::Item) -> K,
    {
        convert::to_lookup(self, key)
    }

    fn to_lookup_with<K, E, KF, EF, C>(self, key: KF, element: EF, comparer: C) -> Lookup<K, E, C>
    where
        KF: Fn(&Self::Item) -> K,
        EF: Fn(Self::Item) -> E,
        C: EqualityComparer<K>,
    {
        convert::to_lookup_with(self, key, element, comparer)
    }

    fn to_hash_set(self) -> HashSet<Self::Item>
    where
        Self::Item: Hash + Eq,
    {
        convert::to_hash_set(self)
    }

    fn to_set_with<C>(self, comparer: C) -> Set<Self::Item, C>
    where
        C: EqualityComparer<Self::Item>,
    {
        convert::to_set_with(self, comparer)
    }
}

impl<S: Sequence> Query for S {}
