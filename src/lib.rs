//! Flat ordered containers.
//!
//! Every container in this crate keeps its keys in one contiguous, ascending, duplicate-free
//! `Vec`. Lookups and range queries are binary searches; inserts and deletes shift the tail of
//! the vector. This trades `O(n)` updates for `O(log n)` search, cache-friendly scans and range
//! queries that are plain sub-slices.
//!
//! * [`SortedSet`] is the ordered sequence itself.
//! * [`SortedMap`] keeps a value vector index-aligned with the keys.
//! * [`ProjectedMap`] derives each key from its value with a user-supplied function.
//! * [`concurrent`] wraps each of them behind a reader/writer lock.
//!
//! Operations that might have no effect (inserting a present key, deleting an absent one) return
//! `Option<usize>`: `Some(position)` on success, `None` when the container was left untouched.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub mod core;
pub mod error;
pub mod map;
pub mod projected;

pub use crate::error::Error;
pub use crate::map::SortedMap;
pub use crate::projected::ProjectedMap;

use crate::core::constants::DEFAULT_CAPACITY;
use crate::core::search::{
    check_hint, index_of_greater, index_of_greater_or_equal, search, search_after,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::ops::Index;
use tracing::{debug, trace};

/// An ordered set stored as a single sorted vector.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `SortedSet` that observed the logic error and not result in undefined behavior.
///
/// [`Cell`]: std::cell::Cell
/// [`RefCell`]: std::cell::RefCell
///
/// # Examples
///
/// ```
/// use sortedmap::SortedSet;
///
/// let mut set = SortedSet::with_capacity(5);
///
/// set.insert(1);
/// set.insert(3);
/// set.insert(4);
/// assert_eq!(set.len(), 3);
/// assert!(!set.contains(&2));
/// assert_eq!(set.inclusive_range(&0, &3), &[1, 3]);
///
/// set.insert(2);
/// set.insert(5);
/// assert_eq!(set.inclusive_range(&0, &5), &[1, 2, 3, 4, 5]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortedSet<T>
where
    T: Ord,
{
    values: Vec<T>,
}

impl<T: Ord> SortedSet<T> {
    /// Makes a new, empty `SortedSet` with room for
    /// [`DEFAULT_CAPACITY`](crate::core::constants::DEFAULT_CAPACITY) elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # #![allow(unused_mut)]
    /// use sortedmap::SortedSet;
    ///
    /// let mut set: SortedSet<i32> = SortedSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
    /// Makes a new, empty `SortedSet` that can hold `capacity` elements without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let set: SortedSet<i32> = SortedSet::with_capacity(128);
    /// assert!(set.capacity() >= 128);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }
    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let mut v = SortedSet::new();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.values.len()
    }
    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    /// Returns the number of elements the set can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }
    /// Grows the backing storage so that it can hold at least `capacity` elements. Never shrinks,
    /// and does nothing if the set is already large enough.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let mut set = SortedSet::with_capacity(5);
    /// set.insert(1);
    /// set.extend_capacity_to(8);
    /// assert!(set.capacity() >= 8);
    /// set.extend_capacity_to(2);
    /// assert!(set.capacity() >= 8);
    /// assert_eq!(set.as_slice(), &[1]);
    /// ```
    pub fn extend_capacity_to(&mut self, capacity: usize) {
        if self.values.capacity() < capacity {
            self.values.reserve_exact(capacity - self.values.len());
            trace!(
                capacity = self.values.capacity(),
                len = self.values.len(),
                "extended sorted set capacity"
            );
        }
    }
    /// Clears the set, removing all elements. The allocated capacity is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let mut v = SortedSet::with_capacity(5);
    /// v.insert(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// assert!(v.capacity() >= 5);
    /// ```
    pub fn clear(&mut self) {
        self.values.clear();
    }
    /// Adds a value to the set.
    ///
    /// Returns the position the value now occupies, or `None` if an equal value was already
    /// present, in which case the set is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let mut set = SortedSet::new();
    ///
    /// assert_eq!(set.insert(2), Some(0));
    /// assert_eq!(set.insert(1), Some(0));
    /// assert_eq!(set.insert(2), None);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T) -> Option<usize> {
        match search(&self.values, &value) {
            Ok(_) => None,
            Err(position) => {
                self.values.insert(position, value);
                Some(position)
            }
        }
    }
    /// Same as [`insert`](Self::insert), but only searches from index `after` onwards. The
    /// returned position is relative to the whole set.
    ///
    /// The caller must guarantee that every element before `after` is less than `value`;
    /// otherwise the set may end up out of order. A hint past the end is treated as the end.
    /// [`try_insert_with_after_hint`](Self::try_insert_with_after_hint) checks this instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let mut set = SortedSet::from_iter([1, 3, 5]);
    /// assert_eq!(set.insert_with_after_hint(4, 2), Some(2));
    /// assert_eq!(set.insert_with_after_hint(5, 2), None);
    /// assert_eq!(set.as_slice(), &[1, 3, 4, 5]);
    /// ```
    pub fn insert_with_after_hint(&mut self, value: T, after: usize) -> Option<usize> {
        match search_after(&self.values, &value, after) {
            Ok(_) => None,
            Err(position) => {
                self.values.insert(position, value);
                Some(position)
            }
        }
    }
    /// Checked version of [`insert_with_after_hint`](Self::insert_with_after_hint).
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::{Error, SortedSet};
    ///
    /// let mut set = SortedSet::from_iter([1, 3, 5]);
    /// assert_eq!(set.try_insert_with_after_hint(2, 2), Err(Error::HintPastTarget { hint: 2 }));
    /// assert_eq!(set.try_insert_with_after_hint(2, 1), Ok(Some(1)));
    /// ```
    pub fn try_insert_with_after_hint(
        &mut self,
        value: T,
        after: usize,
    ) -> Result<Option<usize>, Error> {
        check_hint(&self.values, &value, after)?;

        Ok(self.insert_with_after_hint(value, after))
    }
    /// Removes a value from the set.
    ///
    /// Returns the position the value occupied, or `None` if it was not present.
    ///
    /// The value may be any borrowed form of the set's element type,
    /// but the ordering on the borrowed form *must* match the
    /// ordering on the element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let mut set = SortedSet::new();
    ///
    /// set.insert(2);
    /// assert_eq!(set.delete(&2), Some(0));
    /// assert_eq!(set.delete(&2), None);
    /// ```
    pub fn delete<Q>(&mut self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match search(&self.values, value) {
            Ok(position) => {
                self.values.remove(position);
                Some(position)
            }
            Err(_) => None,
        }
    }
    /// Same as [`delete`](Self::delete), but only searches from index `after` onwards. The caller
    /// must guarantee that `value`, if present, does not lie before `after`.
    pub fn delete_with_after_hint<Q>(&mut self, value: &Q, after: usize) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match search_after(&self.values, value, after) {
            Ok(position) => {
                self.values.remove(position);
                Some(position)
            }
            Err(_) => None,
        }
    }
    /// Checked version of [`delete_with_after_hint`](Self::delete_with_after_hint).
    pub fn try_delete_with_after_hint<Q>(
        &mut self,
        value: &Q,
        after: usize,
    ) -> Result<Option<usize>, Error>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        check_hint(&self.values, value, after)?;

        Ok(self.delete_with_after_hint(value, after))
    }
    /// Inserts every value, in any order. Capacity is reserved up front for the incoming values.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let mut set = SortedSet::new();
    /// set.insert_all([5, 1, 3, 1]);
    /// assert_eq!(set.as_slice(), &[1, 3, 5]);
    /// ```
    pub fn insert_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter();
        let before = self.len();
        self.extend_capacity_to(before + values.size_hint().0);

        let mut incoming = 0usize;
        values.for_each(|value| {
            incoming += 1;
            self.insert(value);
        });

        debug!(
            incoming,
            inserted = self.len() - before,
            len = self.len(),
            "inserted values into sorted set"
        );
    }
    /// Inserts values that are already sorted in ascending order. Each search starts where the
    /// previous value landed, so a sorted batch costs one pass over the set instead of one full
    /// search per value.
    ///
    /// Passing unsorted values may leave the set out of order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let mut set = SortedSet::from_iter([2, 4, 6]);
    /// set.insert_all_ordered([1, 4, 5, 7]);
    /// assert_eq!(set.as_slice(), &[1, 2, 4, 5, 6, 7]);
    /// ```
    pub fn insert_all_ordered<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter();
        let before = self.len();
        self.extend_capacity_to(before + values.size_hint().0);

        let mut incoming = 0usize;
        let mut hint = 0;
        for value in values {
            incoming += 1;
            hint = match search_after(&self.values, &value, hint) {
                Ok(position) => position,
                Err(position) => {
                    self.values.insert(position, value);
                    position
                }
            };
        }

        debug!(
            incoming,
            inserted = self.len() - before,
            len = self.len(),
            "inserted ordered values into sorted set"
        );
    }
    /// Removes every given value, in any order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let mut set = SortedSet::from_iter([1, 2, 3, 4]);
    /// set.delete_all(&[4, 1, 9]);
    /// assert_eq!(set.as_slice(), &[2, 3]);
    /// ```
    pub fn delete_all<'a, Q, I>(&mut self, values: I)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        let before = self.len();
        let mut incoming = 0usize;
        values.into_iter().for_each(|value| {
            incoming += 1;
            self.delete(value);
        });

        debug!(
            incoming,
            deleted = before - self.len(),
            len = self.len(),
            "deleted values from sorted set"
        );
    }
    /// Removes values that are already sorted in ascending order, searching each one from where
    /// the previous one was found (or would have been).
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let mut set = SortedSet::from_iter(0..10);
    /// set.delete_all_ordered(&[0, 3, 4, 11]);
    /// assert_eq!(set.as_slice(), &[1, 2, 5, 6, 7, 8, 9]);
    /// ```
    pub fn delete_all_ordered<'a, Q, I>(&mut self, values: I)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        let before = self.len();

        let mut incoming = 0usize;
        let mut hint = 0;
        for value in values {
            incoming += 1;
            hint = match search_after(&self.values, value, hint) {
                Ok(position) => {
                    self.values.remove(position);
                    position
                }
                Err(position) => position,
            };
        }

        debug!(
            incoming,
            deleted = before - self.len(),
            len = self.len(),
            "deleted ordered values from sorted set"
        );
    }
    /// Returns `true` if the set contains an element equal to the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let set = SortedSet::from_iter([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        search(&self.values, value).is_ok()
    }
    /// Returns the smallest index whose element is strictly greater than `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let set = SortedSet::from_iter([1, 3, 5]);
    /// assert_eq!(set.index_of_greater(&3), 2);
    /// assert_eq!(set.index_of_greater(&4), 2);
    /// assert_eq!(set.index_of_greater(&5), 3);
    /// ```
    pub fn index_of_greater<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        index_of_greater(&self.values, value)
    }
    /// Returns the smallest index whose element is greater than or equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let set = SortedSet::from_iter([1, 3, 5]);
    /// assert_eq!(set.index_of_greater_or_equal(&3), 1);
    /// assert_eq!(set.index_of_greater_or_equal(&4), 2);
    /// ```
    pub fn index_of_greater_or_equal<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        index_of_greater_or_equal(&self.values, value)
    }
    /// Returns every element strictly greater than `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let set = SortedSet::from_iter([1, 3, 5]);
    /// assert_eq!(set.greater(&3), &[5]);
    /// assert_eq!(set.greater_or_equal(&3), &[3, 5]);
    /// assert_eq!(set.less(&3), &[1]);
    /// assert_eq!(set.less_or_equal(&3), &[1, 3]);
    /// ```
    pub fn greater<Q>(&self, value: &Q) -> &[T]
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        &self.values[self.index_of_greater(value)..]
    }
    /// Returns every element greater than or equal to `value`.
    pub fn greater_or_equal<Q>(&self, value: &Q) -> &[T]
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        &self.values[self.index_of_greater_or_equal(value)..]
    }
    /// Returns every element strictly less than `value`.
    pub fn less<Q>(&self, value: &Q) -> &[T]
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        &self.values[..self.index_of_greater_or_equal(value)]
    }
    /// Returns every element less than or equal to `value`.
    pub fn less_or_equal<Q>(&self, value: &Q) -> &[T]
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        &self.values[..self.index_of_greater(value)]
    }
    /// Returns every element `v` with `start <= v <= end`, in ascending order. Empty when
    /// `start > end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let set = SortedSet::from_iter([1, 2, 3, 4, 5]);
    /// assert_eq!(set.inclusive_range(&2, &4), &[2, 3, 4]);
    /// assert!(set.inclusive_range(&4, &2).is_empty());
    /// ```
    pub fn inclusive_range<Q>(&self, start: &Q, end: &Q) -> &[T]
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let start = self.index_of_greater_or_equal(start);
        let end = self.index_of_greater(end);
        if start >= end {
            return &[];
        }

        &self.values[start..end]
    }
    /// Returns the element at position `idx`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedSet;
    ///
    /// let set = SortedSet::from_iter([3, 1, 2]);
    /// assert_eq!(set.get_index(0), Some(&1));
    /// assert_eq!(set.get_index(3), None);
    /// ```
    pub fn get_index(&self, idx: usize) -> Option<&T> {
        self.values.get(idx)
    }
    pub fn first(&self) -> Option<&T> {
        self.values.first()
    }
    pub fn last(&self) -> Option<&T> {
        self.values.last()
    }
    /// Returns the whole set as an ascending slice.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }
    /// Gets an iterator that visits the elements in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }
    pub(crate) fn insert_at(&mut self, position: usize, value: T) {
        self.values.insert(position, value);
    }
    pub(crate) fn remove_at(&mut self, position: usize) -> T {
        self.values.remove(position)
    }
}

impl<T: Ord> Default for SortedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for SortedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut values: Vec<T> = iter.into_iter().collect();
        // Stable sort so that the first of several equal values is the one kept.
        values.sort();
        values.dedup();

        Self { values }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for SortedSet<T> {
    fn from(values: [T; N]) -> Self {
        Self::from_iter(values)
    }
}

impl<T: Ord> Extend<T> for SortedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<T: Ord> IntoIterator for SortedSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, T: Ord> IntoIterator for &'a SortedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<T: Ord> Index<usize> for SortedSet<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

#[cfg(feature = "serde")]
impl<T: Ord + Serialize> Serialize for SortedSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.values.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Ord + Deserialize<'de>> Deserialize<'de> for SortedSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from_iter)
    }
}
