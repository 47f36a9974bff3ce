use crate::error::Error;
use parking_lot::RwLock;
use std::borrow::Borrow;

/// A concurrent [`SortedSet`](crate::SortedSet).
///
/// Any number of readers may run at the same time; a writer excludes everybody else. Each call
/// is atomic on its own, but two calls are never atomic together.
///
/// # Examples
///
/// ```
/// use sortedmap::concurrent::set::SortedSet;
/// use std::sync::Arc;
/// use std::thread;
///
/// let set = Arc::new(SortedSet::with_capacity(64));
///
/// let handles: Vec<_> = (0..4)
///     .map(|thread_idx| {
///         let set = Arc::clone(&set);
///         thread::spawn(move || {
///             for value in 0..16 {
///                 set.insert(thread_idx * 16 + value);
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(set.len(), 64);
/// assert_eq!(set.inclusive_range(&10, &12), vec![10, 11, 12]);
/// ```
#[derive(Debug)]
pub struct SortedSet<T>
where
    T: Ord,
{
    inner: RwLock<crate::SortedSet<T>>,
}

impl<T: Ord> SortedSet<T> {
    pub fn new() -> Self {
        Self::from(crate::SortedSet::new())
    }
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from(crate::SortedSet::with_capacity(capacity))
    }
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }
    pub fn extend_capacity_to(&self, capacity: usize) {
        self.inner.write().extend_capacity_to(capacity);
    }
    pub fn clear(&self) {
        self.inner.write().clear();
    }
    pub fn insert(&self, value: T) -> Option<usize> {
        self.inner.write().insert(value)
    }
    pub fn insert_with_after_hint(&self, value: T, after: usize) -> Option<usize> {
        self.inner.write().insert_with_after_hint(value, after)
    }
    pub fn try_insert_with_after_hint(
        &self,
        value: T,
        after: usize,
    ) -> Result<Option<usize>, Error> {
        self.inner.write().try_insert_with_after_hint(value, after)
    }
    pub fn delete<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.write().delete(value)
    }
    pub fn delete_with_after_hint<Q>(&self, value: &Q, after: usize) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.write().delete_with_after_hint(value, after)
    }
    pub fn try_delete_with_after_hint<Q>(
        &self,
        value: &Q,
        after: usize,
    ) -> Result<Option<usize>, Error>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.write().try_delete_with_after_hint(value, after)
    }
    /// Inserts every value under a single exclusive lock. The values are collected before the
    /// lock is taken, so the iterator may read this set.
    pub fn insert_all<I>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        self.inner.write().insert_all(values);
    }
    pub fn insert_all_ordered<I>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        self.inner.write().insert_all_ordered(values);
    }
    pub fn delete_all<'a, Q, I>(&self, values: I)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        let values: Vec<&Q> = values.into_iter().collect();
        self.inner.write().delete_all(values);
    }
    pub fn delete_all_ordered<'a, Q, I>(&self, values: I)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        let values: Vec<&Q> = values.into_iter().collect();
        self.inner.write().delete_all_ordered(values);
    }
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().contains(value)
    }
    pub fn index_of_greater<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().index_of_greater(value)
    }
    pub fn index_of_greater_or_equal<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().index_of_greater_or_equal(value)
    }
    /// Consumes the wrapper and returns the unsynchronized set.
    pub fn into_inner(self) -> crate::SortedSet<T> {
        self.inner.into_inner()
    }
}

impl<T: Ord + Clone> SortedSet<T> {
    pub fn greater<Q>(&self, value: &Q) -> Vec<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().greater(value).to_vec()
    }
    pub fn greater_or_equal<Q>(&self, value: &Q) -> Vec<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().greater_or_equal(value).to_vec()
    }
    pub fn less<Q>(&self, value: &Q) -> Vec<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().less(value).to_vec()
    }
    pub fn less_or_equal<Q>(&self, value: &Q) -> Vec<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().less_or_equal(value).to_vec()
    }
    pub fn inclusive_range<Q>(&self, start: &Q, end: &Q) -> Vec<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().inclusive_range(start, end).to_vec()
    }
    pub fn get_index(&self, idx: usize) -> Option<T> {
        self.inner.read().get_index(idx).cloned()
    }
    /// Copies the whole set out under one shared lock.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.read().as_slice().to_vec()
    }
}

impl<T: Ord> Default for SortedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> From<crate::SortedSet<T>> for SortedSet<T> {
    fn from(set: crate::SortedSet<T>) -> Self {
        Self {
            inner: RwLock::new(set),
        }
    }
}

impl<T: Ord> FromIterator<T> for SortedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(crate::SortedSet::from_iter(iter))
    }
}
