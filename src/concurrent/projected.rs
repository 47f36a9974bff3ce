use crate::error::Error;
use parking_lot::RwLock;
use std::borrow::Borrow;
use std::fmt;

/// A concurrent [`ProjectedMap`](crate::ProjectedMap).
///
/// # Examples
///
/// ```
/// use sortedmap::concurrent::projected::ProjectedMap;
///
/// let words = ProjectedMap::new(|word: &String| word.len());
/// words.insert(String::from("abc"));
/// words.insert(String::from("a"));
/// assert_eq!(words.less(&3), vec![String::from("a")]);
/// ```
pub struct ProjectedMap<K, V, F>
where
    K: Ord,
    F: Fn(&V) -> K,
{
    inner: RwLock<crate::ProjectedMap<K, V, F>>,
}

impl<K, V, F> ProjectedMap<K, V, F>
where
    K: Ord,
    F: Fn(&V) -> K,
{
    pub fn new(projection: F) -> Self {
        Self::from(crate::ProjectedMap::new(projection))
    }
    pub fn with_capacity(capacity: usize, projection: F) -> Self {
        Self::from(crate::ProjectedMap::with_capacity(capacity, projection))
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
    pub fn insert(&self, value: V) -> Option<usize> {
        self.inner.write().insert(value)
    }
    pub fn insert_with_after_hint(&self, value: V, after: usize) -> Option<usize> {
        self.inner.write().insert_with_after_hint(value, after)
    }
    pub fn try_insert_with_after_hint(
        &self,
        value: V,
        after: usize,
    ) -> Result<Option<usize>, Error> {
        self.inner.write().try_insert_with_after_hint(value, after)
    }
    pub fn delete<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.write().delete(key)
    }
    pub fn delete_value(&self, value: &V) -> Option<usize> {
        self.inner.write().delete_value(value)
    }
    pub fn delete_with_after_hint<Q>(&self, key: &Q, after: usize) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.write().delete_with_after_hint(key, after)
    }
    pub fn try_delete_with_after_hint<Q>(
        &self,
        key: &Q,
        after: usize,
    ) -> Result<Option<usize>, Error>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.write().try_delete_with_after_hint(key, after)
    }
    pub fn insert_all<I>(&self, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        let values: Vec<V> = values.into_iter().collect();
        self.inner.write().insert_all(values);
    }
    pub fn insert_all_ordered<I>(&self, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        let values: Vec<V> = values.into_iter().collect();
        self.inner.write().insert_all_ordered(values);
    }
    pub fn delete_all<'a, Q, I>(&self, keys: I)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        let keys: Vec<&Q> = keys.into_iter().collect();
        self.inner.write().delete_all(keys);
    }
    pub fn delete_all_ordered<'a, Q, I>(&self, keys: I)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        let keys: Vec<&Q> = keys.into_iter().collect();
        self.inner.write().delete_all_ordered(keys);
    }
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().contains(key)
    }
    pub fn index_of_greater<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().index_of_greater(key)
    }
    pub fn index_of_greater_or_equal<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().index_of_greater_or_equal(key)
    }
    pub fn into_inner(self) -> crate::ProjectedMap<K, V, F> {
        self.inner.into_inner()
    }
}

impl<K, V, F> ProjectedMap<K, V, F>
where
    K: Ord,
    V: Clone,
    F: Fn(&V) -> K,
{
    pub fn greater<Q>(&self, key: &Q) -> Vec<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().greater(key).to_vec()
    }
    pub fn greater_or_equal<Q>(&self, key: &Q) -> Vec<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().greater_or_equal(key).to_vec()
    }
    pub fn less<Q>(&self, key: &Q) -> Vec<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().less(key).to_vec()
    }
    pub fn less_or_equal<Q>(&self, key: &Q) -> Vec<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().less_or_equal(key).to_vec()
    }
    pub fn inclusive_range<Q>(&self, start: &Q, end: &Q) -> Vec<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().inclusive_range(start, end).to_vec()
    }
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().get(key).cloned()
    }
    /// Copies every value out, in key order, under one shared lock.
    pub fn to_vec(&self) -> Vec<V> {
        self.inner.read().values().to_vec()
    }
}

impl<K, V, F> From<crate::ProjectedMap<K, V, F>> for ProjectedMap<K, V, F>
where
    K: Ord,
    F: Fn(&V) -> K,
{
    fn from(map: crate::ProjectedMap<K, V, F>) -> Self {
        Self {
            inner: RwLock::new(map),
        }
    }
}

impl<K, V, F> fmt::Debug for ProjectedMap<K, V, F>
where
    K: Ord + fmt::Debug,
    V: fmt::Debug,
    F: Fn(&V) -> K,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectedMap")
            .field("inner", &self.inner)
            .finish()
    }
}
