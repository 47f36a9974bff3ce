use crate::error::Error;
use parking_lot::RwLock;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// A concurrent [`SortedMap`](crate::SortedMap).
///
/// Value-returning queries clone the values out while the shared lock is held.
///
/// # Examples
///
/// ```
/// use sortedmap::concurrent::map::SortedMap;
///
/// let map = SortedMap::new();
/// map.insert(3, "3");
/// assert_eq!(map.greater_or_equal(&3), vec!["3"]);
/// assert!(map.less(&3).is_empty());
/// ```
#[derive(Debug)]
pub struct SortedMap<K, V>
where
    K: Ord,
{
    inner: RwLock<crate::SortedMap<K, V>>,
}

impl<K: Ord, V> SortedMap<K, V> {
    pub fn new() -> Self {
        Self::from(crate::SortedMap::new())
    }
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from(crate::SortedMap::with_capacity(capacity))
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
    pub fn insert(&self, key: K, value: V) -> Option<usize> {
        self.inner.write().insert(key, value)
    }
    pub fn insert_with_after_hint(&self, key: K, value: V, after: usize) -> Option<usize> {
        self.inner.write().insert_with_after_hint(key, value, after)
    }
    pub fn try_insert_with_after_hint(
        &self,
        key: K,
        value: V,
        after: usize,
    ) -> Result<Option<usize>, Error> {
        self.inner
            .write()
            .try_insert_with_after_hint(key, value, after)
    }
    pub fn delete<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.write().delete(key)
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
    pub fn insert_all<I>(&self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        self.inner.write().insert_all(pairs);
    }
    pub fn insert_all_by_map<S: BuildHasher>(&self, map: HashMap<K, V, S>) {
        self.inner.write().insert_all_by_map(map);
    }
    pub fn insert_all_ordered<I>(&self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        self.inner.write().insert_all_ordered(pairs);
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
    pub fn into_inner(self) -> crate::SortedMap<K, V> {
        self.inner.into_inner()
    }
}

impl<K: Ord, V: Clone> SortedMap<K, V> {
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
}

impl<K: Ord + Clone, V: Clone> SortedMap<K, V> {
    /// Copies every entry out under one shared lock.
    pub fn to_vec(&self) -> Vec<(K, V)> {
        self.inner
            .read()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K: Ord, V> Default for SortedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> From<crate::SortedMap<K, V>> for SortedMap<K, V> {
    fn from(map: crate::SortedMap<K, V>) -> Self {
        Self {
            inner: RwLock::new(map),
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SortedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from(crate::SortedMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::SortedMap;
    use std::collections::HashMap;
    use std::sync::{mpsc, Arc};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_scenario() {
        let map = SortedMap::with_capacity(5);
        map.insert(3, String::from("3"));

        assert_eq!(map.greater_or_equal(&3), vec![String::from("3")]);
        assert!(map.less(&3).is_empty());

        assert_eq!(map.delete(&3), Some(0));
        assert!(!map.contains(&3));
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_batches() {
        let map = SortedMap::new();
        map.insert_all_by_map(HashMap::from([(5, 'e'), (1, 'a')]));
        map.insert_all_ordered([(2, 'b'), (3, 'c'), (5, 'x')]);
        map.insert_all([(4, 'd')]);

        assert_eq!(map.inclusive_range(&0, &10), vec!['a', 'b', 'c', 'd', 'e']);

        map.delete_all_ordered(&[1, 3]);
        map.delete_all(&[5]);
        assert_eq!(map.to_vec(), vec![(2, 'b'), (4, 'd')]);
        assert_eq!(map.get(&4), Some('d'));
        assert_eq!(map.get(&5), None);
    }

    #[test]
    fn test_concurrent_insert_and_read() {
        let map = Arc::new(SortedMap::new());
        let num_threads = 4;
        let operations_per_thread = 500;

        let writers: Vec<_> = (0..num_threads)
            .map(|thread_idx| {
                let map = Arc::clone(&map);
                thread::spawn(move || {
                    for op_idx in 0..operations_per_thread {
                        let key = op_idx * num_threads + thread_idx;
                        assert!(map.insert(key, key * 10).is_some());
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..num_threads)
            .map(|_| {
                let map = Arc::clone(&map);
                thread::spawn(move || {
                    for _ in 0..operations_per_thread {
                        for (key, value) in map.to_vec() {
                            assert_eq!(value, key * 10);
                        }
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }

        let map = Arc::try_unwrap(map).unwrap().into_inner();
        assert_eq!(map.len(), num_threads * operations_per_thread);
        assert!(map.keys().iter().copied().eq(0..map.len()));
    }

    #[test]
    fn test_batches_accept_iterators_reading_the_map() {
        let map = Arc::new(SortedMap::from_iter([(1, 'a'), (2, 'b')]));
        let (done, finished) = mpsc::channel();

        let worker = Arc::clone(&map);
        thread::spawn(move || {
            worker.insert_all(
                [(2, 'x'), (3, 'c')]
                    .into_iter()
                    .filter(|(key, _)| !worker.contains(key)),
            );
            worker.insert_all_ordered(
                (4..6).map(|key| (key, worker.get(&(key - 3)).unwrap_or('?'))),
            );
            worker.delete_all([1, 9].iter().filter(|key| worker.contains(*key)));
            worker.delete_all_ordered([2].iter().filter(|key| worker.get(*key) == Some('b')));
            done.send(()).unwrap();
        });

        finished
            .recv_timeout(Duration::from_secs(5))
            .expect("batch with a map-reading iterator did not finish");
        assert_eq!(map.to_vec(), vec![(3, 'c'), (4, 'a'), (5, 'b')]);
    }
}
