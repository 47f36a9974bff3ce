use crate::core::constants::DEFAULT_CAPACITY;
use crate::core::search::{check_hint, search, search_after};
use crate::error::Error;
use crate::SortedSet;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::iter::Zip;
use tracing::{debug, trace};

/// An ordered map made of a sorted key vector and an index-aligned value vector.
///
/// The keys decide order and uniqueness; every positional change to the keys is mirrored on the
/// values, so `keys()[i]` and `values()[i]` always belong to the same entry. Range queries
/// return slices of values.
///
/// # Examples
///
/// ```
/// use sortedmap::SortedMap;
///
/// let mut map = SortedMap::with_capacity(5);
/// map.insert(3, "3");
///
/// assert_eq!(map.greater_or_equal(&3), &["3"]);
/// assert!(map.less(&3).is_empty());
///
/// map.delete(&3);
/// assert!(!map.contains(&3));
/// assert_eq!(map.len(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortedMap<K, V>
where
    K: Ord,
{
    keys: SortedSet<K>,
    values: Vec<V>,
}

impl<K: Ord, V> SortedMap<K, V> {
    /// Makes a new, empty `SortedMap` with room for
    /// [`DEFAULT_CAPACITY`](crate::core::constants::DEFAULT_CAPACITY) entries.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
    /// Makes a new, empty `SortedMap` that can hold `capacity` entries without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: SortedSet::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    /// Returns the number of entries the map can hold without reallocating either vector.
    pub fn capacity(&self) -> usize {
        self.keys.capacity().min(self.values.capacity())
    }
    /// Grows both vectors so that they can hold at least `capacity` entries. Never shrinks.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedMap;
    ///
    /// let mut map: SortedMap<i32, String> = SortedMap::with_capacity(5);
    /// map.extend_capacity_to(8);
    /// assert!(map.capacity() >= 8);
    /// ```
    pub fn extend_capacity_to(&mut self, capacity: usize) {
        self.keys.extend_capacity_to(capacity);
        if self.values.capacity() < capacity {
            self.values.reserve_exact(capacity - self.values.len());
            trace!(
                capacity = self.values.capacity(),
                len = self.values.len(),
                "extended sorted map value capacity"
            );
        }
    }
    /// Removes every entry, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
    }
    /// Inserts a key-value pair.
    ///
    /// Returns the position of the new entry, or `None` if the key was already present. An
    /// existing entry is never overwritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedMap;
    ///
    /// let mut map = SortedMap::new();
    /// assert_eq!(map.insert(37, "a"), Some(0));
    /// assert_eq!(map.insert(37, "b"), None);
    /// assert_eq!(map.get(&37), Some(&"a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<usize> {
        let position = self.keys.insert(key)?;
        self.values.insert(position, value);

        Some(position)
    }
    /// Same as [`insert`](Self::insert), but only searches the keys from index `after` onwards.
    /// The caller must guarantee that every key before `after` is less than `key`.
    pub fn insert_with_after_hint(&mut self, key: K, value: V, after: usize) -> Option<usize> {
        let position = self.keys.insert_with_after_hint(key, after)?;
        self.values.insert(position, value);

        Some(position)
    }
    /// Checked version of [`insert_with_after_hint`](Self::insert_with_after_hint).
    pub fn try_insert_with_after_hint(
        &mut self,
        key: K,
        value: V,
        after: usize,
    ) -> Result<Option<usize>, Error> {
        check_hint(self.keys.as_slice(), &key, after)?;

        Ok(self.insert_with_after_hint(key, value, after))
    }
    /// Removes the entry for `key`, returning the position it occupied, or `None` if the key was
    /// not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedMap;
    ///
    /// let mut map = SortedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.delete(&1), Some(0));
    /// assert_eq!(map.delete(&1), None);
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.keys.delete(key)?;
        self.values.remove(position);

        Some(position)
    }
    /// Same as [`delete`](Self::delete), but only searches the keys from index `after` onwards.
    pub fn delete_with_after_hint<Q>(&mut self, key: &Q, after: usize) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.keys.delete_with_after_hint(key, after)?;
        self.values.remove(position);

        Some(position)
    }
    /// Checked version of [`delete_with_after_hint`](Self::delete_with_after_hint).
    pub fn try_delete_with_after_hint<Q>(
        &mut self,
        key: &Q,
        after: usize,
    ) -> Result<Option<usize>, Error>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        check_hint(self.keys.as_slice(), key, after)?;

        Ok(self.delete_with_after_hint(key, after))
    }
    /// Inserts every pair, in any order. Keys already present keep their current value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedMap;
    ///
    /// let mut map = SortedMap::new();
    /// map.insert_all([(2, "b"), (1, "a"), (2, "c")]);
    /// assert_eq!(map.values(), &["a", "b"]);
    /// ```
    pub fn insert_all<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs = pairs.into_iter();
        let before = self.len();
        self.extend_capacity_to(before + pairs.size_hint().0);

        let mut incoming = 0usize;
        pairs.for_each(|(key, value)| {
            incoming += 1;
            self.insert(key, value);
        });

        debug!(
            incoming,
            inserted = self.len() - before,
            len = self.len(),
            "inserted pairs into sorted map"
        );
    }
    /// Inserts every entry of a hash map. Its iteration order does not matter.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedMap;
    /// use std::collections::HashMap;
    ///
    /// let mut map = SortedMap::new();
    /// map.insert_all_by_map(HashMap::from([(3, "c"), (1, "a"), (2, "b")]));
    /// assert_eq!(map.keys(), &[1, 2, 3]);
    /// assert_eq!(map.values(), &["a", "b", "c"]);
    /// ```
    pub fn insert_all_by_map<S: BuildHasher>(&mut self, map: HashMap<K, V, S>) {
        self.insert_all(map);
    }
    /// Inserts pairs whose keys are already sorted in ascending order, searching each key from
    /// where the previous one landed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedMap;
    ///
    /// let mut map = SortedMap::from_iter([(2, "b"), (4, "d")]);
    /// map.insert_all_ordered([(1, "a"), (3, "c"), (4, "x"), (5, "e")]);
    /// assert_eq!(map.values(), &["a", "b", "c", "d", "e"]);
    /// ```
    pub fn insert_all_ordered<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs = pairs.into_iter();
        let before = self.len();
        self.extend_capacity_to(before + pairs.size_hint().0);

        let mut incoming = 0usize;
        let mut hint = 0;
        for (key, value) in pairs {
            incoming += 1;
            hint = match search_after(self.keys.as_slice(), &key, hint) {
                Ok(position) => position,
                Err(position) => {
                    self.keys.insert_at(position, key);
                    self.values.insert(position, value);
                    position
                }
            };
        }

        debug!(
            incoming,
            inserted = self.len() - before,
            len = self.len(),
            "inserted ordered pairs into sorted map"
        );
    }
    /// Removes the entries of every given key, in any order.
    pub fn delete_all<'a, Q, I>(&mut self, keys: I)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        let before = self.len();
        let mut incoming = 0usize;
        keys.into_iter().for_each(|key| {
            incoming += 1;
            self.delete(key);
        });

        debug!(
            incoming,
            deleted = before - self.len(),
            len = self.len(),
            "deleted keys from sorted map"
        );
    }
    /// Removes the entries of keys that are already sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortedmap::SortedMap;
    ///
    /// let mut map = SortedMap::from_iter((0..6).map(|key| (key, key * 10)));
    /// map.delete_all_ordered(&[1, 2, 4, 7]);
    /// assert_eq!(map.values(), &[0, 30, 50]);
    /// ```
    pub fn delete_all_ordered<'a, Q, I>(&mut self, keys: I)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        let before = self.len();

        let mut incoming = 0usize;
        let mut hint = 0;
        for key in keys {
            incoming += 1;
            hint = match search_after(self.keys.as_slice(), key, hint) {
                Ok(position) => {
                    self.keys.remove_at(position);
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
            "deleted ordered keys from sorted map"
        );
    }
    /// Returns `true` if the map contains an entry for the key.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.keys.contains(key)
    }
    /// Returns the smallest index whose key is strictly greater than `key`.
    pub fn index_of_greater<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.keys.index_of_greater(key)
    }
    /// Returns the smallest index whose key is greater than or equal to `key`.
    pub fn index_of_greater_or_equal<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.keys.index_of_greater_or_equal(key)
    }
    /// Returns the values of every key strictly greater than `key`.
    pub fn greater<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        &self.values[self.index_of_greater(key)..]
    }
    /// Returns the values of every key greater than or equal to `key`.
    pub fn greater_or_equal<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        &self.values[self.index_of_greater_or_equal(key)..]
    }
    /// Returns the values of every key strictly less than `key`.
    pub fn less<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        &self.values[..self.index_of_greater_or_equal(key)]
    }
    /// Returns the values of every key less than or equal to `key`.
    pub fn less_or_equal<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        &self.values[..self.index_of_greater(key)]
    }
    /// Returns the values of every key `k` with `start <= k <= end`, in key order. Empty when
    /// `start > end`.
    pub fn inclusive_range<Q>(&self, start: &Q, end: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let start = self.index_of_greater_or_equal(start);
        let end = self.index_of_greater(end);
        if start >= end {
            return &[];
        }

        &self.values[start..end]
    }
    /// Returns a reference to the value corresponding to the key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = search(self.keys.as_slice(), key).ok()?;

        self.values.get(position)
    }
    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = search(self.keys.as_slice(), key).ok()?;

        self.values.get_mut(position)
    }
    /// Returns the entry at position `idx`, if any.
    pub fn get_index(&self, idx: usize) -> Option<(&K, &V)> {
        Some((self.keys.get_index(idx)?, self.values.get(idx)?))
    }
    /// Returns all keys in ascending order.
    pub fn keys(&self) -> &[K] {
        self.keys.as_slice()
    }
    /// Returns all values, in the order of their keys.
    pub fn values(&self) -> &[V] {
        &self.values
    }
    /// Gets an iterator over the entries, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.keys.iter().zip(self.values.iter())
    }
}

pub type Iter<'a, K, V> = Zip<std::slice::Iter<'a, K>, std::slice::Iter<'a, V>>;

impl<K: Ord, V> Default for SortedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SortedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut pairs: Vec<(K, V)> = iter.into_iter().collect();
        // Stable sort, then `dedup_by` drops later duplicates so the first pair for a key wins.
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs.dedup_by(|next, previous| next.0 == previous.0);

        let (keys, values): (Vec<K>, Vec<V>) = pairs.into_iter().unzip();
        Self {
            keys: SortedSet::from_iter(keys),
            values,
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for SortedMap<K, V> {
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_iter(pairs)
    }
}

impl<K: Ord, V> Extend<(K, V)> for SortedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a SortedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<K: Ord + Serialize, V: Serialize> Serialize for SortedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> Deserialize<'de> for SortedMap<K, V>
where
    K: Ord + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<(K, V)>::deserialize(deserializer).map(Self::from_iter)
    }
}

#[cfg(test)]
mod tests {
    use super::SortedMap;
    use crate::Error;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::{BTreeMap, HashMap};

    fn assert_aligned(map: &SortedMap<isize, String>) {
        assert!(map.keys().windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(map.keys().len(), map.values().len());
        map.iter()
            .for_each(|(key, value)| assert_eq!(*value, key.to_string()));
    }

    #[test]
    fn test_size() {
        let mut map = SortedMap::with_capacity(5);
        assert_eq!(map.len(), 0);

        map.insert(0, "0");
        map.insert(3, "3");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_capacity_and_clear() {
        let mut map = SortedMap::with_capacity(5);
        assert!(map.capacity() >= 5);

        map.insert(1, "1");
        map.insert(2, "2");
        map.extend_capacity_to(8);
        assert!(map.capacity() >= 8);
        assert_eq!(map.values(), &["1", "2"]);

        map.clear();
        assert!(map.is_empty());
        assert!(map.capacity() >= 8);
    }

    #[test]
    fn test_insert_and_delete() {
        let mut map = SortedMap::with_capacity(5);

        assert_eq!(map.insert(1, "1"), Some(0));
        assert_eq!(map.insert(1, "one"), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"1"));

        assert_eq!(map.delete(&1), Some(0));
        assert_eq!(map.delete(&1), None);
        assert_eq!(map.len(), 0);
        assert!(!map.contains(&1));
        assert_eq!(map.get(&1), None);
    }

    #[test]
    fn test_scenario() {
        let mut map = SortedMap::with_capacity(5);
        map.insert(3, "3");

        assert_eq!(map.greater_or_equal(&3), &["3"]);
        assert!(map.less(&3).is_empty());

        map.delete(&3);
        assert!(!map.contains(&3));
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_range_queries() {
        let map = SortedMap::from_iter([(1, "a"), (3, "b"), (5, "c"), (7, "d")]);

        assert_eq!(map.greater(&3), &["c", "d"]);
        assert_eq!(map.greater_or_equal(&3), &["b", "c", "d"]);
        assert_eq!(map.less(&5), &["a", "b"]);
        assert_eq!(map.less_or_equal(&5), &["a", "b", "c"]);
        assert_eq!(map.inclusive_range(&2, &6), &["b", "c"]);
        assert!(map.inclusive_range(&6, &2).is_empty());
        assert_eq!(map.index_of_greater(&3), 2);
        assert_eq!(map.index_of_greater_or_equal(&3), 1);
    }

    #[test]
    fn test_insert_all_by_map() {
        let mut map = SortedMap::with_capacity(2);
        map.insert(2, String::from("2"));

        let source: HashMap<isize, String> =
            (0..10).map(|key: isize| (key, key.to_string())).collect();
        map.insert_all_by_map(source);

        assert_eq!(map.len(), 10);
        assert_eq!(map.keys(), (0..10).collect::<Vec<isize>>().as_slice());
        assert_aligned(&map);
    }

    #[test]
    fn test_get_mut() {
        let mut map = SortedMap::from([(1, 10), (2, 20)]);

        *map.get_mut(&2).unwrap() += 1;
        assert_eq!(map.get(&2), Some(&21));
        assert_eq!(map.get_mut(&3), None);
        assert_eq!(map.get_index(1), Some((&2, &21)));
        assert_eq!(map.get_index(2), None);
    }

    #[test]
    fn test_hints() {
        let mut map = SortedMap::from_iter([(10, "a"), (20, "b")]);

        assert_eq!(map.insert_with_after_hint(15, "x", 1), Some(1));
        assert_eq!(map.insert_with_after_hint(20, "y", 1), None);
        assert_eq!(map.values(), &["a", "x", "b"]);

        assert_eq!(
            map.try_insert_with_after_hint(5, "z", 1),
            Err(Error::HintPastTarget { hint: 1 })
        );
        assert_eq!(map.try_delete_with_after_hint(&20, 2), Ok(Some(2)));
        assert_eq!(map.delete_with_after_hint(&15, 1), Some(1));
        assert_eq!(map.values(), &["a"]);
    }

    #[test]
    fn test_ordered_batches_against_btreemap() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let mut map = SortedMap::new();
            let mut model = BTreeMap::new();

            let initial: Vec<isize> = (0..rng.gen_range(0..64))
                .map(|_| rng.gen_range(0..200))
                .collect();
            initial.iter().for_each(|key| {
                map.insert(*key, key.to_string());
                model.entry(*key).or_insert_with(|| key.to_string());
            });

            let mut inserts: Vec<isize> = (0..rng.gen_range(0..64))
                .map(|_| rng.gen_range(0..200))
                .collect();
            inserts.sort();
            map.insert_all_ordered(inserts.iter().map(|key| (*key, key.to_string())));
            inserts.iter().for_each(|key| {
                model.entry(*key).or_insert_with(|| key.to_string());
            });
            assert_aligned(&map);
            assert!(map.keys().iter().eq(model.keys()));

            let mut deletes: Vec<isize> = (0..rng.gen_range(0..64))
                .map(|_| rng.gen_range(0..200))
                .collect();
            deletes.sort();
            map.delete_all_ordered(&deletes);
            deletes.iter().for_each(|key| {
                model.remove(key);
            });
            assert_aligned(&map);
            assert!(map.keys().iter().eq(model.keys()));
            assert!(map.values().iter().eq(model.values()));
        }
    }

    #[test]
    fn test_batch_summary_counts_incoming_pairs() {
        let mut map = SortedMap::from_iter([(1, 'a')]);

        let inserted =
            crate::tests::capture_events("inserted ordered pairs into sorted map", || {
                map.insert_all_ordered([(1, 'x'), (2, 'b'), (3, 'c')]);
            });
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0]["incoming"], "3");
        assert_eq!(inserted[0]["inserted"], "2");
        assert_eq!(inserted[0]["len"], "3");

        let deleted = crate::tests::capture_events("deleted keys from sorted map", || {
            map.delete_all(&[3, 7]);
        });
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0]["incoming"], "2");
        assert_eq!(deleted[0]["deleted"], "1");
        assert_eq!(map.keys(), &[1, 2]);
    }

    #[test]
    fn test_delete_all() {
        let mut map = SortedMap::from_iter((0..10).map(|key: isize| (key, key.to_string())));

        map.delete_all(&[9, 0, 4, 42]);

        assert_eq!(map.keys(), &[1, 2, 3, 5, 6, 7, 8]);
        assert_aligned(&map);
    }

    #[test]
    fn test_from_iter_keeps_first_value() {
        let map = SortedMap::from_iter([(2, "b"), (1, "a"), (2, "c")]);

        assert_eq!(map.keys(), &[1, 2]);
        assert_eq!(map.values(), &["a", "b"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let map = SortedMap::from_iter([(2, String::from("b")), (1, String::from("a"))]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"[[1,"a"],[2,"b"]]"#);

        let restored: SortedMap<i32, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, map);
    }
}
