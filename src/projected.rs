use crate::core::constants::DEFAULT_CAPACITY;
use crate::error::Error;
use crate::map::{Iter, SortedMap};
use std::borrow::Borrow;
use std::fmt;

/// A [`SortedMap`] whose keys are computed from the values by a projection function.
///
/// The projection must be deterministic: it is applied once when a value is inserted, and the
/// resulting key is stored next to it. Deletes and lookups take the key directly.
///
/// # Examples
///
/// ```
/// use sortedmap::ProjectedMap;
///
/// #[derive(Debug, PartialEq)]
/// struct Order {
///     id: u64,
///     price: u32,
/// }
///
/// let mut orders = ProjectedMap::new(|order: &Order| order.id);
/// orders.insert(Order { id: 7, price: 100 });
/// orders.insert(Order { id: 3, price: 250 });
///
/// assert_eq!(orders.get(&3), Some(&Order { id: 3, price: 250 }));
/// assert_eq!(orders.greater(&3), &[Order { id: 7, price: 100 }]);
///
/// orders.delete(&7);
/// assert_eq!(orders.len(), 1);
/// ```
#[derive(Clone)]
pub struct ProjectedMap<K, V, F>
where
    K: Ord,
    F: Fn(&V) -> K,
{
    map: SortedMap<K, V>,
    projection: F,
}

impl<K, V, F> ProjectedMap<K, V, F>
where
    K: Ord,
    F: Fn(&V) -> K,
{
    pub fn new(projection: F) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, projection)
    }
    pub fn with_capacity(capacity: usize, projection: F) -> Self {
        Self {
            map: SortedMap::with_capacity(capacity),
            projection,
        }
    }
    /// Computes the key `value` would be stored under.
    pub fn key_of(&self, value: &V) -> K {
        (self.projection)(value)
    }
    pub fn len(&self) -> usize {
        self.map.len()
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }
    pub fn extend_capacity_to(&mut self, capacity: usize) {
        self.map.extend_capacity_to(capacity);
    }
    pub fn clear(&mut self) {
        self.map.clear();
    }
    /// Inserts `value` under its projected key. Returns its position, or `None` if that key is
    /// already taken.
    pub fn insert(&mut self, value: V) -> Option<usize> {
        let key = self.key_of(&value);
        self.map.insert(key, value)
    }
    pub fn insert_with_after_hint(&mut self, value: V, after: usize) -> Option<usize> {
        let key = self.key_of(&value);
        self.map.insert_with_after_hint(key, value, after)
    }
    pub fn try_insert_with_after_hint(
        &mut self,
        value: V,
        after: usize,
    ) -> Result<Option<usize>, Error> {
        let key = self.key_of(&value);
        self.map.try_insert_with_after_hint(key, value, after)
    }
    /// Removes the value stored under `key`.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.delete(key)
    }
    /// Removes the value stored under the key projected from `value`.
    pub fn delete_value(&mut self, value: &V) -> Option<usize> {
        let key = self.key_of(value);
        self.map.delete(&key)
    }
    pub fn delete_with_after_hint<Q>(&mut self, key: &Q, after: usize) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.delete_with_after_hint(key, after)
    }
    pub fn try_delete_with_after_hint<Q>(
        &mut self,
        key: &Q,
        after: usize,
    ) -> Result<Option<usize>, Error>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.try_delete_with_after_hint(key, after)
    }
    pub fn insert_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        let projection = &self.projection;
        self.map
            .insert_all(values.into_iter().map(|value| (projection(&value), value)));
    }
    /// Inserts values whose projected keys are already in ascending order.
    pub fn insert_all_ordered<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        let projection = &self.projection;
        self.map
            .insert_all_ordered(values.into_iter().map(|value| (projection(&value), value)));
    }
    pub fn delete_all<'a, Q, I>(&mut self, keys: I)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        self.map.delete_all(keys);
    }
    pub fn delete_all_ordered<'a, Q, I>(&mut self, keys: I)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        self.map.delete_all_ordered(keys);
    }
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.contains(key)
    }
    pub fn index_of_greater<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.index_of_greater(key)
    }
    pub fn index_of_greater_or_equal<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.index_of_greater_or_equal(key)
    }
    pub fn greater<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.greater(key)
    }
    pub fn greater_or_equal<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.greater_or_equal(key)
    }
    pub fn less<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.less(key)
    }
    pub fn less_or_equal<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.less_or_equal(key)
    }
    pub fn inclusive_range<Q>(&self, start: &Q, end: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.inclusive_range(start, end)
    }
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.get(key)
    }
    pub fn keys(&self) -> &[K] {
        self.map.keys()
    }
    pub fn values(&self) -> &[V] {
        self.map.values()
    }
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.map.iter()
    }
    /// Drops the projection and returns the underlying map.
    pub fn into_map(self) -> SortedMap<K, V> {
        self.map
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
            .field("map", &self.map)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectedMap;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: isize,
        name: String,
    }

    fn row(id: isize) -> Row {
        Row {
            id,
            name: id.to_string(),
        }
    }

    fn by_id(row: &Row) -> isize {
        row.id
    }

    #[test]
    fn test_insert_and_delete() {
        let mut map = ProjectedMap::with_capacity(5, by_id);

        assert_eq!(map.insert(row(1)), Some(0));
        assert_eq!(map.insert(row(1)), None);
        assert_eq!(map.len(), 1);
        assert!(map.contains(&1));

        assert_eq!(map.delete(&1), Some(0));
        assert_eq!(map.delete(&1), None);
        assert_eq!(map.len(), 0);
        assert!(!map.contains(&1));
    }

    #[test]
    fn test_delete_value() {
        let mut map = ProjectedMap::new(by_id);
        map.insert_all([row(3), row(1), row(2)]);

        assert_eq!(map.delete_value(&row(2)), Some(1));
        assert_eq!(map.delete_value(&row(2)), None);
        assert_eq!(map.keys(), &[1, 3]);
    }

    #[test]
    fn test_scenario() {
        let mut map = ProjectedMap::with_capacity(5, by_id);
        map.insert(row(3));

        assert_eq!(map.greater_or_equal(&3), &[row(3)]);
        assert!(map.less(&3).is_empty());

        map.delete(&3);
        assert!(!map.contains(&3));
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_range_queries() {
        let mut map = ProjectedMap::new(by_id);
        map.insert_all([row(7), row(1), row(5), row(3)]);

        assert_eq!(map.inclusive_range(&2, &5), &[row(3), row(5)]);
        assert_eq!(map.greater(&5), &[row(7)]);
        assert_eq!(map.less_or_equal(&1), &[row(1)]);
        assert!(map.inclusive_range(&5, &2).is_empty());
        assert_eq!(map.get(&5).map(|row| row.name.as_str()), Some("5"));
        assert_eq!(map.index_of_greater(&5), 3);
        assert_eq!(map.index_of_greater_or_equal(&5), 2);
    }

    #[test]
    fn test_capacity_and_clear() {
        let mut map = ProjectedMap::with_capacity(5, by_id);
        assert!(map.capacity() >= 5);

        map.insert(row(1));
        map.extend_capacity_to(32);
        assert!(map.capacity() >= 32);

        map.clear();
        assert!(map.is_empty());
        assert!(map.capacity() >= 32);
    }

    #[test]
    fn test_hints() {
        let mut map = ProjectedMap::new(by_id);
        map.insert_all([row(10), row(20)]);

        assert_eq!(map.insert_with_after_hint(row(15), 1), Some(1));
        assert!(map.try_insert_with_after_hint(row(5), 2).is_err());
        assert_eq!(map.delete_with_after_hint(&20, 1), Some(2));
        assert_eq!(map.try_delete_with_after_hint(&15, 1), Ok(Some(1)));
        assert_eq!(map.keys(), &[10]);
    }

    #[test]
    fn test_ordered_batches_match_individual_ops() {
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..50 {
            let mut ids: Vec<isize> = (0..rng.gen_range(0..64))
                .map(|_| rng.gen_range(0..128))
                .collect();
            ids.sort();

            let mut expected = ProjectedMap::new(by_id);
            ids.iter().for_each(|id| {
                expected.insert(row(*id));
            });
            let mut actual = ProjectedMap::new(by_id);
            actual.insert_all_ordered(ids.iter().map(|id| row(*id)));
            assert_eq!(actual.values(), expected.values());

            let mut deletes: Vec<isize> = (0..rng.gen_range(0..32))
                .map(|_| rng.gen_range(0..128))
                .collect();
            deletes.sort();
            expected.delete_all(&deletes);
            actual.delete_all_ordered(&deletes);
            assert_eq!(actual.values(), expected.values());
            assert!(actual.keys().windows(2).all(|pair| pair[0] < pair[1]));
            assert!(actual.iter().all(|(key, row)| *key == row.id));
        }
    }

    #[test]
    fn test_closure_projection() {
        let mut map = ProjectedMap::new(|word: &&str| word.len());
        map.insert_all(["ccc", "a", "bb", "dd"]);

        assert_eq!(map.values(), &["a", "bb", "ccc"]);
        assert_eq!(map.key_of(&"eeee"), 4);
        assert_eq!(map.into_map().keys(), &[1, 2, 3]);
    }
}
