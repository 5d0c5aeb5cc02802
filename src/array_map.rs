use alloc::vec;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt::Debug;
use core::iter::FusedIterator;

/// Capacity used by [`ArrayMap::new`] and restored by [`ArrayMap::clear`].
pub const DEFAULT_CAPACITY: usize = 15;

/// A small unordered map backed by a single array of `(K, V)` entries.
///
/// Lookups are linear scans, so this is only suitable for a handful of entries.
/// [`ChainedHashMap`] uses one `ArrayMap` per slot to hold every key that
/// hashes there.
///
/// The live entries always occupy the front of the array. When the array is
/// full, its capacity is doubled before appending. Removal moves the last entry
/// into the vacated position, so the order of entries is not preserved.
///
/// # Examples
///
/// ```rust
/// use chain_hash::ArrayMap;
///
/// let mut map = ArrayMap::with_capacity(2);
/// assert_eq!(map.insert("a", 1), None);
/// assert_eq!(map.insert("b", 2), None);
/// assert_eq!(map.insert("a", 3), Some(1));
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.remove("a"), Some(3));
/// assert_eq!(map.get("b"), Some(&2));
/// ```
///
/// [`ChainedHashMap`]: crate::ChainedHashMap
#[derive(Clone)]
pub struct ArrayMap<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Debug for ArrayMap<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for ArrayMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ArrayMap<K, V> {
    /// Creates an empty map with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty map with room for `capacity` entries before it needs to
    /// grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries the map can hold without growing.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Removes every entry and releases the backing array, replacing it with a
    /// fresh one of the default capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::ArrayMap;
    /// use chain_hash::array_map::DEFAULT_CAPACITY;
    ///
    /// let mut map = ArrayMap::with_capacity(64);
    /// map.insert(1, "one");
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= DEFAULT_CAPACITY);
    /// assert!(map.capacity() < 64);
    /// ```
    pub fn clear(&mut self) {
        self.entries = Vec::with_capacity(DEFAULT_CAPACITY);
    }

    /// Returns an iterator over the entries in storage order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over the entries in storage order, with mutable
    /// references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.entries.iter_mut(),
        }
    }

    fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.entries.iter().position(|(k, _)| k.borrow() == key)
    }
}

impl<K, V> ArrayMap<K, V>
where
    K: Eq,
{
    /// Returns a reference to the value stored for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.entries
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(k, v)| (k, v))
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.entries
            .iter_mut()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the map holds an entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.position(key).is_some()
    }

    /// Inserts a key-value pair.
    ///
    /// If the key was already present its value is replaced in place and the
    /// old value returned. Otherwise the entry is appended, doubling the
    /// capacity first if the array is full, and `None` is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(index) = self.position(&key) {
            return Some(core::mem::replace(&mut self.entries[index].1, value));
        }

        if self.entries.len() == self.entries.capacity() {
            self.entries.reserve_exact(self.entries.capacity().max(1));
        }
        self.entries.push((key, value));
        None
    }

    /// Removes `key` and returns its value.
    ///
    /// The last entry is moved into the removed entry's position.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key` and returns the stored key and its value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let index = self.position(key)?;
        Some(self.entries.swap_remove(index))
    }
}

impl<K, V> Extend<(K, V)> for ArrayMap<K, V>
where
    K: Eq,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ArrayMap<K, V>
where
    K: Eq,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V> IntoIterator for &'a ArrayMap<K, V> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut ArrayMap<K, V> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for ArrayMap<K, V> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

/// An iterator over the entries of an [`ArrayMap`].
pub struct Iter<'a, K, V> {
    inner: core::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of an [`ArrayMap`].
pub struct IterMut<'a, K, V> {
    inner: core::slice::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An owning iterator over the entries of an [`ArrayMap`].
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
