use alloc::vec;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::FusedIterator;

use log::debug;
use log::trace;

use crate::array_map;
use crate::array_map::ArrayMap;
use crate::config::Config;
use crate::error::ConfigError;

#[inline(always)]
fn slot_for(hash: u64, slot_count: usize) -> usize {
    (hash % slot_count as u64) as usize
}

fn empty_slots<K, V>(slot_count: usize) -> Vec<Option<ArrayMap<K, V>>> {
    let mut slots = Vec::with_capacity(slot_count);
    slots.resize_with(slot_count, || None);
    slots
}

/// A hash map using separate chaining over lazily created [`ArrayMap`]
/// chains.
///
/// `ChainedHashMap<K, V, S>` stores key-value pairs where keys implement
/// `Hash + Eq` and uses a configurable hasher builder `S` to route each key to
/// one of `slot_count` slots. A slot holds no chain until a key is first
/// inserted there; after that its chain stays allocated, even when emptied,
/// until the slot array is replaced by a resize.
///
/// Before every insert the load factor `len / slot_count` is compared with the
/// configured threshold. If it is exceeded the slot array is doubled and every
/// entry is redistributed. The map never shrinks.
///
/// # Examples
///
/// ```rust
/// use chain_hash::ChainedHashMap;
/// use chain_hash::Config;
///
/// # #[cfg(any(feature = "std", feature = "foldhash"))]
/// # {
/// let config = Config::default().with_slot_count(4);
/// let mut map: chain_hash::DefaultChainedHashMap<&str, i32> =
///     ChainedHashMap::with_config(config).unwrap();
///
/// map.insert("a", 1);
/// map.insert("b", 2);
/// assert_eq!(map.get("a"), Some(&1));
/// assert_eq!(map.len(), 2);
/// # }
/// ```
#[derive(Clone)]
pub struct ChainedHashMap<K, V, S> {
    slots: Vec<Option<ArrayMap<K, V>>>,
    len: usize,
    config: Config,
    hash_builder: S,
}

impl<K, V, S> Debug for ChainedHashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Creates an empty map with the default [`Config`] and the given hasher
    /// builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::from_valid_config(Config::default(), hash_builder)
    }

    /// Creates an empty map with the given configuration and hasher builder.
    ///
    /// Returns an error if any configuration parameter is not positive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use chain_hash::ChainedHashMap;
    /// use chain_hash::Config;
    /// use chain_hash::ConfigError;
    ///
    /// let config = Config::new(0.75, 16, 4).unwrap();
    /// let map: ChainedHashMap<u32, u32, _> =
    ///     ChainedHashMap::with_config_and_hasher(config, RandomState::new()).unwrap();
    /// assert_eq!(map.slot_count(), 16);
    ///
    /// let bad = Config::default().with_slot_count(0);
    /// let err = ChainedHashMap::<u32, u32, _>::with_config_and_hasher(bad, RandomState::new());
    /// assert_eq!(err.unwrap_err(), ConfigError::ZeroSlotCount);
    /// # }
    /// ```
    pub fn with_config_and_hasher(config: Config, hash_builder: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config, hash_builder))
    }

    fn from_valid_config(config: Config, hash_builder: S) -> Self {
        Self {
            slots: empty_slots(config.slot_count),
            len: 0,
            config,
            hash_builder,
        }
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns `len / slot_count`.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    /// Returns the load factor above which the next insert grows the map.
    pub fn resize_threshold(&self) -> f64 {
        self.config.resize_threshold
    }

    /// Returns the initial capacity given to every chain the map creates.
    pub fn chain_capacity(&self) -> usize {
        self.config.chain_capacity
    }

    /// Returns the configuration the map was built with.
    ///
    /// `slot_count` here is the initial slot count; see
    /// [`slot_count`](Self::slot_count) for the current one.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every entry.
    ///
    /// Chains that have been created are cleared in place and stay allocated;
    /// the slot count and configuration are unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// let mut map = chain_hash::DefaultChainedHashMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// let slots = map.slot_count();
    ///
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert!(!map.contains_key(&1));
    /// assert_eq!(map.slot_count(), slots);
    /// # }
    /// ```
    pub fn clear(&mut self) {
        for chain in self.slots.iter_mut().flatten() {
            chain.clear();
        }
        self.len = 0;
    }

    /// Returns an iterator over the entries of the map in an arbitrary order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.slots, self.len)
    }

    /// Returns an iterator over the entries of the map with mutable references
    /// to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.slots, self.len)
    }

    /// Returns an iterator over the keys of the map.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values of the map.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    pub(crate) fn chains(&self) -> &[Option<ArrayMap<K, V>>] {
        &self.slots
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns the slot that `key` routes to with the current slot count.
    ///
    /// Equal keys always route to the same slot.
    pub fn slot_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        slot_for(self.hash_builder.hash_one(key), self.slots.len())
    }

    fn chain<Q>(&self, key: &Q) -> Option<&ArrayMap<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        self.slots[self.slot_index(key)].as_ref()
    }

    fn chain_mut<Q>(&mut self, key: &Q) -> Option<&mut ArrayMap<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        let index = self.slot_index(key);
        self.slots[index].as_mut()
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// let mut map = chain_hash::DefaultChainedHashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// # }
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.chain(key)?.get(key)
    }

    /// Returns the stored key and the value corresponding to the key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.chain(key)?.get_key_value(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.chain_mut(key)?.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.chain(key).is_some_and(|chain| chain.contains_key(key))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    /// If the map did have this key present, the value is updated, and the old
    /// value is returned.
    ///
    /// The load factor is checked before the entry is placed, so a map that is
    /// already over its threshold grows on the next insert whether or not the
    /// key is new.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// let mut map = chain_hash::DefaultChainedHashMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// # }
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.load_factor() > self.config.resize_threshold {
            self.resize();
        }

        let index = self.slot_index(&key);
        let chain_capacity = self.config.chain_capacity;
        let chain = self.slots[index].get_or_insert_with(|| {
            trace!("creating chain for slot {index}");
            ArrayMap::with_capacity(chain_capacity)
        });

        let previous = chain.insert(key, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// let mut map = chain_hash::DefaultChainedHashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// assert!(map.is_empty());
    /// # }
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let removed = self.chain_mut(key)?.remove_entry(key)?;
        self.len -= 1;
        Some(removed)
    }

    #[cold]
    fn resize(&mut self) {
        let new_slot_count = self.slots.len() * 2;
        debug!(
            "resizing chained hash map from {} to {} slots ({} entries, load factor {:.3})",
            self.slots.len(),
            new_slot_count,
            self.len,
            self.load_factor()
        );

        let old_slots = core::mem::replace(&mut self.slots, empty_slots(new_slot_count));
        let chain_capacity = self.config.chain_capacity;
        for (key, value) in IntoIter::new(old_slots, self.len) {
            let index = slot_for(self.hash_builder.hash_one(&key), new_slot_count);
            let previous = self.slots[index]
                .get_or_insert_with(|| ArrayMap::with_capacity(chain_capacity))
                .insert(key, value);
            debug_assert!(previous.is_none(), "duplicate key found while rehashing");
        }
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty map with the default [`Config`] and hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty map with the given configuration and the default
    /// hasher builder.
    pub fn with_config(config: Config) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, S::default())
    }
}

impl<K, V, S> Default for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ChainedHashMap<K, V, S> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for ChainedHashMap<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.slots, self.len)
    }
}

/// An iterator over the entries of a [`ChainedHashMap`].
///
/// Walks the slot array once, skipping slots that hold no chain, and yields
/// every entry of each chain in turn. It knows up front how many entries it
/// will yield and stops as soon as that many have been produced.
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Option<ArrayMap<K, V>>>,
    chain: Option<array_map::Iter<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(slots: &'a [Option<ArrayMap<K, V>>], len: usize) -> Self {
        let mut slots = slots.iter();
        let chain = slots.find_map(Option::as_ref).map(ArrayMap::iter);
        Self {
            slots,
            chain,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        loop {
            if let Some(entry) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(entry);
            }

            match self.slots.find_map(Option::as_ref) {
                Some(chain) => self.chain = Some(chain.iter()),
                None => {
                    debug_assert_eq!(self.remaining, 0, "entries missing from chains");
                    self.remaining = 0;
                    return None;
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of a [`ChainedHashMap`].
pub struct IterMut<'a, K, V> {
    slots: core::slice::IterMut<'a, Option<ArrayMap<K, V>>>,
    chain: Option<array_map::IterMut<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    fn new(slots: &'a mut [Option<ArrayMap<K, V>>], len: usize) -> Self {
        let mut slots = slots.iter_mut();
        let chain = slots.find_map(Option::as_mut).map(ArrayMap::iter_mut);
        Self {
            slots,
            chain,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        loop {
            if let Some(entry) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(entry);
            }

            match self.slots.find_map(Option::as_mut) {
                Some(chain) => self.chain = Some(chain.iter_mut()),
                None => {
                    debug_assert_eq!(self.remaining, 0, "entries missing from chains");
                    self.remaining = 0;
                    return None;
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a [`ChainedHashMap`].
///
/// Also used internally to move every entry into a new slot array on resize.
pub struct IntoIter<K, V> {
    slots: vec::IntoIter<Option<ArrayMap<K, V>>>,
    chain: Option<array_map::IntoIter<K, V>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    fn new(slots: Vec<Option<ArrayMap<K, V>>>, len: usize) -> Self {
        let mut slots = slots.into_iter();
        let chain = slots.find_map(|slot| slot).map(ArrayMap::into_iter);
        Self {
            slots,
            chain,
            remaining: len,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        loop {
            if let Some(entry) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(entry);
            }

            match self.slots.find_map(|slot| slot) {
                Some(chain) => self.chain = Some(chain.into_iter()),
                None => {
                    debug_assert_eq!(self.remaining, 0, "entries missing from chains");
                    self.remaining = 0;
                    return None;
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// An iterator over the keys of a [`ChainedHashMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`ChainedHashMap`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a [`ChainedHashMap`].
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}
