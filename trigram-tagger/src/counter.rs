//! Sparse frequency tables backing the statistical models.

use std::borrow::Borrow;
use std::hash::Hash;

use hashbrown::HashMap;

/// A sparse mapping from keys to `f64` counts or scores.
///
/// Only keys that have been written are stored. [`Counter::get`] reports a
/// missing key as `None`, which callers must not conflate with a stored value
/// of zero. For log-space weights the two mean "impossible" and "certain".
/// [`Counter::count`] offers the zero-defaulting read used by plain frequency
/// arithmetic.
#[derive(Clone, Debug)]
pub struct Counter<K> {
    counts: HashMap<K, f64>,
}

impl<K> Counter<K> {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no key has been stored.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<K> Default for Counter<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Counter<K>
where
    K: Eq + Hash,
{
    /// Returns the stored value for a key, or `None` if the key is absent.
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<f64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash,
    {
        self.counts.get(key).copied()
    }

    /// Returns the stored value for a key, defaulting to zero when absent.
    pub fn count<Q: ?Sized>(&self, key: &Q) -> f64
    where
        K: Borrow<Q>,
        Q: Eq + Hash,
    {
        self.get(key).unwrap_or(0.0)
    }

    /// Returns `true` if the key has a stored value.
    pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash,
    {
        self.counts.contains_key(key)
    }

    /// Stores a value for a key, replacing any previous value.
    pub fn set(&mut self, key: K, value: f64) {
        self.counts.insert(key, value);
    }

    /// Adds `amount` to the stored value of a key, starting from zero.
    pub fn increment(&mut self, key: K, amount: f64) {
        *self.counts.entry(key).or_insert(0.0) += amount;
    }

    /// Returns the entry with the largest value, or `None` if the counter is
    /// empty. Ties resolve to an arbitrary entry.
    pub fn arg_max(&self) -> Option<(&K, f64)> {
        let mut best: Option<(&K, f64)> = None;
        for (key, &value) in &self.counts {
            if best.map_or(true, |(_, b)| value > b) {
                best = Some((key, value));
            }
        }
        best
    }

    /// Sum of all stored values.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    /// Scales every entry so the values sum to one. A counter whose total is
    /// zero is left unchanged.
    pub fn normalize(&mut self) {
        let total = self.total();
        if total != 0.0 {
            for value in self.counts.values_mut() {
                *value /= total;
            }
        }
    }

    /// Iterates over `(key, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.counts.iter().map(|(key, &value)| (key, value))
    }

    /// Iterates over stored keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.counts.keys()
    }
}

/// A two-level table mapping keys to [`Counter`]s over values.
#[derive(Clone, Debug)]
pub struct CounterMap<K, V> {
    map: HashMap<K, Counter<V>>,
    empty: Counter<V>,
}

impl<K, V> CounterMap<K, V> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            empty: Counter::new(),
        }
    }

    /// Number of keys with a stored counter.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no key has been stored.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K, V> Default for CounterMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> CounterMap<K, V>
where
    K: Eq + Hash,
    V: Eq + Hash,
{
    /// Returns `true` if the key has a stored counter.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash,
    {
        self.map.contains_key(key)
    }

    /// Returns the counter stored under a key, or a shared empty counter if
    /// the key is absent. The empty counter is never stored back, so reads
    /// leave the table unchanged.
    pub fn counter<Q: ?Sized>(&self, key: &Q) -> &Counter<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash,
    {
        self.map.get(key).unwrap_or(&self.empty)
    }

    /// Adds `amount` to the count of `value` under `key`.
    pub fn increment(&mut self, key: K, value: V, amount: f64) {
        self.map.entry(key).or_default().increment(value, amount);
    }

    /// Normalizes every inner counter independently, turning each row into a
    /// conditional distribution.
    pub fn conditional_normalize(&mut self) {
        for counter in self.map.values_mut() {
            counter.normalize();
        }
    }

    /// Iterates over stored keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.map.keys()
    }

    /// Iterates over `(key, counter)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Counter<V>)> + '_ {
        self.map.iter()
    }
}
