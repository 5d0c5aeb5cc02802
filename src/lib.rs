#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

/// A small array-backed map used as the chain of a single slot.
///
/// This module provides `ArrayMap`, an unordered linear-scan map whose entries
/// live contiguously at the front of one growable array.
pub mod array_map;

/// A hash map using separate chaining.
///
/// This module provides `ChainedHashMap`, which routes keys to lazily created
/// `ArrayMap` chains and doubles its slot array when the load factor exceeds
/// the configured threshold.
pub mod chained_hash_map;

mod config;
mod error;

#[cfg(any(test, feature = "stats"))]
mod stats;

pub use array_map::ArrayMap;
pub use chained_hash_map::ChainedHashMap;
pub use config::Config;
pub use config::DEFAULT_CHAIN_CAPACITY;
pub use config::DEFAULT_RESIZE_THRESHOLD;
pub use config::DEFAULT_SLOT_COUNT;
pub use error::ConfigError;
#[cfg(any(test, feature = "stats"))]
pub use stats::ChainStats;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    }
}

/// A [`ChainedHashMap`] using [`DefaultHashBuilder`].
#[cfg(any(feature = "foldhash", feature = "std"))]
pub type DefaultChainedHashMap<K, V> = ChainedHashMap<K, V, DefaultHashBuilder>;
