use crate::error::ConfigError;

/// Default load factor above which the slot array is doubled.
pub const DEFAULT_RESIZE_THRESHOLD: f64 = 0.5;

/// Default number of slots allocated by a new map.
pub const DEFAULT_SLOT_COUNT: usize = 12;

/// Default initial capacity of each chain created by a map.
pub const DEFAULT_CHAIN_CAPACITY: usize = 8;

/// Construction parameters for a [`ChainedHashMap`].
///
/// All three values must be positive; they are checked by [`validate`] when
/// the map is built, so a map never exists with an unusable configuration.
///
/// # Examples
///
/// ```rust
/// use chain_hash::Config;
/// use chain_hash::ConfigError;
///
/// let config = Config::default()
///     .with_slot_count(64)
///     .with_resize_threshold(0.75);
/// assert!(config.validate().is_ok());
///
/// let bad = Config::default().with_chain_capacity(0);
/// assert_eq!(bad.validate(), Err(ConfigError::ZeroChainCapacity));
/// ```
///
/// [`ChainedHashMap`]: crate::ChainedHashMap
/// [`validate`]: Config::validate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// When `len / slot_count` exceeds this value before an insert, the slot
    /// array is doubled and every entry is rehashed.
    pub resize_threshold: f64,
    /// Number of slots the map starts with.
    pub slot_count: usize,
    /// Initial capacity of every chain the map creates.
    pub chain_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resize_threshold: DEFAULT_RESIZE_THRESHOLD,
            slot_count: DEFAULT_SLOT_COUNT,
            chain_capacity: DEFAULT_CHAIN_CAPACITY,
        }
    }
}

impl Config {
    /// Creates a configuration from its three parameters, checking them.
    pub fn new(
        resize_threshold: f64,
        slot_count: usize,
        chain_capacity: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            resize_threshold,
            slot_count,
            chain_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the load factor above which the map grows.
    pub fn with_resize_threshold(mut self, resize_threshold: f64) -> Self {
        self.resize_threshold = resize_threshold;
        self
    }

    /// Sets the initial number of slots.
    pub fn with_slot_count(mut self, slot_count: usize) -> Self {
        self.slot_count = slot_count;
        self
    }

    /// Sets the initial capacity of each chain.
    pub fn with_chain_capacity(mut self, chain_capacity: usize) -> Self {
        self.chain_capacity = chain_capacity;
        self
    }

    /// Checks that every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_count == 0 {
            return Err(ConfigError::ZeroSlotCount);
        }
        if self.chain_capacity == 0 {
            return Err(ConfigError::ZeroChainCapacity);
        }
        // Written so that NaN is rejected too.
        if !(self.resize_threshold > 0.0 && self.resize_threshold.is_finite()) {
            return Err(ConfigError::InvalidResizeThreshold(self.resize_threshold));
        }
        Ok(())
    }
}
