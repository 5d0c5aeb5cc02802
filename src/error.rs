use thiserror::Error;

/// Error returned when a [`Config`](crate::Config) cannot be used to build a
/// map.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The initial number of slots was zero.
    #[error("slot count must be greater than zero")]
    ZeroSlotCount,
    /// The initial capacity of each chain was zero.
    #[error("chain capacity must be greater than zero")]
    ZeroChainCapacity,
    /// The resize threshold was zero, negative, infinite or NaN.
    #[error("resize threshold must be a finite number greater than zero, got {0}")]
    InvalidResizeThreshold(f64),
}
