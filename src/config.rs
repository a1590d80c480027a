//! Sizing and load-factor policy for `KeyedSlotTable`.
//!
//! Defaults follow the classic policy: start (and never shrink below) 11
//! slots, grow past 70% occupancy, shrink under 20%.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TableError},
    prime::next_prime,
};

/// Default capacity floor
pub const DEFAULT_MIN_CAPACITY: usize = 11;

/// Default occupancy above which the table doubles
pub const DEFAULT_GROW_THRESHOLD: f64 = 0.70;

/// Default occupancy below which the table halves
pub const DEFAULT_SHRINK_THRESHOLD: f64 = 0.2;

/// Smallest usable floor (`h2` divides by `capacity - 1`)
const SMALLEST_FLOOR: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Requested starting capacity, rounded up to a prime `>= min_capacity`.
    /// The table never shrinks below it.
    pub initial_capacity: usize,

    /// Lower bound for `initial_capacity`
    pub min_capacity: usize,

    /// Grow when `len / capacity` exceeds this
    pub grow_threshold: f64,

    /// Shrink when `len / capacity` falls below this
    pub shrink_threshold: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_MIN_CAPACITY,
            min_capacity: DEFAULT_MIN_CAPACITY,
            grow_threshold: DEFAULT_GROW_THRESHOLD,
            shrink_threshold: DEFAULT_SHRINK_THRESHOLD,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_min_capacity(mut self, capacity: usize) -> Self {
        self.min_capacity = capacity;
        self
    }

    pub fn with_grow_threshold(mut self, ratio: f64) -> Self {
        self.grow_threshold = ratio;
        self
    }

    pub fn with_shrink_threshold(mut self, ratio: f64) -> Self {
        self.shrink_threshold = ratio;
        self
    }

    /// Capacity the table starts at and never shrinks below
    pub fn floor_capacity(&self) -> usize {
        next_prime(self.initial_capacity.max(self.min_capacity))
    }

    /// Check that the policy keeps probe walks terminating and cannot
    /// bounce between growing and shrinking
    pub fn validate(&self) -> Result<()> {
        if self.min_capacity < SMALLEST_FLOOR {
            return Err(TableError::invalid_config(
                "min_capacity",
                format!("must be at least {SMALLEST_FLOOR}, got {}", self.min_capacity),
            ));
        }

        if !(self.grow_threshold > 0.0 && self.grow_threshold < 1.0) {
            return Err(TableError::invalid_config(
                "grow_threshold",
                format!("must be in (0, 1), got {}", self.grow_threshold),
            ));
        }

        if !(self.shrink_threshold > 0.0 && self.shrink_threshold < 1.0) {
            return Err(TableError::invalid_config(
                "shrink_threshold",
                format!("must be in (0, 1), got {}", self.shrink_threshold),
            ));
        }

        // a shrink from capacity t lands on at least (t - 1) / 2 slots, so
        // occupancy just under the shrink threshold can scale by 2t / (t - 1);
        // t is smallest at the first prime above the floor
        let first_above = next_prime(self.floor_capacity() + 1) as f64;
        let after_shrink = 2.0 * self.shrink_threshold * first_above / (first_above - 1.0);
        if after_shrink >= self.grow_threshold {
            return Err(TableError::invalid_config(
                "shrink_threshold",
                format!(
                    "a shrink at {} can reach occupancy {after_shrink:.3}, not below the grow threshold ({})",
                    self.shrink_threshold, self.grow_threshold
                ),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TableConfig::default();
        assert_eq!(config.initial_capacity, 11);
        assert_eq!(config.min_capacity, 11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = TableConfig::new()
            .with_initial_capacity(100)
            .with_min_capacity(5)
            .with_grow_threshold(0.8)
            .with_shrink_threshold(0.1);
        assert_eq!(config.initial_capacity, 100);
        assert_eq!(config.min_capacity, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_small_floor() {
        let err = TableConfig::new().with_min_capacity(2).validate().unwrap_err();
        assert!(matches!(err, TableError::InvalidConfig { field: "min_capacity", .. }));
    }

    #[test]
    fn test_rejects_thresholds_out_of_range() {
        for ratio in [0.0, 1.0, 1.5, -0.1, f64::NAN] {
            let err = TableConfig::new().with_grow_threshold(ratio).validate().unwrap_err();
            assert!(matches!(err, TableError::InvalidConfig { field: "grow_threshold", .. }));
        }

        let err = TableConfig::new().with_shrink_threshold(0.0).validate().unwrap_err();
        assert!(matches!(err, TableError::InvalidConfig { field: "shrink_threshold", .. }));
    }

    #[test]
    fn test_rejects_oscillating_thresholds() {
        let err = TableConfig::new()
            .with_grow_threshold(0.5)
            .with_shrink_threshold(0.3)
            .validate()
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidConfig { field: "shrink_threshold", .. }));
    }

    #[test]
    fn test_rejects_shrink_that_rounds_past_grow() {
        // 2 * 0.349 < 0.70, but 23 slots shrink to 11, not 11.5
        let err = TableConfig::new()
            .with_grow_threshold(0.70)
            .with_shrink_threshold(0.349)
            .validate()
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidConfig { field: "shrink_threshold", .. }));

        // 2 * 0.32 * 13 / 12 ~ 0.693 stays under
        assert!(TableConfig::new()
            .with_grow_threshold(0.70)
            .with_shrink_threshold(0.32)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_floor_capacity() {
        assert_eq!(TableConfig::new().floor_capacity(), 11);
        assert_eq!(TableConfig::new().with_initial_capacity(1000).floor_capacity(), 1009);
        assert_eq!(TableConfig::new().with_initial_capacity(2).floor_capacity(), 11);
        assert_eq!(
            TableConfig::new().with_min_capacity(20).with_initial_capacity(0).floor_capacity(),
            23
        );
    }

    #[test]
    fn test_json_round_trip() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let config = TableConfig::new().with_initial_capacity(64);
        let json = serde_json::to_string_pretty(&config)?;
        let decoded: TableConfig = serde_json::from_str(&json)?;
        assert_eq!(config, decoded);
        Ok(())
    }

    #[test]
    fn test_json_missing_fields_use_defaults() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let decoded: TableConfig = serde_json::from_str(r#"{ "grow_threshold": 0.75 }"#)?;
        assert_eq!(decoded.grow_threshold, 0.75);
        assert_eq!(decoded.min_capacity, DEFAULT_MIN_CAPACITY);
        assert_eq!(decoded.shrink_threshold, DEFAULT_SHRINK_THRESHOLD);
        Ok(())
    }
}
