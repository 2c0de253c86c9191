use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a completed measurement.
///
/// Derived from the creation time in milliseconds since the Unix epoch. When two
/// measurements complete within the same millisecond (or the clock steps back),
/// the next id is bumped one past the previous so ids stay strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementId(u64);

impl MeasurementId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Picks the id for a measurement created at `millis`, given the last issued id.
    pub fn after(previous: Option<MeasurementId>, millis: i64) -> Self {
        let candidate = u64::try_from(millis).unwrap_or(0);
        match previous {
            Some(prev) if candidate <= prev.0 => Self(prev.0.saturating_add(1)),
            _ => Self(candidate),
        }
    }
}

impl fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_id_is_the_timestamp() {
        assert_eq!(MeasurementId::after(None, 1_700_000_000_123).get(), 1_700_000_000_123);
    }

    #[test]
    fn later_timestamp_is_used_verbatim() {
        let prev = MeasurementId::new(100);
        assert_eq!(MeasurementId::after(Some(prev), 250).get(), 250);
    }

    #[test]
    fn same_millisecond_is_bumped_past_previous() {
        let prev = MeasurementId::new(100);
        assert_eq!(MeasurementId::after(Some(prev), 100).get(), 101);
    }

    #[test]
    fn clock_stepping_back_still_increases() {
        let prev = MeasurementId::new(500);
        assert_eq!(MeasurementId::after(Some(prev), 10).get(), 501);
    }

    #[test]
    fn pre_epoch_timestamp_clamps_to_zero() {
        assert_eq!(MeasurementId::after(None, -5).get(), 0);
    }
}
