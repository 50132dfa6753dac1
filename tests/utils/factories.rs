/// Test data factories using builder pattern
///
/// Provides convenient methods to create samples with sensible defaults.
/// Timestamps default to a fixed base instant so tests stay deterministic.
use chrono::{DateTime, Duration, TimeZone, Utc};
use pulsewatch::modules::health::domain::{DataCategory, QuantitySample, Unit};

/// Fixed reference instant all factory timestamps are relative to
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
}

pub struct SampleFactory {
    category: DataCategory,
    value: f64,
    unit: Unit,
    recorded_at: DateTime<Utc>,
}

impl Default for SampleFactory {
    fn default() -> Self {
        Self {
            category: DataCategory::HeartRate,
            value: 72.0,
            unit: Unit::CountPerMinute,
            recorded_at: base_time(),
        }
    }
}

impl SampleFactory {
    pub fn heart_rate() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: DataCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn recorded_at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = recorded_at;
        self
    }

    /// Timestamp `seconds` after the factory base instant
    pub fn at_offset_secs(mut self, seconds: i64) -> Self {
        self.recorded_at = base_time() + Duration::seconds(seconds);
        self
    }

    pub fn build(self) -> QuantitySample {
        QuantitySample::new(self.category, self.value, self.unit, self.recorded_at)
    }
}
