use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{DataCategory, Unit};

/// A single measured quantity, as recorded by the device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitySample {
    pub id: Uuid,
    pub category: DataCategory,
    pub value: f64,
    pub unit: Unit,
    pub recorded_at: DateTime<Utc>,
}

impl QuantitySample {
    pub fn new(category: DataCategory, value: f64, unit: Unit, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            value,
            unit,
            recorded_at,
        }
    }

    /// Create a heart rate sample in beats per minute
    pub fn heart_rate(value: f64, recorded_at: DateTime<Utc>) -> Self {
        Self::new(
            DataCategory::HeartRate,
            value,
            Unit::CountPerMinute,
            recorded_at,
        )
    }

    /// The sample's value expressed in `unit`
    pub fn value_in(&self, unit: Unit) -> f64 {
        self.unit.convert(self.value, unit)
    }
}

/// Categories an application wants permission to write and to read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub share: Vec<DataCategory>,
    pub read: Vec<DataCategory>,
}

impl AuthorizationRequest {
    pub fn share_and_read(share: Vec<DataCategory>, read: Vec<DataCategory>) -> Self {
        Self { share, read }
    }

    /// Read-only access, nothing shared back to the store
    pub fn read_only(read: Vec<DataCategory>) -> Self {
        Self { share: Vec::new(), read }
    }
}
