//! Value objects for quantity samples and the queries that select them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of quantity data a store can record and observers can watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCategory {
    HeartRate,
    RestingHeartRate,
    OxygenSaturation,
}

impl std::fmt::Display for DataCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataCategory::HeartRate => write!(f, "heart_rate"),
            DataCategory::RestingHeartRate => write!(f, "resting_heart_rate"),
            DataCategory::OxygenSaturation => write!(f, "oxygen_saturation"),
        }
    }
}

impl std::str::FromStr for DataCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heart_rate" => Ok(DataCategory::HeartRate),
            "resting_heart_rate" => Ok(DataCategory::RestingHeartRate),
            "oxygen_saturation" => Ok(DataCategory::OxygenSaturation),
            _ => Err(format!("Invalid data category: {}", s)),
        }
    }
}

/// Unit a sample value is expressed in
///
/// Display strings follow the `count/min` convention used by wearable
/// platforms, so logs read the same as the device's own unit labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    CountPerMinute,
    CountPerSecond,
    Percent,
}

impl Unit {
    /// Scale of one unit of `self` measured in the per-minute base unit.
    /// Percent has no time dimension and scales as identity.
    fn per_minute_scale(&self) -> f64 {
        match self {
            Unit::CountPerMinute => 1.0,
            Unit::CountPerSecond => 60.0,
            Unit::Percent => 1.0,
        }
    }

    /// Convert `value` expressed in `self` into `target` units
    pub fn convert(&self, value: f64, target: Unit) -> f64 {
        value * self.per_minute_scale() / target.per_minute_scale()
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::CountPerMinute => write!(f, "count/min"),
            Unit::CountPerSecond => write!(f, "count/s"),
            Unit::Percent => write!(f, "%"),
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "count/min" | "count_per_minute" | "bpm" => Ok(Unit::CountPerMinute),
            "count/s" | "count_per_second" => Ok(Unit::CountPerSecond),
            "%" | "percent" => Ok(Unit::Percent),
            _ => Err(format!("Invalid unit: {}", s)),
        }
    }
}

/// Inclusive time window a query selects samples from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleFilter {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SampleFilter {
    /// Window from the distant past up to and including `end`
    pub fn up_to(end: DateTime<Utc>) -> Self {
        Self {
            start: DateTime::<Utc>::MIN_UTC,
            end,
        }
    }

    /// Window between `start` and `end`, both inclusive
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn matches(&self, recorded_at: DateTime<Utc>) -> bool {
        recorded_at >= self.start && recorded_at <= self.end
    }
}

/// Sort order for query results, keyed on the sample's recording time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
        }
    }
}

/// Query describing which samples to fetch and in what shape
///
/// `limit: None` means the store returns every matching sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleQuery {
    pub category: DataCategory,
    pub filter: Option<SampleFilter>,
    pub sort: SortOrder,
    pub limit: Option<usize>,
}

impl SampleQuery {
    pub fn new(category: DataCategory) -> Self {
        Self {
            category,
            filter: None,
            sort: SortOrder::Ascending,
            limit: None,
        }
    }

    pub fn with_filter(mut self, filter: SampleFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
