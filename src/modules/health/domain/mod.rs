pub mod entities;
pub mod value_objects;

pub use entities::{AuthorizationRequest, QuantitySample};
pub use value_objects::{DataCategory, SampleFilter, SampleQuery, SortOrder, Unit};
