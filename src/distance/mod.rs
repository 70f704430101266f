//! Distance Module
//!
//! Great-circle math and the calculation service built on the geocoder and
//! query repository.

mod math;
mod service;

pub use math::{great_circle, Distance, EARTH_RADIUS_KM, KM_PER_MILE};
pub use service::{DistanceError, DistanceService};
