//! Data model of the transport catalogue
//!
//! Contains the stop and bus entities and the catalogue store that owns them.

pub mod catalogue;
pub mod types;

pub use catalogue::TransportCatalogue;
pub use types::{Bus, BusStatistics, RoadDistance, RouteKind, Stop};
