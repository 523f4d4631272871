//! Transport catalogue core
//!
//! In-memory store of bus stops and bus routes with statistics queries,
//! a derived wait/ride graph for fastest-trip queries, and a snapshot
//! layer for persisting a loaded catalogue.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod spatial;

pub use error::{Error, Result};
pub use model::{Bus, BusStatistics, RouteKind, Stop, TransportCatalogue};
pub use routing::{ItineraryItem, RouteItinerary, RoutingSettings, TransportRouter};

/// Index of a stop in the catalogue arena
pub type StopId = usize;
/// Index of a bus in the catalogue arena
pub type BusId = usize;
/// Road distance in meters
pub type Meters = u32;
/// Travel time in minutes
pub type Minutes = f64;
