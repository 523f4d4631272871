// Re-export key components
pub use crate::loading::{BaseRequest, BusRequest, CatalogueSnapshot, StopRequest, build_catalogue};
pub use crate::model::{Bus, BusStatistics, RouteKind, Stop, TransportCatalogue};
pub use crate::routing::{ItineraryItem, RouteItinerary, RoutingSettings, TransportRouter};
pub use crate::spatial::great_circle_distance;

// Error handling
pub use crate::{Error, Result};

// Core types
pub use crate::BusId;
pub use crate::Meters;
pub use crate::Minutes; // travel time
pub use crate::StopId;
