//! Routing over the catalogue: generic shortest-path engine and the wait/ride graph

pub mod dijkstra;
pub mod graph;
mod itinerary;
mod settings;
mod transport_router;

pub use dijkstra::{RouteInfo, Router};
pub use graph::{DirectedWeightedGraph, Edge, EdgeId, VertexId};
pub use itinerary::{ItineraryItem, RouteItinerary};
pub use settings::RoutingSettings;
pub use transport_router::{EdgePayload, TransportRouter, wait_end, wait_start};
