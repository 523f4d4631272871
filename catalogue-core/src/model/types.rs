//! Catalogue entities

use geo::Point;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::{Meters, StopId};

/// Bus stop
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    /// x = longitude, y = latitude
    pub geometry: Point<f64>,
}

impl Stop {
    pub fn latitude(&self) -> f64 {
        self.geometry.y()
    }

    pub fn longitude(&self) -> f64 {
        self.geometry.x()
    }
}

/// How a bus travels along its stop list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteKind {
    /// Stop list is traversed once; the last stop equals the first one
    Circular,
    /// Stop list is traversed there and back again
    TwoDirectional,
}

impl RouteKind {
    pub fn from_roundtrip(is_roundtrip: bool) -> Self {
        if is_roundtrip {
            Self::Circular
        } else {
            Self::TwoDirectional
        }
    }

    pub fn is_roundtrip(self) -> bool {
        self == Self::Circular
    }
}

/// Bus route
#[derive(Debug, Clone)]
pub struct Bus {
    pub name: String,
    pub kind: RouteKind,
    /// Stops in the order they are listed, without the way back
    pub stops: Vec<StopId>,
    pub unique_stops: HashSet<StopId>,
}

impl Bus {
    /// Number of stops visited on a full trip
    pub fn stops_count(&self) -> usize {
        match self.kind {
            RouteKind::Circular => self.stops.len(),
            RouteKind::TwoDirectional => (self.stops.len() * 2).saturating_sub(1),
        }
    }

    pub fn unique_stops_count(&self) -> usize {
        self.unique_stops.len()
    }

    /// Routes with fewer than two distinct stops have no meaningful length
    pub fn is_degenerate(&self) -> bool {
        self.unique_stops.len() < 2
    }

    /// Stop sequences in every direction the bus travels
    pub fn directions(&self) -> impl Iterator<Item = Vec<StopId>> + '_ {
        let backward: Option<Vec<StopId>> = match self.kind {
            RouteKind::Circular => None,
            RouteKind::TwoDirectional => Some(self.stops.iter().rev().copied().collect()),
        };
        std::iter::once(self.stops.clone()).chain(backward)
    }
}

/// Derived per-bus statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BusStatistics {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    /// Sum of road distances along the full trip
    pub route_length: u64,
    /// Sum of great-circle distances along the full trip
    pub geographic_length: f64,
    /// `route_length / geographic_length`, `None` when the geographic length is zero
    pub curvature: Option<f64>,
}

/// Directional road distance between two stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadDistance {
    pub from: StopId,
    pub to: StopId,
    pub meters: Meters,
}
