use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Meters;

/// Stop definition with road distances to neighbouring stops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Distances from this stop to the named stops, in meters
    #[serde(default)]
    pub road_distances: BTreeMap<String, Meters>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusRequest {
    pub name: String,
    pub stops: Vec<String>,
    /// `true` for circular routes, `false` for routes that turn back at the last stop
    pub is_roundtrip: bool,
}

/// Base request filling the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopRequest),
    Bus(BusRequest),
}
