use serde::Serialize;

use crate::Minutes;

/// One step of a trip
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ItineraryItem {
    /// Waiting for a bus at a stop
    Wait { stop_name: String, time: Minutes },
    /// Riding a bus past `span_count` stops
    Bus {
        bus: String,
        span_count: usize,
        time: Minutes,
    },
}

impl ItineraryItem {
    pub fn time(&self) -> Minutes {
        match self {
            Self::Wait { time, .. } | Self::Bus { time, .. } => *time,
        }
    }
}

/// Fastest trip between two stops
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteItinerary {
    pub total_time: Minutes,
    pub items: Vec<ItineraryItem>,
}
