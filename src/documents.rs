//! JSON documents read by the two command line modes

use std::path::PathBuf;

use catalogue_core::RoutingSettings;
use catalogue_core::loading::BaseRequest;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SerializationSettings {
    /// Snapshot file path
    pub file: PathBuf,
}

/// Input of `make-base`
#[derive(Debug, Deserialize)]
pub struct MakeBaseDocument {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
    pub routing_settings: Option<RoutingSettings>,
    pub serialization_settings: SerializationSettings,
}

/// Input of `process-requests`
#[derive(Debug, Deserialize)]
pub struct ProcessRequestsDocument {
    pub serialization_settings: SerializationSettings,
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Route { id: i64, from: String, to: String },
    Map { id: i64 },
}

impl StatRequest {
    pub fn id(&self) -> i64 {
        match self {
            Self::Bus { id, .. }
            | Self::Stop { id, .. }
            | Self::Route { id, .. }
            | Self::Map { id } => *id,
        }
    }
}
