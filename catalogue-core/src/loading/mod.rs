//! This module is responsible for filling a catalogue from base requests
//! and for saving and restoring catalogue snapshots.

mod builder;
mod records;
pub mod snapshot;

pub use builder::build_catalogue;
pub use records::{BaseRequest, BusRequest, StopRequest};
pub use snapshot::CatalogueSnapshot;
