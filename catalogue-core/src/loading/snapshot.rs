//! Persistent form of a loaded catalogue
//!
//! A snapshot lists stops, road distances and buses in arena order, so
//! restoring it replays the same `add_*` calls and reproduces the same stop
//! and bus ids, statistics and routes.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use geo::Point;
use log::info;
use serde::{Deserialize, Serialize};

use crate::model::{RouteKind, TransportCatalogue};
use crate::{Error, Meters, Result, RoutingSettings, StopId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopSnapshot {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceSnapshot {
    pub from: StopId,
    pub to: StopId,
    pub meters: Meters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusSnapshot {
    pub name: String,
    pub kind: RouteKind,
    pub stops: Vec<StopId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogueSnapshot {
    pub stops: Vec<StopSnapshot>,
    /// Sorted by `(from, to)`
    pub distances: Vec<DistanceSnapshot>,
    pub buses: Vec<BusSnapshot>,
    #[serde(default)]
    pub routing_settings: Option<RoutingSettings>,
}

impl CatalogueSnapshot {
    pub fn from_catalogue(catalogue: &TransportCatalogue) -> Self {
        let stops = catalogue
            .stops()
            .iter()
            .map(|stop| StopSnapshot {
                name: stop.name.clone(),
                latitude: stop.latitude(),
                longitude: stop.longitude(),
            })
            .collect();

        let mut distances: Vec<DistanceSnapshot> = catalogue
            .distances()
            .map(|d| DistanceSnapshot {
                from: d.from,
                to: d.to,
                meters: d.meters,
            })
            .collect();
        distances.sort_unstable_by_key(|d| (d.from, d.to));

        let buses = catalogue
            .buses()
            .iter()
            .map(|bus| BusSnapshot {
                name: bus.name.clone(),
                kind: bus.kind,
                stops: bus.stops.clone(),
            })
            .collect();

        Self {
            stops,
            distances,
            buses,
            routing_settings: catalogue.routing_settings(),
        }
    }

    /// Rebuilds the catalogue by replaying the recorded additions
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot refers to stop ids it does not contain
    /// or breaks a catalogue invariant
    pub fn into_catalogue(self) -> Result<TransportCatalogue> {
        let mut catalogue = TransportCatalogue::new();

        for stop in &self.stops {
            catalogue.add_stop(&stop.name, Point::new(stop.longitude, stop.latitude))?;
        }

        for distance in &self.distances {
            catalogue.add_distance(
                self.stop_name(distance.from)?,
                self.stop_name(distance.to)?,
                distance.meters,
            )?;
        }

        for bus in &self.buses {
            let stops = bus
                .stops
                .iter()
                .map(|&id| self.stop_name(id))
                .collect::<Result<Vec<&str>>>()?;
            catalogue.add_bus(&bus.name, bus.kind, &stops)?;
        }

        if let Some(settings) = self.routing_settings {
            catalogue.set_routing_settings(settings)?;
        }

        Ok(catalogue)
    }

    fn stop_name(&self, id: StopId) -> Result<&str> {
        self.stops
            .get(id)
            .map(|stop| stop.name.as_str())
            .ok_or_else(|| Error::InvalidData(format!("Snapshot refers to unknown stop id {id}")))
    }

    /// # Errors
    ///
    /// Returns an error if writing or encoding fails
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if reading or decoding fails
    pub fn read_json<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes the snapshot to a file, replacing it if it exists
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to create snapshot '{}': {}", path.display(), e),
            )
        })?;
        let mut writer = BufWriter::new(file);
        self.write_json(&mut writer)?;
        writer.flush()?;
        info!(
            "Saved snapshot with {} stops and {} buses to {}",
            self.stops.len(),
            self.buses.len(),
            path.display()
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to open snapshot '{}': {}", path.display(), e),
            )
        })?;
        let snapshot = Self::read_json(BufReader::new(file))?;
        info!(
            "Loaded snapshot with {} stops and {} buses from {}",
            snapshot.stops.len(),
            snapshot.buses.len(),
            path.display()
        );
        Ok(snapshot)
    }
}
