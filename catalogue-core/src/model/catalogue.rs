//! Catalogue store: stops, buses, road distances and derived statistics

use std::collections::BTreeSet;
use std::sync::OnceLock;

use geo::{Point, Rect, coord};
use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use log::{debug, warn};

use super::types::{Bus, BusStatistics, RoadDistance, RouteKind, Stop};
use crate::routing::{RouteItinerary, RoutingSettings, TransportRouter};
use crate::spatial::great_circle_distance;
use crate::{BusId, Error, Meters, Result, StopId};

/// Main catalogue structure
///
/// Stops and buses live in append-only arenas and refer to each other by index,
/// so stop names are interned once on insertion. All mutations go through
/// `&mut self` and drop the cached router; queries only need `&self`.
#[derive(Debug, Default)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    stop_index: HashMap<String, StopId>,
    buses: Vec<Bus>,
    bus_index: HashMap<String, BusId>,
    /// Buses passing through each stop, indexed by `StopId`
    stop_buses: Vec<BTreeSet<BusId>>,
    distances: HashMap<(StopId, StopId), Meters>,
    bounds: Option<Rect<f64>>,
    routing_settings: Option<RoutingSettings>,
    router: OnceLock<TransportRouter>,
}

impl TransportCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stop with coordinates (x = longitude, y = latitude)
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the coordinates are out of range
    pub fn add_stop(&mut self, name: &str, geometry: Point<f64>) -> Result<StopId> {
        if self.stop_index.contains_key(name) {
            return Err(Error::DuplicateStop(name.to_string()));
        }
        validate_coordinates(name, geometry)?;

        let id = self.stops.len();
        self.stops.push(Stop {
            name: name.to_string(),
            geometry,
        });
        self.stop_index.insert(name.to_string(), id);
        self.stop_buses.push(BTreeSet::new());
        self.extend_bounds(geometry);
        self.router.take();

        debug!("Added stop {name} ({}, {})", geometry.y(), geometry.x());
        Ok(id)
    }

    /// Records the road distance from one stop to another
    ///
    /// Adding the same ordered pair again overwrites the previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if either stop is unknown
    pub fn add_distance(&mut self, from: &str, to: &str, meters: Meters) -> Result<()> {
        let from_id = self.resolve_stop(from)?;
        let to_id = self.resolve_stop(to)?;
        self.distances.insert((from_id, to_id), meters);
        self.router.take();
        Ok(())
    }

    /// Adds a bus visiting the given stops in order
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken, the stop list is empty, a stop is
    /// unknown, or two consecutive stops have no road distance in either direction
    pub fn add_bus(&mut self, name: &str, kind: RouteKind, stop_names: &[&str]) -> Result<BusId> {
        if self.bus_index.contains_key(name) {
            return Err(Error::DuplicateBus(name.to_string()));
        }
        if stop_names.is_empty() {
            return Err(Error::EmptyRoute(name.to_string()));
        }

        let stops = stop_names
            .iter()
            .map(|stop| self.resolve_stop(stop))
            .collect::<Result<Vec<StopId>>>()?;

        if let Some((&from, &to)) = stops
            .iter()
            .tuple_windows()
            .find(|&(&from, &to)| self.distance_between(from, to).is_none())
        {
            return Err(Error::MissingDistance {
                from: self.stops[from].name.clone(),
                to: self.stops[to].name.clone(),
            });
        }

        let unique_stops: HashSet<StopId> = stops.iter().copied().collect();
        let id = self.buses.len();
        for &stop in &unique_stops {
            self.stop_buses[stop].insert(id);
        }

        let bus = Bus {
            name: name.to_string(),
            kind,
            stops,
            unique_stops,
        };
        if bus.is_degenerate() {
            warn!("Bus {name} has fewer than two distinct stops");
        }
        debug!("Added bus {name} with {} stops", bus.stops_count());

        self.buses.push(bus);
        self.bus_index.insert(name.to_string(), id);
        self.router.take();
        Ok(id)
    }

    pub fn stop(&self, name: &str) -> Option<&Stop> {
        self.stop_index.get(name).map(|&id| &self.stops[id])
    }

    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    pub fn stop_by_id(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    pub fn bus(&self, name: &str) -> Option<&Bus> {
        self.bus_index.get(name).map(|&id| &self.buses[id])
    }

    pub fn bus_by_id(&self, id: BusId) -> Option<&Bus> {
        self.buses.get(id)
    }

    /// All stops in insertion order, position equals `StopId`
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// All buses in insertion order, position equals `BusId`
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    /// Bounding box of all stop coordinates, `None` while there are no stops
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.bounds
    }

    /// Road distance between two stops
    ///
    /// Falls back to the opposite direction when only that one was recorded.
    pub fn distance_between(&self, from: StopId, to: StopId) -> Option<Meters> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
    }

    /// Same as [`Self::distance_between`], by stop names
    pub fn distance(&self, from: &str, to: &str) -> Option<Meters> {
        self.distance_between(self.stop_id(from)?, self.stop_id(to)?)
    }

    /// Every recorded directional distance, in no particular order
    pub fn distances(&self) -> impl Iterator<Item = RoadDistance> + '_ {
        self.distances
            .iter()
            .map(|(&(from, to), &meters)| RoadDistance { from, to, meters })
    }

    /// Computes statistics for a bus, `None` if the bus is unknown
    pub fn bus_statistics(&self, name: &str) -> Option<BusStatistics> {
        let bus = self.bus(name)?;

        let route_length: u64 = bus
            .directions()
            .map(|stops| self.road_length(&stops))
            .sum();

        let forward_length: f64 = bus
            .stops
            .iter()
            .tuple_windows()
            .map(|(&from, &to)| {
                great_circle_distance(self.stops[from].geometry, self.stops[to].geometry)
            })
            .sum();
        let geographic_length = match bus.kind {
            RouteKind::Circular => forward_length,
            RouteKind::TwoDirectional => forward_length * 2.0,
        };

        #[allow(clippy::cast_precision_loss)]
        let curvature = (geographic_length > 0.0).then(|| route_length as f64 / geographic_length);

        Some(BusStatistics {
            stop_count: bus.stops_count(),
            unique_stop_count: bus.unique_stops_count(),
            route_length,
            geographic_length,
            curvature,
        })
    }

    /// Names of buses passing through a stop, sorted
    ///
    /// `None` if the stop is unknown, an empty set if no bus serves it.
    pub fn buses_through_stop(&self, name: &str) -> Option<BTreeSet<&str>> {
        let id = self.stop_id(name)?;
        Some(
            self.stop_buses[id]
                .iter()
                .map(|&bus| self.buses[bus].name.as_str())
                .collect(),
        )
    }

    /// Replaces the routing settings and drops the cached router
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid; the previous ones are kept
    pub fn set_routing_settings(&mut self, settings: RoutingSettings) -> Result<()> {
        settings.validate()?;
        self.routing_settings = Some(settings);
        self.router.take();
        Ok(())
    }

    pub fn routing_settings(&self) -> Option<RoutingSettings> {
        self.routing_settings
    }

    /// Router over the current catalogue, built once on first use
    ///
    /// Concurrent first calls block until a single build finishes.
    ///
    /// # Errors
    ///
    /// Returns an error if routing settings are not configured
    pub fn router(&self) -> Result<&TransportRouter> {
        let settings = self.routing_settings.ok_or(Error::RoutingNotConfigured)?;
        Ok(self
            .router
            .get_or_init(|| TransportRouter::build(self, settings)))
    }

    /// Fastest trip between two stops, `None` if a stop is unknown or unreachable
    ///
    /// # Errors
    ///
    /// Returns an error if routing settings are not configured
    pub fn build_route(&self, from: &str, to: &str) -> Result<Option<RouteItinerary>> {
        Ok(self.router()?.build_route(from, to))
    }

    fn road_length(&self, stops: &[StopId]) -> u64 {
        stops
            .iter()
            .tuple_windows()
            .map(|(&from, &to)| u64::from(self.distance_between(from, to).unwrap_or_default()))
            .sum()
    }

    fn resolve_stop(&self, name: &str) -> Result<StopId> {
        self.stop_id(name)
            .ok_or_else(|| Error::UnknownStop(name.to_string()))
    }

    fn extend_bounds(&mut self, point: Point<f64>) {
        self.bounds = Some(match self.bounds {
            None => Rect::new(point.0, point.0),
            Some(rect) => Rect::new(
                coord! { x: rect.min().x.min(point.x()), y: rect.min().y.min(point.y()) },
                coord! { x: rect.max().x.max(point.x()), y: rect.max().y.max(point.y()) },
            ),
        });
    }
}

fn validate_coordinates(name: &str, geometry: Point<f64>) -> Result<()> {
    let (lng, lat) = (geometry.x(), geometry.y());
    if !lat.is_finite() || !lng.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
        return Err(Error::InvalidData(format!(
            "Stop {name} has invalid coordinates ({lat}, {lng})"
        )));
    }
    Ok(())
}
