//! Wait/ride graph built from a frozen catalogue

use hashbrown::{HashMap, hash_map::Entry};
use log::info;

use super::dijkstra::Router;
use super::graph::{DirectedWeightedGraph, Edge, VertexId};
use super::itinerary::{ItineraryItem, RouteItinerary};
use super::settings::RoutingSettings;
use crate::model::{Bus, TransportCatalogue};
use crate::{BusId, Minutes, Result, StopId};

/// What a graph edge means for the passenger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePayload {
    Wait { stop: StopId },
    Ride { bus: BusId, span_count: usize },
}

/// Vertex reached on arrival at a stop, before waiting
pub fn wait_start(stop: StopId) -> VertexId {
    stop * 2
}

/// Vertex reached after waiting at a stop, ready to board
pub fn wait_end(stop: StopId) -> VertexId {
    stop * 2 + 1
}

/// Fastest-trip router over the stops and buses of a catalogue
///
/// Holds copies of the stop and bus names it needs, so it does not borrow the
/// catalogue. Mutating the catalogue afterwards is not reflected here.
#[derive(Debug)]
pub struct TransportRouter {
    settings: RoutingSettings,
    stop_index: HashMap<String, StopId>,
    stop_names: Vec<String>,
    bus_names: Vec<String>,
    router: Router<EdgePayload>,
}

impl TransportRouter {
    /// Builds the graph for every stop and bus in the catalogue
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid
    pub fn new(catalogue: &TransportCatalogue, settings: RoutingSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::build(catalogue, settings))
    }

    /// Builds the graph with settings that already passed validation
    ///
    /// Vertex ids come from the catalogue's own stops and weights are finite
    /// for a positive velocity, so every edge is valid.
    pub(crate) fn build(catalogue: &TransportCatalogue, settings: RoutingSettings) -> Self {
        let stop_count = catalogue.stop_count();
        let mut graph = DirectedWeightedGraph::new(stop_count * 2);

        for stop in 0..stop_count {
            graph.push_edge(
                wait_start(stop),
                wait_end(stop),
                settings.bus_wait_time,
                EdgePayload::Wait { stop },
            );
        }

        let velocity = settings.velocity_meters_per_minute();
        for (bus_id, bus) in catalogue.buses().iter().enumerate() {
            for ride in ride_edges(catalogue, bus, velocity) {
                graph.push_edge(
                    wait_end(ride.from),
                    wait_start(ride.to),
                    ride.time,
                    EdgePayload::Ride {
                        bus: bus_id,
                        span_count: ride.span_count,
                    },
                );
            }
        }

        info!(
            "Built routing graph with {} vertices and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );

        let stop_names: Vec<String> = catalogue.stops().iter().map(|s| s.name.clone()).collect();
        let stop_index = stop_names
            .iter()
            .enumerate()
            .map(|(id, name)| (name.clone(), id))
            .collect();

        Self {
            settings,
            stop_index,
            stop_names,
            bus_names: catalogue.buses().iter().map(|b| b.name.clone()).collect(),
            router: Router::new(graph),
        }
    }

    pub fn settings(&self) -> RoutingSettings {
        self.settings
    }

    pub fn graph(&self) -> &DirectedWeightedGraph<EdgePayload> {
        self.router.graph()
    }

    /// Fastest trip between two stops
    ///
    /// `None` if either stop is unknown or no bus connects them.
    pub fn build_route(&self, from: &str, to: &str) -> Option<RouteItinerary> {
        let from = *self.stop_index.get(from)?;
        let to = *self.stop_index.get(to)?;
        let route = self.router.build_route(wait_start(from), wait_start(to))?;

        let items = route
            .edges
            .iter()
            .map(|&id| self.graph().edge(id).map(|edge| self.itinerary_item(edge)))
            .collect::<Option<Vec<_>>>()?;

        Some(RouteItinerary {
            total_time: route.total_weight,
            items,
        })
    }

    fn itinerary_item(&self, edge: &Edge<EdgePayload>) -> ItineraryItem {
        match edge.payload {
            EdgePayload::Wait { stop } => ItineraryItem::Wait {
                stop_name: self.stop_names[stop].clone(),
                time: edge.weight,
            },
            EdgePayload::Ride { bus, span_count } => ItineraryItem::Bus {
                bus: self.bus_names[bus].clone(),
                span_count,
                time: edge.weight,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Ride {
    from: StopId,
    to: StopId,
    span_count: usize,
    time: Minutes,
}

/// Ride edges between every ordered pair of stops along each direction of a bus
///
/// Keeps only the fastest ride per stop pair; pairs starting and ending at the
/// same stop are skipped.
fn ride_edges(catalogue: &TransportCatalogue, bus: &Bus, velocity: f64) -> Vec<Ride> {
    let mut rides: Vec<Ride> = Vec::new();
    let mut best: HashMap<(StopId, StopId), usize> = HashMap::new();

    for stops in bus.directions() {
        for i in 0..stops.len() {
            let mut meters: u64 = 0;
            for j in (i + 1)..stops.len() {
                meters += u64::from(
                    catalogue
                        .distance_between(stops[j - 1], stops[j])
                        .unwrap_or_default(),
                );
                let (from, to) = (stops[i], stops[j]);
                if from == to {
                    continue;
                }

                #[allow(clippy::cast_precision_loss)]
                let ride = Ride {
                    from,
                    to,
                    span_count: j - i,
                    time: meters as f64 / velocity,
                };
                match best.entry((from, to)) {
                    Entry::Vacant(entry) => {
                        entry.insert(rides.len());
                        rides.push(ride);
                    }
                    Entry::Occupied(entry) => {
                        let existing = &mut rides[*entry.get()];
                        if ride.time < existing.time {
                            *existing = ride;
                        }
                    }
                }
            }
        }
    }

    rides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RouteKind;
    use geo::Point;

    /// A, B, C on a line, 1000 m apart, bus "1" circles A-B-C-A at 500 m/min
    fn triangle() -> TransportCatalogue {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("A", Point::new(0.0, 0.0)).unwrap();
        catalogue.add_stop("B", Point::new(1.0, 0.0)).unwrap();
        catalogue.add_stop("C", Point::new(2.0, 0.0)).unwrap();
        catalogue.add_distance("A", "B", 1000).unwrap();
        catalogue.add_distance("B", "C", 1000).unwrap();
        catalogue.add_distance("C", "A", 1000).unwrap();
        catalogue
            .add_bus("1", RouteKind::Circular, &["A", "B", "C", "A"])
            .unwrap();
        catalogue
    }

    fn settings() -> RoutingSettings {
        RoutingSettings::new(5.0, 30.0).unwrap()
    }

    #[test]
    fn test_graph_shape() {
        let router = TransportRouter::new(&triangle(), settings()).unwrap();
        let graph = router.graph();
        assert_eq!(graph.vertex_count(), 6);
        // 3 waits + A-B, A-C, B-C, B-A, C-A
        assert_eq!(graph.edge_count(), 8);

        let wait = graph.edge(0).unwrap();
        assert_eq!((wait.from, wait.to), (wait_start(0), wait_end(0)));
        assert_eq!(wait.payload, EdgePayload::Wait { stop: 0 });
        assert_eq!(wait.weight, 5.0);
    }

    #[test]
    fn test_route_waits_then_rides() {
        let router = TransportRouter::new(&triangle(), settings()).unwrap();
        let route = router.build_route("A", "C").unwrap();

        assert_eq!(route.total_time, 9.0);
        assert_eq!(
            route.items,
            vec![
                ItineraryItem::Wait {
                    stop_name: "A".into(),
                    time: 5.0
                },
                ItineraryItem::Bus {
                    bus: "1".into(),
                    span_count: 2,
                    time: 4.0
                },
            ]
        );
    }

    #[test]
    fn test_route_to_same_stop_is_empty() {
        let router = TransportRouter::new(&triangle(), settings()).unwrap();
        let route = router.build_route("B", "B").unwrap();
        assert_eq!(route.total_time, 0.0);
        assert!(route.items.is_empty());
    }

    #[test]
    fn test_unknown_or_unreachable_stops() {
        let mut catalogue = triangle();
        catalogue.add_stop("Island", Point::new(5.0, 5.0)).unwrap();
        let router = TransportRouter::new(&catalogue, settings()).unwrap();

        assert!(router.build_route("A", "Nowhere").is_none());
        assert!(router.build_route("Nowhere", "A").is_none());
        assert!(router.build_route("A", "Island").is_none());
    }

    #[test]
    fn test_two_directional_rides_both_ways() {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("X", Point::new(0.0, 0.0)).unwrap();
        catalogue.add_stop("Y", Point::new(0.0, 1.0)).unwrap();
        catalogue.add_stop("Z", Point::new(0.0, 2.0)).unwrap();
        catalogue.add_distance("X", "Y", 600).unwrap();
        catalogue.add_distance("Y", "X", 900).unwrap();
        catalogue.add_distance("Y", "Z", 300).unwrap();
        catalogue
            .add_bus("14", RouteKind::TwoDirectional, &["X", "Y", "Z"])
            .unwrap();

        let settings = RoutingSettings::new(2.0, 18.0).unwrap();
        let router = TransportRouter::new(&catalogue, settings).unwrap();
        // 18 km/h = 300 m/min; Z-Y uses the Y-Z fallback, Y-X its own distance
        let route = router.build_route("Z", "X").unwrap();
        assert_eq!(route.total_time, 2.0 + (300.0 + 900.0) / 300.0);
        assert_eq!(route.items.len(), 2);
        assert!(matches!(
            &route.items[1],
            ItineraryItem::Bus { bus, span_count: 2, .. } if bus == "14"
        ));
    }

    #[test]
    fn test_transfer_between_buses() {
        let mut catalogue = triangle();
        catalogue.add_stop("D", Point::new(3.0, 0.0)).unwrap();
        catalogue.add_distance("C", "D", 500).unwrap();
        catalogue
            .add_bus("2", RouteKind::TwoDirectional, &["C", "D"])
            .unwrap();

        let router = TransportRouter::new(&catalogue, settings()).unwrap();
        let route = router.build_route("A", "D").unwrap();
        // wait 5 + ride 4 + wait 5 + ride 1
        assert_eq!(route.total_time, 15.0);
        let total: f64 = route.items.iter().map(ItineraryItem::time).sum();
        assert_eq!(total, route.total_time);
        assert_eq!(route.items.len(), 4);
    }

    #[test]
    fn test_circular_route_keeps_fastest_ride_per_pair() {
        // Loop A-B-A-C-A visits A three times; A-B is reachable directly or around the loop
        let mut catalogue = TransportCatalogue::new();
        for (name, x) in [("A", 0.0), ("B", 1.0), ("C", 2.0)] {
            catalogue.add_stop(name, Point::new(x, 0.0)).unwrap();
        }
        catalogue.add_distance("A", "B", 100).unwrap();
        catalogue.add_distance("A", "C", 100).unwrap();
        catalogue
            .add_bus("8", RouteKind::Circular, &["A", "B", "A", "C", "A"])
            .unwrap();

        let rides = ride_edges(&catalogue, &catalogue.buses()[0], 100.0);
        let a_to_c: Vec<_> = rides.iter().filter(|r| r.from == 0 && r.to == 2).collect();
        assert_eq!(a_to_c.len(), 1);
        assert_eq!(a_to_c[0].span_count, 1);
        assert_eq!(a_to_c[0].time, 1.0);
    }
}
