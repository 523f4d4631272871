use geo::Point;
use log::info;

use super::records::{BaseRequest, BusRequest, StopRequest};
use crate::model::{RouteKind, TransportCatalogue};
use crate::{Result, RoutingSettings};

/// Creates a catalogue from base requests
///
/// Requests may come in any order: all stops are added first, then all road
/// distances, then all buses.
///
/// # Errors
///
/// Returns an error if a request breaks a catalogue invariant (duplicate name,
/// unknown stop, missing distance) or the routing settings are invalid
pub fn build_catalogue(
    requests: &[BaseRequest],
    routing_settings: Option<RoutingSettings>,
) -> Result<TransportCatalogue> {
    let stops: Vec<&StopRequest> = requests
        .iter()
        .filter_map(|request| match request {
            BaseRequest::Stop(stop) => Some(stop),
            BaseRequest::Bus(_) => None,
        })
        .collect();
    let buses: Vec<&BusRequest> = requests
        .iter()
        .filter_map(|request| match request {
            BaseRequest::Bus(bus) => Some(bus),
            BaseRequest::Stop(_) => None,
        })
        .collect();

    info!("Loading {} stops and {} buses", stops.len(), buses.len());

    let mut catalogue = TransportCatalogue::new();

    for stop in &stops {
        catalogue.add_stop(&stop.name, Point::new(stop.longitude, stop.latitude))?;
    }

    for stop in &stops {
        for (neighbour, &meters) in &stop.road_distances {
            catalogue.add_distance(&stop.name, neighbour, meters)?;
        }
    }

    for bus in &buses {
        let stop_names: Vec<&str> = bus.stops.iter().map(String::as_str).collect();
        catalogue.add_bus(
            &bus.name,
            RouteKind::from_roundtrip(bus.is_roundtrip),
            &stop_names,
        )?;
    }

    if let Some(settings) = routing_settings {
        catalogue.set_routing_settings(settings)?;
    }

    info!("Transport catalogue created successfully");
    Ok(catalogue)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::Error;

    fn stop(name: &str, latitude: f64, longitude: f64, distances: &[(&str, u32)]) -> BaseRequest {
        BaseRequest::Stop(StopRequest {
            name: name.into(),
            latitude,
            longitude,
            road_distances: distances
                .iter()
                .map(|&(to, meters)| (to.to_string(), meters))
                .collect::<BTreeMap<_, _>>(),
        })
    }

    fn bus(name: &str, stops: &[&str], is_roundtrip: bool) -> BaseRequest {
        BaseRequest::Bus(BusRequest {
            name: name.into(),
            stops: stops.iter().map(ToString::to_string).collect(),
            is_roundtrip,
        })
    }

    #[test]
    fn test_buses_before_stops() {
        let requests = vec![
            bus("297", &["Biryulyovo Zapadnoye", "Biryusinka", "Biryulyovo Zapadnoye"], true),
            stop("Biryulyovo Zapadnoye", 55.574371, 37.6517, &[("Biryusinka", 1800)]),
            stop("Biryusinka", 55.581065, 37.64839, &[("Biryulyovo Zapadnoye", 1700)]),
        ];

        let catalogue = build_catalogue(&requests, None).unwrap();
        assert_eq!(catalogue.stop_count(), 2);
        assert_eq!(catalogue.bus_count(), 1);
        assert_eq!(catalogue.bus_statistics("297").unwrap().route_length, 3500);
        assert!(catalogue.routing_settings().is_none());
    }

    #[test]
    fn test_distance_to_undefined_stop() {
        let requests = vec![stop("A", 55.0, 37.0, &[("Ghost", 100)])];
        assert!(matches!(
            build_catalogue(&requests, None),
            Err(Error::UnknownStop(name)) if name == "Ghost"
        ));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let requests = vec![stop("A", 55.0, 37.0, &[])];
        let settings = RoutingSettings {
            bus_wait_time: 6.0,
            bus_velocity: -40.0,
        };
        assert!(build_catalogue(&requests, Some(settings)).is_err());
    }
}
