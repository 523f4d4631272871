//! Answers to stat requests

use catalogue_core::TransportCatalogue;
use rayon::prelude::*;
use serde_json::{Value as JsonValue, json};
use tracing::{debug, warn};

use crate::documents::StatRequest;

const NOT_FOUND: &str = "not found";

/// Answers every request, keeping the request order
///
/// The catalogue is read-only here, so requests are answered in parallel.
pub fn answer_all(catalogue: &TransportCatalogue, requests: &[StatRequest]) -> Vec<JsonValue> {
    requests
        .par_iter()
        .map(|request| {
            debug!(request_id = request.id(), "Answering stat request");
            answer(catalogue, request)
        })
        .collect()
}

pub fn answer(catalogue: &TransportCatalogue, request: &StatRequest) -> JsonValue {
    match request {
        StatRequest::Bus { id, name } => match catalogue.bus_statistics(name) {
            Some(stats) => json!({
                "request_id": id,
                "curvature": stats.curvature,
                "route_length": stats.route_length,
                "stop_count": stats.stop_count,
                "unique_stop_count": stats.unique_stop_count,
            }),
            None => error_response(*id, NOT_FOUND),
        },
        StatRequest::Stop { id, name } => match catalogue.buses_through_stop(name) {
            Some(buses) => json!({
                "request_id": id,
                "buses": buses,
            }),
            None => error_response(*id, NOT_FOUND),
        },
        StatRequest::Route { id, from, to } => match catalogue.build_route(from, to) {
            Ok(Some(route)) => json!({
                "request_id": id,
                "total_time": route.total_time,
                "items": route.items,
            }),
            Ok(None) => error_response(*id, NOT_FOUND),
            Err(e) => {
                warn!("Route request {id} failed: {e}");
                error_response(*id, &e.to_string())
            }
        },
        StatRequest::Map { id } => error_response(*id, "map rendering is not supported"),
    }
}

fn error_response(id: i64, message: &str) -> JsonValue {
    json!({
        "request_id": id,
        "error_message": message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use catalogue_core::RoutingSettings;
    use catalogue_core::loading::{BaseRequest, BusRequest, StopRequest, build_catalogue};

    fn catalogue() -> TransportCatalogue {
        let stop = |name: &str, longitude: f64, distances: &[(&str, u32)]| {
            BaseRequest::Stop(StopRequest {
                name: name.into(),
                latitude: 43.58,
                longitude,
                road_distances: distances
                    .iter()
                    .map(|&(to, meters)| (to.to_string(), meters))
                    .collect(),
            })
        };
        let requests = vec![
            stop("Sea Station", 39.71, &[("Riverside", 900)]),
            stop("Riverside", 39.72, &[]),
            stop("Park", 39.80, &[]),
            BaseRequest::Bus(BusRequest {
                name: "114".into(),
                stops: vec!["Sea Station".into(), "Riverside".into()],
                is_roundtrip: false,
            }),
        ];
        build_catalogue(&requests, Some(RoutingSettings::new(6.0, 54.0).unwrap())).unwrap()
    }

    #[test]
    fn test_bus_response() {
        let response = answer(
            &catalogue(),
            &StatRequest::Bus {
                id: 1,
                name: "114".into(),
            },
        );
        assert_eq!(response["request_id"], 1);
        assert_eq!(response["route_length"], 1800);
        assert_eq!(response["stop_count"], 3);
        assert_eq!(response["unique_stop_count"], 2);
        assert!(response["curvature"].as_f64().unwrap() > 1.0);
    }

    #[test]
    fn test_not_found_responses() {
        let catalogue = catalogue();
        let requests = [
            StatRequest::Bus {
                id: 1,
                name: "751".into(),
            },
            StatRequest::Stop {
                id: 2,
                name: "Nowhere".into(),
            },
            StatRequest::Route {
                id: 3,
                from: "Sea Station".into(),
                to: "Park".into(),
            },
        ];
        for response in answer_all(&catalogue, &requests) {
            assert_eq!(response["error_message"], "not found");
        }
    }

    #[test]
    fn test_stop_responses() {
        let catalogue = catalogue();
        let served = answer(
            &catalogue,
            &StatRequest::Stop {
                id: 5,
                name: "Riverside".into(),
            },
        );
        assert_eq!(served, json!({"request_id": 5, "buses": ["114"]}));

        let unserved = answer(
            &catalogue,
            &StatRequest::Stop {
                id: 6,
                name: "Park".into(),
            },
        );
        assert_eq!(unserved, json!({"request_id": 6, "buses": []}));
    }

    #[test]
    fn test_route_response() {
        let response = answer(
            &catalogue(),
            &StatRequest::Route {
                id: 7,
                from: "Sea Station".into(),
                to: "Riverside".into(),
            },
        );
        // 54 km/h = 900 m/min
        assert_relative_eq!(response["total_time"].as_f64().unwrap(), 7.0);
        assert_eq!(
            response["items"],
            json!([
                {"type": "Wait", "stop_name": "Sea Station", "time": 6.0},
                {"type": "Bus", "bus": "114", "span_count": 1, "time": 1.0}
            ])
        );
    }

    #[test]
    fn test_route_without_settings_reports_error() {
        let catalogue = build_catalogue(
            &[BaseRequest::Stop(StopRequest {
                name: "Harbour".into(),
                latitude: 43.58,
                longitude: 39.72,
                road_distances: Default::default(),
            })],
            None,
        )
        .unwrap();

        let requests = [
            StatRequest::Route {
                id: 11,
                from: "Harbour".into(),
                to: "Harbour".into(),
            },
            StatRequest::Stop {
                id: 12,
                name: "Harbour".into(),
            },
        ];
        let responses = answer_all(&catalogue, &requests);
        assert_eq!(
            responses[0],
            json!({
                "request_id": 11,
                "error_message": "Routing settings are not configured",
            })
        );
        assert_eq!(responses[1], json!({"request_id": 12, "buses": []}));
    }

    #[test]
    fn test_map_is_unsupported() {
        let response = answer(&catalogue(), &StatRequest::Map { id: 9 });
        assert_eq!(response["request_id"], 9);
        assert!(response["error_message"].as_str().unwrap().contains("not supported"));
    }

    #[test]
    fn test_answers_keep_request_order() {
        let catalogue = catalogue();
        let requests: Vec<StatRequest> = (0..64)
            .map(|id| StatRequest::Bus {
                id,
                name: "114".into(),
            })
            .collect();
        let ids: Vec<i64> = answer_all(&catalogue, &requests)
            .iter()
            .map(|response| response["request_id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, (0..64).collect::<Vec<_>>());
    }
}
