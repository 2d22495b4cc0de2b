//! Route sequencing: greedy nearest-neighbor heuristic and dispatch to the
//! external providers.
//!
//! The greedy path is pure and never fails; provider paths propagate their
//! typed errors unchanged so the caller can decide whether to retry with
//! the heuristic. No fallback happens in here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RoutingError;
use crate::graphhopper::{GraphHopperClient, GraphHopperConfig};
use crate::haversine::distance_m;
use crate::osrm::{OsrmClient, OsrmConfig};
use crate::traits::RouteProvider;

/// Assumed walking speed for the heuristic's duration estimate, in m/s.
/// Deliberately not profile-sensitive.
const WALKING_SPEED_MPS: f64 = 1.4;

/// Routing profile. Only providers interpret it; the greedy heuristic
/// ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Foot,
    Car,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Foot => "foot",
            Profile::Car => "car",
        }
    }
}

/// Which engine computes the route. Wire names match the planning API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Local greedy nearest-neighbor heuristic.
    #[serde(rename = "none")]
    Greedy,
    Osrm,
    GraphHopper,
}

/// One point of a routing request. Lives only for the duration of the
/// request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub id: String,
    pub lon: f64,
    pub lat: f64,
}

/// GeoJSON LineString geometry: `(lon, lat)` coordinate pairs in visit
/// order, an open line with no return to start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<[f64; 2]>,
}

impl LineString {
    pub fn new(coordinates: Vec<[f64; 2]>) -> Self {
        Self { kind: "LineString".to_string(), coordinates }
    }
}

/// A computed route. Produced fresh per request, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub geometry: LineString,
    /// Total length in meters.
    pub distance_m: f64,
    /// Total travel time in seconds.
    pub duration_s: f64,
    /// Point identifiers in visit order.
    pub order: Vec<String>,
}

impl RouteResult {
    fn empty() -> Self {
        Self {
            geometry: LineString::new(Vec::new()),
            distance_m: 0.0,
            duration_s: 0.0,
            order: Vec::new(),
        }
    }
}

/// The GeoJSON Feature shape handed to the routing API collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFeature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: LineString,
    pub properties: RouteProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteProperties {
    pub distance_m: f64,
    pub duration_s: f64,
    pub order: Vec<String>,
}

impl From<RouteResult> for RouteFeature {
    fn from(result: RouteResult) -> Self {
        Self {
            kind: "Feature".to_string(),
            geometry: result.geometry,
            properties: RouteProperties {
                distance_m: result.distance_m,
                duration_s: result.duration_s,
                order: result.order,
            },
        }
    }
}

/// Greedy nearest-neighbor sequencing over haversine distance.
///
/// Starts at the first input point, then repeatedly appends the nearest
/// remaining point (ties broken by earlier position in the remaining list).
/// Single pass, no backtracking; O(n²) in point count, which is fine for a
/// caller-bounded selection list.
pub fn greedy_route(points: &[RoutePoint]) -> RouteResult {
    if points.is_empty() {
        return RouteResult::empty();
    }

    let mut remaining: Vec<&RoutePoint> = points.iter().collect();
    let mut order: Vec<&RoutePoint> = Vec::with_capacity(points.len());
    order.push(remaining.remove(0));

    while !remaining.is_empty() {
        let current = order[order.len() - 1];
        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;
        for (idx, candidate) in remaining.iter().enumerate() {
            let d = distance_m((current.lon, current.lat), (candidate.lon, candidate.lat));
            if d < best_dist {
                best_dist = d;
                best_idx = idx;
            }
        }
        order.push(remaining.remove(best_idx));
    }

    let mut distance = 0.0;
    for pair in order.windows(2) {
        distance += distance_m((pair[0].lon, pair[0].lat), (pair[1].lon, pair[1].lat));
    }

    RouteResult {
        geometry: LineString::new(order.iter().map(|p| [p.lon, p.lat]).collect()),
        distance_m: distance,
        duration_s: distance / WALKING_SPEED_MPS,
        order: order.iter().map(|p| p.id.clone()).collect(),
    }
}

/// Engine dispatch over the configured providers.
#[derive(Debug, Clone)]
pub struct Router {
    osrm: OsrmClient,
    graphhopper: GraphHopperClient,
}

impl Router {
    pub fn new(osrm: OsrmConfig, graphhopper: GraphHopperConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            osrm: OsrmClient::new(osrm)?,
            graphhopper: GraphHopperClient::new(graphhopper)?,
        })
    }

    /// Builds a router from the `OSRM_BASE_URL` / `GH_BASE_URL` / `GH_KEY`
    /// environment variables. Unset providers stay unconfigured and fail
    /// only when selected.
    pub fn from_env() -> Result<Self, reqwest::Error> {
        Self::new(OsrmConfig::from_env(), GraphHopperConfig::from_env())
    }

    /// Computes a route with the selected engine.
    ///
    /// Provider failures propagate as-is; retrying with [`greedy_route`]
    /// is the caller's decision.
    pub fn route(
        &self,
        points: &[RoutePoint],
        engine: Engine,
        profile: Profile,
    ) -> Result<RouteResult, RoutingError> {
        debug!(?engine, profile = profile.as_str(), points = points.len(), "routing request");
        match engine {
            Engine::Greedy => Ok(greedy_route(points)),
            Engine::Osrm => self.osrm.route(points, profile),
            Engine::GraphHopper => self.graphhopper.route(points, profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: &str, lon: f64, lat: f64) -> RoutePoint {
        RoutePoint { id: id.to_string(), lon, lat }
    }

    #[test]
    fn test_empty_input_empty_result() {
        let result = greedy_route(&[]);
        assert!(result.order.is_empty());
        assert!(result.geometry.coordinates.is_empty());
        assert_eq!(result.distance_m, 0.0);
        assert_eq!(result.duration_s, 0.0);
    }

    #[test]
    fn test_single_point() {
        let result = greedy_route(&[point("a", 15.0, 49.0)]);
        assert_eq!(result.order, vec!["a"]);
        assert_eq!(result.geometry.coordinates, vec![[15.0, 49.0]]);
        assert_eq!(result.distance_m, 0.0);
    }

    #[test]
    fn test_order_starts_with_first_input_point() {
        // "far" is first even though it is not the geographic center
        let points = vec![
            point("far", 16.0, 49.0),
            point("a", 15.0, 49.0),
            point("b", 15.001, 49.0),
        ];
        let result = greedy_route(&points);
        assert_eq!(result.order[0], "far");
    }

    #[test]
    fn test_nearest_neighbor_order() {
        // b is closer to a than c, c closer to b than to a
        let points = vec![
            point("a", 15.0, 49.0),
            point("c", 15.01, 49.0),
            point("b", 15.002, 49.0),
        ];
        let result = greedy_route(&points);
        assert_eq!(result.order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duration_is_walking_speed() {
        let points = vec![point("a", 15.0, 49.0), point("b", 15.01, 49.0)];
        let result = greedy_route(&points);
        assert!(result.distance_m > 0.0);
        assert_eq!(result.duration_s, result.distance_m / 1.4);
    }

    #[test]
    fn test_geometry_matches_visit_order() {
        let points = vec![
            point("a", 15.0, 49.0),
            point("c", 15.002, 49.0),
            point("b", 15.001, 49.0),
        ];
        let result = greedy_route(&points);
        assert_eq!(result.order, vec!["a", "b", "c"]);
        assert_eq!(
            result.geometry.coordinates,
            vec![[15.0, 49.0], [15.001, 49.0], [15.002, 49.0]]
        );
    }

    #[test]
    fn test_engine_wire_names() {
        assert_eq!(serde_json::to_string(&Engine::Greedy).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&Engine::Osrm).unwrap(), "\"osrm\"");
        assert_eq!(
            serde_json::to_string(&Engine::GraphHopper).unwrap(),
            "\"graphhopper\""
        );
        assert_eq!(
            serde_json::from_str::<Engine>("\"none\"").unwrap(),
            Engine::Greedy
        );
    }

    #[test]
    fn test_route_feature_shape() {
        let feature = RouteFeature::from(greedy_route(&[point("a", 15.0, 49.0)]));
        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["type"], "Feature");
        assert_eq!(json["geometry"]["type"], "LineString");
        assert_eq!(json["properties"]["order"][0], "a");
        assert_eq!(json["properties"]["distance_m"], 0.0);
    }
}
