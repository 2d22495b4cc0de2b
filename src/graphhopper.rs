//! GraphHopper HTTP adapter.
//!
//! POSTs the waypoints to `/route` and normalizes the first returned path.
//! Unlike OSRM, GraphHopper takes `[lat, lon]` point pairs and reports
//! travel time in milliseconds; both get translated here so callers only
//! ever see the common [`RouteResult`] shape.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RoutingError;
use crate::route::{LineString, Profile, RoutePoint, RouteResult};
use crate::traits::RouteProvider;

#[derive(Debug, Clone, Default)]
pub struct GraphHopperConfig {
    /// Base URL of the GraphHopper instance; `None` leaves the provider
    /// unconfigured.
    pub base_url: Option<String>,
    /// API key sent as the `Authorization` header when set.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl GraphHopperConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("GH_BASE_URL").ok().filter(|url| !url.is_empty()),
            api_key: std::env::var("GH_KEY").ok().filter(|key| !key.is_empty()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone)]
pub struct GraphHopperClient {
    config: GraphHopperConfig,
    client: reqwest::blocking::Client,
}

impl GraphHopperClient {
    pub fn new(config: GraphHopperConfig) -> Result<Self, reqwest::Error> {
        let timeout = if config.timeout_secs == 0 { DEFAULT_TIMEOUT_SECS } else { config.timeout_secs };
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout))
            .build()?;

        Ok(Self { config, client })
    }
}

impl RouteProvider for GraphHopperClient {
    fn route(&self, points: &[RoutePoint], profile: Profile) -> Result<RouteResult, RoutingError> {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .ok_or(RoutingError::Unconfigured { provider: "graphhopper" })?;

        let url = format!("{}/route", base_url.trim_end_matches('/'));
        let payload = GraphHopperRequest {
            profile: profile.as_str(),
            points: points.iter().map(|p| [p.lat, p.lon]).collect(),
            points_encoded: false,
        };
        debug!(%url, "querying GraphHopper");

        let mut request = self.client.post(url).json(&payload);
        if let Some(key) = &self.config.api_key {
            request = request.header("Authorization", key);
        }

        let body = request
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<GraphHopperResponse>())?;

        let path = body
            .paths
            .into_iter()
            .next()
            .ok_or_else(|| RoutingError::malformed("GraphHopper response has no paths"))?;

        Ok(RouteResult {
            geometry: path.points,
            distance_m: path.distance,
            duration_s: path.time as f64 / 1000.0,
            order: points.iter().map(|p| p.id.clone()).collect(),
        })
    }
}

#[derive(Debug, Serialize)]
struct GraphHopperRequest<'a> {
    profile: &'a str,
    /// `[lat, lon]` pairs; GraphHopper's axis order is inverted vs GeoJSON.
    points: Vec<[f64; 2]>,
    points_encoded: bool,
}

#[derive(Debug, Deserialize)]
struct GraphHopperResponse {
    #[serde(default)]
    paths: Vec<GraphHopperPath>,
}

#[derive(Debug, Deserialize)]
struct GraphHopperPath {
    /// Decoded LineString; the request always sets `points_encoded: false`.
    points: LineString,
    #[serde(default)]
    distance: f64,
    /// Travel time in milliseconds.
    #[serde(default)]
    time: u64,
}
