//! OSRM HTTP adapter.
//!
//! Calls the `/route/v1` service with the waypoints in submitted order and
//! normalizes the first returned route into a [`RouteResult`]. OSRM takes
//! coordinates as `lon,lat` pairs in the URL path.

use serde::Deserialize;
use tracing::debug;

use crate::error::RoutingError;
use crate::route::{LineString, Profile, RoutePoint, RouteResult};
use crate::traits::RouteProvider;

#[derive(Debug, Clone, Default)]
pub struct OsrmConfig {
    /// Base URL of the OSRM instance; `None` leaves the provider
    /// unconfigured.
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl OsrmConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: Some(base_url.into()), timeout_secs: DEFAULT_TIMEOUT_SECS }
    }

    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OSRM_BASE_URL").ok().filter(|url| !url.is_empty()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let timeout = if config.timeout_secs == 0 { DEFAULT_TIMEOUT_SECS } else { config.timeout_secs };
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout))
            .build()?;

        Ok(Self { config, client })
    }
}

impl RouteProvider for OsrmClient {
    fn route(&self, points: &[RoutePoint], profile: Profile) -> Result<RouteResult, RoutingError> {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .ok_or(RoutingError::Unconfigured { provider: "osrm" })?;

        let coords = points
            .iter()
            .map(|p| format!("{},{}", p.lon, p.lat))
            .collect::<Vec<_>>()
            .join(";");

        let url = format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson",
            base_url.trim_end_matches('/'),
            profile.as_str(),
            coords
        );
        debug!(%url, "querying OSRM");

        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>())?;

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RoutingError::malformed("OSRM response has no routes"))?;

        Ok(RouteResult {
            geometry: route.geometry,
            distance_m: route.distance,
            duration_s: route.duration,
            order: points.iter().map(|p| p.id.clone()).collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: LineString,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}
