//! Core routing trait.
//!
//! Providers form a small closed set behind one capability: compute a route
//! for N ordered points under a profile. Engine selection stays an enum in
//! [`crate::route`]; this trait only keeps the adapters interchangeable.

use crate::error::RoutingError;
use crate::route::{Profile, RoutePoint, RouteResult};

/// An external routing engine queried for a road/path-based route.
///
/// Implementations route through the points in submitted order; they never
/// reorder waypoints. Calls block on network I/O bounded by the client
/// timeout, so embedding services should run them off the request loop.
pub trait RouteProvider {
    fn route(&self, points: &[RoutePoint], profile: Profile) -> Result<RouteResult, RoutingError>;
}
