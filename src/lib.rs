//! leaflet-planner core
//!
//! Classification and routing engine for leaflet-delivery campaign
//! planning: groups address records into buildings with leaflet estimates,
//! and sequences selected points into a visit order locally or via an
//! external routing provider.

pub mod classifier;
pub mod error;
pub mod graphhopper;
pub mod haversine;
pub mod osrm;
pub mod records;
pub mod route;
pub mod traits;
