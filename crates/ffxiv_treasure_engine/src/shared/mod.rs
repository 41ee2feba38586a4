//! Geteilte Konfiguration für Engine und Host.

pub mod options;

pub use options::RouteOptions;
pub use options::{COLLECT_RADIUS, DUPLICATE_RADIUS};
