//! Core-Domänentypen: Marker, Store, Kostenmodell, Resolver, Optimierer.

pub mod aetheryte;
pub mod coords;
pub mod cost;
pub mod marker;
pub mod optimizer;
pub mod resolver;
pub mod route;
pub mod spatial;
pub mod store;

pub use aetheryte::{AetheryteEntry, AetheryteTable};
pub use coords::{world_to_map, CoordinateSpace, Position};
pub use cost::{CostModel, Fee, WORST_CASE_COST};
pub use marker::{Marker, MarkerDraft, MarkerId, MarkerStatus};
pub use optimizer::{RouteOptimizer, RouteStart};
pub use resolver::{
    AcceptAllRegions, FastTravelAnchor, FastTravelResolver, RegionValidator, ResolveError,
    StaticResolver, TimeoutResolver,
};
pub use route::{FastTravelLeg, Route, RouteStep};
pub use spatial::{SpatialIndex, SpatialMatch};
pub use store::{MarkerSnapshot, MarkerStore, StoreError, StoreStats};
