//! Kern-Engine des FFXIV Treasure Route Planners.
//!
//! Enthält den Marker-Store (Lebenszyklus aktiv / gesammelt / Papierkorb),
//! das Kostenmodell und den Routen-Optimierer. Alles hier ist frei von
//! UI-, Render- und Persistenzabhängigkeiten.

pub mod codec;
pub mod core;
pub mod shared;

pub use codec::{
    export_share, format_marker_line, import_share, parse_marker_line, parse_marker_text,
    CodecError, ParsedText, SharedMarker,
};
pub use core::{
    world_to_map, AcceptAllRegions, AetheryteEntry, AetheryteTable, CoordinateSpace, CostModel,
    FastTravelAnchor, FastTravelLeg, FastTravelResolver, Fee, Marker, MarkerDraft, MarkerId,
    MarkerSnapshot, MarkerStatus, MarkerStore, Position, RegionValidator, ResolveError, Route,
    RouteOptimizer, RouteStart, RouteStep, SpatialIndex, SpatialMatch, StaticResolver, StoreError,
    StoreStats, TimeoutResolver, WORST_CASE_COST,
};
pub use shared::RouteOptions;
