//! FFXIV Treasure Route Planner Library.
//! Application-Layer über der Engine, als Library exportiert für Tests und Hosts.

pub mod app;

pub use app::{AppCommand, AppController, AppEvent, AppIntent, AppState, ImportSummary, UiState};
pub use ffxiv_treasure_engine as engine;
pub use ffxiv_treasure_engine::{
    format_marker_line, parse_marker_line, AetheryteTable, Marker, MarkerStore, Route,
    RouteOptions, RouteStart, RouteStep, StaticResolver,
};
