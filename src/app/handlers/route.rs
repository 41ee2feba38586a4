//! Handler für Optimierung und Optionen.

use crate::app::use_cases;
use crate::app::AppState;
use ffxiv_treasure_engine::RouteOptions;

/// Berechnet die Route.
pub fn optimize(state: &mut AppState) {
    use_cases::route::optimize_route(state);
}

/// Verwirft Route und Annotationen.
pub fn reset(state: &mut AppState) {
    use_cases::route::reset_optimization(state);
}

/// Übernimmt neue Laufzeit-Optionen.
pub fn apply_options(state: &mut AppState, options: RouteOptions) {
    log::info!("Optionen übernommen");
    state.options = options;
}
