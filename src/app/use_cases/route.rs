//! Use-Cases für Routen-Optimierung und Zurücksetzen.

use crate::app::events::AppEvent;
use crate::app::AppState;
use ffxiv_treasure_engine::{CostModel, Marker, RouteOptimizer};
use std::sync::Arc;

/// Berechnet die Route über den aktuellen Snapshot und übernimmt sie in den Store.
///
/// Der Resolver läuft mit dem konfigurierten Timeout; langsame Antworten
/// gelten als unbekannte Kosten.
pub fn optimize_route(state: &mut AppState) {
    let snapshot = state.store.snapshot();
    let markers: Vec<&Marker> = if state.options.skip_collected {
        snapshot.uncollected().collect()
    } else {
        snapshot.active().collect()
    };

    let resolver = state.resolver.with_timeout(state.options.resolver_timeout());
    let optimizer = RouteOptimizer::new(CostModel::from_options(&state.options), &resolver)
        .with_in_region_fast_travel(state.options.in_region_fast_travel);

    let route = optimizer.optimize(markers, state.ui.start_position.as_ref());
    let placed = state.store.apply_route(&route);

    let msg = route.summary_line();
    log::info!("{} ({} Marker umsortiert)", msg, placed);
    state.ui.status_message = Some(msg);
    state.push_event(AppEvent::Optimized {
        placed_count: route.point_count(),
    });
    state.route = Some(Arc::new(route));
}

/// Verwirft die letzte Route und alle Annotationen. Gesammelt-Status bleibt.
pub fn reset_optimization(state: &mut AppState) {
    let cleared = state.store.clear_annotations();
    state.route = None;
    log::info!("Optimierung zurückgesetzt ({} Annotationen entfernt)", cleared);
    state.ui.status_message = Some("Optimierung zurückgesetzt".to_string());
}
