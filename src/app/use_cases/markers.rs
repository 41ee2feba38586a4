//! Use-Cases für den Marker-Lebenszyklus (löschen, wiederherstellen, sammeln).
//!
//! Ungültige Indizes sind Benutzerfehler: sie landen als Statuszeile im
//! UI-State und werden nicht als Fehler nach oben gereicht.

use crate::app::AppState;
use ffxiv_treasure_engine::{MarkerId, RouteStart, SpatialIndex, StoreError};

fn report_store_error(state: &mut AppState, action: &str, error: StoreError) {
    let msg = format!("{action} fehlgeschlagen: {error}");
    log::warn!("{}", msg);
    state.ui.status_message = Some(msg);
}

/// Verschiebt den aktiven Marker an `index` in den Papierkorb.
pub fn delete_marker(state: &mut AppState, index: usize) {
    match state.store.delete(index) {
        Ok(id) => {
            log::info!("Marker {} in den Papierkorb verschoben", id);
            state.ui.status_message = Some("Marker gelöscht".to_string());
        }
        Err(e) => report_store_error(state, "Löschen", e),
    }
}

/// Holt den Papierkorb-Eintrag an `trash_index` zurück (ans Ende der aktiven Liste).
pub fn restore_marker(state: &mut AppState, trash_index: usize) {
    match state.store.restore(trash_index) {
        Ok(id) => {
            log::info!("Marker {} wiederhergestellt", id);
            state.ui.status_message = Some("Marker wiederhergestellt".to_string());
        }
        Err(e) => report_store_error(state, "Wiederherstellen", e),
    }
}

/// Setzt den Gesammelt-Status eines aktiven Markers.
pub fn set_collected(state: &mut AppState, index: usize, collected: bool) {
    match state.store.toggle_collected(index, collected) {
        Ok(true) => log::info!("Marker {} gesammelt: {}", index, collected),
        Ok(false) => log::debug!("Gesammelt-Status von Marker {} unverändert", index),
        Err(e) => report_store_error(state, "Gesammelt-Status setzen", e),
    }
}

/// Leert die aktive Liste; eine berechnete Route wird dabei verworfen.
pub fn clear_active(state: &mut AppState) {
    let removed = state.store.clear_active();
    state.route = None;
    let msg = format!("{removed} aktive Marker entfernt");
    log::info!("{}", msg);
    state.ui.status_message = Some(msg);
}

/// Leert den Papierkorb endgültig.
pub fn clear_trash(state: &mut AppState) {
    let removed = state.store.clear_trash();
    let msg = format!("Papierkorb geleert ({removed} Marker)");
    log::info!("{}", msg);
    state.ui.status_message = Some(msg);
}

/// Setzt den Startpunkt der nächsten Optimierung.
///
/// Die Region wird wie beim Import auf die kanonische Schreibweise gebracht.
pub fn set_start_position(state: &mut AppState, mut start: RouteStart) {
    start.region = state.store.canonical_region(&start.region);
    log::debug!("Startpunkt: {:?} {:?}", start.region, start.position);
    state.ui.start_position = Some(start);
}

/// Markiert den nächsten ungesammelten Marker derselben Region am Startpunkt
/// als gesammelt, sofern er innerhalb von `collect_radius` liegt.
pub fn collect_near_start(state: &mut AppState) -> Option<MarkerId> {
    let start = state.ui.start_position.clone()?;
    let snapshot = state.store.snapshot();
    let index = SpatialIndex::from_markers(snapshot.uncollected());

    let hit = index.nearest_in_region(start.position, &start.region, state.options.collect_radius)?;
    if !state.store.mark_collected_by_id(hit.marker_id) {
        return None;
    }

    let msg = format!("Marker {} eingesammelt", hit.marker_id);
    log::info!("{} (Distanz {:.2})", msg, hit.distance);
    state.ui.status_message = Some(msg);
    Some(hit.marker_id)
}
