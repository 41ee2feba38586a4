//! Handler für Marker-Lebenszyklus und Startpunkt.

use crate::app::use_cases;
use crate::app::AppState;
use ffxiv_treasure_engine::RouteStart;

/// Löscht einen aktiven Marker.
pub fn delete(state: &mut AppState, index: usize) {
    use_cases::markers::delete_marker(state, index);
}

/// Stellt einen Papierkorb-Eintrag wieder her.
pub fn restore(state: &mut AppState, trash_index: usize) {
    use_cases::markers::restore_marker(state, trash_index);
}

/// Setzt den Gesammelt-Status.
pub fn set_collected(state: &mut AppState, index: usize, collected: bool) {
    use_cases::markers::set_collected(state, index, collected);
}

/// Leert die aktive Liste.
pub fn clear_active(state: &mut AppState) {
    use_cases::markers::clear_active(state);
}

/// Leert den Papierkorb.
pub fn clear_trash(state: &mut AppState) {
    use_cases::markers::clear_trash(state);
}

/// Setzt den Startpunkt.
pub fn set_start(state: &mut AppState, start: RouteStart) {
    use_cases::markers::set_start_position(state, start);
}

/// Sammelt den nächsten Marker am Startpunkt ein.
pub fn collect_near_start(state: &mut AppState) {
    use_cases::markers::collect_near_start(state);
}
