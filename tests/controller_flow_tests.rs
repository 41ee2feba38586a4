//! Integrationstests für den Intent/Command-Fluss über den `AppController`:
//! - Import aus Datei, Text und Share-String
//! - Optimierung mit Ätheryten-Tabelle
//! - Marker-Lebenszyklus (Papierkorb, Gesammelt, Leeren)

use ffxiv_treasure_route::engine::{FastTravelResolver, MarkerStatus, RegionValidator};
use ffxiv_treasure_route::{
    AetheryteTable, AppCommand, AppController, AppEvent, AppIntent, AppState, RouteOptions,
    RouteStep,
};
use glam::Vec2;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn state_with_aetherytes() -> AppState {
    let table = Arc::new(
        AetheryteTable::load_from_file(&fixture("aetherytes.json"))
            .expect("Ätheryten-Fixture sollte lesbar sein"),
    );
    let resolver: Arc<dyn FastTravelResolver> = table.clone();
    let validator: Arc<dyn RegionValidator> = table;
    AppState::with_services(resolver, validator)
}

fn import_fixture(controller: &mut AppController, state: &mut AppState) {
    controller
        .handle_intent(
            state,
            AppIntent::MarkerFileImportRequested {
                path: fixture("markers.txt"),
            },
        )
        .expect("Import sollte ohne Fehler durchlaufen");
}

fn paste(controller: &mut AppController, state: &mut AppState, text: &str) {
    controller
        .handle_intent(
            state,
            AppIntent::MarkerTextPasted {
                text: text.to_string(),
            },
        )
        .expect("Import sollte ohne Fehler durchlaufen");
}

fn active_regions(state: &AppState) -> Vec<String> {
    state
        .store
        .snapshot()
        .active()
        .map(|m| m.region().to_string())
        .collect()
}

#[test]
fn test_file_import_counts_duplicates_warnings_and_bad_lines() {
    let mut controller = AppController::new();
    let mut state = state_with_aetherytes();

    import_fixture(&mut controller, &mut state);

    assert_eq!(state.active_count(), 6);
    assert_eq!(
        state.ui.status_message.as_deref(),
        Some("6 Marker importiert, 1 mit Warnung, 1 Duplikate, 1 Zeilen nicht erkannt")
    );
    assert_eq!(state.drain_events(), vec![AppEvent::Imported { count: 6 }]);
    assert!(state.drain_events().is_empty(), "Events werden nur einmal ausgeliefert");

    let snapshot = state.store.snapshot();
    let mor_dhona = snapshot
        .active()
        .find(|m| m.region() == "Mor Dhona")
        .expect("Marker mit unbekannter Region erwartet");
    assert!(mor_dhona.warning().is_some());
    assert_eq!(
        snapshot.active_at(0).and_then(|m| m.owner_name()),
        Some("Thancred")
    );
}

#[test]
fn test_missing_marker_file_is_reported_as_error() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    let result = controller.handle_intent(
        &mut state,
        AppIntent::MarkerFileImportRequested {
            path: fixture("gibt_es_nicht.txt"),
        },
    );

    assert!(result.is_err());
    assert!(state.drain_events().is_empty());
}

#[test]
fn test_reject_unknown_regions_option_skips_them() {
    let mut controller = AppController::new();
    let mut state = state_with_aetherytes();
    state.options.reject_unknown_regions = true;

    import_fixture(&mut controller, &mut state);

    assert_eq!(state.active_count(), 5);
    assert!(!active_regions(&state).iter().any(|r| r == "Mor Dhona"));
}

#[test]
fn test_optimize_with_aetherytes_places_every_marker() {
    let mut controller = AppController::new();
    let mut state = state_with_aetherytes();
    import_fixture(&mut controller, &mut state);
    state.drain_events();

    controller
        .handle_intent(&mut state, AppIntent::OptimizeRequested)
        .expect("Optimierung sollte durchlaufen");

    let route = state.route.clone().expect("Route erwartet");
    assert_eq!(route.point_count(), 6);
    assert_eq!(state.drain_events(), vec![AppEvent::Optimized { placed_count: 6 }]);

    let ids = route.visit_ids();
    assert_eq!(ids[0], 1, "Ohne Startpunkt beginnt die Route beim ersten Import");
    // Southern Thanalan (unbekannte Gebühr) und Mor Dhona (kein Ätheryt) kommen zuletzt
    assert_eq!(&ids[4..], &[5, 6]);
    assert_eq!(route.unknown_legs(), 2);

    let swiftperch_used = route
        .legs()
        .any(|leg| leg.anchor_name.as_deref() == Some("Swiftperch"));
    assert!(swiftperch_used, "Nächster Ätheryt in Western La Noscea erwartet");

    // Store übernimmt Reihenfolge und Annotationen
    let snapshot = state.store.snapshot();
    let store_ids: Vec<_> = snapshot.active().map(|m| m.id()).collect();
    assert_eq!(store_ids, ids);
    for (step_index, step) in route.steps().iter().enumerate() {
        if let RouteStep::FastTravel(leg) = step {
            match route.steps().get(step_index + 1) {
                Some(RouteStep::Visit(marker)) => {
                    assert_eq!(marker.annotation(), Some(leg.describe().as_str()))
                }
                other => panic!("Nach einer Etappe muss ein Besuch folgen: {other:?}"),
            }
        }
    }

    let status = state.ui.status_message.clone().expect("Statuszeile erwartet");
    assert!(status.starts_with("Route: 6 Punkte"), "{status}");
}

#[test]
fn test_reset_then_optimize_yields_same_order_and_keeps_collected() {
    let mut controller = AppController::new();
    let mut state = state_with_aetherytes();
    import_fixture(&mut controller, &mut state);

    controller
        .handle_intent(&mut state, AppIntent::OptimizeRequested)
        .expect("Optimierung sollte durchlaufen");
    let first = state.route.clone().expect("Route erwartet").visit_ids();

    controller
        .handle_intent(
            &mut state,
            AppIntent::MarkerCollectedToggled {
                index: 2,
                collected: true,
            },
        )
        .expect("Toggle sollte durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::ResetOptimizationRequested)
        .expect("Reset sollte durchlaufen");

    assert!(state.route.is_none());
    assert!(state.store.snapshot().active().all(|m| m.annotation().is_none()));
    assert_eq!(state.store.stats().collected, 1);

    controller
        .handle_intent(&mut state, AppIntent::OptimizeRequested)
        .expect("Optimierung sollte durchlaufen");
    let second = state.route.clone().expect("Route erwartet").visit_ids();
    assert_eq!(first, second);
}

#[test]
fn test_skip_collected_leaves_collected_markers_out() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    state.options.skip_collected = true;
    paste(&mut controller, &mut state, "Limsa (1, 1)\nLimsa (2, 2)\nLimsa (3, 3)");

    controller
        .handle_intent(
            &mut state,
            AppIntent::MarkerCollectedToggled {
                index: 1,
                collected: true,
            },
        )
        .expect("Toggle sollte durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::OptimizeRequested)
        .expect("Optimierung sollte durchlaufen");

    let route = state.route.clone().expect("Route erwartet");
    assert_eq!(route.visit_ids(), vec![1, 3]);
    assert_eq!(state.active_count(), 3, "Gesammelte Marker bleiben im Store");
}

#[test]
fn test_delete_then_restore_appends_to_active() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    paste(&mut controller, &mut state, "Limsa (9.5, 11.2)\nLimsa (10.0, 11.0)");

    controller
        .handle_intent(&mut state, AppIntent::MarkerDeleteRequested { index: 0 })
        .expect("Löschen sollte durchlaufen");
    assert_eq!(state.active_count(), 1);
    assert_eq!(state.trash_count(), 1);

    controller
        .handle_intent(&mut state, AppIntent::MarkerRestoreRequested { trash_index: 0 })
        .expect("Wiederherstellen sollte durchlaufen");

    let ids: Vec<_> = state.store.snapshot().active().map(|m| m.id()).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(state.trash_count(), 0);
}

#[test]
fn test_reoptimize_single_marker_clears_stale_annotation() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    paste(&mut controller, &mut state, "Limsa (1, 1)\nUl'dah (5, 5)");

    controller
        .handle_intent(&mut state, AppIntent::OptimizeRequested)
        .expect("Optimierung sollte durchlaufen");
    let snapshot = state.store.snapshot();
    let uldah = snapshot.active().find(|m| m.id() == 2).expect("Marker 2 erwartet");
    assert!(uldah.annotation().is_some());

    controller
        .handle_intent(&mut state, AppIntent::MarkerDeleteRequested { index: 0 })
        .expect("Löschen sollte durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::OptimizeRequested)
        .expect("Optimierung sollte durchlaufen");

    let route = state.route.clone().expect("Route erwartet");
    assert_eq!(route.legs().count(), 0);
    let annotations: Vec<_> = state
        .store
        .snapshot()
        .active()
        .map(|m| (m.id(), m.annotation().map(str::to_string)))
        .collect();
    assert_eq!(annotations, vec![(2, None)]);
}

#[test]
fn test_region_spelling_is_normalized_to_table_name() {
    let mut controller = AppController::new();
    let mut state = state_with_aetherytes();
    paste(
        &mut controller,
        &mut state,
        "Western La Noscea (27.0, 25.1)\nwestern la noscea (27.5, 25.1)\n  WESTERN LA NOSCEA (27.0, 25.12)",
    );

    assert_eq!(state.active_count(), 2);
    assert_eq!(
        state.ui.status_message.as_deref(),
        Some("2 Marker importiert, 1 Duplikate")
    );
    assert_eq!(
        active_regions(&state),
        vec!["Western La Noscea", "Western La Noscea"]
    );

    controller
        .handle_intent(&mut state, AppIntent::OptimizeRequested)
        .expect("Optimierung sollte durchlaufen");
    let route = state.route.clone().expect("Route erwartet");
    assert_eq!(route.visit_ids(), vec![1, 2]);
    assert_eq!(route.legs().count(), 0);

    controller
        .handle_intent(
            &mut state,
            AppIntent::PlayerPositionChanged {
                region: "western LA noscea".to_string(),
                position: Vec2::new(27.5, 25.1),
            },
        )
        .expect("Positionsupdate sollte durchlaufen");
    assert_eq!(
        state.store.snapshot().status_of(2),
        Some(MarkerStatus::Collected)
    );
}

#[test]
fn test_invalid_index_becomes_status_message() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, AppIntent::MarkerDeleteRequested { index: 3 })
        .expect("Ungültiger Index ist kein harter Fehler");

    let status = state.ui.status_message.clone().expect("Statuszeile erwartet");
    assert!(status.contains("Ungültiger Index 3"), "{status}");

    let last = state
        .command_log
        .entries()
        .last()
        .expect("Es sollte ein Command geloggt sein");
    assert_eq!(last, &AppCommand::DeleteMarker { index: 3 });
}

#[test]
fn test_clear_active_keeps_trash_and_drops_route() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    paste(&mut controller, &mut state, "Limsa (1, 1)\nLimsa (2, 2)");
    controller
        .handle_intent(&mut state, AppIntent::MarkerDeleteRequested { index: 0 })
        .expect("Löschen sollte durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::OptimizeRequested)
        .expect("Optimierung sollte durchlaufen");

    controller
        .handle_intent(&mut state, AppIntent::ClearActiveRequested)
        .expect("Leeren sollte durchlaufen");

    assert_eq!(state.active_count(), 0);
    assert_eq!(state.trash_count(), 1);
    assert!(state.route.is_none());

    controller
        .handle_intent(&mut state, AppIntent::ClearTrashRequested)
        .expect("Leeren sollte durchlaufen");
    assert_eq!(state.trash_count(), 0);
    assert!(state.store.stats().is_conserved());
}

#[test]
fn test_optimize_without_markers_reports_status() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, AppIntent::OptimizeRequested)
        .expect("Leere Eingabe ist kein Fehler");

    assert_eq!(
        state.ui.status_message.as_deref(),
        Some("Keine Koordinaten zum Optimieren")
    );
    assert!(state.route.as_ref().is_some_and(|r| r.is_empty()));
    assert_eq!(state.drain_events(), vec![AppEvent::Optimized { placed_count: 0 }]);
}

#[test]
fn test_start_position_changes_first_visit() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    paste(&mut controller, &mut state, "Limsa (1, 1)\nLimsa (20, 20)");

    controller
        .handle_intent(
            &mut state,
            AppIntent::StartPositionSet {
                region: "Limsa".to_string(),
                position: Vec2::new(19.0, 19.0),
            },
        )
        .expect("Startpunkt sollte gesetzt werden");
    controller
        .handle_intent(&mut state, AppIntent::OptimizeRequested)
        .expect("Optimierung sollte durchlaufen");

    assert_eq!(state.route.clone().expect("Route erwartet").visit_ids(), vec![2, 1]);
    assert_eq!(state.store.stats().collected, 0, "Startpunkt sammelt nichts ein");
}

#[test]
fn test_player_position_collects_nearby_marker_of_same_region() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    paste(&mut controller, &mut state, "Limsa (10, 10)\nGridania (10.2, 10)");

    controller
        .handle_intent(
            &mut state,
            AppIntent::PlayerPositionChanged {
                region: "Gridania".to_string(),
                position: Vec2::new(10.0, 10.0),
            },
        )
        .expect("Positionsupdate sollte durchlaufen");

    let snapshot = state.store.snapshot();
    assert_eq!(snapshot.status_of(1), Some(MarkerStatus::Active));
    assert_eq!(snapshot.status_of(2), Some(MarkerStatus::Collected));
    assert!(state.ui.start_position.is_some());
}

#[test]
fn test_import_after_optimize_reoptimizes() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    paste(&mut controller, &mut state, "Limsa (1, 1)");
    controller
        .handle_intent(&mut state, AppIntent::OptimizeRequested)
        .expect("Optimierung sollte durchlaufen");
    state.drain_events();

    paste(&mut controller, &mut state, "Limsa (2, 2)");

    assert_eq!(state.route.clone().expect("Route erwartet").point_count(), 2);
    assert_eq!(
        state.drain_events(),
        vec![
            AppEvent::Imported { count: 1 },
            AppEvent::Optimized { placed_count: 2 }
        ]
    );
}

#[test]
fn test_share_round_trip_between_states() {
    let mut controller = AppController::new();
    let mut source = AppState::new();
    paste(
        &mut controller,
        &mut source,
        "Alisaie: Limsa (9.5, 11.2)\nUl'dah (10, 11)\n(21.3, 7.7)",
    );
    controller
        .handle_intent(
            &mut source,
            AppIntent::MarkerCollectedToggled {
                index: 0,
                collected: true,
            },
        )
        .expect("Toggle sollte durchlaufen");
    controller
        .handle_intent(&mut source, AppIntent::MarkerDeleteRequested { index: 1 })
        .expect("Löschen sollte durchlaufen");
    controller
        .handle_intent(&mut source, AppIntent::ShareExportRequested)
        .expect("Export sollte durchlaufen");
    let encoded = source
        .ui
        .last_share_export
        .clone()
        .expect("Share-String erwartet");

    let mut target = AppState::new();
    controller
        .handle_intent(
            &mut target,
            AppIntent::ShareStringPasted {
                encoded: encoded.clone(),
            },
        )
        .expect("Share-Import sollte durchlaufen");

    assert_eq!(target.active_count(), 2);
    assert_eq!(target.trash_count(), 1);
    assert_eq!(target.store.stats().collected, 1);

    controller
        .handle_intent(&mut target, AppIntent::ShareExportRequested)
        .expect("Export sollte durchlaufen");
    assert_eq!(target.ui.last_share_export, Some(encoded));
}

#[test]
fn test_broken_share_string_is_an_error() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    let result = controller.handle_intent(
        &mut state,
        AppIntent::ShareStringPasted {
            encoded: "kein base64 !".to_string(),
        },
    );

    assert!(result.is_err());
    assert_eq!(state.active_count(), 0);
}

#[test]
fn test_options_changed_are_applied() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let options = RouteOptions {
        in_region_fast_travel: true,
        ..RouteOptions::default()
    };

    controller
        .handle_intent(
            &mut state,
            AppIntent::OptionsChanged {
                options: options.clone(),
            },
        )
        .expect("Optionen sollten übernommen werden");

    assert_eq!(state.options, options);
}
