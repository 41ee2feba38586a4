use crate::app::{AppCommand, AppIntent, AppState};
use ffxiv_treasure_engine::Route;
use glam::Vec2;
use std::sync::Arc;

use super::map_intent_to_commands;

#[test]
fn optimize_requested_maps_to_single_command() {
    let state = AppState::new();

    let commands = map_intent_to_commands(&state, AppIntent::OptimizeRequested);

    assert_eq!(commands, vec![AppCommand::OptimizeRoute]);
}

#[test]
fn import_without_route_does_not_reoptimize() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::MarkerTextPasted {
            text: "Limsa (1, 1)".to_string(),
        },
    );

    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], AppCommand::ImportMarkerText { .. }));
}

#[test]
fn import_with_existing_route_reoptimizes_afterwards() {
    let mut state = AppState::new();
    state.route = Some(Arc::new(Route::empty()));

    let commands = map_intent_to_commands(
        &state,
        AppIntent::ShareStringPasted {
            encoded: "abc".to_string(),
        },
    );

    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::ImportShare { .. }));
    assert_eq!(commands[1], AppCommand::OptimizeRoute);
}

#[test]
fn player_position_sets_start_then_collects() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PlayerPositionChanged {
            region: " Limsa ".to_string(),
            position: Vec2::new(9.5, 11.2),
        },
    );

    assert_eq!(commands.len(), 2);
    match &commands[0] {
        AppCommand::SetStartPosition { start } => {
            assert_eq!(start.region, "Limsa");
            assert_eq!(start.position, Vec2::new(9.5, 11.2));
        }
        other => panic!("Unerwarteter Command: {other:?}"),
    }
    assert_eq!(commands[1], AppCommand::CollectNearStart);
}

#[test]
fn start_position_set_does_not_collect() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::StartPositionSet {
            region: "Gridania".to_string(),
            position: Vec2::ZERO,
        },
    );

    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], AppCommand::SetStartPosition { .. }));
}
