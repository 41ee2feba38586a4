//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};
use ffxiv_treasure_engine::RouteStart;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
///
/// Liegt bereits eine Route vor, wird sie nach Importen neu berechnet, damit
/// neue Marker sofort eingeplant sind.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    let reoptimize = state.route.is_some();

    match intent {
        AppIntent::MarkerTextPasted { text } => {
            with_reoptimize(AppCommand::ImportMarkerText { text }, reoptimize)
        }
        AppIntent::MarkerFileImportRequested { path } => {
            with_reoptimize(AppCommand::ImportMarkerFile { path }, reoptimize)
        }
        AppIntent::ShareStringPasted { encoded } => {
            with_reoptimize(AppCommand::ImportShare { encoded }, reoptimize)
        }
        AppIntent::ShareExportRequested => vec![AppCommand::ExportShare],
        AppIntent::MarkerDeleteRequested { index } => vec![AppCommand::DeleteMarker { index }],
        AppIntent::MarkerRestoreRequested { trash_index } => {
            vec![AppCommand::RestoreMarker { trash_index }]
        }
        AppIntent::MarkerCollectedToggled { index, collected } => {
            vec![AppCommand::SetMarkerCollected { index, collected }]
        }
        AppIntent::ClearActiveRequested => vec![AppCommand::ClearActive],
        AppIntent::ClearTrashRequested => vec![AppCommand::ClearTrash],
        AppIntent::StartPositionSet { region, position } => vec![AppCommand::SetStartPosition {
            start: RouteStart {
                position,
                region: region.trim().to_string(),
            },
        }],
        AppIntent::PlayerPositionChanged { region, position } => vec![
            AppCommand::SetStartPosition {
                start: RouteStart {
                    position,
                    region: region.trim().to_string(),
                },
            },
            AppCommand::CollectNearStart,
        ],
        AppIntent::OptimizeRequested => vec![AppCommand::OptimizeRoute],
        AppIntent::ResetOptimizationRequested => vec![AppCommand::ResetOptimization],
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
    }
}

fn with_reoptimize(command: AppCommand, reoptimize: bool) -> Vec<AppCommand> {
    if reoptimize {
        vec![command, AppCommand::OptimizeRoute]
    } else {
        vec![command]
    }
}

#[cfg(test)]
mod tests;
