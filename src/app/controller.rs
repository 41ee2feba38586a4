//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};

/// Orchestriert Host-Intents und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Import / Export ===
            AppCommand::ImportMarkerText { text } => handlers::import::import_text(state, &text),
            AppCommand::ImportMarkerFile { path } => handlers::import::import_file(state, &path)?,
            AppCommand::ImportShare { encoded } => handlers::import::import_share(state, &encoded)?,
            AppCommand::ExportShare => handlers::import::export_share(state)?,

            // === Marker-Lebenszyklus ===
            AppCommand::DeleteMarker { index } => handlers::markers::delete(state, index),
            AppCommand::RestoreMarker { trash_index } => {
                handlers::markers::restore(state, trash_index)
            }
            AppCommand::SetMarkerCollected { index, collected } => {
                handlers::markers::set_collected(state, index, collected)
            }
            AppCommand::ClearActive => handlers::markers::clear_active(state),
            AppCommand::ClearTrash => handlers::markers::clear_trash(state),
            AppCommand::SetStartPosition { start } => handlers::markers::set_start(state, start),
            AppCommand::CollectNearStart => handlers::markers::collect_near_start(state),

            // === Route ===
            AppCommand::OptimizeRoute => handlers::route::optimize(state),
            AppCommand::ResetOptimization => handlers::route::reset(state),
            AppCommand::ApplyOptions { options } => handlers::route::apply_options(state, options),
        }

        Ok(())
    }
}
