//! AppIntent-, AppCommand- und AppEvent-Enums für den Intent/Command-Datenfluss.

mod command;
mod intent;

pub use command::AppCommand;
pub use intent::AppIntent;

/// Ereignisse nach außen. Werden nach erfolgreichem Abschluss eingereiht und
/// vom Host über `AppState::drain_events` abgeholt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Import abgeschlossen
    Imported {
        /// Anzahl neu angelegter Marker
        count: usize,
    },
    /// Optimierung abgeschlossen
    Optimized {
        /// Anzahl eingeplanter Marker (ohne Teleport-Etappen)
        placed_count: usize,
    },
}
