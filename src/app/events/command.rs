//! Mutierende Commands, ausgeführt vom `AppController`.

use ffxiv_treasure_engine::{RouteOptions, RouteStart};
use std::path::PathBuf;

/// App-Command: eine konkrete Zustandsänderung.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Marker-Zeilen importieren
    ImportMarkerText { text: String },
    /// Marker-Datei lesen und importieren
    ImportMarkerFile { path: PathBuf },
    /// Share-String importieren
    ImportShare { encoded: String },
    /// Share-String erzeugen (landet in `UiState::last_share_export`)
    ExportShare,
    /// Aktiven Marker löschen
    DeleteMarker { index: usize },
    /// Papierkorb-Eintrag wiederherstellen
    RestoreMarker { trash_index: usize },
    /// Gesammelt-Status setzen
    SetMarkerCollected { index: usize, collected: bool },
    /// Aktive Liste leeren
    ClearActive,
    /// Papierkorb leeren
    ClearTrash,
    /// Startpunkt setzen
    SetStartPosition { start: RouteStart },
    /// Nächsten Marker am Startpunkt als gesammelt markieren
    CollectNearStart,
    /// Route berechnen und übernehmen
    OptimizeRoute,
    /// Route und Annotationen verwerfen
    ResetOptimization,
    /// Optionen übernehmen
    ApplyOptions { options: RouteOptions },
}
