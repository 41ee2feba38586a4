//! Eingaben aus Host/UI ohne direkte Mutationslogik.

use ffxiv_treasure_engine::RouteOptions;
use glam::Vec2;
use std::path::PathBuf;

/// App-Intent: was der Benutzer (oder ein Hintergrund-Listener) möchte.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Text mit Marker-Zeilen wurde eingefügt (Chat, Zwischenablage)
    MarkerTextPasted { text: String },
    /// Textdatei mit Marker-Zeilen importieren
    MarkerFileImportRequested { path: PathBuf },
    /// Base64-Share-String wurde eingefügt
    ShareStringPasted { encoded: String },
    /// Share-String des aktuellen Bestands erzeugen
    ShareExportRequested,
    /// Aktiven Marker an Listen-Position löschen (→ Papierkorb)
    MarkerDeleteRequested { index: usize },
    /// Papierkorb-Eintrag wiederherstellen
    MarkerRestoreRequested { trash_index: usize },
    /// Gesammelt-Status eines aktiven Markers setzen
    MarkerCollectedToggled { index: usize, collected: bool },
    /// Aktive Liste leeren
    ClearActiveRequested,
    /// Papierkorb leeren
    ClearTrashRequested,
    /// Startpunkt für die nächste Optimierung festlegen
    StartPositionSet { region: String, position: Vec2 },
    /// Spielerposition hat sich geändert (setzt Startpunkt und sammelt nahe Marker ein)
    PlayerPositionChanged { region: String, position: Vec2 },
    /// Route berechnen
    OptimizeRequested,
    /// Letzte Route und Annotationen verwerfen
    ResetOptimizationRequested,
    /// Laufzeit-Optionen übernehmen
    OptionsChanged { options: RouteOptions },
}
