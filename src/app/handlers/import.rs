//! Handler für Import und Export (Text, Datei, Share-String).

use crate::app::use_cases;
use crate::app::AppState;
use std::path::Path;

/// Importiert eingefügten Text.
pub fn import_text(state: &mut AppState, text: &str) {
    use_cases::import::import_marker_text(state, text);
}

/// Importiert eine Marker-Datei.
pub fn import_file(state: &mut AppState, path: &Path) -> anyhow::Result<()> {
    use_cases::import::import_marker_file(state, path)?;
    Ok(())
}

/// Importiert einen Share-String.
pub fn import_share(state: &mut AppState, encoded: &str) -> anyhow::Result<()> {
    use_cases::import::import_share_string(state, encoded)?;
    Ok(())
}

/// Erzeugt einen Share-String im UI-State.
pub fn export_share(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::import::export_share_string(state)?;
    Ok(())
}
