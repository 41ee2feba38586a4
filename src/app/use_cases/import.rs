//! Use-Cases für Import und Export von Markern.
//! Alle Dateisystem-Operationen (I/O) sind hier zentralisiert.

use crate::app::events::AppEvent;
use crate::app::AppState;
use anyhow::Context;
use ffxiv_treasure_engine::{
    export_share, import_share, parse_marker_text, MarkerDraft, SpatialIndex, StoreError,
};
use glam::Vec2;
use std::path::Path;

/// Zähler eines Import-Vorgangs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Neu angelegte Marker (inkl. solcher mit Warnung)
    pub added: usize,
    /// Davon mit Warnung übernommen
    pub warned: usize,
    /// Als Duplikat übersprungen
    pub duplicates: usize,
    /// Abgelehnt (Region oder Koordinatenraum)
    pub rejected: usize,
    /// Nicht lesbare Zeilen
    pub unreadable: usize,
}

impl ImportSummary {
    fn status_line(&self) -> String {
        let mut line = format!("{} Marker importiert", self.added);
        let details = [
            (self.warned, "mit Warnung"),
            (self.duplicates, "Duplikate"),
            (self.rejected, "abgelehnt"),
            (self.unreadable, "Zeilen nicht erkannt"),
        ];
        for (count, label) in details {
            if count > 0 {
                line.push_str(&format!(", {count} {label}"));
            }
        }
        line
    }
}

/// Erkennt Duplikate gegen den Bestand und gegen bereits importierte Zeilen.
struct DuplicateFilter {
    index: SpatialIndex,
    batch: Vec<(Vec2, String)>,
    radius: f32,
}

impl DuplicateFilter {
    fn new(state: &AppState) -> Self {
        let snapshot = state.store.snapshot();
        Self {
            index: SpatialIndex::from_markers(snapshot.active()),
            batch: Vec::new(),
            radius: state.options.duplicate_radius,
        }
    }

    /// `region` muss bereits kanonisch sein (siehe `MarkerStore::canonical_region`).
    fn is_duplicate(&self, draft: &MarkerDraft, region: &str) -> bool {
        if self.radius <= 0.0 || region.is_empty() {
            return false;
        }
        let point = draft.position.point;

        self.index
            .nearest_in_region(point, region, self.radius)
            .is_some()
            || self
                .batch
                .iter()
                .any(|(pos, r)| r == region && pos.distance(point) <= self.radius)
    }

    fn remember(&mut self, draft: &MarkerDraft, region: String) {
        self.batch.push((draft.position.point, region));
    }
}

/// Importiert Marker-Zeilen aus einem Text.
///
/// Unbekannte Regionen werden je nach `reject_unknown_regions` abgelehnt
/// oder mit Warnung übernommen. Fehlerhafte Zeilen werden gezählt, brechen
/// den Import aber nicht ab.
pub fn import_marker_text(state: &mut AppState, text: &str) -> ImportSummary {
    let parsed = parse_marker_text(text);
    let mut summary = ImportSummary {
        unreadable: parsed.errors.len(),
        ..ImportSummary::default()
    };
    let mut duplicates = DuplicateFilter::new(state);

    for draft in parsed.drafts {
        let region = state.store.canonical_region(&draft.region);
        if duplicates.is_duplicate(&draft, &region) {
            log::debug!("Duplikat übersprungen: {:?} in {:?}", draft.position.point, draft.region);
            summary.duplicates += 1;
            continue;
        }

        match state.store.add(draft.clone()) {
            Ok(_) => summary.added += 1,
            Err(StoreError::InvalidRegion(region)) if !state.options.reject_unknown_regions => {
                let warning = format!("Unbekannte Region: {region}");
                match state.store.add_with_warning(draft.clone(), warning) {
                    Ok(_) => {
                        log::warn!("Marker mit unbekannter Region übernommen: {:?}", region);
                        summary.added += 1;
                        summary.warned += 1;
                    }
                    Err(e) => {
                        log::warn!("Marker abgelehnt: {}", e);
                        summary.rejected += 1;
                        continue;
                    }
                }
            }
            Err(e) => {
                log::warn!("Marker abgelehnt: {}", e);
                summary.rejected += 1;
                continue;
            }
        }
        duplicates.remember(&draft, region);
    }

    let msg = summary.status_line();
    log::info!("{}", msg);
    state.ui.status_message = Some(msg);
    state.push_event(AppEvent::Imported {
        count: summary.added,
    });
    summary
}

/// Liest eine Textdatei mit Marker-Zeilen und importiert sie.
pub fn import_marker_file(state: &mut AppState, path: &Path) -> anyhow::Result<ImportSummary> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Marker-Datei konnte nicht gelesen werden: {}", path.display()))?;
    Ok(import_marker_text(state, &text))
}

/// Importiert einen Base64-Share-String inkl. Gesammelt- und Papierkorb-Status.
pub fn import_share_string(state: &mut AppState, encoded: &str) -> anyhow::Result<usize> {
    let shared = import_share(encoded).context("Share-String konnte nicht gelesen werden")?;

    let mut added = 0;
    for marker in &shared {
        match state
            .store
            .add_shared(marker.to_draft(), marker.collected, marker.deleted)
        {
            Ok(_) => added += 1,
            Err(e) => log::warn!("Geteilter Marker abgelehnt: {}", e),
        }
    }

    let msg = format!("{added} Marker aus Share-String importiert");
    log::info!("{}", msg);
    state.ui.status_message = Some(msg);
    state.push_event(AppEvent::Imported { count: added });
    Ok(added)
}

/// Erzeugt einen Share-String des aktuellen Bestands.
pub fn export_share_string(state: &mut AppState) -> anyhow::Result<String> {
    let snapshot = state.store.snapshot();
    let encoded = export_share(&snapshot).context("Share-String konnte nicht erzeugt werden")?;

    log::info!(
        "Share-String erzeugt: {} aktiv, {} im Papierkorb",
        snapshot.active_len(),
        snapshot.trash_len()
    );
    state.ui.last_share_export = Some(encoded.clone());
    Ok(encoded)
}
