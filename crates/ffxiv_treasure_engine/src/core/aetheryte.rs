//! Ätheryten-Tabelle aus JSON als Referenz-Resolver und Regions-Validator.
//!
//! Layout der Datei:
//! `{"Aetherytes": [{"Name": "...", "MapArea": "...", "X": 0.0, "Y": 0.0, "Fee": 123}]}`.
//! Einträge mit `X == 0 && Y == 0` haben noch keine Koordinaten; ihre Region
//! gilt als bekannt, sie dienen aber nicht als Teleport-Anker.

use super::cost::Fee;
use super::resolver::{FastTravelAnchor, FastTravelResolver, RegionValidator, ResolveError};
use anyhow::{Context, Result};
use glam::Vec2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ein Eintrag der Ätheryten-Datei.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AetheryteEntry {
    /// Name des Ätheryten
    pub name: String,
    /// Region (Karten-Gebiet)
    #[serde(default)]
    pub map_area: String,
    /// Karten-X (0 = noch unbekannt)
    #[serde(default)]
    pub x: f32,
    /// Karten-Y (0 = noch unbekannt)
    #[serde(default)]
    pub y: f32,
    /// Teleport-Gebühr in Gil, falls bekannt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<u32>,
}

impl AetheryteEntry {
    fn has_coordinates(&self) -> bool {
        self.x != 0.0 || self.y != 0.0
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AetheryteFile {
    aetherytes: Vec<AetheryteEntry>,
}

#[derive(Debug, Clone)]
struct RegionAnchors {
    /// Schreibweise des ersten Eintrags der Region
    name: String,
    anchors: Vec<FastTravelAnchor>,
}

/// Nach Region gruppierte Ätheryten in Datei-Reihenfolge.
#[derive(Debug, Clone, Default)]
pub struct AetheryteTable {
    regions: IndexMap<String, RegionAnchors>,
}

/// Vergleichsschlüssel für Regionsnamen (Groß-/Kleinschreibung egal).
fn region_key(region: &str) -> String {
    region.trim().to_lowercase()
}

impl AetheryteTable {
    /// Baut die Tabelle aus einzelnen Einträgen.
    pub fn from_entries(entries: impl IntoIterator<Item = AetheryteEntry>) -> Self {
        let mut regions: IndexMap<String, RegionAnchors> = IndexMap::new();
        let mut skipped = 0usize;

        for entry in entries {
            let region = entry.map_area.trim();
            if region.is_empty() {
                skipped += 1;
                continue;
            }

            let slot = regions
                .entry(region_key(region))
                .or_insert_with(|| RegionAnchors {
                    name: region.to_string(),
                    anchors: Vec::new(),
                });
            if entry.has_coordinates() {
                let fee = entry.fee.map_or(Fee::Unknown, Fee::Known);
                slot.anchors.push(FastTravelAnchor::new(
                    entry.name.trim(),
                    region,
                    Vec2::new(entry.x, entry.y),
                    fee,
                ));
            }
        }

        if skipped > 0 {
            log::debug!("{} Ätheryten ohne MapArea übersprungen", skipped);
        }

        Self { regions }
    }

    /// Parsed die Tabelle aus einem JSON-String.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: AetheryteFile =
            serde_json::from_str(json).context("Ätheryten-JSON konnte nicht gelesen werden")?;
        Ok(Self::from_entries(file.aetherytes))
    }

    /// Lädt die Tabelle aus einer JSON-Datei.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Ätheryten-Datei nicht lesbar: {}", path.display()))?;
        let table = Self::from_json(&content)?;
        log::info!(
            "Ätheryten geladen aus {}: {} Regionen, {} Anker",
            path.display(),
            table.region_count(),
            table.anchor_count()
        );
        Ok(table)
    }

    /// Anzahl bekannter Regionen
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Anzahl nutzbarer Anker (mit Koordinaten)
    pub fn anchor_count(&self) -> usize {
        self.regions.values().map(|r| r.anchors.len()).sum()
    }
}

impl FastTravelResolver for AetheryteTable {
    fn resolve(&self, region: &str) -> Result<Vec<FastTravelAnchor>, ResolveError> {
        Ok(self
            .regions
            .get(&region_key(region))
            .map(|r| r.anchors.clone())
            .unwrap_or_default())
    }
}

impl RegionValidator for AetheryteTable {
    fn canonical_region(&self, region: &str) -> Option<String> {
        self.regions
            .get(&region_key(region))
            .map(|r| r.name.clone())
    }
}
