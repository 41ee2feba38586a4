//! Ein einzelner Schatz-Marker und seine Import-Vorlage.

use super::coords::Position;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stabile Marker-Identität. Wird beim Import fortlaufend vergeben und
/// entspricht damit auch der Import-Reihenfolge.
pub type MarkerId = u64;

/// Lebenszyklus-Status eines Markers aus Sicht des Stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerStatus {
    /// In der aktiven Liste, noch nicht gesammelt
    Active,
    /// In der aktiven Liste und als gesammelt markiert
    Collected,
    /// Im Papierkorb
    Deleted,
}

/// Vom externen Parser validiertes Tupel `(Position, Region, Besitzer)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDraft {
    /// Position inkl. Koordinatenraum
    pub position: Position,
    /// Name der Region (leer = unbekannt)
    pub region: String,
    /// Optionaler Name des Meldenden
    pub owner_name: Option<String>,
}

impl MarkerDraft {
    /// Erstellt eine Vorlage im Karten-Raum ohne Besitzer.
    pub fn new(region: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            position: Position::map(x, y),
            region: region.into(),
            owner_name: None,
        }
    }

    /// Setzt den Besitzer-Namen.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner_name = Some(owner.into());
        self
    }
}

/// Ein besuchbarer Punkt.
///
/// `id`, Position und Region sind nach dem Import unveränderlich; nur der
/// Gesammelt-Status und die Optimierer-Annotation ändern sich über den Store.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    id: MarkerId,
    position: Vec2,
    region: String,
    owner_name: Option<String>,
    pub(crate) collected: bool,
    pub(crate) annotation: Option<String>,
    pub(crate) warning: Option<String>,
}

impl Marker {
    /// Erzeugt einen Marker aus einer (bereits im Karten-Raum liegenden) Vorlage.
    pub(crate) fn from_draft(id: MarkerId, draft: MarkerDraft) -> Self {
        Self {
            id,
            position: draft.position.point,
            region: draft.region.trim().to_string(),
            owner_name: draft.owner_name.filter(|o| !o.trim().is_empty()),
            collected: false,
            annotation: None,
            warning: None,
        }
    }

    /// Marker-ID
    pub fn id(&self) -> MarkerId {
        self.id
    }

    /// Karten-Position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Region (leer = unbekannt)
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Gibt `true` zurück, wenn die Region unbekannt ist.
    pub fn has_unknown_region(&self) -> bool {
        self.region.is_empty()
    }

    /// Name des Meldenden (nur Anzeige)
    pub fn owner_name(&self) -> Option<&str> {
        self.owner_name.as_deref()
    }

    /// Gesammelt-Flag
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Vom Optimierer gesetzte Erklärung des vorangehenden Teleports
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// Import-Warnung (z.B. unbekannte Region, trotzdem übernommen)
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Kopie mit gesetzter Annotation (für Routen-Schritte).
    pub(crate) fn with_annotation(&self, annotation: Option<String>) -> Self {
        let mut marker = self.clone();
        marker.annotation = annotation;
        marker
    }
}
