//! Ergebnis einer Optimierung: unveränderliche, direkt indexierbare Route.

use super::cost::Fee;
use super::marker::{Marker, MarkerId};

/// Synthetische Teleport-Etappe vor einem Marker.
#[derive(Debug, Clone, PartialEq)]
pub struct FastTravelLeg {
    /// Name des genutzten Ätheryten (`None` = kein Anker bekannt)
    pub anchor_name: Option<String>,
    /// Zielregion (leer = unbekannt)
    pub region: String,
    /// Gebühr
    pub fee: Fee,
    /// Kosten der Etappe in Sekunden (unendlich = unbekannt)
    pub cost: f32,
}

impl FastTravelLeg {
    /// Gibt `true` zurück, wenn die Kosten der Etappe unbekannt sind.
    pub fn has_unknown_cost(&self) -> bool {
        !self.cost.is_finite()
    }

    /// Erklärungstext, der an den folgenden Marker gehängt wird.
    pub fn describe(&self) -> String {
        match (&self.anchor_name, self.fee) {
            (Some(anchor), Fee::Known(_)) => format!("Teleport to {} ({})", anchor, self.fee),
            (Some(anchor), Fee::Unknown) => format!("Teleport to {} (unknown fee)", anchor),
            (None, _) if self.region.is_empty() => {
                "Teleport to unknown region (unknown cost)".to_string()
            }
            (None, _) => format!(
                "Teleport to {} (unknown cost, no known aetheryte)",
                self.region
            ),
        }
    }
}

/// Ein Element der Besuchsreihenfolge.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteStep {
    /// Echter Marker-Besuch
    Visit(Marker),
    /// Eingefügte Teleport-Etappe (zählt nicht als Punkt)
    FastTravel(FastTravelLeg),
}

/// Berechnete Route. Wird einmal pro Optimierung gebaut und danach nur gelesen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    steps: Vec<RouteStep>,
    /// Schritt-Index → laufende Punkt-Nummer (nur für Besuche)
    point_indices: Vec<Option<usize>>,
    point_count: usize,
    known_cost: f32,
    unknown_legs: usize,
}

impl Route {
    /// Leere Route (keine aktiven Marker).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Baut die Route inkl. Punkt-Index-Tabelle.
    pub(crate) fn from_steps(steps: Vec<RouteStep>, known_cost: f32) -> Self {
        let mut point_indices = Vec::with_capacity(steps.len());
        let mut point_count = 0usize;
        let mut unknown_legs = 0usize;

        for step in &steps {
            match step {
                RouteStep::Visit(_) => {
                    point_indices.push(Some(point_count));
                    point_count += 1;
                }
                RouteStep::FastTravel(leg) => {
                    if leg.has_unknown_cost() {
                        unknown_legs += 1;
                    }
                    point_indices.push(None);
                }
            }
        }

        Self {
            steps,
            point_indices,
            point_count,
            known_cost,
            unknown_legs,
        }
    }

    /// Alle Schritte in Besuchsreihenfolge
    pub fn steps(&self) -> &[RouteStep] {
        &self.steps
    }

    /// Anzahl echter Marker (ohne Teleport-Etappen)
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Gibt `true` zurück, wenn die Route keine Schritte enthält.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Punkt-Nummer (0-basiert) eines Schritts; `None` für Teleport-Etappen.
    pub fn point_index(&self, step_index: usize) -> Option<usize> {
        self.point_indices.get(step_index).copied().flatten()
    }

    /// Besuchte Marker in Reihenfolge
    pub fn visits(&self) -> impl Iterator<Item = &Marker> {
        self.steps.iter().filter_map(|step| match step {
            RouteStep::Visit(marker) => Some(marker),
            RouteStep::FastTravel(_) => None,
        })
    }

    /// IDs der besuchten Marker in Reihenfolge
    pub fn visit_ids(&self) -> Vec<MarkerId> {
        self.visits().map(Marker::id).collect()
    }

    /// Eingefügte Teleport-Etappen in Reihenfolge
    pub fn legs(&self) -> impl Iterator<Item = &FastTravelLeg> {
        self.steps.iter().filter_map(|step| match step {
            RouteStep::FastTravel(leg) => Some(leg),
            RouteStep::Visit(_) => None,
        })
    }

    /// Summe aller bekannten Etappenkosten in Sekunden
    pub fn known_cost(&self) -> f32 {
        self.known_cost
    }

    /// Anzahl der Etappen mit unbekannten Kosten
    pub fn unknown_legs(&self) -> usize {
        self.unknown_legs
    }

    /// Einzeilige Zusammenfassung für die Statuszeile.
    pub fn summary_line(&self) -> String {
        if self.point_count == 0 {
            return "Keine Koordinaten zum Optimieren".to_string();
        }

        let teleports = self.legs().count();
        let mut line = format!(
            "Route: {} Punkte, {} Teleports, ~{:.0}s",
            self.point_count, teleports, self.known_cost
        );
        if self.unknown_legs > 0 {
            line.push_str(&format!(" (+{} Etappen mit unbekannten Kosten)", self.unknown_legs));
        }
        line
    }
}
