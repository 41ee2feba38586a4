//! Kostenmodell: Laufen und Teleport in einer gemeinsamen Zeit-Einheit.
//!
//! Alle Kosten sind Zeit-Äquivalente in Sekunden. Gil-Gebühren werden über
//! einen konfigurierbaren Wechselkurs umgerechnet, damit ein Fußweg direkt mit
//! einem Teleport verglichen werden kann.

use super::marker::Marker;
use super::resolver::FastTravelAnchor;
use crate::shared::options::{SECONDS_PER_GIL, TELEPORT_OVERHEAD_SECONDS, WALK_SECONDS_PER_UNIT};
use crate::shared::RouteOptions;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel für unbekannte Kosten. Jede bekannte Kostenangabe ist kleiner.
pub const WORST_CASE_COST: f32 = f32::INFINITY;

/// Teleport-Gebühr in Gil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fee {
    /// Bekannte Gebühr
    Known(u32),
    /// Gebühr konnte nicht ermittelt werden
    Unknown,
}

impl Fee {
    /// Gebühr in Gil, falls bekannt.
    pub fn gil(&self) -> Option<u32> {
        match self {
            Fee::Known(gil) => Some(*gil),
            Fee::Unknown => None,
        }
    }

    /// Gibt `true` zurück, wenn die Gebühr bekannt ist.
    pub fn is_known(&self) -> bool {
        matches!(self, Fee::Known(_))
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fee::Known(gil) => write!(f, "{gil} gil"),
            Fee::Unknown => write!(f, "unknown fee"),
        }
    }
}

/// Ort auf der Route: Position plus Region (leer = unbekannt).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint<'a> {
    /// Karten-Position
    pub position: Vec2,
    /// Region
    pub region: &'a str,
}

impl Waypoint<'_> {
    /// Prüft, ob beide Orte in derselben bekannten Region liegen.
    ///
    /// Unbekannte (leere) Regionen gelten nie als gleich, auch nicht untereinander.
    pub fn shares_region_with(&self, other: &Waypoint<'_>) -> bool {
        !self.region.is_empty() && self.region == other.region
    }
}

impl<'a> From<&'a Marker> for Waypoint<'a> {
    fn from(marker: &'a Marker) -> Self {
        Self {
            position: marker.position(),
            region: marker.region(),
        }
    }
}

/// Reine Kostenfunktionen für Fußweg- und Teleport-Etappen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    /// Sekunden pro Karten-Einheit Fußweg (beritten)
    pub walk_seconds_per_unit: f32,
    /// Wechselkurs Gil → Sekunden
    pub seconds_per_gil: f32,
    /// Fixer Zeitaufwand pro Teleport (Zauber + Ladebildschirm)
    pub teleport_overhead_seconds: f32,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            walk_seconds_per_unit: WALK_SECONDS_PER_UNIT,
            seconds_per_gil: SECONDS_PER_GIL,
            teleport_overhead_seconds: TELEPORT_OVERHEAD_SECONDS,
        }
    }
}

impl CostModel {
    /// Übernimmt die Kostenparameter aus den Laufzeit-Optionen.
    pub fn from_options(options: &RouteOptions) -> Self {
        Self {
            walk_seconds_per_unit: options.walk_seconds_per_unit,
            seconds_per_gil: options.seconds_per_gil,
            teleport_overhead_seconds: options.teleport_overhead_seconds,
        }
    }

    /// Reine Laufzeit zwischen zwei Positionen (ohne Regions-Prüfung).
    pub fn travel_seconds(&self, from: Vec2, to: Vec2) -> f32 {
        from.distance(to) * self.walk_seconds_per_unit
    }

    /// Fußweg-Kosten; nur innerhalb derselben bekannten Region definiert.
    pub fn walk_cost(&self, from: Waypoint<'_>, to: Waypoint<'_>) -> Option<f32> {
        if !from.shares_region_with(&to) {
            return None;
        }
        Some(self.travel_seconds(from.position, to.position))
    }

    /// Teleport-Kosten zum Ziel über einen Ätheryten.
    ///
    /// Fußweg vom Ätheryten zum Ziel + Gebühr in Sekunden + fixer Overhead.
    /// Unbekannte Gebühr liefert [`WORST_CASE_COST`].
    pub fn fast_travel_cost(&self, target: Vec2, anchor: &FastTravelAnchor) -> f32 {
        match anchor.fee {
            Fee::Known(gil) => {
                self.travel_seconds(anchor.position, target)
                    + gil as f32 * self.seconds_per_gil
                    + self.teleport_overhead_seconds
            }
            Fee::Unknown => WORST_CASE_COST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn anchor(fee: Fee) -> FastTravelAnchor {
        FastTravelAnchor::new("Aetheryte Plaza", "Ul'dah", Vec2::new(10.0, 10.0), fee)
    }

    fn model() -> CostModel {
        CostModel {
            walk_seconds_per_unit: 2.0,
            seconds_per_gil: 0.01,
            teleport_overhead_seconds: 15.0,
        }
    }

    #[test]
    fn walk_cost_scales_euclidean_distance() {
        let a = Waypoint {
            position: Vec2::new(0.0, 0.0),
            region: "Limsa",
        };
        let b = Waypoint {
            position: Vec2::new(3.0, 4.0),
            region: "Limsa",
        };

        assert_relative_eq!(model().walk_cost(a, b).expect("gleiche Region"), 10.0);
    }

    #[test]
    fn walk_cost_is_undefined_across_regions_and_for_unknown_regions() {
        let a = Waypoint {
            position: Vec2::ZERO,
            region: "Limsa",
        };
        let b = Waypoint {
            position: Vec2::ZERO,
            region: "Ul'dah",
        };
        let unknown = Waypoint {
            position: Vec2::ZERO,
            region: "",
        };

        assert!(model().walk_cost(a, b).is_none());
        assert!(model().walk_cost(unknown, unknown).is_none());
    }

    #[test]
    fn fast_travel_cost_sums_walk_fee_and_overhead() {
        let cost = model().fast_travel_cost(Vec2::new(13.0, 14.0), &anchor(Fee::Known(500)));
        // 5 Einheiten * 2s + 500 Gil * 0.01 + 15s
        assert_relative_eq!(cost, 10.0 + 5.0 + 15.0);
    }

    #[test]
    fn unknown_fee_is_worse_than_any_known_fee() {
        let unknown = model().fast_travel_cost(Vec2::ZERO, &anchor(Fee::Unknown));
        let expensive =
            model().fast_travel_cost(Vec2::new(900.0, 900.0), &anchor(Fee::Known(999_999)));

        assert_eq!(unknown, WORST_CASE_COST);
        assert!(expensive < unknown);
    }

    #[test]
    fn fee_display_is_readable() {
        assert_eq!(Fee::Known(250).to_string(), "250 gil");
        assert_eq!(Fee::Unknown.to_string(), "unknown fee");
        assert_eq!(Fee::Known(250).gil(), Some(250));
        assert!(!Fee::Unknown.is_known());
    }
}
