//! Koordinatenräume und Umrechnung Welt → Karte.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Koordinatenraum einer Position.
///
/// Karten- und Weltkoordinaten sind ohne Umrechnung nicht vergleichbar.
/// Der Store und der Optimierer arbeiten ausschließlich im `MapSpace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoordinateSpace {
    /// Karten-Koordinaten wie im Spiel-Chat angezeigt (ca. 1.0 bis 42.0)
    #[default]
    MapSpace,
    /// Rohe Welt-Koordinaten (Yalm, X/Z-Ebene)
    WorldSpace,
}

/// Position in einem benannten Koordinatenraum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X/Y-Wert
    pub point: Vec2,
    /// Raum, in dem `point` gemessen ist
    pub space: CoordinateSpace,
}

impl Position {
    /// Erstellt eine Karten-Position.
    pub fn map(x: f32, y: f32) -> Self {
        Self {
            point: Vec2::new(x, y),
            space: CoordinateSpace::MapSpace,
        }
    }

    /// Erstellt eine Welt-Position (X/Z-Ebene).
    pub fn world(x: f32, z: f32) -> Self {
        Self {
            point: Vec2::new(x, z),
            space: CoordinateSpace::WorldSpace,
        }
    }

    /// Gibt `true` zurück, wenn die Position im Karten-Raum liegt.
    pub fn is_map_space(&self) -> bool {
        self.space == CoordinateSpace::MapSpace
    }
}

/// Rechnet eine einzelne Welt-Achse in Karten-Koordinaten um.
///
/// `size_factor` ist der Karten-Skalierungsfaktor (100 = Standard-Feldgebiet,
/// 200 = Stadtkarte), `offset` der Achsen-Offset der Karte.
fn world_axis_to_map(value: f32, size_factor: f32, offset: f32) -> f32 {
    0.02 * offset + 2048.0 / size_factor + 0.02 * value + 1.0
}

/// Wandelt eine Welt-Position in eine Karten-Position um.
///
/// Bereits im Karten-Raum liegende Positionen werden unverändert zurückgegeben.
/// Ein `size_factor` von 0 ist ungültig und liefert `None`.
pub fn world_to_map(position: Position, size_factor: f32, offset: Vec2) -> Option<Position> {
    if position.is_map_space() {
        return Some(position);
    }
    if size_factor <= 0.0 {
        return None;
    }

    Some(Position::map(
        world_axis_to_map(position.point.x, size_factor, offset.x),
        world_axis_to_map(position.point.y, size_factor, offset.y),
    ))
}
