//! Spatial-Index (KD-Tree) über Marker-Positionen.
//!
//! Karten-Koordinaten wiederholen sich in jeder Region, deshalb filtern die
//! regionsbezogenen Abfragen die Treffer nach dem KD-Tree-Vorfilter.

use std::collections::HashMap;

use glam::Vec2;
use kiddo::{KdTree, SquaredEuclidean};

use super::marker::{Marker, MarkerId};

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// ID des gefundenen Markers
    pub marker_id: MarkerId,
    /// Euklidische Distanz zum Suchpunkt (Karten-Einheiten)
    pub distance: f32,
}

/// Read-only Spatial-Index über einer Marker-Liste.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    marker_ids: Vec<MarkerId>,
    regions: HashMap<MarkerId, String>,
}

impl SpatialIndex {
    /// Baut einen neuen Index aus den übergebenen Markern.
    pub fn from_markers<'a>(markers: impl IntoIterator<Item = &'a Marker>) -> Self {
        let mut marker_ids = Vec::new();
        let mut entries: Vec<[f64; 2]> = Vec::new();
        let mut regions = HashMap::new();

        for marker in markers {
            let position = marker.position();
            marker_ids.push(marker.id());
            entries.push([position.x as f64, position.y as f64]);
            regions.insert(marker.id(), marker.region().to_string());
        }

        let tree: KdTree<f64, 2> = (&entries).into();

        Self {
            tree,
            marker_ids,
            regions,
        }
    }

    /// Gibt die Anzahl indexierter Marker zurück.
    pub fn len(&self) -> usize {
        self.marker_ids.len()
    }

    /// Gibt `true` zurück, wenn keine Marker im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.marker_ids.is_empty()
    }

    /// Findet den nächsten Marker zur Position, unabhängig von der Region.
    pub fn nearest(&self, query: Vec2) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x as f64, query.y as f64]);
        let marker_id = *self.marker_ids.get(result.item as usize)?;

        Some(SpatialMatch {
            marker_id,
            distance: (result.distance as f32).sqrt(),
        })
    }

    /// Findet alle Marker innerhalb eines Radius, aufsteigend nach Distanz.
    pub fn within_radius(&self, query: Vec2, radius: f32) -> Vec<SpatialMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(&[query.x as f64, query.y as f64], (radius * radius) as f64)
            .into_iter()
            .filter_map(|entry| {
                let marker_id = *self.marker_ids.get(entry.item as usize)?;
                Some(SpatialMatch {
                    marker_id,
                    distance: (entry.distance as f32).sqrt(),
                })
            })
            .collect::<Vec<_>>();

        // Gleiche Distanz → kleinere ID zuerst, damit Treffer deterministisch sind
        results.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.marker_id.cmp(&b.marker_id))
        });
        results
    }

    /// Nächster Marker derselben (bekannten) Region innerhalb des Radius.
    pub fn nearest_in_region(&self, query: Vec2, region: &str, radius: f32) -> Option<SpatialMatch> {
        if region.is_empty() {
            return None;
        }

        self.within_radius(query, radius)
            .into_iter()
            .find(|hit| self.regions.get(&hit.marker_id).is_some_and(|r| r == region))
    }
}
