//! Routen-Optimierer: Greedy-Nearest-Neighbour mit Teleport-Bewertung pro Schritt.
//!
//! Pro Schritt wird für jeden offenen Marker ein Kandidaten-Preis berechnet
//! (Fußweg in derselben Region, sonst bester Teleport in die Zielregion).
//! Der günstigste Kandidat gewinnt, bei Gleichstand der zuerst importierte.
//! Der Optimierer liest nur einen Snapshot und verändert den Store nie.

use super::cost::{CostModel, Fee, Waypoint, WORST_CASE_COST};
use super::marker::Marker;
use super::resolver::{FastTravelAnchor, FastTravelResolver};
use super::route::{FastTravelLeg, Route, RouteStep};
use glam::Vec2;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Startpunkt einer Optimierung (z.B. aktuelle Spielerposition im Karten-Raum).
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStart {
    /// Karten-Position
    pub position: Vec2,
    /// Region (leer = unbekannt)
    pub region: String,
}

impl RouteStart {
    /// Erstellt einen Startpunkt.
    pub fn new(region: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            region: region.into(),
        }
    }

    /// Startet an der Position eines Markers.
    pub fn at_marker(marker: &Marker) -> Self {
        Self {
            position: marker.position(),
            region: marker.region().to_string(),
        }
    }
}

/// Offener Marker mit seiner vorab berechneten besten Teleport-Etappe.
///
/// Die Teleport-Kosten hängen nur vom Ziel ab, nicht von der aktuellen
/// Position, und werden deshalb einmal pro Optimierung berechnet.
struct Pending<'m> {
    marker: &'m Marker,
    teleport: FastTravelLeg,
}

struct Candidate {
    cost: f32,
    use_teleport: bool,
}

/// Ordnet aktive Marker zu einer günstigen Besuchsreihenfolge.
pub struct RouteOptimizer<'r> {
    cost_model: CostModel,
    resolver: &'r dyn FastTravelResolver,
    in_region_fast_travel: bool,
}

impl<'r> RouteOptimizer<'r> {
    /// Erstellt einen Optimierer mit Kostenmodell und Teleport-Resolver.
    pub fn new(cost_model: CostModel, resolver: &'r dyn FastTravelResolver) -> Self {
        Self {
            cost_model,
            resolver,
            in_region_fast_travel: false,
        }
    }

    /// Erlaubt Teleports auch innerhalb derselben Region, wenn sie günstiger
    /// als der Fußweg sind.
    pub fn with_in_region_fast_travel(mut self, enabled: bool) -> Self {
        self.in_region_fast_travel = enabled;
        self
    }

    /// Berechnet die Route über alle übergebenen Marker.
    ///
    /// Ohne `start` beginnt die Route beim zuerst importierten Marker.
    /// Marker ohne erreichbare Region werden mit unbekannten Kosten trotzdem
    /// eingeplant.
    pub fn optimize<'m>(
        &self,
        markers: impl IntoIterator<Item = &'m Marker>,
        start: Option<&RouteStart>,
    ) -> Route {
        let mut markers: Vec<&Marker> = markers.into_iter().collect();
        markers.sort_by_key(|m| m.id());

        match markers.as_slice() {
            [] => return Route::empty(),
            [single] => {
                let visit = RouteStep::Visit(single.with_annotation(None));
                return Route::from_steps(vec![visit], 0.0);
            }
            _ => {}
        }

        let anchors = self.resolve_regions(&markers);
        let mut pending: Vec<Pending<'_>> = markers
            .into_iter()
            .map(|marker| Pending {
                marker,
                teleport: self.best_teleport(marker, &anchors),
            })
            .collect();

        let mut steps = Vec::with_capacity(pending.len() * 2);
        let mut known_cost = 0.0f32;

        let (mut position, mut region) = match start {
            Some(start) => (start.position, start.region.clone()),
            None => {
                // Ohne Startpunkt steht man bereits am ersten Marker
                let first = pending.remove(0);
                let position = first.marker.position();
                let region = first.marker.region().to_string();
                steps.push(RouteStep::Visit(first.marker.with_annotation(None)));
                (position, region)
            }
        };

        while !pending.is_empty() {
            let cursor = Waypoint {
                position,
                region: &region,
            };

            let mut best: Option<(usize, Candidate)> = None;
            for (index, entry) in pending.iter().enumerate() {
                let candidate = self.candidate(cursor, entry);
                let better = best.as_ref().is_none_or(|(_, current)| {
                    candidate.cost.total_cmp(&current.cost) == Ordering::Less
                });
                if better {
                    best = Some((index, candidate));
                }
            }

            let Some((index, candidate)) = best else {
                break;
            };
            // `remove` erhält die Import-Reihenfolge der übrigen Marker
            let chosen = pending.remove(index);

            if candidate.cost.is_finite() {
                known_cost += candidate.cost;
            }

            if candidate.use_teleport {
                log::debug!(
                    "Marker {}: {} ({:.1}s)",
                    chosen.marker.id(),
                    chosen.teleport.describe(),
                    candidate.cost
                );
                let annotation = chosen.teleport.describe();
                steps.push(RouteStep::FastTravel(chosen.teleport));
                steps.push(RouteStep::Visit(
                    chosen.marker.with_annotation(Some(annotation)),
                ));
            } else {
                log::debug!(
                    "Marker {}: zu Fuß ({:.1}s)",
                    chosen.marker.id(),
                    candidate.cost
                );
                steps.push(RouteStep::Visit(chosen.marker.with_annotation(None)));
            }

            position = chosen.marker.position();
            region = chosen.marker.region().to_string();
        }

        Route::from_steps(steps, known_cost)
    }

    /// Kandidaten-Preis eines offenen Markers von der aktuellen Position aus.
    fn candidate(&self, cursor: Waypoint<'_>, entry: &Pending<'_>) -> Candidate {
        match self.cost_model.walk_cost(cursor, entry.marker.into()) {
            Some(walk) if self.in_region_fast_travel && entry.teleport.cost < walk => Candidate {
                cost: entry.teleport.cost,
                use_teleport: true,
            },
            Some(walk) => Candidate {
                cost: walk,
                use_teleport: false,
            },
            None => Candidate {
                cost: entry.teleport.cost,
                use_teleport: true,
            },
        }
    }

    /// Günstigster Anker der Zielregion; gleiche Kosten → Name, dann Resolver-Reihenfolge.
    fn best_teleport(
        &self,
        marker: &Marker,
        anchors: &HashMap<String, Vec<FastTravelAnchor>>,
    ) -> FastTravelLeg {
        let best = anchors
            .get(marker.region())
            .into_iter()
            .flatten()
            .map(|anchor| {
                (
                    self.cost_model.fast_travel_cost(marker.position(), anchor),
                    anchor,
                )
            })
            .min_by(|(cost_a, a), (cost_b, b)| {
                cost_a.total_cmp(cost_b).then_with(|| a.name.cmp(&b.name))
            });

        match best {
            Some((cost, anchor)) => FastTravelLeg {
                anchor_name: Some(anchor.name.clone()),
                region: marker.region().to_string(),
                fee: anchor.fee,
                cost,
            },
            None => FastTravelLeg {
                anchor_name: None,
                region: marker.region().to_string(),
                fee: Fee::Unknown,
                cost: WORST_CASE_COST,
            },
        }
    }

    /// Löst jede bekannte Region genau einmal auf. Fehler gelten als "keine Anker".
    fn resolve_regions(&self, markers: &[&Marker]) -> HashMap<String, Vec<FastTravelAnchor>> {
        let mut anchors = HashMap::new();

        for marker in markers {
            let region = marker.region();
            if marker.has_unknown_region() || anchors.contains_key(region) {
                continue;
            }

            let resolved = match self.resolver.resolve(region) {
                Ok(list) => list,
                Err(e) => {
                    log::warn!("{} (Kosten gelten als unbekannt)", e);
                    Vec::new()
                }
            };
            anchors.insert(region.to_string(), resolved);
        }

        anchors
    }
}
