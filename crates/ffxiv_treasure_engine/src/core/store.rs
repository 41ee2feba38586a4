//! Marker-Store: einzige Quelle der Wahrheit für aktive Marker und Papierkorb.
//!
//! Beide Listen liegen als `Arc<IndexMap>` hinter einem `RwLock`. Mutationen
//! klonen per `Arc::make_mut` nur dann, wenn noch ein Snapshot die alte Liste
//! hält (Copy-on-Write). Ein Snapshot sieht deshalb nie einen halb
//! eingefügten Marker, auch wenn parallel ein Hintergrund-Thread importiert.

use super::marker::{Marker, MarkerDraft, MarkerId, MarkerStatus};
use super::resolver::{AcceptAllRegions, RegionValidator};
use super::route::Route;
use indexmap::IndexMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Fehler der Store-Operationen. Keine Operation verändert bei einem Fehler
/// den Zustand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Index außerhalb der jeweiligen Liste
    #[error("Ungültiger Index {index} (Liste hat {len} Einträge)")]
    InvalidIndex {
        /// Angefragter Index
        index: usize,
        /// Länge der Liste zum Zeitpunkt der Anfrage
        len: usize,
    },
    /// Region wurde vom `RegionValidator` abgelehnt
    #[error("Unbekannte Region: {0:?}")]
    InvalidRegion(String),
    /// Position liegt nicht im Karten-Raum
    #[error("Position liegt nicht im Karten-Raum")]
    WrongCoordinateSpace,
}

type MarkerList = IndexMap<MarkerId, Marker>;

#[derive(Debug, Default)]
struct MarkerLists {
    active: Arc<MarkerList>,
    trash: Arc<MarkerList>,
    next_id: MarkerId,
    added_total: u64,
    cleared_total: u64,
}

/// Unveränderliche Sicht auf beide Listen (O(1) per Arc-Clone).
#[derive(Debug, Clone, Default)]
pub struct MarkerSnapshot {
    active: Arc<MarkerList>,
    trash: Arc<MarkerList>,
}

impl MarkerSnapshot {
    /// Aktive Marker in Listen-Reihenfolge.
    pub fn active(&self) -> impl Iterator<Item = &Marker> {
        self.active.values()
    }

    /// Marker im Papierkorb, ältester Löschvorgang zuerst.
    pub fn trash(&self) -> impl Iterator<Item = &Marker> {
        self.trash.values()
    }

    /// Aktive Marker, die noch nicht gesammelt wurden.
    pub fn uncollected(&self) -> impl Iterator<Item = &Marker> {
        self.active.values().filter(|m| !m.is_collected())
    }

    /// Aktiver Marker an Listen-Position `index`.
    pub fn active_at(&self, index: usize) -> Option<&Marker> {
        self.active.get_index(index).map(|(_, m)| m)
    }

    /// Papierkorb-Eintrag an Position `index`.
    pub fn trash_at(&self, index: usize) -> Option<&Marker> {
        self.trash.get_index(index).map(|(_, m)| m)
    }

    /// Listen-Position eines aktiven Markers.
    pub fn active_index_of(&self, id: MarkerId) -> Option<usize> {
        self.active.get_index_of(&id)
    }

    /// Lebenszyklus-Status eines Markers, falls er noch existiert.
    pub fn status_of(&self, id: MarkerId) -> Option<MarkerStatus> {
        if let Some(marker) = self.active.get(&id) {
            return Some(if marker.is_collected() {
                MarkerStatus::Collected
            } else {
                MarkerStatus::Active
            });
        }
        self.trash.contains_key(&id).then_some(MarkerStatus::Deleted)
    }

    /// Anzahl aktiver Marker
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Anzahl Marker im Papierkorb
    pub fn trash_len(&self) -> usize {
        self.trash.len()
    }

    /// Gibt `true` zurück, wenn beide Listen leer sind.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.trash.is_empty()
    }
}

/// Zähler für Status-Anzeige und Konsistenzprüfung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    /// Aktive Marker (inkl. gesammelte)
    pub active: usize,
    /// Davon gesammelt
    pub collected: usize,
    /// Marker im Papierkorb
    pub trash: usize,
    /// Jemals hinzugefügte Marker
    pub added_total: u64,
    /// Durch Leeren endgültig entfernte Marker
    pub cleared_total: u64,
}

impl StoreStats {
    /// `|active| + |trash| == added − cleared`
    pub fn is_conserved(&self) -> bool {
        (self.active + self.trash) as u64 + self.cleared_total == self.added_total
    }
}

/// Thread-sicherer Marker-Store (`Send + Sync`).
pub struct MarkerStore {
    lists: RwLock<MarkerLists>,
    validator: Arc<dyn RegionValidator>,
}

impl Default for MarkerStore {
    fn default() -> Self {
        Self::new(Arc::new(AcceptAllRegions))
    }
}

impl std::fmt::Debug for MarkerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerStore")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl MarkerStore {
    /// Erstellt einen leeren Store mit injiziertem Regions-Validator.
    pub fn new(validator: Arc<dyn RegionValidator>) -> Self {
        Self {
            lists: RwLock::new(MarkerLists {
                next_id: 1,
                ..MarkerLists::default()
            }),
            validator,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, MarkerLists> {
        self.lists.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MarkerLists> {
        self.lists.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Kanonischer Name einer Region laut Validator.
    ///
    /// Unbekannte Regionen werden nur getrimmt, leere bleiben leer.
    pub fn canonical_region(&self, region: &str) -> String {
        let region = region.trim();
        if region.is_empty() {
            return String::new();
        }
        self.validator
            .canonical_region(region)
            .unwrap_or_else(|| region.to_string())
    }

    /// Hängt einen neuen Marker an die aktive Liste an.
    ///
    /// Leere Regionen sind erlaubt (unbekannte Region); jede andere Region
    /// muss vom Validator akzeptiert werden, sonst `InvalidRegion`. Gespeichert
    /// wird die kanonische Schreibweise des Validators.
    pub fn add(&self, mut draft: MarkerDraft) -> Result<MarkerId, StoreError> {
        if !draft.position.is_map_space() {
            return Err(StoreError::WrongCoordinateSpace);
        }
        let region = draft.region.trim().to_string();
        if !region.is_empty() {
            match self.validator.canonical_region(&region) {
                Some(canonical) => draft.region = canonical,
                None => return Err(StoreError::InvalidRegion(region)),
            }
        }
        Ok(self.insert(draft, false, false, None))
    }

    /// Übernimmt einen abgelehnten Marker trotzdem, mit Warnhinweis.
    pub fn add_with_warning(
        &self,
        draft: MarkerDraft,
        warning: impl Into<String>,
    ) -> Result<MarkerId, StoreError> {
        if !draft.position.is_map_space() {
            return Err(StoreError::WrongCoordinateSpace);
        }
        Ok(self.insert(draft, false, false, Some(warning.into())))
    }

    /// Fügt einen Marker aus einem geteilten Export mit seinem Status ein.
    ///
    /// Die Region wird nicht abgelehnt, aber auf die kanonische Schreibweise
    /// gebracht, falls der Validator sie kennt. `deleted` legt den Marker
    /// direkt in den Papierkorb; `collected` bleibt dabei erhalten.
    pub fn add_shared(
        &self,
        mut draft: MarkerDraft,
        collected: bool,
        deleted: bool,
    ) -> Result<MarkerId, StoreError> {
        if !draft.position.is_map_space() {
            return Err(StoreError::WrongCoordinateSpace);
        }
        draft.region = self.canonical_region(&draft.region);
        Ok(self.insert(draft, collected, deleted, None))
    }

    fn insert(
        &self,
        draft: MarkerDraft,
        collected: bool,
        deleted: bool,
        warning: Option<String>,
    ) -> MarkerId {
        let mut lists = self.write();
        let id = lists.next_id;
        lists.next_id += 1;
        lists.added_total += 1;

        let mut marker = Marker::from_draft(id, draft);
        marker.warning = warning;
        marker.collected = collected;

        if deleted {
            Arc::make_mut(&mut lists.trash).insert(id, marker);
        } else {
            Arc::make_mut(&mut lists.active).insert(id, marker);
        }

        log::debug!(
            "Marker {} hinzugefügt (gesammelt: {}, Papierkorb: {})",
            id,
            collected,
            deleted
        );
        id
    }

    /// Verschiebt den aktiven Marker an `index` ans Ende des Papierkorbs.
    pub fn delete(&self, index: usize) -> Result<MarkerId, StoreError> {
        let mut lists = self.write();
        let len = lists.active.len();
        if index >= len {
            return Err(StoreError::InvalidIndex { index, len });
        }

        let Some((id, marker)) = Arc::make_mut(&mut lists.active).shift_remove_index(index) else {
            return Err(StoreError::InvalidIndex { index, len });
        };
        Arc::make_mut(&mut lists.trash).insert(id, marker);
        Ok(id)
    }

    /// Verschiebt den Papierkorb-Eintrag an `trash_index` ans Ende der aktiven Liste.
    pub fn restore(&self, trash_index: usize) -> Result<MarkerId, StoreError> {
        let mut lists = self.write();
        let len = lists.trash.len();
        if trash_index >= len {
            return Err(StoreError::InvalidIndex {
                index: trash_index,
                len,
            });
        }

        let Some((id, marker)) = Arc::make_mut(&mut lists.trash).shift_remove_index(trash_index)
        else {
            return Err(StoreError::InvalidIndex {
                index: trash_index,
                len,
            });
        };
        Arc::make_mut(&mut lists.active).insert(id, marker);
        Ok(id)
    }

    /// Setzt den Gesammelt-Status. Gibt `true` zurück, wenn sich etwas geändert hat.
    pub fn toggle_collected(&self, index: usize, value: bool) -> Result<bool, StoreError> {
        let mut lists = self.write();
        let len = lists.active.len();
        match lists.active.get_index(index) {
            None => return Err(StoreError::InvalidIndex { index, len }),
            Some((_, marker)) if marker.collected == value => return Ok(false),
            Some(_) => {}
        }

        if let Some((_, marker)) = Arc::make_mut(&mut lists.active).get_index_mut(index) {
            marker.collected = value;
        }
        Ok(true)
    }

    /// Markiert einen aktiven Marker per ID als gesammelt.
    pub fn mark_collected_by_id(&self, id: MarkerId) -> bool {
        let mut lists = self.write();
        match lists.active.get(&id) {
            Some(marker) if !marker.collected => {}
            _ => return false,
        }

        if let Some(marker) = Arc::make_mut(&mut lists.active).get_mut(&id) {
            marker.collected = true;
        }
        true
    }

    /// Leert die aktive Liste. Der Papierkorb bleibt unberührt.
    pub fn clear_active(&self) -> usize {
        let mut lists = self.write();
        let removed = lists.active.len();
        lists.active = Arc::new(MarkerList::new());
        lists.cleared_total += removed as u64;
        removed
    }

    /// Leert den Papierkorb endgültig.
    pub fn clear_trash(&self) -> usize {
        let mut lists = self.write();
        let removed = lists.trash.len();
        lists.trash = Arc::new(MarkerList::new());
        lists.cleared_total += removed as u64;
        removed
    }

    /// O(1)-Snapshot beider Listen.
    pub fn snapshot(&self) -> MarkerSnapshot {
        let lists = self.read();
        MarkerSnapshot {
            active: Arc::clone(&lists.active),
            trash: Arc::clone(&lists.trash),
        }
    }

    /// Übernimmt Reihenfolge und Annotationen einer berechneten Route.
    ///
    /// Marker, die seit dem Snapshot gelöscht wurden, werden übersprungen;
    /// neu hinzugekommene Marker folgen ohne Annotation am Ende. Der
    /// Gesammelt-Status bleibt unverändert. Gibt die Anzahl der umsortierten
    /// Marker zurück.
    pub fn apply_route(&self, route: &Route) -> usize {
        let mut lists = self.write();
        let mut remaining = (*lists.active).clone();
        let mut ordered = MarkerList::with_capacity(remaining.len());

        for visit in route.visits() {
            if let Some(mut marker) = remaining.shift_remove(&visit.id()) {
                marker.annotation = visit.annotation.clone();
                ordered.insert(marker.id(), marker);
            }
        }
        let placed = ordered.len();

        for (id, mut marker) in remaining {
            marker.annotation = None;
            ordered.insert(id, marker);
        }

        lists.active = Arc::new(ordered);
        placed
    }

    /// Entfernt alle Optimierer-Annotationen. Gibt die Anzahl geänderter Marker zurück.
    pub fn clear_annotations(&self) -> usize {
        let mut lists = self.write();
        if lists.active.values().all(|m| m.annotation.is_none()) {
            return 0;
        }

        let mut cleared = 0;
        for marker in Arc::make_mut(&mut lists.active).values_mut() {
            if marker.annotation.take().is_some() {
                cleared += 1;
            }
        }
        cleared
    }

    /// Aktuelle Zähler.
    pub fn stats(&self) -> StoreStats {
        let lists = self.read();
        StoreStats {
            active: lists.active.len(),
            collected: lists.active.values().filter(|m| m.collected).count(),
            trash: lists.trash.len(),
            added_total: lists.added_total,
            cleared_total: lists.cleared_total,
        }
    }

    /// Prüft Disjunktheit der Listen und die Erhaltungs-Gleichung.
    pub fn check_invariants(&self) -> bool {
        let lists = self.read();
        let disjoint = lists.trash.keys().all(|id| !lists.active.contains_key(id));
        let ids_below_counter = lists
            .active
            .keys()
            .chain(lists.trash.keys())
            .all(|id| *id < lists.next_id);
        let conserved = (lists.active.len() + lists.trash.len()) as u64 + lists.cleared_total
            == lists.added_total;

        disjoint && ids_below_counter && conserved
    }
}
