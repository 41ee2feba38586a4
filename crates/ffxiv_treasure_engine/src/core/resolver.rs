//! Schnittstellen zu externen Kollaborateuren: Teleport-Auflösung und
//! Regions-Validierung, plus einfache Implementierungen.

use super::cost::Fee;
use glam::Vec2;
use std::collections::HashMap;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Ein benannter Teleport-Punkt (Ätheryt) in einer Region.
#[derive(Debug, Clone, PartialEq)]
pub struct FastTravelAnchor {
    /// Anzeigename des Ätheryten
    pub name: String,
    /// Region, in der der Ätheryt liegt
    pub region: String,
    /// Karten-Position der Ankunft
    pub position: Vec2,
    /// Teleport-Gebühr
    pub fee: Fee,
}

impl FastTravelAnchor {
    /// Erstellt einen neuen Anker.
    pub fn new(name: impl Into<String>, region: impl Into<String>, position: Vec2, fee: Fee) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            position,
            fee,
        }
    }
}

/// Fehler bei der Teleport-Auflösung. Führt nie zum Abbruch der Optimierung,
/// sondern zu "Kosten unbekannt".
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    /// Dienst nicht erreichbar oder fehlgeschlagen
    #[error("Teleport-Auflösung nicht verfügbar: {0}")]
    Unavailable(String),
    /// Zeitlimit überschritten
    #[error("Teleport-Auflösung für '{region}' nach {timeout:?} abgebrochen")]
    Timeout {
        /// Angefragte Region
        region: String,
        /// Verwendetes Zeitlimit
        timeout: Duration,
    },
}

/// Liefert die bekannten Teleport-Anker einer Region.
///
/// Eine leere Liste bedeutet "keine Anker bekannt". Die Gebühr eines Ankers
/// darf [`Fee::Unknown`] sein.
pub trait FastTravelResolver: Send + Sync {
    /// Löst die Anker einer Region auf.
    fn resolve(&self, region: &str) -> Result<Vec<FastTravelAnchor>, ResolveError>;
}

/// Prüft Regionsnamen beim Import.
///
/// Der Store speichert den kanonischen Namen, damit spätere Vergleiche
/// (Fußweg, Duplikate, Einsammeln) nur eine Schreibweise sehen.
pub trait RegionValidator: Send + Sync {
    /// Liefert den kanonischen Namen einer bekannten Region, sonst `None`.
    fn canonical_region(&self, region: &str) -> Option<String>;

    /// Gibt `true` zurück, wenn die Region bekannt ist.
    fn is_known_region(&self, region: &str) -> bool {
        self.canonical_region(region).is_some()
    }
}

/// Validator ohne Einschränkung (jede Region gilt als bekannt).
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllRegions;

impl RegionValidator for AcceptAllRegions {
    fn canonical_region(&self, region: &str) -> Option<String> {
        Some(region.trim().to_string())
    }
}

/// In-Memory-Resolver mit fest hinterlegten Ankern.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    anchors: HashMap<String, Vec<FastTravelAnchor>>,
}

impl StaticResolver {
    /// Erstellt einen leeren Resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert einen Anker in seiner Region.
    pub fn with_anchor(mut self, anchor: FastTravelAnchor) -> Self {
        self.anchors
            .entry(anchor.region.clone())
            .or_default()
            .push(anchor);
        self
    }

    /// Registriert eine Region ohne bekannte Anker (nur für die Validierung).
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.anchors.entry(region.into()).or_default();
        self
    }
}

impl FastTravelResolver for StaticResolver {
    fn resolve(&self, region: &str) -> Result<Vec<FastTravelAnchor>, ResolveError> {
        Ok(self.anchors.get(region).cloned().unwrap_or_default())
    }
}

impl RegionValidator for StaticResolver {
    fn canonical_region(&self, region: &str) -> Option<String> {
        let region = region.trim();
        self.anchors
            .contains_key(region)
            .then(|| region.to_string())
    }
}

type ResolveResult = Result<Vec<FastTravelAnchor>, ResolveError>;
type ResolveRequest = (String, mpsc::Sender<ResolveResult>);

/// Begrenzt die Laufzeit eines (evtl. blockierenden) Resolvers.
///
/// Alle Anfragen laufen nacheinander auf einem gemeinsamen Worker-Thread; das
/// Ergebnis wird per Channel mit Zeitlimit abgeholt. Nach einem Timeout wird
/// das späte Ergebnis verworfen, es gibt keine Wiederholung.
///
/// Ein Resolver, der nie zurückkehrt, blockiert genau diesen einen Thread.
/// Folgeanfragen stauen sich dahinter und laufen in ihr eigenes Zeitlimit.
/// Der Worker endet, sobald alle Klone verworfen sind und die laufende
/// Anfrage zurückkehrt.
#[derive(Clone)]
pub struct TimeoutResolver {
    requests: Option<mpsc::Sender<ResolveRequest>>,
    timeout: Duration,
}

impl TimeoutResolver {
    /// Umhüllt einen Resolver mit dem angegebenen Zeitlimit und startet den Worker.
    pub fn new(inner: Arc<dyn FastTravelResolver>, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<ResolveRequest>();

        let spawned = thread::Builder::new()
            .name("fast-travel-resolve".into())
            .spawn(move || {
                for (region, reply) in rx {
                    // Anfragender ist nach einem Timeout evtl. schon weg
                    let _ = reply.send(inner.resolve(&region));
                }
                log::debug!("Resolver-Worker beendet");
            });

        let requests = match spawned {
            Ok(_) => Some(tx),
            Err(e) => {
                log::error!("Resolver-Worker konnte nicht gestartet werden: {}", e);
                None
            }
        };

        Self { requests, timeout }
    }

    /// Gleicher Worker, anderes Zeitlimit.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            requests: self.requests.clone(),
            timeout,
        }
    }

    /// Verwendetes Zeitlimit
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl FastTravelResolver for TimeoutResolver {
    fn resolve(&self, region: &str) -> Result<Vec<FastTravelAnchor>, ResolveError> {
        let Some(requests) = &self.requests else {
            return Err(ResolveError::Unavailable(
                "Resolver-Worker nicht verfügbar".to_string(),
            ));
        };

        let (reply_tx, reply_rx) = mpsc::channel();
        requests
            .send((region.to_string(), reply_tx))
            .map_err(|_| ResolveError::Unavailable("Resolver-Worker beendet".to_string()))?;

        match reply_rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(ResolveError::Timeout {
                region: region.to_string(),
                timeout: self.timeout,
            }),
            Err(RecvTimeoutError::Disconnected) => Err(ResolveError::Unavailable(
                "Resolver-Worker ohne Ergebnis beendet".to_string(),
            )),
        }
    }
}
