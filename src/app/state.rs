//! Application State — zentrale Datenhaltung.

use super::events::AppEvent;
use super::CommandLog;
use ffxiv_treasure_engine::{
    AcceptAllRegions, FastTravelResolver, MarkerStore, RegionValidator, Route, RouteOptions,
    RouteStart, StaticResolver, TimeoutResolver,
};
use std::sync::Arc;

/// UI-nahe Anzeige-Werte, die der Host direkt darstellt.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Einzeilige Statusnachricht (z.B. Import-Ergebnis, Routen-Zusammenfassung)
    pub status_message: Option<String>,
    /// Zuletzt erzeugter Share-String
    pub last_share_export: Option<String>,
    /// Startpunkt der nächsten Optimierung (z.B. Spielerposition)
    pub start_position: Option<RouteStart>,
}

impl UiState {
    /// Erstellt einen leeren UI-State.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Marker-Store (kann mit Hintergrund-Threads geteilt werden)
    pub store: Arc<MarkerStore>,
    /// Zuletzt berechnete Route (None = nicht optimiert)
    pub route: Option<Arc<Route>>,
    /// Laufzeit-Optionen
    pub options: RouteOptions,
    /// UI-State
    pub ui: UiState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Teleport-Resolver für den Optimierer (ein Worker für alle Optimierungen)
    pub resolver: TimeoutResolver,
    events: Vec<AppEvent>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Erstellt einen leeren App-State ohne bekannte Ätheryten.
    ///
    /// Jede Region wird akzeptiert; Regionswechsel kosten "unbekannt".
    pub fn new() -> Self {
        Self::with_services(Arc::new(StaticResolver::new()), Arc::new(AcceptAllRegions))
    }

    /// Erstellt einen App-State mit injiziertem Resolver und Regions-Validator.
    pub fn with_services(
        resolver: Arc<dyn FastTravelResolver>,
        validator: Arc<dyn RegionValidator>,
    ) -> Self {
        let options = RouteOptions::default();
        Self {
            store: Arc::new(MarkerStore::new(validator)),
            route: None,
            resolver: TimeoutResolver::new(resolver, options.resolver_timeout()),
            options,
            ui: UiState::new(),
            command_log: CommandLog::new(),
            events: Vec::new(),
        }
    }

    /// Anzahl aktiver Marker (für UI-Anzeige)
    pub fn active_count(&self) -> usize {
        self.store.snapshot().active_len()
    }

    /// Anzahl Marker im Papierkorb (für UI-Anzeige)
    pub fn trash_count(&self) -> usize {
        self.store.snapshot().trash_len()
    }

    /// Reiht ein Ereignis für den Host ein.
    pub(crate) fn push_event(&mut self, event: AppEvent) {
        self.events.push(event);
    }

    /// Übergibt alle eingereihten Ereignisse an den Host.
    pub fn drain_events(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }
}
