//! Zentrale Konfiguration für den Routen-Planer.
//!
//! `RouteOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ── Kosten ──────────────────────────────────────────────────────────

/// Sekunden pro Karten-Einheit Fußweg (beritten, ohne Flug).
pub const WALK_SECONDS_PER_UNIT: f32 = 5.0;
/// Wechselkurs Gil → Sekunden (1000 Gil ≈ 20 Sekunden Laufweg).
pub const SECONDS_PER_GIL: f32 = 0.02;
/// Fixer Zeitaufwand pro Teleport (Zauber + Ladebildschirm).
pub const TELEPORT_OVERHEAD_SECONDS: f32 = 15.0;

// ── Resolver ────────────────────────────────────────────────────────

/// Maximale Wartezeit auf eine Resolver-Antwort in Millisekunden.
pub const RESOLVER_TIMEOUT_MS: u64 = 500;

// ── Import / Sammeln ────────────────────────────────────────────────

/// Radius (Karten-Einheiten), innerhalb dessen ein Import als Duplikat gilt.
pub const DUPLICATE_RADIUS: f32 = 0.1;
/// Radius (Karten-Einheiten), innerhalb dessen die Spielerposition einen Marker einsammelt.
pub const COLLECT_RADIUS: f32 = 1.0;

/// Name der Optionen-Datei neben der Binary.
pub const CONFIG_FILE_NAME: &str = "ffxiv_treasure_route.toml";

/// Laufzeit-Optionen (persistierbar als TOML).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOptions {
    // ── Kosten ──────────────────────────────────────────────────
    /// Sekunden pro Karten-Einheit Fußweg
    pub walk_seconds_per_unit: f32,
    /// Wechselkurs Gil → Sekunden
    pub seconds_per_gil: f32,
    /// Fixer Zeitaufwand pro Teleport in Sekunden
    pub teleport_overhead_seconds: f32,

    // ── Resolver ─────────────────────────────────────────────────
    /// Timeout pro Resolver-Anfrage in Millisekunden
    pub resolver_timeout_ms: u64,
    /// Marker mit unbekannter Region ablehnen statt mit Warnung übernehmen
    #[serde(default)]
    pub reject_unknown_regions: bool,

    // ── Optimierer ───────────────────────────────────────────────
    /// Teleport auch innerhalb einer Region erlauben, wenn günstiger
    #[serde(default)]
    pub in_region_fast_travel: bool,
    /// Gesammelte Marker nicht mehr einplanen
    #[serde(default)]
    pub skip_collected: bool,

    // ── Import / Sammeln ─────────────────────────────────────────
    /// Duplikat-Radius beim Import (0 = keine Duplikat-Erkennung)
    #[serde(default = "default_duplicate_radius")]
    pub duplicate_radius: f32,
    /// Sammel-Radius um die Spielerposition
    #[serde(default = "default_collect_radius")]
    pub collect_radius: f32,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            walk_seconds_per_unit: WALK_SECONDS_PER_UNIT,
            seconds_per_gil: SECONDS_PER_GIL,
            teleport_overhead_seconds: TELEPORT_OVERHEAD_SECONDS,

            resolver_timeout_ms: RESOLVER_TIMEOUT_MS,
            reject_unknown_regions: false,

            in_region_fast_travel: false,
            skip_collected: false,

            duplicate_radius: DUPLICATE_RADIUS,
            collect_radius: COLLECT_RADIUS,
        }
    }
}

/// Serde-Default für `duplicate_radius` (Abwärtskompatibilität).
fn default_duplicate_radius() -> f32 {
    DUPLICATE_RADIUS
}

/// Serde-Default für `collect_radius` (Abwärtskompatibilität).
fn default_collect_radius() -> f32 {
    COLLECT_RADIUS
}

impl RouteOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("ffxiv-treasure-route"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(CONFIG_FILE_NAME)
    }

    /// Resolver-Timeout als `Duration`.
    pub fn resolver_timeout(&self) -> Duration {
        Duration::from_millis(self.resolver_timeout_ms)
    }
}
