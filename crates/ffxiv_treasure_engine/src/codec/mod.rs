//! Austauschformate: Chat-Text-Zeilen und Base64-Share-Strings.

mod share;
mod text;

pub use share::{export_share, import_share, SharedMarker, SHARE_FORMAT_VERSION};
pub use text::{format_marker_line, parse_marker_line, parse_marker_text, ParsedText};

/// Fehler beim Lesen der Austauschformate.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Zeile entspricht nicht `"[<Besitzer>: ]<Region> (<x>, <y>)"`
    #[error("Zeile nicht erkannt: {0:?}")]
    InvalidLine(String),
    /// Koordinate ist keine endliche Zahl
    #[error("Ungültige Koordinate: {0:?}")]
    InvalidNumber(String),
    /// Internes Zeilen-Pattern konnte nicht kompiliert werden
    #[error("Zeilen-Pattern ungültig: {0}")]
    Pattern(String),
    /// Share-String ist kein gültiges Base64
    #[error("Share-String ist kein gültiges Base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Share-Inhalt ist kein gültiges JSON
    #[error("Share-Inhalt fehlerhaft: {0}")]
    Json(#[from] serde_json::Error),
    /// Share-Format-Version wird nicht unterstützt
    #[error("Share-Format-Version {0} wird nicht unterstützt")]
    UnsupportedVersion(u32),
}
