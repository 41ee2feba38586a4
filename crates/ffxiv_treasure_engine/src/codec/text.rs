//! Text-Format für Marker-Zeilen, wie sie im Spiel-Chat geteilt werden.
//!
//! `"[<Besitzer>: ]<Region> (<x>, <y>)"`, z.B.
//! `"Thancred Waters: Limsa Lominsa Lower Decks (9.5, 11.2)"`.

use super::CodecError;
use crate::core::{Marker, MarkerDraft};
use regex::Regex;
use std::sync::LazyLock;

static LINE_PATTERN: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:(?P<owner>[^:()]+?)\s*:\s*)?(?P<region>[^()]*?)\s*\(\s*(?P<x>[^,()]+?)\s*,\s*(?P<y>[^,()]+?)\s*\)\s*$",
    )
});

/// Ergebnis eines mehrzeiligen Imports.
#[derive(Debug, Default)]
pub struct ParsedText {
    /// Erkannte Marker in Zeilen-Reihenfolge
    pub drafts: Vec<MarkerDraft>,
    /// Fehlerhafte Zeilen (1-basierte Zeilennummer)
    pub errors: Vec<(usize, CodecError)>,
}

fn parse_coordinate(raw: &str) -> Result<f32, CodecError> {
    match raw.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CodecError::InvalidNumber(raw.to_string())),
    }
}

/// Parst eine einzelne Marker-Zeile.
pub fn parse_marker_line(line: &str) -> Result<MarkerDraft, CodecError> {
    let pattern = LINE_PATTERN
        .as_ref()
        .map_err(|e| CodecError::Pattern(e.to_string()))?;
    let caps = pattern
        .captures(line)
        .ok_or_else(|| CodecError::InvalidLine(line.to_string()))?;

    let x = parse_coordinate(&caps["x"])?;
    let y = parse_coordinate(&caps["y"])?;
    let mut draft = MarkerDraft::new(caps["region"].trim(), x, y);
    if let Some(owner) = caps.name("owner") {
        draft = draft.with_owner(owner.as_str().trim());
    }
    Ok(draft)
}

/// Parst einen mehrzeiligen Text; leere Zeilen werden übersprungen.
pub fn parse_marker_text(text: &str) -> ParsedText {
    let mut parsed = ParsedText::default();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_marker_line(line) {
            Ok(draft) => parsed.drafts.push(draft),
            Err(e) => {
                log::debug!("Zeile {} übersprungen: {}", index + 1, e);
                parsed.errors.push((index + 1, e));
            }
        }
    }

    parsed
}

/// Formatiert einen Marker als Text-Zeile (kürzeste verlustfreie Zahlendarstellung).
pub fn format_marker_line(marker: &Marker) -> String {
    let position = marker.position();
    let coords = format!("({}, {})", position.x, position.y);
    let body = if marker.region().is_empty() {
        coords
    } else {
        format!("{} {}", marker.region(), coords)
    };

    match marker.owner_name() {
        Some(owner) => format!("{owner}: {body}"),
        None => body,
    }
}
