//! Base64-Share-Format: kompletter Marker-Bestand inkl. Status als ein String.

use super::CodecError;
use crate::core::{Marker, MarkerDraft, MarkerSnapshot};
use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};

/// Aktuelle Version des Share-Formats.
pub const SHARE_FORMAT_VERSION: u32 = 1;

/// Ein Marker im Share-Format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedMarker {
    /// Karten-X
    pub x: f32,
    /// Karten-Y
    pub y: f32,
    /// Region (leer = unbekannt)
    #[serde(default)]
    pub region: String,
    /// Optionaler Besitzer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Gesammelt-Flag
    #[serde(default)]
    pub collected: bool,
    /// Im Papierkorb
    #[serde(default)]
    pub deleted: bool,
}

impl SharedMarker {
    fn from_marker(marker: &Marker, deleted: bool) -> Self {
        let position = marker.position();
        Self {
            x: position.x,
            y: position.y,
            region: marker.region().to_string(),
            owner: marker.owner_name().map(str::to_string),
            collected: marker.is_collected(),
            deleted,
        }
    }

    /// Import-Vorlage ohne Status.
    pub fn to_draft(&self) -> MarkerDraft {
        let draft = MarkerDraft::new(self.region.clone(), self.x, self.y);
        match &self.owner {
            Some(owner) => draft.with_owner(owner.clone()),
            None => draft,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SharePayload {
    version: u32,
    markers: Vec<SharedMarker>,
}

/// Exportiert aktive Marker und Papierkorb (in dieser Reihenfolge) als Base64-String.
pub fn export_share(snapshot: &MarkerSnapshot) -> Result<String, CodecError> {
    let markers = snapshot
        .active()
        .map(|m| SharedMarker::from_marker(m, false))
        .chain(snapshot.trash().map(|m| SharedMarker::from_marker(m, true)))
        .collect();

    let payload = SharePayload {
        version: SHARE_FORMAT_VERSION,
        markers,
    };
    let json = serde_json::to_vec(&payload)?;
    Ok(general_purpose::STANDARD.encode(json))
}

/// Dekodiert einen Share-String. Leerraum am Rand wird ignoriert.
pub fn import_share(encoded: &str) -> Result<Vec<SharedMarker>, CodecError> {
    let bytes = general_purpose::STANDARD.decode(encoded.trim())?;
    let payload: SharePayload = serde_json::from_slice(&bytes)?;

    if payload.version == 0 || payload.version > SHARE_FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion(payload.version));
    }
    Ok(payload.markers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MarkerStatus, MarkerStore};

    fn sample_store() -> MarkerStore {
        let store = MarkerStore::default();
        for draft in [
            MarkerDraft::new("Limsa", 9.5, 11.2).with_owner("Alisaie"),
            MarkerDraft::new("Ul'dah", 10.0, 11.0),
            MarkerDraft::new("", 21.3, 7.7),
        ] {
            store.add(draft).expect("Marker erwartet");
        }
        store.toggle_collected(0, true).expect("Index gültig");
        store.delete(1).expect("Index gültig");
        store
    }

    fn import_into_new_store(encoded: &str) -> MarkerStore {
        let store = MarkerStore::default();
        for shared in import_share(encoded).expect("Import erwartet") {
            store
                .add_shared(shared.to_draft(), shared.collected, shared.deleted)
                .expect("Marker erwartet");
        }
        store
    }

    #[test]
    fn export_import_export_is_stable() {
        let original = sample_store();
        let encoded = export_share(&original.snapshot()).expect("Export erwartet");

        let copy = import_into_new_store(&encoded);
        let again = export_share(&copy.snapshot()).expect("Export erwartet");

        assert_eq!(encoded, again);
        let snapshot = copy.snapshot();
        assert_eq!(snapshot.active_len(), 2);
        assert_eq!(snapshot.trash_len(), 1);
        assert_eq!(snapshot.status_of(1), Some(MarkerStatus::Collected));
        assert_eq!(snapshot.trash_at(0).map(|m| m.region()), Some("Ul'dah"));
        assert_eq!(snapshot.active_at(0).and_then(|m| m.owner_name()), Some("Alisaie"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let encoded = export_share(&sample_store().snapshot()).expect("Export erwartet");
        let padded = format!("  {encoded}\n");

        assert_eq!(import_share(&padded).expect("Import erwartet").len(), 3);
    }

    #[test]
    fn rejects_garbage_and_unknown_versions() {
        assert!(matches!(import_share("%%%"), Err(CodecError::Base64(_))));

        let not_json = general_purpose::STANDARD.encode("hallo");
        assert!(matches!(import_share(&not_json), Err(CodecError::Json(_))));

        let future = general_purpose::STANDARD.encode(r#"{"version":99,"markers":[]}"#);
        assert!(matches!(
            import_share(&future),
            Err(CodecError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let minimal = general_purpose::STANDARD.encode(r#"{"version":1,"markers":[{"x":1.5,"y":2}]}"#);
        let markers = import_share(&minimal).expect("Import erwartet");

        assert_eq!(markers.len(), 1);
        assert!(markers[0].region.is_empty());
        assert!(!markers[0].collected && !markers[0].deleted);
        assert_eq!(markers[0].owner, None);
    }
}
