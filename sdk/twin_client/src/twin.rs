use serde::{Deserialize, Serialize};

/// Effectiveness above this gets the `"Minimal"` side-effect label.
pub const MINIMAL_SIDE_EFFECT_THRESHOLD: u8 = 85;

/// Inclusive range the fabricated effectiveness value is drawn from.
pub const EFFECTIVENESS_MIN: u8 = 70;
pub const EFFECTIVENESS_MAX: u8 = 95;

/// Denormalized twin document, persisted as one JSON blob under `twin_<id>`.
///
/// Bundles the patient identity, an opaque encrypted payload, and the full
/// append-only treatment history. Every append rewrites the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalTwin {
    pub id: String,
    pub patient_id: String,
    pub name: String,
    /// Opaque payload supplied by the caller; the client never inspects it.
    pub encrypted_profile: String,
    /// Unix seconds; the list view sorts by this, descending.
    pub created_at: i64,
    #[serde(default)]
    pub treatment_history: Vec<TreatmentEntry>,
}

/// One treatment record embedded in a twin document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentEntry {
    pub treatment: String,
    pub effectiveness: u8,
    pub side_effects: String,
    pub recorded_at: i64,
}

/// `"Minimal"` iff effectiveness > 85, else `"Moderate"`.
pub fn side_effect_label(effectiveness: u8) -> &'static str {
    if effectiveness > MINIMAL_SIDE_EFFECT_THRESHOLD {
        "Minimal"
    } else {
        "Moderate"
    }
}
