use soroban_sdk::{contracttype, Vec};

/// What a pending oracle request is waiting to resolve.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RequestKind {
    /// Request to decrypt treatment inputs and run the outcome simulation.
    /// `domain_id` is a treatment ID.
    Simulation,
    /// Request to decrypt a stored simulation result.
    /// `domain_id` is a simulation ID.
    Reveal,
}

/// Correlation entry for an in-flight oracle request. Written when the
/// request is submitted and consumed exactly once by the matching callback.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingRequest {
    pub request_id: u64,
    pub kind: RequestKind,
    pub domain_id: u64,
    pub requested_at: u64,
}

/// Registered patient. Immutable once created; there is no update or delete
/// path for any record type.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientRecord {
    pub id: u64,
    pub genomics: u64,
    pub biomarkers: u64,
    pub history: u64,
    pub registered_at: u64,
}

/// Prescribed treatment, referencing an existing patient.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreatmentRecord {
    pub id: u64,
    pub patient_id: u64,
    pub drug_combination: u64,
    pub dosage: u64,
    pub schedule: u64,
    pub prescribed_at: u64,
}

/// Outcome of a completed simulation callback.
///
/// `side_effect_score` is stored as a zero placeholder at creation; the
/// per-element side-effect values live in the matching [`DecryptedResult`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimulationRecord {
    pub id: u64,
    pub treatment_id: u64,
    pub outcome_score: u64,
    pub side_effect_score: u64,
    pub simulated_at: u64,
}

/// Decrypted view of a simulation result, keyed by simulation ID.
///
/// Populated at simulation time with `is_revealed = false`; the reveal
/// callback overwrites it and flips the flag exactly once.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecryptedResult {
    pub simulation_id: u64,
    pub efficacy: u64,
    pub side_effects: Vec<u64>,
    pub is_revealed: bool,
}
