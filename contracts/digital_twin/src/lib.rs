#![no_std]

pub mod events;
pub mod scoring;
pub mod types;

#[cfg(test)]
mod test;

use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, Address, Bytes, Env, Symbol, Vec,
};

pub use types::{
    DecryptedResult, PatientRecord, PendingRequest, RequestKind, SimulationRecord, TreatmentRecord,
};

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const ORACLE: Symbol = symbol_short!("ORACLE");
const INITIALIZED: Symbol = symbol_short!("INIT");

/// Sequence counters (instance storage)
const PATIENT_COUNTER: Symbol = symbol_short!("PAT_CTR");
const TREATMENT_COUNTER: Symbol = symbol_short!("TRT_CTR");
const SIMULATION_COUNTER: Symbol = symbol_short!("SIM_CTR");
const REQUEST_COUNTER: Symbol = symbol_short!("REQ_CTR");

/// Persistent record keys
const PATIENT_KEY: Symbol = symbol_short!("PATIENT");
const TREATMENT_KEY: Symbol = symbol_short!("TREATMT");
const SIMULATION_KEY: Symbol = symbol_short!("SIM");
const RESULT_KEY: Symbol = symbol_short!("RESULT");
const PENDING_KEY: Symbol = symbol_short!("PENDING");

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TwinError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    PatientNotFound = 4,
    TreatmentNotFound = 5,
    SimulationNotFound = 6,
    ResultNotFound = 7,
    RequestNotFound = 8,
    AlreadyRevealed = 9,
    InvalidInput = 10,
    InvalidProof = 11,
}

#[contract]
pub struct DigitalTwinContract;

#[contractimpl]
impl DigitalTwinContract {
    // ── Initialization ───────────────────────────────────────────────────────

    /// Initialize the contract with an admin and the oracle address allowed
    /// to invoke the decryption callbacks.
    pub fn initialize(env: Env, admin: Address, oracle: Address) -> Result<(), TwinError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(TwinError::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&ORACLE, &oracle);
        env.storage().instance().set(&INITIALIZED, &true);
        common::extend_instance(&env);

        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, TwinError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(TwinError::NotInitialized)
    }

    pub fn get_oracle(env: Env) -> Result<Address, TwinError> {
        env.storage()
            .instance()
            .get(&ORACLE)
            .ok_or(TwinError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Record store ─────────────────────────────────────────────────────────

    /// Register a new patient. IDs are sequential and 1-based.
    pub fn register_patient(
        env: Env,
        caller: Address,
        genomics: u64,
        biomarkers: u64,
        history: u64,
    ) -> Result<u64, TwinError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let patient_id = Self::next_id(&env, &PATIENT_COUNTER);

        let record = PatientRecord {
            id: patient_id,
            genomics,
            biomarkers,
            history,
            registered_at: env.ledger().timestamp(),
        };

        let key = (PATIENT_KEY, patient_id);
        env.storage().persistent().set(&key, &record);
        common::extend_persistent(&env, &key);

        events::publish_patient_registered(&env, patient_id);

        Ok(patient_id)
    }

    /// Prescribe a treatment for an existing patient. An unknown
    /// `patient_id` is rejected rather than stored as a dangling reference.
    pub fn prescribe_treatment(
        env: Env,
        caller: Address,
        patient_id: u64,
        drug_combination: u64,
        dosage: u64,
        schedule: u64,
    ) -> Result<u64, TwinError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let patient_key = (PATIENT_KEY, patient_id);
        if !env.storage().persistent().has(&patient_key) {
            return Err(TwinError::PatientNotFound);
        }

        let treatment_id = Self::next_id(&env, &TREATMENT_COUNTER);

        let record = TreatmentRecord {
            id: treatment_id,
            patient_id,
            drug_combination,
            dosage,
            schedule,
            prescribed_at: env.ledger().timestamp(),
        };

        let key = (TREATMENT_KEY, treatment_id);
        env.storage().persistent().set(&key, &record);
        common::extend_persistent(&env, &key);

        events::publish_treatment_prescribed(&env, treatment_id, patient_id);

        Ok(treatment_id)
    }

    pub fn get_patient(env: Env, patient_id: u64) -> Result<PatientRecord, TwinError> {
        let key = (PATIENT_KEY, patient_id);
        env.storage()
            .persistent()
            .get(&key)
            .ok_or(TwinError::PatientNotFound)
    }

    pub fn get_treatment(env: Env, treatment_id: u64) -> Result<TreatmentRecord, TwinError> {
        let key = (TREATMENT_KEY, treatment_id);
        env.storage()
            .persistent()
            .get(&key)
            .ok_or(TwinError::TreatmentNotFound)
    }

    pub fn get_simulation(env: Env, simulation_id: u64) -> Result<SimulationRecord, TwinError> {
        let key = (SIMULATION_KEY, simulation_id);
        env.storage()
            .persistent()
            .get(&key)
            .ok_or(TwinError::SimulationNotFound)
    }

    pub fn get_decrypted_result(
        env: Env,
        simulation_id: u64,
    ) -> Result<DecryptedResult, TwinError> {
        let key = (RESULT_KEY, simulation_id);
        env.storage()
            .persistent()
            .get(&key)
            .ok_or(TwinError::ResultNotFound)
    }

    /// Inspect an in-flight oracle request by its request ID.
    pub fn get_pending_request(env: Env, request_id: u64) -> Result<PendingRequest, TwinError> {
        let key = (PENDING_KEY, request_id);
        env.storage()
            .persistent()
            .get(&key)
            .ok_or(TwinError::RequestNotFound)
    }

    pub fn patient_count(env: Env) -> u64 {
        env.storage().instance().get(&PATIENT_COUNTER).unwrap_or(0)
    }

    pub fn treatment_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&TREATMENT_COUNTER)
            .unwrap_or(0)
    }

    pub fn simulation_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&SIMULATION_COUNTER)
            .unwrap_or(0)
    }

    // ── Simulation request/callback pair ─────────────────────────────────────

    /// Phase 1: forward a treatment's inputs to the decryption oracle.
    /// Records a correlation entry so the callback can find the treatment.
    pub fn request_simulation(
        env: Env,
        caller: Address,
        treatment_id: u64,
    ) -> Result<u64, TwinError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let treatment_key = (TREATMENT_KEY, treatment_id);
        if !env.storage().persistent().has(&treatment_key) {
            return Err(TwinError::TreatmentNotFound);
        }

        let request_id = Self::store_pending(&env, RequestKind::Simulation, treatment_id);

        events::publish_simulation_requested(&env, request_id, treatment_id);

        Ok(request_id)
    }

    /// Phase 2: oracle callback with the decrypted drug/dosage arrays.
    ///
    /// Consumes the correlation entry, computes the outcome score and the
    /// per-element side-effect values, and stores both the simulation record
    /// and its not-yet-revealed decrypted result. The stored simulation
    /// keeps a zero side-effect placeholder, as the original did.
    pub fn run_simulation(
        env: Env,
        oracle: Address,
        request_id: u64,
        drugs: Vec<u32>,
        dosages: Vec<u32>,
        proof: Bytes,
    ) -> Result<u64, TwinError> {
        Self::require_initialized(&env)?;
        Self::require_oracle(&env, &oracle)?;
        Self::verify_proof(&proof)?;

        if !common::are_parallel_vecs(&drugs, &dosages) {
            return Err(TwinError::InvalidInput);
        }

        let pending = Self::consume_pending(&env, request_id, RequestKind::Simulation)?;
        let treatment_id = pending.domain_id;

        // The treatment existed at request time and records are immutable,
        // but the lookup also guards against storage expiry.
        let treatment_key = (TREATMENT_KEY, treatment_id);
        if !env.storage().persistent().has(&treatment_key) {
            return Err(TwinError::TreatmentNotFound);
        }

        let efficacy = scoring::efficacy_score(
            drugs
                .iter()
                .zip(dosages.iter())
                .map(|(d, q)| (d as u64, q as u64)),
        );

        let mut side_effects: Vec<u64> = Vec::new(&env);
        for (d, q) in drugs.iter().zip(dosages.iter()) {
            side_effects.push_back(scoring::side_effect_value(d as u64, q as u64));
        }

        let simulation_id = Self::next_id(&env, &SIMULATION_COUNTER);

        let simulation = SimulationRecord {
            id: simulation_id,
            treatment_id,
            outcome_score: efficacy,
            side_effect_score: 0,
            simulated_at: env.ledger().timestamp(),
        };
        let simulation_key = (SIMULATION_KEY, simulation_id);
        env.storage().persistent().set(&simulation_key, &simulation);
        common::extend_persistent(&env, &simulation_key);

        let result = DecryptedResult {
            simulation_id,
            efficacy,
            side_effects,
            is_revealed: false,
        };
        let result_key = (RESULT_KEY, simulation_id);
        env.storage().persistent().set(&result_key, &result);
        common::extend_persistent(&env, &result_key);

        events::publish_simulation_completed(&env, simulation_id, treatment_id, efficacy);

        Ok(simulation_id)
    }

    // ── Result reveal request/callback pair ──────────────────────────────────

    /// Phase 1: ask the oracle to decrypt a stored simulation result.
    /// Rejected outright if the result has already been revealed.
    pub fn request_reveal(
        env: Env,
        caller: Address,
        simulation_id: u64,
    ) -> Result<u64, TwinError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let result = Self::get_decrypted_result(env.clone(), simulation_id)?;
        if result.is_revealed {
            return Err(TwinError::AlreadyRevealed);
        }

        let request_id = Self::store_pending(&env, RequestKind::Reveal, simulation_id);

        events::publish_reveal_requested(&env, request_id, simulation_id);

        Ok(request_id)
    }

    /// Phase 2: oracle callback with the decrypted efficacy and side-effect
    /// values. A second callback for an already-revealed result fails; the
    /// revealed flag never transitions back to false.
    pub fn reveal_result(
        env: Env,
        oracle: Address,
        request_id: u64,
        efficacy: u64,
        side_effects: Vec<u64>,
        proof: Bytes,
    ) -> Result<(), TwinError> {
        Self::require_initialized(&env)?;
        Self::require_oracle(&env, &oracle)?;
        Self::verify_proof(&proof)?;

        let pending = Self::consume_pending(&env, request_id, RequestKind::Reveal)?;
        let simulation_id = pending.domain_id;

        let result_key = (RESULT_KEY, simulation_id);
        let stored: DecryptedResult = env
            .storage()
            .persistent()
            .get(&result_key)
            .ok_or(TwinError::ResultNotFound)?;

        if stored.is_revealed {
            return Err(TwinError::AlreadyRevealed);
        }

        let revealed = DecryptedResult {
            simulation_id,
            efficacy,
            side_effects,
            is_revealed: true,
        };
        env.storage().persistent().set(&result_key, &revealed);
        common::extend_persistent(&env, &result_key);

        events::publish_result_decrypted(&env, simulation_id, efficacy);

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Next value from a monotonic sequence held in instance storage.
    fn next_id(env: &Env, counter: &Symbol) -> u64 {
        let next: u64 = env
            .storage()
            .instance()
            .get(counter)
            .unwrap_or(0u64)
            .saturating_add(1);
        env.storage().instance().set(counter, &next);
        next
    }

    /// Record a correlation entry for a new oracle request. One sequence
    /// serves both request kinds, so request IDs never collide across them.
    fn store_pending(env: &Env, kind: RequestKind, domain_id: u64) -> u64 {
        let request_id = Self::next_id(env, &REQUEST_COUNTER);

        let pending = PendingRequest {
            request_id,
            kind,
            domain_id,
            requested_at: env.ledger().timestamp(),
        };

        let key = (PENDING_KEY, request_id);
        env.storage().persistent().set(&key, &pending);
        common::extend_persistent(env, &key);

        request_id
    }

    /// Look up and remove a correlation entry. The entry must exist and
    /// match the expected kind; either failure rejects the callback.
    fn consume_pending(
        env: &Env,
        request_id: u64,
        expected: RequestKind,
    ) -> Result<PendingRequest, TwinError> {
        let key = (PENDING_KEY, request_id);
        let pending: PendingRequest = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(TwinError::RequestNotFound)?;

        if pending.kind != expected {
            return Err(TwinError::RequestNotFound);
        }

        env.storage().persistent().remove(&key);

        Ok(pending)
    }

    fn require_initialized(env: &Env) -> Result<(), TwinError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Ok(());
        }
        Err(TwinError::NotInitialized)
    }

    fn require_oracle(env: &Env, caller: &Address) -> Result<(), TwinError> {
        caller.require_auth();
        let oracle: Address = env
            .storage()
            .instance()
            .get(&ORACLE)
            .ok_or(TwinError::NotInitialized)?;

        if caller != &oracle {
            return Err(TwinError::Unauthorized);
        }

        Ok(())
    }

    /// Stand-in for the oracle's signature proof over the returned
    /// cleartext. The demo only requires the proof to be present.
    fn verify_proof(proof: &Bytes) -> Result<(), TwinError> {
        if !common::is_non_empty_bytes(proof) {
            return Err(TwinError::InvalidProof);
        }
        Ok(())
    }
}
