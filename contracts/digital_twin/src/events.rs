use soroban_sdk::{symbol_short, Env};

/// Event published when a new patient is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientRegisteredEvent {
    pub patient_id: u64,
    pub timestamp: u64,
}

/// Event published when a treatment is prescribed for a patient.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreatmentPrescribedEvent {
    pub treatment_id: u64,
    pub patient_id: u64,
    pub timestamp: u64,
}

/// Event published when a simulation is requested from the oracle.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimulationRequestedEvent {
    pub request_id: u64,
    pub treatment_id: u64,
    pub timestamp: u64,
}

/// Event published when the oracle callback completes a simulation.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimulationCompletedEvent {
    pub simulation_id: u64,
    pub treatment_id: u64,
    pub outcome_score: u64,
    pub timestamp: u64,
}

/// Event published when a result reveal is requested from the oracle.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevealRequestedEvent {
    pub request_id: u64,
    pub simulation_id: u64,
    pub timestamp: u64,
}

/// Event published when a simulation result is decrypted and revealed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResultDecryptedEvent {
    pub simulation_id: u64,
    pub efficacy: u64,
    pub timestamp: u64,
}

pub fn publish_patient_registered(env: &Env, patient_id: u64) {
    let topics = (symbol_short!("PAT_REG"), patient_id);
    let data = PatientRegisteredEvent {
        patient_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_treatment_prescribed(env: &Env, treatment_id: u64, patient_id: u64) {
    let topics = (symbol_short!("TRT_RX"), patient_id);
    let data = TreatmentPrescribedEvent {
        treatment_id,
        patient_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_simulation_requested(env: &Env, request_id: u64, treatment_id: u64) {
    let topics = (symbol_short!("SIM_REQ"), treatment_id);
    let data = SimulationRequestedEvent {
        request_id,
        treatment_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_simulation_completed(
    env: &Env,
    simulation_id: u64,
    treatment_id: u64,
    outcome_score: u64,
) {
    let topics = (symbol_short!("SIM_DONE"), simulation_id);
    let data = SimulationCompletedEvent {
        simulation_id,
        treatment_id,
        outcome_score,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_reveal_requested(env: &Env, request_id: u64, simulation_id: u64) {
    let topics = (symbol_short!("REV_REQ"), simulation_id);
    let data = RevealRequestedEvent {
        request_id,
        simulation_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_result_decrypted(env: &Env, simulation_id: u64, efficacy: u64) {
    let topics = (symbol_short!("RES_DEC"), simulation_id);
    let data = ResultDecryptedEvent {
        simulation_id,
        efficacy,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
