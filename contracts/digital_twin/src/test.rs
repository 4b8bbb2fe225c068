extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Events as _},
    Address, Bytes, Env, IntoVal, TryIntoVal, Vec,
};

use crate::{DigitalTwinContract, DigitalTwinContractClient, RequestKind, TwinError};

fn setup() -> (Env, DigitalTwinContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(DigitalTwinContract, ());
    let client = DigitalTwinContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let oracle = Address::generate(&env);

    client.initialize(&admin, &oracle);

    (env, client, admin, oracle)
}

fn proof(env: &Env) -> Bytes {
    Bytes::from_slice(env, b"oracle-signature")
}

/// Registers a patient and prescribes one treatment, returning both IDs.
fn seed_treatment(env: &Env, client: &DigitalTwinContractClient) -> (u64, u64) {
    let doctor = Address::generate(env);
    let patient_id = client.register_patient(&doctor, &11, &22, &33);
    let treatment_id = client.prescribe_treatment(&doctor, &patient_id, &2, &5, &1);
    (patient_id, treatment_id)
}

#[test]
fn test_initialize_once() {
    let (_env, client, admin, oracle) = setup();

    assert!(client.is_initialized());
    assert_eq!(client.get_admin(), admin);
    assert_eq!(client.get_oracle(), oracle);

    let err = client.try_initialize(&admin, &oracle).unwrap_err().unwrap();
    assert_eq!(err, TwinError::AlreadyInitialized);
}

#[test]
fn test_patient_ids_are_sequential() {
    let (env, client, _admin, _oracle) = setup();
    let doctor = Address::generate(&env);

    let first = client.register_patient(&doctor, &1, &2, &3);
    let second = client.register_patient(&doctor, &4, &5, &6);

    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(client.patient_count(), 2);

    let record = client.get_patient(&first);
    assert_eq!(record.genomics, 1);
    assert_eq!(record.biomarkers, 2);
    assert_eq!(record.history, 3);
}

#[test]
fn test_prescribe_requires_existing_patient() {
    let (env, client, _admin, _oracle) = setup();
    let doctor = Address::generate(&env);

    let err = client
        .try_prescribe_treatment(&doctor, &99, &2, &5, &1)
        .unwrap_err()
        .unwrap();
    assert_eq!(err, TwinError::PatientNotFound);
    assert_eq!(client.treatment_count(), 0);
}

#[test]
fn test_treatment_references_patient() {
    let (env, client, _admin, _oracle) = setup();
    let (patient_id, treatment_id) = seed_treatment(&env, &client);

    let treatment = client.get_treatment(&treatment_id);
    assert_eq!(treatment.patient_id, patient_id);
    assert_eq!(treatment.drug_combination, 2);
    assert_eq!(treatment.dosage, 5);
}

#[test]
fn test_simulation_request_and_callback_flow() {
    let (env, client, _admin, oracle) = setup();
    let (_patient_id, treatment_id) = seed_treatment(&env, &client);

    let requester = Address::generate(&env);
    let request_id = client.request_simulation(&requester, &treatment_id);

    let pending = client.get_pending_request(&request_id);
    assert_eq!(pending.kind, RequestKind::Simulation);
    assert_eq!(pending.domain_id, treatment_id);

    // sum(30*50 + 40*25) = 2500 -> efficacy 25; side effects 30 and 20
    let drugs = Vec::from_array(&env, [30u32, 40u32]);
    let dosages = Vec::from_array(&env, [50u32, 25u32]);

    let simulation_id = client.run_simulation(&oracle, &request_id, &drugs, &dosages, &proof(&env));

    let simulation = client.get_simulation(&simulation_id);
    assert_eq!(simulation.treatment_id, treatment_id);
    assert_eq!(simulation.outcome_score, 25);
    // Zero placeholder carried from the original design.
    assert_eq!(simulation.side_effect_score, 0);

    let result = client.get_decrypted_result(&simulation_id);
    assert_eq!(result.efficacy, 25);
    assert_eq!(result.side_effects, Vec::from_array(&env, [30u64, 20u64]));
    assert!(!result.is_revealed);

    // The correlation entry is consumed by the callback.
    let err = client.try_get_pending_request(&request_id).unwrap_err().unwrap();
    assert_eq!(err, TwinError::RequestNotFound);
}

#[test]
fn test_efficacy_clamped_but_side_effects_are_not() {
    let (env, client, _admin, oracle) = setup();
    let (_patient_id, treatment_id) = seed_treatment(&env, &client);

    let requester = Address::generate(&env);
    let request_id = client.request_simulation(&requester, &treatment_id);

    // 200 * 100 = 20_000: efficacy would be 200, clamped to 100;
    // the side-effect value is 400 and stays unclamped.
    let drugs = Vec::from_array(&env, [200u32]);
    let dosages = Vec::from_array(&env, [100u32]);

    let simulation_id = client.run_simulation(&oracle, &request_id, &drugs, &dosages, &proof(&env));

    let result = client.get_decrypted_result(&simulation_id);
    assert_eq!(result.efficacy, 100);
    assert_eq!(result.side_effects.get(0), Some(400));
    assert!(result.side_effects.get(0).unwrap() > result.efficacy);
}

#[test]
fn test_unknown_request_id_rejected() {
    let (env, client, _admin, oracle) = setup();

    let drugs = Vec::from_array(&env, [1u32]);
    let dosages = Vec::from_array(&env, [1u32]);

    let err = client
        .try_run_simulation(&oracle, &404, &drugs, &dosages, &proof(&env))
        .unwrap_err()
        .unwrap();
    assert_eq!(err, TwinError::RequestNotFound);
}

#[test]
fn test_callback_consumes_request_exactly_once() {
    let (env, client, _admin, oracle) = setup();
    let (_patient_id, treatment_id) = seed_treatment(&env, &client);

    let requester = Address::generate(&env);
    let request_id = client.request_simulation(&requester, &treatment_id);

    let drugs = Vec::from_array(&env, [10u32]);
    let dosages = Vec::from_array(&env, [10u32]);
    client.run_simulation(&oracle, &request_id, &drugs, &dosages, &proof(&env));

    let err = client
        .try_run_simulation(&oracle, &request_id, &drugs, &dosages, &proof(&env))
        .unwrap_err()
        .unwrap();
    assert_eq!(err, TwinError::RequestNotFound);
}

#[test]
fn test_callback_rejects_non_oracle_caller() {
    let (env, client, _admin, _oracle) = setup();
    let (_patient_id, treatment_id) = seed_treatment(&env, &client);

    let requester = Address::generate(&env);
    let request_id = client.request_simulation(&requester, &treatment_id);

    let imposter = Address::generate(&env);
    let drugs = Vec::from_array(&env, [1u32]);
    let dosages = Vec::from_array(&env, [1u32]);

    let err = client
        .try_run_simulation(&imposter, &request_id, &drugs, &dosages, &proof(&env))
        .unwrap_err()
        .unwrap();
    assert_eq!(err, TwinError::Unauthorized);
}

#[test]
fn test_callback_rejects_empty_proof_and_mismatched_arrays() {
    let (env, client, _admin, oracle) = setup();
    let (_patient_id, treatment_id) = seed_treatment(&env, &client);

    let requester = Address::generate(&env);
    let request_id = client.request_simulation(&requester, &treatment_id);

    let drugs = Vec::from_array(&env, [1u32, 2u32]);
    let dosages = Vec::from_array(&env, [1u32]);

    let err = client
        .try_run_simulation(&oracle, &request_id, &drugs, &dosages, &Bytes::new(&env))
        .unwrap_err()
        .unwrap();
    assert_eq!(err, TwinError::InvalidProof);

    let err = client
        .try_run_simulation(&oracle, &request_id, &drugs, &dosages, &proof(&env))
        .unwrap_err()
        .unwrap();
    assert_eq!(err, TwinError::InvalidInput);
}

#[test]
fn test_simulation_request_rejects_reveal_callback() {
    let (env, client, _admin, oracle) = setup();
    let (_patient_id, treatment_id) = seed_treatment(&env, &client);

    let requester = Address::generate(&env);
    let request_id = client.request_simulation(&requester, &treatment_id);

    let err = client
        .try_reveal_result(
            &oracle,
            &request_id,
            &50,
            &Vec::from_array(&env, [1u64]),
            &proof(&env),
        )
        .unwrap_err()
        .unwrap();
    assert_eq!(err, TwinError::RequestNotFound);
}

fn seed_simulation(
    env: &Env,
    client: &DigitalTwinContractClient,
    oracle: &Address,
) -> u64 {
    let (_patient_id, treatment_id) = seed_treatment(env, client);
    let requester = Address::generate(env);
    let request_id = client.request_simulation(&requester, &treatment_id);

    let drugs = Vec::from_array(env, [30u32, 40u32]);
    let dosages = Vec::from_array(env, [50u32, 25u32]);
    client.run_simulation(oracle, &request_id, &drugs, &dosages, &proof(env))
}

#[test]
fn test_reveal_flow_flips_flag_once() {
    let (env, client, _admin, oracle) = setup();
    let simulation_id = seed_simulation(&env, &client, &oracle);

    let requester = Address::generate(&env);
    let request_id = client.request_reveal(&requester, &simulation_id);

    let pending = client.get_pending_request(&request_id);
    assert_eq!(pending.kind, RequestKind::Reveal);
    assert_eq!(pending.domain_id, simulation_id);

    let side_effects = Vec::from_array(&env, [12u64, 8u64]);
    client.reveal_result(&oracle, &request_id, &42, &side_effects, &proof(&env));

    let result = client.get_decrypted_result(&simulation_id);
    assert!(result.is_revealed);
    assert_eq!(result.efficacy, 42);
    assert_eq!(result.side_effects, side_effects);

    // A later reveal request for the same simulation must be rejected.
    let err = client
        .try_request_reveal(&requester, &simulation_id)
        .unwrap_err()
        .unwrap();
    assert_eq!(err, TwinError::AlreadyRevealed);
}

#[test]
fn test_request_reveal_publishes_event() {
    let (env, client, _admin, oracle) = setup();
    let simulation_id = seed_simulation(&env, &client, &oracle);

    let requester = Address::generate(&env);
    let request_id = client.request_reveal(&requester, &simulation_id);

    let events = env.events().all();
    assert!(!events.is_empty());

    let (_contract, topics, data) = events.last().unwrap();
    assert_eq!(
        topics,
        (soroban_sdk::symbol_short!("REV_REQ"), simulation_id).into_val(&env)
    );
    let event: crate::events::RevealRequestedEvent = data.try_into_val(&env).unwrap();
    assert_eq!(event.request_id, request_id);
    assert_eq!(event.simulation_id, simulation_id);
}

#[test]
fn test_second_reveal_callback_rejected_not_double_applied() {
    let (env, client, _admin, oracle) = setup();
    let simulation_id = seed_simulation(&env, &client, &oracle);

    let requester = Address::generate(&env);
    // Two in-flight reveal requests for the same simulation.
    let first = client.request_reveal(&requester, &simulation_id);
    let second = client.request_reveal(&requester, &simulation_id);

    client.reveal_result(
        &oracle,
        &first,
        &60,
        &Vec::from_array(&env, [5u64]),
        &proof(&env),
    );

    let err = client
        .try_reveal_result(
            &oracle,
            &second,
            &99,
            &Vec::from_array(&env, [50u64]),
            &proof(&env),
        )
        .unwrap_err()
        .unwrap();
    assert_eq!(err, TwinError::AlreadyRevealed);

    // First callback's values stand; the revealed flag never resets.
    let result = client.get_decrypted_result(&simulation_id);
    assert!(result.is_revealed);
    assert_eq!(result.efficacy, 60);
}

#[test]
fn test_reveal_request_requires_existing_simulation() {
    let (env, client, _admin, _oracle) = setup();
    let requester = Address::generate(&env);

    let err = client
        .try_request_reveal(&requester, &77)
        .unwrap_err()
        .unwrap();
    assert_eq!(err, TwinError::ResultNotFound);
}
