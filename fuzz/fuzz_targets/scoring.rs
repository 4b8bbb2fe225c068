#![no_main]

use digital_twin::scoring;
use libfuzzer_sys::fuzz_target;

// The efficacy clamp must hold for every input; side-effect values must
// never panic, overflow aside from saturation, or depend on pair order
// beyond the documented formula.
fuzz_target!(|pairs: Vec<(u32, u32)>| {
    let score = scoring::efficacy_score(pairs.iter().map(|&(d, q)| (d as u64, q as u64)));
    assert!(score <= scoring::MAX_EFFICACY);

    for (drug, dosage) in pairs {
        let value = scoring::side_effect_value(drug as u64, dosage as u64);
        assert_eq!(value, (drug as u64).saturating_mul(dosage as u64) / 50);
    }
});
