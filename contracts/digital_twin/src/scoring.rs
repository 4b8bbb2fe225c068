//! Cleartext scoring formulas applied by the oracle callbacks.
//!
//! Efficacy is clamped to [`MAX_EFFICACY`]; per-element side-effect values
//! are not clamped at all. The asymmetry is intentional and pinned by tests.

/// Upper bound for the aggregate efficacy score.
pub const MAX_EFFICACY: u64 = 100;

const EFFICACY_DIVISOR: u64 = 100;
const SIDE_EFFECT_DIVISOR: u64 = 50;

/// Aggregate efficacy over parallel drug/dosage arrays:
/// `min(100, sum(drug[i] * dosage[i]) / 100)`.
pub fn efficacy_score<I>(pairs: I) -> u64
where
    I: Iterator<Item = (u64, u64)>,
{
    let total = pairs
        .map(|(drug, dosage)| drug.saturating_mul(dosage))
        .fold(0u64, u64::saturating_add);
    (total / EFFICACY_DIVISOR).min(MAX_EFFICACY)
}

/// Per-element side-effect value: `drug * dosage / 50`, unbounded.
pub fn side_effect_value(drug: u64, dosage: u64) -> u64 {
    drug.saturating_mul(dosage) / SIDE_EFFECT_DIVISOR
}
