use soroban_sdk::{Bytes, String, Vec};

/// Returns true if the string has at least one character.
pub fn is_non_empty_string(value: &String) -> bool {
    !value.is_empty()
}

/// Returns true if the byte blob has at least one byte.
pub fn is_non_empty_bytes(value: &Bytes) -> bool {
    !value.is_empty()
}

/// Returns true if the two vectors are non-empty and the same length.
/// Callback payloads carry parallel arrays that must line up element-wise.
pub fn are_parallel_vecs(a: &Vec<u32>, b: &Vec<u32>) -> bool {
    !a.is_empty() && a.len() == b.len()
}
