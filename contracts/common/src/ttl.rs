use soroban_sdk::{Env, IntoVal, Val};

/// TTL window shared by every persistent key in the suite (in ledgers).
pub const TTL_THRESHOLD: u32 = 17_280; // ~1 day
pub const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

/// Extends the time-to-live for a persistent storage key.
/// Keeps the entry live for roughly 30 days whenever it is touched.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live for the contract's instance storage.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
