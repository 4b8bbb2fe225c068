#![no_std]


use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, Address, Bytes, Env, String, Symbol,
};

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const DATA_KEY: Symbol = symbol_short!("DATA");

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum LedgerError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
}

#[contract]
pub struct LedgerContract;

#[contractimpl]
impl LedgerContract {
    /// Initialize the ledger with an admin address.
    pub fn initialize(env: Env, admin: Address) -> Result<(), LedgerError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(LedgerError::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        common::extend_instance(&env);

        events::publish_initialized(&env, admin);

        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, LedgerError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(LedgerError::NotInitialized)
    }

    /// Whether the store is ready to serve reads and writes.
    pub fn is_available(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Store a byte blob under a string key. Overwrites any previous value;
    /// last writer wins, the store provides no read-modify-write coordination.
    pub fn set_data(
        env: Env,
        caller: Address,
        key: String,
        value: Bytes,
    ) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        if !common::is_non_empty_string(&key) {
            return Err(LedgerError::InvalidInput);
        }

        let storage_key = (DATA_KEY, key.clone());
        env.storage().persistent().set(&storage_key, &value);
        common::extend_persistent(&env, &storage_key);

        events::publish_data_written(&env, caller, key, value.len());

        Ok(())
    }

    /// Fetch the blob stored under a key. An absent key is `None`, not an error.
    pub fn get_data(env: Env, key: String) -> Option<Bytes> {
        let storage_key = (DATA_KEY, key);
        env.storage().persistent().get(&storage_key)
    }

    /// Whether any blob is stored under the key.
    pub fn has_data(env: Env, key: String) -> bool {
        let storage_key = (DATA_KEY, key);
        env.storage().persistent().has(&storage_key)
    }

    fn require_initialized(env: &Env) -> Result<(), LedgerError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Ok(());
        }
        Err(LedgerError::NotInitialized)
    }
}

mod events {
    use soroban_sdk::{symbol_short, Address, Env, String};

    pub fn publish_initialized(env: &Env, admin: Address) {
        env.events().publish((symbol_short!("LDG_INIT"),), admin);
    }

    pub fn publish_data_written(env: &Env, writer: Address, key: String, len: u32) {
        env.events()
            .publish((symbol_short!("DATA_SET"), key), (writer, len));
    }
}
