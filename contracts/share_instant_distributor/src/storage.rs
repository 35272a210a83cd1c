use soroban_sdk::{contracttype, Address, Env, Map};

use crate::accounting::Accumulator;
use crate::error::Error;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Owner,
    NativeAsset,
    TicketToken,
    LockedUntil,
    Shares,                     // Map<token_id, bps>
    Accumulator(Address),       // asset -> Accumulator
    Snapshot(u64, Address),     // (token_id, asset) -> acc_per_share at last claim
}

pub struct Storage;

impl Storage {
    /// Keep config and the share table alive; called on every write.
    pub fn extend_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    // Config
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    pub fn initialize(
        env: &Env,
        owner: &Address,
        native_asset: &Address,
        ticket_token: &Address,
        locked_until: u64,
    ) {
        let instance = env.storage().instance();
        instance.set(&DataKey::Initialized, &true);
        instance.set(&DataKey::Owner, owner);
        instance.set(&DataKey::NativeAsset, native_asset);
        instance.set(&DataKey::TicketToken, ticket_token);
        instance.set(&DataKey::LockedUntil, &locked_until);
        Self::extend_instance(env);
    }

    pub fn get_owner(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_owner(env: &Env, owner: &Address) {
        env.storage().instance().set(&DataKey::Owner, owner);
        Self::extend_instance(env);
    }

    pub fn get_native_asset(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::NativeAsset)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_ticket_token(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::TicketToken)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_locked_until(env: &Env) -> Result<u64, Error> {
        env.storage()
            .instance()
            .get(&DataKey::LockedUntil)
            .ok_or(Error::NotInitialized)
    }

    // Share table
    pub fn get_shares(env: &Env) -> Map<u64, u32> {
        env.storage()
            .instance()
            .get(&DataKey::Shares)
            .unwrap_or(Map::new(env))
    }

    pub fn set_shares(env: &Env, shares: &Map<u64, u32>) {
        env.storage().instance().set(&DataKey::Shares, shares);
        Self::extend_instance(env);
    }

    // Accounting
    pub fn get_accumulator(env: &Env, asset: &Address) -> Accumulator {
        env.storage()
            .persistent()
            .get(&DataKey::Accumulator(asset.clone()))
            .unwrap_or_default()
    }

    pub fn set_accumulator(env: &Env, asset: &Address, accumulator: &Accumulator) {
        let key = DataKey::Accumulator(asset.clone());
        env.storage().persistent().set(&key, accumulator);
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
        Self::extend_instance(env);
    }

    pub fn get_snapshot(env: &Env, token_id: u64, asset: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Snapshot(token_id, asset.clone()))
            .unwrap_or(0)
    }

    pub fn set_snapshot(env: &Env, token_id: u64, asset: &Address, acc_per_share: i128) {
        let key = DataKey::Snapshot(token_id, asset.clone());
        env.storage().persistent().set(&key, &acc_per_share);
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }
}
