use distribution_shared::ClaimToken;
use soroban_sdk::{contracttype, Address, Env};

use crate::error::Error;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stream {
    /// Sequential id, first stream is 1
    pub id: u64,
    pub creator: Address,
    pub claim_token: ClaimToken,
    /// NFT whose current holder receives payouts
    pub ticket_token: Address,
    /// Amount released per elapsed window, per ticket
    pub emission_rate: i128,
    /// Window length in seconds
    pub claim_window_unit: u64,
    pub claim_start: u64,
    pub claim_end: u64,
    /// Cumulative top-ups
    pub total_supply: i128,
    /// Cumulative payouts, never above `total_supply`
    pub total_claimed: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    NativeAsset,
    StreamCount,
    Stream(u64),                 // stream_id -> Stream
    LastClaimedWindow(u64, u64), // (stream_id, token_id) -> window index
}

pub struct Storage;

impl Storage {
    /// Keep config and the stream counter alive; called on every write.
    pub fn extend_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    // Config
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    pub fn initialize(env: &Env, native_asset: &Address) {
        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage()
            .instance()
            .set(&DataKey::NativeAsset, native_asset);
        Self::extend_instance(env);
    }

    pub fn get_native_asset(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::NativeAsset)
            .ok_or(Error::NotInitialized)
    }

    // Stream id counter
    pub fn get_stream_count(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::StreamCount)
            .unwrap_or(0)
    }

    pub fn next_stream_id(env: &Env) -> u64 {
        let id = Self::get_stream_count(env) + 1;
        env.storage().instance().set(&DataKey::StreamCount, &id);
        Self::extend_instance(env);
        id
    }

    // Streams
    pub fn get_stream(env: &Env, stream_id: u64) -> Result<Stream, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Stream(stream_id))
            .ok_or(Error::WrongStream)
    }

    pub fn set_stream(env: &Env, stream: &Stream) {
        let key = DataKey::Stream(stream.id);
        env.storage().persistent().set(&key, stream);
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
        Self::extend_instance(env);
    }

    // Claim records
    pub fn get_last_claimed_window(env: &Env, stream_id: u64, token_id: u64) -> Option<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::LastClaimedWindow(stream_id, token_id))
    }

    pub fn set_last_claimed_window(env: &Env, stream_id: u64, token_id: u64, window_index: u64) {
        let key = DataKey::LastClaimedWindow(stream_id, token_id);
        env.storage().persistent().set(&key, &window_index);
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }
}
