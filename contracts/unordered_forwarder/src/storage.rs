use soroban_sdk::{contracttype, Address, BytesN, Env, Symbol, Val, Vec};

use crate::error::Error;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// A call signed off-chain by `from` and submitted by any relayer.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetaTransaction {
    /// Signer identity: last 20 bytes of keccak-256 of the uncompressed public key
    pub from: BytesN<20>,
    pub to: Address,
    pub function: Symbol,
    /// Call arguments; the forwarder appends `from` after these
    pub args: Vec<Val>,
    /// Native amount the relayer sends to `to` along with the call
    pub value: i128,
    pub min_gas_price: u64,
    pub max_gas_price: u64,
    pub expires_at: u64,
    /// Any unused value; nonces need not be sequential
    pub nonce: u64,
}

/// 64-byte compact secp256k1 signature plus its recovery id.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoverableSignature {
    pub signature: BytesN<64>,
    pub recovery_id: u32,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    NativeAsset,
    UsedNonce(BytesN<20>, u64), // (signer, nonce) -> true
}

/// Keep the configured native asset alive; called on every write.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn initialize(env: &Env, native_asset: &Address) {
    env.storage().instance().set(&DataKey::Initialized, &true);
    env.storage()
        .instance()
        .set(&DataKey::NativeAsset, native_asset);
    extend_instance(env);
}

pub fn get_native_asset(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::NativeAsset)
        .ok_or(Error::NotInitialized)
}

pub fn is_nonce_used(env: &Env, signer: &BytesN<20>, nonce: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::UsedNonce(signer.clone(), nonce))
}

pub fn mark_nonce_used(env: &Env, signer: &BytesN<20>, nonce: u64) {
    let key = DataKey::UsedNonce(signer.clone(), nonce);
    env.storage().persistent().set(&key, &true);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
    extend_instance(env);
}
