use soroban_sdk::{contracttype, Address, BytesN, Env, String};

use crate::error::Error;

/// Longest URI the collection will build or store, in bytes.
pub const MAX_URI_LEN: usize = 256;
/// Room kept after the prefix for a decimal `u64` token id.
pub const TOKEN_ID_DIGITS: usize = 20;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollectionInfo {
    pub name: String,
    pub symbol: String,
    /// Token URI of token `n` is `uri_prefix` followed by `n` unless minted one-of-one
    pub uri_prefix: String,
    pub max_supply: u64,
    pub total_supply: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Admin,
    AdminSigner,
    TrustedForwarder,
    Info,
    NextTokenId,
    Owner(u64),          // token_id -> holder
    Balance(Address),    // holder -> number of tokens
    TokenUri(u64),       // token_id -> one-of-one URI
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn extend_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

pub fn get_admin_signer(env: &Env) -> Option<BytesN<20>> {
    env.storage().instance().get(&DataKey::AdminSigner)
}

pub fn get_trusted_forwarder(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::TrustedForwarder)
}

pub fn get_info(env: &Env) -> Result<CollectionInfo, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Info)
        .ok_or(Error::NotInitialized)
}

pub fn set_info(env: &Env, info: &CollectionInfo) {
    env.storage().instance().set(&DataKey::Info, info);
    extend_instance(env);
}

pub fn get_owner(env: &Env, token_id: u64) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Owner(token_id))
}

pub fn set_owner(env: &Env, token_id: u64, owner: &Address) {
    let key = DataKey::Owner(token_id);
    env.storage().persistent().set(&key, owner);
    extend_persistent(env, &key);
    extend_instance(env);
}

pub fn get_balance(env: &Env, holder: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(holder.clone()))
        .unwrap_or(0)
}

pub fn set_balance(env: &Env, holder: &Address, balance: u64) {
    let key = DataKey::Balance(holder.clone());
    if balance == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &balance);
        extend_persistent(env, &key);
    }
}

pub fn get_token_uri(env: &Env, token_id: u64) -> Option<String> {
    env.storage().persistent().get(&DataKey::TokenUri(token_id))
}

pub fn set_token_uri(env: &Env, token_id: u64, uri: &String) {
    let key = DataKey::TokenUri(token_id);
    env.storage().persistent().set(&key, uri);
    extend_persistent(env, &key);
}

pub fn next_token_id(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::NextTokenId)
        .unwrap_or(1)
}

pub fn set_next_token_id(env: &Env, token_id: u64) {
    env.storage()
        .instance()
        .set(&DataKey::NextTokenId, &token_id);
}
