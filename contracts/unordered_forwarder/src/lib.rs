#![no_std]

mod error;
mod events;
mod signature;
mod storage;

#[cfg(test)]
mod test;

pub use error::Error;
pub use signature::{signer_id, DOMAIN_NAME, DOMAIN_VERSION};
pub use storage::{MetaTransaction, RecoverableSignature};

use events::ExecutedEvent;

use soroban_sdk::{
    contract, contractimpl, log, token, Address, BytesN, Env, IntoVal, Symbol, Val, Vec,
};

/// Relays pre-signed calls for secp256k1 signers.
///
/// Nonces are unordered: any value a signer has not used before is accepted,
/// so independent meta-transactions can be submitted in any order.
#[contract]
pub struct UnorderedForwarder;

#[contractimpl]
impl UnorderedForwarder {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize with the native asset contract used for `value` transfers
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, native_asset: Address) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        storage::initialize(&env, &native_asset);
        Ok(())
    }

    // ============================================
    // EXECUTION
    // ============================================

    /// Verify and execute meta-transactions in order
    ///
    /// Each call goes to `meta.to` with the signer identity appended as the
    /// last argument. The batch is atomic: any failing entry aborts all of it.
    /// Returns every call's return value.
    ///
    /// # Errors
    /// - `LengthMismatch`: Meta-transaction and signature counts differ
    /// - `InvalidSignature`: Signature does not recover to `from`, or its recovery id exceeds 3
    /// - `ReplayedNonce`: `(from, nonce)` already used
    /// - `Expired`: Past `expires_at`
    /// - `GasPriceOutOfRange`: `gas_price` outside the signed range
    /// - `CallFailed`: Target call failed
    pub fn batch_execute(
        env: Env,
        relayer: Address,
        gas_price: u64,
        metas: Vec<MetaTransaction>,
        signatures: Vec<RecoverableSignature>,
    ) -> Result<Vec<Val>, Error> {
        relayer.require_auth();

        if metas.len() != signatures.len() {
            return Err(Error::LengthMismatch);
        }

        let mut results = Vec::new(&env);
        for (meta, signature) in metas.iter().zip(signatures.iter()) {
            let result = Self::execute(&env, &relayer, gas_price, &meta, &signature)?;
            results.push_back(result);
        }

        Ok(results)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn domain_separator(env: Env) -> BytesN<32> {
        signature::domain_separator(&env)
    }

    /// Digest a signer must sign for `meta`
    pub fn hash_meta_transaction(env: Env, meta: MetaTransaction) -> BytesN<32> {
        signature::typed_digest(&env, &meta).to_bytes()
    }

    pub fn is_nonce_used(env: Env, signer: BytesN<20>, nonce: u64) -> bool {
        storage::is_nonce_used(&env, &signer, nonce)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn execute(
        env: &Env,
        relayer: &Address,
        gas_price: u64,
        meta: &MetaTransaction,
        signature: &RecoverableSignature,
    ) -> Result<Val, Error> {
        if signature::recover_signer(env, meta, signature).as_ref() != Some(&meta.from) {
            return Err(Error::InvalidSignature);
        }

        if storage::is_nonce_used(env, &meta.from, meta.nonce) {
            return Err(Error::ReplayedNonce);
        }
        storage::mark_nonce_used(env, &meta.from, meta.nonce);

        if env.ledger().timestamp() > meta.expires_at {
            return Err(Error::Expired);
        }

        if gas_price < meta.min_gas_price || gas_price > meta.max_gas_price {
            return Err(Error::GasPriceOutOfRange);
        }

        if meta.value > 0 {
            let native_asset = storage::get_native_asset(env)?;
            token::Client::new(env, &native_asset).transfer(relayer, &meta.to, &meta.value);
        }

        let mut args = meta.args.clone();
        args.push_back(meta.from.into_val(env));

        log!(env, "relaying call", meta.to, meta.function, meta.nonce);

        let result = match env.try_invoke_contract::<Val, soroban_sdk::Error>(
            &meta.to,
            &meta.function,
            args,
        ) {
            Ok(Ok(value)) => value,
            _ => {
                log!(env, "relayed call failed", meta.to, meta.function);
                return Err(Error::CallFailed);
            }
        };

        env.events().publish(
            (Symbol::new(env, "executed"), meta.from.clone(), meta.nonce),
            ExecutedEvent {
                signer: meta.from.clone(),
                nonce: meta.nonce,
                relayer: relayer.clone(),
                to: meta.to.clone(),
                function: meta.function.clone(),
                value: meta.value,
            },
        );

        Ok(result)
    }
}
