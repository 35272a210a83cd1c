#![no_std]

mod error;
mod events;
mod metadata;
mod storage;


pub use error::Error;
pub use storage::CollectionInfo;

use distribution_shared::{relayed_caller, Caller};
use events::{MintEvent, TransferEvent};
use metadata::prefixed_uri;
use storage::{DataKey, MAX_URI_LEN, TOKEN_ID_DIGITS};

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Symbol, Vec};

/// Ticket NFT whose holders are entitled to distributor payouts.
#[contract]
pub struct TicketCollection;

#[contractimpl]
impl TicketCollection {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the collection
    ///
    /// `admin_signer` is the admin's secp256k1 identity for calls relayed
    /// through `trusted_forwarder`; leave both unset for a direct-only collection.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `UriTooLong`: Prefix leaves no room for a token id
    pub fn initialize(
        env: Env,
        admin: Address,
        admin_signer: Option<BytesN<20>>,
        trusted_forwarder: Option<Address>,
        name: String,
        symbol: String,
        uri_prefix: String,
        max_supply: u64,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        if uri_prefix.len() as usize > MAX_URI_LEN - TOKEN_ID_DIGITS {
            return Err(Error::UriTooLong);
        }

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        if let Some(signer) = admin_signer {
            env.storage().instance().set(&DataKey::AdminSigner, &signer);
        }
        if let Some(forwarder) = trusted_forwarder {
            env.storage()
                .instance()
                .set(&DataKey::TrustedForwarder, &forwarder);
        }

        storage::set_info(
            &env,
            &CollectionInfo {
                name,
                symbol,
                uri_prefix,
                max_supply,
                total_supply: 0,
            },
        );

        Ok(())
    }

    // ============================================
    // MINTING
    // ============================================

    /// Mint a specific token id
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not admin
    /// - `AlreadyMinted`: Token id already has a holder
    /// - `MaxSupplyReached`: Collection is full
    pub fn mint_exact(env: Env, caller: Address, to: Address, token_id: u64) -> Result<(), Error> {
        caller.require_auth();
        Self::authorize_admin(&env, &Caller::Account(caller))?;

        Self::mint_one(&env, &to, token_id)
    }

    /// Mint one-of-one tokens with explicit URIs, using the next free ids
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not admin
    /// - `EmptyMint`: No URIs given
    /// - `MaxSupplyReached`: Collection would overflow
    pub fn mint_with_token_uris(
        env: Env,
        caller: Address,
        to: Address,
        uris: Vec<String>,
    ) -> Result<Vec<u64>, Error> {
        caller.require_auth();
        Self::mint_uris(&env, &Caller::Account(caller), &to, &uris)
    }

    /// Same as `mint_with_token_uris`, reached through the trusted forwarder
    ///
    /// The forwarder appends the recovered `signer`; it must match the admin signer.
    ///
    /// # Errors
    /// - `NoTrustedForwarder`: Collection does not accept relayed calls
    /// - `Unauthorized`: Signer is not the admin signer
    pub fn relayed_mint_with_token_uris(
        env: Env,
        to: Address,
        uris: Vec<String>,
        signer: BytesN<20>,
    ) -> Result<Vec<u64>, Error> {
        let forwarder = storage::get_trusted_forwarder(&env).ok_or(Error::NoTrustedForwarder)?;
        let caller = relayed_caller(&forwarder, signer);
        Self::mint_uris(&env, &caller, &to, &uris)
    }

    // ============================================
    // TRANSFERS
    // ============================================

    /// Move a token between holders
    ///
    /// # Errors
    /// - `NotMinted`: Token does not exist
    /// - `NotOwner`: `from` does not hold the token
    pub fn transfer(env: Env, from: Address, to: Address, token_id: u64) -> Result<(), Error> {
        from.require_auth();

        let holder = storage::get_owner(&env, token_id).ok_or(Error::NotMinted)?;
        if holder != from {
            return Err(Error::NotOwner);
        }

        storage::set_balance(&env, &from, storage::get_balance(&env, &from) - 1);
        storage::set_balance(&env, &to, storage::get_balance(&env, &to) + 1);
        storage::set_owner(&env, token_id, &to);

        env.events().publish(
            (Symbol::new(&env, "transfer"), token_id),
            TransferEvent { from, to, token_id },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, Error> {
        storage::get_owner(&env, token_id).ok_or(Error::NotMinted)
    }

    pub fn balance_of(env: Env, holder: Address) -> u64 {
        storage::get_balance(&env, &holder)
    }

    /// One-of-one URI if the token was minted with one, otherwise prefix + id
    pub fn token_uri(env: Env, token_id: u64) -> Result<String, Error> {
        if storage::get_owner(&env, token_id).is_none() {
            return Err(Error::NotMinted);
        }
        if let Some(uri) = storage::get_token_uri(&env, token_id) {
            return Ok(uri);
        }
        let info = storage::get_info(&env)?;
        Ok(prefixed_uri(&env, &info.uri_prefix, token_id))
    }

    pub fn total_supply(env: Env) -> Result<u64, Error> {
        Ok(storage::get_info(&env)?.total_supply)
    }

    pub fn info(env: Env) -> Result<CollectionInfo, Error> {
        storage::get_info(&env)
    }

    pub fn is_trusted_forwarder(env: Env, forwarder: Address) -> bool {
        storage::get_trusted_forwarder(&env) == Some(forwarder)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn authorize_admin(env: &Env, caller: &Caller) -> Result<(), Error> {
        let allowed = match caller {
            Caller::Account(account) => *account == storage::get_admin(env)?,
            Caller::Signer(signer) => storage::get_admin_signer(env).as_ref() == Some(signer),
        };
        if !allowed {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    fn mint_uris(
        env: &Env,
        caller: &Caller,
        to: &Address,
        uris: &Vec<String>,
    ) -> Result<Vec<u64>, Error> {
        Self::authorize_admin(env, caller)?;

        if uris.is_empty() {
            return Err(Error::EmptyMint);
        }

        let mut minted = Vec::new(env);
        let mut token_id = storage::next_token_id(env);
        for uri in uris.iter() {
            while storage::get_owner(env, token_id).is_some() {
                token_id += 1;
            }
            Self::mint_one(env, to, token_id)?;
            storage::set_token_uri(env, token_id, &uri);
            minted.push_back(token_id);
            token_id += 1;
        }
        storage::set_next_token_id(env, token_id);

        Ok(minted)
    }

    fn mint_one(env: &Env, to: &Address, token_id: u64) -> Result<(), Error> {
        let mut info = storage::get_info(env)?;
        if info.total_supply >= info.max_supply {
            return Err(Error::MaxSupplyReached);
        }
        if storage::get_owner(env, token_id).is_some() {
            return Err(Error::AlreadyMinted);
        }

        storage::set_owner(env, token_id, to);
        storage::set_balance(env, to, storage::get_balance(env, to) + 1);
        info.total_supply += 1;
        storage::set_info(env, &info);

        env.events().publish(
            (Symbol::new(env, "mint"), token_id),
            MintEvent {
                to: to.clone(),
                token_id,
            },
        );

        Ok(())
    }
}
