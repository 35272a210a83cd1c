#![no_std]

mod accounting;
mod error;
mod events;
mod storage;


pub use accounting::Accumulator;
pub use error::Error;

use distribution_shared::{current_holder, AssetLedger, ClaimToken};
use events::{ClaimedEvent, OwnershipTransferredEvent, SharesUpdatedEvent};
use storage::Storage;

use soroban_sdk::{contract, contractimpl, log, Address, Env, Map, Symbol, Vec};

/// Splits whatever lands in the contract across ticket NFTs by basis points.
///
/// Deposits are plain transfers to the contract address; nothing needs to be
/// called to register them. Each claim folds new deposits into a per-asset
/// accumulator and pays the ticket's share of everything accrued since its
/// previous claim to the ticket's current holder.
#[contract]
pub struct ShareInstantDistributor;

#[contractimpl]
impl ShareInstantDistributor {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the distributor with its share table
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `LengthMismatch`: `token_ids` and `shares` differ in length
    /// - `InvalidShareTable`: Shares do not add up to 10000
    pub fn initialize(
        env: Env,
        owner: Address,
        native_asset: Address,
        ticket_token: Address,
        locked_until: u64,
        token_ids: Vec<u64>,
        shares: Vec<u32>,
    ) -> Result<(), Error> {
        if Storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        let table = Self::apply_shares(&env, Map::new(&env), &token_ids, &shares)?;

        Storage::initialize(&env, &owner, &native_asset, &ticket_token, locked_until);
        Storage::set_shares(&env, &table);

        Ok(())
    }

    // ============================================
    // SUPPLY
    // ============================================

    /// Current native balance held for distribution
    pub fn stream_total_supply(env: Env) -> Result<i128, Error> {
        Self::stream_total_supply_of(env, ClaimToken::Native)
    }

    /// Current balance of `claim_token` held for distribution
    ///
    /// This is deposits minus payouts so far, not a lifetime total.
    pub fn stream_total_supply_of(env: Env, claim_token: ClaimToken) -> Result<i128, Error> {
        let asset = Self::resolve(&env, &claim_token)?;
        Ok(AssetLedger::new(&env, &asset).balance())
    }

    // ============================================
    // CLAIMS
    // ============================================

    /// Claim the native-currency share of `token_id`
    pub fn claim(env: Env, token_id: u64) -> Result<i128, Error> {
        Self::claim_asset(env, token_id, ClaimToken::Native)
    }

    /// Claim the `claim_token` share of `token_id`
    ///
    /// Anyone may call this; funds always go to the current ticket holder.
    ///
    /// # Errors
    /// - `Locked`: Before `locked_until`
    /// - `NothingToClaim`: Nothing accrued since the last claim
    /// - `InsufficientBalance`: A share update made the ticket owed more than the balance
    pub fn claim_asset(env: Env, token_id: u64, claim_token: ClaimToken) -> Result<i128, Error> {
        if env.ledger().timestamp() < Storage::get_locked_until(&env)? {
            return Err(Error::Locked);
        }

        let asset = Self::resolve(&env, &claim_token)?;
        let ledger = AssetLedger::new(&env, &asset);
        let balance = ledger.balance();

        let mut accumulator = Storage::get_accumulator(&env, &asset)
            .refreshed(balance)
            .ok_or(Error::MathOverflow)?;

        let shares = Self::shares_of(env.clone(), token_id);
        let snapshot = Storage::get_snapshot(&env, token_id, &asset);
        let amount = accounting::claimable(shares, accumulator.acc_per_share, snapshot)
            .ok_or(Error::MathOverflow)?;
        if amount == 0 {
            return Err(Error::NothingToClaim);
        }
        if amount > balance {
            log!(&env, "claim exceeds balance", token_id, amount, balance);
            return Err(Error::InsufficientBalance);
        }

        let holder = current_holder(&env, &Storage::get_ticket_token(&env)?, token_id);

        Storage::set_snapshot(&env, token_id, &asset, accumulator.acc_per_share);
        accumulator.last_recorded_balance = balance - amount;
        Storage::set_accumulator(&env, &asset, &accumulator);

        ledger.pay(&holder, amount);

        env.events().publish(
            (Symbol::new(&env, "claimed"), token_id),
            ClaimedEvent {
                token_id,
                asset,
                holder,
                amount,
            },
        );

        Ok(amount)
    }

    /// What `claim_asset` would pay right now, ignoring the lock; 0 if nothing accrued
    pub fn claimable(env: Env, token_id: u64, claim_token: ClaimToken) -> Result<i128, Error> {
        let asset = Self::resolve(&env, &claim_token)?;
        let balance = AssetLedger::new(&env, &asset).balance();

        let accumulator = Storage::get_accumulator(&env, &asset)
            .refreshed(balance)
            .ok_or(Error::MathOverflow)?;
        let snapshot = Storage::get_snapshot(&env, token_id, &asset);

        accounting::claimable(
            Self::shares_of(env.clone(), token_id),
            accumulator.acc_per_share,
            snapshot,
        )
        .ok_or(Error::MathOverflow)
    }

    // ============================================
    // OWNER FUNCTIONS
    // ============================================

    /// Overwrite the shares of the given tokens
    ///
    /// The new shares also apply to whatever each token has accrued but not
    /// yet claimed.
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not the owner
    /// - `LengthMismatch`: `token_ids` and `shares` differ in length
    /// - `InvalidShareTable`: Resulting table does not add up to 10000
    pub fn set_shares_for_tokens(
        env: Env,
        caller: Address,
        token_ids: Vec<u64>,
        shares: Vec<u32>,
    ) -> Result<(), Error> {
        caller.require_auth();
        if caller != Storage::get_owner(&env)? {
            return Err(Error::Unauthorized);
        }

        let table = Self::apply_shares(&env, Storage::get_shares(&env), &token_ids, &shares)?;
        Storage::set_shares(&env, &table);

        log!(&env, "share table updated", token_ids.len());

        env.events().publish(
            (Symbol::new(&env, "shares_updated"),),
            SharesUpdatedEvent { token_ids, shares },
        );

        Ok(())
    }

    /// Hand the distributor over to `new_owner`
    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), Error> {
        let previous_owner = Storage::get_owner(&env)?;
        previous_owner.require_auth();

        Storage::set_owner(&env, &new_owner);

        env.events().publish(
            (Symbol::new(&env, "ownership_transferred"),),
            OwnershipTransferredEvent {
                previous_owner,
                new_owner,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn owner(env: Env) -> Result<Address, Error> {
        Storage::get_owner(&env)
    }

    pub fn shares_of(env: Env, token_id: u64) -> u32 {
        Storage::get_shares(&env).get(token_id).unwrap_or(0)
    }

    pub fn share_table(env: Env) -> Map<u64, u32> {
        Storage::get_shares(&env)
    }

    pub fn locked_until(env: Env) -> Result<u64, Error> {
        Storage::get_locked_until(&env)
    }

    pub fn ticket_token(env: Env) -> Result<Address, Error> {
        Storage::get_ticket_token(&env)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn resolve(env: &Env, claim_token: &ClaimToken) -> Result<Address, Error> {
        Ok(claim_token.resolve(&Storage::get_native_asset(env)?))
    }

    fn apply_shares(
        env: &Env,
        mut table: Map<u64, u32>,
        token_ids: &Vec<u64>,
        shares: &Vec<u32>,
    ) -> Result<Map<u64, u32>, Error> {
        if token_ids.len() != shares.len() {
            return Err(Error::LengthMismatch);
        }

        for (token_id, bps) in token_ids.iter().zip(shares.iter()) {
            table.set(token_id, bps);
        }

        if !accounting::is_complete_share_table(&table) {
            log!(env, "rejected share table", table.len());
            return Err(Error::InvalidShareTable);
        }

        Ok(table)
    }
}
