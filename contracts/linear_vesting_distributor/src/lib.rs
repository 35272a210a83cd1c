#![no_std]

mod error;
mod events;
mod release;
mod storage;


pub use error::Error;
pub use storage::Stream;

use distribution_shared::{current_holder, AssetLedger, ClaimToken};
use events::{ClaimedEvent, StreamRegisteredEvent, StreamToppedUpEvent};
use storage::Storage;

use soroban_sdk::{contract, contractimpl, log, Address, Env, Symbol, Vec};

/// Linearly vesting streams paid to whoever holds a ticket NFT at claim time.
///
/// Each stream releases `emission_rate` per ticket for every elapsed
/// `claim_window_unit` between `claim_start` and `claim_end`. Payouts are
/// capped by what has been topped up, so a stream can run dry before its end.
#[contract]
pub struct LinearVestingDistributor;

#[contractimpl]
impl LinearVestingDistributor {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize with the contract backing `ClaimToken::Native`
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, native_asset: Address) -> Result<(), Error> {
        if Storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        Storage::initialize(&env, &native_asset);
        Ok(())
    }

    // ============================================
    // STREAM MANAGEMENT
    // ============================================

    /// Register a new emission stream, returns its id (first id is 1)
    ///
    /// # Errors
    /// - `InvalidWindow`: Window unit is zero
    /// - `InvalidSchedule`: Start is after end
    /// - `InvalidAmount`: Negative emission rate
    pub fn register_stream(
        env: Env,
        creator: Address,
        claim_token: ClaimToken,
        ticket_token: Address,
        emission_rate: i128,
        claim_window_unit: u64,
        claim_start: u64,
        claim_end: u64,
    ) -> Result<u64, Error> {
        creator.require_auth();

        if claim_window_unit == 0 {
            return Err(Error::InvalidWindow);
        }
        if claim_start > claim_end {
            return Err(Error::InvalidSchedule);
        }
        if emission_rate < 0 {
            return Err(Error::InvalidAmount);
        }

        let stream_id = Storage::next_stream_id(&env);
        let stream = Stream {
            id: stream_id,
            creator: creator.clone(),
            claim_token: claim_token.clone(),
            ticket_token: ticket_token.clone(),
            emission_rate,
            claim_window_unit,
            claim_start,
            claim_end,
            total_supply: 0,
            total_claimed: 0,
        };
        Storage::set_stream(&env, &stream);

        log!(&env, "stream registered", stream_id, emission_rate);

        env.events().publish(
            (Symbol::new(&env, "stream_registered"), stream_id),
            StreamRegisteredEvent {
                stream_id,
                creator,
                claim_token,
                ticket_token,
                emission_rate,
                claim_window_unit,
                claim_start,
                claim_end,
            },
        );

        Ok(stream_id)
    }

    /// Add funds to a stream, pulled from `sender` in the stream's claim token
    ///
    /// # Errors
    /// - `WrongStream`: Stream doesn't exist
    /// - `InvalidAmount`: Amount must be positive
    pub fn top_up(env: Env, sender: Address, stream_id: u64, amount: i128) -> Result<(), Error> {
        sender.require_auth();

        let mut stream = Storage::get_stream(&env, stream_id)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        stream.total_supply = stream
            .total_supply
            .checked_add(amount)
            .ok_or(Error::MathOverflow)?;
        Storage::set_stream(&env, &stream);

        let asset = Self::claim_asset(&env, &stream)?;
        AssetLedger::new(&env, &asset).pull(&sender, amount);

        env.events().publish(
            (Symbol::new(&env, "stream_topped_up"), stream_id),
            StreamToppedUpEvent {
                stream_id,
                sender,
                amount,
                total_supply: stream.total_supply,
            },
        );

        Ok(())
    }

    // ============================================
    // CLAIMS
    // ============================================

    /// Pay out everything released for `token_id` since its last claim
    ///
    /// Anyone may call this; funds always go to the current ticket holder.
    ///
    /// # Errors
    /// - `WrongStream`: Stream doesn't exist
    /// - `NotStarted`: Before `claim_start`
    /// - `StreamEmpty`: Stream never topped up
    /// - `NothingToClaim`: First claim before a whole window elapsed
    /// - `TooEarly`: No new window since the last claim
    /// - `StreamDepleted`: All topped-up funds already paid
    pub fn claim(env: Env, stream_id: u64, token_id: u64) -> Result<i128, Error> {
        let mut stream = Self::claimable_stream(&env, stream_id)?;
        Self::claim_for_ticket(&env, &mut stream, token_id)
    }

    /// Claim for several tickets of the same stream at once
    ///
    /// All-or-nothing: if any ticket is ineligible the whole call fails and
    /// nothing is paid. Returns the total paid out.
    ///
    /// # Errors
    /// Same as `claim`, plus `NothingToClaim` for an empty id list.
    pub fn claim_bulk(env: Env, stream_id: u64, token_ids: Vec<u64>) -> Result<i128, Error> {
        let mut stream = Self::claimable_stream(&env, stream_id)?;

        if token_ids.is_empty() {
            return Err(Error::NothingToClaim);
        }

        let mut total: i128 = 0;
        for token_id in token_ids.iter() {
            let paid = Self::claim_for_ticket(&env, &mut stream, token_id)?;
            total = total.checked_add(paid).ok_or(Error::MathOverflow)?;
        }

        Ok(total)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Per-ticket amount released at `at`, floored to whole windows
    pub fn released_amount_rounded(env: Env, stream_id: u64, at: u64) -> Result<i128, Error> {
        let stream = Storage::get_stream(&env, stream_id)?;
        release::released_rounded(&stream, at).ok_or(Error::MathOverflow)
    }

    /// Per-ticket amount released at `at`, linearly interpolated
    pub fn released_amount_fractioned(env: Env, stream_id: u64, at: u64) -> Result<i128, Error> {
        let stream = Storage::get_stream(&env, stream_id)?;
        release::released_fractioned(&stream, at).ok_or(Error::MathOverflow)
    }

    pub fn streams(env: Env, stream_id: u64) -> Result<Stream, Error> {
        Storage::get_stream(&env, stream_id)
    }

    /// Cumulative amount topped up into a stream
    pub fn stream_supply(env: Env, stream_id: u64) -> Result<i128, Error> {
        Ok(Storage::get_stream(&env, stream_id)?.total_supply)
    }

    pub fn stream_count(env: Env) -> u64 {
        Storage::get_stream_count(&env)
    }

    pub fn last_claimed_window(env: Env, stream_id: u64, token_id: u64) -> Option<u64> {
        Storage::get_last_claimed_window(&env, stream_id, token_id)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn claim_asset(env: &Env, stream: &Stream) -> Result<Address, Error> {
        let native_asset = Storage::get_native_asset(env)?;
        Ok(stream.claim_token.resolve(&native_asset))
    }

    /// Stream-level checks shared by `claim` and `claim_bulk`.
    fn claimable_stream(env: &Env, stream_id: u64) -> Result<Stream, Error> {
        let stream = Storage::get_stream(env, stream_id)?;

        if env.ledger().timestamp() < stream.claim_start {
            return Err(Error::NotStarted);
        }
        if stream.total_supply == 0 {
            return Err(Error::StreamEmpty);
        }

        Ok(stream)
    }

    fn claim_for_ticket(env: &Env, stream: &mut Stream, token_id: u64) -> Result<i128, Error> {
        let window = release::window_index(stream, env.ledger().timestamp());
        let last_window = Storage::get_last_claimed_window(env, stream.id, token_id);

        match last_window {
            None if window == 0 => return Err(Error::NothingToClaim),
            Some(last) if window <= last => return Err(Error::TooEarly),
            _ => {}
        }

        let owed = release::owed_between(stream, last_window.unwrap_or(0), window)
            .ok_or(Error::MathOverflow)?;
        if owed == 0 {
            return Err(Error::NothingToClaim);
        }

        let remaining = stream.total_supply - stream.total_claimed;
        if remaining <= 0 {
            return Err(Error::StreamDepleted);
        }
        let amount = owed.min(remaining);
        if amount < owed {
            log!(
                env,
                "claim capped to remaining supply",
                stream.id,
                token_id,
                owed,
                amount
            );
        }

        let holder = current_holder(env, &stream.ticket_token, token_id);
        let asset = Self::claim_asset(env, stream)?;

        // Ledger first, transfer last.
        stream.total_claimed += amount;
        Storage::set_stream(env, stream);
        Storage::set_last_claimed_window(env, stream.id, token_id, window);

        AssetLedger::new(env, &asset).pay(&holder, amount);

        env.events().publish(
            (Symbol::new(env, "claimed"), stream.id, token_id),
            ClaimedEvent {
                stream_id: stream.id,
                token_id,
                holder,
                window_index: window,
                amount,
            },
        );

        Ok(amount)
    }
}
