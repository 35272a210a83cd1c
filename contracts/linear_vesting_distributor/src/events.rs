use distribution_shared::ClaimToken;
use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct StreamRegisteredEvent {
    pub stream_id: u64,
    pub creator: Address,
    pub claim_token: ClaimToken,
    pub ticket_token: Address,
    pub emission_rate: i128,
    pub claim_window_unit: u64,
    pub claim_start: u64,
    pub claim_end: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct StreamToppedUpEvent {
    pub stream_id: u64,
    pub sender: Address,
    pub amount: i128,
    pub total_supply: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ClaimedEvent {
    pub stream_id: u64,
    pub token_id: u64,
    pub holder: Address,
    pub window_index: u64,
    pub amount: i128,
}
