use soroban_sdk::{contractclient, Address, Env};

/// The slice of the ticket NFT interface distributors rely on.
#[contractclient(name = "TicketClient")]
pub trait TicketInterface {
    fn owner_of(env: Env, token_id: u64) -> Address;
}

/// Whoever holds `token_id` right now. Payouts always go here, never to the caller.
pub fn current_holder(env: &Env, ticket_token: &Address, token_id: u64) -> Address {
    TicketClient::new(env, ticket_token).owner_of(&token_id)
}
