use soroban_sdk::{contracttype, Address, BytesN, Symbol};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutedEvent {
    pub signer: BytesN<20>,
    pub nonce: u64,
    pub relayer: Address,
    pub to: Address,
    pub function: Symbol,
    pub value: i128,
}
