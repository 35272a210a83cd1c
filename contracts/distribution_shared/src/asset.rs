use soroban_sdk::{contracttype, token, Address, Env};

/// Asset a distributor pays out in.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClaimToken {
    /// Native currency, backed by the native asset contract configured at initialization
    Native,
    /// Any contract implementing the standard token interface
    Asset(Address),
}

impl ClaimToken {
    /// Contract address that actually holds balances for this claim token.
    pub fn resolve(&self, native_asset: &Address) -> Address {
        match self {
            ClaimToken::Native => native_asset.clone(),
            ClaimToken::Asset(asset) => asset.clone(),
        }
    }
}

/// Balance and transfer primitives for one asset, seen from the current contract.
pub struct AssetLedger<'a> {
    env: &'a Env,
    client: token::Client<'a>,
}

impl<'a> AssetLedger<'a> {
    pub fn new(env: &'a Env, asset: &Address) -> Self {
        Self {
            env,
            client: token::Client::new(env, asset),
        }
    }

    /// Balance held by the current contract.
    pub fn balance(&self) -> i128 {
        self.client.balance(&self.env.current_contract_address())
    }

    /// Transfer-from: moves `amount` from `from` into the current contract.
    /// `from` must have authorized the surrounding invocation.
    pub fn pull(&self, from: &Address, amount: i128) {
        self.client
            .transfer(from, &self.env.current_contract_address(), &amount);
    }

    /// Pays `amount` out of the current contract.
    pub fn pay(&self, to: &Address, amount: i128) {
        self.client
            .transfer(&self.env.current_contract_address(), to, &amount);
    }
}
