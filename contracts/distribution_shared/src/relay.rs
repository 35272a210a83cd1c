use soroban_sdk::{Address, BytesN};

/// Effective caller of an entry point.
///
/// Computed once at the boundary and passed down explicitly: either an
/// account that authorized the invocation itself, or the secp256k1 signer
/// a trusted forwarder recovered from a meta-transaction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Caller {
    Account(Address),
    Signer(BytesN<20>),
}

/// Builds the caller for a call relayed by `trusted_forwarder`.
///
/// The forwarder appends the recovered signer as the last argument. Requiring
/// the forwarder's authorization only succeeds when it is the direct invoker,
/// so a signer argument supplied by anyone else is rejected by the host.
pub fn relayed_caller(trusted_forwarder: &Address, signer: BytesN<20>) -> Caller {
    trusted_forwarder.require_auth();
    Caller::Signer(signer)
}
