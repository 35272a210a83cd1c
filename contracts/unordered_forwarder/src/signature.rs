use soroban_sdk::{crypto::Hash, xdr::ToXdr, Bytes, BytesN, Env};

use crate::storage::{MetaTransaction, RecoverableSignature};

pub const DOMAIN_NAME: &str = "UnorderedMetaTransactions";
pub const DOMAIN_VERSION: &str = "v0.1";

const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,bytes32 networkId,address verifyingContract)";
const META_TRANSACTION_TYPE: &str = "MetaTransaction(bytes20 from,address to,symbol function,val[] args,int128 value,uint64 minGasPrice,uint64 maxGasPrice,uint64 expiresAt,uint64 nonce)";

/// Recovery ids above this do not name a secp256k1 public key.
const MAX_RECOVERY_ID: u32 = 3;

/// Typed-data prefix: version byte 0x01 of the 0x19 structured-data scheme.
const TYPED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];

fn keccak_str(env: &Env, value: &str) -> Bytes {
    env.crypto()
        .keccak256(&Bytes::from_slice(env, value.as_bytes()))
        .to_bytes()
        .into()
}

/// Binds signatures to this forwarder on this network
///
/// Formula: keccak(type_hash || keccak(name) || keccak(version) || network_id || xdr(forwarder))
pub fn domain_separator(env: &Env) -> BytesN<32> {
    let mut payload = keccak_str(env, DOMAIN_TYPE);
    payload.append(&keccak_str(env, DOMAIN_NAME));
    payload.append(&keccak_str(env, DOMAIN_VERSION));
    payload.append(&env.ledger().network_id().into());
    payload.append(&env.current_contract_address().to_xdr(env));

    env.crypto().keccak256(&payload).to_bytes()
}

/// Digest the signer signs for `meta`
///
/// Formula: keccak(0x1901 || domain_separator || keccak(type_hash || xdr(meta)))
pub fn typed_digest(env: &Env, meta: &MetaTransaction) -> Hash<32> {
    let mut encoded = keccak_str(env, META_TRANSACTION_TYPE);
    encoded.append(&meta.clone().to_xdr(env));
    let struct_hash: Bytes = env.crypto().keccak256(&encoded).to_bytes().into();

    let mut payload = Bytes::from_array(env, &TYPED_DATA_PREFIX);
    payload.append(&domain_separator(env).into());
    payload.append(&struct_hash);

    env.crypto().keccak256(&payload)
}

/// 20-byte identity of an uncompressed secp256k1 public key (0x04 prefix included)
pub fn signer_id(env: &Env, public_key: &BytesN<65>) -> BytesN<20> {
    let key = public_key.to_array();
    let hash = env.crypto().keccak256(&Bytes::from_slice(env, &key[1..]));

    let mut id = [0u8; 20];
    id.copy_from_slice(&hash.to_array()[12..]);
    BytesN::from_array(env, &id)
}

/// Identity that produced `signature` over `meta`; `None` for an out-of-range recovery id.
pub fn recover_signer(
    env: &Env,
    meta: &MetaTransaction,
    signature: &RecoverableSignature,
) -> Option<BytesN<20>> {
    if signature.recovery_id > MAX_RECOVERY_ID {
        return None;
    }

    let digest = typed_digest(env, meta);
    let public_key =
        env.crypto()
            .secp256k1_recover(&digest, &signature.signature, signature.recovery_id);
    Some(signer_id(env, &public_key))
}
