use super::*;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype,
    testutils::{
        storage::{Instance as _, Persistent as _},
        Address as _, Ledger,
    },
    token::{Client as TokenClient, StellarAssetClient},
    vec, Address, BytesN, Env, IntoVal, Symbol, TryFromVal, Val, Vec,
};


// ============================================
// TARGET CONTRACT
// ============================================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TargetError {
    Rejected = 1,
}

#[contracttype]
#[derive(Clone)]
enum TargetKey {
    Calls,
    LastSigner,
}

/// Records who the forwarder says it is calling on behalf of.
#[contract]
pub struct Target;

#[contractimpl]
impl Target {
    pub fn record(env: Env, amount: u32, signer: BytesN<20>) -> u32 {
        let calls: u32 = env.storage().instance().get(&TargetKey::Calls).unwrap_or(0);
        env.storage().instance().set(&TargetKey::Calls, &(calls + 1));
        env.storage().instance().set(&TargetKey::LastSigner, &signer);
        amount * 2
    }

    pub fn reject(_env: Env, _signer: BytesN<20>) -> Result<(), TargetError> {
        Err(TargetError::Rejected)
    }

    pub fn calls(env: Env) -> u32 {
        env.storage().instance().get(&TargetKey::Calls).unwrap_or(0)
    }

    pub fn last_signer(env: Env) -> Option<BytesN<20>> {
        env.storage().instance().get(&TargetKey::LastSigner)
    }
}

// ============================================
// FIXTURES
// ============================================

struct Signer {
    secret_key: SecretKey,
    id: BytesN<20>,
}

impl Signer {
    fn new(env: &Env, seed: u8) -> Self {
        let secp = Secp256k1::new();
        let secret_key = SecretKey::from_slice(&[seed; 32]).unwrap();
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);

        let id = signer_id(
            env,
            &BytesN::from_array(env, &public_key.serialize_uncompressed()),
        );
        Signer { secret_key, id }
    }

    fn sign(&self, env: &Env, digest: &BytesN<32>) -> RecoverableSignature {
        let secp = Secp256k1::new();
        let message = Message::from_slice(&digest.to_array()).unwrap();
        let (recovery_id, signature) = secp
            .sign_ecdsa_recoverable(&message, &self.secret_key)
            .serialize_compact();

        RecoverableSignature {
            signature: BytesN::from_array(env, &signature),
            recovery_id: recovery_id.to_i32() as u32,
        }
    }
}

struct Setup {
    env: Env,
    relayer: Address,
    native: Address,
    alice: Signer,
    target: TargetClient<'static>,
    client: UnorderedForwarderClient<'static>,
}

const NOW: u64 = 1_700_000_000;
const GAS_PRICE: u64 = 100;

fn setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = NOW);

    let native = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let relayer = Address::generate(&env);
    StellarAssetClient::new(&env, &native).mint(&relayer, &1_000);

    let contract_id = env.register(UnorderedForwarder, ());
    let client = UnorderedForwarderClient::new(&env, &contract_id);
    client.initialize(&native);

    let target = TargetClient::new(&env, &env.register(Target, ()));
    let alice = Signer::new(&env, 1);

    Setup {
        env,
        relayer,
        native,
        alice,
        target,
        client,
    }
}

impl Setup {
    fn record_meta(&self, from: &Signer, amount: u32, nonce: u64) -> MetaTransaction {
        MetaTransaction {
            from: from.id.clone(),
            to: self.target.address.clone(),
            function: Symbol::new(&self.env, "record"),
            args: vec![&self.env, amount.into_val(&self.env)],
            value: 0,
            min_gas_price: 10,
            max_gas_price: 1_000,
            expires_at: NOW + 3600,
            nonce,
        }
    }

    fn sign(&self, signer: &Signer, meta: &MetaTransaction) -> RecoverableSignature {
        signer.sign(&self.env, &self.client.hash_meta_transaction(meta))
    }

    fn execute(
        &self,
        metas: &Vec<MetaTransaction>,
        signatures: &Vec<RecoverableSignature>,
    ) -> Vec<Val> {
        self.client
            .batch_execute(&self.relayer, &GAS_PRICE, metas, signatures)
    }

    fn try_execute_one(
        &self,
        meta: &MetaTransaction,
        signature: &RecoverableSignature,
    ) -> Result<(), Error> {
        match self.client.try_batch_execute(
            &self.relayer,
            &GAS_PRICE,
            &vec![&self.env, meta.clone()],
            &vec![&self.env, signature.clone()],
        ) {
            Ok(_) => Ok(()),
            Err(Ok(error)) => Err(error),
            Err(Err(_)) => panic!("unexpected host error"),
        }
    }
}

// ============================================
// TESTS
// ============================================

#[test]
fn test_initialize_twice_fails() {
    let s = setup();

    assert_eq!(
        s.client.try_initialize(&s.native),
        Err(Ok(Error::AlreadyInitialized))
    );
}

#[test]
fn test_batch_appends_signer_and_returns_results() {
    let s = setup();
    let first = s.record_meta(&s.alice, 21, 1);
    let second = s.record_meta(&s.alice, 5, 2);

    let results = s.execute(
        &vec![&s.env, first.clone(), second.clone()],
        &vec![&s.env, s.sign(&s.alice, &first), s.sign(&s.alice, &second)],
    );

    assert_eq!(results.len(), 2);
    assert_eq!(u32::try_from_val(&s.env, &results.get(0).unwrap()).unwrap(), 42);
    assert_eq!(u32::try_from_val(&s.env, &results.get(1).unwrap()).unwrap(), 10);
    assert_eq!(s.target.calls(), 2);
    assert_eq!(s.target.last_signer(), Some(s.alice.id.clone()));
    assert!(s.client.is_nonce_used(&s.alice.id, &1));
    assert!(s.client.is_nonce_used(&s.alice.id, &2));
}

#[test]
fn test_used_nonce_outlives_instance_bump() {
    let s = setup();
    let meta = s.record_meta(&s.alice, 1, 7);
    s.execute(&vec![&s.env, meta.clone()], &vec![&s.env, s.sign(&s.alice, &meta)]);

    s.env.as_contract(&s.client.address, || {
        let instance_ttl = s.env.storage().instance().get_ttl();
        let nonce_ttl = s
            .env
            .storage()
            .persistent()
            .get_ttl(&storage::DataKey::UsedNonce(s.alice.id.clone(), 7));
        assert!(instance_ttl > storage::INSTANCE_LIFETIME_THRESHOLD);
        assert!(nonce_ttl > storage::PERSISTENT_LIFETIME_THRESHOLD);
        assert!(nonce_ttl > instance_ttl);
    });
}

#[test]
fn test_nonces_are_unordered() {
    let s = setup();
    let later = s.record_meta(&s.alice, 1, 7);
    let earlier = s.record_meta(&s.alice, 1, 3);

    s.try_execute_one(&later, &s.sign(&s.alice, &later)).unwrap();
    s.try_execute_one(&earlier, &s.sign(&s.alice, &earlier)).unwrap();

    assert_eq!(s.target.calls(), 2);
    assert!(!s.client.is_nonce_used(&s.alice.id, &5));
}

#[test]
fn test_replay_across_batches_fails() {
    let s = setup();
    let meta = s.record_meta(&s.alice, 1, 1);
    let signature = s.sign(&s.alice, &meta);

    s.try_execute_one(&meta, &signature).unwrap();
    assert_eq!(
        s.try_execute_one(&meta, &signature),
        Err(Error::ReplayedNonce)
    );
    assert_eq!(s.target.calls(), 1);
}

#[test]
fn test_replay_within_batch_aborts_whole_batch() {
    let s = setup();
    let meta = s.record_meta(&s.alice, 1, 1);
    let signature = s.sign(&s.alice, &meta);

    let result = s.client.try_batch_execute(
        &s.relayer,
        &GAS_PRICE,
        &vec![&s.env, meta.clone(), meta],
        &vec![&s.env, signature.clone(), signature],
    );
    assert_eq!(result, Err(Ok(Error::ReplayedNonce)));

    assert_eq!(s.target.calls(), 0);
    assert!(!s.client.is_nonce_used(&s.alice.id, &1));
}

#[test]
fn test_signature_from_other_key_fails() {
    let s = setup();
    let mallory = Signer::new(&s.env, 2);
    let meta = s.record_meta(&s.alice, 1, 1);

    assert_eq!(
        s.try_execute_one(&meta, &s.sign(&mallory, &meta)),
        Err(Error::InvalidSignature)
    );
}

#[test]
fn test_tampered_meta_transaction_fails() {
    let s = setup();
    let meta = s.record_meta(&s.alice, 1, 1);
    let signature = s.sign(&s.alice, &meta);

    let mut tampered = meta.clone();
    tampered.args = vec![&s.env, 1_000u32.into_val(&s.env)];

    assert_eq!(
        s.try_execute_one(&tampered, &signature),
        Err(Error::InvalidSignature)
    );
    assert_eq!(s.target.calls(), 0);
}

#[test]
fn test_out_of_range_recovery_id_fails() {
    let s = setup();
    let meta = s.record_meta(&s.alice, 1, 1);
    let mut signature = s.sign(&s.alice, &meta);
    signature.recovery_id = 4;

    assert_eq!(
        s.try_execute_one(&meta, &signature),
        Err(Error::InvalidSignature)
    );
    assert!(!s.client.is_nonce_used(&s.alice.id, &1));
}

#[test]
fn test_signature_is_bound_to_forwarder() {
    let s = setup();
    let other = UnorderedForwarderClient::new(&s.env, &s.env.register(UnorderedForwarder, ()));
    other.initialize(&s.native);
    assert_ne!(other.domain_separator(), s.client.domain_separator());

    let meta = s.record_meta(&s.alice, 1, 1);
    let signature = s.sign(&s.alice, &meta);

    let result = other.try_batch_execute(
        &s.relayer,
        &GAS_PRICE,
        &vec![&s.env, meta],
        &vec![&s.env, signature],
    );
    assert_eq!(result, Err(Ok(Error::InvalidSignature)));
}

#[test]
fn test_expired_meta_transaction_fails() {
    let s = setup();
    let meta = s.record_meta(&s.alice, 1, 1);
    let signature = s.sign(&s.alice, &meta);

    s.env.ledger().with_mut(|li| li.timestamp = NOW + 3600);
    s.try_execute_one(&meta, &signature).unwrap();

    let meta = s.record_meta(&s.alice, 1, 2);
    let signature = s.sign(&s.alice, &meta);
    s.env.ledger().with_mut(|li| li.timestamp = NOW + 3601);
    assert_eq!(s.try_execute_one(&meta, &signature), Err(Error::Expired));
}

#[test]
fn test_gas_price_out_of_range_fails() {
    let s = setup();
    let meta = s.record_meta(&s.alice, 1, 1);
    let signature = s.sign(&s.alice, &meta);
    let metas = vec![&s.env, meta];
    let signatures = vec![&s.env, signature];

    let result = s
        .client
        .try_batch_execute(&s.relayer, &9, &metas, &signatures);
    assert_eq!(result, Err(Ok(Error::GasPriceOutOfRange)));

    let result = s
        .client
        .try_batch_execute(&s.relayer, &1_001, &metas, &signatures);
    assert_eq!(result, Err(Ok(Error::GasPriceOutOfRange)));

    s.client
        .batch_execute(&s.relayer, &1_000, &metas, &signatures);
    assert_eq!(s.target.calls(), 1);
}

#[test]
fn test_length_mismatch_fails() {
    let s = setup();
    let meta = s.record_meta(&s.alice, 1, 1);

    let result = s.client.try_batch_execute(
        &s.relayer,
        &GAS_PRICE,
        &vec![&s.env, meta],
        &Vec::new(&s.env),
    );
    assert_eq!(result, Err(Ok(Error::LengthMismatch)));
}

#[test]
fn test_failing_target_surfaces_call_failed() {
    let s = setup();
    let mut meta = s.record_meta(&s.alice, 1, 1);
    meta.function = Symbol::new(&s.env, "reject");
    meta.args = Vec::new(&s.env);
    let signature = s.sign(&s.alice, &meta);

    assert_eq!(s.try_execute_one(&meta, &signature), Err(Error::CallFailed));
    // The failed batch leaves the nonce available.
    assert!(!s.client.is_nonce_used(&s.alice.id, &1));
}

#[test]
fn test_value_is_sent_to_target() {
    let s = setup();
    let mut meta = s.record_meta(&s.alice, 1, 1);
    meta.value = 250;
    let signature = s.sign(&s.alice, &meta);

    s.try_execute_one(&meta, &signature).unwrap();

    let native = TokenClient::new(&s.env, &s.native);
    assert_eq!(native.balance(&s.target.address), 250);
    assert_eq!(native.balance(&s.relayer), 750);
}
