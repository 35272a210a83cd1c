use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-9)
    // ============================================
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // ============================================
    // TEMPORAL ERRORS (30-39)
    // ============================================
    /// Meta-transaction is past its `expires_at`
    Expired = 30,

    // ============================================
    // VALIDATION ERRORS (50-59)
    // ============================================
    /// Meta-transaction and signature counts differ
    LengthMismatch = 50,

    // ============================================
    // SIGNATURE ERRORS (60-69)
    // ============================================
    /// Recovered signer is not the declared `from`
    InvalidSignature = 60,
    /// `(from, nonce)` was already executed
    ReplayedNonce = 61,
    /// Declared gas price outside the signer's accepted range
    GasPriceOutOfRange = 62,

    // ============================================
    // FORWARDING ERRORS (70-79)
    // ============================================
    /// Target call failed or rejected the signer
    CallFailed = 70,
}
