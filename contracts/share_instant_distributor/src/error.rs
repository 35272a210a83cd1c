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
    // AUTHORIZATION ERRORS (10-19)
    // ============================================
    /// Caller is not the distributor owner
    Unauthorized = 10,

    // ============================================
    // TEMPORAL ERRORS (30-39)
    // ============================================
    /// Claims are locked until `locked_until`
    Locked = 30,

    // ============================================
    // EXHAUSTION ERRORS (40-49)
    // ============================================
    /// Nothing accrued for this ticket since its last claim
    NothingToClaim = 40,
    /// Owed amount exceeds what the contract holds
    InsufficientBalance = 41,

    // ============================================
    // VALIDATION ERRORS (50-59)
    // ============================================
    /// Shares must add up to exactly 10000 basis points
    InvalidShareTable = 50,
    /// Token id and share vectors differ in length
    LengthMismatch = 51,
    MathOverflow = 52,
}
