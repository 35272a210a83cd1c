use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-9)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // LOOKUP ERRORS (20-29)
    // ============================================
    /// No stream registered under this id
    WrongStream = 20,

    // ============================================
    // TEMPORAL ERRORS (30-39)
    // ============================================
    /// Stream claim window has not opened yet
    NotStarted = 30,
    /// No new window has elapsed since this ticket's last claim
    TooEarly = 31,

    // ============================================
    // EXHAUSTION ERRORS (40-49)
    // ============================================
    /// Stream was never topped up
    StreamEmpty = 40,
    /// Everything topped up has already been paid out
    StreamDepleted = 41,
    /// First claim attempted before a full window elapsed
    NothingToClaim = 42,

    // ============================================
    // VALIDATION ERRORS (50-59)
    // ============================================
    /// Window unit must be positive
    InvalidWindow = 50,
    /// Claim start must not be after claim end
    InvalidSchedule = 51,
    /// Amount or emission rate out of range
    InvalidAmount = 52,
    /// Checked arithmetic overflowed
    MathOverflow = 53,
}
