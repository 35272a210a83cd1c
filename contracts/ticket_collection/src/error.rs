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
    /// Caller (direct or relayed) is not the collection admin
    Unauthorized = 10,
    /// `from` does not hold the token being transferred
    NotOwner = 11,
    /// Relayed entry point used on a collection without a trusted forwarder
    NoTrustedForwarder = 12,

    // ============================================
    // LOOKUP ERRORS (20-29)
    // ============================================
    NotMinted = 20,

    // ============================================
    // SUPPLY ERRORS (40-49)
    // ============================================
    AlreadyMinted = 40,
    MaxSupplyReached = 41,
    /// Mint request carried no token URIs
    EmptyMint = 42,

    // ============================================
    // VALIDATION ERRORS (50-59)
    // ============================================
    /// URI prefix leaves no room for the token id suffix
    UriTooLong = 50,
}
