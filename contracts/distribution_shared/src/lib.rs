#![no_std]

//! Ledger glue shared by the distributor and forwarder contracts.
//!
//! Distributors never talk to token or NFT contracts directly; they go
//! through the helpers here so that the native-currency sentinel, the
//! ticket ownership lookup and the relayed-caller context behave the same
//! way everywhere.

pub mod asset;
pub mod math;
pub mod relay;
pub mod ticket;

pub use asset::{AssetLedger, ClaimToken};
pub use math::{mul_div, ACC_SCALE, BASIS_POINTS};
pub use relay::{relayed_caller, Caller};
pub use ticket::{current_holder, TicketClient, TicketInterface};
