#![no_std]

//! Shared utility library for the CoinFlow Soroban contracts
//!
//! Common helpers used by both `coinflow_dapp` and `investment_pool`:
//! - Access control (single admin)
//! - Pausable emergency stop
//! - Event emission
//! - Checked math and basis-point fees
//! - Input validation
//! - Storage helpers (TTL bumps, id counters)

pub mod access_control;
pub mod events;
pub mod math;
pub mod pausable;
pub mod storage;
pub mod validation;


pub use access_control::*;
pub use events::*;
pub use math::*;
pub use pausable::*;
pub use storage::*;
pub use validation::*;
