//! HTTP route modules for the service desk API.
//!
//! Each module owns one slice of the contract:
//! - `requests`: order submission and status lifecycle
//! - `agents`: roster reads and per-agent economics
//! - `payouts`: pending-commission reporting and payout runs

pub mod agents;
pub mod payouts;
pub mod requests;
