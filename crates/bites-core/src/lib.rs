//! # Bites Core
//!
//! The domain layer of the Bites food-sharing backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the post lifecycle, the reservation ledger, and the account purge service,
//! all speaking to the outside world through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
