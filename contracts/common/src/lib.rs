//! Shared utilities for the twin-ledger contract suite.
//!
//! This crate provides:
//! - TTL extension helpers for persistent storage keys.
//! - Small input validators shared by the contract members.

#![no_std]

pub mod ttl;
pub mod validation;

pub use ttl::*;
pub use validation::*;
