//! Domain logic for the interview builder.
//!
//! Everything in this crate is synchronous and free of I/O. The persistence
//! and HTTP layers feed rows in and write the computed results back out.

pub mod diff;
pub mod error;
pub mod ordering;
pub mod reconcile;
pub mod settings;
pub mod starting_state;
pub mod types;
