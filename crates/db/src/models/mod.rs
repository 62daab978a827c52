//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the create and update payloads
//! - The `scout_core` trait impls that let the ordering, reconciliation and
//!   starting-state logic operate on the rows directly

pub mod action;
pub mod entry;
pub mod interview;
pub mod screen;
pub mod setting;
