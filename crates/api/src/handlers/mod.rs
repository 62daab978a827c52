//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource. Interview
//! and screen handlers delegate to [`crate::service`]; the Airtable handlers
//! delegate to [`crate::airtable::AirtableClient`]. Errors map through
//! [`crate::error::AppError`].

pub mod airtable;
pub mod auth;
pub mod interview;
pub mod interview_screen;
