//! Interview aggregate services.
//!
//! Each mutation runs as one unit of work: payload validation first, then a
//! single transaction that locks the owning interview, computes the new state
//! in memory with `scout_core`, writes it, and commits. Any early return drops
//! the transaction, which rolls it back.

pub mod interview;
pub mod screen;

pub use interview::InterviewService;
pub use screen::ScreenService;
