//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Reads that
//! stand alone accept `&PgPool`; anything that takes part in a unit of work
//! accepts `&mut PgConnection` so a caller can run it inside a transaction.

pub mod action_repo;
pub mod entry_repo;
pub mod interview_repo;
pub mod screen_repo;
pub mod setting_repo;

pub use action_repo::ActionRepo;
pub use entry_repo::EntryRepo;
pub use interview_repo::InterviewRepo;
pub use screen_repo::ScreenRepo;
pub use setting_repo::SettingRepo;
