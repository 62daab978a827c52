//! Field-level diff primitives shared by the interview, screen and child
//! collection merges.
//!
//! Merges are written as an explicit list of [`set_if_changed`] calls per
//! entity, so a field is only overwritten when the proposed value differs
//! from the persisted one.

/// The status of a proposed item after it has been compared against
/// persisted state. Persisted rows with no proposed counterpart are not
/// classified here; they are collected separately for deletion.
///
/// - `Added`     -- present only in the proposed side.
/// - `Changed`   -- present in both sides and at least one field was overwritten.
/// - `Unchanged` -- present in both sides with identical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffStatus {
    Added,
    Changed,
    Unchanged,
}

/// Overwrite `current` with `proposed` only when they differ.
///
/// Returns `true` if a write happened.
pub fn set_if_changed<T: PartialEq + Clone>(current: &mut T, proposed: &T) -> bool {
    if current != proposed {
        *current = proposed.clone();
        true
    } else {
        false
    }
}
