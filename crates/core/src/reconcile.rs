//! Reconciliation of a persisted child collection against a proposed
//! replacement.
//!
//! Proposed items are matched to persisted rows by identifier. A matched row
//! receives a field-by-field merge, an unmatched proposed item is inserted
//! as-is, and a persisted row with no proposed counterpart is deleted.
//! A proposed item without an identifier is always new.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use crate::diff::DiffStatus;
use crate::error::CoreError;

/// A row that already exists in the store.
pub trait Persisted {
    type Id: Copy + Eq + Hash + Display;

    fn id(&self) -> Self::Id;
}

/// A proposed item, optionally carrying the identifier of the row it replaces.
pub trait Proposed {
    type Id: Copy + Eq + Hash + Display;

    fn proposed_id(&self) -> Option<Self::Id>;
}

/// Field-level merge of a proposed item into a persisted row.
///
/// Implementations list every mergeable field explicitly and only overwrite
/// a field when the values differ. Returns `true` if anything changed.
pub trait MergeFrom<P> {
    fn merge_from(&mut self, proposed: &P) -> bool;
}

/// One entry of the upsert set.
#[derive(Debug, Clone, PartialEq)]
pub enum Upsert<E, P> {
    /// An existing row after merging. `changed` is `false` when the merge
    /// found nothing to overwrite, so the row need not be written.
    Update { row: E, changed: bool },
    /// A proposed item with no persisted counterpart.
    Insert(P),
}

impl<E, P> Upsert<E, P> {
    pub fn status(&self) -> DiffStatus {
        match self {
            Self::Update { changed: true, .. } => DiffStatus::Changed,
            Self::Update { changed: false, .. } => DiffStatus::Unchanged,
            Self::Insert(_) => DiffStatus::Added,
        }
    }
}

/// Outcome of [`reconcile`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation<E, P> {
    /// Rows to write: merged existing rows first (in persisted order), then
    /// new items (in proposed order).
    pub to_set: Vec<Upsert<E, P>>,
    /// Persisted rows absent from the proposal.
    pub to_delete: Vec<E>,
}

/// Per-status counts, used for logging what a reconciliation will write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub added: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub removed: usize,
}

impl<E, P> Reconciliation<E, P> {
    pub fn summary(&self) -> ReconcileSummary {
        let mut summary = ReconcileSummary {
            removed: self.to_delete.len(),
            ..Default::default()
        };
        for upsert in &self.to_set {
            match upsert.status() {
                DiffStatus::Added => summary.added += 1,
                DiffStatus::Changed => summary.changed += 1,
                DiffStatus::Unchanged => summary.unchanged += 1,
            }
        }
        summary
    }

    /// `true` if applying this reconciliation writes nothing.
    pub fn is_noop(&self) -> bool {
        self.to_delete.is_empty()
            && self
                .to_set
                .iter()
                .all(|u| u.status() == DiffStatus::Unchanged)
    }
}

/// Diff `existing` against `proposed`.
///
/// Fails with [`CoreError::Validation`] if two proposed items carry the same
/// identifier.
pub fn reconcile<E, P>(existing: Vec<E>, proposed: Vec<P>) -> Result<Reconciliation<E, P>, CoreError>
where
    E: Persisted + MergeFrom<P>,
    P: Proposed<Id = E::Id>,
{
    let mut seen = HashSet::new();
    for id in proposed.iter().filter_map(Proposed::proposed_id) {
        if !seen.insert(id) {
            return Err(CoreError::Validation(format!(
                "duplicate id {id} in proposed collection"
            )));
        }
    }

    let mut slots: Vec<Option<P>> = proposed.into_iter().map(Some).collect();
    let mut to_set = Vec::with_capacity(slots.len());
    let mut to_delete = Vec::new();

    for mut row in existing {
        let id = row.id();
        let matched = slots
            .iter_mut()
            .find(|slot| slot.as_ref().and_then(Proposed::proposed_id) == Some(id))
            .and_then(Option::take);

        match matched {
            Some(item) => {
                let changed = row.merge_from(&item);
                to_set.push(Upsert::Update { row, changed });
            }
            None => to_delete.push(row),
        }
    }

    to_set.extend(slots.into_iter().flatten().map(Upsert::Insert));

    Ok(Reconciliation { to_set, to_delete })
}
