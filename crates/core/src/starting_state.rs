//! Starting-state membership of an interview's screens.
//!
//! A screen is either outside the starting state or inside it at a 0-based
//! rank. Membership is only ever recomputed for the whole sibling set at
//! once, from the ordered list of screen ids that make up the starting flow.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::error::CoreError;

/// Starting-state membership of a single screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartingState {
    NotStarting,
    Starting(i32),
}

impl StartingState {
    pub fn is_in_starting_state(self) -> bool {
        matches!(self, Self::Starting(_))
    }

    pub fn starting_state_order(self) -> Option<i32> {
        match self {
            Self::Starting(order) => Some(order),
            Self::NotStarting => None,
        }
    }
}

/// A screen whose starting-state columns can be rewritten.
pub trait StartingStateMember {
    type Id: Copy + Eq + Hash + Display;

    fn id(&self) -> Self::Id;
    fn starting_state(&self) -> StartingState;
    fn set_starting_state(&mut self, state: StartingState);
}

/// Map each id in the starting flow to its 0-based rank.
///
/// Fails with [`CoreError::Validation`] if an id appears twice.
pub fn rank_starting_flow<Id>(starting_flow: &[Id]) -> Result<HashMap<Id, i32>, CoreError>
where
    Id: Copy + Eq + Hash + Display,
{
    let mut ranks = HashMap::with_capacity(starting_flow.len());
    for (rank, &id) in (0..).zip(starting_flow) {
        if ranks.insert(id, rank).is_some() {
            return Err(CoreError::Validation(format!(
                "screen {id} appears more than once in the starting state"
            )));
        }
    }
    Ok(ranks)
}

/// Recompute starting-state membership for every screen of one interview.
///
/// Screens listed in `starting_flow` become [`StartingState::Starting`] at
/// their position in the list; every other screen becomes
/// [`StartingState::NotStarting`]. Ids not among `screens` are ignored.
///
/// Returns the number of screens whose membership changed.
pub fn apply_starting_state<T: StartingStateMember>(
    screens: &mut [T],
    starting_flow: &[T::Id],
) -> Result<usize, CoreError> {
    let ranks = rank_starting_flow(starting_flow)?;

    let mut changed = 0;
    for screen in screens.iter_mut() {
        let next = match ranks.get(&screen.id()) {
            Some(&rank) => StartingState::Starting(rank),
            None => StartingState::NotStarting,
        };
        if screen.starting_state() != next {
            screen.set_starting_state(next);
            changed += 1;
        }
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Debug, Clone)]
    struct Screen {
        id: u32,
        is_in_starting_state: bool,
        starting_state_order: Option<i32>,
    }

    impl StartingStateMember for Screen {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }

        fn starting_state(&self) -> StartingState {
            match self.starting_state_order {
                Some(order) if self.is_in_starting_state => StartingState::Starting(order),
                _ => StartingState::NotStarting,
            }
        }

        fn set_starting_state(&mut self, state: StartingState) {
            self.is_in_starting_state = state.is_in_starting_state();
            self.starting_state_order = state.starting_state_order();
        }
    }

    fn screen(id: u32) -> Screen {
        Screen {
            id,
            is_in_starting_state: false,
            starting_state_order: None,
        }
    }

    #[test]
    fn listed_screens_are_ranked_and_others_cleared() {
        let mut screens = vec![screen(1), screen(2), screen(3)];
        screens[2].is_in_starting_state = true;
        screens[2].starting_state_order = Some(0);

        let changed = apply_starting_state(&mut screens, &[2, 1]).unwrap();

        assert_eq!(changed, 3);
        assert_eq!(screens[0].starting_state_order, Some(1));
        assert!(screens[0].is_in_starting_state);
        assert_eq!(screens[1].starting_state_order, Some(0));
        assert!(screens[1].is_in_starting_state);
        assert!(!screens[2].is_in_starting_state);
        assert_eq!(screens[2].starting_state_order, None);
    }

    #[test]
    fn empty_flow_clears_every_screen() {
        let mut screens = vec![screen(1), screen(2)];
        apply_starting_state(&mut screens, &[1]).unwrap();

        apply_starting_state(&mut screens, &[]).unwrap();

        assert!(screens.iter().all(|s| !s.is_in_starting_state));
        assert!(screens.iter().all(|s| s.starting_state_order.is_none()));
    }

    #[test]
    fn reapplying_the_same_flow_changes_nothing() {
        let mut screens = vec![screen(1), screen(2)];
        apply_starting_state(&mut screens, &[2]).unwrap();

        assert_eq!(apply_starting_state(&mut screens, &[2]).unwrap(), 0);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut screens = vec![screen(1)];
        apply_starting_state(&mut screens, &[9, 1]).unwrap();
        assert_eq!(screens[0].starting_state_order, Some(1));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut screens = vec![screen(1), screen(2)];
        assert_matches!(
            apply_starting_state(&mut screens, &[1, 2, 1]),
            Err(CoreError::Validation(_))
        );
        assert!(screens.iter().all(|s| !s.is_in_starting_state));
    }
}
