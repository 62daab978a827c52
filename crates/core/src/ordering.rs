//! Contiguous 1-based ordering for sibling collections.
//!
//! Screens within an interview, and entries and actions within a screen,
//! each carry an `order` value. Within one sibling collection the orders must
//! be exactly `{1, ..., N}`: no gaps, no duplicates.
//!
//! - [`validate_sequential_order`] checks a proposed collection on its own.
//! - [`adjust_screen_order`] places a new screen among existing siblings and
//!   renumbers the ones it displaces.

use crate::error::CoreError;

/// An item that occupies a position in a sibling collection.
pub trait Ordered {
    fn order(&self) -> i32;
}

/// An [`Ordered`] item whose position can be rewritten during renumbering.
pub trait Reorderable: Ordered {
    fn set_order(&mut self, order: i32);
}

/// Order assigned to the first screen of an interview.
pub const FIRST_ORDER: i32 = 1;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Sorted list of the orders in `items`.
pub fn sorted_orders<T: Ordered>(items: &[T]) -> Vec<i32> {
    let mut orders: Vec<i32> = items.iter().map(Ordered::order).collect();
    orders.sort_unstable();
    orders
}

/// Validate that `items` are numbered `1..=N` with no gaps or duplicates.
///
/// An empty collection is valid. Only the proposed list is inspected;
/// persisted siblings are not consulted.
pub fn validate_sequential_order<T: Ordered>(items: &[T]) -> Result<(), CoreError> {
    let orders = sorted_orders(items);
    if is_contiguous_from_one(&orders) {
        Ok(())
    } else {
        Err(CoreError::InvalidOrder {
            requested: None,
            orders,
        })
    }
}

/// `true` if a sorted list is exactly `[1, 2, ..., N]`.
fn is_contiguous_from_one(sorted: &[i32]) -> bool {
    sorted
        .iter()
        .zip(FIRST_ORDER..)
        .all(|(&order, expected)| order == expected)
}

// ---------------------------------------------------------------------------
// Screen insertion
// ---------------------------------------------------------------------------

/// Result of placing a new screen among its siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderAdjustment<T> {
    /// Final order for the new screen.
    pub order: i32,
    /// Every existing sibling, sorted by their (possibly renumbered) order.
    pub siblings: Vec<T>,
    /// Index into `siblings` of the first sibling that was shifted down.
    first_shifted: usize,
}

impl<T> OrderAdjustment<T> {
    /// Siblings whose order was incremented to make room for the new screen.
    ///
    /// These must be persisted together with the new screen.
    pub fn shifted(&self) -> &[T] {
        &self.siblings[self.first_shifted..]
    }
}

/// Compute the order of a new screen and renumber its existing siblings.
///
/// - No siblings: the screen gets order 1, whatever was requested.
/// - No requested order: the screen is appended after the last sibling.
/// - Otherwise the requested order must equal an existing order, `min + 1`,
///   or `max + 1`; every sibling at or after it moves down by one.
///
/// Existing siblings must already be contiguous. Drifted data is reported as
/// [`CoreError::Conflict`] instead of being renumbered further.
pub fn adjust_screen_order<T: Reorderable>(
    existing: Vec<T>,
    requested: Option<i32>,
) -> Result<OrderAdjustment<T>, CoreError> {
    if existing.is_empty() {
        return Ok(OrderAdjustment {
            order: FIRST_ORDER,
            siblings: existing,
            first_shifted: 0,
        });
    }

    let mut siblings = existing;
    siblings.sort_by_key(Ordered::order);

    let orders: Vec<i32> = siblings.iter().map(Ordered::order).collect();
    if !is_contiguous_from_one(&orders) {
        return Err(CoreError::Conflict(format!(
            "existing screen orders are not contiguous: {orders:?}"
        )));
    }

    let min = orders[0];
    let max = orders[orders.len() - 1];

    let Some(order) = requested else {
        let first_shifted = siblings.len();
        return Ok(OrderAdjustment {
            order: max + 1,
            siblings,
            first_shifted,
        });
    };

    if !orders.contains(&order) && order != min + 1 && order != max + 1 {
        return Err(CoreError::InvalidOrder {
            requested: Some(order),
            orders,
        });
    }

    let first_shifted = siblings
        .iter()
        .position(|s| s.order() >= order)
        .unwrap_or(siblings.len());
    for sibling in &mut siblings[first_shifted..] {
        let shifted = sibling.order() + 1;
        sibling.set_order(shifted);
    }

    Ok(OrderAdjustment {
        order,
        siblings,
        first_shifted,
    })
}

/// Close the gap left by removing the sibling at `removed_order`.
///
/// Returns the siblings whose order was decremented.
pub fn close_gap<T: Reorderable>(siblings: &mut [T], removed_order: i32) -> Vec<&T> {
    let mut moved = Vec::new();
    for sibling in siblings.iter_mut() {
        if sibling.order() > removed_order {
            let order = sibling.order() - 1;
            sibling.set_order(order);
        }
    }
    for sibling in siblings.iter() {
        if sibling.order() >= removed_order {
            moved.push(sibling);
        }
    }
    moved
}
