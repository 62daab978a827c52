use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A proposed ordering breaks contiguity or the screen adjacency rule.
    ///
    /// `requested` is set when a single insertion point was rejected;
    /// `orders` is the sorted list the order was checked against.
    #[error("{}", invalid_order_message(.requested, .orders))]
    InvalidOrder {
        requested: Option<i32>,
        orders: Vec<i32>,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn invalid_order_message(requested: &Option<i32>, orders: &[i32]) -> String {
    match requested {
        Some(order) => format!("Invalid order {order} for new screen, existing orders are {orders:?}"),
        None => format!("Invalid order provided for added/updated models {orders:?}"),
    }
}
