//! Bearer-token authentication primitives.

pub mod jwt;
