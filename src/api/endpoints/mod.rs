//! Admin API endpoint handlers.

pub mod health;
pub mod overview;
pub mod risk;
