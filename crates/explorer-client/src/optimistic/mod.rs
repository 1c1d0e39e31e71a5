//! Optimistic mutations with rollback.

pub mod controller;
pub mod transition;

pub use controller::TreeController;
