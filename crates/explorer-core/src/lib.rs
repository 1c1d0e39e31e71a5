//! # explorer-core
//!
//! Core crate for the file explorer. Contains configuration schemas,
//! typed identifiers, the JSON response envelope shared by server and
//! client, and the unified error system.
//!
//! This crate has **no** internal dependencies on other explorer crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
