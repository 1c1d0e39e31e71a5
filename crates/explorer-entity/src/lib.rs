//! # explorer-entity
//!
//! Domain entity models for the file explorer. [`node::Node`] is both the
//! `nodes` table row (`sqlx::FromRow`) and the JSON wire representation
//! exchanged with clients.

pub mod node;

pub use node::{NewNode, Node, NodeName, NodeType};
