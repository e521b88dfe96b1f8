//! Core functionality for the gateway
//!
//! Provider resolution and the agents built on top of it.

pub mod agent;
pub mod providers;
