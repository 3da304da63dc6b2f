//! Multi-binding dependency resolution for multibind.
//!
//! This module extends a single-binding service locator with support for
//! multiple registered implementations per capability: registering
//! capability-to-implementation associations, resolving a capability to
//! live instances of every registered implementation, and optionally
//! intercepting the locator's own queries for implementation sequences.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
