//! Step definitions for multi-binding resolution BDD scenarios.

pub mod world;

mod then;
mod when;
