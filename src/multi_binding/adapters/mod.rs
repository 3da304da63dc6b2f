//! Adapter implementations of the multi-binding ports.

pub mod memory;
