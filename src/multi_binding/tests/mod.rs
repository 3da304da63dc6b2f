//! Unit tests for multi-binding registration and resolution.

mod support;
