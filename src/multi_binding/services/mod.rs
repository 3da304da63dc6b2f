//! Application services for multi-binding registration and resolution.

mod registry;

pub use registry::MultiBindingRegistry;
