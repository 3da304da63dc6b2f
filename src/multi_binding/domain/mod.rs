//! Domain model for multi-binding registration and resolution.
//!
//! The multi-binding domain models capability keys, per-registration
//! binding records, and the instantiation scope forwarded to the
//! single-binding resolver. All infrastructure concerns are kept outside
//! the domain boundary.

mod key;
mod record;
mod scope;

pub use key::CapabilityKey;
pub use record::{BindingId, BindingRecord};
pub use scope::ResolutionScope;
