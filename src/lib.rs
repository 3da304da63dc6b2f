//! Multibind: multi-implementation bindings for single-binding service
//! locators.
//!
//! A service locator conventionally maps each abstract contract to exactly
//! one implementation. This crate layers an ordered multi-binding registry
//! on top of such a locator: callers register any number of
//! implementations per capability and resolve them all at once, with
//! construction delegated to the locator and per-entry failures dropped
//! best-effort. An optional fallback hook lets the locator itself answer
//! "all implementations of X" queries transparently.
//!
//! # Architecture
//!
//! Multibind follows hexagonal architecture principles:
//!
//! - **Domain**: Pure capability and registration metadata with no
//!   infrastructure dependencies
//! - **Ports**: The abstract single-binding resolver contract
//! - **Adapters**: Concrete implementations of ports (in-memory locator)
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use mockable::DefaultClock;
//! use multibind::multi_binding::adapters::memory::InMemoryLocator;
//! use multibind::multi_binding::services::MultiBindingRegistry;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> &'static str;
//! }
//!
//! struct English;
//! impl Greeter for English {
//!     fn greet(&self) -> &'static str {
//!         "hello"
//!     }
//! }
//!
//! struct French;
//! impl Greeter for French {
//!     fn greet(&self) -> &'static str {
//!         "bonjour"
//!     }
//! }
//!
//! let locator = Arc::new(InMemoryLocator::new());
//! locator.bind(|| Ok(English));
//! locator.bind(|| Ok(French));
//!
//! let registry = MultiBindingRegistry::new(Arc::clone(&locator), Arc::new(DefaultClock));
//! registry.register::<dyn Greeter, English, _>(|imp| imp);
//! registry.register::<dyn Greeter, French, _>(|imp| imp);
//!
//! let greeters = registry.resolve::<dyn Greeter>();
//! assert_eq!(greeters.len(), 2);
//! assert_eq!(greeters.first().map(|g| g.greet()), Some("hello"));
//! ```

pub mod multi_binding;
