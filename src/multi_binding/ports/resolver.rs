//! Single-binding resolver port.

use crate::multi_binding::domain::ResolutionScope;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use thiserror::Error;

/// Type-erased instance handed across the generic resolution boundary.
pub type ErasedInstance = Box<dyn Any + Send + Sync>;

/// Error produced by a binding factory while constructing an instance.
pub type FactoryError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for single-binding construction.
pub type ConstructionResult<T> = Result<T, ConstructionError>;

/// Last-resort resolution handler invoked when the resolver cannot satisfy
/// a request through its own binding table.
///
/// A handler answers with an erased instance, or declines with `None` to
/// let the resolver continue its chain.
pub type FallbackHandler = Arc<dyn Fn(&ResolutionQuery) -> Option<ErasedInstance> + Send + Sync>;

/// A request the single-binding resolver could not satisfy from its own
/// table, presented to the fallback chain.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionQuery {
    requested: TypeId,
    requested_name: &'static str,
    scope: ResolutionScope,
}

impl ResolutionQuery {
    /// Builds the query for the requested type `Q`.
    #[must_use]
    pub fn of<Q: ?Sized + 'static>(scope: ResolutionScope) -> Self {
        Self {
            requested: TypeId::of::<Q>(),
            requested_name: type_name::<Q>(),
            scope,
        }
    }

    /// Returns the requested type's id.
    #[must_use]
    pub const fn requested(&self) -> TypeId {
        self.requested
    }

    /// Returns the requested type's name.
    #[must_use]
    pub const fn requested_name(&self) -> &'static str {
        self.requested_name
    }

    /// Returns the instantiation scope carried by the request.
    #[must_use]
    pub const fn scope(&self) -> ResolutionScope {
        self.scope
    }
}

/// Construction contract of the external single-binding resolver.
///
/// The resolver natively supports one registered implementation per type;
/// the multi-binding registry calls [`construct_one`] once per registered
/// implementation during resolution and hooks into the resolver's
/// last-resort chain via [`register_fallback`].
///
/// [`construct_one`]: SingleBindingResolver::construct_one
/// [`register_fallback`]: SingleBindingResolver::register_fallback
#[cfg_attr(test, mockall::automock)]
pub trait SingleBindingResolver: Send + Sync {
    /// Constructs one instance of the concrete type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::Unbound`] when no binding exists for
    /// `T`, or [`ConstructionError::Factory`] when the binding's factory
    /// fails.
    fn construct_one<T>(&self, scope: ResolutionScope) -> ConstructionResult<Arc<T>>
    where
        T: Send + Sync + 'static;

    /// Installs a last-resort resolution handler.
    ///
    /// Handlers are consulted in installation order after the resolver's
    /// normal table; registration is not reversible.
    fn register_fallback(&self, handler: FallbackHandler);
}

/// Errors returned by single-binding resolver implementations.
#[derive(Debug, Clone, Error)]
pub enum ConstructionError {
    /// No binding is registered for the requested concrete type.
    #[error("no binding registered for {0}")]
    Unbound(&'static str),

    /// The binding's factory failed to produce an instance.
    #[error("factory for {type_name} failed: {source}")]
    Factory {
        /// The concrete type being constructed.
        type_name: &'static str,
        /// The factory's failure.
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// A stored instance did not have the type its binding promised.
    #[error("binding for {0} produced an instance of a different type")]
    InstanceType(&'static str),
}

impl ConstructionError {
    /// Wraps a factory failure for the concrete type `type_name`.
    #[must_use]
    pub fn factory(type_name: &'static str, err: FactoryError) -> Self {
        Self::Factory {
            type_name,
            source: Arc::from(err),
        }
    }
}
