//! In-memory single-binding service locator.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::multi_binding::domain::ResolutionScope;
use crate::multi_binding::ports::{
    ConstructionError, ConstructionResult, ErasedInstance, FactoryError, FallbackHandler,
    ResolutionQuery, SingleBindingResolver,
};

/// Factory stored for one bound concrete type, producing an erased shared
/// instance.
type BindingFactory = Arc<dyn Fn() -> Result<Arc<dyn Any + Send + Sync>, FactoryError> + Send + Sync>;

/// Answers a typed query through the normal binding table.
type QueryAdapter = Arc<dyn Fn(&InMemoryLocator, ResolutionScope) -> Option<ErasedInstance> + Send + Sync>;

/// Thread-safe in-process single-binding service locator.
///
/// Each concrete type has at most one binding; re-binding replaces the
/// earlier registration. Shared-scope instances are cached per type and
/// reused; transient requests run the factory every call.
#[derive(Clone, Default)]
pub struct InMemoryLocator {
    state: Arc<RwLock<LocatorState>>,
}

#[derive(Default)]
struct LocatorState {
    factories: HashMap<TypeId, BindingFactory>,
    shared: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    queries: HashMap<TypeId, QueryAdapter>,
    fallbacks: Vec<FallbackHandler>,
}

impl InMemoryLocator {
    /// Creates an empty locator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` as the single binding for `T`.
    ///
    /// A later `bind` for the same type replaces the earlier binding and
    /// discards any cached shared instance, so the new factory takes
    /// effect for subsequent shared requests.
    pub fn bind<T, F>(&self, factory: F)
    where
        T: Send + Sync + 'static,
        F: Fn() -> Result<T, FactoryError> + Send + Sync + 'static,
    {
        let erased: BindingFactory =
            Arc::new(move || factory().map(|value| Arc::new(value) as Arc<dyn Any + Send + Sync>));
        let adapter: QueryAdapter = Arc::new(|locator, scope| {
            locator
                .construct_one::<T>(scope)
                .ok()
                .map(|instance| Box::new(instance) as ErasedInstance)
        });

        let mut state = self.write_state();
        state.shared.remove(&TypeId::of::<T>());
        state.factories.insert(TypeId::of::<T>(), erased);
        state.queries.insert(TypeId::of::<Arc<T>>(), adapter);
        tracing::debug!(binding = type_name::<T>(), "registered single binding");
    }

    /// Resolves a request for `Q` through the normal binding table first,
    /// then the fallback chain in installation order; the first answer
    /// wins.
    ///
    /// Bound concrete types answer as `Arc<T>` requests. Returns `None`
    /// when neither the table nor any fallback can satisfy the request.
    #[must_use]
    pub fn resolve<Q>(&self, scope: ResolutionScope) -> Option<Q>
    where
        Q: Send + Sync + 'static,
    {
        let direct = self.read_state().queries.get(&TypeId::of::<Q>()).cloned();
        if let Some(adapter) = direct {
            return adapter(self, scope).and_then(downcast_instance::<Q>);
        }

        let query = ResolutionQuery::of::<Q>(scope);
        let handlers = self.read_state().fallbacks.clone();
        handlers
            .iter()
            .find_map(|handler| handler(&query))
            .and_then(|instance| {
                tracing::trace!(
                    requested = query.requested_name(),
                    "fallback chain answered query"
                );
                downcast_instance::<Q>(instance)
            })
    }

    /// Locks the state for reading, recovering a poisoned lock: critical
    /// sections only perform single map operations and cannot leave the
    /// state inconsistent.
    fn read_state(&self) -> RwLockReadGuard<'_, LocatorState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, LocatorState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SingleBindingResolver for InMemoryLocator {
    fn construct_one<T>(&self, scope: ResolutionScope) -> ConstructionResult<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let type_id = TypeId::of::<T>();

        if scope == ResolutionScope::Shared {
            let cached = self.read_state().shared.get(&type_id).cloned();
            if let Some(instance) = cached {
                return downcast_shared(instance);
            }
        }

        let factory = self
            .read_state()
            .factories
            .get(&type_id)
            .cloned()
            .ok_or_else(|| ConstructionError::Unbound(type_name::<T>()))?;

        // Factories run outside the state lock; a factory may itself
        // resolve through this locator.
        let instance = factory().map_err(|err| ConstructionError::factory(type_name::<T>(), err))?;

        if scope == ResolutionScope::Shared {
            // Under a construction race the first cached instance wins,
            // keeping shared identity stable.
            let mut state = self.write_state();
            let stored = state.shared.entry(type_id).or_insert(instance).clone();
            return downcast_shared(stored);
        }

        downcast_shared(instance)
    }

    fn register_fallback(&self, handler: FallbackHandler) {
        self.write_state().fallbacks.push(handler);
        tracing::debug!("installed fallback resolution handler");
    }
}

fn downcast_shared<T: Send + Sync + 'static>(
    instance: Arc<dyn Any + Send + Sync>,
) -> ConstructionResult<Arc<T>> {
    instance
        .downcast::<T>()
        .map_err(|_| ConstructionError::InstanceType(type_name::<T>()))
}

fn downcast_instance<Q: Send + Sync + 'static>(instance: ErasedInstance) -> Option<Q> {
    instance.downcast::<Q>().ok().map(|boxed| *boxed)
}
