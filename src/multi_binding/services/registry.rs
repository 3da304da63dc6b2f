//! Multi-binding registry layered over a single-binding resolver.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use mockable::Clock;

use crate::multi_binding::domain::{BindingRecord, CapabilityKey, ResolutionScope};
use crate::multi_binding::ports::{
    ConstructionError, ErasedInstance, FallbackHandler, SingleBindingResolver,
};

/// Construction closure captured at registration time, already bound to one
/// concrete implementation type.
type EntryFactory<R> =
    Arc<dyn Fn(&R, ResolutionScope) -> Result<ErasedInstance, ConstructionError> + Send + Sync>;

/// Snapshot of one entry taken under the table lock: implementation type
/// name plus its construction closure.
type EntrySnapshot<R> = (&'static str, EntryFactory<R>);

/// Collapses erased per-entry instances into one erased `Vec<Arc<Cap>>` for
/// fallback answers.
type SequenceCollector = Arc<dyn Fn(Vec<ErasedInstance>) -> ErasedInstance + Send + Sync>;

struct BindingEntry<R> {
    implementation: &'static str,
    record: BindingRecord,
    construct: EntryFactory<R>,
}

struct CapabilitySlot<R> {
    entries: Vec<BindingEntry<R>>,
    collect: SequenceCollector,
}

struct BindingTable<R> {
    capabilities: HashMap<CapabilityKey, CapabilitySlot<R>>,
    sequences: HashMap<TypeId, CapabilityKey>,
}

impl<R> Default for BindingTable<R> {
    fn default() -> Self {
        Self {
            capabilities: HashMap::new(),
            sequences: HashMap::new(),
        }
    }
}

/// Registry mapping capabilities to ordered lists of implementations,
/// resolved through an external single-binding resolver.
///
/// Cloned handles share one table. The registry owns the association table
/// only; instance construction and lifetime belong to the resolver.
pub struct MultiBindingRegistry<R, C>
where
    R: SingleBindingResolver,
    C: Clock + Send + Sync,
{
    resolver: Arc<R>,
    clock: Arc<C>,
    table: Arc<RwLock<BindingTable<R>>>,
}

impl<R, C> Clone for MultiBindingRegistry<R, C>
where
    R: SingleBindingResolver,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            clock: Arc::clone(&self.clock),
            table: Arc::clone(&self.table),
        }
    }
}

impl<R, C> MultiBindingRegistry<R, C>
where
    R: SingleBindingResolver,
    C: Clock + Send + Sync,
{
    /// Creates a registry delegating construction to `resolver`.
    #[must_use]
    pub fn new(resolver: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            resolver,
            clock,
            table: Arc::new(RwLock::new(BindingTable::default())),
        }
    }

    /// Registers `Impl` as one implementation of the capability `Cap`.
    ///
    /// `cast` upcasts a constructed implementation into the capability
    /// type; the identity closure (`|imp| imp`) does the job at any call
    /// site where `Impl` actually satisfies `Cap`, which makes conformance
    /// a compile-time property. Registration always succeeds; registering
    /// the same pair twice produces two entries.
    pub fn register<Cap, Impl, F>(&self, cast: F)
    where
        Cap: ?Sized + Send + Sync + 'static,
        Impl: Send + Sync + 'static,
        F: Fn(Arc<Impl>) -> Arc<Cap> + Send + Sync + 'static,
    {
        let key = CapabilityKey::of::<Cap>();
        let record = BindingRecord::new(key, type_name::<Impl>(), &*self.clock);
        let construct: EntryFactory<R> = Arc::new(move |resolver, scope| {
            resolver
                .construct_one::<Impl>(scope)
                .map(|instance| Box::new(cast(instance)) as ErasedInstance)
        });

        tracing::debug!(
            capability = key.name(),
            implementation = type_name::<Impl>(),
            binding = %record.id(),
            "registered implementation"
        );

        let mut table = self.write_table();
        table.sequences.insert(TypeId::of::<Vec<Arc<Cap>>>(), key);
        let slot = table
            .capabilities
            .entry(key)
            .or_insert_with(|| CapabilitySlot {
                entries: Vec::new(),
                collect: sequence_collector::<Cap>(),
            });
        slot.entries.push(BindingEntry {
            implementation: type_name::<Impl>(),
            record,
            construct,
        });
    }

    /// Resolves all implementations of `Cap` with the default shared scope.
    #[must_use]
    pub fn resolve<Cap>(&self) -> Vec<Arc<Cap>>
    where
        Cap: ?Sized + Send + Sync + 'static,
    {
        self.resolve_scoped::<Cap>(ResolutionScope::default())
    }

    /// Resolves all implementations of `Cap`, forwarding `scope` unchanged
    /// to each construction call.
    ///
    /// Returns an empty vector for a capability with no registrations.
    /// Entries whose construction fails are dropped from the result;
    /// survivors keep registration order and the result never contains
    /// placeholders.
    #[must_use]
    pub fn resolve_scoped<Cap>(&self, scope: ResolutionScope) -> Vec<Arc<Cap>>
    where
        Cap: ?Sized + Send + Sync + 'static,
    {
        let key = CapabilityKey::of::<Cap>();
        let entries = {
            let table = self.read_table();
            snapshot_slot(&table, key).map(|(entries, _)| entries)
        };
        let Some(entries) = entries else {
            return Vec::new();
        };
        construct_surviving(self.resolver.as_ref(), key.name(), entries, scope)
            .into_iter()
            .filter_map(downcast_element::<Cap>)
            .collect()
    }

    /// Installs a handler on the resolver's fallback chain so that
    /// requests for `Vec<Arc<Cap>>` of any registered capability `Cap`
    /// resolve through this registry transparently.
    ///
    /// Requests for other types are declined and continue down the
    /// resolver's normal chain. The handler holds the resolver weakly, so
    /// a resolver that owns its fallback chain does not leak through the
    /// installation. There is no uninstall.
    pub fn install_fallback(&self)
    where
        R: 'static,
    {
        let table = Arc::clone(&self.table);
        let weak_resolver = Arc::downgrade(&self.resolver);
        let handler: FallbackHandler = Arc::new(move |query| {
            let resolver = weak_resolver.upgrade()?;
            let snapshot = {
                let guard = table.read().unwrap_or_else(PoisonError::into_inner);
                guard
                    .sequences
                    .get(&query.requested())
                    .copied()
                    .and_then(|key| {
                        snapshot_slot(&guard, key)
                            .map(|(entries, collect)| (key, entries, collect))
                    })
            };
            let (key, entries, collect) = snapshot?;
            let instances =
                construct_surviving(resolver.as_ref(), key.name(), entries, query.scope());
            Some(collect(instances))
        });
        self.resolver.register_fallback(handler);
        tracing::debug!("installed multi-binding fallback handler");
    }

    /// Lists the registrations for `Cap` in registration order.
    #[must_use]
    pub fn bindings_for<Cap>(&self) -> Vec<BindingRecord>
    where
        Cap: ?Sized + 'static,
    {
        let key = CapabilityKey::of::<Cap>();
        let table = self.read_table();
        table
            .capabilities
            .get(&key)
            .map(|slot| slot.entries.iter().map(|entry| entry.record.clone()).collect())
            .unwrap_or_default()
    }

    /// Locks the table for reading, recovering a poisoned lock: table
    /// mutations are single insertions and cannot leave the maps
    /// inconsistent.
    fn read_table(&self) -> RwLockReadGuard<'_, BindingTable<R>> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_table(&self) -> RwLockWriteGuard<'_, BindingTable<R>> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Copies a capability's entry closures out of the table so construction
/// runs without holding the lock.
fn snapshot_slot<R>(
    table: &BindingTable<R>,
    key: CapabilityKey,
) -> Option<(Vec<EntrySnapshot<R>>, SequenceCollector)> {
    table.capabilities.get(&key).map(|slot| {
        let entries = slot
            .entries
            .iter()
            .map(|entry| (entry.implementation, Arc::clone(&entry.construct)))
            .collect();
        (entries, Arc::clone(&slot.collect))
    })
}

/// Runs each entry's construction closure in order, dropping entries whose
/// construction fails.
fn construct_surviving<R: SingleBindingResolver>(
    resolver: &R,
    capability: &'static str,
    entries: Vec<EntrySnapshot<R>>,
    scope: ResolutionScope,
) -> Vec<ErasedInstance> {
    entries
        .into_iter()
        .filter_map(|(implementation, construct)| match construct(resolver, scope) {
            Ok(instance) => Some(instance),
            Err(err) => {
                tracing::debug!(
                    capability,
                    implementation,
                    scope = scope.as_str(),
                    error = %err,
                    "dropping implementation that failed to construct"
                );
                None
            }
        })
        .collect()
}

/// Builds the collector that reassembles erased instances into a typed
/// `Vec<Arc<Cap>>` for fallback answers.
fn sequence_collector<Cap>() -> SequenceCollector
where
    Cap: ?Sized + Send + Sync + 'static,
{
    Arc::new(|instances| {
        let collected: Vec<Arc<Cap>> = instances
            .into_iter()
            .filter_map(downcast_element::<Cap>)
            .collect();
        Box::new(collected)
    })
}

/// Recovers the typed instance an entry closure produced. Entries stored
/// under a capability's key always box `Arc<Cap>`, so a mismatch cannot
/// occur; a silent `None` keeps the no-placeholder guarantee regardless.
fn downcast_element<Cap>(instance: ErasedInstance) -> Option<Arc<Cap>>
where
    Cap: ?Sized + Send + Sync + 'static,
{
    instance.downcast::<Arc<Cap>>().ok().map(|boxed| *boxed)
}
